/// Straight-alpha RGBA color with `f32` channels in `[0, 1]`.
///
/// Used for the framebuffer clear color. Channels are written to the surface
/// as-is; no sRGB conversion happens here.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Dark teal background used throughout the tutorials.
    pub const TEAL: Self = Self::rgb(0.2, 0.3, 0.3);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

impl From<Color> for wgpu::Color {
    fn from(c: Color) -> Self {
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_channels_are_detected() {
        assert!(Color::TEAL.is_finite());
        assert!(!Color::rgba(0.2, f32::NAN, 0.3, 1.0).is_finite());
        assert!(!Color::rgb(f32::INFINITY, 0.0, 0.0).is_finite());
    }

    #[test]
    fn converts_to_wgpu_color() {
        let w: wgpu::Color = Color::TEAL.into();
        assert!((w.r - 0.2).abs() < 1e-6);
        assert!((w.g - 0.3).abs() < 1e-6);
        assert_eq!(w.a, 1.0);
    }
}
