/// Viewport rectangle in physical pixels, anchored at the top-left corner.
///
/// Resize events are passed straight through: the viewport always covers the
/// full framebuffer, so aspect follows the window.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-area viewport (minimized window) cannot be rendered into.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Restricts the viewport to a render target of the given size.
    #[inline]
    pub fn clamped_to(self, width: u32, height: u32) -> Self {
        Self {
            width: self.width.min(width),
            height: self.height.min(height),
        }
    }
}
