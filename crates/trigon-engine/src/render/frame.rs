use crate::device::UniformValue;

/// Linear sweep of a horizontal offset with wraparound.
///
/// The offset lives in `[-bound, bound)`. Reaching either end moves it by the
/// full span to the mirrored side; while it is past `ghost_threshold` a second
/// copy is drawn one span away so the shape appears to wrap smoothly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SweepConfig {
    /// Units per second. Negative values sweep leftwards.
    pub speed: f32,
    pub bound: f32,
    pub ghost_threshold: f32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            bound: 1.0,
            ghost_threshold: 0.5,
        }
    }
}

impl SweepConfig {
    pub fn with_speed(speed: f32) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    /// Distance between the two ends of the sweep.
    pub fn span(&self) -> f32 {
        2.0 * self.bound
    }

    /// Offset after `dt` seconds.
    ///
    /// A degenerate configuration (non-positive bound, non-finite values)
    /// pins the offset at zero.
    pub fn advance(&self, offset: f32, dt: f32) -> f32 {
        let span = self.span();
        let mut next = offset + self.speed * dt;
        if span.is_nan() || span <= 0.0 || !next.is_finite() {
            return 0.0;
        }

        if next >= self.bound {
            next -= span;
        } else if next < -self.bound {
            next += span;
        }

        if !(-self.bound..self.bound).contains(&next) {
            // Step longer than the span.
            next = (next + self.bound).rem_euclid(span) - self.bound;
        }
        next
    }

    /// Offset of the wrapped copy, when one is visible.
    pub fn ghost_offset(&self, offset: f32) -> Option<f32> {
        if offset > self.ghost_threshold {
            Some(offset - self.span())
        } else if offset < -self.ghost_threshold {
            Some(offset + self.span())
        } else {
            None
        }
    }
}

/// Per-iteration values.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameState {
    pub dt: f32,
    /// Sweep offset after this frame's advance.
    pub offset: f32,
    pub frame_index: u64,
}

/// How a draw item moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Motion {
    Static,
    /// Writes `vec2(offset, 0.0)` to `uniform` and adds a ghost draw past the threshold.
    Sweep { uniform: String },
}

/// One program/mesh pairing, drawn in scene order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawItem {
    /// Index into the scene's programs.
    pub program: usize,
    /// Index into the scene's meshes.
    pub mesh: usize,
    pub motion: Motion,
}

impl DrawItem {
    pub fn fixed(program: usize, mesh: usize) -> Self {
        Self {
            program,
            mesh,
            motion: Motion::Static,
        }
    }

    pub fn sweeping(program: usize, mesh: usize, uniform: impl Into<String>) -> Self {
        Self {
            program,
            mesh,
            motion: Motion::Sweep {
                uniform: uniform.into(),
            },
        }
    }
}

/// Uniform writes for each draw call `item` issues this frame.
///
/// One entry per draw call, in submission order. The values of an entry are
/// uploaded right before its draw.
pub fn frame_uniforms(
    frame: &FrameState,
    item: &DrawItem,
    sweep: &SweepConfig,
) -> Vec<Vec<(String, UniformValue)>> {
    match &item.motion {
        Motion::Static => vec![Vec::new()],
        Motion::Sweep { uniform } => {
            let at = |offset: f32| vec![(uniform.clone(), UniformValue::Vec2([offset, 0.0]))];

            let mut calls = vec![at(frame.offset)];
            if let Some(ghost) = sweep.ghost_offset(frame.offset) {
                calls.push(at(ghost));
            }
            calls
        }
    }
}
