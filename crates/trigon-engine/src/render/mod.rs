//! Render loop driver.
//!
//! [`RenderState`] owns the programs and meshes of a [`SceneDesc`] and runs the
//! per-frame cycle: advance the sweep, clear, upload uniforms, draw, present.

mod frame;
mod scene;
mod state;

pub use frame::{frame_uniforms, DrawItem, FrameState, Motion, SweepConfig};
pub use scene::SceneDesc;
pub use state::{FrameOutcome, RenderState};
