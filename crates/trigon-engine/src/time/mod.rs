//! Time subsystem.
//!
//! Frame timing utilities decoupled from the runtime:
//! - `FrameClock`: call `tick()` once per frame to obtain `FrameTime`
//! - `FramePacer`: call `finish_frame()` after presenting to cap the frame rate

mod frame_clock;
mod pacer;

pub use frame_clock::{FrameClock, FrameTime};
pub use pacer::FramePacer;
