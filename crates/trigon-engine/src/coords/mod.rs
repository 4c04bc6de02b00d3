//! Screen-space coordinates.

mod viewport;

pub use viewport::Viewport;
