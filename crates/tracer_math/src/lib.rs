//! Vector algebra and camera model for the tracer.
//!
//! The vector type is glam's `Vec3`; this crate adds the handful of
//! geometric types the renderer builds on.

// Re-export glam for convenience
pub use glam::*;

mod camera;
mod interval;
mod onb;
mod ray;

pub use camera::{Camera, ImagePlaneBounds};
pub use interval::Interval;
pub use onb::Onb;
pub use ray::Ray;
