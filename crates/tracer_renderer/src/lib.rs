//! Tracer Renderer - CPU path tracing
//!
//! A Monte Carlo path tracer over sphere scenes: closest-hit intersection,
//! three ideal material models, a per-pixel deterministic sampler, an
//! iterative path integrator and a parallel per-pixel dispatcher.

mod execution;
mod image;
mod integrator;
mod intersection;
mod material;
mod renderer;
mod sampler;

pub use execution::{DeviceSelection, ExecutionContext, ExecutionError};
pub use image::{gamma_encode, Image, Pixel, GAMMA};
pub use integrator::{radiance, trace_path, PathSample, MAX_DEPTH};
pub use intersection::{closest_intersection, Hittable, Intersection, HIT_EPSILON};
pub use material::{reflect, Scatter, Scatterer};
pub use renderer::{render_pixel, RenderError, RenderResult, RenderSettings, Renderer};
pub use sampler::PixelSampler;

/// Re-export common math and scene types
pub use tracer_core::{Color, Material, MaterialKind, Primitive, Scene, Shape, Sphere};
pub use tracer_math::{Camera, ImagePlaneBounds, Ray, Vec3};
