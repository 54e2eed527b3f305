//! Iterative path integrator.

use tracer_core::{Color, Scene};
use tracer_math::Ray;

use crate::intersection::closest_intersection;
use crate::material::Scatterer;
use crate::sampler::PixelSampler;

/// Maximum number of surface interactions along one path.
///
/// Paths are cut off hard at this depth with no Russian roulette, so very
/// long light paths lose a little energy.
pub const MAX_DEPTH: u32 = 7;

/// Outcome of tracing a single path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Linear radiance carried back along the primary ray
    pub radiance: Color,
    /// Surface interactions that contributed (at most [`MAX_DEPTH`])
    pub bounces: u32,
}

/// Trace one path starting at `ray`.
///
/// The loop ends when the path leaves the scene or when it reaches a
/// surface after [`MAX_DEPTH`] interactions.
pub fn trace_path(ray: Ray, scene: &Scene, sampler: &mut PixelSampler) -> PathSample {
    let mut ray = ray;
    let mut color = Color::ZERO;
    let mut reflectance = Color::ONE;
    let mut depth = 0;

    loop {
        let Some((index, hit)) = closest_intersection(scene.primitives(), &ray) else {
            break;
        };

        if depth == MAX_DEPTH {
            break;
        }
        depth += 1;

        let material = scene.material_of(index);
        let facing_normal = if hit.normal.dot(ray.direction) < 0.0 {
            hit.normal
        } else {
            -hit.normal
        };

        color += reflectance * material.emission;
        reflectance *= material.albedo;

        let scatter = material.scatter(&ray, &hit, facing_normal, sampler);
        reflectance *= scatter.weight;
        ray = scatter.ray;
    }

    PathSample {
        radiance: color,
        bounces: depth,
    }
}

/// Radiance estimate for one path.
#[inline]
pub fn radiance(ray: Ray, scene: &Scene, sampler: &mut PixelSampler) -> Color {
    trace_path(ray, scene, sampler).radiance
}
