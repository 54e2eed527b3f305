//! Scattering for the three material kinds.

use std::f32::consts::PI;

use tracer_core::{Material, MaterialKind};
use tracer_math::{Onb, Ray, Vec3};

use crate::intersection::Intersection;
use crate::sampler::PixelSampler;

/// Index of refraction outside every surface (air).
const IOR_OUTSIDE: f32 = 1.0;
/// Index of refraction inside refractive spheres (glass).
const IOR_INSIDE: f32 = 1.5;

/// Continuation of a path after it hits a surface.
#[derive(Debug, Clone, Copy)]
pub struct Scatter {
    /// Outgoing ray, starting at the hit position
    pub ray: Ray,
    /// Extra throughput factor on top of the albedo (1 unless the
    /// scatter chose between reflection and transmission)
    pub weight: f32,
}

impl Scatter {
    fn new(origin: Vec3, direction: Vec3, weight: f32) -> Self {
        Self {
            ray: Ray::new(origin, direction),
            weight,
        }
    }
}

/// Trait for surfaces that continue a path.
pub trait Scatterer {
    /// Choose the next direction of a path.
    ///
    /// `facing_normal` is the surface normal flipped to oppose the incoming
    /// ray; `hit.normal` stays outward.
    fn scatter(
        &self,
        ray_in: &Ray,
        hit: &Intersection,
        facing_normal: Vec3,
        sampler: &mut PixelSampler,
    ) -> Scatter;
}

impl Scatterer for Material {
    fn scatter(
        &self,
        ray_in: &Ray,
        hit: &Intersection,
        facing_normal: Vec3,
        sampler: &mut PixelSampler,
    ) -> Scatter {
        match self.kind {
            MaterialKind::Diffuse => scatter_diffuse(hit, facing_normal, sampler),
            MaterialKind::Specular => {
                Scatter::new(hit.position, reflect(ray_in.direction, hit.normal), 1.0)
            }
            MaterialKind::Refractive => scatter_refractive(ray_in, hit, facing_normal, sampler),
        }
    }
}

/// Mirror `d` about the normal `n`.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - n * 2.0 * n.dot(d)
}

/// Cosine-weighted direction on the hemisphere around the facing normal.
fn scatter_diffuse(hit: &Intersection, facing_normal: Vec3, sampler: &mut PixelSampler) -> Scatter {
    let r1 = 2.0 * PI * sampler.next_f32();
    let r2 = sampler.next_f32();
    let r2s = r2.sqrt();

    let basis = Onb::from_w(facing_normal);
    let direction = basis.local(r1.cos() * r2s, r1.sin() * r2s, (1.0 - r2).sqrt());
    Scatter::new(hit.position, direction, 1.0)
}

/// Stochastic choice between Fresnel reflection and refraction.
fn scatter_refractive(
    ray_in: &Ray,
    hit: &Intersection,
    facing_normal: Vec3,
    sampler: &mut PixelSampler,
) -> Scatter {
    let d = ray_in.direction;
    let n = hit.normal;
    let reflected = reflect(d, n);

    let into = n.dot(facing_normal) > 0.0;
    let nnt = if into {
        IOR_OUTSIDE / IOR_INSIDE
    } else {
        IOR_INSIDE / IOR_OUTSIDE
    };
    let ddn = d.dot(facing_normal);
    let cos2t = 1.0 - nnt * nnt * (1.0 - ddn * ddn);

    // Total internal reflection
    if cos2t < 0.0 {
        return Scatter::new(hit.position, reflected, 1.0);
    }

    let side = if into { 1.0 } else { -1.0 };
    let transmitted = (d * nnt - n * (side * (ddn * nnt + cos2t.sqrt()))).normalize();

    // Schlick's approximation
    let r0 = ((IOR_INSIDE - IOR_OUTSIDE) / (IOR_INSIDE + IOR_OUTSIDE)).powi(2);
    let c = 1.0 - if into { -ddn } else { transmitted.dot(n) };
    let re = r0 + (1.0 - r0) * c.powi(5);
    let tr = 1.0 - re;

    let p = 0.25 + 0.5 * re;
    if sampler.next_f32() < p {
        Scatter::new(hit.position, reflected, re / p)
    } else {
        Scatter::new(hit.position, transmitted, tr / (1.0 - p))
    }
}
