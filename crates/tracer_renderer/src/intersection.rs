//! Ray/primitive intersection.

use tracer_core::{Primitive, Shape, Sphere};
use tracer_math::{Interval, Ray, Vec3};

/// Minimum hit distance. Hits closer than this are ignored so a ray leaving
/// a surface does not immediately re-hit it.
pub const HIT_EPSILON: f32 = 1.5e-2;

const HIT_RANGE: Interval = Interval::new(HIT_EPSILON, f32::INFINITY);

/// Result of a ray/primitive intersection test.
///
/// A miss is represented by [`Intersection::NONE`], whose distance is
/// infinite. Any two misses compare equal whatever their other fields hold.
#[derive(Debug, Clone, Copy)]
pub struct Intersection {
    /// Distance along the ray (infinite for a miss)
    pub distance: f32,
    /// Outward unit surface normal
    pub normal: Vec3,
    /// Hit position
    pub position: Vec3,
}

impl Intersection {
    /// The "no intersection" sentinel.
    pub const NONE: Intersection = Intersection {
        distance: f32::INFINITY,
        normal: Vec3::ZERO,
        position: Vec3::ZERO,
    };

    pub fn new(distance: f32, normal: Vec3, position: Vec3) -> Self {
        Self {
            distance,
            normal,
            position,
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.distance.is_finite()
    }

    /// True if this hit is strictly closer than `other`.
    #[inline]
    pub fn is_closer_than(&self, other: &Intersection) -> bool {
        self.distance < other.distance
    }
}

impl PartialEq for Intersection {
    fn eq(&self, other: &Self) -> bool {
        if self.distance.is_infinite() && other.distance.is_infinite() {
            return true;
        }
        (self.distance - other.distance).abs() < 1e-4
            && self.normal == other.normal
            && self.position == other.position
    }
}

/// Anything a ray can be tested against.
pub trait Hittable {
    /// Closest hit beyond [`HIT_EPSILON`], or [`Intersection::NONE`].
    fn intersect(&self, ray: &Ray) -> Intersection;
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Intersection {
        // Solve t^2 + 2t(o-c).d + |o-c|^2 - r^2 = 0 for a unit direction
        let oc = self.center - ray.origin;
        let b = oc.dot(ray.direction);
        let discriminant = b * b - oc.length_squared() + self.radius * self.radius;
        if discriminant < 0.0 {
            return Intersection::NONE;
        }

        let sqrtd = discriminant.sqrt();

        // Prefer the nearer root, fall back to the farther one
        let mut t = b - sqrtd;
        if !HIT_RANGE.surrounds(t) {
            t = b + sqrtd;
            if !HIT_RANGE.surrounds(t) {
                return Intersection::NONE;
            }
        }

        let position = ray.at(t);
        let normal = (position - self.center) / self.radius;
        Intersection::new(t, normal, position)
    }
}

impl Hittable for Shape {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Intersection {
        match self {
            Shape::Sphere(sphere) => sphere.intersect(ray),
        }
    }
}

impl Hittable for Primitive {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Intersection {
        self.shape.intersect(ray)
    }
}

/// Find the closest hit among `primitives`.
///
/// Linear scan; on equal distances the earlier primitive wins. Returns the
/// primitive index with the hit, or `None` on a miss.
pub fn closest_intersection(primitives: &[Primitive], ray: &Ray) -> Option<(usize, Intersection)> {
    let mut best = Intersection::NONE;
    let mut best_index = 0;

    for (index, primitive) in primitives.iter().enumerate() {
        let hit = primitive.intersect(ray);
        if hit.is_closer_than(&best) {
            best = hit;
            best_index = index;
        }
    }

    best.is_hit().then_some((best_index, best))
}
