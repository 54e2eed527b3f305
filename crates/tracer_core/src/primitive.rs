//! Renderable geometry.
//!
//! Geometry kinds form a closed enum so that hit-testing is a plain
//! `match` with no indirect calls. Adding a kind means adding a variant;
//! every `match` over [`Shape`] then fails to compile until it is handled.

use tracer_math::Vec3;

use crate::material::MaterialId;

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: f32,
    pub center: Vec3,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(radius: f32, center: Vec3) -> Self {
        Self { radius, center }
    }
}

/// The geometry kinds the renderer knows how to intersect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

/// A shape placed in the scene together with the index of its material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub material: MaterialId,
}

impl Primitive {
    pub fn new(shape: impl Into<Shape>, material: MaterialId) -> Self {
        Self {
            shape: shape.into(),
            material,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_from_sphere() {
        let sphere = Sphere::new(2.0, Vec3::new(0.0, 1.0, 0.0));
        let primitive = Primitive::new(sphere, 3);

        assert_eq!(primitive.material, 3);
        match primitive.shape {
            Shape::Sphere(s) => assert_eq!(s, sphere),
        }
    }
}
