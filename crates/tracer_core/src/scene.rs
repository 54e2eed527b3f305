//! Scene container.
//!
//! A scene is assembled once, then handed to the renderer by shared
//! reference. Nothing mutates it while a render is in flight.

use thiserror::Error;

use crate::material::{Material, MaterialId, MaterialLibrary};
use crate::primitive::{Primitive, Shape};

/// Errors raised while assembling a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("material index {index} is out of range ({count} materials)")]
    InvalidMaterial { index: MaterialId, count: usize },
}

/// Primitives plus the materials they reference.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
    materials: MaterialLibrary,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape using an existing material and return the primitive index.
    pub fn add_primitive(
        &mut self,
        shape: impl Into<Shape>,
        material: MaterialId,
    ) -> Result<usize, SceneError> {
        if material >= self.materials.len() {
            return Err(SceneError::InvalidMaterial {
                index: material,
                count: self.materials.len(),
            });
        }

        let id = self.primitives.len();
        self.primitives.push(Primitive::new(shape, material));
        Ok(id)
    }

    /// Add a shape together with a new material of its own.
    pub fn add_primitive_with_material(
        &mut self,
        shape: impl Into<Shape>,
        material: Material,
    ) -> usize {
        let material = self.materials.add(material);
        let id = self.primitives.len();
        self.primitives.push(Primitive::new(shape, material));
        id
    }

    /// All primitives, in insertion order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    /// Mutable access to the material store, for registering materials
    /// before primitives reference them. Existing entries cannot be removed.
    pub fn materials_mut(&mut self) -> &mut MaterialLibrary {
        &mut self.materials
    }

    /// Material of a primitive.
    ///
    /// Primitive material indices are validated on insertion, so this only
    /// panics if `primitive` itself is out of range.
    #[inline]
    pub fn material_of(&self, primitive: usize) -> &Material {
        let id = self.primitives[primitive].material;
        &self.materials.materials()[id]
    }
}
