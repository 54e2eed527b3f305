//! Surface materials and the material store.

use std::collections::HashMap;

use tracer_math::Vec3;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Index of a material inside a [`MaterialLibrary`].
pub type MaterialId = usize;

/// How a surface scatters light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialKind {
    /// Matte surface (like paper)
    #[default]
    Diffuse,
    /// Perfect mirror
    Specular,
    /// Glass-like dielectric: reflects and transmits
    Refractive,
}

impl MaterialKind {
    /// Map the numeric kind used by scene driver files (0, 1, 2).
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::Diffuse),
            1 => Some(Self::Specular),
            2 => Some(Self::Refractive),
            _ => None,
        }
    }

    /// Map an `.mtl` illumination model number.
    ///
    /// Models 0-2 are diffuse, 3 is a mirror and 4 is glass.
    pub fn from_illum(illum: i64) -> Option<Self> {
        match illum {
            0..=2 => Some(Self::Diffuse),
            3 => Some(Self::Specular),
            4 => Some(Self::Refractive),
            _ => None,
        }
    }
}

/// A surface material.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Material {
    /// Light emitted by the surface (non-zero for lights)
    pub emission: Color,
    /// Base color, used as the per-bounce reflectance multiplier
    pub albedo: Color,
    pub kind: MaterialKind,
}

impl Material {
    /// Create a new material.
    pub fn new(emission: Color, albedo: Color, kind: MaterialKind) -> Self {
        Self {
            emission,
            albedo,
            kind,
        }
    }

    /// A non-emissive diffuse material.
    pub fn diffuse(albedo: Color) -> Self {
        Self::new(Color::ZERO, albedo, MaterialKind::Diffuse)
    }

    /// A non-emissive mirror.
    pub fn specular(albedo: Color) -> Self {
        Self::new(Color::ZERO, albedo, MaterialKind::Specular)
    }

    /// A non-emissive dielectric.
    pub fn refractive(albedo: Color) -> Self {
        Self::new(Color::ZERO, albedo, MaterialKind::Refractive)
    }

    /// A diffuse light source.
    pub fn emissive(emission: Color, albedo: Color) -> Self {
        Self::new(emission, albedo, MaterialKind::Diffuse)
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emission.max_element() > 0.0
    }
}

/// Append-only store of materials.
///
/// Materials are addressed by index; primitives hold only the index.
/// Named materials are also reachable through a `file:name` key.
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
    by_name: HashMap<String, MaterialId>,
    // first material index of every library file loaded so far
    files: HashMap<String, MaterialId>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an anonymous material and return its index.
    pub fn add(&mut self, material: Material) -> MaterialId {
        let id = self.materials.len();
        self.materials.push(material);
        id
    }

    /// Add a material reachable by `(file, name)` and return its index.
    ///
    /// Re-registering a key points it at the new material.
    pub fn add_named(&mut self, material: Material, file: &str, name: &str) -> MaterialId {
        let id = self.add(material);
        self.by_name.insert(Self::key(file, name), id);
        id
    }

    /// Look up a named material's index.
    pub fn find(&self, file: &str, name: &str) -> Option<MaterialId> {
        self.by_name.get(&Self::key(file, name)).copied()
    }

    /// Record that `file` has been loaded, its materials starting at `first`.
    pub fn mark_file_loaded(&mut self, file: &str, first: MaterialId) {
        self.files.insert(file.to_string(), first);
    }

    /// Index of the first material loaded from `file`, if it was loaded.
    pub fn first_in_file(&self, file: &str) -> Option<MaterialId> {
        self.files.get(file).copied()
    }

    /// Get a material by index.
    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Read-only view of all materials, in index order.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    fn key(file: &str, name: &str) -> String {
        format!("{file}:{name}")
    }
}
