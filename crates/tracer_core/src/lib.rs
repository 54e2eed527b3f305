//! Tracer Core - scene description for the path tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Primitive`, `Shape`, `Sphere`
//! - **Materials**: `Material`, `MaterialKind`, and the indexed `MaterialLibrary`
//! - **Loading**: scene driver files and `.mtl` material libraries
//!
//! # Example
//!
//! ```ignore
//! use tracer_core::loader::load_scene_file;
//!
//! let file = load_scene_file("scenes/room.txt")?;
//! println!("Loaded {} primitives, {} materials",
//!     file.scene.primitive_count(),
//!     file.scene.materials().len());
//! ```

pub mod loader;
pub mod material;
pub mod primitive;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene_file, load_scene_from_str, SceneFile};
pub use material::{Color, Material, MaterialId, MaterialKind, MaterialLibrary};
pub use primitive::{Primitive, Shape, Sphere};
pub use scene::{Scene, SceneError};
