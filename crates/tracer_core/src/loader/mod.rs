//! Scene and material file loading.
//!
//! Two line-oriented text formats are supported:
//!
//! - **Scene driver files**: camera (`eye`, `look`, `up`, `d`, `bounds`),
//!   output resolution (`res`) and `sphere` lines
//! - **Material libraries** (`.mtl`): `newmtl`, `Kd`, `Ks`, `Ke`, `illum`
//!
//! # Example
//!
//! ```ignore
//! use tracer_core::loader::load_scene_file;
//!
//! let file = load_scene_file("scenes/room.txt")?;
//! let (width, height) = file.resolution;
//! ```

mod driver;
mod mtl;
mod parser;

pub use driver::*;
pub use mtl::*;
pub use parser::*;

use std::path::PathBuf;

use thiserror::Error;

use crate::scene::SceneError;

/// Errors that can occur while loading scene or material files.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: ParseError,
    },

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Missing required scene values: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("No materials found in \"{0}\"")]
    EmptyMaterialFile(String),

    #[error("Could not find material \"{name}\" in \"{file}\"")]
    MaterialNotFound { file: String, name: String },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;
