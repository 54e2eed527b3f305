//! `.mtl` material library parsing.
//!
//! Only the parts of the format that map onto the three ideal material
//! kinds are honoured. See <http://www.paulbourke.net/dataformats/mtl/>.

use std::path::Path;

use super::parser::{directives, LineParser, ParseError, ParseResult};
use super::{LoadError, LoadResult};
use crate::material::{Color, Material, MaterialId, MaterialKind, MaterialLibrary};

/// A material read from a library file, with its name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedMaterial {
    pub name: String,
    pub material: Material,
}

/// Material being assembled from `newmtl` up to the next `newmtl`.
struct PendingMaterial {
    name: String,
    diffuse: Color,
    specular: Color,
    emission: Color,
    kind: MaterialKind,
}

impl PendingMaterial {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            diffuse: Color::ZERO,
            specular: Color::ZERO,
            emission: Color::ZERO,
            kind: MaterialKind::Diffuse,
        }
    }

    /// The albedo comes from `Kd` for diffuse surfaces and `Ks` otherwise.
    fn finish(self) -> NamedMaterial {
        let albedo = match self.kind {
            MaterialKind::Diffuse => self.diffuse,
            MaterialKind::Specular | MaterialKind::Refractive => self.specular,
        };
        NamedMaterial {
            name: self.name,
            material: Material::new(self.emission, albedo, self.kind),
        }
    }
}

/// Parse the contents of a material library.
pub fn parse_mtl(content: &str) -> ParseResult<Vec<NamedMaterial>> {
    let mut materials = Vec::new();
    let mut current: Option<PendingMaterial> = None;

    for (directive, mut line) in directives(content) {
        if directive == "newmtl" {
            let name = line.word("material name")?;
            if let Some(done) = current.take() {
                materials.push(done.finish());
            }
            current = Some(PendingMaterial::new(name));
            continue;
        }

        let Some(pending) = current.as_mut() else {
            return Err(line.error(format!("\"{directive}\" before any newmtl")));
        };

        match directive {
            "Kd" => pending.diffuse = line.vec3("diffuse color")?,
            "Ks" => pending.specular = line.vec3("specular color")?,
            "Ke" => pending.emission = line.vec3("emission color")?,
            "illum" => pending.kind = parse_illum(&mut line)?,
            // Phong exponent, ambient, index of refraction and dissolve
            // have no counterpart in the ideal material model.
            "Ns" | "Ka" | "Ni" | "d" => {
                log::debug!("Ignoring \"{}\" on line {}", directive, line.line());
            }
            _ => {
                return Err(ParseError::UnknownDirective {
                    line: line.line(),
                    directive: directive.to_string(),
                })
            }
        }
    }

    if let Some(done) = current {
        materials.push(done.finish());
    }

    Ok(materials)
}

fn parse_illum(line: &mut LineParser<'_>) -> ParseResult<MaterialKind> {
    let illum = line.int("illumination model")?;
    MaterialKind::from_illum(illum).ok_or(ParseError::UnsupportedIllum {
        line: line.line(),
        illum,
    })
}

/// Load every material of a library file into `library`.
///
/// Returns the index of the first material added.
pub fn load_material_file(library: &mut MaterialLibrary, path: &Path) -> LoadResult<MaterialId> {
    let file = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let materials = parse_mtl(&content).map_err(|source| LoadError::Parse {
        file: file.clone(),
        source,
    })?;

    if materials.is_empty() {
        return Err(LoadError::EmptyMaterialFile(file));
    }

    let first = library.len();
    for named in &materials {
        library.add_named(named.material, &file, &named.name);
    }
    library.mark_file_loaded(&file, first);

    log::debug!("Loaded {} materials from {}", materials.len(), file);
    Ok(first)
}

/// Find a material by library file and name, loading the file on first use.
///
/// With no name, the first material defined in the file is returned.
pub fn resolve_material(
    library: &mut MaterialLibrary,
    path: &Path,
    name: Option<&str>,
) -> LoadResult<MaterialId> {
    let file = path.display().to_string();

    let first = match library.first_in_file(&file) {
        Some(first) => first,
        None => load_material_file(library, path)?,
    };

    match name {
        None => Ok(first),
        Some(name) => library
            .find(&file, name)
            .ok_or_else(|| LoadError::MaterialNotFound {
                file,
                name: name.to_string(),
            }),
    }
}
