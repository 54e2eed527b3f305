//! Scene driver file loading.
//!
//! A driver file describes the camera, the output resolution and the
//! spheres of a scene, one directive per line:
//!
//! ```text
//! eye 0 0 5
//! look 0 0 0
//! up 0 1 0
//! d 1
//! bounds -1 -1 1 1
//! res 640 480
//! # x y z radius  emission  albedo  kind(0=diffuse 1=specular 2=refractive)
//! sphere 0 0 0 1  0 0 0  0.7 0.7 0.7  0
//! # x y z radius  library [material name]
//! sphere 0 -101 0 100  room.mtl floor
//! ```

use std::path::Path;

use tracer_math::{Camera, ImagePlaneBounds, Vec3};

use super::mtl::resolve_material;
use super::parser::{directives, LineParser, ParseError, ParseResult};
use super::{LoadError, LoadResult};
use crate::material::{Material, MaterialKind};
use crate::primitive::Sphere;
use crate::scene::Scene;

/// Everything a driver file describes.
#[derive(Debug, Clone)]
pub struct SceneFile {
    pub scene: Scene,
    pub camera: Camera,
    /// Output image size as (width, height)
    pub resolution: (u32, u32),
    /// Driver file name without directory or extension
    pub name: String,
}

/// Camera and image values collected across lines.
#[derive(Default)]
struct Settings {
    eye: Option<Vec3>,
    look: Option<Vec3>,
    up: Option<Vec3>,
    focal_length: Option<f32>,
    bounds: Option<ImagePlaneBounds>,
    resolution: Option<(u32, u32)>,
}

impl Settings {
    fn finish(self) -> LoadResult<(Camera, (u32, u32))> {
        match self {
            Settings {
                eye: Some(eye),
                look: Some(look),
                up: Some(up),
                focal_length: Some(d),
                bounds: Some(bounds),
                resolution: Some(resolution),
            } => Ok((Camera::new(up, look, eye, d, bounds), resolution)),
            settings => {
                let required = [
                    ("eye", settings.eye.is_some()),
                    ("look", settings.look.is_some()),
                    ("up", settings.up.is_some()),
                    ("d", settings.focal_length.is_some()),
                    ("bounds", settings.bounds.is_some()),
                    ("res", settings.resolution.is_some()),
                ];
                let missing = required
                    .iter()
                    .filter(|(_, present)| !present)
                    .map(|(name, _)| *name)
                    .collect();
                Err(LoadError::MissingFields(missing))
            }
        }
    }
}

/// Load a scene driver file.
///
/// Material libraries referenced by `sphere` lines are resolved relative
/// to the driver file's directory.
pub fn load_scene_file<P: AsRef<Path>>(path: P) -> LoadResult<SceneFile> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

    let file = load_scene_from_str(&content, name, base_dir).map_err(|err| match err {
        LoadError::Parse { file, source } if file == name => LoadError::Parse {
            file: path.display().to_string(),
            source,
        },
        other => other,
    })?;

    log::info!(
        "Loaded scene \"{}\": {} primitives, {} materials, {}x{}",
        file.name,
        file.scene.primitive_count(),
        file.scene.materials().len(),
        file.resolution.0,
        file.resolution.1
    );

    Ok(file)
}

/// Load a scene from driver file contents.
///
/// `base_dir` is where material libraries are looked up.
pub fn load_scene_from_str(content: &str, name: &str, base_dir: &Path) -> LoadResult<SceneFile> {
    let parse_err = |source: ParseError| LoadError::Parse {
        file: name.to_string(),
        source,
    };

    let mut settings = Settings::default();
    let mut scene = Scene::new();

    for (directive, mut line) in directives(content) {
        match directive {
            "eye" => settings.eye = Some(line.vec3("eye").map_err(parse_err)?),
            "look" => settings.look = Some(line.vec3("look").map_err(parse_err)?),
            "up" => settings.up = Some(line.vec3("up").map_err(parse_err)?),
            "d" => settings.focal_length = Some(line.float("focal length").map_err(parse_err)?),
            "bounds" => settings.bounds = Some(parse_bounds(&mut line).map_err(parse_err)?),
            "res" => settings.resolution = Some(parse_resolution(&mut line).map_err(parse_err)?),
            "sphere" => {
                let (sphere, source) = parse_sphere(&mut line).map_err(parse_err)?;
                match source {
                    MaterialSource::Inline(material) => {
                        scene.add_primitive_with_material(sphere, material);
                    }
                    MaterialSource::Library { file, name } => {
                        let id = resolve_material(scene.materials_mut(), &base_dir.join(file), name)?;
                        scene.add_primitive(sphere, id)?;
                    }
                }
            }
            _ => {
                return Err(parse_err(ParseError::UnknownDirective {
                    line: line.line(),
                    directive: directive.to_string(),
                }))
            }
        }
    }

    let (camera, resolution) = settings.finish()?;

    Ok(SceneFile {
        scene,
        camera,
        resolution,
        name: name.to_string(),
    })
}

enum MaterialSource<'a> {
    Inline(Material),
    Library { file: &'a str, name: Option<&'a str> },
}

fn parse_bounds(line: &mut LineParser<'_>) -> ParseResult<ImagePlaneBounds> {
    Ok(ImagePlaneBounds::new(
        line.float("left bound")?,
        line.float("bottom bound")?,
        line.float("right bound")?,
        line.float("top bound")?,
    ))
}

fn parse_resolution(line: &mut LineParser<'_>) -> ParseResult<(u32, u32)> {
    let width = line.int("image width")?;
    let height = line.int("image height")?;
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(line.error(format!("invalid resolution {width}x{height}"))),
    }
}

fn parse_sphere<'a>(line: &mut LineParser<'a>) -> ParseResult<(Sphere, MaterialSource<'a>)> {
    let center = line.vec3("sphere center")?;
    let radius = line.float("sphere radius")?;
    if !(radius > 0.0) {
        return Err(line.error(format!("sphere radius must be positive, got {radius}")));
    }
    let sphere = Sphere::new(radius, center);

    let first = line.word("sphere material")?;
    let source = match first.parse::<f32>() {
        Ok(emission_r) => {
            let emission = Vec3::new(
                emission_r,
                line.float("emission")?,
                line.float("emission")?,
            );
            let albedo = line.vec3("color")?;
            let kind = line.int("material kind")?;
            let kind = MaterialKind::from_index(kind)
                .ok_or_else(|| line.error(format!("unknown material kind {kind}")))?;
            MaterialSource::Inline(Material::new(emission, albedo, kind))
        }
        Err(_) => MaterialSource::Library {
            file: first,
            name: line.next_token(),
        },
    };

    Ok((sphere, source))
}
