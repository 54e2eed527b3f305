//! Per-pixel render dispatcher.

use std::time::Instant;

use tracer_core::{Color, Scene};
use tracer_math::Camera;

use crate::execution::{DeviceSelection, ExecutionContext, ExecutionError};
use crate::image::{Image, Pixel};
use crate::integrator::radiance;
use crate::sampler::PixelSampler;

/// Errors raised by a render call.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid resolution {width}x{height}: both axes must be at least 2")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    InvalidSampleCount,

    #[error("Execution platform failure: {0}")]
    Platform(#[from] ExecutionError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Path samples averaged per pixel
    pub samples_per_pixel: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            samples_per_pixel: 16,
            width: 640,
            height: 480,
        }
    }
}

impl RenderSettings {
    pub fn new(samples_per_pixel: u32, width: u32, height: u32) -> Self {
        Self {
            samples_per_pixel,
            width,
            height,
        }
    }

    /// Check that the settings describe a renderable image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width < 2 || self.height < 2 {
            return Err(RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidSampleCount);
        }
        Ok(())
    }
}

/// Render the pixel at column `x`, camera row `y` (row 0 at the bottom).
///
/// Every sample starts from the same camera ray through the pixel; the
/// samples differ only in the draws taken from the pixel's own sampler.
pub fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    samples_per_pixel: u32,
) -> Pixel {
    let ray = camera.ray_for_pixel(x, y, width, height);
    let mut sampler = PixelSampler::new(x, y);

    let mut pixel_color = Color::ZERO;
    for _ in 0..samples_per_pixel {
        pixel_color += radiance(ray, scene, &mut sampler);
    }

    Pixel::from_linear(pixel_color / samples_per_pixel as f32)
}

/// Renders scenes on one execution platform.
#[derive(Debug)]
pub struct Renderer {
    context: ExecutionContext,
}

impl Renderer {
    /// Create a renderer, bringing up the selected platform.
    pub fn new(selection: DeviceSelection) -> RenderResult<Self> {
        Ok(Self {
            context: ExecutionContext::new(selection)?,
        })
    }

    pub fn device_name(&self) -> &'static str {
        self.context.name()
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Render `scene` seen through `camera` into a new image.
    pub fn render(
        &self,
        scene: &Scene,
        camera: &Camera,
        samples_per_pixel: u32,
        width: u32,
        height: u32,
    ) -> RenderResult<Image> {
        RenderSettings::new(samples_per_pixel, width, height).validate()?;

        let mut image = Image::new(width, height);
        self.render_into(scene, camera, samples_per_pixel, &mut image)?;
        Ok(image)
    }

    /// Render into an existing image, using its resolution.
    ///
    /// On error the image contents are unspecified.
    pub fn render_into(
        &self,
        scene: &Scene,
        camera: &Camera,
        samples_per_pixel: u32,
        image: &mut Image,
    ) -> RenderResult<()> {
        let (width, height) = (image.width(), image.height());
        RenderSettings::new(samples_per_pixel, width, height).validate()?;

        log::info!(
            "Rendering {}x{} at {} spp on {} ({} primitives)",
            width,
            height,
            samples_per_pixel,
            self.device_name(),
            scene.primitive_count()
        );
        let start = Instant::now();

        let row_len = width as usize;
        self.context.dispatch(image.pixels_mut(), |index| {
            let x = (index % row_len) as u32;
            let row = (index / row_len) as u32;
            // Image rows run top-down, camera rows bottom-up
            let y = height - 1 - row;
            render_pixel(scene, camera, x, y, width, height, samples_per_pixel)
        })?;

        log::info!("Render finished in {:.2?}", start.elapsed());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracer_core::{Material, Sphere};
    use tracer_math::{ImagePlaneBounds, Vec3};

    fn test_camera() -> Camera {
        Camera::new(
            Vec3::Y,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::ZERO,
            1.0,
            ImagePlaneBounds::new(-0.5, -0.5, 0.5, 0.5),
        )
    }

    fn enclosed_scene(material: Material) -> Scene {
        let mut scene = Scene::new();
        scene.add_primitive_with_material(Sphere::new(50.0, Vec3::ZERO), material);
        scene
    }

    fn lit_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_primitive_with_material(
            Sphere::new(1000.0, Vec3::new(0.0, -1001.0, 0.0)),
            Material::diffuse(Color::new(0.75, 0.75, 0.75)),
        );
        scene.add_primitive_with_material(
            Sphere::new(0.5, Vec3::new(-0.6, -0.5, -3.0)),
            Material::specular(Color::splat(0.9)),
        );
        scene.add_primitive_with_material(
            Sphere::new(0.5, Vec3::new(0.6, -0.5, -2.5)),
            Material::refractive(Color::splat(0.9)),
        );
        scene.add_primitive_with_material(
            Sphere::new(2.0, Vec3::new(0.0, 4.0, -3.0)),
            Material::emissive(Color::splat(6.0), Color::ZERO),
        );
        scene
    }

    #[test]
    fn test_default_settings() {
        let settings = RenderSettings::default();
        assert_eq!(settings, RenderSettings::new(16, 640, 480));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validation() {
        assert!(matches!(
            RenderSettings::new(1, 1, 10).validate(),
            Err(RenderError::InvalidResolution { width: 1, height: 10 })
        ));
        assert!(matches!(
            RenderSettings::new(1, 10, 0).validate(),
            Err(RenderError::InvalidResolution { .. })
        ));
        assert!(matches!(
            RenderSettings::new(0, 10, 10).validate(),
            Err(RenderError::InvalidSampleCount)
        ));
        assert!(RenderSettings::new(1, 2, 2).validate().is_ok());
    }

    #[test]
    fn test_render_rejects_bad_input() {
        let renderer = Renderer::new(DeviceSelection::HostOnly).unwrap();
        let scene = Scene::new();
        let camera = test_camera();

        assert!(matches!(
            renderer.render(&scene, &camera, 4, 1, 8),
            Err(RenderError::InvalidResolution { .. })
        ));
        assert!(matches!(
            renderer.render(&scene, &camera, 0, 8, 8),
            Err(RenderError::InvalidSampleCount)
        ));

        let mut image = Image::new(8, 1);
        assert!(renderer.render_into(&scene, &camera, 4, &mut image).is_err());
    }

    #[test]
    fn test_empty_scene_is_black() {
        let renderer = Renderer::new(DeviceSelection::HostOnly).unwrap();
        let image = renderer
            .render(&Scene::new(), &test_camera(), 4, 8, 6)
            .unwrap();

        assert_eq!(image.width(), 8);
        assert_eq!(image.height(), 6);
        assert!(image.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_emissive_enclosure_is_white() {
        let renderer = Renderer::new(DeviceSelection::Threads(2)).unwrap();
        let scene = enclosed_scene(Material::emissive(Color::ONE, Color::ZERO));
        let image = renderer.render(&scene, &test_camera(), 3, 5, 5).unwrap();

        assert!(image.as_bytes().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_emitter_filling_view_is_white() {
        // Seen from outside, a single sample per pixel
        let mut scene = Scene::new();
        scene.add_primitive_with_material(
            Sphere::new(100.0, Vec3::new(0.0, 0.0, -150.0)),
            Material::emissive(Color::ONE, Color::splat(0.5)),
        );
        let camera = test_camera();
        let renderer = Renderer::new(DeviceSelection::Threads(2)).unwrap();

        for (width, height) in [(2, 2), (7, 3), (33, 17)] {
            let image = renderer.render(&scene, &camera, 1, width, height).unwrap();
            assert_eq!(image.as_bytes().len(), (width * height * 3) as usize);
            assert!(image.as_bytes().iter().all(|&b| b == 255), "{width}x{height}");
        }
    }

    #[test]
    fn test_mirror_chamber_is_black() {
        let renderer = Renderer::new(DeviceSelection::Threads(2)).unwrap();
        let scene = enclosed_scene(Material::specular(Color::ONE));
        let image = renderer.render(&scene, &test_camera(), 2, 6, 6).unwrap();

        assert!(image.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_same_image_on_every_platform() {
        let scene = lit_scene();
        let camera = test_camera();

        let host = Renderer::new(DeviceSelection::HostOnly).unwrap();
        let pool = Renderer::new(DeviceSelection::Threads(3)).unwrap();

        let reference = host.render(&scene, &camera, 8, 16, 12).unwrap();
        let parallel = pool.render(&scene, &camera, 8, 16, 12).unwrap();
        let repeat = pool.render(&scene, &camera, 8, 16, 12).unwrap();

        assert_eq!(reference.as_bytes(), parallel.as_bytes());
        assert_eq!(parallel, repeat);
        // Something in the frame is lit
        assert!(reference.as_bytes().iter().any(|&b| b > 0));
    }

    #[test]
    fn test_render_into_matches_render() {
        let scene = lit_scene();
        let camera = test_camera();
        let renderer = Renderer::new(DeviceSelection::Threads(2)).unwrap();

        let rendered = renderer.render(&scene, &camera, 4, 10, 10).unwrap();
        let mut image = Image::new(10, 10);
        renderer.render_into(&scene, &camera, 4, &mut image).unwrap();
        assert_eq!(rendered, image);
    }

    #[test]
    fn test_top_row_is_camera_top() {
        // Light fills only the upper half of the view
        let mut scene = Scene::new();
        scene.add_primitive_with_material(
            Sphere::new(1000.0, Vec3::new(0.0, 1001.0, 0.0)),
            Material::emissive(Color::ONE, Color::ZERO),
        );
        let camera = test_camera();
        let renderer = Renderer::new(DeviceSelection::HostOnly).unwrap();
        let image = renderer.render(&scene, &camera, 1, 4, 4).unwrap();

        assert_eq!(image.get(0, 0), Pixel::new(255, 255, 255));
        assert_eq!(image.get(0, 3), Pixel::BLACK);
        assert_eq!(
            image.get(2, 0),
            render_pixel(&scene, &camera, 2, 3, 4, 4, 1)
        );
    }
}
