use crate::{Ray, Vec3};

/// Extent of the image plane around the look direction, in camera units.
///
/// The rectangle may be lopsided; it does not have to be centred on the
/// look direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlaneBounds {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl ImagePlaneBounds {
    /// Create bounds from (left, bottom, right, top).
    pub const fn new(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }
}

/// Pinhole camera mapping pixel coordinates to world-space rays.
///
/// The camera frame is built once at construction and never changes.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    up: Vec3,
    look: Vec3,
    eye: Vec3,
    focal_length: f32,
    bounds: ImagePlaneBounds,

    // Cached frame
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Create a camera.
    ///
    /// - `up`: what is up for the camera; need not be orthogonal to the view
    /// - `look`: the point the camera looks at
    /// - `eye`: the camera position
    /// - `focal_length`: distance from the eye to the image plane
    /// - `bounds`: image plane rectangle
    pub fn new(
        up: Vec3,
        look: Vec3,
        eye: Vec3,
        focal_length: f32,
        bounds: ImagePlaneBounds,
    ) -> Self {
        // w points away from the look point
        let w = (eye - look).normalize();
        let u = up.cross(w).normalize();
        let v = w.cross(u).normalize();

        Self {
            up,
            look,
            eye,
            focal_length,
            bounds,
            u,
            v,
            w,
        }
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn look(&self) -> Vec3 {
        self.look
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    pub fn bounds(&self) -> ImagePlaneBounds {
        self.bounds
    }

    /// Generate the ray through pixel (x, y) of a `width` x `height` image.
    ///
    /// Pixel (0, 0) sits at the (left, bottom) corner of the image plane and
    /// (width-1, height-1) at (right, top). Both dimensions must be at least 2.
    pub fn ray_for_pixel(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let b = &self.bounds;
        let px = x as f32 / (width - 1) as f32 * (b.right - b.left) + b.left;
        let py = y as f32 / (height - 1) as f32 * (b.top - b.bottom) + b.bottom;

        let origin = self.eye - self.w * self.focal_length + self.u * px + self.v * py;
        Ray::new(origin, origin - self.eye)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera::new(
            Vec3::Y,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::ZERO,
            1.0,
            ImagePlaneBounds::new(-1.0, -1.0, 1.0, 1.0),
        )
    }

    #[test]
    fn test_camera_center_ray() {
        let camera = test_camera();
        let ray = camera.ray_for_pixel(1, 1, 3, 3);

        assert!((ray.origin - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
        assert!((ray.direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_camera_corner_rays() {
        let camera = test_camera();

        let bottom_left = camera.ray_for_pixel(0, 0, 3, 3);
        assert!((bottom_left.origin - Vec3::new(-1.0, -1.0, -1.0)).length() < 1e-6);

        let top_right = camera.ray_for_pixel(2, 2, 3, 3);
        assert!((top_right.origin - Vec3::new(1.0, 1.0, -1.0)).length() < 1e-6);
        assert!((top_right.direction - Vec3::new(1.0, 1.0, -1.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn test_camera_non_orthogonal_up() {
        // Up tilted towards the view direction still yields an orthonormal frame
        let camera = Camera::new(
            Vec3::new(0.0, 1.0, -0.5),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::ZERO,
            2.0,
            ImagePlaneBounds::new(-1.0, -1.0, 1.0, 1.0),
        );
        assert!(camera.u.dot(camera.v).abs() < 1e-5);
        assert!(camera.v.dot(camera.w).abs() < 1e-5);
        assert!((camera.v.length() - 1.0).abs() < 1e-5);

        let ray = camera.ray_for_pixel(0, 0, 2, 2);
        assert!((ray.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_camera_lopsided_bounds() {
        let camera = Camera::new(
            Vec3::Y,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::ZERO,
            1.0,
            ImagePlaneBounds::new(0.0, 0.0, 2.0, 1.0),
        );
        let first = camera.ray_for_pixel(0, 0, 5, 5);
        assert!((first.origin - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
        let last = camera.ray_for_pixel(4, 4, 5, 5);
        assert!((last.origin - Vec3::new(2.0, 1.0, -1.0)).length() < 1e-6);
    }
}
