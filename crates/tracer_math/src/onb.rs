use crate::Vec3;

/// Orthonormal basis with `w` along a given unit normal.
#[derive(Debug, Clone, Copy)]
pub struct Onb {
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

impl Onb {
    /// Build a basis around the unit vector `w`.
    ///
    /// The helper axis is +Y unless `w` is nearly perpendicular to X,
    /// in which case +X is used, so the cross product never degenerates.
    pub fn from_w(w: Vec3) -> Self {
        let helper = if w.x.abs() > 0.1 { Vec3::Y } else { Vec3::X };
        let u = helper.cross(w).normalize();
        let v = w.cross(u);
        Self { u, v, w }
    }

    /// Express local coordinates (a, b, c) in world space.
    #[inline]
    pub fn local(&self, a: f32, b: f32, c: f32) -> Vec3 {
        a * self.u + b * self.v + c * self.w
    }
}
