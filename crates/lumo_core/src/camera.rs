//! Perspective camera for ray generation.

use lumo_math::{DVec3, Ray};

/// Perspective camera mapping normalized screen coordinates to world
/// rays.
///
/// The basis is derived from a forward direction and an up reference;
/// a forward vector parallel to the up reference is caller
/// responsibility.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    eye: DVec3,
    forward: DVec3,
    right: DVec3,
    up: DVec3,
    fov_scale: f64,
    aspect: f64,
}

impl PerspectiveCamera {
    /// Create a camera from eye position, forward direction, up
    /// reference, and vertical field of view in degrees.
    pub fn new(eye: DVec3, forward: DVec3, up: DVec3, fov_deg: f64) -> Self {
        let forward = forward.normalize();
        let right = forward.cross(up.normalize()).normalize();
        let up = right.cross(forward);
        let fov_scale = (fov_deg * 0.5).to_radians().tan() * 2.0;

        Self {
            eye,
            forward,
            right,
            up,
            fov_scale,
            aspect: 1.0,
        }
    }

    /// Set the width/height aspect ratio (default 1).
    pub fn with_aspect(mut self, aspect: f64) -> Self {
        self.aspect = aspect;
        self
    }

    /// Generate the world-space ray through normalized screen
    /// coordinates `(sx, sy)` in `[0,1] x [0,1]`, with `(0.5, 0.5)` at
    /// the image center and `sy` increasing upward.
    pub fn generate_ray(&self, sx: f64, sy: f64) -> Ray {
        let r = self.right * ((sx - 0.5) * self.fov_scale * self.aspect);
        let u = self.up * ((sy - 0.5) * self.fov_scale);

        Ray::new(self.eye, (self.forward + r + u).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_is_forward() {
        let camera = PerspectiveCamera::new(
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(0.0, 0.0, -1.0),
            DVec3::Y,
            90.0,
        );

        let ray = camera.generate_ray(0.5, 0.5);
        assert_eq!(ray.origin, DVec3::new(1.0, 2.0, 3.0));
        assert!((ray.direction - DVec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_fov_edge_angle() {
        // With a 90 degree fov the ray through the top edge makes a
        // 45 degree angle with the forward axis.
        let camera = PerspectiveCamera::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0), DVec3::Y, 90.0);

        let top = camera.generate_ray(0.5, 1.0);
        let cos_angle = top.direction.dot(DVec3::new(0.0, 0.0, -1.0));
        assert!((cos_angle - (std::f64::consts::FRAC_PI_4).cos()).abs() < 1e-12);
        assert!(top.direction.y > 0.0);
    }

    #[test]
    fn test_aspect_scales_horizontal_only() {
        let camera = PerspectiveCamera::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0), DVec3::Y, 60.0)
            .with_aspect(2.0);

        let right = camera.generate_ray(1.0, 0.5);
        let top = camera.generate_ray(0.5, 1.0);

        // Horizontal half-extent is twice the vertical one
        let tan_h = right.direction.x / -right.direction.z;
        let tan_v = top.direction.y / -top.direction.z;
        assert!((tan_h - 2.0 * tan_v).abs() < 1e-12);
    }

    #[test]
    fn test_basis_orthonormal() {
        // Up reference not perpendicular to forward still yields an
        // orthonormal basis.
        let camera = PerspectiveCamera::new(
            DVec3::ZERO,
            DVec3::new(-1.0, -1.0, -1.0),
            DVec3::Z,
            60.0,
        );

        let ray = camera.generate_ray(0.5, 0.5);
        assert!((ray.direction.length() - 1.0).abs() < 1e-12);
    }
}
