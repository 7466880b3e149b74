//! Sphere primitive.

use std::sync::Arc;

use lumo_math::{DVec3, Ray};

use crate::material::Material;
use crate::surface::{Hit, Surface};

/// Offset below which a root is treated as a self-intersection at the
/// ray origin and rejected.
const EPSILON: f64 = 1e-6;

/// A sphere defined by center and radius.
pub struct Sphere {
    center: DVec3,
    sqr_radius: f64,
    material: Option<Arc<dyn Material>>,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// A zero or negative radius is not validated; degenerate geometry
    /// is a caller contract violation.
    pub fn new(center: DVec3, radius: f64, material: Option<Arc<dyn Material>>) -> Self {
        Self {
            center,
            sqr_radius: radius * radius,
            material,
        }
    }
}

impl Surface for Sphere {
    fn intersect<'a>(&'a self, ray: &Ray) -> Option<Hit<'a>> {
        // Solve t^2 + 2*t*(o-c).d + (o-c).(o-c) - r^2 = 0 in the
        // half-discriminant form; d is unit length.
        let oc = ray.origin - self.center;
        let b = oc.dot(ray.direction);
        let det = b * b - oc.dot(oc) + self.sqr_radius;

        if det < 0.0 {
            return None;
        }

        let dets = det.sqrt();
        let distance = if -b - dets > EPSILON {
            -b - dets
        } else if -b + dets > EPSILON {
            -b + dets
        } else {
            return None;
        };

        let position = ray.at(distance);
        let normal = (position - self.center).normalize();

        Some(Hit {
            surface: self,
            distance,
            position,
            normal,
        })
    }

    fn material(&self) -> Option<&Arc<dyn Material>> {
        self.material.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_point_lies_on_sphere() {
        let center = DVec3::new(3.0, -2.0, 7.0);
        let radius = 2.5;
        let sphere = Sphere::new(center, radius, None);

        // Rays from several external origins aimed at the center
        let origins = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(10.0, 10.0, 10.0),
            DVec3::new(-5.0, 3.0, 1.0),
        ];

        for origin in origins {
            let direction = (center - origin).normalize();
            let ray = Ray::new(origin, direction);
            let hit = sphere.intersect(&ray).expect("ray aimed at center must hit");

            let on_surface = (ray.at(hit.distance) - center).length();
            assert!(
                (on_surface - radius).abs() < 1e-6 * radius,
                "hit point distance from center {} != radius {}",
                on_surface,
                radius
            );
            assert!(hit.distance > 0.0);
        }
    }

    #[test]
    fn test_normal_is_unit_and_outward() {
        let sphere = Sphere::new(DVec3::ZERO, 1.0, None);
        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::new(0.0, 0.0, -1.0));

        let hit = sphere.intersect(&ray).unwrap();
        assert!((hit.normal.length() - 1.0).abs() < 1e-12);
        assert!((hit.normal - DVec3::Z).length() < 1e-9);
        assert!((hit.distance - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_miss() {
        let sphere = Sphere::new(DVec3::new(0.0, 5.0, -5.0), 1.0, None);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));

        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_origin_on_surface_picks_far_root() {
        // Shadow-style ray leaving the sphere from its own surface:
        // the near root is ~0 and must be rejected.
        let sphere = Sphere::new(DVec3::ZERO, 1.0, None);
        let ray = Ray::new(DVec3::new(0.0, 0.0, 1.0), DVec3::new(0.0, 0.0, 1.0));

        assert!(sphere.intersect(&ray).is_none());

        // Grazing inward instead: enters the sphere and exits the far side
        let inward = Ray::new(DVec3::new(0.0, 0.0, 1.0), DVec3::new(0.0, 0.0, -1.0));
        let hit = sphere.intersect(&inward).unwrap();
        assert!((hit.distance - 2.0).abs() < 1e-9);
    }
}
