//! One-sided infinite plane primitive.

use std::sync::Arc;

use lumo_math::{DVec3, Ray};

use crate::material::Material;
use crate::surface::{Hit, Surface};

/// An infinite plane with unit normal `normal` passing through
/// `normal * d`.
///
/// The plane is one-sided by design: rays traveling with the normal
/// (or parallel to the plane) never hit it. This is intentional,
/// non-physical behavior used to build open boxes that the camera can
/// see into.
pub struct Plane {
    normal: DVec3,
    position: DVec3,
    material: Option<Arc<dyn Material>>,
}

impl Plane {
    /// Create a new plane from a unit normal and offset along it.
    pub fn new(normal: DVec3, d: f64, material: Option<Arc<dyn Material>>) -> Self {
        Self {
            normal,
            position: normal * d,
            material,
        }
    }
}

impl Surface for Plane {
    fn intersect<'a>(&'a self, ray: &Ray) -> Option<Hit<'a>> {
        let a = ray.direction.dot(self.normal);

        // Reject rays not heading toward the front side. This also
        // covers the near-zero denominator of grazing rays.
        if a >= 0.0 {
            return None;
        }

        let b = self.normal.dot(ray.origin - self.position);
        let distance = -b / a;

        Some(Hit {
            surface: self,
            distance,
            position: ray.at(distance),
            normal: self.normal,
        })
    }

    fn material(&self) -> Option<&Arc<dyn Material>> {
        self.material.as_ref()
    }
}
