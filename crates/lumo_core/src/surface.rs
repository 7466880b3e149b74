//! Surface trait, hit records, and the composite scene.

use std::sync::Arc;

use lumo_math::{DVec3, Ray};

use crate::material::Material;

/// Record of a ray-surface intersection.
///
/// The normal is unit length but its orientation is not resolved here;
/// consumers flip it against the incoming ray direction where needed.
#[derive(Clone, Copy)]
pub struct Hit<'a> {
    /// The surface that produced this hit
    pub surface: &'a dyn Surface,
    /// Hit distance along the ray, always >= 0
    pub distance: f64,
    /// Point of intersection
    pub position: DVec3,
    /// Surface normal at the intersection
    pub normal: DVec3,
}

/// Trait for surfaces that can be intersected by rays.
///
/// Surfaces are constructed once per scene and read-only during
/// rendering, so implementations must be `Send + Sync`.
pub trait Surface: Send + Sync {
    /// Find the nearest intersection along the ray, if any.
    fn intersect<'a>(&'a self, ray: &Ray) -> Option<Hit<'a>>;

    /// Distance-only intersection query.
    ///
    /// Occlusion tests dominate light sampling cost and never need the
    /// hit position or normal, so composites override this to skip that
    /// work.
    fn hit_distance(&self, ray: &Ray) -> Option<f64> {
        self.intersect(ray).map(|hit| hit.distance)
    }

    /// The material attached to this surface, if any.
    ///
    /// Containers and bare test geometry have none; shading a surface
    /// without one is a caller contract violation surfaced by the
    /// render engine.
    fn material(&self) -> Option<&Arc<dyn Material>>;
}

/// A composite of surfaces that reports the globally nearest hit.
pub struct Scene {
    surfaces: Vec<Arc<dyn Surface>>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self { surfaces: Vec::new() }
    }

    /// Create a scene from a list of surfaces.
    pub fn from_surfaces(surfaces: Vec<Arc<dyn Surface>>) -> Self {
        Self { surfaces }
    }

    /// Add a surface to the scene.
    pub fn add(&mut self, surface: Arc<dyn Surface>) {
        self.surfaces.push(surface);
    }

    /// Get the number of surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for Scene {
    fn intersect<'a>(&'a self, ray: &Ray) -> Option<Hit<'a>> {
        let mut nearest: Option<Hit<'a>> = None;

        for surface in &self.surfaces {
            if let Some(hit) = surface.intersect(ray) {
                // Strict less-than: the first surface achieving the
                // minimum wins on exact ties.
                match nearest {
                    Some(ref best) if hit.distance >= best.distance => {}
                    _ => nearest = Some(hit),
                }
            }
        }

        nearest
    }

    fn hit_distance(&self, ray: &Ray) -> Option<f64> {
        let mut nearest: Option<f64> = None;

        for surface in &self.surfaces {
            if let Some(distance) = surface.hit_distance(ray) {
                match nearest {
                    Some(best) if distance >= best => {}
                    _ => nearest = Some(distance),
                }
            }
        }

        nearest
    }

    // The composite itself carries no material
    fn material(&self) -> Option<&Arc<dyn Material>> {
        None
    }
}
