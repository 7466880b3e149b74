//! Light sources and light sampling.

use lumo_math::{DVec3, Ray};

use crate::material::Color;
use crate::surface::Surface;

/// One sample of a light as seen from a surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    /// Unit direction from the surface point toward the light
    pub direction: DVec3,
    /// Irradiance arriving at the surface point
    pub irradiance: Color,
}

impl LightSample {
    /// Canonical zero sample denoting full occlusion.
    pub const ZERO: Self = Self {
        direction: DVec3::ZERO,
        irradiance: DVec3::ZERO,
    };

    /// Whether this is the zero (fully occluded) sample.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Trait for light sources.
///
/// Each light performs its own occlusion query against the scene using
/// the distance-only intersection mode.
pub trait Light: Send + Sync {
    /// Sample this light at a surface point.
    fn sample(&self, scene: &dyn Surface, position: DVec3) -> LightSample;
}

/// Directional light: constant direction and irradiance everywhere.
pub struct DirectionalLight {
    irradiance: Color,
    incident: DVec3,
    shadow: bool,
}

impl DirectionalLight {
    /// Create a directional light emitting along `direction`.
    pub fn new(irradiance: Color, direction: DVec3) -> Self {
        Self {
            irradiance,
            incident: -direction.normalize(),
            shadow: true,
        }
    }
}

impl Light for DirectionalLight {
    fn sample(&self, scene: &dyn Surface, position: DVec3) -> LightSample {
        if self.shadow {
            // Unbounded shadow ray: any hit occludes
            let shadow_ray = Ray::new(position, self.incident);
            if scene.hit_distance(&shadow_ray).is_some() {
                return LightSample::ZERO;
            }
        }

        LightSample {
            direction: self.incident,
            irradiance: self.irradiance,
        }
    }
}

/// Point light with inverse-square falloff.
pub struct PointLight {
    intensity: Color,
    position: DVec3,
    shadow: bool,
}

impl PointLight {
    /// Create a point light at `position`.
    pub fn new(intensity: Color, position: DVec3) -> Self {
        Self {
            intensity,
            position,
            shadow: true,
        }
    }
}

impl Light for PointLight {
    fn sample(&self, scene: &dyn Surface, position: DVec3) -> LightSample {
        let delta = self.position - position;
        let rr = delta.length_squared();
        let r = rr.sqrt();
        let direction = delta / r;

        if self.shadow {
            // Surfaces beyond the light do not occlude
            let shadow_ray = Ray::new(position, direction);
            if let Some(distance) = scene.hit_distance(&shadow_ray) {
                if distance <= r {
                    return LightSample::ZERO;
                }
            }
        }

        LightSample {
            direction,
            irradiance: self.intensity / rr,
        }
    }
}

/// Spot light: a point light restricted to a cone with angular falloff.
pub struct SpotLight {
    intensity: Color,
    position: DVec3,
    axis: DVec3,
    cos_inner: f64,
    cos_outer: f64,
    falloff: f64,
    base_multiplier: f64,
    shadow: bool,
}

impl SpotLight {
    /// Create a spot light.
    ///
    /// `inner_deg` and `outer_deg` are full cone angles in degrees:
    /// full intensity inside the inner cone, zero beyond the outer
    /// cone, and `((cos - cosOuter)/(cosInner - cosOuter))^falloff`
    /// in between.
    pub fn new(
        intensity: Color,
        position: DVec3,
        direction: DVec3,
        inner_deg: f64,
        outer_deg: f64,
        falloff: f64,
    ) -> Self {
        let cos_inner = (inner_deg * 0.5).to_radians().cos();
        let cos_outer = (outer_deg * 0.5).to_radians().cos();

        Self {
            intensity,
            position,
            axis: -direction.normalize(),
            cos_inner,
            cos_outer,
            falloff,
            base_multiplier: 1.0 / (cos_inner - cos_outer),
            shadow: true,
        }
    }
}

impl Light for SpotLight {
    fn sample(&self, scene: &dyn Surface, position: DVec3) -> LightSample {
        let delta = self.position - position;
        let rr = delta.length_squared();
        let r = rr.sqrt();
        let direction = delta / r;

        let s_dot_l = self.axis.dot(direction);
        let spot = if s_dot_l >= self.cos_inner {
            1.0
        } else if s_dot_l < self.cos_outer {
            0.0
        } else {
            ((s_dot_l - self.cos_outer) * self.base_multiplier).powf(self.falloff)
        };

        if self.shadow {
            let shadow_ray = Ray::new(position, direction);
            if let Some(distance) = scene.hit_distance(&shadow_ray) {
                if distance <= r {
                    return LightSample::ZERO;
                }
            }
        }

        LightSample {
            direction,
            irradiance: self.intensity * (spot / rr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::Plane;
    use crate::sphere::Sphere;
    use crate::surface::Scene;
    use std::sync::Arc;

    fn empty() -> Scene {
        Scene::new()
    }

    #[test]
    fn test_point_light_inverse_square() {
        let light = PointLight::new(Color::ONE * 100.0, DVec3::new(0.0, 0.0, 10.0));

        let near = light.sample(&empty(), DVec3::new(0.0, 0.0, 5.0));
        let far = light.sample(&empty(), DVec3::ZERO);

        assert!((near.irradiance - Color::ONE * (100.0 / 25.0)).length() < 1e-12);
        assert!((far.irradiance - Color::ONE * (100.0 / 100.0)).length() < 1e-12);
        assert!((near.direction - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_directional_light_constant() {
        let light = DirectionalLight::new(Color::ONE, DVec3::new(0.0, 0.0, -1.0));

        let a = light.sample(&empty(), DVec3::ZERO);
        let b = light.sample(&empty(), DVec3::new(100.0, -3.0, 7.0));

        assert_eq!(a, b);
        assert!((a.direction - DVec3::Z).length() < 1e-12);
        assert_eq!(a.irradiance, Color::ONE);
    }

    #[test]
    fn test_spot_cone() {
        // Spot shining straight down from z = 10
        let light = SpotLight::new(
            Color::ONE * 100.0,
            DVec3::new(0.0, 0.0, 10.0),
            DVec3::new(0.0, 0.0, -1.0),
            20.0,
            30.0,
            1.0,
        );
        let point = PointLight::new(Color::ONE * 100.0, DVec3::new(0.0, 0.0, 10.0));

        // Directly below: inside the inner cone, equals the point light
        let inside = light.sample(&empty(), DVec3::ZERO);
        let reference = point.sample(&empty(), DVec3::ZERO);
        assert!((inside.irradiance - reference.irradiance).length() < 1e-12);

        // Far off-axis: outside the outer cone, zero intensity
        let outside = light.sample(&empty(), DVec3::new(50.0, 0.0, 0.0));
        assert_eq!(outside.irradiance, Color::ZERO);
    }

    #[test]
    fn test_point_light_occluded() {
        // Occluder plane z = 5 facing down, light above at z = 10,
        // receiver at the origin.
        let scene = Scene::from_surfaces(vec![Arc::new(Plane::new(-DVec3::Z, -5.0, None))]);
        let light = PointLight::new(Color::ONE * 100.0, DVec3::new(0.0, 0.0, 10.0));

        let sample = light.sample(&scene, DVec3::ZERO);
        assert!(sample.is_zero());
    }

    #[test]
    fn test_point_light_not_occluded_beyond() {
        // Occluder plane beyond the light does not cast a shadow
        let scene = Scene::from_surfaces(vec![Arc::new(Plane::new(-DVec3::Z, -20.0, None))]);
        let light = PointLight::new(Color::ONE * 100.0, DVec3::new(0.0, 0.0, 10.0));

        let sample = light.sample(&scene, DVec3::ZERO);
        assert!(!sample.is_zero());
    }

    #[test]
    fn test_directional_light_infinite_shadow_ray() {
        // A distant sphere still occludes a directional light
        let scene =
            Scene::from_surfaces(vec![Arc::new(Sphere::new(DVec3::new(0.0, 0.0, 1000.0), 1.0, None))]);
        let light = DirectionalLight::new(Color::ONE, DVec3::new(0.0, 0.0, -1.0));

        let sample = light.sample(&scene, DVec3::ZERO);
        assert!(sample.is_zero());
    }

    #[test]
    fn test_zero_sample_identity() {
        assert!(LightSample::ZERO.is_zero());
        let lit = LightSample {
            direction: DVec3::Z,
            irradiance: Color::ONE,
        };
        assert!(!lit.is_zero());
    }
}
