//! Material trait and shading models.

use lumo_math::{DVec3, Ray};
use thiserror::Error;

use crate::light::LightSample;

/// Color type alias (linear RGB, not clamped until quantization)
pub type Color = DVec3;

/// Error for querying a capability a material does not implement.
///
/// Asking a non-path-tracing material for its emission indicates a
/// render-path/material mismatch bug; it must fail fast rather than
/// silently return a default and corrupt the radiometry.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialError {
    #[error("material `{material}` does not support `{capability}`")]
    Unsupported {
        material: &'static str,
        capability: &'static str,
    },
}

/// Light transport behavior of an [`Ideal`] material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Diffuse,
    Specular,
    Refractive,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Shade the surface point against one light sample.
    ///
    /// Returns the reflected radiance toward the ray origin. The
    /// path-tracing `Ideal` material returns black here; its behavior
    /// lives entirely in the path-tracing recursion.
    fn shade(&self, ray: &Ray, light: &LightSample, position: DVec3, normal: DVec3) -> Color;

    /// Mirror reflection coefficient in [0, 1] used by the Whitted
    /// ray tracer. Zero disables the recursive term.
    fn reflectiveness(&self) -> f64 {
        0.0
    }

    /// Emitted radiance (path tracing only).
    fn emission(&self) -> Result<Color, MaterialError> {
        Err(MaterialError::Unsupported {
            material: self.name(),
            capability: "emission",
        })
    }

    /// Base reflectance color (path tracing only).
    fn base_color(&self) -> Result<Color, MaterialError> {
        Err(MaterialError::Unsupported {
            material: self.name(),
            capability: "base color",
        })
    }

    /// Transport type (path tracing only).
    fn transport(&self) -> Result<Transport, MaterialError> {
        Err(MaterialError::Unsupported {
            material: self.name(),
            capability: "transport type",
        })
    }
}

/// Lambertian (diffuse-only) material.
pub struct Lambertian {
    diffuse: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given diffuse color.
    pub fn new(diffuse: Color) -> Self {
        Self { diffuse }
    }
}

impl Material for Lambertian {
    fn name(&self) -> &'static str {
        "Lambertian"
    }

    fn shade(&self, _ray: &Ray, light: &LightSample, _position: DVec3, normal: DVec3) -> Color {
        let n_dot_l = normal.dot(light.direction);
        light.irradiance * (self.diffuse * n_dot_l.max(0.0))
    }
}

/// Phong material: diffuse plus a specular lobe against explicit light
/// samples.
pub struct Phong {
    diffuse: Color,
    specular: Color,
    shininess: f64,
    reflectiveness: f64,
}

impl Phong {
    /// Create a new Phong material.
    ///
    /// - `shininess`: specular exponent
    /// - `reflectiveness`: mirror coefficient in [0, 1]
    pub fn new(diffuse: Color, specular: Color, shininess: f64, reflectiveness: f64) -> Self {
        Self {
            diffuse,
            specular,
            shininess,
            reflectiveness,
        }
    }
}

impl Material for Phong {
    fn name(&self) -> &'static str {
        "Phong"
    }

    fn shade(&self, ray: &Ray, light: &LightSample, _position: DVec3, normal: DVec3) -> Color {
        let n_dot_l = normal.dot(light.direction);
        let half = (light.direction - ray.direction).normalize();
        let n_dot_h = normal.dot(half);

        let diffuse_term = self.diffuse * n_dot_l.max(0.0);
        let specular_term = self.specular * n_dot_h.max(0.0).powf(self.shininess);

        light.irradiance * (diffuse_term + specular_term)
    }

    fn reflectiveness(&self) -> f64 {
        self.reflectiveness
    }
}

/// Procedural black/white checker pattern.
///
/// Purely a function of the hit position; the light sample is ignored.
pub struct Checker {
    scale_x: f64,
    scale_y: f64,
    reflectiveness: f64,
}

impl Checker {
    /// Create a new checker material with per-axis pattern scales.
    pub fn new(scale_x: f64, scale_y: f64, reflectiveness: f64) -> Self {
        Self {
            scale_x,
            scale_y,
            reflectiveness,
        }
    }
}

impl Material for Checker {
    fn name(&self) -> &'static str {
        "Checker"
    }

    fn shade(&self, _ray: &Ray, _light: &LightSample, position: DVec3, _normal: DVec3) -> Color {
        let cell = (position.x * self.scale_x).floor() + (position.y * self.scale_y).floor();
        if (cell as i64).rem_euclid(2) == 0 {
            Color::ZERO
        } else {
            Color::ONE
        }
    }

    fn reflectiveness(&self) -> f64 {
        self.reflectiveness
    }
}

/// Ideal material for path tracing: perfectly diffuse, specular, or
/// refractive, with a base color and emission.
pub struct Ideal {
    color: Color,
    emission: Color,
    transport: Transport,
}

impl Ideal {
    /// Create a new ideal material.
    pub fn new(color: Color, emission: Color, transport: Transport) -> Self {
        Self {
            color,
            emission,
            transport,
        }
    }

    /// Convenience constructor for a non-emissive diffuse reflector.
    pub fn diffuse(color: Color) -> Self {
        Self::new(color, Color::ZERO, Transport::Diffuse)
    }
}

impl Material for Ideal {
    fn name(&self) -> &'static str {
        "Ideal"
    }

    // Not meaningful for light-sample shading
    fn shade(&self, _ray: &Ray, _light: &LightSample, _position: DVec3, _normal: DVec3) -> Color {
        Color::ZERO
    }

    fn emission(&self) -> Result<Color, MaterialError> {
        Ok(self.emission)
    }

    fn base_color(&self) -> Result<Color, MaterialError> {
        Ok(self.color)
    }

    fn transport(&self) -> Result<Transport, MaterialError> {
        Ok(self.transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_sample(direction: DVec3) -> LightSample {
        LightSample {
            direction,
            irradiance: Color::ONE,
        }
    }

    #[test]
    fn test_lambertian_n_dot_l() {
        let mat = Lambertian::new(Color::ONE);
        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::new(0.0, 0.0, -1.0));

        // Light straight along the normal: full irradiance
        let top = mat.shade(&ray, &white_sample(DVec3::Z), DVec3::ZERO, DVec3::Z);
        assert!((top - Color::ONE).length() < 1e-12);

        // Grazing: zero
        let horizon = mat.shade(&ray, &white_sample(DVec3::Z), DVec3::ZERO, DVec3::X);
        assert_eq!(horizon, Color::ZERO);

        // Light behind the surface clamps to zero, never negative
        let behind = mat.shade(&ray, &white_sample(-DVec3::Z), DVec3::ZERO, DVec3::Z);
        assert_eq!(behind, Color::ZERO);
    }

    #[test]
    fn test_phong_specular_peak() {
        let mat = Phong::new(Color::ZERO, Color::ONE, 16.0, 0.0);
        let normal = DVec3::Z;

        // View ray reflecting exactly into the light direction: the
        // half vector equals the normal, so the lobe peaks at 1.
        let ray = Ray::new(
            DVec3::new(-1.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, -1.0).normalize(),
        );
        let light = white_sample(DVec3::new(-1.0, 0.0, 1.0).normalize());

        let peak = mat.shade(&ray, &light, DVec3::ZERO, normal);
        assert!((peak - Color::ONE).length() < 1e-9);
    }

    #[test]
    fn test_checker_alternates() {
        let mat = Checker::new(1.0, 1.0, 0.0);
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let light = white_sample(DVec3::Z);

        let a = mat.shade(&ray, &light, DVec3::new(0.5, 0.5, 0.0), DVec3::Z);
        let b = mat.shade(&ray, &light, DVec3::new(1.5, 0.5, 0.0), DVec3::Z);
        let c = mat.shade(&ray, &light, DVec3::new(1.5, 1.5, 0.0), DVec3::Z);
        let d = mat.shade(&ray, &light, DVec3::new(-0.5, 0.5, 0.0), DVec3::Z);

        assert_eq!(a, Color::ZERO);
        assert_eq!(b, Color::ONE);
        assert_eq!(c, Color::ZERO);
        assert_eq!(d, Color::ONE);
    }

    #[test]
    fn test_capability_mismatch_fails_fast() {
        let mat = Lambertian::new(Color::ONE);

        assert_eq!(
            mat.emission(),
            Err(MaterialError::Unsupported {
                material: "Lambertian",
                capability: "emission",
            })
        );
        assert!(mat.base_color().is_err());
        assert!(mat.transport().is_err());
    }

    #[test]
    fn test_ideal_capabilities() {
        let mat = Ideal::new(
            Color::new(0.75, 0.25, 0.25),
            Color::new(12.0, 12.0, 12.0),
            Transport::Refractive,
        );

        assert_eq!(mat.base_color().unwrap(), Color::new(0.75, 0.25, 0.25));
        assert_eq!(mat.emission().unwrap(), Color::new(12.0, 12.0, 12.0));
        assert_eq!(mat.transport().unwrap(), Transport::Refractive);
        assert_eq!(mat.reflectiveness(), 0.0);
    }
}
