//! Lumo Core - scene model for the CPU renderer.
//!
//! This crate provides:
//!
//! - **Camera**: perspective ray generation from normalized screen coordinates
//! - **Surfaces**: `Plane`, `Sphere`, and the composite `Scene`
//! - **Materials**: `Lambertian`, `Phong`, `Checker`, `Ideal`
//! - **Lights**: `Directional`, `Point`, `Spot`
//! - **Image support**: 8-bit RGB buffer, gamma quantization, PPM I/O,
//!   and a separable Gaussian blur filter
//!
//! Everything here is immutable once constructed and safe to share across
//! rendering threads.

pub mod buffer;
pub mod camera;
pub mod filter;
pub mod light;
pub mod material;
pub mod plane;
pub mod ppm;
pub mod sphere;
pub mod surface;

// Re-export commonly used types
pub use buffer::{quantize, ImageBuffer};
pub use camera::PerspectiveCamera;
pub use filter::{gaussian_blur, GaussianKernel};
pub use light::{DirectionalLight, Light, LightSample, PointLight, SpotLight};
pub use material::{Checker, Color, Ideal, Lambertian, Material, MaterialError, Phong, Transport};
pub use plane::Plane;
pub use ppm::{PpmError, PpmFormat};
pub use sphere::Sphere;
pub use surface::{Hit, Scene, Surface};

/// Re-export math types from lumo_math
pub use lumo_math::{DVec3, Ray};
