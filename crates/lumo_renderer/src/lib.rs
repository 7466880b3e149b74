//! Lumo Renderer - CPU rendering engine.
//!
//! Four image-generation algorithms over the lumo_core scene model:
//!
//! - `render_depth` / `render_normal`: geometric diagnostics
//! - `render_light`: raw N.L direct-light accumulation
//! - `ray_trace`: recursive Whitted ray tracing with mirror reflection
//! - `path_trace`: unbiased Monte Carlo path tracing with Russian
//!   roulette and Fresnel-weighted dielectric sampling
//!
//! All entry points parallelize over scanlines with rayon; the scene is
//! shared read-only and each scanline owns its RNG.

mod engine;
pub mod sampling;

pub use engine::{
    path_trace, path_trace_estimate, ray_trace, render_depth, render_light, render_normal,
    trace_ray, RenderError, RenderOptions, MAX_PATH_DEPTH,
};

/// Re-export the scene model this engine consumes
pub use lumo_core::{
    Color, DirectionalLight, Hit, Ideal, ImageBuffer, Lambertian, Light, Material, PerspectiveCamera,
    Phong, Plane, PointLight, Ray, Scene, Sphere, SpotLight, Surface, Transport,
};

pub use lumo_math::DVec3;
