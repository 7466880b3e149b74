//! The rendering engine entry points.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;

use lumo_core::{
    quantize, Color, ImageBuffer, Light, MaterialError, PerspectiveCamera, Ray, Surface, Transport,
};
use lumo_math::DVec3;

use crate::sampling::{cosine_hemisphere, reflect, tent_offset};

/// Hard recursion cap for path tracing. Russian roulette terminates
/// paths probabilistically, so worst-case stack depth is bounded here
/// explicitly.
pub const MAX_PATH_DEPTH: u32 = 100;

/// Depth after which Russian roulette starts.
const RR_DEPTH: u32 = 5;

/// Errors produced by the shading render paths.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Material(#[from] MaterialError),

    #[error("surface hit by a shading ray has no material attached")]
    MissingMaterial,
}

/// Output size and pixel encoding for one render call.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: usize,
    pub height: usize,
    /// Encoding gamma applied at quantization time. The diagnostic
    /// modes conventionally use 1.0 and path tracing 2.2; it is a
    /// parameter here because call sites legitimately differ.
    pub gamma: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            gamma: 1.0,
        }
    }
}

impl RenderOptions {
    pub fn new(width: usize, height: usize, gamma: f64) -> Self {
        Self {
            width,
            height,
            gamma,
        }
    }
}

/// Render a grayscale depth visualization: white at the camera, black
/// at `max_depth` and beyond. Pixels whose primary ray misses stay
/// black.
pub fn render_depth(
    scene: &dyn Surface,
    camera: &PerspectiveCamera,
    max_depth: f64,
    opts: &RenderOptions,
) -> ImageBuffer {
    let (width, height) = (opts.width, opts.height);

    let rows: Vec<Vec<u8>> = (0..height)
        .into_par_iter()
        .map(|row| {
            let sy = 1.0 - row as f64 / height as f64;
            let mut bytes = vec![0u8; width * 3];

            for col in 0..width {
                let sx = col as f64 / width as f64;
                let ray = camera.generate_ray(sx, sy);

                if let Some(hit) = scene.intersect(&ray) {
                    let level = 255.0 - (hit.distance / max_depth * 255.0).min(255.0);
                    let v = level as u8;
                    bytes[col * 3..col * 3 + 3].copy_from_slice(&[v, v, v]);
                }
            }

            bytes
        })
        .collect();

    ImageBuffer::from_rows(width, height, rows)
}

/// Render surface normals mapped into RGB.
pub fn render_normal(
    scene: &dyn Surface,
    camera: &PerspectiveCamera,
    opts: &RenderOptions,
) -> ImageBuffer {
    let (width, height) = (opts.width, opts.height);

    let rows: Vec<Vec<u8>> = (0..height)
        .into_par_iter()
        .map(|row| {
            let sy = 1.0 - row as f64 / height as f64;
            let mut bytes = vec![0u8; width * 3];

            for col in 0..width {
                let sx = col as f64 / width as f64;
                let ray = camera.generate_ray(sx, sy);

                if let Some(hit) = scene.intersect(&ray) {
                    let n = hit.normal;
                    bytes[col * 3] = (((n.x + 1.0) * 128.0).min(255.0)) as u8;
                    bytes[col * 3 + 1] = (((n.y + 1.0) * 128.0).min(255.0)) as u8;
                    bytes[col * 3 + 2] = (((n.z + 1.0) * 128.0).min(255.0)) as u8;
                }
            }

            bytes
        })
        .collect();

    ImageBuffer::from_rows(width, height, rows)
}

/// Direct-light accumulation: for every visible point, sum
/// `irradiance * (n.l)` over all unoccluded light samples.
///
/// No material model is consulted; this is a raw N.L visualization
/// mode, not a physically normalized one.
pub fn render_light(
    scene: &dyn Surface,
    lights: &[Arc<dyn Light>],
    camera: &PerspectiveCamera,
    opts: &RenderOptions,
) -> ImageBuffer {
    let (width, height) = (opts.width, opts.height);
    info!("render_light: {}x{}, {} lights", width, height, lights.len());

    let rows: Vec<Vec<u8>> = (0..height)
        .into_par_iter()
        .map(|row| {
            let sy = 1.0 - row as f64 / height as f64;
            let mut bytes = vec![0u8; width * 3];

            for col in 0..width {
                let sx = col as f64 / width as f64;
                let ray = camera.generate_ray(sx, sy);

                if let Some(hit) = scene.intersect(&ray) {
                    let mut color = Color::ZERO;

                    for light in lights {
                        let sample = light.sample(scene, hit.position);
                        if !sample.is_zero() {
                            let n_dot_l = hit.normal.dot(sample.direction);
                            if n_dot_l >= 0.0 {
                                color += sample.irradiance * n_dot_l;
                            }
                        }
                    }

                    bytes[col * 3] = quantize(color.x, opts.gamma);
                    bytes[col * 3 + 1] = quantize(color.y, opts.gamma);
                    bytes[col * 3 + 2] = quantize(color.z, opts.gamma);
                }
            }

            bytes
        })
        .collect();

    ImageBuffer::from_rows(width, height, rows)
}

/// One Whitted estimate: direct shading against all lights plus a
/// mirror-reflected recursion while `bounces` remain.
///
/// The direct term is weighted by `1 - reflectiveness`; running out of
/// bounces simply drops the reflected term without renormalizing, so
/// truncation loses energy. That bias is deliberate and accepted.
pub fn trace_ray(
    scene: &dyn Surface,
    lights: &[Arc<dyn Light>],
    ray: &Ray,
    bounces: u32,
) -> Result<Color, RenderError> {
    let hit = match scene.intersect(ray) {
        Some(hit) => hit,
        None => return Ok(Color::ZERO),
    };

    let material = hit.surface.material().ok_or(RenderError::MissingMaterial)?;
    let reflectiveness = material.reflectiveness();

    let mut color = Color::ZERO;
    for light in lights {
        let sample = light.sample(scene, hit.position);
        color += material.shade(ray, &sample, hit.position, hit.normal);
    }
    color *= 1.0 - reflectiveness;

    if reflectiveness > 0.0 && bounces > 0 {
        let reflected_dir = reflect(ray.direction, hit.normal);
        let reflected = trace_ray(scene, lights, &Ray::new(hit.position, reflected_dir), bounces - 1)?;
        color += reflected * reflectiveness;
    }

    Ok(color)
}

/// Recursive Whitted ray tracing over the whole image.
pub fn ray_trace(
    scene: &dyn Surface,
    lights: &[Arc<dyn Light>],
    camera: &PerspectiveCamera,
    max_reflect: u32,
    opts: &RenderOptions,
) -> Result<ImageBuffer, RenderError> {
    let (width, height) = (opts.width, opts.height);
    info!(
        "ray_trace: {}x{}, {} lights, max_reflect {}",
        width, height, lights.len(), max_reflect
    );

    let rows: Vec<Vec<u8>> = (0..height)
        .into_par_iter()
        .map(|row| -> Result<Vec<u8>, RenderError> {
            let sy = 1.0 - row as f64 / height as f64;
            let mut bytes = vec![0u8; width * 3];

            for col in 0..width {
                let sx = col as f64 / width as f64;
                let ray = camera.generate_ray(sx, sy);
                let color = trace_ray(scene, lights, &ray, max_reflect)?;

                bytes[col * 3] = quantize(color.x, opts.gamma);
                bytes[col * 3 + 1] = quantize(color.y, opts.gamma);
                bytes[col * 3 + 2] = quantize(color.z, opts.gamma);
            }

            Ok(bytes)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ImageBuffer::from_rows(width, height, rows))
}

/// One path-tracing estimate for a single ray.
///
/// Returns the radiance arriving along `ray`. `depth` is the number of
/// vertices already traversed; callers start at 0. The RNG is owned by
/// the caller's scanline and threaded down the recursion, which is
/// sequential within one path.
pub fn path_trace_estimate<R: Rng + ?Sized>(
    scene: &dyn Surface,
    ray: &Ray,
    depth: u32,
    rng: &mut R,
) -> Result<Color, RenderError> {
    let hit = match scene.intersect(ray) {
        Some(hit) => hit,
        None => return Ok(Color::ZERO),
    };

    let material = hit.surface.material().ok_or(RenderError::MissingMaterial)?;
    let emission = material.emission()?;
    let color = material.base_color()?;
    let transport = material.transport()?;

    let new_depth = depth + 1;
    if new_depth > MAX_PATH_DEPTH {
        return Ok(emission);
    }

    // Russian roulette: beyond RR_DEPTH continue with probability
    // max(color), dividing the throughput by it to stay unbiased.
    let mut throughput = color;
    if new_depth > RR_DEPTH {
        let max_c = color.max_element();
        if rng.gen::<f64>() < max_c {
            throughput = color / max_c;
        } else {
            return Ok(emission);
        }
    }

    let d = ray.direction;
    let n = hit.normal;
    // Orient the normal against the incoming ray
    let nl = if n.dot(d) < 0.0 { n } else { -n };
    let x = hit.position;

    match transport {
        Transport::Diffuse => {
            let dir = cosine_hemisphere(nl, rng);
            let incoming = path_trace_estimate(scene, &Ray::new(x, dir), new_depth, rng)?;
            Ok(emission + throughput * incoming)
        }
        Transport::Specular => {
            let dir = reflect(d, n);
            let incoming = path_trace_estimate(scene, &Ray::new(x, dir), new_depth, rng)?;
            Ok(emission + throughput * incoming)
        }
        Transport::Refractive => {
            let refl_ray = Ray::new(x, reflect(d, n));
            let into = n.dot(nl) > 0.0;
            let (nc, nt) = (1.0, 1.5);
            let nnt = if into { nc / nt } else { nt / nc };
            let ddn = d.dot(nl);
            let cos2t = 1.0 - nnt * nnt * (1.0 - ddn * ddn);

            // Total internal reflection
            if cos2t < 0.0 {
                let incoming = path_trace_estimate(scene, &refl_ray, new_depth, rng)?;
                return Ok(emission + throughput * incoming);
            }

            let sign = if into { 1.0 } else { -1.0 };
            let tdir = (d * nnt - n * (sign * (ddn * nnt + cos2t.sqrt()))).normalize();

            // Schlick's approximation of the Fresnel reflectance
            let r0 = ((nt - nc) / (nt + nc)).powi(2);
            let c = 1.0 - if into { -ddn } else { tdir.dot(n) };
            let re = r0 + (1.0 - r0) * c.powi(5);
            let tr = 1.0 - re;

            let result = if new_depth > 2 {
                // Stochastically pick one branch, reweighted to remain
                // unbiased
                let p = 0.25 + 0.5 * re;
                if rng.gen::<f64>() < p {
                    path_trace_estimate(scene, &refl_ray, new_depth, rng)? * (re / p)
                } else {
                    path_trace_estimate(scene, &Ray::new(x, tdir), new_depth, rng)? * (tr / (1.0 - p))
                }
            } else {
                // Near the camera, evaluate both branches for less
                // variance
                path_trace_estimate(scene, &refl_ray, new_depth, rng)? * re
                    + path_trace_estimate(scene, &Ray::new(x, tdir), new_depth, rng)? * tr
            };

            Ok(emission + throughput * result)
        }
    }
}

/// Stochastic path tracing over the whole image.
///
/// Each pixel is a 2x2 stratified sub-pixel grid; each stratum averages
/// `samples` independent paths with tent-filter jitter and is clamped
/// to [0,1] before the strata are averaged. Scanlines render in
/// parallel, each with its own entropy-seeded RNG, so results are not
/// bit-reproducible across runs by design.
pub fn path_trace(
    scene: &dyn Surface,
    camera: &PerspectiveCamera,
    samples: u32,
    opts: &RenderOptions,
) -> Result<ImageBuffer, RenderError> {
    let (width, height) = (opts.width, opts.height);
    info!(
        "path_trace: {}x{} at {} spp",
        width,
        height,
        samples * 4
    );

    let progress = AtomicUsize::new(0);
    let progress_step = (height / 10).max(1);

    let rows: Vec<Vec<u8>> = (0..height)
        .into_par_iter()
        .map(|row| -> Result<Vec<u8>, RenderError> {
            let mut rng = SmallRng::from_entropy();
            let mut bytes = vec![0u8; width * 3];

            for col in 0..width {
                let mut sum = Color::ZERO;

                for sub_y in 0..2 {
                    for sub_x in 0..2 {
                        let mut stratum = Color::ZERO;

                        for _ in 0..samples {
                            let dx = tent_offset(&mut rng);
                            let dy = tent_offset(&mut rng);

                            let sx = ((sub_x as f64 + 0.5 + dx) * 0.5 + col as f64) / width as f64;
                            let sy = ((sub_y as f64 + 0.5 + dy) * 0.5
                                + (height - 1 - row) as f64)
                                / height as f64;

                            let ray = camera.generate_ray(sx, sy);
                            stratum += path_trace_estimate(scene, &ray, 0, &mut rng)?
                                * (1.0 / samples as f64);
                        }

                        sum += stratum.clamp(DVec3::ZERO, DVec3::ONE) * 0.25;
                    }
                }

                bytes[col * 3] = quantize(sum.x, opts.gamma);
                bytes[col * 3 + 1] = quantize(sum.y, opts.gamma);
                bytes[col * 3 + 2] = quantize(sum.z, opts.gamma);
            }

            let done = progress.fetch_add(1, Ordering::Relaxed) + 1;
            if done % progress_step == 0 {
                debug!("path_trace: {}/{} scanlines", done, height);
            }

            Ok(bytes)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ImageBuffer::from_rows(width, height, rows))
}
