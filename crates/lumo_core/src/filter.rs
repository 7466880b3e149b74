//! Post-process blur filters for rendered images.

use crate::buffer::{ImageBuffer, CHANNELS};

/// Normalized 1-D Gaussian kernel.
pub struct GaussianKernel {
    radius: i64,
    weights: Vec<f64>,
}

impl GaussianKernel {
    /// Build a kernel of half-width `radius` with standard deviation
    /// `sigma`. Weights are normalized to sum to 1.
    pub fn new(radius: usize, sigma: f64) -> Self {
        assert!(radius > 0);
        assert!(sigma > 0.0);

        let size = 2 * radius + 1;
        let a = 2.0 * sigma * sigma;
        let b = (1.0 / (a * std::f64::consts::PI)).sqrt();

        let mut weights = Vec::with_capacity(size);
        let mut sum = 0.0;
        for i in 0..size {
            let x = i as f64 - radius as f64;
            let w = b * (-(x * x) / a).exp();
            weights.push(w);
            sum += w;
        }
        for w in &mut weights {
            *w /= sum;
        }

        Self {
            radius: radius as i64,
            weights,
        }
    }

    pub fn radius(&self) -> usize {
        self.radius as usize
    }

    /// Weight at signed offset in `[-radius, radius]`.
    pub fn weight(&self, offset: i64) -> f64 {
        self.weights[(offset + self.radius) as usize]
    }
}

/// Separable Gaussian blur with edge clamping.
///
/// Two 1-D passes (horizontal then vertical), linear in the kernel
/// radius rather than quadratic.
pub fn gaussian_blur(image: &ImageBuffer, radius: usize, sigma: f64) -> ImageBuffer {
    let kernel = GaussianKernel::new(radius, sigma);
    let width = image.width();
    let height = image.height();

    // Horizontal pass into a float working image
    let mut horizontal = vec![0.0f64; width * height * CHANNELS];
    for row in 0..height {
        for col in 0..width {
            let mut acc = [0.0f64; CHANNELS];
            for offset in -(radius as i64)..=(radius as i64) {
                let src = (col as i64 + offset).clamp(0, width as i64 - 1) as usize;
                let pixel = image.pixel(row, src);
                let w = kernel.weight(offset);
                for (a, &p) in acc.iter_mut().zip(pixel.iter()) {
                    *a += w * p as f64;
                }
            }
            let i = (row * width + col) * CHANNELS;
            horizontal[i..i + CHANNELS].copy_from_slice(&acc);
        }
    }

    // Vertical pass back to bytes
    let mut data = vec![0u8; width * height * CHANNELS];
    for row in 0..height {
        for col in 0..width {
            let mut acc = [0.0f64; CHANNELS];
            for offset in -(radius as i64)..=(radius as i64) {
                let src = (row as i64 + offset).clamp(0, height as i64 - 1) as usize;
                let i = (src * width + col) * CHANNELS;
                let w = kernel.weight(offset);
                for (a, &p) in acc.iter_mut().zip(horizontal[i..i + CHANNELS].iter()) {
                    *a += w * p;
                }
            }
            let i = (row * width + col) * CHANNELS;
            for (dst, &a) in data[i..i + CHANNELS].iter_mut().zip(acc.iter()) {
                *dst = (a + 0.5).clamp(0.0, 255.0) as u8;
            }
        }
    }

    ImageBuffer::from_raw(width, height, data)
}
