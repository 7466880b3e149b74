//! 8-bit RGB image buffer and pixel quantization.

use crate::material::Color;

/// Number of channels per pixel.
pub const CHANNELS: usize = 3;

/// Quantize one linear color channel to a byte.
///
/// The channel is clamped to [0, 1], gamma-encoded with exponent
/// `1/gamma`, scaled to [0, 255] and rounded. Gamma is an explicit
/// parameter because different render modes encode differently
/// (1.0 for the diagnostic modes, 2.2 for path tracing).
pub fn quantize(channel: f64, gamma: f64) -> u8 {
    let clamped = channel.clamp(0.0, 1.0);
    (clamped.powf(1.0 / gamma) * 255.0 + 0.5).clamp(0.0, 255.0) as u8
}

/// Row-major 2-D buffer of 3-channel 8-bit pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl ImageBuffer {
    /// Create a black image buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * CHANNELS],
        }
    }

    /// Assemble a buffer from per-row byte vectors.
    ///
    /// Each row must hold exactly `width * 3` bytes.
    pub fn from_rows(width: usize, height: usize, rows: Vec<Vec<u8>>) -> Self {
        assert_eq!(rows.len(), height);

        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for row in rows {
            assert_eq!(row.len(), width * CHANNELS);
            data.extend_from_slice(&row);
        }

        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap raw interleaved RGB bytes.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Self {
        assert_eq!(data.len(), width * height * CHANNELS);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the RGB bytes of the pixel at (row, col).
    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        let i = (row * self.width + col) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Set the pixel at (row, col) from a linear color, quantizing each
    /// channel with the given gamma.
    pub fn set_pixel(&mut self, row: usize, col: usize, color: Color, gamma: f64) {
        let i = (row * self.width + col) * CHANNELS;
        self.data[i] = quantize(color.x, gamma);
        self.data[i + 1] = quantize(color.y, gamma);
        self.data[i + 2] = quantize(color.z, gamma);
    }

    /// Raw interleaved RGB bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
