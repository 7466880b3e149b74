//! PPM (portable pixmap) reader and writer.
//!
//! Supports the 3-channel `P3` (ASCII) and `P6` (binary) variants with
//! a max value of 255, which is all the renderer produces.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::buffer::{ImageBuffer, CHANNELS};

/// PPM on-disk variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PpmFormat {
    /// ASCII samples
    P3,
    /// Binary samples
    P6,
}

/// Errors that can occur reading or writing PPM files.
#[derive(Error, Debug)]
pub enum PpmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a supported PPM file: magic `{0}`")]
    BadMagic(String),

    #[error("malformed PPM header")]
    Header,

    #[error("unsupported max value {0} (only 255 is supported)")]
    MaxValue(u32),

    #[error("truncated pixel data")]
    Truncated,
}

/// Write an image buffer to a PPM file.
pub fn save(image: &ImageBuffer, path: impl AsRef<Path>, format: PpmFormat) -> Result<(), PpmError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    let magic = match format {
        PpmFormat::P3 => "P3",
        PpmFormat::P6 => "P6",
    };
    writeln!(out, "{}\n{} {}\n255", magic, image.width(), image.height())?;

    match format {
        PpmFormat::P3 => {
            for row in 0..image.height() {
                for col in 0..image.width() {
                    let [r, g, b] = image.pixel(row, col);
                    writeln!(out, "{} {} {}", r, g, b)?;
                }
            }
        }
        PpmFormat::P6 => {
            out.write_all(image.as_bytes())?;
        }
    }

    out.flush()?;
    log::debug!(
        "wrote {}x{} {:?} image to {}",
        image.width(),
        image.height(),
        format,
        path.display()
    );
    Ok(())
}

/// Read a P3 or P6 PPM file into an image buffer.
pub fn load(path: impl AsRef<Path>) -> Result<ImageBuffer, PpmError> {
    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;
    parse(&bytes)
}

fn parse(bytes: &[u8]) -> Result<ImageBuffer, PpmError> {
    let mut cursor = 0usize;

    let magic = next_token(bytes, &mut cursor).ok_or(PpmError::Header)?;
    let format = match magic {
        b"P3" => PpmFormat::P3,
        b"P6" => PpmFormat::P6,
        other => return Err(PpmError::BadMagic(String::from_utf8_lossy(other).into_owned())),
    };

    let width = parse_number(bytes, &mut cursor)?;
    let height = parse_number(bytes, &mut cursor)?;
    let max_value = parse_number(bytes, &mut cursor)?;
    if max_value != 255 {
        return Err(PpmError::MaxValue(max_value));
    }

    let len = width as usize * height as usize * CHANNELS;
    let mut data = Vec::with_capacity(len);

    match format {
        PpmFormat::P3 => {
            for _ in 0..len {
                let sample = parse_number(bytes, &mut cursor)?;
                if sample > 255 {
                    return Err(PpmError::Header);
                }
                data.push(sample as u8);
            }
        }
        PpmFormat::P6 => {
            // Exactly one whitespace byte separates the header from
            // the raster.
            cursor += 1;
            let end = cursor + len;
            if end > bytes.len() {
                return Err(PpmError::Truncated);
            }
            data.extend_from_slice(&bytes[cursor..end]);
        }
    }

    Ok(ImageBuffer::from_raw(width as usize, height as usize, data))
}

/// Advance past whitespace and `#` comments, then return the next
/// whitespace-delimited token.
fn next_token<'a>(bytes: &'a [u8], cursor: &mut usize) -> Option<&'a [u8]> {
    loop {
        while *cursor < bytes.len() && bytes[*cursor].is_ascii_whitespace() {
            *cursor += 1;
        }
        if *cursor < bytes.len() && bytes[*cursor] == b'#' {
            while *cursor < bytes.len() && bytes[*cursor] != b'\n' {
                *cursor += 1;
            }
            continue;
        }
        break;
    }

    if *cursor >= bytes.len() {
        return None;
    }

    let start = *cursor;
    while *cursor < bytes.len() && !bytes[*cursor].is_ascii_whitespace() {
        *cursor += 1;
    }
    Some(&bytes[start..*cursor])
}

fn parse_number(bytes: &[u8], cursor: &mut usize) -> Result<u32, PpmError> {
    let token = next_token(bytes, cursor).ok_or(PpmError::Header)?;
    std::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(PpmError::Header)
}
