// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! PNG output.  Encoding happens in memory so that encoder failures
//! and filesystem failures stay distinguishable.

use image::png::PNGEncoder;
use image::ColorType;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use errors::ZoomError;
use render::Frame;

/// Encode a buffer of packed RGB bytes as an 8-bit, non-interlaced
/// PNG.  Row 0 of the buffer is row 0 of the image.
pub fn encode_png(width: usize, height: usize, pixels: &[u8]) -> Result<Vec<u8>, io::Error> {
    // IHDR forbids zero dimensions.
    if width == 0 || height == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("a {}x{} image has no pixels", width, height),
        ));
    }
    if pixels.len() != width * height * 3 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "{} bytes cannot be a {}x{} RGB image",
                pixels.len(),
                width,
                height
            ),
        ));
    }
    let mut bytes = Vec::new();
    PNGEncoder::new(&mut bytes).encode(pixels, width as u32, height as u32, ColorType::RGB(8))?;
    Ok(bytes)
}

/// Make sure the output directory exists.
pub fn ensure_directory(path: &Path) -> Result<(), ZoomError> {
    let failed = |cause| ZoomError::Directory {
        path: path.display().to_string(),
        cause,
    };
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(failed(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "exists and is not a directory",
        )));
    }
    fs::create_dir_all(path).map_err(failed)?;
    info!("Created output directory {}", path.display());
    Ok(())
}

/// Encode a frame and write it to `path`.
pub fn write_frame(path: &Path, frame: &Frame) -> Result<(), ZoomError> {
    let bytes = encode_png(frame.width(), frame.height(), frame.pixels()).map_err(|cause| {
        ZoomError::Encode {
            frame: frame.index,
            cause,
        }
    })?;
    let failed = |cause| ZoomError::Io {
        frame: frame.index,
        path: path.display().to_string(),
        cause,
    };
    let mut output = File::create(path).map_err(failed)?;
    output.write_all(&bytes).map_err(failed)?;
    debug!("Wrote frame {} to {}", frame.index, path.display());
    Ok(())
}
