// SPDX-License-Identifier: MPL-2.0
//! Raster decoding with the `image` crate.
//!
//! The format is sniffed from the file contents, not its extension, so a
//! mislabeled file still previews.

use crate::application::port::RasterDecoder;
use crate::error::DecodeFailure;
use image_rs::{DynamicImage, GenericImageView, ImageReader};
use std::path::Path;

/// [`RasterDecoder`] backed by `image::ImageReader`, streaming from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRsDecoder;

impl ImageRsDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RasterDecoder for ImageRsDecoder {
    fn decode(&self, path: &Path) -> Result<DynamicImage, DecodeFailure> {
        let io = |e: std::io::Error| DecodeFailure::Io(e.to_string());
        let image = ImageReader::open(path)
            .map_err(io)?
            .with_guessed_format()
            .map_err(io)?
            .decode()?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(DecodeFailure::Empty { width, height });
        }

        Ok(image)
    }
}
