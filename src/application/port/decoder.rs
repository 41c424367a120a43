// SPDX-License-Identifier: MPL-2.0
//! Decoder ports.
//!
//! [`RasterDecoder`] feeds the preview pane; [`PlaneDecoder`] feeds the
//! channel selection dialog.

use crate::domain::preview::Viewport;
use crate::error::DecodeFailure;
use image_rs::imageops::FilterType;
use image_rs::DynamicImage;
use ndarray::ArrayD;
use std::path::Path;

/// Decoded multi-plane image: rank and shape follow the file layout.
pub type PlaneArray = ArrayD<f64>;

/// Port for decoding general raster images.
///
/// # Example
///
/// ```ignore
/// use dialog_preview::application::port::RasterDecoder;
/// use dialog_preview::domain::preview::Viewport;
///
/// fn thumbnail(decoder: &impl RasterDecoder, path: &std::path::Path) {
///     if let Ok(image) = decoder.decode(path) {
///         let small = decoder.scale_to_fit(&image, Viewport::default());
///         println!("{}x{}", small.width(), small.height());
///     }
/// }
/// ```
pub trait RasterDecoder: Send + Sync {
    /// Decodes the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeFailure`] if the file cannot be read or decoded.
    /// An image with a zero side is reported as [`DecodeFailure::Empty`].
    fn decode(&self, path: &Path) -> Result<DynamicImage, DecodeFailure>;

    /// Scales `image` to fit `viewport`, keeping its aspect ratio and using
    /// smooth (bilinear) resampling.
    ///
    /// Small images are enlarged to fill the box, as toolkit pixmaps do.
    fn scale_to_fit(&self, image: &DynamicImage, viewport: Viewport) -> DynamicImage {
        image.resize(viewport.width(), viewport.height(), FilterType::Triangle)
    }
}

/// Port for decoding multi-plane (scientific, TIFF-style) images.
pub trait PlaneDecoder: Send + Sync {
    /// Decodes the file at `path` into an n-dimensional array.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeFailure`] if the file cannot be read or decoded,
    /// or if its sample layout is not supported.
    fn decode_array(&self, path: &Path) -> Result<PlaneArray, DecodeFailure>;

    /// Shape of the array [`decode_array`](Self::decode_array) would return.
    ///
    /// Implementations should read it from the file header when they can,
    /// without decoding samples.
    ///
    /// # Errors
    ///
    /// Same as [`decode_array`](Self::decode_array).
    fn decode_shape(&self, path: &Path) -> Result<Vec<usize>, DecodeFailure> {
        self.decode_array(path).map(|array| array.shape().to_vec())
    }
}
