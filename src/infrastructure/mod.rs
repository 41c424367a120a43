// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the ports in `application::port`.
//!
//! # Available Adapters
//!
//! - [`raster`]: Raster decoding via the `image` crate (implements [`RasterDecoder`])
//! - [`planes`]: Multi-plane decoding via `tiff`, with an `image` fallback
//!   (implements [`PlaneDecoder`])
//!
//! [`RasterDecoder`]: crate::application::port::RasterDecoder
//! [`PlaneDecoder`]: crate::application::port::PlaneDecoder

pub mod planes;
pub mod raster;

pub use planes::TiffPlaneDecoder;
pub use raster::ImageRsDecoder;
