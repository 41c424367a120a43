// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! # Available Ports
//!
//! - [`decoder`]: Raster and multi-plane image decoding
//!
//! # Design Notes
//!
//! - Ports hand back the decoding libraries' own containers
//!   (`image::DynamicImage`, `ndarray::ArrayD`) so callers can scale or
//!   inspect shapes without copying
//! - Traits are `Send + Sync` so a worker can share them across threads
//! - Methods return `Result` with [`DecodeFailure`](crate::error::DecodeFailure)

pub mod decoder;

pub use decoder::{PlaneArray, PlaneDecoder, RasterDecoder};
