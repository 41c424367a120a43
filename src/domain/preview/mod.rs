// SPDX-License-Identifier: MPL-2.0
//! Preview domain types.
//!
//! This module contains the preview decision value and its geometry,
//! independent of any toolkit or decoder.

pub mod newtypes;
pub mod types;

// Re-export commonly used types
pub use newtypes::{JsonIndent, Viewport};
pub use types::{Alignment, Preview, PreviewContent, PreviewImage, PreviewMode, Thumbnail};
