// SPDX-License-Identifier: MPL-2.0
//! Preview newtypes.
//!
//! This module provides type-safe wrappers for preview geometry,
//! ensuring the thumbnail target box is never degenerate.

// =============================================================================
// Pane Bounds
// =============================================================================

/// Preview pane geometry bounds (in logical units).
pub mod pane_bounds {
    /// Minimum pane side.
    pub const MIN_SIDE: u32 = 32;
    /// Maximum pane side.
    pub const MAX_SIDE: u32 = 4096;
    /// Default pane side (the pane is square).
    pub const DEFAULT_SIDE: u32 = 300;
    /// Default margin subtracted from each axis to obtain the viewport.
    pub const DEFAULT_MARGIN: u32 = 30;
}

// =============================================================================
// Viewport
// =============================================================================

/// Target box a thumbnail is scaled to fit into.
///
/// Both sides are at least 1, so a scale-to-fit never divides by zero.
///
/// # Example
///
/// ```
/// use dialog_preview::domain::preview::Viewport;
///
/// let viewport = Viewport::from_pane(300, 300, 30);
/// assert_eq!((viewport.width(), viewport.height()), (270, 270));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Creates a viewport of the given size, raising zero sides to 1.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Derives the viewport from a pane size and the margin removed on each axis.
    ///
    /// Pane sides are clamped to [`pane_bounds::MIN_SIDE`]..=[`pane_bounds::MAX_SIDE`].
    #[must_use]
    pub fn from_pane(pane_width: u32, pane_height: u32, margin: u32) -> Self {
        let pane_width = pane_width.clamp(pane_bounds::MIN_SIDE, pane_bounds::MAX_SIDE);
        let pane_height = pane_height.clamp(pane_bounds::MIN_SIDE, pane_bounds::MAX_SIDE);
        Self::new(
            pane_width.saturating_sub(margin),
            pane_height.saturating_sub(margin),
        )
    }

    #[must_use]
    pub fn width(self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u32 {
        self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_pane(
            pane_bounds::DEFAULT_SIDE,
            pane_bounds::DEFAULT_SIDE,
            pane_bounds::DEFAULT_MARGIN,
        )
    }
}

// =============================================================================
// JsonIndent
// =============================================================================

/// Indentation width used when pretty-printing JSON, 0 to 16 spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonIndent(usize);

impl JsonIndent {
    /// Maximum indentation width.
    pub const MAX: usize = 16;

    /// Creates an indentation width, clamping to `0..=MAX`.
    #[must_use]
    pub fn new(spaces: usize) -> Self {
        Self(spaces.min(Self::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }

    /// Returns the indentation unit as bytes, as expected by `serde_json`.
    #[must_use]
    pub fn as_bytes(self) -> Vec<u8> {
        vec![b' '; self.0]
    }
}

impl Default for JsonIndent {
    fn default() -> Self {
        Self(4)
    }
}

// =============================================================================
// Tests
// =============================================================================
