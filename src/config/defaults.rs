// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Preview**: Pane geometry and JSON rendering
//! - **Diagnostics**: Event buffer sizing

// ==========================================================================
// Preview Defaults
// ==========================================================================

/// Default preview pane width (logical units).
pub const DEFAULT_PANE_WIDTH: u32 = 300;

/// Default preview pane height (logical units).
pub const DEFAULT_PANE_HEIGHT: u32 = 300;

/// Default margin removed from each pane axis to get the thumbnail viewport.
pub const DEFAULT_PANE_MARGIN: u32 = 30;

/// Default JSON indentation width in spaces.
pub const DEFAULT_JSON_INDENT: usize = 4;

/// Minimum accepted text preview limit (1 KiB) when one is configured.
pub const MIN_MAX_JSON_BYTES: u64 = 1024;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default capacity of the diagnostics event buffer.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum capacity of the diagnostics event buffer.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 100;

/// Maximum capacity of the diagnostics event buffer.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10000;
