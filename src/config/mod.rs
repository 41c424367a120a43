// SPDX-License-Identifier: MPL-2.0
//! This module handles the configuration, loading and saving user
//! preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[preview]` - Preview pane geometry and JSON rendering
//! - `[diagnostics]` - Diagnostics buffer sizing
//!
//! # Examples
//!
//! ```no_run
//! use dialog_preview::config;
//!
//! let (mut config, _warning) = config::load();
//! config.general.language = Some("fr".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::preview::{JsonIndent, Viewport};
use crate::error::{Error, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Preview pane settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreviewConfig {
    /// Fixed width of the preview pane.
    #[serde(default = "default_pane_width")]
    pub pane_width: u32,

    /// Fixed height of the preview pane.
    #[serde(default = "default_pane_height")]
    pub pane_height: u32,

    /// Margin removed from each axis to get the thumbnail viewport.
    #[serde(default = "default_pane_margin")]
    pub margin: u32,

    /// Indentation width for pretty-printed JSON.
    #[serde(default = "default_json_indent")]
    pub json_indent: usize,

    /// JSON files above this size are not rendered. Unlimited when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_json_bytes: Option<u64>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            pane_width: DEFAULT_PANE_WIDTH,
            pane_height: DEFAULT_PANE_HEIGHT,
            margin: DEFAULT_PANE_MARGIN,
            json_indent: DEFAULT_JSON_INDENT,
            max_json_bytes: None,
        }
    }
}

impl PreviewConfig {
    /// Thumbnail target box derived from the pane geometry.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::from_pane(self.pane_width, self.pane_height, self.margin)
    }

    #[must_use]
    pub fn indent(&self) -> JsonIndent {
        JsonIndent::new(self.json_indent)
    }

    /// Opt-in text preview limit, raised to at least 1 KiB.
    #[must_use]
    pub fn text_limit(&self) -> Option<u64> {
        self.max_json_bytes
            .map(|limit| limit.max(MIN_MAX_JSON_BYTES))
    }
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsConfig {
    /// Number of events kept in memory.
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub preview: PreviewConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_pane_width() -> u32 {
    DEFAULT_PANE_WIDTH
}

fn default_pane_height() -> u32 {
    DEFAULT_PANE_HEIGHT
}

fn default_pane_margin() -> u32 {
    DEFAULT_PANE_MARGIN
}

fn default_json_indent() -> usize {
    DEFAULT_JSON_INDENT
}

fn default_buffer_capacity() -> usize {
    DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY
}

// =============================================================================
// Load Functions
// =============================================================================

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("Ignoring {}: {}", CONFIG_FILE, err)),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
