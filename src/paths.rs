// SPDX-License-Identifier: MPL-2.0
//! Location of the settings directory.
//!
//! # Resolution Order
//!
//! 1. **Explicit override** - the `--config-dir` flag, or a path passed by tests
//! 2. **Environment variable** `DIALOG_PREVIEW_CONFIG_DIR`
//! 3. **Platform default** - via `dirs` crate

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "DialogPreview";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "DIALOG_PREVIEW_CONFIG_DIR";

/// Returns the config directory, honouring an explicit override first.
///
/// Returns `None` if the platform config directory cannot be determined.
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the config directory using the environment and platform defaults.
pub fn config_dir() -> Option<PathBuf> {
    config_dir_with_override(None)
}
