// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.
//!
//! Events describe what the preview and channel dialogs did, so a report
//! can be correlated with what the user was browsing.

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::domain::channels::ChannelOutcome;
use crate::domain::preview::PreviewMode;
use crate::error::{DecodeFailure, PreviewError, UnsupportedRankError};

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

/// Serializable preview mode, mirrored from the domain type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShownMode {
    Text,
    Image,
    None,
}

impl From<PreviewMode> for ShownMode {
    fn from(mode: PreviewMode) -> Self {
        match mode {
            PreviewMode::Text => ShownMode::Text,
            PreviewMode::Image => ShownMode::Image,
            PreviewMode::None => ShownMode::None,
        }
    }
}

/// Why a preview or channel derivation failed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// JSON read or parse failure.
    Preview,
    /// Raster or multi-plane decode failure.
    Decode,
    /// Multi-plane array with an unsupported rank.
    UnsupportedRank,
}

/// How a channel dialog ended.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DialogResult {
    Confirmed { r: usize, g: usize, b: usize },
    Cancelled,
}

impl From<ChannelOutcome> for DialogResult {
    fn from(outcome: ChannelOutcome) -> Self {
        match outcome {
            ChannelOutcome::Selected(selection) => DialogResult::Confirmed {
                r: selection.r(),
                g: selection.g(),
                b: selection.b(),
            },
            ChannelOutcome::Cancelled => DialogResult::Cancelled,
        }
    }
}

/// The type and associated data for a diagnostic event.
///
/// Serialize-only: reports are exported, never read back.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A preview decision was applied.
    PreviewShown {
        mode: ShownMode,
        /// Time spent producing the preview.
        duration_ms: u64,
        /// File name only, never the full path.
        #[serde(skip_serializing_if = "Option::is_none")]
        file: Option<String>,
    },

    /// A preview or channel derivation failed.
    Failure {
        category: FailureCategory,
        message: String,
    },

    /// A channel dialog reached a terminal state.
    ChannelDialog {
        num_channels: usize,
        outcome: DialogResult,
    },

    /// A stale preview result was dropped.
    PreviewSuperseded { generation: u64 },

    /// Non-critical warning.
    Warning { message: String },
}

impl DiagnosticEventKind {
    #[must_use]
    pub fn preview_failed(err: &PreviewError) -> Self {
        DiagnosticEventKind::Failure {
            category: FailureCategory::Preview,
            message: sanitize_message(&err.to_string()),
        }
    }

    #[must_use]
    pub fn decode_failed(err: &DecodeFailure) -> Self {
        DiagnosticEventKind::Failure {
            category: FailureCategory::Decode,
            message: sanitize_message(&err.to_string()),
        }
    }

    #[must_use]
    pub fn rank_rejected(err: &UnsupportedRankError) -> Self {
        DiagnosticEventKind::Failure {
            category: FailureCategory::UnsupportedRank,
            message: err.to_string(),
        }
    }
}

/// Returns only the file name of a path, for privacy.
#[must_use]
pub fn file_label(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

/// Replaces absolute-looking paths inside a message by their file name.
///
/// Decoder errors often echo the path they failed on.
#[must_use]
pub fn sanitize_message(message: &str) -> String {
    message
        .split(' ')
        .map(|word| {
            let trimmed = word.trim_matches(|c| c == '"' || c == '\'' || c == ':' || c == ',');
            let looks_like_path = trimmed.starts_with('/')
                || trimmed.starts_with("~/")
                || trimmed.get(1..3) == Some(":\\");
            if looks_like_path && trimmed.len() > 1 {
                let name = trimmed
                    .rsplit(['/', '\\'])
                    .next()
                    .unwrap_or_default();
                word.replace(trimmed, &format!("<path>/{name}"))
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::channels::ChannelSelection;

    #[test]
    fn sanitize_message_strips_directories() {
        let message = sanitize_message("No such file: /home/alice/secret/scan.tif");
        assert_eq!(message, "No such file: <path>/scan.tif");
    }

    #[test]
    fn sanitize_message_keeps_plain_words() {
        assert_eq!(sanitize_message("invalid data"), "invalid data");
    }

    #[test]
    fn sanitize_message_handles_windows_paths() {
        let message = sanitize_message("failed C:\\Users\\bob\\img.png");
        assert_eq!(message, "failed <path>/img.png");
    }

    #[test]
    fn file_label_is_name_only() {
        assert_eq!(
            file_label(Path::new("/data/set/config.json")),
            Some("config.json".to_string())
        );
    }

    #[test]
    fn dialog_result_from_outcome() {
        let selected = ChannelOutcome::Selected(ChannelSelection::new(2, 1, 0));
        let confirmed = DialogResult::from(selected);
        assert_eq!(confirmed, DialogResult::Confirmed { r: 2, g: 1, b: 0 });
        assert_eq!(
            DialogResult::from(ChannelOutcome::Cancelled),
            DialogResult::Cancelled
        );
    }

    #[test]
    fn event_kind_serializes_with_type_tag() {
        let kind = DiagnosticEventKind::PreviewShown {
            mode: ShownMode::Text,
            duration_ms: 3,
            file: None,
        };
        let json = serde_json::to_value(&kind).expect("serialize");
        assert_eq!(json["type"], "preview_shown");
        assert_eq!(json["mode"], "text");
        assert!(json.get("file").is_none());
    }

    #[test]
    fn rank_rejection_is_categorized() {
        let kind = DiagnosticEventKind::rank_rejected(&UnsupportedRankError::new(&[4]));
        assert!(matches!(
            kind,
            DiagnosticEventKind::Failure {
                category: FailureCategory::UnsupportedRank,
                ..
            }
        ));
    }
}
