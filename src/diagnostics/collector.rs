// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! Handles send events through a bounded channel; the collector drains
//! them into a circular buffer and exports a JSON report.

use std::fs;
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Serialize;

use super::{BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind};
use crate::error::Result;

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Handle for sending diagnostic events to the collector.
///
/// Cheap to clone and `Send`, so worker tasks can log too.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Logs an event. Non-blocking; the event is dropped if the channel is full.
    pub fn log(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }

    /// Logs a warning message. Non-blocking.
    pub fn log_warning(&self, message: impl Into<String>) {
        self.log(DiagnosticEventKind::Warning {
            message: super::sanitize_message(&message.into()),
        });
    }

    /// A handle whose events go nowhere, for callers that do not collect.
    #[must_use]
    pub fn disconnected() -> Self {
        let (event_tx, _) = bounded(1);
        Self { event_tx }
    }
}

/// One event in an exported report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SerializableEvent {
    /// Milliseconds since collection started.
    pub offset_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

/// Exported diagnostics report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiagnosticReport {
    pub version: String,
    /// When collection started (RFC 3339).
    pub collection_started_at: String,
    /// When the report was generated (RFC 3339).
    pub generated_at: String,
    pub event_count: usize,
    pub events: Vec<SerializableEvent>,
}

/// Central collector for diagnostic events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    /// When collection started (monotonic clock for offsets).
    collection_started_at: Instant,
    /// When collection started (wall clock for report metadata).
    collection_started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains all pending events from the channel into the buffer.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    /// Logs an event directly to the buffer, bypassing the channel.
    pub fn log(&mut self, kind: DiagnosticEventKind) {
        self.buffer.push(DiagnosticEvent::new(kind));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns an iterator over all stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Builds a report from the current buffer contents.
    #[allow(clippy::cast_possible_truncation)] // Offsets in ms fit comfortably in u64
    #[must_use]
    pub fn build_report(&self) -> DiagnosticReport {
        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| SerializableEvent {
                offset_ms: event
                    .timestamp
                    .saturating_duration_since(self.collection_started_at)
                    .as_millis() as u64,
                kind: event.kind.clone(),
            })
            .collect();

        DiagnosticReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at: self.collection_started_at_utc.to_rfc3339(),
            generated_at: Utc::now().to_rfc3339(),
            event_count: events.len(),
            events,
        }
    }

    /// Exports all collected events as a pretty JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.build_report())
    }

    /// Writes the JSON report to `path`, creating parent directories.
    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        let json = self
            .export_json()
            .map_err(|e| crate::error::Error::Io(e.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)?;
        Ok(())
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{FailureCategory, ShownMode};
    use tempfile::tempdir;

    #[test]
    fn handle_events_arrive_after_processing() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();
        handle.log_warning("first");
        handle.log(DiagnosticEventKind::PreviewSuperseded { generation: 4 });

        assert!(collector.is_empty());
        collector.process_pending();
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn handle_can_be_used_from_another_thread() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();
        std::thread::spawn(move || handle.log_warning("from worker"))
            .join()
            .expect("thread panicked");
        collector.process_pending();
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn periodic_draining_keeps_events_past_channel_capacity() {
        let mut undrained = DiagnosticsCollector::default();
        let handle = undrained.handle();
        for generation in 0..150 {
            handle.log(DiagnosticEventKind::PreviewSuperseded { generation });
        }
        undrained.process_pending();
        assert_eq!(undrained.len(), DEFAULT_CHANNEL_CAPACITY);

        let mut drained = DiagnosticsCollector::default();
        let handle = drained.handle();
        for generation in 0..150 {
            handle.log(DiagnosticEventKind::PreviewSuperseded { generation });
            drained.process_pending();
        }
        assert_eq!(drained.len(), 150);
    }

    #[test]
    fn disconnected_handle_drops_silently() {
        let handle = DiagnosticsHandle::disconnected();
        handle.log_warning("nobody listens");
    }

    #[test]
    fn export_json_contains_events_in_order() {
        let mut collector = DiagnosticsCollector::default();
        collector.log(DiagnosticEventKind::PreviewShown {
            mode: ShownMode::Image,
            duration_ms: 12,
            file: Some("a.png".to_string()),
        });
        collector.log(DiagnosticEventKind::Failure {
            category: FailureCategory::Preview,
            message: "Invalid JSON".to_string(),
        });

        let json = collector.export_json().expect("export should succeed");
        let report: serde_json::Value = serde_json::from_str(&json).expect("valid report");
        assert_eq!(report["event_count"], 2);
        assert_eq!(report["events"][0]["type"], "preview_shown");
        assert_eq!(report["events"][0]["duration_ms"], 12);
        assert_eq!(report["events"][1]["type"], "failure");
        assert_eq!(report["events"][1]["category"], "preview");
    }

    #[test]
    fn warning_messages_are_sanitized() {
        let mut collector = DiagnosticsCollector::default();
        collector.handle().log_warning("cannot open /home/user/x.json");
        collector.process_pending();
        let event = collector.iter().next().expect("one event");
        assert_eq!(
            event.kind,
            DiagnosticEventKind::Warning {
                message: "cannot open <path>/x.json".to_string()
            }
        );
    }

    #[test]
    fn export_to_file_writes_report() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("reports").join("diag.json");
        let collector = DiagnosticsCollector::default();
        collector.export_to_file(&path).expect("export should succeed");
        let content = fs::read_to_string(&path).expect("report written");
        assert!(content.contains("\"event_count\": 0"));
    }
}
