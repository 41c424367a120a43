// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting and exporting activity reports.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped event with a serializable kind
//! - [`DiagnosticsCollector`] / [`DiagnosticsHandle`]: Storage and
//!   non-blocking event submission
//!
//! # Privacy
//!
//! Only file names are recorded; directories in error messages are stripped.

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticReport, DiagnosticsCollector, DiagnosticsHandle, SerializableEvent};
pub use events::{
    file_label, sanitize_message, DialogResult, DiagnosticEvent, DiagnosticEventKind,
    FailureCategory, ShownMode,
};
