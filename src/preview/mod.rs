// SPDX-License-Identifier: MPL-2.0
//! Preview selection for the file dialog side pane.
//!
//! - [`selector`]: synchronous mode decision and content building
//! - [`json`]: indented JSON rendering
//! - [`worker`]: async requests where the latest selection wins

pub mod json;
pub mod selector;
pub mod worker;

pub use json::{is_json_path, render_json, render_json_file};
pub use selector::PreviewSelector;
pub use worker::{PreviewOutcome, PreviewTicket, PreviewWorker};
