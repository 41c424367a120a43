// SPDX-License-Identifier: MPL-2.0
//! `dialog_preview` holds the decision and data core of two image-annotation
//! dialogs.
//!
//! - A file-open preview pane that shows pretty-printed JSON or a scaled
//!   image thumbnail for the selected file ([`preview`], [`ui::PreviewPane`]).
//! - A modal picker that maps three planes of a multi-plane image to the
//!   red, green and blue display channels ([`ui::ChannelPicker`]).
//!
//! Rendering belongs to the host toolkit; this crate decides what to show.

#![doc(html_root_url = "https://docs.rs/dialog_preview/0.1.0")]

pub mod application;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod paths;
pub mod preview;
pub mod ui;
