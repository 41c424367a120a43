// SPDX-License-Identifier: MPL-2.0
//! Dialog state the host toolkit renders.
//!
//! - [`preview_pane`]: file dialog side pane
//! - [`channel_picker`]: modal RGB channel selection

pub mod channel_picker;
pub mod preview_pane;

pub use channel_picker::{
    build_channel_options, derive_channel_count, ChannelOption, ChannelPicker, DialogLabels,
    PickerState,
};
pub use preview_pane::PreviewPane;
