// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value types and rules shared by both dialogs.
//!
//! Beyond `std`, it depends only on the crate's own error types.
//!
//! # Modules
//!
//! - [`preview`]: Preview values ([`PreviewMode`](preview::PreviewMode),
//!   [`Preview`](preview::Preview), [`Viewport`](preview::Viewport),
//!   [`JsonIndent`](preview::JsonIndent))
//! - [`channels`]: Channel values ([`ChannelSelection`](channels::ChannelSelection),
//!   [`ChannelOutcome`](channels::ChannelOutcome)) and rank classification

pub mod channels;
pub mod preview;
