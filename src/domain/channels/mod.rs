// SPDX-License-Identifier: MPL-2.0
//! Channel domain types.
//!
//! Rank classification of multi-plane arrays and the RGB selection value.

pub mod types;

pub use types::{channel_count_from_shape, ChannelOutcome, ChannelRole, ChannelSelection};
