// SPDX-License-Identifier: MPL-2.0
//! Channel selection types for the domain layer.

use crate::error::UnsupportedRankError;

/// Output display channel a plane is mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelRole {
    Red,
    Green,
    Blue,
}

impl ChannelRole {
    /// All roles in display order.
    pub const ALL: [ChannelRole; 3] = [ChannelRole::Red, ChannelRole::Green, ChannelRole::Blue];

    /// Position of the role inside an `(r, g, b)` triple.
    #[must_use]
    pub fn position(self) -> usize {
        match self {
            ChannelRole::Red => 0,
            ChannelRole::Green => 1,
            ChannelRole::Blue => 2,
        }
    }

    /// i18n key for the selector row label.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            ChannelRole::Red => "channel-red-label",
            ChannelRole::Green => "channel-green-label",
            ChannelRole::Blue => "channel-blue-label",
        }
    }
}

/// Plane indices mapped to red, green and blue.
///
/// Indices may repeat: the same plane can feed several outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelSelection {
    r: usize,
    g: usize,
    b: usize,
}

impl ChannelSelection {
    /// Creates a selection. Range checking is done by the picker that
    /// produces it, which knows the channel count.
    #[must_use]
    pub fn new(r: usize, g: usize, b: usize) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub fn r(self) -> usize {
        self.r
    }

    #[must_use]
    pub fn g(self) -> usize {
        self.g
    }

    #[must_use]
    pub fn b(self) -> usize {
        self.b
    }

    #[must_use]
    pub fn get(self, role: ChannelRole) -> usize {
        match role {
            ChannelRole::Red => self.r,
            ChannelRole::Green => self.g,
            ChannelRole::Blue => self.b,
        }
    }

    #[must_use]
    pub fn as_tuple(self) -> (usize, usize, usize) {
        (self.r, self.g, self.b)
    }
}

/// Final result of a channel selection dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOutcome {
    Selected(ChannelSelection),
    Cancelled,
}

impl ChannelOutcome {
    #[must_use]
    pub fn selection(self) -> Option<ChannelSelection> {
        match self {
            ChannelOutcome::Selected(selection) => Some(selection),
            ChannelOutcome::Cancelled => None,
        }
    }
}

/// Number of channels of a decoded multi-plane array, from its shape.
///
/// Rank 2 is a single plane; rank 3 and 4 carry planes on the last axis.
///
/// # Errors
///
/// Returns [`UnsupportedRankError`] for any other rank, or when the last
/// axis is empty.
pub fn channel_count_from_shape(shape: &[usize]) -> Result<usize, UnsupportedRankError> {
    let count = match shape {
        [_, _] => 1,
        [_, _, last] | [_, _, _, last] => *last,
        _ => return Err(UnsupportedRankError::new(shape)),
    };

    if count == 0 {
        return Err(UnsupportedRankError::new(shape));
    }

    Ok(count)
}
