// SPDX-License-Identifier: MPL-2.0
//! RGB channel selection dialog state.
//!
//! The picker offers one option per plane of a multi-plane image and lets
//! the red, green and blue rows each pick any of them, duplicates included.
//! It is single use: once confirmed or cancelled it rejects every further
//! interaction.

use crate::application::port::PlaneDecoder;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use crate::domain::channels::{
    channel_count_from_shape, ChannelOutcome, ChannelRole, ChannelSelection,
};
use crate::error::{ChannelPickerError, Error, UnsupportedRankError};
use crate::i18n::fluent::I18n;
use fluent_bundle::FluentValue;
use ndarray::{ArrayBase, Dimension, RawData};
use std::path::Path;

/// Number of channels of a decoded array.
///
/// # Errors
///
/// Returns [`UnsupportedRankError`] unless the array has rank 2, 3 or 4
/// with a non-empty last axis.
pub fn derive_channel_count<S, D>(array: &ArrayBase<S, D>) -> Result<usize, UnsupportedRankError>
where
    S: RawData,
    D: Dimension,
{
    channel_count_from_shape(array.shape())
}

/// One entry of a channel selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOption {
    pub index: usize,
    /// Localized "Channel {index}".
    pub label: String,
}

/// Options `0..num_channels`, in order.
#[must_use]
pub fn build_channel_options(num_channels: usize, i18n: &I18n) -> Vec<ChannelOption> {
    (0..num_channels)
        .map(|index| ChannelOption {
            index,
            label: i18n.tr_with_args("channel-option", &[("index", FluentValue::from(index))]),
        })
        .collect()
}

/// Localized dialog strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogLabels {
    pub title: String,
    pub red: String,
    pub green: String,
    pub blue: String,
    pub ok: String,
    pub cancel: String,
}

impl DialogLabels {
    #[must_use]
    pub fn from_i18n(i18n: &I18n) -> Self {
        Self {
            title: i18n.tr("channel-dialog-title"),
            red: i18n.tr(ChannelRole::Red.i18n_key()),
            green: i18n.tr(ChannelRole::Green.i18n_key()),
            blue: i18n.tr(ChannelRole::Blue.i18n_key()),
            ok: i18n.tr("dialog-ok"),
            cancel: i18n.tr("dialog-cancel"),
        }
    }

    /// Row label for a selector.
    #[must_use]
    pub fn row(&self, role: ChannelRole) -> &str {
        match role {
            ChannelRole::Red => &self.red,
            ChannelRole::Green => &self.green,
            ChannelRole::Blue => &self.blue,
        }
    }
}

/// Lifecycle of a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    Open,
    Confirmed,
    Cancelled,
}

impl PickerState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, PickerState::Open)
    }
}

/// Modal RGB channel picker.
#[derive(Debug, Clone)]
pub struct ChannelPicker {
    num_channels: usize,
    options: Vec<ChannelOption>,
    labels: DialogLabels,
    /// Current index per role, in `ChannelRole::position` order.
    current: [usize; 3],
    state: PickerState,
    diagnostics: Option<DiagnosticsHandle>,
}

impl ChannelPicker {
    /// Picker for an array of the given shape.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedRankError`] if the shape has no channel count.
    pub fn from_shape(shape: &[usize], i18n: &I18n) -> Result<Self, UnsupportedRankError> {
        let num_channels = channel_count_from_shape(shape)?;
        Ok(Self {
            num_channels,
            options: build_channel_options(num_channels, i18n),
            labels: DialogLabels::from_i18n(i18n),
            current: [0; 3],
            state: PickerState::Open,
            diagnostics: None,
        })
    }

    /// Picker for a decoded array.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedRankError`] if the rank is not 2, 3 or 4.
    pub fn from_array<S, D>(
        array: &ArrayBase<S, D>,
        i18n: &I18n,
    ) -> Result<Self, UnsupportedRankError>
    where
        S: RawData,
        D: Dimension,
    {
        Self::from_shape(array.shape(), i18n)
    }

    /// Reads the shape of `path` and opens a picker for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the file cannot be decoded and
    /// [`Error::UnsupportedRank`] if its shape has no channel count.
    pub fn open(decoder: &impl PlaneDecoder, path: &Path, i18n: &I18n) -> Result<Self, Error> {
        let shape = decoder.decode_shape(path)?;
        Ok(Self::from_shape(&shape, i18n)?)
    }

    /// Sets the diagnostics handle used to record the dialog outcome.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    #[must_use]
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Options shared by the three selectors.
    #[must_use]
    pub fn options(&self) -> &[ChannelOption] {
        &self.options
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.labels.title
    }

    #[must_use]
    pub fn labels(&self) -> &DialogLabels {
        &self.labels
    }

    #[must_use]
    pub fn state(&self) -> PickerState {
        self.state
    }

    /// Index currently chosen for `role`.
    #[must_use]
    pub fn selected(&self, role: ChannelRole) -> usize {
        self.current[role.position()]
    }

    /// Chooses `index` for `role`.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelPickerError::Closed`] after confirm or cancel and
    /// [`ChannelPickerError::IndexOutOfRange`] for an index that is not
    /// offered. The selection is unchanged on error.
    pub fn select(&mut self, role: ChannelRole, index: usize) -> Result<(), ChannelPickerError> {
        self.ensure_open()?;
        if index >= self.num_channels {
            return Err(ChannelPickerError::IndexOutOfRange {
                index,
                num_channels: self.num_channels,
            });
        }
        self.current[role.position()] = index;
        Ok(())
    }

    /// Accepts the current selection.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelPickerError::Closed`] if already confirmed or cancelled.
    pub fn confirm(&mut self) -> Result<ChannelSelection, ChannelPickerError> {
        self.ensure_open()?;
        self.state = PickerState::Confirmed;
        let selection = self.current_selection();
        self.record(ChannelOutcome::Selected(selection));
        Ok(selection)
    }

    /// Rejects the dialog.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelPickerError::Closed`] if already confirmed or cancelled.
    pub fn cancel(&mut self) -> Result<(), ChannelPickerError> {
        self.ensure_open()?;
        self.state = PickerState::Cancelled;
        self.record(ChannelOutcome::Cancelled);
        Ok(())
    }

    /// Final result of the dialog.
    ///
    /// After cancellation this is always [`ChannelOutcome::Cancelled`], even
    /// if selectors were changed before.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelPickerError::StillOpen`] before confirm or cancel.
    pub fn finalize(&self) -> Result<ChannelOutcome, ChannelPickerError> {
        match self.state {
            PickerState::Open => Err(ChannelPickerError::StillOpen),
            PickerState::Confirmed => Ok(ChannelOutcome::Selected(self.current_selection())),
            PickerState::Cancelled => Ok(ChannelOutcome::Cancelled),
        }
    }

    fn current_selection(&self) -> ChannelSelection {
        let [r, g, b] = self.current;
        ChannelSelection::new(r, g, b)
    }

    fn ensure_open(&self) -> Result<(), ChannelPickerError> {
        if self.state.is_terminal() {
            return Err(ChannelPickerError::Closed);
        }
        Ok(())
    }

    fn record(&self, outcome: ChannelOutcome) {
        if let Some(handle) = &self.diagnostics {
            handle.log(DiagnosticEventKind::ChannelDialog {
                num_channels: self.num_channels,
                outcome: outcome.into(),
            });
        }
    }
}
