// SPDX-License-Identifier: MPL-2.0
//! Host-side state of the file dialog preview pane.
//!
//! The pane mirrors what the dialog shows: visibility, alignment and the
//! current content. It remembers the generation it is showing and ignores
//! anything older, so out-of-order async results cannot roll it back.

use crate::domain::preview::{Alignment, Preview, PreviewContent, PreviewMode};
use crate::preview::PreviewOutcome;

#[derive(Debug, Clone, Default)]
pub struct PreviewPane {
    shown: Preview,
    generation: u64,
}

impl PreviewPane {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `preview` if `generation` is not older than the current one.
    ///
    /// Returns whether the pane changed.
    pub fn apply(&mut self, generation: u64, preview: Preview) -> bool {
        if generation < self.generation {
            return false;
        }
        self.generation = generation;
        self.shown = preview;
        true
    }

    /// Applies a worker outcome; superseded outcomes are ignored.
    pub fn apply_outcome(&mut self, outcome: PreviewOutcome) -> bool {
        match outcome {
            PreviewOutcome::Ready {
                generation,
                preview,
            } => self.apply(generation, preview),
            PreviewOutcome::Superseded { .. } => false,
        }
    }

    /// Shows `preview` as the newest selection, for synchronous hosts.
    pub fn show(&mut self, preview: Preview) {
        let next = self.generation.saturating_add(1);
        self.apply(next, preview);
    }

    /// Drops the content and hides the pane.
    pub fn clear(&mut self) {
        self.shown = Preview::none();
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.shown.is_visible()
    }

    #[must_use]
    pub fn mode(&self) -> PreviewMode {
        self.shown.mode()
    }

    #[must_use]
    pub fn alignment(&self) -> Option<Alignment> {
        self.shown.alignment()
    }

    #[must_use]
    pub fn content(&self) -> Option<&PreviewContent> {
        self.shown.content()
    }

    /// Generation of the preview currently shown, `0` if none yet.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
