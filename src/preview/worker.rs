// SPDX-License-Identifier: MPL-2.0
//! Background preview production with last-selection-wins semantics.
//!
//! Each [`PreviewWorker::request`] bumps a generation counter and runs the
//! selector on tokio's blocking pool. When a ticket resolves, a newer
//! request turns its result into [`PreviewOutcome::Superseded`], so a slow
//! decode can never overwrite the pane after the user moved on.

use super::PreviewSelector;
use crate::application::port::RasterDecoder;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use crate::domain::preview::Preview;
use crate::infrastructure::ImageRsDecoder;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Result of a resolved [`PreviewTicket`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// The request is still the latest; show `preview`.
    Ready { generation: u64, preview: Preview },
    /// A newer request was made; discard.
    Superseded { generation: u64 },
}

impl PreviewOutcome {
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            PreviewOutcome::Ready { generation, .. }
            | PreviewOutcome::Superseded { generation } => *generation,
        }
    }

    #[must_use]
    pub fn into_preview(self) -> Option<Preview> {
        match self {
            PreviewOutcome::Ready { preview, .. } => Some(preview),
            PreviewOutcome::Superseded { .. } => None,
        }
    }
}

/// Runs previews off the caller's thread.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct PreviewWorker<D = ImageRsDecoder> {
    selector: Arc<PreviewSelector<D>>,
    latest: Arc<AtomicU64>,
    diagnostics: DiagnosticsHandle,
}

impl<D: RasterDecoder + 'static> PreviewWorker<D> {
    #[must_use]
    pub fn new(selector: PreviewSelector<D>) -> Self {
        Self {
            selector: Arc::new(selector),
            latest: Arc::new(AtomicU64::new(0)),
            diagnostics: DiagnosticsHandle::disconnected(),
        }
    }

    /// Sends superseded events to `handle`.
    #[must_use]
    pub fn with_diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.diagnostics = handle;
        self
    }

    /// Generation of the most recent request, `0` before the first one.
    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Starts producing the preview for `path`.
    ///
    /// Every earlier ticket that has not resolved yet becomes superseded.
    pub fn request(&self, path: impl Into<PathBuf>) -> PreviewTicket {
        let path = path.into();
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let selector = Arc::clone(&self.selector);
        let latest = Arc::clone(&self.latest);
        let handle = tokio::task::spawn_blocking(move || {
            // Skip the decode if the user already moved on while queued.
            if latest.load(Ordering::SeqCst) != generation {
                return None;
            }
            Some(selector.preview_or_none(&path))
        });

        PreviewTicket {
            generation,
            handle,
            latest: Arc::clone(&self.latest),
            diagnostics: self.diagnostics.clone(),
        }
    }
}

/// Pending preview for one request.
#[derive(Debug)]
pub struct PreviewTicket {
    generation: u64,
    handle: JoinHandle<Option<Preview>>,
    latest: Arc<AtomicU64>,
    diagnostics: DiagnosticsHandle,
}

impl PreviewTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether no newer request has been made yet.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }

    /// Waits for the preview.
    ///
    /// A panicking decoder yields an empty preview rather than an error.
    pub async fn resolve(self) -> PreviewOutcome {
        let result = self.handle.await;
        let generation = self.generation;

        if self.latest.load(Ordering::SeqCst) != generation {
            self.diagnostics
                .log(DiagnosticEventKind::PreviewSuperseded { generation });
            return PreviewOutcome::Superseded { generation };
        }

        match result {
            Ok(Some(preview)) => PreviewOutcome::Ready {
                generation,
                preview,
            },
            Ok(None) => PreviewOutcome::Superseded { generation },
            Err(err) => {
                self.diagnostics
                    .log_warning(format!("preview task failed: {err}"));
                PreviewOutcome::Ready {
                    generation,
                    preview: Preview::none(),
                }
            }
        }
    }
}
