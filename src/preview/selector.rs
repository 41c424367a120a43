// SPDX-License-Identifier: MPL-2.0
//! Preview mode selection for a single file.
//!
//! JSON files become indented text, anything the raster decoder accepts
//! becomes a thumbnail, and everything else hides the pane.

use super::json::{is_json_path, render_json_file};
use crate::application::port::RasterDecoder;
use crate::config::PreviewConfig;
use crate::diagnostics::{file_label, DiagnosticEventKind, DiagnosticsHandle, ShownMode};
use crate::domain::preview::{JsonIndent, Preview, PreviewImage, Thumbnail, Viewport};
use crate::error::PreviewError;
use crate::infrastructure::ImageRsDecoder;
use image_rs::GenericImageView;
use std::path::Path;
use std::time::Instant;

/// Chooses and builds the preview for a selected file.
#[derive(Debug, Clone)]
pub struct PreviewSelector<D = ImageRsDecoder> {
    decoder: D,
    viewport: Viewport,
    indent: JsonIndent,
    text_limit: Option<u64>,
    diagnostics: DiagnosticsHandle,
}

impl PreviewSelector<ImageRsDecoder> {
    /// Selector using the `image` crate decoder.
    #[must_use]
    pub fn new(config: &PreviewConfig) -> Self {
        Self::with_decoder(ImageRsDecoder::new(), config)
    }
}

impl Default for PreviewSelector<ImageRsDecoder> {
    fn default() -> Self {
        Self::new(&PreviewConfig::default())
    }
}

impl<D: RasterDecoder> PreviewSelector<D> {
    #[must_use]
    pub fn with_decoder(decoder: D, config: &PreviewConfig) -> Self {
        Self {
            decoder,
            viewport: config.viewport(),
            indent: config.indent(),
            text_limit: config.text_limit(),
            diagnostics: DiagnosticsHandle::disconnected(),
        }
    }

    /// Sends shown and failure events to `handle`.
    #[must_use]
    pub fn with_diagnostics(mut self, handle: DiagnosticsHandle) -> Self {
        self.diagnostics = handle;
        self
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Decides how `path` is previewed.
    ///
    /// - `*.json` (case-insensitive): pretty-printed text, keys in file order
    /// - decodable image: thumbnail scaled to fit the viewport
    /// - anything else, including undecodable images: [`Preview::none`]
    ///
    /// # Errors
    ///
    /// Only JSON files fail: unreadable, oversized or invalid JSON returns
    /// a [`PreviewError`]. Image decode failures are not errors.
    pub fn select_preview(&self, path: &Path) -> Result<Preview, PreviewError> {
        let started = Instant::now();

        let preview = if is_json_path(path) {
            match render_json_file(path, self.indent, self.text_limit) {
                Ok(text) => Preview::text(text),
                Err(err) => {
                    self.diagnostics
                        .log(DiagnosticEventKind::preview_failed(&err));
                    return Err(err);
                }
            }
        } else {
            self.image_preview(path)
        };

        self.diagnostics.log(DiagnosticEventKind::PreviewShown {
            mode: ShownMode::from(preview.mode()),
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            file: file_label(path),
        });

        Ok(preview)
    }

    /// Like [`select_preview`](Self::select_preview), but a JSON failure
    /// hides the pane instead of surfacing an error.
    #[must_use]
    pub fn preview_or_none(&self, path: &Path) -> Preview {
        self.select_preview(path).unwrap_or_default()
    }

    fn image_preview(&self, path: &Path) -> Preview {
        let image = match self.decoder.decode(path) {
            Ok(image) => image,
            Err(err) => {
                self.diagnostics.log(DiagnosticEventKind::decode_failed(&err));
                return Preview::none();
            }
        };

        let (source_width, source_height) = image.dimensions();
        let scaled = self.decoder.scale_to_fit(&image, self.viewport).to_rgba8();
        let (width, height) = scaled.dimensions();

        Preview::image(Thumbnail {
            image: PreviewImage::from_rgba(width, height, scaled.into_raw()),
            source_width,
            source_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticsCollector, FailureCategory};
    use crate::domain::preview::{Alignment, PreviewMode};
    use crate::error::DecodeFailure;
    use image_rs::{DynamicImage, RgbImage};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let image = RgbImage::from_pixel(width, height, image_rs::Rgb([10, 200, 30]));
        image
            .save_with_format(&path, image_rs::ImageFormat::Png)
            .expect("write png");
        path
    }

    #[test]
    fn json_file_becomes_top_left_text() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("labels.json");
        fs::write(&path, r#"{"b":1,"a":2}"#).expect("write json");

        let preview = PreviewSelector::default().select_preview(&path).expect("valid json");

        assert_eq!(preview.mode(), PreviewMode::Text);
        assert_eq!(preview.alignment(), Some(Alignment::TopLeft));
        assert_eq!(preview.as_text(), Some("{\n    \"b\": 1,\n    \"a\": 2\n}"));
    }

    #[test]
    fn uppercase_json_suffix_is_text() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("LABELS.JSON");
        fs::write(&path, "[]").expect("write json");

        let preview = PreviewSelector::default().select_preview(&path).expect("valid json");
        assert_eq!(preview.mode(), PreviewMode::Text);
    }

    #[test]
    fn wide_png_is_scaled_into_viewport() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = write_png(temp_dir.path(), "wide.png", 1000, 500);

        let preview = PreviewSelector::default().select_preview(&path).expect("no error");

        assert_eq!(preview.mode(), PreviewMode::Image);
        assert_eq!(preview.alignment(), Some(Alignment::Center));
        let thumbnail = preview.as_thumbnail().expect("thumbnail");
        assert_eq!(thumbnail.display_size(), (270, 135));
        assert_eq!((thumbnail.source_width, thumbnail.source_height), (1000, 500));
        assert_eq!(thumbnail.image.rgba_bytes().len(), 270 * 135 * 4);
    }

    #[test]
    fn unknown_file_hides_pane() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "plain text, not an image").expect("write txt");

        let preview = PreviewSelector::default().select_preview(&path).expect("no error");

        assert_eq!(preview.mode(), PreviewMode::None);
        assert!(!preview.is_visible());
        assert!(preview.content().is_none());
    }

    #[test]
    fn missing_image_hides_pane() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let preview = PreviewSelector::default()
            .select_preview(&temp_dir.path().join("gone.png"))
            .expect("no error");
        assert_eq!(preview.mode(), PreviewMode::None);
    }

    #[test]
    fn invalid_json_is_error_but_or_none_hides() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{\"a\": ").expect("write json");

        let selector = PreviewSelector::default();
        let err = selector.select_preview(&path).unwrap_err();
        assert!(matches!(err, PreviewError::Parse(_)));

        let preview = selector.preview_or_none(&path);
        assert_eq!(preview.mode(), PreviewMode::None);
    }

    #[test]
    fn oversized_json_is_refused() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("big.json");
        fs::write(&path, format!("\"{}\"", "x".repeat(4096))).expect("write json");

        let config = PreviewConfig {
            max_json_bytes: Some(1024),
            ..PreviewConfig::default()
        };
        let err = PreviewSelector::new(&config).select_preview(&path).unwrap_err();
        assert!(matches!(err, PreviewError::TooLarge { limit: 1024, .. }));
    }

    #[test]
    fn large_json_is_text_by_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("scan.json");
        let payload = "A".repeat(9 * 1024 * 1024);
        fs::write(&path, format!("{{\"imageData\": \"{payload}\"}}")).expect("write json");

        let selector = PreviewSelector::default();
        let preview = selector.select_preview(&path).expect("large json renders");
        assert_eq!(preview.mode(), PreviewMode::Text);
        assert_eq!(selector.preview_or_none(&path).mode(), PreviewMode::Text);
    }

    #[test]
    fn custom_pane_geometry_changes_viewport() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = write_png(temp_dir.path(), "square.png", 64, 64);

        let config = PreviewConfig {
            pane_width: 200,
            pane_height: 120,
            margin: 20,
            ..PreviewConfig::default()
        };
        let preview = PreviewSelector::new(&config).select_preview(&path).expect("no error");
        assert_eq!(
            preview.as_thumbnail().expect("thumbnail").display_size(),
            (100, 100)
        );
    }

    struct FailingDecoder;

    impl RasterDecoder for FailingDecoder {
        fn decode(&self, _path: &Path) -> Result<DynamicImage, DecodeFailure> {
            Err(DecodeFailure::Corrupted("bad header".into()))
        }
    }

    #[test]
    fn events_are_logged() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let json = temp_dir.path().join("ok.json");
        fs::write(&json, "{}").expect("write json");

        let mut collector = DiagnosticsCollector::default();
        let selector = PreviewSelector::with_decoder(FailingDecoder, &PreviewConfig::default())
            .with_diagnostics(collector.handle());

        let _ = selector.select_preview(&json);
        let _ = selector.select_preview(&temp_dir.path().join("scan.png"));
        collector.process_pending();

        let kinds: Vec<_> = collector.iter().map(|e| e.kind.clone()).collect();
        assert!(matches!(
            &kinds[0],
            DiagnosticEventKind::PreviewShown { mode: ShownMode::Text, file: Some(name), .. }
                if name == "ok.json"
        ));
        assert!(matches!(
            &kinds[1],
            DiagnosticEventKind::Failure { category: FailureCategory::Decode, .. }
        ));
        assert!(matches!(
            &kinds[2],
            DiagnosticEventKind::PreviewShown { mode: ShownMode::None, .. }
        ));
    }
}
