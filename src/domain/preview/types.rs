// SPDX-License-Identifier: MPL-2.0
//! Core preview types for the domain layer.
//!
//! A [`Preview`] is the value a host applies to its preview pane. It carries
//! the mode, the content, and through the mode the alignment policy.

use std::sync::Arc;

/// Which renderable the host pane displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewMode {
    /// Pretty-printed JSON text.
    Text,
    /// Scaled image thumbnail.
    Image,
    /// No preview applies; the pane is hidden.
    None,
}

impl PreviewMode {
    /// Returns the alignment the host must use for this mode.
    ///
    /// `None` mode hides the pane, so there is nothing to align.
    #[must_use]
    pub fn alignment(self) -> Option<Alignment> {
        match self {
            PreviewMode::Text => Some(Alignment::TopLeft),
            PreviewMode::Image => Some(Alignment::Center),
            PreviewMode::None => None,
        }
    }

    /// Stable lowercase name, used in diagnostics and CLI output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PreviewMode::Text => "text",
            PreviewMode::Image => "image",
            PreviewMode::None => "none",
        }
    }
}

/// Content alignment inside the preview pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    TopLeft,
    Center,
}

/// Decoded RGBA pixels without presentation dependencies.
///
/// The host converts this into its toolkit's image handle.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    width: u32,
    height: u32,
    /// RGBA pixel data (4 bytes per pixel), shared so previews clone cheaply.
    rgba_bytes: Arc<Vec<u8>>,
}

impl PreviewImage {
    /// Creates an image from dimensions and owned RGBA pixel data.
    ///
    /// # Panics
    ///
    /// Panics if the pixel data length doesn't match `width * height * 4`.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, rgba_bytes: Vec<u8>) -> Self {
        let expected_len = (width as usize) * (height as usize) * 4;
        assert_eq!(
            rgba_bytes.len(),
            expected_len,
            "RGBA data length mismatch: expected {expected_len}, got {}",
            rgba_bytes.len()
        );

        Self {
            width,
            height,
            rgba_bytes: Arc::new(rgba_bytes),
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }

    /// Width over height; 1.0 for a zero height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            f64::from(self.width) / f64::from(self.height)
        }
    }
}

impl PartialEq for PreviewImage {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.rgba_bytes == other.rgba_bytes
    }
}

impl Eq for PreviewImage {}

/// Scaled image ready for display, plus the size of the decoded source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    /// Pixels at display size.
    pub image: PreviewImage,
    /// Width of the decoded source image.
    pub source_width: u32,
    /// Height of the decoded source image.
    pub source_height: u32,
}

impl Thumbnail {
    /// Display dimensions `(width, height)`.
    #[must_use]
    pub fn display_size(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}

/// Renderable produced for a single file selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewContent {
    /// UTF-8 text (pretty-printed JSON).
    Text(String),
    /// Decoded and scaled image.
    Image(Thumbnail),
}

/// Outcome of a preview decision: a mode and, unless the mode is
/// [`PreviewMode::None`], its content.
///
/// The fields are private so a `None` preview can never carry content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    mode: PreviewMode,
    content: Option<PreviewContent>,
}

impl Preview {
    /// Text preview.
    #[must_use]
    pub fn text(text: String) -> Self {
        Self {
            mode: PreviewMode::Text,
            content: Some(PreviewContent::Text(text)),
        }
    }

    /// Image preview.
    #[must_use]
    pub fn image(thumbnail: Thumbnail) -> Self {
        Self {
            mode: PreviewMode::Image,
            content: Some(PreviewContent::Image(thumbnail)),
        }
    }

    /// No preview.
    #[must_use]
    pub fn none() -> Self {
        Self {
            mode: PreviewMode::None,
            content: None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> PreviewMode {
        self.mode
    }

    #[must_use]
    pub fn content(&self) -> Option<&PreviewContent> {
        self.content.as_ref()
    }

    /// Consumes the preview, returning its content.
    #[must_use]
    pub fn into_content(self) -> Option<PreviewContent> {
        self.content
    }

    #[must_use]
    pub fn alignment(&self) -> Option<Alignment> {
        self.mode.alignment()
    }

    /// Whether the host should show its preview pane.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.mode != PreviewMode::None
    }

    /// Returns the text content, if this is a text preview.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            Some(PreviewContent::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Returns the thumbnail, if this is an image preview.
    #[must_use]
    pub fn as_thumbnail(&self) -> Option<&Thumbnail> {
        match &self.content {
            Some(PreviewContent::Image(thumbnail)) => Some(thumbnail),
            _ => None,
        }
    }
}

impl Default for Preview {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_implies_alignment() {
        assert_eq!(PreviewMode::Text.alignment(), Some(Alignment::TopLeft));
        assert_eq!(PreviewMode::Image.alignment(), Some(Alignment::Center));
        assert_eq!(PreviewMode::None.alignment(), None);
    }

    #[test]
    fn none_preview_is_hidden_and_empty() {
        let preview = Preview::none();
        assert!(!preview.is_visible());
        assert!(preview.content().is_none());
        assert_eq!(preview, Preview::default());
    }

    #[test]
    fn text_preview_exposes_text() {
        let preview = Preview::text("{}".to_string());
        assert_eq!(preview.mode(), PreviewMode::Text);
        assert_eq!(preview.as_text(), Some("{}"));
        assert!(preview.as_thumbnail().is_none());
        assert!(preview.is_visible());
    }

    #[test]
    fn image_preview_reports_display_size() {
        let thumbnail = Thumbnail {
            image: PreviewImage::from_rgba(2, 1, vec![0u8; 8]),
            source_width: 20,
            source_height: 10,
        };
        let preview = Preview::image(thumbnail);
        assert_eq!(preview.alignment(), Some(Alignment::Center));
        let thumb = preview.as_thumbnail().expect("image content");
        assert_eq!(thumb.display_size(), (2, 1));
        assert!((thumb.image.aspect_ratio() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    #[should_panic(expected = "RGBA data length mismatch")]
    fn preview_image_rejects_short_buffer() {
        let _ = PreviewImage::from_rgba(4, 4, vec![0u8; 10]);
    }

    #[test]
    fn mode_names_are_stable() {
        assert_eq!(PreviewMode::Text.as_str(), "text");
        assert_eq!(PreviewMode::Image.as_str(), "image");
        assert_eq!(PreviewMode::None.as_str(), "none");
    }
}
