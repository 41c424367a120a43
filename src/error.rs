// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Preview(PreviewError),
    Decode(DecodeFailure),
    UnsupportedRank(UnsupportedRankError),
    Picker(ChannelPickerError),
}

impl Error {
    /// Returns the i18n message key for this error.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
            Error::Preview(err) => err.i18n_key(),
            Error::Decode(err) => err.i18n_key(),
            Error::UnsupportedRank(_) => "error-unsupported-rank",
            Error::Picker(err) => err.i18n_key(),
        }
    }
}

/// Failure while producing a text preview for a JSON file.
///
/// The host recovers by clearing and hiding the preview pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    /// The file could not be read (missing, permission denied, I/O failure).
    Read(String),

    /// The file was read but is not valid JSON.
    Parse(String),

    /// The file exceeds the configured text preview size.
    TooLarge {
        /// Size of the file in bytes.
        size: u64,
        /// Configured maximum in bytes.
        limit: u64,
    },
}

impl PreviewError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            PreviewError::Read(_) => "error-preview-read",
            PreviewError::Parse(_) => "error-preview-parse",
            PreviewError::TooLarge { .. } => "error-preview-too-large",
        }
    }
}

/// Failure while decoding an image, raster or multi-plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    /// The file could not be read.
    Io(String),

    /// The decoder rejected the data.
    Corrupted(String),

    /// Decoding succeeded but produced no pixels.
    Empty {
        width: u32,
        height: u32,
    },

    /// The sample layout is not supported by the decoder.
    Unsupported(String),

    /// The image needs more memory than the decoder allows.
    TooLarge(String),
}

impl DecodeFailure {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            DecodeFailure::Io(_) => "error-decode-io",
            DecodeFailure::Corrupted(_) => "error-decode-corrupted",
            DecodeFailure::Empty { .. } => "error-decode-empty",
            DecodeFailure::Unsupported(_) => "error-decode-unsupported",
            DecodeFailure::TooLarge(_) => "error-decode-too-large",
        }
    }
}

/// A multi-plane array whose shape cannot be mapped to a channel count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedRankError {
    /// Shape of the rejected array.
    pub shape: Vec<usize>,
}

impl UnsupportedRankError {
    #[must_use]
    pub fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
        }
    }

    /// Rank of the rejected array.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }
}

/// Rejected interaction with a channel picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelPickerError {
    /// The picker already reached a terminal state.
    Closed,

    /// The picker has not been confirmed or cancelled yet.
    StillOpen,

    /// The requested index is not one of the offered options.
    IndexOutOfRange { index: usize, num_channels: usize },
}

impl ChannelPickerError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ChannelPickerError::Closed => "error-picker-closed",
            ChannelPickerError::StillOpen => "error-picker-still-open",
            ChannelPickerError::IndexOutOfRange { .. } => "error-picker-index",
        }
    }
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewError::Read(msg) => write!(f, "Cannot read file: {}", msg),
            PreviewError::Parse(msg) => write!(f, "Invalid JSON: {}", msg),
            PreviewError::TooLarge { size, limit } => {
                write!(f, "File too large for preview: {} bytes (limit {})", size, limit)
            }
        }
    }
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeFailure::Io(msg) => write!(f, "I/O error: {}", msg),
            DecodeFailure::Corrupted(msg) => write!(f, "Corrupted image data: {}", msg),
            DecodeFailure::Empty { width, height } => {
                write!(f, "Decoded image is empty: {}x{}", width, height)
            }
            DecodeFailure::Unsupported(msg) => write!(f, "Unsupported image layout: {}", msg),
            DecodeFailure::TooLarge(msg) => write!(f, "Image too large to decode: {}", msg),
        }
    }
}

impl fmt::Display for UnsupportedRankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot derive channel count from array of rank {} (shape {:?})",
            self.rank(),
            self.shape
        )
    }
}

impl fmt::Display for ChannelPickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelPickerError::Closed => write!(f, "Channel selection dialog is closed"),
            ChannelPickerError::StillOpen => {
                write!(f, "Channel selection dialog is still open")
            }
            ChannelPickerError::IndexOutOfRange {
                index,
                num_channels,
            } => write!(
                f,
                "Channel {} out of range (image has {} channels)",
                index, num_channels
            ),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Preview(e) => write!(f, "Preview Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::UnsupportedRank(e) => write!(f, "Channel Error: {}", e),
            Error::Picker(e) => write!(f, "Channel Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}
impl std::error::Error for PreviewError {}
impl std::error::Error for DecodeFailure {}
impl std::error::Error for UnsupportedRankError {}
impl std::error::Error for ChannelPickerError {}

impl From<PreviewError> for Error {
    fn from(err: PreviewError) -> Self {
        Error::Preview(err)
    }
}

impl From<DecodeFailure> for Error {
    fn from(err: DecodeFailure) -> Self {
        Error::Decode(err)
    }
}

impl From<UnsupportedRankError> for Error {
    fn from(err: UnsupportedRankError) -> Self {
        Error::UnsupportedRank(err)
    }
}

impl From<ChannelPickerError> for Error {
    fn from(err: ChannelPickerError) -> Self {
        Error::Picker(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for PreviewError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            PreviewError::Read(err.to_string())
        } else {
            PreviewError::Parse(err.to_string())
        }
    }
}

impl From<image_rs::ImageError> for DecodeFailure {
    fn from(err: image_rs::ImageError) -> Self {
        match err {
            image_rs::ImageError::IoError(e) => DecodeFailure::Io(e.to_string()),
            image_rs::ImageError::Unsupported(e) => DecodeFailure::Unsupported(e.to_string()),
            image_rs::ImageError::Limits(e) => DecodeFailure::TooLarge(e.to_string()),
            other => DecodeFailure::Corrupted(other.to_string()),
        }
    }
}

impl From<tiff::TiffError> for DecodeFailure {
    fn from(err: tiff::TiffError) -> Self {
        match err {
            tiff::TiffError::IoError(e) => DecodeFailure::Io(e.to_string()),
            tiff::TiffError::UnsupportedError(e) => DecodeFailure::Unsupported(e.to_string()),
            tiff::TiffError::LimitsExceeded => {
                DecodeFailure::TooLarge(tiff::TiffError::LimitsExceeded.to_string())
            }
            other => DecodeFailure::Corrupted(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn every_error_kind_has_its_own_message() {
        let keys = [
            Error::Io("gone".into()).i18n_key(),
            Error::Config("bad".into()).i18n_key(),
            Error::UnsupportedRank(UnsupportedRankError::new(&[3])).i18n_key(),
            Error::Picker(ChannelPickerError::Closed).i18n_key(),
            Error::Picker(ChannelPickerError::StillOpen).i18n_key(),
            Error::Decode(DecodeFailure::Empty {
                width: 0,
                height: 0,
            })
            .i18n_key(),
        ];
        assert_eq!(keys[0], "error-io");
        assert_eq!(keys[1], "error-config");
        assert_eq!(keys[2], "error-unsupported-rank");
        assert_eq!(keys[3], "error-picker-closed");
        assert_eq!(keys[4], "error-picker-still-open");
        assert_eq!(keys[5], "error-decode-empty");
    }

    #[test]
    fn json_syntax_error_maps_to_parse() {
        let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let preview: PreviewError = err.into();
        assert!(matches!(preview, PreviewError::Parse(_)));
        assert_eq!(preview.i18n_key(), "error-preview-parse");
    }

    #[test]
    fn image_io_error_maps_to_decode_io() {
        let err = image_rs::ImageError::IoError(std::io::Error::other("gone"));
        let failure: DecodeFailure = err.into();
        match failure {
            DecodeFailure::Io(message) => assert!(message.contains("gone")),
            other => panic!("expected Io failure, got {other:?}"),
        }
    }

    #[test]
    fn tiff_limits_map_to_too_large() {
        let failure: DecodeFailure = tiff::TiffError::LimitsExceeded.into();
        assert!(matches!(failure, DecodeFailure::TooLarge(_)));
        assert_eq!(failure.i18n_key(), "error-decode-too-large");
    }

    #[test]
    fn image_limits_map_to_too_large() {
        let limit = image_rs::error::LimitError::from_kind(
            image_rs::error::LimitErrorKind::InsufficientMemory,
        );
        let failure: DecodeFailure = image_rs::ImageError::Limits(limit).into();
        assert!(matches!(failure, DecodeFailure::TooLarge(_)));
    }

    #[test]
    fn unsupported_rank_reports_rank_and_shape() {
        let err = UnsupportedRankError::new(&[2, 3, 4, 5, 6]);
        assert_eq!(err.rank(), 5);
        let text = err.to_string();
        assert!(text.contains("rank 5"));
        assert!(text.contains("[2, 3, 4, 5, 6]"));
    }

    #[test]
    fn picker_error_display_mentions_channel_count() {
        let err = ChannelPickerError::IndexOutOfRange {
            index: 4,
            num_channels: 3,
        };
        assert!(err.to_string().contains("3 channels"));
        let wrapped: Error = err.into();
        assert!(matches!(wrapped, Error::Picker(_)));
    }

    #[test]
    fn empty_decode_failure_display() {
        let err = DecodeFailure::Empty {
            width: 0,
            height: 10,
        };
        assert_eq!(err.to_string(), "Decoded image is empty: 0x10");
        assert_eq!(err.i18n_key(), "error-decode-empty");
    }
}
