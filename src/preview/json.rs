// SPDX-License-Identifier: MPL-2.0
//! JSON text preview.
//!
//! Keys keep their file order and numbers keep their source digits
//! (`serde_json` is built with `preserve_order` and `arbitrary_precision`).

use crate::domain::preview::JsonIndent;
use crate::error::PreviewError;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use std::fs;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Whether `path` names a JSON file (case-insensitive `.json` suffix).
///
/// A bare `.json` file name counts too.
#[must_use]
pub fn is_json_path(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(".json"))
        .unwrap_or(false)
}

/// Re-serializes JSON bytes with the given indentation.
///
/// # Errors
///
/// Returns [`PreviewError::Parse`] if `bytes` is not valid UTF-8 JSON.
pub fn render_json(bytes: &[u8], indent: JsonIndent) -> Result<String, PreviewError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let value: Value = serde_json::from_slice(bytes)?;

    let indent = indent.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let formatter = PrettyFormatter::with_indent(&indent);
    let mut serializer = Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| PreviewError::Parse(e.to_string()))?;

    String::from_utf8(out).map_err(|e| PreviewError::Parse(e.to_string()))
}

/// Reads and renders a JSON file.
///
/// With `limit` set, larger files are refused before reading.
///
/// # Errors
///
/// Returns [`PreviewError::Read`] if the file cannot be read,
/// [`PreviewError::TooLarge`] above the limit and [`PreviewError::Parse`]
/// for invalid JSON.
pub fn render_json_file(
    path: &Path,
    indent: JsonIndent,
    limit: Option<u64>,
) -> Result<String, PreviewError> {
    if let Some(limit) = limit {
        let size = fs::metadata(path)
            .map_err(|e| PreviewError::Read(e.to_string()))?
            .len();
        if size > limit {
            return Err(PreviewError::TooLarge { size, limit });
        }
    }

    let bytes = fs::read(path).map_err(|e| PreviewError::Read(e.to_string()))?;
    render_json(&bytes, indent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn keys_keep_file_order_with_four_space_indent() {
        let text = render_json(br#"{"b":1,"a":2}"#, JsonIndent::default()).expect("valid json");
        assert_eq!(text, "{\n    \"b\": 1,\n    \"a\": 2\n}");
    }

    #[test]
    fn nested_structure_is_preserved() {
        let source =
            r#"{"shapes":[{"label":"cat","points":[[1,2],[3.5,4]]}],"flags":{},"version":"5.0"}"#;
        let text = render_json(source.as_bytes(), JsonIndent::default()).expect("valid json");

        let original: Value = serde_json::from_str(source).expect("source parses");
        let reparsed: Value = serde_json::from_str(&text).expect("output parses");
        assert_eq!(original, reparsed);

        let keys: Vec<_> = reparsed
            .as_object()
            .expect("object")
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["shapes", "flags", "version"]);
        assert!(text.contains("\"flags\": {}"));
    }

    #[test]
    fn numbers_keep_their_source_digits() {
        let source = br#"{"id":123456789012345678901234567890,"scale":0.10}"#;
        let text = render_json(source, JsonIndent::default()).expect("valid json");
        assert_eq!(
            text,
            "{\n    \"id\": 123456789012345678901234567890,\n    \"scale\": 0.10\n}"
        );
    }

    #[test]
    fn custom_indent_is_used() {
        let text = render_json(b"[1]", JsonIndent::new(2)).expect("valid json");
        assert_eq!(text, "[\n  1\n]");
    }

    #[test]
    fn scalar_documents_are_rendered() {
        assert_eq!(render_json(b" 42 ", JsonIndent::default()).unwrap(), "42");
        assert_eq!(render_json(b"\"hi\"", JsonIndent::default()).unwrap(), "\"hi\"");
    }

    #[test]
    fn non_ascii_text_stays_utf8() {
        let text = render_json("{\"label\":\"chat noir é\"}".as_bytes(), JsonIndent::default())
            .expect("valid json");
        assert!(text.contains("chat noir é"));
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"{}");
        assert_eq!(render_json(&bytes, JsonIndent::default()).unwrap(), "{}");
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = render_json(b"{\"a\":", JsonIndent::default()).unwrap_err();
        assert!(matches!(err, PreviewError::Parse(_)));
    }

    #[test]
    fn json_suffix_is_case_insensitive() {
        assert!(is_json_path(Path::new("/data/config.json")));
        assert!(is_json_path(Path::new("/data/ANNOTATION.JSON")));
        assert!(is_json_path(Path::new("/data/.json")));
        assert!(!is_json_path(Path::new("/data/config.jsonl")));
        assert!(!is_json_path(Path::new("/data/image.png")));
    }

    #[test]
    fn oversized_file_is_refused() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("big.json");
        fs::write(&path, format!("[{}]", "0,".repeat(100) + "0")).expect("write");

        let err = render_json_file(&path, JsonIndent::default(), Some(16)).unwrap_err();
        assert!(matches!(err, PreviewError::TooLarge { limit: 16, .. }));
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("gone.json");
        let err = render_json_file(&path, JsonIndent::default(), None).unwrap_err();
        assert!(matches!(err, PreviewError::Read(_)));
    }

    #[test]
    fn large_file_renders_without_limit() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("scene.json");
        let image_data = "A".repeat(9 * 1024 * 1024);
        fs::write(&path, format!(r#"{{"version":"5.0","imageData":"{image_data}"}}"#))
            .expect("write");

        let text = render_json_file(&path, JsonIndent::default(), None).expect("valid json");
        assert!(text.starts_with("{\n    \"version\": \"5.0\",\n    \"imageData\": \"AAAA"));
    }
}
