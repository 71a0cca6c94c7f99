//! Input file acceptance and reading.
//!
//! Only tab-separated files are merged. A file is accepted when its extension (or, for callers
//! that have one, its media type) says it is TSV; anything else is rejected with
//! [`MergeError::RejectedInput`] and must not be passed to the merger.

use std::fs;
use std::path::Path;

use crate::error::{MergeError, MergeResult};

const UTF8_BOM: char = '\u{feff}';

/// Input formats the merger accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Tab-separated values.
    Tsv,
}

impl InputFormat {
    /// Parse an input format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "tsv" => Some(Self::Tsv),
            _ => None,
        }
    }

    /// Parse an input format from a media type such as `text/tab-separated-values`.
    ///
    /// Parameters (`; charset=utf-8`) are ignored.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "text/tab-separated-values" | "text/tsv" => Some(Self::Tsv),
            _ => None,
        }
    }
}

/// Decide whether `path` may be ingested, judging by its extension.
pub fn accept_path(path: &Path) -> MergeResult<InputFormat> {
    accept_source(path, None)
}

/// Decide whether `path` may be ingested.
///
/// A file is accepted when its declared `media_type` names TSV, or failing that, when its
/// extension does.
pub fn accept_source(path: &Path, media_type: Option<&str>) -> MergeResult<InputFormat> {
    if let Some(format) = media_type.and_then(InputFormat::from_media_type) {
        return Ok(format);
    }

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| MergeError::RejectedInput {
            path: path.to_path_buf(),
            reason: "only TSV files are supported (file has no extension)".to_string(),
        })?;

    InputFormat::from_extension(ext).ok_or_else(|| MergeError::RejectedInput {
        path: path.to_path_buf(),
        reason: format!("only TSV files are supported (got '.{ext}')"),
    })
}

/// Read the whole of `path` as UTF-8 text, dropping a leading byte-order mark.
pub fn read_source(path: &Path) -> MergeResult<String> {
    let bytes = fs::read(path)?;
    let mut text = String::from_utf8(bytes).map_err(|_| MergeError::InvalidEncoding {
        path: path.to_path_buf(),
    })?;
    if text.starts_with(UTF8_BOM) {
        text.replace_range(..UTF8_BOM.len_utf8(), "");
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{InputFormat, accept_path, accept_source};
    use crate::error::MergeError;

    #[test]
    fn tsv_extension_is_accepted_case_insensitively() {
        assert_eq!(accept_path(Path::new("a/b.tsv")).unwrap(), InputFormat::Tsv);
        assert_eq!(accept_path(Path::new("B.TSV")).unwrap(), InputFormat::Tsv);
    }

    #[test]
    fn other_extensions_are_rejected() {
        let err = accept_path(Path::new("people.csv")).unwrap_err();
        assert!(matches!(err, MergeError::RejectedInput { .. }));
        assert!(err.to_string().contains("only TSV files are supported"));

        assert!(accept_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn media_types_match_known_tsv_names() {
        assert_eq!(
            InputFormat::from_media_type("text/tab-separated-values"),
            Some(InputFormat::Tsv)
        );
        assert_eq!(
            InputFormat::from_media_type("text/tsv; charset=utf-8"),
            Some(InputFormat::Tsv)
        );
        assert_eq!(InputFormat::from_media_type("text/csv"), None);
    }

    #[test]
    fn declared_media_type_accepts_any_file_name() {
        let path = Path::new("export.txt");
        assert_eq!(
            accept_source(path, Some("text/tab-separated-values")).unwrap(),
            InputFormat::Tsv
        );
        assert!(accept_source(path, Some("text/plain")).is_err());
        assert_eq!(accept_source(Path::new("a.tsv"), Some("text/plain")).unwrap(), InputFormat::Tsv);
        assert!(accept_source(path, None).is_err());
    }
}
