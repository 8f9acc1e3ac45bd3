//! Document kind classification by file extension

use crate::core::error::DomainError;
use std::path::Path;

/// Extensions picked up by bulk runs (compared case-insensitively)
pub const ELIGIBLE_EXTENSIONS: [&str; 3] = ["htm", "html", "txt"];

/// How a document's bytes are turned into text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Html,
    PlainText,
}

impl DocumentKind {
    /// Classify a path by its extension.
    ///
    /// Anything outside `.htm`, `.html`, `.txt` is rejected so the caller
    /// never attempts extraction.
    pub fn from_path(path: &Path) -> Result<Self, DomainError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("htm") | Some("html") => Ok(DocumentKind::Html),
            Some("txt") => Ok(DocumentKind::PlainText),
            _ => Err(DomainError::UnsupportedFileType(
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
            )),
        }
    }

    /// Whether a path would be accepted by [`DocumentKind::from_path`]
    pub fn is_eligible(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Html => "html",
            DocumentKind::PlainText => "text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_html_variants() {
        assert_eq!(DocumentKind::from_path(Path::new("a.html")).unwrap(), DocumentKind::Html);
        assert_eq!(DocumentKind::from_path(Path::new("a.HTM")).unwrap(), DocumentKind::Html);
        assert_eq!(
            DocumentKind::from_path(Path::new("dir/b_2.TxT")).unwrap(),
            DocumentKind::PlainText
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let err = DocumentKind::from_path(Path::new("scan_1.pdf")).unwrap_err();
        assert_eq!(err, DomainError::UnsupportedFileType("scan_1.pdf".into()));
        assert!(!DocumentKind::is_eligible(Path::new("noext")));
        assert!(!DocumentKind::is_eligible(Path::new("archive.html.zip")));
    }
}
