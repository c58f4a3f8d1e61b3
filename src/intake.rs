//! Upload intake: accept SVG files and place them in the uploads directory

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;
use tracing::debug;

/// Content type accepted for uploads
pub const SVG_MIME_TYPE: &str = "image/svg+xml";

/// File extension accepted for uploads (compared case-insensitively)
pub const SVG_EXTENSION: &str = "svg";

/// Errors that can occur while accepting an upload
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Only .svg files are accepted (got '{filename}')")]
    NotSvg { filename: String },
    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// An upload written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct StoredUpload {
    pub path: PathBuf,
    pub original_name: String,
}

/// Whether an upload looks like an SVG by content type or extension
pub fn is_svg_upload(filename: &str, content_type: Option<&str>) -> bool {
    let by_type = content_type == Some(SVG_MIME_TYPE);
    let by_extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(SVG_EXTENSION));
    by_type || by_extension
}

/// Name an upload is stored under: `<stem>-<unix millis>-<suffix><.ext>`
///
/// Only the final path component of `original` is used.
pub fn stored_file_name(original: &str, now: DateTime<Utc>, suffix: u32) -> String {
    let path = Path::new(original);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    format!("{}-{}-{}{}", stem, now.timestamp_millis(), suffix, extension)
}

/// Writes accepted uploads into one directory
#[derive(Debug, Clone)]
pub struct Intake {
    uploads_dir: PathBuf,
}

impl Intake {
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
        }
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    /// Check an upload and write it under a unique name
    pub fn accept(
        &self,
        bytes: &[u8],
        original_name: &str,
        content_type: Option<&str>,
    ) -> Result<StoredUpload, IntakeError> {
        if !is_svg_upload(original_name, content_type) {
            return Err(IntakeError::NotSvg {
                filename: original_name.to_string(),
            });
        }

        fs::create_dir_all(&self.uploads_dir)?;
        let suffix = rand::thread_rng().gen_range(0..1_000_000_000);
        let path = self
            .uploads_dir
            .join(stored_file_name(original_name, Utc::now(), suffix));
        fs::write(&path, bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "upload stored");

        Ok(StoredUpload {
            path,
            original_name: original_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_accepts_by_extension_or_type() {
        assert!(is_svg_upload("logo.svg", None));
        assert!(is_svg_upload("LOGO.SVG", Some("application/octet-stream")));
        assert!(is_svg_upload("blob", Some("image/svg+xml")));
        assert!(!is_svg_upload("photo.png", Some("image/png")));
        assert!(!is_svg_upload("svg", None));
    }

    #[test]
    fn test_stored_file_name() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            stored_file_name("logo.svg", now, 42),
            "logo-1700000000123-42.svg"
        );
        assert_eq!(
            stored_file_name("../../etc/evil.svg", now, 7),
            "evil-1700000000123-7.svg"
        );
        assert_eq!(stored_file_name("noext", now, 1), "noext-1700000000123-1");
    }

    #[test]
    fn test_accept_rejects_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let intake = Intake::new(dir.path());
        let err = intake.accept(b"x", "notes.txt", Some("text/plain")).unwrap_err();
        assert!(matches!(err, IntakeError::NotSvg { .. }));
        assert_eq!(err.to_string(), "Only .svg files are accepted (got 'notes.txt')");
    }

    #[test]
    fn test_accept_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let intake = Intake::new(dir.path().join("uploads"));
        let upload = intake.accept(b"<svg/>", "a.svg", None).unwrap();
        assert!(upload.path.starts_with(dir.path().join("uploads")));
        assert_eq!(fs::read(&upload.path).unwrap(), b"<svg/>");
        assert_eq!(upload.original_name, "a.svg");
    }
}
