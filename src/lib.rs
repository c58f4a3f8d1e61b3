//! SVG Design Inspector - structural checks for uploaded SVG designs
//!
//! This library parses SVG markup, measures the rectangles placed directly
//! under the `<svg>` root against its declared canvas, and reports coverage,
//! out-of-bounds rectangles and an overall status. Analyses can be kept in a
//! [`DesignStore`] and drawn as a scaled preview.
//!
//! # Example
//!
//! ```rust
//! use svg_design_inspector::{analyze, DesignStatus};
//!
//! let result = analyze(
//!     r#"<svg width="100" height="100"><rect width="50" height="50"/></svg>"#,
//!     "logo.svg",
//! ).unwrap();
//! assert_eq!(result.status(), DesignStatus::Valid);
//! assert_eq!(result.coverage_ratio(), 0.25);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod intake;
pub mod parser;
pub mod preview;
pub mod report;
pub mod store;

pub use analysis::{
    analyze, AnalysisResult, Canvas, DesignIssue, DesignStatus, RectIssue, RectItem, RectSpec,
};
pub use config::{Config, ConfigError, StorageConfig};
pub use error::{MalformedInputError, ParseError};
pub use intake::{Intake, IntakeError, StoredUpload};
pub use preview::{render_preview, PreviewConfig, Viewport};
pub use store::{DesignRecord, DesignStore, JsonDirStore, MemoryStore, StoreError};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Errors from the end-to-end flows that read files or touch storage
#[derive(Debug, Error)]
pub enum DesignError {
    /// The SVG has no usable root element
    #[error(transparent)]
    Malformed(#[from] MalformedInputError),

    /// The upload was refused or could not be written
    #[error(transparent)]
    Intake(#[from] IntakeError),

    /// The record could not be stored or read back
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A file could not be read
    #[error("Error reading file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A file could not be written
    #[error("Error writing file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No stored design has this id
    #[error("no design with id '{id}'")]
    NotFound { id: String },
}

/// Fetch a stored design, treating a missing one as an error
pub fn find_design<S: DesignStore + ?Sized>(store: &S, id: &str) -> Result<DesignRecord, DesignError> {
    store
        .get(id)?
        .ok_or_else(|| DesignError::NotFound { id: id.to_string() })
}

/// Analyze an SVG file on disk, using its file name as the result filename
pub fn analyze_file(path: &Path) -> Result<AnalysisResult, DesignError> {
    let bytes = std::fs::read(path).map_err(|source| DesignError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(analyze(&text, &filename)?)
}

/// Accept an upload, analyze it and store the resulting record
///
/// The upload is written to the intake directory before analysis; a file
/// that turns out to be malformed stays there and no record is created.
///
/// # Example
///
/// ```rust
/// use svg_design_inspector::{ingest, DesignStore, Intake, MemoryStore};
///
/// let dir = std::env::temp_dir().join("svg-design-inspector-doctest");
/// let intake = Intake::new(&dir);
/// let mut store = MemoryStore::new();
///
/// let record = ingest(
///     &intake,
///     &mut store,
///     br#"<svg width="10" height="10"><rect x="5" width="10" height="1"/></svg>"#,
///     "wide.svg",
///     Some("image/svg+xml"),
/// ).unwrap();
/// assert_eq!(record.analysis.status().as_str(), "out_of_bounds");
/// assert_eq!(store.list().unwrap().len(), 1);
/// ```
pub fn ingest<S: DesignStore + ?Sized>(
    intake: &Intake,
    store: &mut S,
    bytes: &[u8],
    original_name: &str,
    content_type: Option<&str>,
) -> Result<DesignRecord, DesignError> {
    let upload = intake.accept(bytes, original_name, content_type)?;
    let text = String::from_utf8_lossy(bytes);
    let analysis = analyze(&text, original_name)?;
    let record = store.insert(&upload.path.to_string_lossy(), analysis)?;
    info!(
        id = %record.id,
        filename = original_name,
        status = %record.analysis.status(),
        "ingested design"
    );
    Ok(record)
}
