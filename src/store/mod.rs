//! Persistence for analyzed designs
//!
//! A store assigns each analysis an id and creation time, keeps it, and hands
//! records back by id or as a newest-first list. Records are never updated.

mod file;
mod memory;

pub use file::JsonDirStore;
pub use memory::MemoryStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::analysis::AnalysisResult;

/// Errors that can occur while reading or writing records
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("design store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("design record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A stored design: the analysis plus the fields the store assigns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRecord {
    pub id: String,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
}

impl DesignRecord {
    /// Assign a fresh id and the current time
    pub fn new(file_path: impl Into<String>, analysis: AnalysisResult) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            file_path: file_path.into(),
            created_at: Utc::now(),
            analysis,
        }
    }
}

/// Storage backend for design records
pub trait DesignStore {
    /// Store an analysis and return the record that was written
    fn insert(&mut self, file_path: &str, analysis: AnalysisResult) -> Result<DesignRecord, StoreError>;

    /// All records, newest first
    fn list(&self) -> Result<Vec<DesignRecord>, StoreError>;

    /// The record with this id, or `None` if there is none
    fn get(&self, id: &str) -> Result<Option<DesignRecord>, StoreError>;
}

/// Order records newest first; ties keep their existing relative order
pub(crate) fn sort_newest_first(records: &mut [DesignRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
