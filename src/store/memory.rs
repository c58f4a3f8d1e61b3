use tracing::debug;

use crate::analysis::AnalysisResult;

use super::{sort_newest_first, DesignRecord, DesignStore, StoreError};

/// Keeps records in memory; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<DesignRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DesignStore for MemoryStore {
    fn insert(&mut self, file_path: &str, analysis: AnalysisResult) -> Result<DesignRecord, StoreError> {
        let record = DesignRecord::new(file_path, analysis);
        debug!(id = %record.id, "stored design in memory");
        self.records.push(record.clone());
        Ok(record)
    }

    fn list(&self) -> Result<Vec<DesignRecord>, StoreError> {
        // Reverse first so records created in the same instant list latest-inserted first
        let mut records: Vec<_> = self.records.iter().rev().cloned().collect();
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn get(&self, id: &str) -> Result<Option<DesignRecord>, StoreError> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }
}
