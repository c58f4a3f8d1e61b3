use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::AnalysisResult;

use super::{DesignRecord, DesignStore, StoreError};

/// Stores each record as `<id>.json` in one directory
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Open a store, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &Uuid) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

/// A record and the time its file was last written
fn read_record(path: &Path) -> Result<(DesignRecord, Option<SystemTime>), StoreError> {
    let text = fs::read_to_string(path)?;
    let record = serde_json::from_str(&text)?;
    let written = fs::metadata(path).and_then(|m| m.modified()).ok();
    Ok((record, written))
}

impl DesignStore for JsonDirStore {
    fn insert(&mut self, file_path: &str, analysis: AnalysisResult) -> Result<DesignRecord, StoreError> {
        let record = DesignRecord::new(file_path, analysis);
        let path = self.dir.join(format!("{}.json", record.id));
        fs::write(&path, serde_json::to_string_pretty(&record)?)?;
        info!(id = %record.id, path = %path.display(), "stored design");
        Ok(record)
    }

    fn list(&self) -> Result<Vec<DesignRecord>, StoreError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_record(&path) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable design record"),
            }
        }
        // Records created in the same instant list the most recently written first
        entries.sort_by(|(a, a_written), (b, b_written)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b_written.cmp(a_written))
        });
        Ok(entries.into_iter().map(|(record, _)| record).collect())
    }

    fn get(&self, id: &str) -> Result<Option<DesignRecord>, StoreError> {
        // Anything that is not a UUID cannot name a record (and cannot escape the directory)
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };
        match fs::read_to_string(self.record_path(&id)) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    #[test]
    fn test_get_rejects_non_uuid_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDirStore::open(dir.path()).unwrap();
        assert_eq!(store.get("../etc/passwd").unwrap(), None);
        assert_eq!(store.get(&Uuid::new_v4().to_string()).unwrap(), None);
    }

    #[test]
    fn test_corrupt_records_skipped_in_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonDirStore::open(dir.path()).unwrap();
        let record = store
            .insert("uploads/a.svg", analyze("<svg/>", "a.svg").unwrap())
            .unwrap();
        fs::write(dir.path().join("garbage.json"), "{ not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed, vec![record]);
    }

    #[test]
    fn test_same_instant_lists_latest_written_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonDirStore::open(dir.path()).unwrap();
        let first = store.insert("a", analyze("<svg/>", "first.svg").unwrap()).unwrap();
        let mut second = store.insert("b", analyze("<svg/>", "second.svg").unwrap()).unwrap();

        // Give both records the same creation time, then order the files by write time
        second.created_at = first.created_at;
        let second_path = store.record_path(&Uuid::parse_str(&second.id).unwrap());
        fs::write(&second_path, serde_json::to_string_pretty(&second).unwrap()).unwrap();
        let base = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_700_000_000);
        let set_written = |path: PathBuf, at: SystemTime| {
            fs::File::options().write(true).open(path).unwrap().set_modified(at).unwrap();
        };
        set_written(store.record_path(&Uuid::parse_str(&first.id).unwrap()), base);
        set_written(second_path, base + std::time::Duration::from_secs(60));

        let ids: Vec<_> = store.list().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id.clone(), first.id.clone()]);

        set_written(store.record_path(&Uuid::parse_str(&first.id).unwrap()), base + std::time::Duration::from_secs(120));
        let ids: Vec<_> = store.list().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }
}
