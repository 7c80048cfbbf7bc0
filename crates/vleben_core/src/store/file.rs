//! File-system document store.
//!
//! # Responsibility
//! - Map each document kind to one JSON file in the data directory.
//! - Replace files through a temp file + rename so readers never see a torn write.
//! - Copy documents byte-for-byte into `backup/`.
//!
//! # Invariants
//! - The data directory exists once `FileStore::open` returns.
//! - Backups never modify the source documents.

use super::{BackupReport, DocumentKind, DocumentStore, StoreError, StoreResult};
use log::{error, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Subdirectory of the data directory holding backup copies.
pub const BACKUP_DIR_NAME: &str = "backup";
const TEMP_SUFFIX: &str = "tmp";

/// Document store rooted at one data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) the data directory.
    ///
    /// # Side effects
    /// - Creates `root` and missing parents.
    /// - Emits `store_open` logging events with duration and status.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let started_at = Instant::now();
        let root = root.as_ref().to_path_buf();
        info!("event=store_open module=store status=start mode=file");

        if let Err(source) = fs::create_dir_all(&root) {
            error!(
                "event=store_open module=store status=error mode=file duration_ms={} error_code=create_dir_failed error={}",
                started_at.elapsed().as_millis(),
                source
            );
            return Err(StoreError::Io { path: root, source });
        }

        info!(
            "event=store_open module=store status=ok mode=file duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, kind: DocumentKind) -> PathBuf {
        self.root.join(kind.file_name())
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.root.join(BACKUP_DIR_NAME)
    }
}

impl DocumentStore for FileStore {
    fn read(&self, kind: DocumentKind) -> StoreResult<Option<String>> {
        let path = self.path_of(kind);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn write(&self, kind: DocumentKind, contents: &str) -> StoreResult<()> {
        let path = self.path_of(kind);
        let temp_path = path.with_extension(format!("json.{TEMP_SUFFIX}"));

        fs::write(&temp_path, contents).map_err(|source| StoreError::Io {
            path: temp_path.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            error!(
                "event=doc_write module=store status=error kind={kind} error_code=rename_failed error={source}"
            );
            return Err(StoreError::Io { path, source });
        }
        Ok(())
    }

    fn backup(&self) -> StoreResult<BackupReport> {
        let started_at = Instant::now();
        let backup_dir = self.backup_dir();
        fs::create_dir_all(&backup_dir).map_err(|source| StoreError::Io {
            path: backup_dir.clone(),
            source,
        })?;

        let mut report = BackupReport {
            directory: Some(backup_dir.clone()),
            ..BackupReport::default()
        };
        for kind in DocumentKind::ALL {
            let source_path = self.path_of(kind);
            if !source_path.exists() {
                report.skipped.push(kind);
                continue;
            }
            let target = backup_dir.join(kind.file_name());
            fs::copy(&source_path, &target).map_err(|source| StoreError::Io {
                path: target.clone(),
                source,
            })?;
            report.copied.push(kind);
        }

        info!(
            "event=backup module=store status=ok copied={} skipped={} duration_ms={}",
            report.copied.len(),
            report.skipped.len(),
            started_at.elapsed().as_millis()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::FileStore;
    use crate::store::{DocumentKind, DocumentStore};

    #[test]
    fn open_creates_missing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("nested").join("data");
        let store = FileStore::open(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(store.read(DocumentKind::Goal).unwrap(), None);
    }

    #[test]
    fn write_replaces_content_and_leaves_no_temp_file() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileStore::open(temp.path()).unwrap();
        store.write(DocumentKind::Tasks, "[1]").unwrap();
        store.write(DocumentKind::Tasks, "[2]").unwrap();

        assert_eq!(store.read(DocumentKind::Tasks).unwrap().as_deref(), Some("[2]"));
        let leftovers = std::fs::read_dir(temp.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }
}
