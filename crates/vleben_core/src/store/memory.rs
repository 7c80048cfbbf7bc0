//! In-memory document store for tests and embedding.

use super::{BackupReport, DocumentKind, DocumentStore, StoreResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Document store kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RefCell<BTreeMap<DocumentKind, String>>,
    backups: RefCell<BTreeMap<DocumentKind, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw contents of the last backup copy of `kind`.
    pub fn backup_contents(&self, kind: DocumentKind) -> Option<String> {
        self.backups.borrow().get(&kind).cloned()
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self, kind: DocumentKind) -> StoreResult<Option<String>> {
        Ok(self.documents.borrow().get(&kind).cloned())
    }

    fn write(&self, kind: DocumentKind, contents: &str) -> StoreResult<()> {
        self.documents
            .borrow_mut()
            .insert(kind, contents.to_string());
        Ok(())
    }

    fn backup(&self) -> StoreResult<BackupReport> {
        let documents = self.documents.borrow();
        let mut backups = self.backups.borrow_mut();
        let mut report = BackupReport::default();
        for kind in DocumentKind::ALL {
            match documents.get(&kind) {
                Some(contents) => {
                    backups.insert(kind, contents.clone());
                    report.copied.push(kind);
                }
                None => report.skipped.push(kind),
            }
        }
        Ok(report)
    }
}
