//! JSON document storage for journal data.
//!
//! # Responsibility
//! - Read and write the four journal documents as whole JSON values.
//! - Decode typed documents and report malformed content as errors.
//! - Copy existing documents into a backup location on demand.
//!
//! # Invariants
//! - Each document is rewritten wholesale; there are no partial updates.
//! - A missing document is not an error; callers choose the default.
//! - A malformed document is never silently replaced by a default.

use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod file;
mod memory;

pub use file::{FileStore, BACKUP_DIR_NAME};
pub use memory::MemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// The four independent journal documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocumentKind {
    Tasks,
    Thoughts,
    Level,
    Goal,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Tasks,
        DocumentKind::Thoughts,
        DocumentKind::Level,
        DocumentKind::Goal,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Tasks => "tasks.json",
            Self::Thoughts => "thoughts.json",
            Self::Level => "level.json",
            Self::Goal => "goal.json",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Thoughts => "thoughts",
            Self::Level => "level",
            Self::Goal => "goal",
        }
    }
}

impl Display for DocumentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Storage error for document reads, writes and backups.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Malformed {
        kind: DocumentKind,
        source: serde_json::Error,
    },
    Encode {
        kind: DocumentKind,
        source: serde_json::Error,
    },
    InvalidData {
        kind: DocumentKind,
        message: String,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error at `{}`: {source}", path.display()),
            Self::Malformed { kind, source } => {
                write!(f, "malformed {kind} document: {source}")
            }
            Self::Encode { kind, source } => write!(f, "failed to encode {kind} document: {source}"),
            Self::InvalidData { kind, message } => {
                write!(f, "invalid {kind} document: {message}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } | Self::Encode { source, .. } => Some(source),
            Self::InvalidData { .. } => None,
        }
    }
}

/// Result of copying documents into the backup location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackupReport {
    /// Backup directory for file stores; `None` for in-memory stores.
    pub directory: Option<PathBuf>,
    pub copied: Vec<DocumentKind>,
    /// Documents that did not exist yet and were not copied.
    pub skipped: Vec<DocumentKind>,
}

/// Raw document storage contract.
pub trait DocumentStore {
    /// Returns `Ok(None)` when the document does not exist.
    fn read(&self, kind: DocumentKind) -> StoreResult<Option<String>>;
    /// Replaces the whole document.
    fn write(&self, kind: DocumentKind, contents: &str) -> StoreResult<()>;
    /// Copies every existing document verbatim into the backup location.
    fn backup(&self) -> StoreResult<BackupReport>;
}

/// Loads and decodes one document.
///
/// Returns `Ok(None)` when the document does not exist.
pub fn load<T, S>(store: &S, kind: DocumentKind) -> StoreResult<Option<T>>
where
    T: DeserializeOwned,
    S: DocumentStore + ?Sized,
{
    let Some(contents) = store.read(kind)? else {
        debug!("event=doc_load module=store status=skip kind={kind} reason=missing");
        return Ok(None);
    };
    match serde_json::from_str(&contents) {
        Ok(value) => {
            debug!(
                "event=doc_load module=store status=ok kind={kind} bytes={}",
                contents.len()
            );
            Ok(Some(value))
        }
        Err(source) => {
            error!(
                "event=doc_load module=store status=error kind={kind} error_code=malformed line={} column={}",
                source.line(),
                source.column()
            );
            Err(StoreError::Malformed { kind, source })
        }
    }
}

/// Encodes and writes one document as pretty-printed JSON.
pub fn save<T, S>(store: &S, kind: DocumentKind, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
    S: DocumentStore + ?Sized,
{
    let contents =
        serde_json::to_string_pretty(value).map_err(|source| StoreError::Encode { kind, source })?;
    store.write(kind, &contents)?;
    debug!(
        "event=doc_save module=store status=ok kind={kind} bytes={}",
        contents.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load, save, DocumentKind, DocumentStore, MemoryStore, StoreError};

    #[test]
    fn load_missing_document_returns_none() {
        let store = MemoryStore::new();
        let loaded: Option<Vec<String>> = load(&store, DocumentKind::Tasks).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_reports_malformed_document() {
        let store = MemoryStore::new();
        store.write(DocumentKind::Level, "{not json").unwrap();
        let err = load::<serde_json::Value, _>(&store, DocumentKind::Level).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Malformed {
                kind: DocumentKind::Level,
                ..
            }
        ));
        assert!(err.to_string().contains("malformed level document"));
    }

    #[test]
    fn save_writes_two_space_pretty_json_without_escaping_unicode() {
        let store = MemoryStore::new();
        save(&store, DocumentKind::Thoughts, &vec!["Grüße"]).unwrap();
        let raw = store.read(DocumentKind::Thoughts).unwrap().unwrap();
        assert_eq!(raw, "[\n  \"Grüße\"\n]");
    }

    #[test]
    fn file_names_match_storage_layout() {
        let names = DocumentKind::ALL.map(DocumentKind::file_name);
        assert_eq!(names, ["tasks.json", "thoughts.json", "level.json", "goal.json"]);
    }
}
