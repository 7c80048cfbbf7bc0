//! Append-only thought log.

use crate::model::thought::Thought;
use crate::service::outcome::{Ignored, Mutation};

/// In-memory thought log; entries are never edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThoughtLog {
    entries: Vec<Thought>,
}

impl ThoughtLog {
    pub fn new(entries: Vec<Thought>) -> Self {
        Self { entries }
    }

    /// Appends an entry; ignored when `text` is blank.
    pub fn add(&mut self, text: &str) -> Mutation<()> {
        match Thought::new(text) {
            Some(thought) => {
                self.entries.push(thought);
                Mutation::Applied(())
            }
            None => Mutation::Ignored(Ignored::EmptyText),
        }
    }

    /// Most recent entry, if any.
    pub fn latest(&self) -> Option<&Thought> {
        self.entries.last()
    }

    pub fn all(&self) -> &[Thought] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ThoughtLog;

    #[test]
    fn latest_tracks_last_appended_entry() {
        let mut log = ThoughtLog::default();
        assert!(log.latest().is_none());
        let _ = log.add("tired");
        let _ = log.add("  better now ");
        let _ = log.add("");
        assert_eq!(log.len(), 2);
        assert_eq!(log.latest().map(|t| t.text.as_str()), Some("better now"));
    }
}
