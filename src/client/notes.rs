use tracing::warn;

use super::storage::KeyValueStore;
use crate::error::ClientError;

/// Ordered list of free-text notes kept under a single storage key as a
/// JSON array. Notes are addressed by position only.
pub struct NotesStore<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> NotesStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Stored notes, or an empty list when nothing readable is stored.
    pub fn load(&self) -> Vec<String> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read notes: {}", e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Stored notes are not a JSON string array: {}", e);
            Vec::new()
        })
    }

    /// Append a trimmed note. Blank input leaves the list untouched.
    pub fn add(&mut self, note: &str) -> Result<Vec<String>, ClientError> {
        let mut notes = self.load();
        let note = note.trim();
        if note.is_empty() {
            return Ok(notes);
        }

        notes.push(note.to_string());
        self.save(&notes)?;
        Ok(notes)
    }

    /// Remove the note at `index`. Out-of-range indexes change nothing.
    pub fn delete(&mut self, index: usize) -> Result<Vec<String>, ClientError> {
        let mut notes = self.load();
        if index >= notes.len() {
            warn!("No note at index {} ({} stored)", index, notes.len());
            return Ok(notes);
        }

        notes.remove(index);
        self.save(&notes)?;
        Ok(notes)
    }

    fn save(&mut self, notes: &[String]) -> Result<(), ClientError> {
        let encoded = serde_json::to_string(notes)?;
        self.store.set(&self.key, &encoded)
    }
}
