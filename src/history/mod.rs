use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, PersistenceFailure, Result};
use crate::query::{QuerySpec, assemble};

/// File name suggested for plain-text exports.
pub const DEFAULT_EXPORT_FILE: &str = "dork_history.txt";

/// A saved query: its assembled text plus the fields that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub display_text: String,
    #[serde(rename = "query_parts", default)]
    pub fields: QuerySpec,
}

impl HistoryEntry {
    /// Build an entry whose display text is `assemble(&fields)`.
    pub fn from_spec(fields: QuerySpec) -> Self {
        Self {
            display_text: assemble(&fields),
            fields,
        }
    }
}

/// Ordered, deduplicated list of saved queries backed by a JSON file.
///
/// Insertion order is display order. Every mutation rewrites the whole file;
/// when the write fails the in-memory change is kept and the error returned.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// An empty store that will persist to `path`. Nothing is read.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Create a store and load it from `path`.
    ///
    /// A load failure never prevents startup: the store comes back empty and
    /// the error is handed to the caller to present.
    pub fn open(path: impl Into<PathBuf>) -> (Self, Option<Error>) {
        let mut store = Self::new(path);
        let err = store.load().err();
        if let Some(e) = &err {
            tracing::warn!("starting with empty history: {e}");
        }
        (store, err)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the in-memory entries with the contents of the history file.
    ///
    /// A missing file is not an error and leaves the store empty.
    ///
    /// # Errors
    /// Returns [`Error::Persistence`] when the file cannot be read or is not a
    /// JSON array of entries. The store is left empty in that case.
    pub fn load(&mut self) -> Result<()> {
        self.entries.clear();
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no history file at {}", self.path.display());
                return Ok(());
            }
            Err(e) => return Err(Error::persistence(&self.path, PersistenceFailure::Read(e))),
        };
        self.entries = serde_json::from_str(&raw)
            .map_err(|e| Error::persistence(&self.path, PersistenceFailure::Malformed(e)))?;
        tracing::debug!(
            "loaded {} history entries from {}",
            self.entries.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Rewrite the history file from the in-memory entries.
    ///
    /// # Errors
    /// Returns [`Error::Persistence`] when the parent directory cannot be
    /// created or the file cannot be written.
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::persistence(&self.path, PersistenceFailure::Write(e)))?;
        }
        let encoded = encode_pretty(&self.entries)
            .map_err(|e| Error::persistence(&self.path, PersistenceFailure::Encode(e)))?;
        std::fs::write(&self.path, encoded)
            .map_err(|e| Error::persistence(&self.path, PersistenceFailure::Write(e)))?;
        tracing::debug!(
            "persisted {} history entries to {}",
            self.entries.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Append the query produced by `spec` and persist.
    ///
    /// # Errors
    /// - [`Error::EmptyQuery`] if `spec` assembles to an empty string.
    /// - [`Error::DuplicateQuery`] if an entry with the same display text
    ///   exists; the store is unchanged.
    /// - [`Error::Persistence`] if the write fails; the entry stays in memory.
    pub fn add(&mut self, spec: QuerySpec) -> Result<&HistoryEntry> {
        let entry = HistoryEntry::from_spec(spec);
        if entry.display_text.is_empty() {
            return Err(Error::EmptyQuery);
        }
        if self.contains(&entry.display_text) {
            return Err(Error::DuplicateQuery {
                display_text: entry.display_text,
            });
        }
        tracing::debug!("adding history entry: {}", entry.display_text);
        self.entries.push(entry);
        self.persist()?;
        let index = self.entries.len() - 1;
        Ok(&self.entries[index])
    }

    /// Exact, case-sensitive match on display text.
    pub fn contains(&self, display_text: &str) -> bool {
        self.entries.iter().any(|e| e.display_text == display_text)
    }

    /// Remove the entry at `index`. Out-of-range is a no-op returning `None`.
    ///
    /// # Errors
    /// Returns [`Error::Persistence`] if the rewrite fails after removal.
    pub fn remove(&mut self, index: usize) -> Result<Option<HistoryEntry>> {
        if index >= self.entries.len() {
            return Ok(None);
        }
        let removed = self.entries.remove(index);
        tracing::debug!("removed history entry: {}", removed.display_text);
        self.persist()?;
        Ok(Some(removed))
    }

    /// Remove every listed index in one pass and persist once.
    /// Duplicate and out-of-range indices are ignored.
    ///
    /// # Errors
    /// Returns [`Error::Persistence`] if the rewrite fails after removal.
    pub fn remove_many(&mut self, indices: &[usize]) -> Result<usize> {
        let before = self.entries.len();
        let mut position = 0;
        self.entries.retain(|_| {
            let keep = !indices.contains(&position);
            position += 1;
            keep
        });
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::debug!("removed {removed} history entries");
            self.persist()?;
        }
        Ok(removed)
    }

    /// Remove the entry whose display text is exactly `display_text`.
    ///
    /// # Errors
    /// Returns [`Error::Persistence`] if the rewrite fails after removal.
    pub fn remove_text(&mut self, display_text: &str) -> Result<Option<HistoryEntry>> {
        match self
            .entries
            .iter()
            .position(|e| e.display_text == display_text)
        {
            Some(index) => self.remove(index),
            None => Ok(None),
        }
    }

    /// Case-insensitive substring search over display text, in store order.
    /// Each match is paired with its index so callers can act on it.
    pub fn filter<'a>(
        &'a self,
        needle: &str,
    ) -> impl Iterator<Item = (usize, &'a HistoryEntry)> + use<'a> {
        let needle = needle.to_lowercase();
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.display_text.to_lowercase().contains(&needle))
    }

    /// Write one display text per line to `path`.
    ///
    /// # Errors
    /// - [`Error::EmptyHistory`] if there is nothing to export.
    /// - [`Error::Persistence`] if the file cannot be written.
    pub fn export_plain_text(&self, path: &Path) -> Result<()> {
        if self.entries.is_empty() {
            return Err(Error::EmptyHistory);
        }
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.display_text);
            out.push('\n');
        }
        std::fs::write(path, out)
            .map_err(|e| Error::persistence(path, PersistenceFailure::Write(e)))?;
        tracing::debug!(
            "exported {} entries to {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }
}

/// Pretty JSON with a four-space indent.
fn encode_pretty(entries: &[HistoryEntry]) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries.serialize(&mut ser)?;
    Ok(buf)
}
