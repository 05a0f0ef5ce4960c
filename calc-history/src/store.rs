//! CSV-backed history store
//!
//! The store owns both the in-memory log and the file. Every mutation
//! rewrites the whole file from memory, so the two never drift apart and
//! the no-duplicates invariant holds on disk too.

use crate::render::render_table;
use crate::HistoryEntry;
use calc_core::HistoryError;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Header row written to every history file
pub const HEADER: [&str; 4] = ["Operation", "Operand 1", "Operand 2", "Result"];

/// Header variant written by older versions; read as equivalent
const COMPACT_HEADER: [&str; 4] = ["Operation", "Operand1", "Operand2", "Result"];

/// Default location of the history file, relative to the working directory
pub const DEFAULT_HISTORY_FILE: &str = "data/history.csv";

/// Append-only, duplicate-suppressing computation log
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Create an empty store bound to `path`. Nothing is read until `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, entry: &HistoryEntry) -> bool {
        self.entries.contains(entry)
    }

    /// Replace the in-memory log with the file contents.
    ///
    /// A missing file is an empty history. Duplicate rows keep their first
    /// occurrence. A malformed row stops the load: rows before it are kept
    /// and the error is returned.
    pub fn load(&mut self) -> Result<&[HistoryEntry], HistoryError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no history file yet");
                self.entries.clear();
                return Ok(&self.entries);
            }
            Err(e) => return Err(HistoryError::io(&self.path, e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| HistoryError::format(&self.path, e))?
            .clone();
        if !headers.is_empty() && !is_known_header(&headers) {
            warn!(path = %self.path.display(), header = ?headers, "unrecognized history header, reading rows anyway");
        }

        let mut loaded: Vec<HistoryEntry> = Vec::new();
        let mut outcome = Ok(());
        for (idx, record) in reader.records().enumerate() {
            let parsed = record
                .map_err(|e| HistoryError::format(&self.path, e))
                .and_then(|r| {
                    let line = r.position().map_or(idx as u64 + 2, |p| p.line());
                    HistoryEntry::from_record(&r, line)
                });
            match parsed {
                Ok(entry) if loaded.contains(&entry) => {
                    debug!(%entry, "skipping duplicate history row");
                }
                Ok(entry) => loaded.push(entry),
                Err(e) => {
                    warn!(error = %e, "history load stopped early");
                    outcome = Err(e);
                    break;
                }
            }
        }

        self.entries = loaded;
        debug!(count = self.entries.len(), "history loaded");
        outcome.map(|()| self.entries.as_slice())
    }

    /// Append `entry` unless an identical entry is already logged.
    /// Returns whether the entry was added.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<bool, HistoryError> {
        if self.contains(&entry) {
            debug!(%entry, "duplicate history entry suppressed");
            return Ok(false);
        }
        self.entries.push(entry);
        if let Err(e) = self.save() {
            self.entries.pop();
            return Err(e);
        }
        Ok(true)
    }

    /// Empty the log; the file keeps only its header
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        let previous = std::mem::take(&mut self.entries);
        if let Err(e) = self.save() {
            self.entries = previous;
            return Err(e);
        }
        info!("History cleared.");
        Ok(())
    }

    /// Remove the entry at the 1-based `index`; later entries shift down by one.
    pub fn delete_at(&mut self, index: usize) -> Result<HistoryEntry, HistoryError> {
        if index == 0 || index > self.entries.len() {
            return Err(HistoryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let removed = self.entries.remove(index - 1);
        if let Err(e) = self.save() {
            self.entries.insert(index - 1, removed);
            return Err(e);
        }
        info!(index, entry = %removed, "history entry deleted");
        Ok(removed)
    }

    /// Render the log as a 1-indexed table, `None` when empty
    pub fn render(&self) -> Option<String> {
        render_table(&self.entries)
    }

    fn save(&self) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| HistoryError::write(parent, e))?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .map_err(|e| HistoryError::write(&self.path, e))?;
        writer
            .write_record(HEADER)
            .map_err(|e| HistoryError::write(&self.path, e))?;
        for entry in &self.entries {
            writer
                .serialize(entry)
                .map_err(|e| HistoryError::write(&self.path, e))?;
        }
        writer.flush().map_err(|e| HistoryError::write(&self.path, e))
    }
}

fn is_known_header(headers: &csv::StringRecord) -> bool {
    let fields: Vec<&str> = headers.iter().collect();
    fields == HEADER || fields == COMPACT_HEADER
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("data").join("history.csv"))
    }

    fn sample() -> HistoryEntry {
        HistoryEntry::new("addition", 5.0, 5.0, 10.0)
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_append_creates_file_with_header() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(store.append(sample()).unwrap());

        let content = fs::read_to_string(store.path()).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("Operation,Operand 1,Operand 2,Result"));
        assert_eq!(lines.next(), Some("addition,5.0,5.0,10.0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_duplicate_append_is_suppressed() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        assert!(store.append(sample()).unwrap());
        assert!(!store.append(sample()).unwrap());
        assert_eq!(store.len(), 1);

        let mut reloaded = store_in(&dir);
        assert_eq!(reloaded.load().unwrap().len(), 1);
    }

    #[test]
    fn test_entries_differing_in_one_field_are_distinct() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.append(sample()).unwrap();
        store.append(HistoryEntry::new("addition", 5.0, 5.0, 10.5)).unwrap();
        store.append(HistoryEntry::new("Addition", 5.0, 5.0, 10.0)).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.append(HistoryEntry::new("division", 1.0, 3.0, 1.0 / 3.0)).unwrap();
        store.append(HistoryEntry::new("subtraction", -2.5, 0.1, -2.6)).unwrap();

        let mut reloaded = store_in(&dir);
        assert_eq!(reloaded.load().unwrap(), store.entries());
    }

    #[test]
    fn test_clear_then_load_is_empty_with_header_only() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.append(sample()).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.trim_end(), "Operation,Operand 1,Operand 2,Result");

        let mut reloaded = store_in(&dir);
        assert!(reloaded.load().unwrap().is_empty());
    }

    #[test]
    fn test_delete_first_renumbers() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.append(HistoryEntry::new("addition", 1.0, 1.0, 2.0)).unwrap();
        store.append(HistoryEntry::new("addition", 2.0, 2.0, 4.0)).unwrap();
        store.append(HistoryEntry::new("addition", 3.0, 3.0, 6.0)).unwrap();

        let removed = store.delete_at(1).unwrap();
        assert_eq!(removed.result, 2.0);
        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[0].result, 4.0);

        let table = store.render().unwrap();
        assert!(table.contains("| 1 | addition"));
        assert!(table.contains("| 2 | addition"));
        assert!(!table.contains("| 3 |"));

        let mut reloaded = store_in(&dir);
        assert_eq!(reloaded.load().unwrap().len(), 2);
    }

    #[test]
    fn test_delete_out_of_range_leaves_store_untouched() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.append(sample()).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        for index in [0, 2, 100] {
            let err = store.delete_at(index).unwrap_err();
            assert!(matches!(err, HistoryError::IndexOutOfRange { len: 1, .. }));
        }
        assert_eq!(store.len(), 1);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn test_compact_header_variant_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, "Operation,Operand1,Operand2,Result\nmultiply,2.0,3.0,6.0\n").unwrap();

        let mut store = HistoryStore::new(&path);
        let entries = store.load().unwrap();
        assert_eq!(entries, &[HistoryEntry::new("multiply", 2.0, 3.0, 6.0)]);
    }

    #[test]
    fn test_spaced_header_and_integer_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, "Operation, Operand 1, Operand 2, Result\naddition, 5, 5, 10\n").unwrap();

        let mut store = HistoryStore::new(&path);
        assert_eq!(store.load().unwrap(), &[HistoryEntry::new("addition", 5.0, 5.0, 10.0)]);
    }

    #[test]
    fn test_malformed_row_keeps_earlier_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(
            &path,
            "Operation,Operand 1,Operand 2,Result\n\
             addition,1.0,1.0,2.0\n\
             addition,abc,1.0,2.0\n\
             addition,3.0,3.0,6.0\n",
        )
        .unwrap();

        let mut store = HistoryStore::new(&path);
        let err = store.load().unwrap_err();
        assert!(matches!(err, HistoryError::MalformedRow { line: 3, .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_short_row_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, "Operation,Operand 1,Operand 2,Result\naddition,1.0\n").unwrap();

        let mut store = HistoryStore::new(&path);
        assert!(matches!(store.load(), Err(HistoryError::MalformedRow { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_external_duplicates_dropped_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(
            &path,
            "Operation,Operand 1,Operand 2,Result\n\
             addition,5.0,5.0,10.0\n\
             addition,5.0,5.0,10.0\n",
        )
        .unwrap();

        let mut store = HistoryStore::new(&path);
        assert_eq!(store.load().unwrap().len(), 1);
    }

    /// Swap the history file for a directory so every later save fails
    fn make_unwritable(store: &HistoryStore) {
        fs::remove_file(store.path()).unwrap();
        fs::create_dir(store.path()).unwrap();
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.append(sample()).unwrap();
        make_unwritable(&store);

        let err = store.append(HistoryEntry::new("division", 8.0, 2.0, 4.0)).unwrap_err();
        assert!(matches!(err, HistoryError::Write { .. }));
        assert!(err.to_string().starts_with("Failed to write history file"));
        assert_eq!(store.entries(), &[sample()]);

        assert!(matches!(store.clear(), Err(HistoryError::Write { .. })));
        assert_eq!(store.entries(), &[sample()]);

        assert!(matches!(store.delete_at(1), Err(HistoryError::Write { .. })));
        assert_eq!(store.entries(), &[sample()]);
    }

    #[test]
    fn test_nan_rows_deduplicated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(
            &path,
            "Operation,Operand 1,Operand 2,Result\n\
             addition,NaN,1.0,NaN\n\
             addition,NaN,1.0,NaN\n",
        )
        .unwrap();

        let mut store = HistoryStore::new(&path);
        assert_eq!(store.load().unwrap().len(), 1);
        let entry = store.entries()[0].clone();
        assert!(!store.append(entry).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_render_empty_is_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.render().is_none());
    }
}
