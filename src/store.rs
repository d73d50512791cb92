//! Core OptionStore implementation

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::codec;
use crate::error::StoreError;
use crate::{TAG_DOUBLE, TAG_INT, TAG_TEXT};

/// Type discriminator for an option's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Int,
    Double,
    Text,
}

/// An option's value, carrying its kind
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Double(f64),
    Text(String),
}

impl Value {
    /// The kind this value belongs to
    pub fn kind(&self) -> Kind {
        match self {
            Value::Int(_) => Kind::Int,
            Value::Double(_) => Kind::Double,
            Value::Text(_) => Kind::Text,
        }
    }

    /// The one-byte tag used for this value in the file format
    pub fn tag(&self) -> u8 {
        match self {
            Value::Int(_) => TAG_INT,
            Value::Double(_) => TAG_DOUBLE,
            Value::Text(_) => TAG_TEXT,
        }
    }
}

/// One named, typed option
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Option name; never empty, contains no spaces
    pub name: String,
    /// Option value
    pub value: Value,
}

/// The in-memory option table plus the file path it round-trips through.
///
/// Options keep their insertion order, which is also the order they are
/// written back in. Within a store, (name, kind) pairs are unique: lookups
/// are always scoped to a kind, so an integer and a text option may share
/// a name as two independent entries.
#[derive(Debug)]
pub struct OptionStore {
    /// File path recorded at load time, written at save time
    path: PathBuf,
    /// Options in insertion order
    entries: Vec<Entry>,
}

impl OptionStore {
    /// Load the options at the given path.
    ///
    /// A missing or unreadable file is not an error: the store starts empty
    /// and the path is still recorded so a later [`save`](Self::save)
    /// creates the file. A file that exists but is malformed yields a parse
    /// error with the byte offset of the offending line; no partial store
    /// is returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut store = Self {
            path: path.as_ref().to_path_buf(),
            entries: Vec::new(),
        };

        match fs::read(&store.path) {
            Ok(buffer) => {
                // Duplicate (name, kind) lines collapse through the set
                // path: last value wins, first occurrence keeps its slot
                for entry in codec::parse(&buffer)? {
                    store.set_value(&entry.name, entry.value);
                }
                debug!(path = %store.path.display(), options = store.len(), "Loaded option store");
            }
            Err(e) => {
                debug!(path = %store.path.display(), error = %e, "Option file unreadable, starting empty");
            }
        }

        Ok(store)
    }

    /// Write every option back to the recorded path and consume the store.
    ///
    /// Entries are written in insertion order, one line each. Taking the
    /// store by value makes save the end of its lifecycle; on an I/O error
    /// the store is dropped along with the error's path context.
    pub fn save(self) -> Result<(), StoreError> {
        let content = codec::serialize(&self.entries);
        fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), options = self.entries.len(), "Saved option store");
        Ok(())
    }

    /// Get the integer option `name`, inserting `default` if absent
    pub fn get_int(&mut self, name: &str, default: i64) -> i64 {
        let idx = self.find_or_insert(Kind::Int, name, || Value::Int(default));
        match self.entries[idx].value {
            Value::Int(v) => v,
            _ => unreachable!("lookup scoped to Kind::Int"),
        }
    }

    /// Get the double option `name`, inserting `default` if absent
    pub fn get_double(&mut self, name: &str, default: f64) -> f64 {
        let idx = self.find_or_insert(Kind::Double, name, || Value::Double(default));
        match self.entries[idx].value {
            Value::Double(v) => v,
            _ => unreachable!("lookup scoped to Kind::Double"),
        }
    }

    /// Get the text option `name`, inserting `default` if absent.
    ///
    /// The returned slice borrows the store's own copy of the value.
    pub fn get_text(&mut self, name: &str, default: &str) -> &str {
        let idx = self.find_or_insert(Kind::Text, name, || Value::Text(default.to_string()));
        match &self.entries[idx].value {
            Value::Text(v) => v,
            _ => unreachable!("lookup scoped to Kind::Text"),
        }
    }

    /// Set the integer option `name`, appending it if absent
    pub fn set_int(&mut self, name: &str, value: i64) {
        self.set_value(name, Value::Int(value));
    }

    /// Set the double option `name`, appending it if absent
    pub fn set_double(&mut self, name: &str, value: f64) {
        self.set_value(name, Value::Double(value));
    }

    /// Set the text option `name`, appending it if absent.
    ///
    /// The value is copied; the caller keeps ownership of its buffer.
    pub fn set_text(&mut self, name: &str, value: &str) {
        self.set_value(name, Value::Text(value.to_string()));
    }

    /// Write a labeled line per option to `w`, in insertion order
    pub fn dump<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        for entry in &self.entries {
            match &entry.value {
                Value::Int(v) => writeln!(w, "Int: {} {}", entry.name, v)?,
                Value::Double(v) => writeln!(w, "Double: {} {:.6}", entry.name, v)?,
                Value::Text(v) => writeln!(w, "Text: {} {}", entry.name, v)?,
            }
        }
        Ok(())
    }

    /// Number of options in the store
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the store holds no options
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The file path this store loads from and saves to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All options in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Overwrite in place if (name, kind) exists, else append at the end
    fn set_value(&mut self, name: &str, value: Value) {
        match self.position(value.kind(), name) {
            Some(idx) => self.entries[idx].value = value,
            None => self.entries.push(Entry {
                name: name.to_string(),
                value,
            }),
        }
    }

    fn find_or_insert(&mut self, kind: Kind, name: &str, default: impl FnOnce() -> Value) -> usize {
        match self.position(kind, name) {
            Some(idx) => idx,
            None => {
                self.entries.push(Entry {
                    name: name.to_string(),
                    value: default(),
                });
                self.entries.len() - 1
            }
        }
    }

    /// Linear scan, filtered by kind then name; option files are small
    fn position(&self, kind: Kind, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.value.kind() == kind && e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn empty_store() -> OptionStore {
        OptionStore {
            path: PathBuf::from("unused.cfg"),
            entries: Vec::new(),
        }
    }

    #[test]
    fn test_get_inserts_default_once() {
        let mut store = empty_store();

        assert_eq!(store.get_int("x", 5), 5);
        // Second default is ignored; the stored value wins
        assert_eq!(store.get_int("x", 9), 5);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_double_and_text_defaults() {
        let mut store = empty_store();

        assert_eq!(store.get_double("rate", 0.25), 0.25);
        assert_eq!(store.get_text("greeting", "hello there"), "hello there");
        assert_eq!(store.get_double("rate", 9.0), 0.25);
        assert_eq!(store.get_text("greeting", "other"), "hello there");
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut store = empty_store();
        store.set_text("k", "a");
        store.set_int("after", 1);
        store.set_text("k", "b");

        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[0].name, "k");
        assert_eq!(store.entries()[0].value, Value::Text("b".to_string()));
        assert_eq!(store.entries()[1].name, "after");
    }

    #[test]
    fn test_same_name_different_kinds_coexist() {
        let mut store = empty_store();
        store.set_int("k", 1);
        store.set_text("k", "hi");

        assert_eq!(store.len(), 2);
        assert_eq!(store.get_int("k", 0), 1);
        assert_eq!(store.get_text("k", ""), "hi");
    }

    #[test]
    fn test_set_text_copies_input() {
        let mut store = empty_store();
        let mut caller = String::from("first");
        store.set_text("k", &caller);

        caller.clear();
        caller.push_str("changed");

        assert_eq!(store.get_text("k", ""), "first");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.cfg");

        let store = OptionStore::load(&path).unwrap();

        assert!(store.is_empty());
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.cfg");
        fs::write(&path, "x foo 1\n").unwrap();

        let err = OptionStore::load(&path).unwrap_err();

        assert!(err.is_parse());
        assert_eq!(err.offset(), Some(0));
    }

    #[test]
    fn test_dump_output() {
        let mut store = empty_store();
        store.set_int("volume", 7);
        store.set_double("pitch", 0.5);
        store.set_text("name", "Alice Smith");

        let mut out = Vec::new();
        store.dump(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Int: volume 7\nDouble: pitch 0.500000\nText: name Alice Smith\n"
        );
    }

    #[test]
    fn test_value_kind_and_tag() {
        assert_eq!(Value::Int(0).kind(), Kind::Int);
        assert_eq!(Value::Double(0.0).tag(), b'd');
        assert_eq!(Value::Text(String::new()).tag(), b't');
    }
}
