//! Roster memory between games.
//!
//! After every game starts, the names that played are remembered so the
//! next lobby opens pre-filled. The memory has two halves:
//!
//! - the in-memory copy inside [`NameHistory`], which is authoritative
//!   for the life of the process;
//! - a durable slot behind the [`NameHistoryStore`] trait, read once at
//!   startup and overwritten on every successful start.
//!
//! # Why a trait?
//!
//! The durable slot belongs to the host: a file on a desktop, browser
//! storage behind a wasm shim, nothing at all in tests. The game only
//! needs `load` and `save`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use impostor_model::{Codec, JsonCodec};

use crate::HistoryError;

/// A durable key-value slot holding the last roster.
///
/// `Send + 'static` because the store is moved into the game actor's task
/// together with the state machine that owns it.
pub trait NameHistoryStore: Send + 'static {
    /// Reads the stored roster. `Ok(None)` means nothing was ever stored.
    fn load(&self) -> Result<Option<Vec<String>>, HistoryError>;

    /// Overwrites the stored roster.
    fn save(&mut self, names: &[String]) -> Result<(), HistoryError>;
}

// ---------------------------------------------------------------------------
// MemoryHistoryStore
// ---------------------------------------------------------------------------

/// A store that lives only as long as the process. Useful in tests and
/// for hosts without durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    slot: Option<Vec<String>>,
    saves: usize,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds a roster, as if from an earlier run.
    pub fn with_names<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            slot: Some(names.into_iter().map(Into::into).collect()),
            saves: 0,
        }
    }

    /// What is currently stored.
    pub fn stored(&self) -> Option<&[String]> {
        self.slot.as_deref()
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl NameHistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<Option<Vec<String>>, HistoryError> {
        Ok(self.slot.clone())
    }

    fn save(&mut self, names: &[String]) -> Result<(), HistoryError> {
        self.slot = Some(names.to_vec());
        self.saves += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileHistoryStore
// ---------------------------------------------------------------------------

/// A store backed by one file holding the roster as an encoded list of
/// strings (a JSON array by default).
///
/// Writes go to a sibling temp file first and are renamed into place, so
/// a crash mid-write leaves the previous roster intact.
#[derive(Debug, Clone)]
pub struct FileHistoryStore<C: Codec = JsonCodec> {
    path: PathBuf,
    codec: C,
}

impl FileHistoryStore<JsonCodec> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_codec(path, JsonCodec)
    }
}

impl<C: Codec> FileHistoryStore<C> {
    pub fn with_codec(path: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            path: path.into(),
            codec,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<C: Codec> NameHistoryStore for FileHistoryStore<C> {
    fn load(&self) -> Result<Option<Vec<String>>, HistoryError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let names: Vec<String> = self.codec.decode(&bytes)?;
        Ok(Some(names))
    }

    fn save(&mut self, names: &[String]) -> Result<(), HistoryError> {
        let bytes = self.codec.encode(&names)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Lets hosts pick a store at runtime (`Box<dyn NameHistoryStore>`).
impl<S: NameHistoryStore + ?Sized> NameHistoryStore for Box<S> {
    fn load(&self) -> Result<Option<Vec<String>>, HistoryError> {
        (**self).load()
    }

    fn save(&mut self, names: &[String]) -> Result<(), HistoryError> {
        (**self).save(names)
    }
}

// ---------------------------------------------------------------------------
// NameHistory
// ---------------------------------------------------------------------------

/// The remembered roster plus the store that persists it.
///
/// Handed explicitly to the configurator and owned by the state machine;
/// there is no process-global roster.
#[derive(Debug)]
pub struct NameHistory<S: NameHistoryStore> {
    names: Vec<String>,
    store: S,
}

impl<S: NameHistoryStore> NameHistory<S> {
    /// Reads the durable slot once.
    ///
    /// Never fails: an absent slot, an unreadable file, or malformed data
    /// all yield an empty history (the latter two with a warning). Blank
    /// entries are dropped and the rest trimmed.
    pub fn load(store: S) -> Self {
        let names = match store.load() {
            Ok(Some(names)) => crate::normalize_names(&names),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "name history unreadable, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(names = names.len(), "name history loaded");
        Self { names, store }
    }

    /// The remembered names, in entry order. Empty if nothing was kept.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Overwrites the memory with `names`, then the durable slot.
    ///
    /// A store failure is logged and otherwise ignored: losing the
    /// pre-filled roster must not stop a game from starting.
    pub fn record(&mut self, names: &[String]) {
        self.names = names.to_vec();
        if let Err(e) = self.store.save(names) {
            tracing::warn!(error = %e, "failed to persist name history");
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A store whose reads and writes always fail.
    struct BrokenStore;

    impl NameHistoryStore for BrokenStore {
        fn load(&self) -> Result<Option<Vec<String>>, HistoryError> {
            Err(io::Error::other("disk on fire").into())
        }

        fn save(&mut self, _names: &[String]) -> Result<(), HistoryError> {
            Err(io::Error::other("disk on fire").into())
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("impostor-history-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_load_absent_slot_is_empty() {
        let history = NameHistory::load(MemoryHistoryStore::new());
        assert!(history.is_empty());
    }

    #[test]
    fn test_load_trims_and_drops_blank_entries() {
        let store = MemoryHistoryStore::with_names([" Ana ", "", "Bea", "   "]);
        let history = NameHistory::load(store);
        assert_eq!(history.names(), ["Ana", "Bea"]);
    }

    #[test]
    fn test_load_broken_store_degrades_to_empty() {
        let history = NameHistory::load(BrokenStore);
        assert!(history.is_empty());
    }

    #[test]
    fn test_record_overwrites_memory_and_store() {
        let mut history = NameHistory::load(MemoryHistoryStore::with_names(["Old"]));
        let names = vec!["Ana".to_string(), "Bea".to_string(), "Cleo".to_string()];

        history.record(&names);

        assert_eq!(history.names(), names.as_slice());
        assert_eq!(history.store().stored(), Some(names.as_slice()));
        assert_eq!(history.store().save_count(), 1);
    }

    #[test]
    fn test_record_broken_store_still_updates_memory() {
        let mut history = NameHistory::load(BrokenStore);
        history.record(&["Ana".to_string()]);
        assert_eq!(history.names(), ["Ana"]);
    }

    #[test]
    fn test_file_store_missing_file_loads_none() {
        let store = FileHistoryStore::new(temp_path("missing/names.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_save_then_load() {
        let path = temp_path("roundtrip/names.json");
        let mut store = FileHistoryStore::new(&path);
        let names = vec!["Ana".to_string(), "Bea".to_string(), "Cleo".to_string()];

        store.save(&names).unwrap();

        assert_eq!(fs::read(&path).unwrap(), br#"["Ana","Bea","Cleo"]"#);
        assert_eq!(store.load().unwrap(), Some(names));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_malformed_file_degrades_to_empty_history() {
        let path = temp_path("malformed/names.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"not json at all").unwrap();

        let store = FileHistoryStore::new(&path);
        assert!(matches!(store.load(), Err(HistoryError::Codec(_))));
        assert!(NameHistory::load(store).is_empty());
        let _ = fs::remove_file(&path);
    }
}
