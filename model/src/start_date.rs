use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Storage key of the growth start date.
pub const START_DATE_KEY: &str = "ssukssukStartDate";

/// Start date used until the user picks one.
pub const DEFAULT_START_DATE: &str = "2025-06-01";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is not a JSON string map: {0}")]
    Format(#[from] serde_json::Error),

    #[error("no data directory available for this user")]
    NoDataDirectory,
}

/// A string-to-string store that survives restarts, in the manner of a
/// browser's local storage.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Storage that forgets everything on drop. Used when the storage file cannot
/// be opened, and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Storage backed by a JSON object in a file. Every write rewrites the file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    const FILE_NAME: &'static str = "local_storage.json";

    /// Opens the storage file in the user's data directory, e.g.
    /// `~/.local/share/ssukssuk/local_storage.json` on Linux.
    pub fn open_default() -> Result<Self, StorageError> {
        let dirs = directories::ProjectDirs::from("", "", "ssukssuk")
            .ok_or(StorageError::NoDataDirectory)?;

        Self::open(dirs.data_dir().join(Self::FILE_NAME))
    }

    /// Opens the storage file at `path`. A missing file is an empty storage;
    /// it is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let items = match std::fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        log::debug!("Opened storage {} with {} item(s)", path.display(), items.len());

        Ok(Self { path, items })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&self.items)?)?;

        Ok(())
    }
}

/// The growth start date, kept in sync with its storage.
///
/// The date is held as the raw string the user entered, so a value that does
/// not parse still round-trips and shows up as a date error.
pub struct StartDateStore {
    storage: Box<dyn KeyValueStorage>,
    current: String,
}

impl StartDateStore {
    /// Loads the start date, falling back to [`DEFAULT_START_DATE`] when the
    /// key is missing or blank.
    pub fn load(storage: Box<dyn KeyValueStorage>) -> Self {
        let current = match storage.get_item(START_DATE_KEY) {
            Some(stored) if !stored.trim().is_empty() => stored,
            _ => DEFAULT_START_DATE.to_string(),
        };

        Self { storage, current }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Replaces the start date and persists it.
    ///
    /// The new date takes effect even when persisting fails.
    pub fn set(&mut self, start_date: &str) -> Result<(), StorageError> {
        self.current = start_date.trim().to_string();
        self.storage.set_item(START_DATE_KEY, &self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnlyStorage(Option<String>);

    impl KeyValueStorage for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> Option<String> {
            self.0.clone()
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn missing_key_uses_default() {
        let store = StartDateStore::load(Box::new(MemoryStorage::default()));
        assert_eq!(store.current(), DEFAULT_START_DATE);
    }

    #[test]
    fn blank_value_uses_default() {
        let store = StartDateStore::load(Box::new(ReadOnlyStorage(Some("  ".into()))));
        assert_eq!(store.current(), DEFAULT_START_DATE);
    }

    #[test]
    fn invalid_value_is_kept() {
        let store = StartDateStore::load(Box::new(ReadOnlyStorage(Some("someday".into()))));
        assert_eq!(store.current(), "someday");
    }

    #[test]
    fn set_writes_through_to_storage() {
        let mut storage = MemoryStorage::default();
        storage.set_item(START_DATE_KEY, "2025-05-01").unwrap();

        let mut store = StartDateStore::load(Box::new(storage));
        assert_eq!(store.current(), "2025-05-01");

        store.set(" 2025-07-04 ").unwrap();
        assert_eq!(store.current(), "2025-07-04");
    }

    #[test]
    fn set_takes_effect_when_persisting_fails() {
        let mut store = StartDateStore::load(Box::new(ReadOnlyStorage(None)));
        assert!(store.set("2025-07-04").is_err());
        assert_eq!(store.current(), "2025-07-04");
    }

    #[test]
    fn file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("local_storage.json");

        let mut storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get_item(START_DATE_KEY), None);
        storage.set_item(START_DATE_KEY, "2025-06-15").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item(START_DATE_KEY).as_deref(), Some("2025-06-15"));
        assert_eq!(reopened.path(), path.as_path());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"ssukssukStartDate\""));
    }

    #[test]
    fn file_storage_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        std::fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let mut storage = FileStorage::open(&path).unwrap();
        storage.set_item(START_DATE_KEY, "2025-06-15").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("theme").as_deref(), Some("dark"));
        assert_eq!(reopened.get_item(START_DATE_KEY).as_deref(), Some("2025-06-15"));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(matches!(FileStorage::open(&path), Err(StorageError::Format(_))));
    }

    #[test]
    fn store_over_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");

        let mut store = StartDateStore::load(Box::new(FileStorage::open(&path).unwrap()));
        assert_eq!(store.current(), DEFAULT_START_DATE);
        store.set("2025-08-01").unwrap();

        let store = StartDateStore::load(Box::new(FileStorage::open(&path).unwrap()));
        assert_eq!(store.current(), "2025-08-01");
    }
}
