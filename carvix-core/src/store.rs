//! Repository seam for the persisted collections (profile, jobs, tasks, ...).
//!
//! Screen logic takes a `Repository<T>` instead of reaching for ambient
//! storage, so everything above this layer is testable in-process.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CarvixError, Result};

pub trait Repository<T> {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<T>>;
    fn save(&self, value: &T) -> Result<()>;
}

/// One pretty-printed JSON document per collection.
#[derive(Debug, Clone)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: Serialize + DeserializeOwned> Repository<T> for JsonFileStore<T> {
    fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let s = fs::read_to_string(&self.path).map_err(|source| CarvixError::Io {
            path: self.path.clone(),
            source,
        })?;
        let value = serde_json::from_str(&s).map_err(|source| CarvixError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(value))
    }

    fn save(&self, value: &T) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|source| CarvixError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&self.path, json).map_err(|source| CarvixError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "saved");
        Ok(())
    }
}

/// Read a user-supplied content file (roadmaps, question banks, careers).
/// Unlike a store, a missing file is an error.
pub fn load_content<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let s = fs::read_to_string(path).map_err(|source| CarvixError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&s).map_err(|source| CarvixError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// In-process store. Values round-trip through JSON so it behaves like the file store.
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    slot: RefCell<Option<String>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(None),
            _marker: PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned> MemoryStore<T> {
    pub fn with_value(value: &T) -> Result<Self> {
        let store = Self::new();
        store.save(value)?;
        Ok(store)
    }
}

impl<T: Serialize + DeserializeOwned> Repository<T> for MemoryStore<T> {
    fn load(&self) -> Result<Option<T>> {
        match self.slot.borrow().as_deref() {
            None => Ok(None),
            Some(s) => Ok(Some(serde_json::from_str(s)?)),
        }
    }

    fn save(&self, value: &T) -> Result<()> {
        *self.slot.borrow_mut() = Some(serde_json::to_string(value)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;

    #[test]
    fn file_store_absent_then_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonFileStore<Profile> = JsonFileStore::new(dir.path().join("nested/profile.json"));
        assert!(store.load().unwrap().is_none());

        let p = Profile {
            name: "Ravi".into(),
            technical_skills: "Go".into(),
            ..Profile::default()
        };
        store.save(&p).unwrap();
        assert_eq!(store.load().unwrap(), Some(p));
    }

    #[test]
    fn file_store_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");
        fs::write(&path, "{not json").unwrap();
        let store: JsonFileStore<Vec<String>> = JsonFileStore::new(&path);
        let err = store.load().unwrap_err();
        assert!(matches!(err, CarvixError::Parse { .. }));
        assert!(err.to_string().contains("jobs.json"));
    }

    #[test]
    fn missing_content_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_content::<Vec<String>>(&dir.path().join("roadmaps.json")).unwrap_err();
        assert!(matches!(err, CarvixError::Io { .. }));
    }

    #[test]
    fn memory_store_roundtrip() {
        let store: MemoryStore<Vec<u32>> = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        store.save(&vec![1, 2, 3]).unwrap();
        assert_eq!(store.load().unwrap(), Some(vec![1, 2, 3]));
    }
}
