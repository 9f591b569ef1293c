//! Key-value store with automatic JSON serialization.

use crate::CacheError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Raw byte storage behind a [`Cache`].
pub trait KvBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;
    fn delete(&self, key: &str) -> Result<(), CacheError>;
    fn exists(&self, key: &str) -> Result<bool, CacheError>;
    /// All keys, sorted.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// Process-local storage. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> CacheError {
    CacheError::StoreError("memory store lock poisoned".to_string())
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.entries
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().map_err(poisoned)?.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.entries.read().map_err(poisoned)?.contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.entries.read().map_err(poisoned)?.keys().cloned().collect())
    }
}

/// One file per key inside a directory.
///
/// File names are the URL-safe base64 of the key, so any key is a valid name.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

const FILE_EXTENSION: &str = "json";

impl FileBackend {
    /// Open (and create if needed) a store directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", URL_SAFE_NO_PAD.encode(key), FILE_EXTENSION))
    }
}

impl KvBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key);
        // write-then-rename so readers never see a torn file
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(key, path = %path.display(), "stored entry");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.path_for(key).is_file())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if let Some(key) = URL_SAFE_NO_PAD
                .decode(stem)
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok())
            {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Type-safe cache over a [`KvBackend`].
///
/// Values are stored as JSON. Clones share the same backend.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn KvBackend>,
}

impl Cache {
    /// A cache that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::with_backend(MemoryBackend::new())
    }

    /// A cache persisted under `dir`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open(".storefront/store")?;
    /// ```
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        Ok(Self::with_backend(FileBackend::open(dir)?))
    }

    pub fn with_backend(backend: impl KvBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Get a value. Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.backend.set(key, &bytes)
    }

    /// Delete a value. Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key)
    }

    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.backend.exists(key)
    }

    /// Keys starting with `prefix`, sorted.
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, CacheError> {
        Ok(self
            .backend
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect())
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```
/// use storefront_cache::cache_key;
/// let key = cache_key!("cart", "sess_1");
/// assert_eq!(key, "cart:sess_1");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Line {
        product: i64,
        quantity: u32,
    }

    #[test]
    fn test_memory_roundtrip_and_delete() {
        let cache = Cache::in_memory();
        let line = Line {
            product: 1,
            quantity: 2,
        };

        cache.set("cart:a", &line).unwrap();
        assert_eq!(cache.get::<Line>("cart:a").unwrap(), Some(line));
        assert!(cache.exists("cart:a").unwrap());

        cache.delete("cart:a").unwrap();
        cache.delete("cart:a").unwrap();
        assert_eq!(cache.get::<Line>("cart:a").unwrap(), None);
    }

    #[test]
    fn test_clones_share_backend() {
        let cache = Cache::in_memory();
        let other = cache.clone();
        cache.set("k", &1u8).unwrap();
        assert_eq!(other.get::<u8>("k").unwrap(), Some(1));
    }

    #[test]
    fn test_type_mismatch_is_serialize_error() {
        let cache = Cache::in_memory();
        cache.set("k", &"text").unwrap();
        assert!(matches!(
            cache.get::<Line>("k"),
            Err(CacheError::SerializeError(_))
        ));
    }

    #[test]
    fn test_keys_with_prefix() {
        let cache = Cache::in_memory();
        cache.set("order:2", &0).unwrap();
        cache.set("session:x", &0).unwrap();
        cache.set("order:1", &0).unwrap();
        assert_eq!(
            cache.keys_with_prefix("order:").unwrap(),
            vec!["order:1".to_string(), "order:2".to_string()]
        );
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("order", 42), "order:42");
        assert_eq!(cache_key!("a", "b", 3), "a:b:3");
    }
}
