//! # Storage Layer
//!
//! Durable key-value persistence with graceful degradation.
//!
//! ## Two levels
//!
//! 1. [`StorageBackend`]: the raw port. Strings in, strings out, every call can
//!    fail. Implementations handle the "how" (directory of files, memory).
//! 2. [`Persistence`]: the adapter everything else talks to. It JSON-encodes
//!    values and **never** hands a storage failure back to its caller: failed
//!    writes are logged and dropped, failed or malformed reads are logged and
//!    replaced by the caller's default.
//!
//! Callers that depend on persistence check [`Persistence::is_available`]
//! first and fall back to an in-memory working set when it answers `false`.
//!
//! ## Keys
//!
//! | Key | Contents |
//! |-----|----------|
//! | `resources` | JSON array of resources |
//! | `tags` | JSON array of tags |
//!
//! There is no versioning: a schema change needs a one-time key migration.
//!
//! ## Implementations
//!
//! - [`fs::FsBackend`]: one `<key>.json` file per key, atomic writes.
//! - [`memory::MemBackend`]: for tests, with failure injection.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::rc::Rc;
use tracing::{debug, error};

pub mod fs;
pub mod memory;

pub const RESOURCES_KEY: &str = "resources";
pub const TAGS_KEY: &str = "tags";

const SENTINEL_KEY: &str = "__test__";

/// Abstract interface for raw key-value I/O.
///
/// Methods take `&self`; backends that mutate in memory use interior
/// mutability since everything runs on one thread.
pub trait StorageBackend {
    /// Returns `Ok(None)` when the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// JSON persistence over a shared [`StorageBackend`].
///
/// Cloning is cheap and every clone writes to the same backend.
#[derive(Clone)]
pub struct Persistence {
    backend: Rc<dyn StorageBackend>,
}

impl Persistence {
    pub fn new(backend: Rc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Serializes `value` under `key`. Failures are logged, not returned.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!(key, error = %e, "failed to encode value for storage");
                return;
            }
        };
        if let Err(e) = self.backend.set_item(key, &encoded) {
            error!(key, error = %e, "failed to save to storage");
        } else {
            debug!(key, bytes = encoded.len(), "saved to storage");
        }
    }

    /// Reads `key`, returning `default` when it is absent, unreadable, or
    /// holds JSON that does not decode into `T`.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                error!(key, error = %e, "failed to load from storage");
                return default;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                error!(key, error = %e, "malformed JSON in storage");
                default
            }
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove_item(key) {
            error!(key, error = %e, "failed to remove from storage");
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.backend.clear() {
            error!(error = %e, "failed to clear storage");
        }
    }

    /// Writes then deletes a sentinel key. Detects disabled or
    /// full storage before anything relies on it.
    pub fn is_available(&self) -> bool {
        self.backend.set_item(SENTINEL_KEY, SENTINEL_KEY).is_ok()
            && self.backend.remove_item(SENTINEL_KEY).is_ok()
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemBackend;
    use super::*;
    use std::collections::HashMap;

    fn setup() -> (Rc<MemBackend>, Persistence) {
        let backend = Rc::new(MemBackend::new());
        let persistence = Persistence::new(backend.clone());
        (backend, persistence)
    }

    #[test]
    fn save_then_load() {
        let (_, persistence) = setup();
        persistence.save("numbers", &vec![1, 2, 3]);
        let loaded: Vec<i32> = persistence.load("numbers", Vec::new());
        assert_eq!(loaded, vec![1, 2, 3]);
    }

    #[test]
    fn load_missing_key_returns_default() {
        let (_, persistence) = setup();
        let loaded: Vec<String> = persistence.load("nothing", vec!["d".to_string()]);
        assert_eq!(loaded, vec!["d"]);
    }

    #[test]
    fn load_malformed_json_returns_default() {
        let (backend, persistence) = setup();
        backend.set_item("tags", "{not json").unwrap();
        let loaded: Vec<String> = persistence.load("tags", Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn load_wrong_shape_returns_default() {
        let (backend, persistence) = setup();
        backend.set_item("tags", r#"{"a": 1}"#).unwrap();
        let loaded: Vec<String> = persistence.load("tags", Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_failure_is_swallowed() {
        let (backend, persistence) = setup();
        backend.set_simulate_write_error(true);
        persistence.save("numbers", &vec![1]);
        backend.set_simulate_write_error(false);
        let loaded: Vec<i32> = persistence.load("numbers", Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn remove_and_clear() {
        let (backend, persistence) = setup();
        persistence.save("a", &1);
        persistence.save("b", &2);
        persistence.remove("a");
        assert_eq!(backend.get_item("a").unwrap(), None);
        assert!(backend.get_item("b").unwrap().is_some());

        persistence.clear();
        assert_eq!(backend.get_item("b").unwrap(), None);
    }

    #[test]
    fn availability_check_leaves_no_trace() {
        let (backend, persistence) = setup();
        assert!(persistence.is_available());
        assert_eq!(backend.get_item(SENTINEL_KEY).unwrap(), None);
    }

    #[test]
    fn availability_check_detects_failing_backend() {
        let (backend, persistence) = setup();
        backend.set_simulate_write_error(true);
        assert!(!persistence.is_available());
    }

    #[test]
    fn clones_share_the_backend() {
        let (_, persistence) = setup();
        let other = persistence.clone();
        let mut map = HashMap::new();
        map.insert("k".to_string(), 7);
        persistence.save("map", &map);
        let loaded: HashMap<String, i32> = other.load("map", HashMap::new());
        assert_eq!(loaded.get("k"), Some(&7));
    }
}
