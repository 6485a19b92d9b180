use super::StorageBackend;
use crate::error::{Result, SanctuaryError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since sanctuary is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    items: RefCell<HashMap<String, String>>,
    simulate_write_error: Cell<bool>,
    simulate_read_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation (quota exceeded, storage disabled).
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Enable read error simulation.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn check_write(&self) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(SanctuaryError::Storage("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(SanctuaryError::Storage("Simulated read error".to_string()));
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.check_write()?;
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.check_write()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.check_write()?;
        self.items.borrow_mut().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let backend = MemBackend::new();
        assert_eq!(backend.get_item("k").unwrap(), None);
        backend.set_item("k", "v").unwrap();
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("v"));
        backend.remove_item("k").unwrap();
        assert!(backend.is_empty());
        // absent key
        backend.remove_item("k").unwrap();
    }

    #[test]
    fn simulated_errors() {
        let backend = MemBackend::new();
        backend.set_item("k", "v").unwrap();

        backend.set_simulate_write_error(true);
        assert!(backend.set_item("k", "w").is_err());
        assert!(backend.clear().is_err());
        assert_eq!(backend.len(), 1);

        backend.set_simulate_read_error(true);
        assert!(backend.get_item("k").is_err());
    }
}
