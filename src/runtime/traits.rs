//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the store and controller with mock
//! implementations.

use crate::db::Database;
use std::sync::Arc;

/// Durable key/value storage for the session store
pub trait Storage: Send + Sync {
    /// Raw value under `key`, `None` when absent
    fn load(&self, key: &str) -> Result<Option<String>, String>;

    /// Write every entry in one transaction
    fn save_all(&self, entries: &[(&str, String)]) -> Result<(), String>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

impl<T: Storage + ?Sized> Storage for Arc<T> {
    fn load(&self, key: &str) -> Result<Option<String>, String> {
        (**self).load(key)
    }

    fn save_all(&self, entries: &[(&str, String)]) -> Result<(), String> {
        (**self).save_all(entries)
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

impl Storage for Database {
    fn load(&self, key: &str) -> Result<Option<String>, String> {
        let entry = self.get_entry(key).map_err(|e| e.to_string())?;
        Ok(entry.map(|entry| {
            tracing::debug!(key = %entry.key, updated_at = %entry.updated_at, "Loaded entry");
            entry.value
        }))
    }

    fn save_all(&self, entries: &[(&str, String)]) -> Result<(), String> {
        self.put_entries(entries).map_err(|e| e.to_string())
    }
}
