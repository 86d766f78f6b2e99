use crate::shared_types::InvalidOperation;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-memory map of keys to values shared by every connection.
///
/// A single lock guards all reads and writes. It is never held across an
/// `.await`.
#[derive(Debug, Default)]
pub struct KvStore {
    map: Mutex<HashMap<String, String>>,
}

impl KvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`. Empty keys and values are rejected and
    /// leave the map untouched.
    pub fn set(&self, key: String, value: String) -> Result<(), InvalidOperation> {
        if key.is_empty() {
            return Err(InvalidOperation::EmptyKey);
        }
        if value.is_empty() {
            return Err(InvalidOperation::EmptyValue);
        }
        self.lock().insert(key, value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String, InvalidOperation> {
        self.lock()
            .get(key)
            .cloned()
            .ok_or_else(|| InvalidOperation::KeyNotFound(key.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock cannot leave a half-applied insert.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.map.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
