use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{Error, KeyValueStore, Result};

/// In-process store. Clones share the same map, so a test can keep a handle
/// while the original is moved into a writer thread.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, Value>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without counting it as a write
    pub fn with_value(self, key: &str, value: Value) -> Self {
        self.lock().values.insert(key.to_string(), value);
        self
    }

    /// Number of successful `set` calls so far
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Make subsequent writes fail, for exercising failure reporting
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // A poisoned map is still a consistent map: every write is a single insert.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.lock().values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<()> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(Error::Io(std::io::Error::other("memory store rejected write")));
        }
        inner.values.insert(key.to_string(), value.clone());
        inner.writes += 1;
        Ok(())
    }
}
