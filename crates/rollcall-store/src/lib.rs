// Key-value blob storage
// The whole roster lives under one key; no partial writes

mod error;
mod memory;
mod schema;
mod sqlite;

use serde_json::Value;

// Public API
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use schema::SCHEMA_VERSION;
pub use sqlite::SqliteStore;

/// The get/set contract the rest of the workspace relies on.
///
/// Implementations must replace the stored value atomically on `set`.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&mut self, key: &str, value: &Value) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<()> {
        (**self).set(key, value)
    }
}
