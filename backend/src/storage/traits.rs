//! # Storage Traits
//!
//! The key-value abstraction every store implements.

use anyhow::Result;

/// String key-value storage with the semantics of browser local storage.
///
/// Values are opaque strings; serialization belongs to the caller.
/// All operations are synchronous and either complete or fail immediately.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if the key was never written
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; returns true if a value was present
    fn remove_item(&self, key: &str) -> Result<bool>;
}
