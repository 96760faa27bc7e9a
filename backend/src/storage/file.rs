//! # File Store
//!
//! Desktop/native counterpart of browser local storage: each key lives in its
//! own JSON file under a base directory.
//!
//! ```text
//! data/
//! ├── HomeBudget_Data.json
//! └── HomeBudget_GlobalSavings.json
//! ```
//!
//! Writes go to a temp file first and are renamed into place, so a crash never
//! leaves a half-written blob behind.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use super::traits::KeyValueStore;

#[derive(Clone, Debug)]
pub struct FileStore {
    base_directory: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("creating data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self { base_directory: base_path })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// File backing `key`; characters outside `[A-Za-z0-9_-]` become `_`
    fn path_for_key(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.base_directory.join(format!("{}.json", file_stem))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for_key(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        debug!("Read {} bytes for key '{}'", content.len(), key);
        Ok(Some(content))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for_key(key);
        let temp_path = path.with_extension("tmp");

        fs::write(&temp_path, value)
            .with_context(|| format!("writing {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("replacing {}", path.display()))?;

        debug!("Saved key '{}' to {:?}", key, path);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<bool> {
        let path = self.path_for_key(key);
        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::TestEnvironment;

    #[test]
    fn test_new_creates_missing_directory() {
        let env = TestEnvironment::new().unwrap();
        let nested = env.base_directory().join("nested").join("data");
        assert!(!nested.exists());

        let store = FileStore::new(&nested).unwrap();
        assert!(nested.exists());
        assert_eq!(store.base_directory(), nested.as_path());
    }

    #[test]
    fn test_set_and_get_item() {
        let env = TestEnvironment::new().unwrap();
        env.store.set_item("HomeBudget_Data", "{\"a\":1}").unwrap();

        assert_eq!(
            env.store.get_item("HomeBudget_Data").unwrap(),
            Some("{\"a\":1}".to_string())
        );
        assert!(env.base_directory().join("HomeBudget_Data.json").exists());
        assert!(!env.base_directory().join("HomeBudget_Data.tmp").exists());
    }

    #[test]
    fn test_get_missing_key() {
        let env = TestEnvironment::new().unwrap();
        assert_eq!(env.store.get_item("nothing").unwrap(), None);
    }

    #[test]
    fn test_remove_item() {
        let env = TestEnvironment::new().unwrap();
        env.store.set_item("k", "v").unwrap();

        assert!(env.store.remove_item("k").unwrap());
        assert!(!env.store.remove_item("k").unwrap());
        assert_eq!(env.store.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_unsafe_key_characters_are_replaced() {
        let env = TestEnvironment::new().unwrap();
        env.store.set_item("../escape/key", "v").unwrap();

        assert!(env.base_directory().join("___escape_key.json").exists());
        assert_eq!(env.store.get_item("../escape/key").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_values_survive_new_store_instance() {
        let env = TestEnvironment::new().unwrap();
        env.store.set_item("k", "persisted").unwrap();

        let reopened = FileStore::new(env.base_directory()).unwrap();
        assert_eq!(reopened.get_item("k").unwrap(), Some("persisted".to_string()));
    }
}
