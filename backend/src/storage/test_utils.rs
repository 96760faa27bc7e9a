//! Test utilities with automatic cleanup of on-disk test data
//!
//! The temporary directory is removed when the environment is dropped, even
//! if the test panics.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::budget_repository::BudgetRepository;
use super::file::FileStore;

/// RAII test environment around a [`FileStore`] in a temp directory
pub struct TestEnvironment {
    /// Kept alive so the directory is only deleted on drop
    _temp_dir: TempDir,
    pub store: FileStore,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let store = FileStore::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            store,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    /// Repository over this environment's store with the default keys
    pub fn repository(&self) -> BudgetRepository<FileStore> {
        BudgetRepository::new(self.store.clone())
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        if std::env::var("HOME_BUDGET_DEBUG_TESTS").is_ok() {
            println!("Cleaning up test environment: {:?}", self.base_path);
        }
    }
}
