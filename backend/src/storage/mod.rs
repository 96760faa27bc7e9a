//! # Storage Module
//!
//! Handles all data persistence for the home budget tracker.
//!
//! The domain never talks to a concrete store. It goes through
//! [`BudgetRepository`], which reads and writes whole JSON blobs through the
//! [`KeyValueStore`] trait. That trait mirrors the browser's local storage, so
//! the frontend can plug in `window.localStorage` while tests use
//! [`InMemoryStore`] or the file-backed [`FileStore`].
//!
//! ## Keys
//!
//! - `HomeBudget_Data`: object keyed by month label, values are `MonthlyRecord`
//! - `HomeBudget_GlobalSavings`: array of `IncomeItem`
//! - `HomeBudget_Config`: optional `BudgetConfig`, never written by the app

pub mod budget_repository;
pub mod config_repository;
pub mod file;
pub mod memory;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use budget_repository::BudgetRepository;
pub use config_repository::ConfigRepository;
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use traits::KeyValueStore;
