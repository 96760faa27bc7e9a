//! # Home Budget Backend
//!
//! Contains all non-UI logic for the home budget tracker.
//!
//! This crate brings together:
//! - **Domain**: electricity split calculation, expense/savings bookkeeping,
//!   reports, text export and the application state controller
//! - **Storage**: the key-value store abstraction and the repository that
//!   persists the monthly records and the savings ledger as whole JSON blobs
//!
//! The backend is UI-agnostic and synchronous so it can run inside the
//! browser (wasm) as well as natively in tests.
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (Yew frontend)
//!     ↓
//! AppController (load gate, record merging)
//!     ↓
//! Domain services (pure functions over shared types)
//!     ↓
//! Storage Layer (BudgetRepository over a KeyValueStore)
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod storage;

pub use config::BudgetConfig;
pub use domain::*;
pub use error::BudgetError;
pub use storage::*;
