//! # Budget Repository
//!
//! Reads and writes the two budget blobs: the per-month record map and the
//! global savings ledger. Each write serializes the whole value and replaces
//! whatever was stored before; there is no incremental patching.
//!
//! Reads never fail. A store error or a blob that does not deserialize is
//! logged and treated as "no prior data", so a corrupted entry can only ever
//! produce an empty budget, never a crash.
//!
//! Months are decoded one by one. A month that does not match the record
//! shape is left out of the loaded data but kept as raw JSON and written
//! back unchanged, so one bad record never costs the others.

use anyhow::Result;
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{IncomeItem, MonthlyData, MonthlyRecord};
use std::cell::RefCell;
use std::collections::BTreeMap;

use super::traits::KeyValueStore;
use crate::config::{BudgetConfig, STORAGE_KEY_MONTHLY, STORAGE_KEY_SAVINGS};
use crate::error::BudgetError;

#[derive(Clone)]
pub struct BudgetRepository<S: KeyValueStore> {
    store: S,
    monthly_key: String,
    savings_key: String,
    /// Stored months that failed to decode on the last load, by label
    unreadable_months: RefCell<BTreeMap<String, Value>>,
}

impl<S: KeyValueStore> BudgetRepository<S> {
    /// Repository using the standard storage keys
    pub fn new(store: S) -> Self {
        Self {
            store,
            monthly_key: STORAGE_KEY_MONTHLY.to_string(),
            savings_key: STORAGE_KEY_SAVINGS.to_string(),
            unreadable_months: RefCell::default(),
        }
    }

    /// Repository using the keys named in `config`
    pub fn with_config(store: S, config: &BudgetConfig) -> Self {
        Self {
            store,
            monthly_key: config.monthly_data_key.clone(),
            savings_key: config.savings_key.clone(),
            unreadable_months: RefCell::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load every stored month; empty on missing or unreadable data
    pub fn load_monthly_data(&self) -> MonthlyData {
        let stored: BTreeMap<String, Value> = self.load_blob(&self.monthly_key, "monthly data");

        let mut data = MonthlyData::new();
        let mut unreadable = BTreeMap::new();
        for (month, value) in stored {
            match MonthlyRecord::deserialize(&value) {
                Ok(record) => {
                    data.insert(month, record);
                }
                Err(e) => {
                    warn!("Keeping unreadable record '{}' as stored: {}", month, e);
                    unreadable.insert(month, value);
                }
            }
        }

        info!("Loaded {} monthly records ({} unreadable)", data.len(), unreadable.len());
        *self.unreadable_months.borrow_mut() = unreadable;
        data
    }

    /// Labels of stored months that could not be decoded on the last load
    pub fn unreadable_months(&self) -> Vec<String> {
        self.unreadable_months.borrow().keys().cloned().collect()
    }

    /// Load the savings ledger; empty on missing or unreadable data
    pub fn load_savings(&self) -> Vec<IncomeItem> {
        let savings: Vec<IncomeItem> = self.load_blob(&self.savings_key, "savings data");
        info!("Loaded {} savings entries", savings.len());
        savings
    }

    /// Replace the stored month map with `data`
    pub fn save_monthly_data(&self, data: &MonthlyData) -> Result<()> {
        // A month written by the app replaces its unreadable stored version
        let mut merged: BTreeMap<String, Value> = self
            .unreadable_months
            .borrow()
            .iter()
            .filter(|(month, _)| !data.contains_key(*month))
            .map(|(month, value)| (month.clone(), value.clone()))
            .collect();
        for (month, record) in data {
            let value = serde_json::to_value(record).map_err(|e| BudgetError::Storage {
                key: self.monthly_key.clone(),
                message: e.to_string(),
            })?;
            merged.insert(month.clone(), value);
        }

        self.save_blob(&self.monthly_key, &merged)?;
        debug!("Persisted {} monthly records", data.len());
        Ok(())
    }

    /// Replace the stored savings ledger with `savings`
    pub fn save_savings(&self, savings: &[IncomeItem]) -> Result<()> {
        self.save_blob(&self.savings_key, savings)?;
        debug!("Persisted {} savings entries", savings.len());
        Ok(())
    }

    fn load_blob<T: DeserializeOwned + Default>(&self, key: &str, what: &str) -> T {
        let raw = match self.store.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored {} under '{}'", what, key);
                return T::default();
            }
            Err(e) => {
                error!("Failed to load {}: {:#}", what, e);
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to load {}: stored value under '{}' is malformed: {}", what, key, e);
                T::default()
            }
        }
    }

    fn save_blob<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).map_err(|e| BudgetError::Storage {
            key: key.to_string(),
            message: e.to_string(),
        })?;

        self.store.set_item(key, &json).map_err(|e| BudgetError::Storage {
            key: key.to_string(),
            message: format!("{:#}", e),
        })?;
        Ok(())
    }
}
