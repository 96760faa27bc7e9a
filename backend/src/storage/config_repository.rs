//! Read-only access to the optional configuration blob.

use log::{info, warn};

use super::traits::KeyValueStore;
use crate::config::{BudgetConfig, STORAGE_KEY_CONFIG};

pub struct ConfigRepository<'a, S: KeyValueStore> {
    store: &'a S,
}

impl<'a, S: KeyValueStore> ConfigRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Load the configuration, falling back to defaults when the key is
    /// missing, unreadable or malformed
    pub fn load(&self) -> BudgetConfig {
        match self.store.get_item(STORAGE_KEY_CONFIG) {
            Ok(Some(raw)) => match serde_json::from_str::<BudgetConfig>(&raw) {
                Ok(config) => {
                    info!("Loaded budget config from '{}'", STORAGE_KEY_CONFIG);
                    config
                }
                Err(e) => {
                    warn!("Ignoring malformed budget config: {}", e);
                    BudgetConfig::default()
                }
            },
            Ok(None) => BudgetConfig::default(),
            Err(e) => {
                warn!("Could not read budget config, using defaults: {:#}", e);
                BudgetConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryStore;

    #[test]
    fn test_missing_config_uses_defaults() {
        let store = InMemoryStore::new();
        assert_eq!(ConfigRepository::new(&store).load(), BudgetConfig::default());
    }

    #[test]
    fn test_stored_config_overrides_defaults() {
        let store = InMemoryStore::new()
            .with_item("HomeBudget_Config", r#"{ "default_price_t2": "0.1", "currency_symbol": "лв" }"#);
        let config = ConfigRepository::new(&store).load();

        assert_eq!(config.default_price_t2, "0.1");
        assert_eq!(config.currency_symbol, "лв");
        assert_eq!(config.default_price_t1, "0.14986");
    }

    #[test]
    fn test_malformed_config_uses_defaults() {
        let store = InMemoryStore::new().with_item("HomeBudget_Config", "[1, 2");
        assert_eq!(ConfigRepository::new(&store).load(), BudgetConfig::default());
    }

    #[test]
    fn test_load_never_writes() {
        let store = InMemoryStore::new();
        ConfigRepository::new(&store).load();
        assert!(store.is_empty());
    }
}
