//! Runtime configuration of the budget tracker.
//!
//! Every field has a default, so a partially written (or absent) config blob
//! still produces a usable configuration.

use serde::{Deserialize, Serialize};

/// Storage key holding the per-month record map
pub const STORAGE_KEY_MONTHLY: &str = "HomeBudget_Data";
/// Storage key holding the global savings ledger
pub const STORAGE_KEY_SAVINGS: &str = "HomeBudget_GlobalSavings";
/// Optional, read-only storage key with a JSON [`BudgetConfig`]
pub const STORAGE_KEY_CONFIG: &str = "HomeBudget_Config";

/// Category-name prefix that marks expense items derived from the electricity bill
pub const ELECTRICITY_PREFIX: &str = "Сметка Ток";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    pub monthly_data_key: String,
    pub savings_key: String,
    pub electricity_prefix: String,
    /// Pre-filled day tariff (EUR per kWh, VAT included)
    pub default_price_t1: String,
    /// Pre-filled night tariff (EUR per kWh, VAT included)
    pub default_price_t2: String,
    /// Fixed expenses offered for a month that has no stored expenses yet
    pub default_fixed_expenses: Vec<DefaultFixedExpense>,
    pub currency_symbol: String,
    /// Minimum time the loading screen stays visible
    pub loading_delay_ms: u32,
    /// How long the "added" confirmation stays on the electricity view
    pub success_message_duration_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultFixedExpense {
    /// ID of a category from the fixed catalog
    pub category_id: String,
    pub amount: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            monthly_data_key: STORAGE_KEY_MONTHLY.to_string(),
            savings_key: STORAGE_KEY_SAVINGS.to_string(),
            electricity_prefix: ELECTRICITY_PREFIX.to_string(),
            default_price_t1: "0.14986".to_string(),
            default_price_t2: "0.08870".to_string(),
            default_fixed_expenses: vec![
                DefaultFixedExpense { category_id: "credit".to_string(), amount: 353.69 },
                DefaultFixedExpense { category_id: "phone".to_string(), amount: 24.54 },
                DefaultFixedExpense { category_id: "internet".to_string(), amount: 23.01 },
            ],
            currency_symbol: "€".to_string(),
            loading_delay_ms: 500,
            success_message_duration_ms: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_fixed_storage_keys() {
        let config = BudgetConfig::default();
        assert_eq!(config.monthly_data_key, "HomeBudget_Data");
        assert_eq!(config.savings_key, "HomeBudget_GlobalSavings");
        assert_eq!(config.electricity_prefix, "Сметка Ток");
        assert_eq!(config.loading_delay_ms, 500);
    }

    #[test]
    fn test_partial_config_fills_in_defaults() {
        let config: BudgetConfig =
            serde_json::from_str(r#"{ "default_price_t1": "0.2", "loading_delay_ms": 0 }"#).unwrap();
        assert_eq!(config.default_price_t1, "0.2");
        assert_eq!(config.default_price_t2, "0.08870");
        assert_eq!(config.loading_delay_ms, 0);
        assert_eq!(config.default_fixed_expenses.len(), 3);
    }
}
