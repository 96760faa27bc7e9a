//! Bookkeeping for the fixed and variable expenses of a month.
//!
//! All operations work on a [`MonthExpenses`] value owned by the caller; the
//! service itself holds only configuration. Persisting the result is the
//! controller's job.

use anyhow::Result;
use log::{debug, info, warn};
use shared::{CategoryIcon, ExpenseCategory, ExpenseItem, MonthExpenses, MonthlyRecord};

use super::category_catalog::{find_fixed_category, find_variable_category, ELECTRICITY_CATEGORY_ID};
use super::formatting::parse_decimal;
use super::ids::{new_item_id, now_rfc3339};
use crate::config::{BudgetConfig, DefaultFixedExpense};
use crate::error::BudgetError;

pub const FIXED_ID_PREFIX: &str = "fix";
pub const VARIABLE_ID_PREFIX: &str = "exp";

/// Parse a user-entered amount; empty, non-numeric and negative input is rejected
pub fn parse_amount(input: &str) -> Result<f64> {
    match parse_decimal(input) {
        Some(amount) if amount >= 0.0 => Ok(amount),
        _ => Err(BudgetError::InvalidAmount(input.trim().to_string()).into()),
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseService {
    default_fixed: Vec<DefaultFixedExpense>,
    electricity_prefix: String,
}

impl Default for ExpenseService {
    fn default() -> Self {
        Self::new(&BudgetConfig::default())
    }
}

impl ExpenseService {
    pub fn new(config: &BudgetConfig) -> Self {
        Self {
            default_fixed: config.default_fixed_expenses.clone(),
            electricity_prefix: config.electricity_prefix.clone(),
        }
    }

    /// Append a fixed expense and return the created item
    pub fn add_fixed(
        &self,
        expenses: &mut MonthExpenses,
        category: &ExpenseCategory,
        amount: &str,
    ) -> Result<ExpenseItem> {
        let item = new_item(FIXED_ID_PREFIX, category, parse_amount(amount)?, None);
        info!("Adding fixed expense {} ({}: {})", item.id, item.category_name, item.amount);
        expenses.fixed_expenses.push(item.clone());
        Ok(item)
    }

    /// Append a variable expense; a blank note is dropped
    pub fn add_variable(
        &self,
        expenses: &mut MonthExpenses,
        category: &ExpenseCategory,
        amount: &str,
        note: &str,
    ) -> Result<ExpenseItem> {
        let note = Some(note.trim()).filter(|n| !n.is_empty()).map(str::to_string);
        let item = new_item(VARIABLE_ID_PREFIX, category, parse_amount(amount)?, note);
        info!("Adding variable expense {} ({}: {})", item.id, item.category_name, item.amount);
        expenses.additional_expenses.push(item.clone());
        Ok(item)
    }

    /// Remove a fixed expense by ID and return it
    pub fn delete_fixed(&self, expenses: &mut MonthExpenses, id: &str) -> Result<ExpenseItem> {
        remove_by_id(&mut expenses.fixed_expenses, id)
    }

    /// Remove a variable expense by ID and return it
    pub fn delete_variable(&self, expenses: &mut MonthExpenses, id: &str) -> Result<ExpenseItem> {
        remove_by_id(&mut expenses.additional_expenses, id)
    }

    pub fn total_fixed(expenses: &MonthExpenses) -> f64 {
        expenses.fixed_expenses.iter().map(|e| e.amount).sum()
    }

    pub fn total_variable(expenses: &MonthExpenses) -> f64 {
        expenses.additional_expenses.iter().map(|e| e.amount).sum()
    }

    pub fn total(expenses: &MonthExpenses) -> f64 {
        Self::total_fixed(expenses) + Self::total_variable(expenses)
    }

    /// Fresh items for the configured default fixed expenses.
    ///
    /// Entries naming a category outside the fixed catalog are skipped.
    pub fn default_fixed_expenses(&self) -> Vec<ExpenseItem> {
        self.default_fixed
            .iter()
            .filter_map(|default| match find_fixed_category(&default.category_id) {
                Some(category) => Some(new_item(FIXED_ID_PREFIX, &category, default.amount, None)),
                None => {
                    warn!("Skipping default fixed expense with unknown category '{}'", default.category_id);
                    None
                }
            })
            .collect()
    }

    /// Expenses the monthly view starts from.
    ///
    /// Stored expenses are used as they are, except that an empty fixed list
    /// is seeded with the default fixed expenses.
    pub fn initial_expenses(&self, record: Option<&MonthlyRecord>) -> MonthExpenses {
        let mut expenses = record.map(|r| r.expenses.clone()).unwrap_or_default();
        if expenses.fixed_expenses.is_empty() {
            debug!("Seeding default fixed expenses");
            expenses.fixed_expenses = self.default_fixed_expenses();
        }
        expenses
    }

    /// Whether `item` was produced by an electricity bill merge
    pub fn is_electricity_item(&self, item: &ExpenseItem) -> bool {
        item.category_name.starts_with(&self.electricity_prefix)
    }

    /// Replace any previous electricity items with one item per meter
    pub fn merge_electricity(&self, expenses: &mut MonthExpenses, em1_amount: f64, em2_amount: f64) {
        let before = expenses.additional_expenses.len();
        expenses.additional_expenses.retain(|item| !self.is_electricity_item(item));
        let removed = before - expenses.additional_expenses.len();
        if removed > 0 {
            debug!("Replacing {} previous electricity items", removed);
        }

        expenses.additional_expenses.push(self.electricity_item(1, em1_amount));
        expenses.additional_expenses.push(self.electricity_item(2, em2_amount));
    }

    fn electricity_item(&self, meter: u8, amount: f64) -> ExpenseItem {
        let (icon, color) = find_variable_category(ELECTRICITY_CATEGORY_ID)
            .map(|c| (c.icon_name, c.color_class))
            .unwrap_or((CategoryIcon::Zap, "bg-yellow-100 text-yellow-600".to_string()));

        ExpenseItem {
            id: new_item_id(&format!("electricity_em{}", meter)),
            category_id: ELECTRICITY_CATEGORY_ID.to_string(),
            category_name: format!("{} - Електромер {}", self.electricity_prefix, meter),
            category_icon: icon,
            category_color: color,
            amount,
            note: None,
            date: now_rfc3339(),
        }
    }
}

fn new_item(prefix: &str, category: &ExpenseCategory, amount: f64, note: Option<String>) -> ExpenseItem {
    ExpenseItem {
        id: new_item_id(prefix),
        category_id: category.id.clone(),
        category_name: category.name.clone(),
        category_icon: category.icon_name,
        category_color: category.color_class.clone(),
        amount,
        note,
        date: now_rfc3339(),
    }
}

fn remove_by_id(items: &mut Vec<ExpenseItem>, id: &str) -> Result<ExpenseItem> {
    let index = items
        .iter()
        .position(|item| item.id == id)
        .ok_or_else(|| BudgetError::ItemNotFound(id.to_string()))?;
    let removed = items.remove(index);
    info!("Deleted expense {} ({})", removed.id, removed.category_name);
    Ok(removed)
}
