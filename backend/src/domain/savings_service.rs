//! Global savings ledger.
//!
//! Savings are not tied to a month: the ledger is one flat list persisted
//! under its own storage key.

use anyhow::Result;
use log::info;
use shared::IncomeItem;

use super::expense_service::parse_amount;
use super::ids::{new_item_id, now_rfc3339};
use crate::error::BudgetError;

pub const SAVINGS_ID_PREFIX: &str = "sav";

/// Name given to an entry saved without one
pub const DEFAULT_SAVING_NAME: &str = "Спестяване";

pub struct SavingsService;

impl SavingsService {
    /// Append a savings entry and return it
    pub fn add_saving(list: &mut Vec<IncomeItem>, name: &str, amount: &str, note: &str) -> Result<IncomeItem> {
        let amount = parse_amount(amount)?;
        let name = match name.trim() {
            "" => DEFAULT_SAVING_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };
        let note = Some(note.trim()).filter(|n| !n.is_empty()).map(str::to_string);

        let item = IncomeItem {
            id: new_item_id(SAVINGS_ID_PREFIX),
            name,
            amount,
            note,
            date: now_rfc3339(),
        };
        info!("Adding savings entry {} ({}: {})", item.id, item.name, item.amount);
        list.push(item.clone());
        Ok(item)
    }

    /// Remove a savings entry by ID and return it
    pub fn delete_saving(list: &mut Vec<IncomeItem>, id: &str) -> Result<IncomeItem> {
        let index = list
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| BudgetError::ItemNotFound(id.to_string()))?;
        let removed = list.remove(index);
        info!("Deleted savings entry {}", removed.id);
        Ok(removed)
    }

    pub fn total_savings(list: &[IncomeItem]) -> f64 {
        list.iter().map(|item| item.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_total() {
        let mut list = Vec::new();
        let first = SavingsService::add_saving(&mut list, "Заплата", "250", "октомври").unwrap();
        SavingsService::add_saving(&mut list, "Бонус", "99,50", "").unwrap();

        assert!(first.id.starts_with("sav_"));
        assert_eq!(first.note.as_deref(), Some("октомври"));
        assert_eq!(list[1].note, None);
        assert!((SavingsService::total_savings(&list) - 349.5).abs() < 1e-9);
    }

    #[test]
    fn test_blank_name_gets_default() {
        let mut list = Vec::new();
        let item = SavingsService::add_saving(&mut list, "  ", "10", "").unwrap();
        assert_eq!(item.name, DEFAULT_SAVING_NAME);
    }

    #[test]
    fn test_invalid_amount_is_rejected() {
        let mut list = Vec::new();
        let err = SavingsService::add_saving(&mut list, "x", "-3", "").unwrap_err();

        assert!(matches!(err.downcast_ref::<BudgetError>(), Some(BudgetError::InvalidAmount(_))));
        assert!(list.is_empty());
    }

    #[test]
    fn test_delete() {
        let mut list = Vec::new();
        let a = SavingsService::add_saving(&mut list, "a", "1", "").unwrap();
        let b = SavingsService::add_saving(&mut list, "b", "2", "").unwrap();

        assert_eq!(SavingsService::delete_saving(&mut list, &a.id).unwrap(), a);
        assert_eq!(list, vec![b]);
        assert!(SavingsService::delete_saving(&mut list, &a.id).is_err());
        assert_eq!(SavingsService::total_savings(&list), 2.0);
    }

    #[test]
    fn test_empty_ledger_total_is_zero() {
        assert_eq!(SavingsService::total_savings(&[]), 0.0);
    }
}
