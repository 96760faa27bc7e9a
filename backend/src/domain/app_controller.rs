//! # Application State Controller
//!
//! Single owner of the budget state. Views read snapshots from it and send
//! every change through it; nothing else writes to storage.
//!
//! ## Load gate
//!
//! The controller starts in [`LoadPhase::Loading`] and moves to
//! [`LoadPhase::Ready`] once both blobs have been read. Every mutation is
//! rejected with [`BudgetError::NotReady`] before that, so an empty
//! pre-load state can never overwrite stored data.
//!
//! ## Persistence
//!
//! Each mutation builds the updated value, writes it through the
//! [`BudgetRepository`] and only then replaces the in-memory copy. A failed
//! write therefore leaves memory and storage in agreement.

use anyhow::Result;
use log::{info, warn};
use shared::{ElectricityInputs, ElectricityResults, IncomeItem, MonthExpenses, MonthlyData, MonthlyRecord};

use super::expense_service::ExpenseService;
use super::formatting::current_month_label;
use super::ids::now_rfc3339;
use crate::config::BudgetConfig;
use crate::error::BudgetError;
use crate::storage::{BudgetRepository, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
}

pub struct AppController<S: KeyValueStore> {
    repository: BudgetRepository<S>,
    expense_service: ExpenseService,
    phase: LoadPhase,
    current_month: String,
    monthly_data: MonthlyData,
    savings: Vec<IncomeItem>,
}

impl<S: KeyValueStore> AppController<S> {
    pub fn new(store: S, config: &BudgetConfig) -> Self {
        Self {
            repository: BudgetRepository::with_config(store, config),
            expense_service: ExpenseService::new(config),
            phase: LoadPhase::Loading,
            current_month: String::new(),
            monthly_data: MonthlyData::new(),
            savings: Vec::new(),
        }
    }

    /// Read stored data for the current calendar month and become ready
    pub fn load(&mut self) {
        self.load_for_month(&current_month_label());
    }

    /// Read stored data with `month_label` as the current month.
    ///
    /// Only the first call has an effect.
    pub fn load_for_month(&mut self, month_label: &str) {
        if self.phase == LoadPhase::Ready {
            warn!("Budget data already loaded, ignoring reload for '{}'", month_label);
            return;
        }

        self.current_month = month_label.to_string();
        self.monthly_data = self.repository.load_monthly_data();
        self.savings = self.repository.load_savings();
        self.phase = LoadPhase::Ready;
        info!(
            "Budget ready for '{}': {} months, {} savings entries",
            self.current_month,
            self.monthly_data.len(),
            self.savings.len()
        );
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == LoadPhase::Ready
    }

    /// Label of the month being edited; empty until loaded
    pub fn current_month(&self) -> &str {
        &self.current_month
    }

    pub fn monthly_data(&self) -> &MonthlyData {
        &self.monthly_data
    }

    pub fn current_record(&self) -> Option<&MonthlyRecord> {
        self.monthly_data.get(&self.current_month)
    }

    pub fn savings(&self) -> &[IncomeItem] {
        &self.savings
    }

    pub fn expense_service(&self) -> &ExpenseService {
        &self.expense_service
    }

    /// Expenses the monthly view should start from for the current month
    pub fn initial_expenses(&self) -> MonthExpenses {
        self.expense_service.initial_expenses(self.current_record())
    }

    /// Add the two meter amounts to the current month's variable expenses,
    /// replacing the ones added by any earlier calculation
    pub fn merge_electricity_into_expenses(&mut self, em1_amount: f64, em2_amount: f64) -> Result<()> {
        ensure_finite(&[em1_amount, em2_amount])?;
        let service = self.expense_service.clone();
        self.update_current_record(|record| {
            service.merge_electricity(&mut record.expenses, em1_amount, em2_amount);
        })?;
        info!("Merged electricity bill into '{}': {:.2} / {:.2}", self.current_month, em1_amount, em2_amount);
        Ok(())
    }

    /// Overwrite the current month's expenses
    pub fn replace_month_expenses(&mut self, expenses: MonthExpenses) -> Result<()> {
        self.update_current_record(|record| record.expenses = expenses)?;
        info!("Saved expenses for '{}'", self.current_month);
        Ok(())
    }

    /// Store the last valid electricity calculation on the current month
    pub fn record_electricity_snapshot(
        &mut self,
        inputs: ElectricityInputs,
        results: ElectricityResults,
    ) -> Result<()> {
        ensure_finite(&[
            inputs.old_t1,
            inputs.new_t1,
            inputs.old_t2,
            inputs.new_t2,
            inputs.day_price_with_vat,
            inputs.night_price_with_vat,
            inputs.invoice_total,
            results.cons_t1_kwh,
            results.cons_t2_kwh,
            results.total_cons_em1_kwh,
            results.cost_em1_eur,
            results.em2_remainder_eur,
        ])?;
        self.update_current_record(|record| {
            record.inputs = inputs;
            record.results = results;
        })?;
        info!("Saved electricity snapshot for '{}'", self.current_month);
        Ok(())
    }

    /// Overwrite the savings ledger
    pub fn replace_global_savings(&mut self, savings: Vec<IncomeItem>) -> Result<()> {
        self.ensure_ready()?;
        self.repository.save_savings(&savings)?;
        self.savings = savings;
        info!("Saved {} savings entries", self.savings.len());
        Ok(())
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.phase != LoadPhase::Ready {
            warn!("Rejected change while budget data is loading");
            return Err(BudgetError::NotReady.into());
        }
        Ok(())
    }

    /// Apply `change` to a copy of the current month's record (created if
    /// missing), persist the whole map, then commit it to memory
    fn update_current_record(&mut self, change: impl FnOnce(&mut MonthlyRecord)) -> Result<()> {
        self.ensure_ready()?;

        let mut data = self.monthly_data.clone();
        let record = data
            .entry(self.current_month.clone())
            .or_insert_with(|| MonthlyRecord::empty(&self.current_month, now_rfc3339()));
        change(record);

        self.repository.save_monthly_data(&data)?;
        self.monthly_data = data;
        Ok(())
    }
}

/// JSON has no infinity or NaN; such values would be stored as `null`
fn ensure_finite(values: &[f64]) -> Result<()> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(value) => Err(BudgetError::InvalidAmount(value.to_string()).into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category_catalog::{find_fixed_category, find_variable_category};
    use crate::domain::electricity_calculator::calculate_electricity;
    use crate::domain::savings_service::SavingsService;
    use crate::storage::memory::InMemoryStore;
    use anyhow::anyhow;
    use shared::ElectricityForm;
    use std::cell::Cell;

    const MONTH: &str = "Октомври 2026";

    fn ready_controller(store: &InMemoryStore) -> AppController<InMemoryStore> {
        let mut controller = AppController::new(store.clone(), &BudgetConfig::default());
        controller.load_for_month(MONTH);
        controller
    }

    fn electricity_count(controller: &AppController<InMemoryStore>) -> usize {
        controller
            .current_record()
            .unwrap()
            .expenses
            .additional_expenses
            .iter()
            .filter(|e| e.category_name.starts_with("Сметка Ток"))
            .count()
    }

    #[test]
    fn test_mutations_before_load_are_rejected() {
        let store = InMemoryStore::new();
        let mut controller = AppController::new(store.clone(), &BudgetConfig::default());
        assert_eq!(controller.phase(), LoadPhase::Loading);

        let results = [
            controller.merge_electricity_into_expenses(1.0, 2.0),
            controller.replace_month_expenses(MonthExpenses::default()),
            controller.replace_global_savings(Vec::new()),
            controller.record_electricity_snapshot(ElectricityInputs::default(), ElectricityResults::default()),
        ];
        for result in results {
            let err = result.unwrap_err();
            assert_eq!(err.downcast_ref::<BudgetError>(), Some(&BudgetError::NotReady));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_transitions_to_ready() {
        let store = InMemoryStore::new();
        let controller = ready_controller(&store);

        assert!(controller.is_ready());
        assert_eq!(controller.current_month(), MONTH);
        assert!(controller.monthly_data().is_empty());
        assert!(controller.current_record().is_none());
        assert!(controller.savings().is_empty());
    }

    #[test]
    fn test_load_uses_current_month_label() {
        let mut controller = AppController::new(InMemoryStore::new(), &BudgetConfig::default());
        controller.load();
        assert_eq!(controller.current_month(), current_month_label());
    }

    #[test]
    fn test_second_load_is_ignored() {
        let store = InMemoryStore::new();
        let mut controller = ready_controller(&store);
        controller.load_for_month("Ноември 2026");
        assert_eq!(controller.current_month(), MONTH);
    }

    #[test]
    fn test_merge_electricity_twice_keeps_two_items() {
        let store = InMemoryStore::new();
        let mut controller = ready_controller(&store);

        controller.merge_electricity_into_expenses(10.2, 9.8).unwrap();
        controller.merge_electricity_into_expenses(12.0, 8.0).unwrap();

        assert_eq!(electricity_count(&controller), 2);
        let amounts: Vec<f64> = controller
            .current_record()
            .unwrap()
            .expenses
            .additional_expenses
            .iter()
            .map(|e| e.amount)
            .collect();
        assert_eq!(amounts, vec![12.0, 8.0]);
    }

    #[test]
    fn test_merge_preserves_other_record_fields() {
        let store = InMemoryStore::new();
        let mut controller = ready_controller(&store);

        let mut expenses = controller.initial_expenses();
        let service = controller.expense_service().clone();
        service
            .add_variable(&mut expenses, &find_variable_category("food").unwrap(), "25", "пазар")
            .unwrap();
        expenses.saved_em2_eur = 4.2;
        controller.replace_month_expenses(expenses.clone()).unwrap();

        let calc = calculate_electricity(&ElectricityForm {
            old_t1: "100".to_string(),
            new_t1: "150".to_string(),
            old_t2: "50".to_string(),
            new_t2: "80".to_string(),
            price_t1: "0.15".to_string(),
            price_t2: "0.09".to_string(),
            invoice_total: "20".to_string(),
        });
        controller.record_electricity_snapshot(calc.inputs.clone(), calc.results()).unwrap();
        let generated_at = controller.current_record().unwrap().meta.generated_at.clone();

        controller.merge_electricity_into_expenses(calc.cost_em1, calc.em2_remainder).unwrap();

        let record = controller.current_record().unwrap();
        assert_eq!(record.meta.generated_at, generated_at);
        assert_eq!(record.inputs, calc.inputs);
        assert_eq!(record.results, calc.results());
        assert_eq!(record.expenses.saved_em2_eur, 4.2);
        assert_eq!(record.expenses.fixed_expenses, expenses.fixed_expenses);
        assert_eq!(record.expenses.additional_expenses[0], expenses.additional_expenses[0]);
        assert_eq!(record.expenses.additional_expenses.len(), 3);
    }

    #[test]
    fn test_state_survives_reload() {
        let store = InMemoryStore::new();
        let mut controller = ready_controller(&store);

        let mut expenses = MonthExpenses::default();
        controller
            .expense_service()
            .add_fixed(&mut expenses, &find_fixed_category("rent").unwrap(), "500")
            .unwrap();
        controller.replace_month_expenses(expenses).unwrap();
        controller.merge_electricity_into_expenses(10.2, 9.8).unwrap();

        let mut savings = controller.savings().to_vec();
        SavingsService::add_saving(&mut savings, "Заплата", "300", "").unwrap();
        controller.replace_global_savings(savings).unwrap();

        let reloaded = ready_controller(&store);
        assert_eq!(reloaded.monthly_data(), controller.monthly_data());
        assert_eq!(reloaded.savings(), controller.savings());
    }

    #[test]
    fn test_writes_only_touch_the_current_month() {
        let store = InMemoryStore::new();
        let mut earlier = ready_controller(&store);
        earlier.merge_electricity_into_expenses(1.0, 2.0).unwrap();

        let mut controller = AppController::new(store.clone(), &BudgetConfig::default());
        controller.load_for_month("Ноември 2026");
        controller.replace_month_expenses(MonthExpenses::default()).unwrap();

        assert_eq!(controller.monthly_data().len(), 2);
        assert_eq!(controller.monthly_data().get(MONTH), earlier.current_record());
        assert_eq!(controller.current_record().unwrap().incomes, Vec::new());
    }

    #[test]
    fn test_replace_month_expenses_overwrites_wholesale() {
        let store = InMemoryStore::new();
        let mut controller = ready_controller(&store);
        controller.merge_electricity_into_expenses(1.0, 2.0).unwrap();

        controller.replace_month_expenses(MonthExpenses::default()).unwrap();

        let record = controller.current_record().unwrap();
        assert!(record.expenses.additional_expenses.is_empty());
        assert_eq!(record.month, MONTH);
        assert_eq!(record.tab, "expenses");
    }

    /// Store that can be switched to fail writes
    #[derive(Clone, Default)]
    struct FlakyStore {
        inner: InMemoryStore,
        fail_writes: std::rc::Rc<Cell<bool>>,
    }

    impl KeyValueStore for FlakyStore {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            self.inner.get_item(key)
        }
        fn set_item(&self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes.get() {
                return Err(anyhow!("quota exceeded"));
            }
            self.inner.set_item(key, value)
        }
        fn remove_item(&self, key: &str) -> Result<bool> {
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let store = FlakyStore::default();
        let mut controller = AppController::new(store.clone(), &BudgetConfig::default());
        controller.load_for_month(MONTH);
        controller.merge_electricity_into_expenses(1.0, 2.0).unwrap();
        let before = controller.monthly_data().clone();

        store.fail_writes.set(true);
        let err = controller.replace_month_expenses(MonthExpenses::default()).unwrap_err();
        assert!(matches!(err.downcast_ref::<BudgetError>(), Some(BudgetError::Storage { .. })));
        assert!(controller.replace_global_savings(Vec::new()).is_err());

        assert_eq!(controller.monthly_data(), &before);
        assert!(controller.savings().is_empty());
    }

    #[test]
    fn test_non_finite_amounts_are_rejected() {
        let store = InMemoryStore::new();
        let mut earlier = AppController::new(store.clone(), &BudgetConfig::default());
        earlier.load_for_month("Септември 2026");
        earlier.merge_electricity_into_expenses(10.2, 9.8).unwrap();

        let mut controller = ready_controller(&store);
        let err = controller
            .merge_electricity_into_expenses(f64::INFINITY, f64::NEG_INFINITY)
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<BudgetError>(), Some(BudgetError::InvalidAmount(_))));

        let results = ElectricityResults { cost_em1_eur: f64::NAN, ..ElectricityResults::default() };
        assert!(controller.record_electricity_snapshot(ElectricityInputs::default(), results).is_err());

        let overflow = calculate_electricity(&ElectricityForm {
            old_t1: "0".to_string(),
            new_t1: "1e308".to_string(),
            old_t2: "0".to_string(),
            new_t2: "1".to_string(),
            price_t1: "10".to_string(),
            price_t2: "0.09".to_string(),
            invoice_total: "20".to_string(),
        });
        assert!(!overflow.is_valid);

        let reloaded = ready_controller(&store);
        assert_eq!(reloaded.monthly_data().len(), 1);
        assert!(reloaded.monthly_data().contains_key("Септември 2026"));
        assert!(reloaded.current_record().is_none());
    }

    #[test]
    fn test_malformed_storage_loads_as_empty_and_is_overwritten() {
        let store = InMemoryStore::new().with_item("HomeBudget_Data", "not json");
        let mut controller = ready_controller(&store);
        assert!(controller.monthly_data().is_empty());

        controller.merge_electricity_into_expenses(3.0, 4.0).unwrap();
        let reloaded = ready_controller(&store);
        assert_eq!(reloaded.monthly_data().len(), 1);
    }
}
