use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use gloo::timers::callback::Timeout;
use home_budget_backend::{AppController, BudgetConfig, ConfigRepository, LoadPhase};
use shared::{ElectricityInputs, ElectricityResults, IncomeItem, MonthExpenses, MonthlyData, MonthlyRecord};
use yew::prelude::*;

use crate::services::{LocalStorageStore, Logger};

type SharedController = Rc<RefCell<AppController<LocalStorageStore>>>;

/// Read-only copy of the controller state handed to the views
#[derive(Clone, PartialEq)]
pub struct BudgetSnapshot {
    pub phase: LoadPhase,
    pub current_month: String,
    pub monthly_data: MonthlyData,
    pub savings: Vec<IncomeItem>,
}

impl BudgetSnapshot {
    fn loading() -> Self {
        Self {
            phase: LoadPhase::Loading,
            current_month: String::new(),
            monthly_data: MonthlyData::new(),
            savings: Vec::new(),
        }
    }

    fn of(controller: &AppController<LocalStorageStore>) -> Self {
        Self {
            phase: controller.phase(),
            current_month: controller.current_month().to_string(),
            monthly_data: controller.monthly_data().clone(),
            savings: controller.savings().to_vec(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase == LoadPhase::Ready
    }

    pub fn current_record(&self) -> Option<&MonthlyRecord> {
        self.monthly_data.get(&self.current_month)
    }
}

#[derive(Clone, PartialEq)]
pub struct UseBudgetActions {
    /// Meter 1 and meter 2 amounts of a valid calculation
    pub merge_electricity: Callback<(f64, f64)>,
    pub record_electricity: Callback<(ElectricityInputs, ElectricityResults)>,
    pub replace_month_expenses: Callback<MonthExpenses>,
    pub replace_savings: Callback<Vec<IncomeItem>>,
    pub dismiss_error: Callback<()>,
}

pub struct UseBudgetResult {
    pub snapshot: BudgetSnapshot,
    pub config: Rc<BudgetConfig>,
    /// Message of the last failed save, if any
    pub error: Option<String>,
    pub actions: UseBudgetActions,
}

#[hook]
pub fn use_budget() -> UseBudgetResult {
    let config = use_memo((), |_| ConfigRepository::new(&LocalStorageStore).load());
    let controller: SharedController = {
        let config = config.clone();
        use_mut_ref(move || AppController::new(LocalStorageStore, &config))
    };
    let snapshot = use_state(BudgetSnapshot::loading);
    let error = use_state(|| None::<String>);

    // Load once on mount, keeping the loading screen up for at least the configured delay
    {
        let controller = controller.clone();
        let snapshot = snapshot.clone();
        let delay = config.loading_delay_ms;
        use_effect_with((), move |_| {
            let timeout = Timeout::new(delay, move || {
                controller.borrow_mut().load();
                let loaded = BudgetSnapshot::of(&controller.borrow());
                Logger::info_with_component(
                    "use_budget",
                    &format!("Showing '{}' ({} stored months)", loaded.current_month, loaded.monthly_data.len()),
                );
                snapshot.set(loaded);
            });
            move || drop(timeout)
        });
    }

    // Run a mutation and publish the new state, or surface the failure
    let commit = {
        let controller = controller.clone();
        let snapshot = snapshot.clone();
        let error = error.clone();
        Rc::new(move |action: &str, result: Result<()>| match result {
            Ok(()) => {
                snapshot.set(BudgetSnapshot::of(&controller.borrow()));
                error.set(None);
            }
            Err(e) => {
                Logger::error_with_component("use_budget", &format!("{} failed: {:#}", action, e));
                error.set(Some(format!("Грешка при запис: {}", e)));
            }
        })
    };

    let merge_electricity = {
        let controller = controller.clone();
        let commit = commit.clone();
        use_callback((), move |(em1, em2): (f64, f64), _| {
            let result = controller.borrow_mut().merge_electricity_into_expenses(em1, em2);
            commit("merge electricity", result);
        })
    };

    let record_electricity = {
        let controller = controller.clone();
        let commit = commit.clone();
        use_callback((), move |(inputs, results): (ElectricityInputs, ElectricityResults), _| {
            let result = controller.borrow_mut().record_electricity_snapshot(inputs, results);
            commit("record electricity snapshot", result);
        })
    };

    let replace_month_expenses = {
        let controller = controller.clone();
        let commit = commit.clone();
        use_callback((), move |expenses: MonthExpenses, _| {
            let result = controller.borrow_mut().replace_month_expenses(expenses);
            commit("save expenses", result);
        })
    };

    let replace_savings = {
        let controller = controller.clone();
        let commit = commit.clone();
        use_callback((), move |savings: Vec<IncomeItem>, _| {
            let result = controller.borrow_mut().replace_global_savings(savings);
            commit("save savings", result);
        })
    };

    let dismiss_error = {
        let error = error.clone();
        use_callback((), move |_, _| error.set(None))
    };

    UseBudgetResult {
        snapshot: (*snapshot).clone(),
        config,
        error: (*error).clone(),
        actions: UseBudgetActions {
            merge_electricity,
            record_electricity,
            replace_month_expenses,
            replace_savings,
            dismiss_error,
        },
    }
}
