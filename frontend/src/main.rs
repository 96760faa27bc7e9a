use home_budget_backend::ExpenseService;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::{ElectricityTab, Header, MonthlyExpensesTab, ReportsTab, SavingsTab, Tab};
use hooks::use_budget;

#[function_component(App)]
fn app() -> Html {
    let budget = use_budget();
    let active_tab = use_state(|| Tab::Monthly);

    let on_select_tab = {
        let active_tab = active_tab.clone();
        Callback::from(move |tab: Tab| active_tab.set(tab))
    };

    if !budget.snapshot.is_ready() {
        return html! {
            <div class="app loading-screen">
                <div class="spinner"></div>
                <p class="loading">{"Зареждане..."}</p>
            </div>
        };
    }

    let snapshot = &budget.snapshot;
    let config = budget.config.clone();
    let currency = config.currency_symbol.clone();
    let record = snapshot.current_record().cloned();
    let month_total = record.as_ref().map(|r| ExpenseService::total(&r.expenses)).unwrap_or(0.0);

    let error_banner = match &budget.error {
        Some(message) => {
            let dismiss = budget.actions.dismiss_error.clone();
            html! {
                <div class="error-banner">
                    <span>{message}</span>
                    <button class="dismiss-button" onclick={Callback::from(move |_: MouseEvent| dismiss.emit(()))}>
                        {"✕"}
                    </button>
                </div>
            }
        }
        None => html! {},
    };

    let content = match *active_tab {
        Tab::Monthly => html! {
            <MonthlyExpensesTab
                current_month={snapshot.current_month.clone()}
                record={record.clone()}
                config={config.clone()}
                on_save={budget.actions.replace_month_expenses.clone()}
            />
        },
        Tab::Electricity => html! {
            <ElectricityTab
                current_month={snapshot.current_month.clone()}
                config={config.clone()}
                on_add_to_expenses={budget.actions.merge_electricity.clone()}
                on_record={budget.actions.record_electricity.clone()}
            />
        },
        Tab::Reports => html! {
            <ReportsTab monthly_data={snapshot.monthly_data.clone()} currency_symbol={currency.clone()} />
        },
        Tab::Savings => html! {
            <SavingsTab
                savings={snapshot.savings.clone()}
                currency_symbol={currency.clone()}
                on_save={budget.actions.replace_savings.clone()}
            />
        },
    };

    html! {
        <div class="app">
            <Header
                current_month={snapshot.current_month.clone()}
                {month_total}
                currency_symbol={currency}
                active_tab={*active_tab}
                {on_select_tab}
            />
            <main class="main">
                <div class="container">
                    {error_banner}
                    {content}
                </div>
            </main>
        </div>
    }
}

fn main() {
    services::logging::init(log::LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
