use std::rc::Rc;

use home_budget_backend::formatting::format_money;
use home_budget_backend::ids::now_millis;
use home_budget_backend::{BudgetConfig, CategoryCatalog, ExpenseService};
use shared::{ExpenseCategory, ExpenseItem, MonthExpenses, MonthlyRecord};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::category_picker::{icon_glyph, CategoryPicker};
use crate::services::Logger;

const INVALID_AMOUNT_MESSAGE: &str = "Въведете валидна сума (положително число)";

#[derive(Properties, PartialEq)]
pub struct MonthlyExpensesTabProps {
    pub current_month: String,
    pub record: Option<MonthlyRecord>,
    pub config: Rc<BudgetConfig>,
    pub on_save: Callback<MonthExpenses>,
}

fn text_input_callback(state: UseStateHandle<String>) -> Callback<InputEvent> {
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

fn expense_row(item: &ExpenseItem, currency_symbol: &str, on_delete: &Callback<String>) -> Html {
    let onclick = {
        let id = item.id.clone();
        let on_delete = on_delete.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
    };

    html! {
        <li class="expense-row" key={item.id.clone()}>
            <span class={classes!("category-icon", item.category_color.clone())}>
                {icon_glyph(item.category_icon)}
            </span>
            <div class="expense-details">
                <span class="expense-name">{&item.category_name}</span>
                {if let Some(note) = &item.note {
                    html! { <span class="expense-note">{note}</span> }
                } else { html! {} }}
            </div>
            <span class="expense-amount">{format_money(item.amount, currency_symbol)}</span>
            <button class="delete-button" title="Изтрий" {onclick}>{"🗑️"}</button>
        </li>
    }
}

#[function_component(MonthlyExpensesTab)]
pub fn monthly_expenses_tab(props: &MonthlyExpensesTabProps) -> Html {
    let service = ExpenseService::new(&props.config);
    let expenses = props.record.as_ref().map(|r| r.expenses.clone()).unwrap_or_default();
    let currency = props.config.currency_symbol.clone();

    let catalog = use_state(CategoryCatalog::new);

    // Variable expense form
    let adding_variable = use_state(|| false);
    let selected = use_state(|| None::<ExpenseCategory>);
    let amount = use_state(String::new);
    let note = use_state(String::new);
    let error = use_state(|| None::<String>);

    // Fixed expense form
    let adding_fixed = use_state(|| false);
    let fixed_selected = use_state(|| None::<ExpenseCategory>);
    let fixed_amount = use_state(String::new);
    let fixed_error = use_state(|| None::<String>);

    // An empty fixed list gets the default fixed expenses when the view opens
    {
        let on_save = props.on_save.clone();
        let record = props.record.clone();
        let service = service.clone();
        use_effect_with((), move |_| {
            let fixed_is_empty = record
                .as_ref()
                .map(|r| r.expenses.fixed_expenses.is_empty())
                .unwrap_or(true);
            if fixed_is_empty {
                on_save.emit(service.initial_expenses(record.as_ref()));
            }
        });
    }

    let on_add_variable = {
        let service = service.clone();
        let expenses = expenses.clone();
        let on_save = props.on_save.clone();
        let (adding_variable, selected, amount, note, error) =
            (adding_variable.clone(), selected.clone(), amount.clone(), note.clone(), error.clone());
        Callback::from(move |_: MouseEvent| {
            let Some(category) = (*selected).clone() else {
                return;
            };
            let mut updated = expenses.clone();
            match service.add_variable(&mut updated, &category, &amount, &note) {
                Ok(_) => {
                    on_save.emit(updated);
                    adding_variable.set(false);
                    selected.set(None);
                    amount.set(String::new());
                    note.set(String::new());
                    error.set(None);
                }
                Err(_) => error.set(Some(INVALID_AMOUNT_MESSAGE.to_string())),
            }
        })
    };

    let on_add_fixed = {
        let service = service.clone();
        let expenses = expenses.clone();
        let on_save = props.on_save.clone();
        let (adding_fixed, fixed_selected, fixed_amount, fixed_error) =
            (adding_fixed.clone(), fixed_selected.clone(), fixed_amount.clone(), fixed_error.clone());
        Callback::from(move |_: MouseEvent| {
            let Some(category) = (*fixed_selected).clone() else {
                return;
            };
            let mut updated = expenses.clone();
            match service.add_fixed(&mut updated, &category, &fixed_amount) {
                Ok(_) => {
                    on_save.emit(updated);
                    adding_fixed.set(false);
                    fixed_selected.set(None);
                    fixed_amount.set(String::new());
                    fixed_error.set(None);
                }
                Err(_) => fixed_error.set(Some(INVALID_AMOUNT_MESSAGE.to_string())),
            }
        })
    };

    let on_delete_variable = {
        let service = service.clone();
        let expenses = expenses.clone();
        let on_save = props.on_save.clone();
        Callback::from(move |id: String| {
            let mut updated = expenses.clone();
            match service.delete_variable(&mut updated, &id) {
                Ok(_) => on_save.emit(updated),
                Err(e) => Logger::warn_with_component("monthly-expenses", &e.to_string()),
            }
        })
    };

    let on_delete_fixed = {
        let service = service.clone();
        let expenses = expenses.clone();
        let on_save = props.on_save.clone();
        Callback::from(move |id: String| {
            let mut updated = expenses.clone();
            match service.delete_fixed(&mut updated, &id) {
                Ok(_) => on_save.emit(updated),
                Err(e) => Logger::warn_with_component("monthly-expenses", &e.to_string()),
            }
        })
    };

    let on_create_variable_category = {
        let catalog = catalog.clone();
        let selected = selected.clone();
        Callback::from(move |name: String| {
            let mut next = (*catalog).clone();
            match next.add_custom_variable(&name, now_millis()) {
                Ok(category) => {
                    catalog.set(next);
                    selected.set(Some(category));
                }
                Err(e) => Logger::warn_with_component("monthly-expenses", &e.to_string()),
            }
        })
    };

    let on_create_fixed_category = {
        let catalog = catalog.clone();
        let fixed_selected = fixed_selected.clone();
        Callback::from(move |name: String| match catalog.custom_fixed(&name, now_millis()) {
            Ok(category) => fixed_selected.set(Some(category)),
            Err(e) => Logger::warn_with_component("monthly-expenses", &e.to_string()),
        })
    };

    let toggle = |state: &UseStateHandle<bool>| {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.set(!*state))
    };
    let select = |state: &UseStateHandle<Option<ExpenseCategory>>| {
        let state = state.clone();
        Callback::from(move |category: ExpenseCategory| state.set(Some(category)))
    };

    let total_fixed = ExpenseService::total_fixed(&expenses);
    let total_variable = ExpenseService::total_variable(&expenses);

    html! {
        <div class="monthly-expenses">
            <div class="section-header">
                <h2>
                    {"📅 Месечни разходи"}
                    <span class="month-badge">{&props.current_month}</span>
                </h2>
                <div class="total-display">
                    <span class="total-label">{"Общо"}</span>
                    <span class="total-amount">{format_money(total_fixed + total_variable, &currency)}</span>
                </div>
            </div>

            <div class="expense-columns">
                // Fixed monthly payments
                <section class="expense-column">
                    <div class="column-header">
                        <h3>{"💼 Фиксирани разходи"}</h3>
                        <span class="column-total">{format_money(total_fixed, &currency)}</span>
                        {if !*adding_fixed {
                            html! { <button class="add-button" onclick={toggle(&adding_fixed)}>{"+"}</button> }
                        } else { html! {} }}
                    </div>

                    {if *adding_fixed {
                        html! {
                            <div class="add-form">
                                <h4>{"Нов фиксиран разход"}</h4>
                                <CategoryPicker
                                    categories={catalog.fixed().to_vec()}
                                    selected={(*fixed_selected).clone()}
                                    on_select={select(&fixed_selected)}
                                    on_create={on_create_fixed_category}
                                />
                                <input
                                    type="text"
                                    inputmode="decimal"
                                    placeholder="Сума (€)"
                                    value={(*fixed_amount).clone()}
                                    oninput={text_input_callback(fixed_amount.clone())}
                                />
                                {if let Some(message) = (*fixed_error).as_ref() {
                                    html! { <div class="form-message error">{message}</div> }
                                } else { html! {} }}
                                <div class="form-actions">
                                    <button class="cancel-button" onclick={toggle(&adding_fixed)}>{"Отказ"}</button>
                                    <button
                                        class="submit-button"
                                        onclick={on_add_fixed}
                                        disabled={fixed_selected.is_none() || fixed_amount.trim().is_empty()}
                                    >
                                        {"Добави"}
                                    </button>
                                </div>
                            </div>
                        }
                    } else { html! {} }}

                    <ul class="expense-list">
                        {for expenses.fixed_expenses.iter().map(|item| expense_row(item, &currency, &on_delete_fixed))}
                    </ul>
                </section>

                // Day-to-day expenses
                <section class="expense-column">
                    <div class="column-header">
                        <h3>{"🛒 Допълнителни разходи"}</h3>
                        <span class="column-total">{format_money(total_variable, &currency)}</span>
                        {if !*adding_variable {
                            html! { <button class="add-button" onclick={toggle(&adding_variable)}>{"+"}</button> }
                        } else { html! {} }}
                    </div>

                    {if *adding_variable {
                        html! {
                            <div class="add-form">
                                <h4>{"Нов разход"}</h4>
                                <CategoryPicker
                                    categories={catalog.variable().to_vec()}
                                    selected={(*selected).clone()}
                                    on_select={select(&selected)}
                                    on_create={on_create_variable_category}
                                />
                                <input
                                    type="text"
                                    inputmode="decimal"
                                    placeholder="Сума (€)"
                                    value={(*amount).clone()}
                                    oninput={text_input_callback(amount.clone())}
                                />
                                <input
                                    type="text"
                                    placeholder="Бележка (по избор)"
                                    value={(*note).clone()}
                                    oninput={text_input_callback(note.clone())}
                                />
                                {if let Some(message) = (*error).as_ref() {
                                    html! { <div class="form-message error">{message}</div> }
                                } else { html! {} }}
                                <div class="form-actions">
                                    <button class="cancel-button" onclick={toggle(&adding_variable)}>{"Отказ"}</button>
                                    <button
                                        class="submit-button"
                                        onclick={on_add_variable}
                                        disabled={selected.is_none() || amount.trim().is_empty()}
                                    >
                                        {"Добави"}
                                    </button>
                                </div>
                            </div>
                        }
                    } else { html! {} }}

                    {if expenses.additional_expenses.is_empty() {
                        html! { <p class="empty-state">{"Няма добавени разходи за този месец"}</p> }
                    } else {
                        html! {
                            <ul class="expense-list">
                                {for expenses.additional_expenses.iter().map(|item| expense_row(item, &currency, &on_delete_variable))}
                            </ul>
                        }
                    }}
                </section>
            </div>
        </div>
    }
}
