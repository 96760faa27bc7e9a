use home_budget_backend::formatting::format_money;
use home_budget_backend::SavingsService;
use shared::IncomeItem;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::Logger;

#[derive(Properties, PartialEq)]
pub struct SavingsTabProps {
    pub savings: Vec<IncomeItem>,
    pub currency_symbol: String,
    pub on_save: Callback<Vec<IncomeItem>>,
}

#[function_component(SavingsTab)]
pub fn savings_tab(props: &SavingsTabProps) -> Html {
    let name = use_state(String::new);
    let amount = use_state(String::new);
    let note = use_state(String::new);
    let form_error = use_state(|| None::<String>);

    let on_input = |state: &UseStateHandle<String>| {
        let state = state.clone();
        let form_error = form_error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
            form_error.set(None);
        })
    };

    let on_submit = {
        let savings = props.savings.clone();
        let on_save = props.on_save.clone();
        let (name, amount, note, form_error) = (name.clone(), amount.clone(), note.clone(), form_error.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut updated = savings.clone();
            match SavingsService::add_saving(&mut updated, &name, &amount, &note) {
                Ok(_) => {
                    on_save.emit(updated);
                    name.set(String::new());
                    amount.set(String::new());
                    note.set(String::new());
                }
                Err(_) => form_error.set(Some("Въведете валидна сума (положително число)".to_string())),
            }
        })
    };

    let on_delete = {
        let savings = props.savings.clone();
        let on_save = props.on_save.clone();
        move |id: String| {
            let savings = savings.clone();
            let on_save = on_save.clone();
            Callback::from(move |_: MouseEvent| {
                let mut updated = savings.clone();
                match SavingsService::delete_saving(&mut updated, &id) {
                    Ok(_) => on_save.emit(updated),
                    Err(e) => Logger::warn_with_component("savings", &e.to_string()),
                }
            })
        }
    };

    let total = SavingsService::total_savings(&props.savings);

    html! {
        <div class="savings-tab">
            <div class="section-header">
                <h2>{"🐷 Спестявания"}</h2>
                <div class="total-display">
                    <span class="total-label">{"Общо спестено"}</span>
                    <span class="total-amount">{format_money(total, &props.currency_symbol)}</span>
                </div>
            </div>

            <form class="add-form" onsubmit={on_submit}>
                <input type="text" placeholder="Източник (напр. Заплата)" value={(*name).clone()} oninput={on_input(&name)} />
                <input type="text" inputmode="decimal" placeholder="Сума (€)" value={(*amount).clone()} oninput={on_input(&amount)} />
                <input type="text" placeholder="Бележка (по избор)" value={(*note).clone()} oninput={on_input(&note)} />
                {if let Some(message) = (*form_error).as_ref() {
                    html! { <div class="form-message error">{message}</div> }
                } else { html! {} }}
                <button type="submit" class="submit-button" disabled={amount.trim().is_empty()}>
                    {"➕ Добави"}
                </button>
            </form>

            {if props.savings.is_empty() {
                html! { <p class="empty-state">{"Все още няма спестявания"}</p> }
            } else {
                html! {
                    <ul class="savings-list">
                        {for props.savings.iter().rev().map(|item| html! {
                            <li class="savings-row" key={item.id.clone()}>
                                <div class="savings-details">
                                    <span class="savings-name">{&item.name}</span>
                                    {if let Some(note) = &item.note {
                                        html! { <span class="savings-note">{note}</span> }
                                    } else { html! {} }}
                                    <span class="savings-date">{item.date.split('T').next().unwrap_or(&item.date)}</span>
                                </div>
                                <span class="savings-amount">{format_money(item.amount, &props.currency_symbol)}</span>
                                <button class="delete-button" title="Изтрий" onclick={on_delete(item.id.clone())}>{"🗑️"}</button>
                            </li>
                        })}
                    </ul>
                }
            }}
        </div>
    }
}
