use std::rc::Rc;

use chrono::Local;
use home_budget_backend::electricity_calculator::initial_form;
use home_budget_backend::export_service::{electricity_export_text, export_file_name};
use home_budget_backend::formatting::{format_eur, format_kwh};
use home_budget_backend::{calculate_electricity, BudgetConfig, ElectricityCalculation, ElectricityField};
use shared::{ElectricityForm, ElectricityInputs, ElectricityResults};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::download::download_text;
use crate::services::Logger;

#[derive(Properties, PartialEq)]
pub struct ElectricityTabProps {
    pub current_month: String,
    pub config: Rc<BudgetConfig>,
    /// Meter 1 and meter 2 amounts
    pub on_add_to_expenses: Callback<(f64, f64)>,
    pub on_record: Callback<(ElectricityInputs, ElectricityResults)>,
}

fn field_icon(field: ElectricityField) -> &'static str {
    match field {
        ElectricityField::OldT1 | ElectricityField::NewT1 | ElectricityField::PriceT1 => "☀️",
        ElectricityField::OldT2 | ElectricityField::NewT2 | ElectricityField::PriceT2 => "🌙",
        ElectricityField::InvoiceTotal => "🧾",
    }
}

#[function_component(ElectricityTab)]
pub fn electricity_tab(props: &ElectricityTabProps) -> Html {
    let form = {
        let config = props.config.clone();
        use_state(move || initial_form(&config))
    };
    let calculation = use_state(|| None::<ElectricityCalculation>);
    let is_added = use_state(|| false);

    let on_field_input = |field: ElectricityField| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next: ElectricityForm = (*form).clone();
            field.set(&mut next, input.value());
            form.set(next);
        })
    };

    let on_calculate = {
        let form = form.clone();
        let calculation = calculation.clone();
        let is_added = is_added.clone();
        let on_record = props.on_record.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let result = calculate_electricity(&form);
            if result.is_valid {
                on_record.emit((result.inputs.clone(), result.results()));
            } else {
                Logger::debug_with_component("electricity", &result.messages().join("; "));
            }
            calculation.set(Some(result));
            is_added.set(false);
        })
    };

    let on_add = {
        let calculation = calculation.clone();
        let is_added = is_added.clone();
        let on_add_to_expenses = props.on_add_to_expenses.clone();
        let duration = props.config.success_message_duration_ms;
        Callback::from(move |_: MouseEvent| {
            let Some(result) = (*calculation).as_ref().filter(|c| c.is_valid) else {
                return;
            };
            on_add_to_expenses.emit((result.cost_em1, result.em2_remainder));
            is_added.set(true);

            let is_added_clear = is_added.clone();
            spawn_local(async move {
                gloo::timers::future::TimeoutFuture::new(duration).await;
                is_added_clear.set(false);
            });
        })
    };

    let on_download = {
        let form = form.clone();
        let calculation = calculation.clone();
        let month = props.current_month.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(result) = (*calculation).as_ref() else {
                return;
            };
            let text = electricity_export_text(&form, result, &month, Local::now().date_naive());
            if let Err(e) = download_text(&export_file_name(&month), &text) {
                Logger::error_with_component("electricity", &format!("Download failed: {:#}", e));
            }
        })
    };

    html! {
        <div class="electricity-tab">
            <section class="calculator-card">
                <h2>{"⚡ Електроенергия Калкулатор"}</h2>
                <form class="electricity-form" onsubmit={on_calculate}>
                    <div class="form-grid">
                        {for ElectricityField::ALL.iter().map(|field| {
                            let field = *field;
                            html! {
                                <div class="form-group" key={field.label()}>
                                    <label>{format!("{} {}", field_icon(field), field.label())}</label>
                                    <input
                                        type="text"
                                        inputmode="decimal"
                                        value={field.value(&form).to_string()}
                                        oninput={on_field_input(field)}
                                    />
                                </div>
                            }
                        })}
                    </div>
                    <button type="submit" class="submit-button">{"🧮 Изчисли"}</button>
                </form>
            </section>

            {match (*calculation).as_ref() {
                None => html! {},
                Some(result) if !result.is_valid => html! {
                    <div class="form-message error">
                        <strong>{"Моля, коригирайте следните грешки:"}</strong>
                        <ul>
                            {for result.messages().into_iter().map(|message| html! { <li>{message}</li> })}
                        </ul>
                    </div>
                },
                Some(result) => html! {
                    <section class="results-card">
                        <h3>{"Сметка ТОК"}</h3>
                        <div class="consumption">
                            <div class="result-row">
                                <span>{"Т1 (Дневна):"}</span>
                                <span class="mono">{format!("{} kWh", format_kwh(result.cons_t1))}</span>
                            </div>
                            <div class="result-row">
                                <span>{"Т2 (Нощна):"}</span>
                                <span class="mono">{format!("{} kWh", format_kwh(result.cons_t2))}</span>
                            </div>
                            <div class="result-row total">
                                <span>{"Общо Електромер 1:"}</span>
                                <span class="mono">{format!("{} kWh", format_kwh(result.total_cons))}</span>
                            </div>
                        </div>
                        <div class="meter-amounts">
                            <div class="result-row">
                                <span>{"Сметка електромер 1:"}</span>
                                <span class="amount">{format_eur(result.cost_em1)}</span>
                            </div>
                            <div class="result-row highlight">
                                <span>{"Сметка електромер 2:"}</span>
                                <span class="amount">{format_eur(result.em2_remainder)}</span>
                            </div>
                            <div class="result-row">
                                <span>{"Обща сума по фактура:"}</span>
                                <span class="amount">{format_eur(result.inputs.invoice_total)}</span>
                            </div>
                        </div>
                        <div class="result-actions">
                            <button class="submit-button" onclick={on_add} disabled={*is_added}>
                                {if *is_added { "✅ Добавено в разходите" } else { "➕ Добави към разходите" }}
                            </button>
                            <button class="secondary-button" onclick={on_download}>{"📄 Изтегли калкулациите"}</button>
                        </div>
                    </section>
                },
            }}
        </div>
    }
}
