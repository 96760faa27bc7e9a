use home_budget_backend::formatting::format_money;
use home_budget_backend::ReportService;
use shared::MonthlyData;
use yew::prelude::*;

use super::category_picker::icon_glyph;
use super::monthly_totals_chart::MonthlyTotalsChart;

#[derive(Properties, PartialEq)]
pub struct ReportsTabProps {
    pub monthly_data: MonthlyData,
    pub currency_symbol: String,
}

#[function_component(ReportsTab)]
pub fn reports_tab(props: &ReportsTabProps) -> Html {
    let report = use_memo(props.monthly_data.clone(), ReportService::build_report);
    let currency = &props.currency_symbol;

    if report.months.is_empty() {
        return html! {
            <div class="reports-tab">
                <h2>{"📊 Отчети"}</h2>
                <p class="empty-state">{"Все още няма записани месеци"}</p>
            </div>
        };
    }

    let max_category = report.category_totals.first().map(|c| c.total).unwrap_or(0.0);

    html! {
        <div class="reports-tab">
            <h2>{"📊 Отчети"}</h2>

            <div class="summary-cards">
                <div class="summary-card">
                    <span class="summary-label">{"Общо за всички месеци"}</span>
                    <span class="summary-value">{format_money(report.grand_total, currency)}</span>
                </div>
                <div class="summary-card">
                    <span class="summary-label">{"Средно на месец"}</span>
                    <span class="summary-value">{format_money(report.average_monthly_total, currency)}</span>
                </div>
                <div class="summary-card">
                    <span class="summary-label">{"Месеци"}</span>
                    <span class="summary-value">{report.months.len().to_string()}</span>
                </div>
            </div>

            <MonthlyTotalsChart months={report.months.clone()} currency_symbol={currency.clone()} />

            <section class="report-section">
                <h3>{"По месеци"}</h3>
                <table class="report-table">
                    <thead>
                        <tr>
                            <th>{"Месец"}</th>
                            <th>{"Фиксирани"}</th>
                            <th>{"Допълнителни"}</th>
                            <th>{"Общо"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {for report.months.iter().map(|month| html! {
                            <tr key={month.month.clone()}>
                                <td>{&month.month}</td>
                                <td>{format_money(month.total_fixed, currency)}</td>
                                <td>{format_money(month.total_variable, currency)}</td>
                                <td class="total">{format_money(month.total, currency)}</td>
                            </tr>
                        })}
                    </tbody>
                </table>
            </section>

            <section class="report-section">
                <h3>{"По категории"}</h3>
                <ul class="category-totals">
                    {for report.category_totals.iter().map(|category| {
                        let share = if max_category > 0.0 { category.total / max_category * 100.0 } else { 0.0 };
                        html! {
                            <li class="category-total" key={category.category_id.clone()}>
                                <span class="category-icon">{icon_glyph(category.category_icon)}</span>
                                <span class="category-name">{&category.category_name}</span>
                                <div class="category-bar">
                                    <div class="category-bar-fill" style={format!("width: {:.1}%;", share)}></div>
                                </div>
                                <span class="category-amount">{format_money(category.total, currency)}</span>
                                <span class="category-count">{format!("({})", category.item_count)}</span>
                            </li>
                        }
                    })}
                </ul>
            </section>
        </div>
    }
}
