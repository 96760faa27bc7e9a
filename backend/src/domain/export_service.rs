//! Plain-text export of one electricity calculation.
//!
//! The text is meant for people (it is handed to the other household as the
//! bill breakdown) and is never read back.

use chrono::NaiveDate;
use shared::ElectricityForm;

use super::electricity_calculator::ElectricityCalculation;
use super::formatting::{format_eur, format_export_date, format_kwh};

const RULE: &str = "---------------------------";

/// Download name for the export of `month_label`
pub fn export_file_name(month_label: &str) -> String {
    let label: String = month_label
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("Calculations_{}.txt", label)
}

/// Render the export. Raw form text is echoed back as the user typed it.
pub fn electricity_export_text(
    form: &ElectricityForm,
    calculation: &ElectricityCalculation,
    month_label: &str,
    date: NaiveDate,
) -> String {
    let cons_t1 = format_kwh(calculation.cons_t1);
    let cons_t2 = format_kwh(calculation.cons_t2);
    let cost_em1 = format_eur(calculation.cost_em1);
    let em2 = format_eur(calculation.em2_remainder);

    let lines = [
        "КАЛКУЛАЦИИ ЗА ЕЛЕКТРОЕНЕРГИЯ".to_string(),
        RULE.to_string(),
        format!("Дата: {}", format_export_date(date)),
        format!("Месец: {}", month_label),
        String::new(),
        "ВХОДНИ ДАННИ:".to_string(),
        format!("Старо Т1: {}", form.old_t1),
        format!("Ново Т1:  {}", form.new_t1),
        format!("Старо Т2: {}", form.old_t2),
        format!("Ново Т2:  {}", form.new_t2),
        String::new(),
        "ЦЕНИ (с ДДС):".to_string(),
        format!("Дневна тарифа (Т1): €{} / kWh", form.price_t1),
        format!("Нощна тарифа (Т2):  €{} / kWh", form.price_t2),
        format!("Обща сума по фактура: €{}", form.invoice_total),
        String::new(),
        "ИЗЧИСЛЕНИЯ:".to_string(),
        "1. Консумация".to_string(),
        format!("   Т1 (Дневна) = {} - {} = {} kWh", form.new_t1, form.old_t1, cons_t1),
        format!("   Т2 (Нощна)  = {} - {} = {} kWh", form.new_t2, form.old_t2, cons_t2),
        format!("   Общо Електромер 1 = {} kWh", format_kwh(calculation.total_cons)),
        String::new(),
        "2. Стойност Електромер 1".to_string(),
        "   (Т1 * Цена) + (Т2 * Цена)".to_string(),
        format!("   ({} * {}) + ({} * {})", cons_t1, form.price_t1, cons_t2, form.price_t2),
        format!("   = {}", cost_em1),
        String::new(),
        "3. Стойност Електромер 2 (Остатък)".to_string(),
        "   Фактура - Електромер 1".to_string(),
        format!("   {} - {:.2}", form.invoice_total, calculation.cost_em1),
        format!("   = {}", em2),
        String::new(),
        RULE.to_string(),
        "КРАЙНИ СУМИ:".to_string(),
        format!("Сметка Електромер 1: {}", cost_em1),
        format!("Сметка Електромер 2: {}", em2),
        RULE.to_string(),
    ];

    lines.join("\n")
}
