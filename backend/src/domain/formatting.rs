//! Month labels, number parsing and display formatting.
//!
//! The app is localised for Bulgarian: a month is identified by a label such
//! as "Октомври 2026", which doubles as the key of the month's stored record.

use chrono::{Datelike, Local, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "Януари",
    "Февруари",
    "Март",
    "Април",
    "Май",
    "Юни",
    "Юли",
    "Август",
    "Септември",
    "Октомври",
    "Ноември",
    "Декември",
];

/// Label for the month containing `date`, e.g. "Октомври 2026"
pub fn month_label(date: NaiveDate) -> String {
    month_label_for(date.year(), date.month())
}

/// Label for `month` (1-12) of `year`; out-of-range months clamp to January
pub fn month_label_for(year: i32, month: u32) -> String {
    let index = month.clamp(1, 12) as usize - 1;
    format!("{} {}", MONTH_NAMES[index], year)
}

/// Label of the current local month
pub fn current_month_label() -> String {
    month_label(Local::now().date_naive())
}

/// Parse a month label back into `(year, month)`.
///
/// Accepts any letter case and an optional trailing "г." year suffix.
pub fn parse_month_label(label: &str) -> Option<(i32, u32)> {
    let mut parts = label.split_whitespace();
    let name = parts.next()?.to_lowercase();
    let year = parts.next()?.parse::<i32>().ok()?;

    match parts.next() {
        None | Some("г.") => {}
        Some(_) => return None,
    }

    let month = MONTH_NAMES
        .iter()
        .position(|m| m.to_lowercase() == name)?;
    Some((year, month as u32 + 1))
}

/// Parse user-entered decimal text.
///
/// Surrounding whitespace is ignored and a comma is accepted as the decimal
/// separator. Empty, non-numeric and non-finite input yields `None`.
pub fn parse_decimal(input: &str) -> Option<f64> {
    let cleaned = input.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Money with two decimals and a leading currency symbol, e.g. "€12.30"
pub fn format_money(amount: f64, currency_symbol: &str) -> String {
    if amount < 0.0 {
        format!("-{}{:.2}", currency_symbol, amount.abs())
    } else {
        format!("{}{:.2}", currency_symbol, amount)
    }
}

pub fn format_eur(amount: f64) -> String {
    format_money(amount, "€")
}

/// Energy in kWh with three decimals (unit not included)
pub fn format_kwh(kwh: f64) -> String {
    format!("{:.3}", kwh)
}

/// Date in Bulgarian short form, e.g. "18.10.2026 г."
pub fn format_export_date(date: NaiveDate) -> String {
    format!("{} г.", date.format("%d.%m.%Y"))
}
