//! Electricity bill split between two sub-meters.
//!
//! Meter 1 has a day (T1) and a night (T2) register. Its cost is computed from
//! the consumption on each register and the matching tariff. Meter 2 is not
//! measured independently: it is charged whatever remains of the invoice after
//! meter 1 is paid.
//!
//! Every check runs on every call, so the user sees all problems with the form
//! at once instead of fixing them one by one.

use shared::{ElectricityForm, ElectricityInputs, ElectricityResults};
use std::fmt;
use thiserror::Error;

use super::formatting::parse_decimal;
use crate::config::BudgetConfig;

/// Tariff register of the first meter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tariff {
    /// Day tariff
    T1,
    /// Night tariff
    T2,
}

impl fmt::Display for Tariff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tariff::T1 => write!(f, "Т1"),
            Tariff::T2 => write!(f, "Т2"),
        }
    }
}

/// Input fields of the electricity form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElectricityField {
    OldT1,
    NewT1,
    OldT2,
    NewT2,
    PriceT1,
    PriceT2,
    InvoiceTotal,
}

impl ElectricityField {
    /// Every field, in form order
    pub const ALL: [ElectricityField; 7] = [
        ElectricityField::OldT1,
        ElectricityField::NewT1,
        ElectricityField::OldT2,
        ElectricityField::NewT2,
        ElectricityField::PriceT1,
        ElectricityField::PriceT2,
        ElectricityField::InvoiceTotal,
    ];

    /// Raw text of this field in `form`
    pub fn value<'a>(&self, form: &'a ElectricityForm) -> &'a str {
        match self {
            ElectricityField::OldT1 => &form.old_t1,
            ElectricityField::NewT1 => &form.new_t1,
            ElectricityField::OldT2 => &form.old_t2,
            ElectricityField::NewT2 => &form.new_t2,
            ElectricityField::PriceT1 => &form.price_t1,
            ElectricityField::PriceT2 => &form.price_t2,
            ElectricityField::InvoiceTotal => &form.invoice_total,
        }
    }

    pub fn set(&self, form: &mut ElectricityForm, value: String) {
        let slot = match self {
            ElectricityField::OldT1 => &mut form.old_t1,
            ElectricityField::NewT1 => &mut form.new_t1,
            ElectricityField::OldT2 => &mut form.old_t2,
            ElectricityField::NewT2 => &mut form.new_t2,
            ElectricityField::PriceT1 => &mut form.price_t1,
            ElectricityField::PriceT2 => &mut form.price_t2,
            ElectricityField::InvoiceTotal => &mut form.invoice_total,
        };
        *slot = value;
    }

    pub fn label(&self) -> &'static str {
        match self {
            ElectricityField::OldT1 => "Старо Т1",
            ElectricityField::NewT1 => "Ново Т1",
            ElectricityField::OldT2 => "Старо Т2",
            ElectricityField::NewT2 => "Ново Т2",
            ElectricityField::PriceT1 => "Цена Т1 (Дневна)",
            ElectricityField::PriceT2 => "Цена Т2 (Нощна)",
            ElectricityField::InvoiceTotal => "Обща сума по фактура",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElectricityValidationError {
    #[error("Невалидна стойност за „{}“", .0.label())]
    InvalidNumber(ElectricityField),

    #[error("Новото показание {0} е по-малко от старото")]
    NegativeConsumption(Tariff),

    #[error("Цената за {0} трябва да е положително число")]
    NonPositivePrice(Tariff),

    #[error("Сумата по фактурата трябва да е положително число")]
    NonPositiveInvoice,

    /// Readings or prices so large that the result overflows
    #[error("Стойностите са твърде големи за изчисление")]
    ResultOutOfRange,
}

/// Outcome of one electricity calculation.
///
/// When `is_valid` is false the cost figures are computed from whatever could
/// be parsed (unparseable fields count as zero) and must not be used.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectricityCalculation {
    /// Parsed readings and tariffs; zero where parsing failed
    pub inputs: ElectricityInputs,
    pub cons_t1: f64,
    pub cons_t2: f64,
    pub total_cons: f64,
    pub cost_em1: f64,
    pub em2_remainder: f64,
    pub is_valid: bool,
    pub errors: Vec<ElectricityValidationError>,
}

impl ElectricityCalculation {
    /// Human-readable validation messages, in check order
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// Snapshot in the stored record format
    pub fn results(&self) -> ElectricityResults {
        ElectricityResults {
            cons_t1_kwh: self.cons_t1,
            cons_t2_kwh: self.cons_t2,
            total_cons_em1_kwh: self.total_cons,
            cost_em1_eur: self.cost_em1,
            em2_remainder_eur: self.em2_remainder,
        }
    }
}

/// Form pre-filled with the configured tariffs
pub fn initial_form(config: &BudgetConfig) -> ElectricityForm {
    ElectricityForm {
        price_t1: config.default_price_t1.clone(),
        price_t2: config.default_price_t2.clone(),
        ..ElectricityForm::default()
    }
}

/// Compute consumption and the cost split for the entered form
pub fn calculate_electricity(form: &ElectricityForm) -> ElectricityCalculation {
    let mut errors = Vec::new();

    let mut parse = |field: ElectricityField, raw: &str| -> Option<f64> {
        let value = parse_decimal(raw);
        if value.is_none() {
            errors.push(ElectricityValidationError::InvalidNumber(field));
        }
        value
    };

    let [old_t1, new_t1, old_t2, new_t2, price_t1, price_t2, invoice_total] =
        ElectricityField::ALL.map(|field| parse(field, field.value(form)));

    if let (Some(old), Some(new)) = (old_t1, new_t1) {
        if new < old {
            errors.push(ElectricityValidationError::NegativeConsumption(Tariff::T1));
        }
    }
    if let (Some(old), Some(new)) = (old_t2, new_t2) {
        if new < old {
            errors.push(ElectricityValidationError::NegativeConsumption(Tariff::T2));
        }
    }
    if matches!(price_t1, Some(p) if p <= 0.0) {
        errors.push(ElectricityValidationError::NonPositivePrice(Tariff::T1));
    }
    if matches!(price_t2, Some(p) if p <= 0.0) {
        errors.push(ElectricityValidationError::NonPositivePrice(Tariff::T2));
    }
    if matches!(invoice_total, Some(v) if v <= 0.0) {
        errors.push(ElectricityValidationError::NonPositiveInvoice);
    }

    let inputs = ElectricityInputs {
        old_t1: old_t1.unwrap_or(0.0),
        new_t1: new_t1.unwrap_or(0.0),
        old_t2: old_t2.unwrap_or(0.0),
        new_t2: new_t2.unwrap_or(0.0),
        day_price_with_vat: price_t1.unwrap_or(0.0),
        night_price_with_vat: price_t2.unwrap_or(0.0),
        invoice_total: invoice_total.unwrap_or(0.0),
    };

    let cons_t1 = inputs.new_t1 - inputs.old_t1;
    let cons_t2 = inputs.new_t2 - inputs.old_t2;
    let total_cons = cons_t1 + cons_t2;
    let cost_em1 = cons_t1 * inputs.day_price_with_vat + cons_t2 * inputs.night_price_with_vat;
    let em2_remainder = inputs.invoice_total - cost_em1;

    if ![cons_t1, cons_t2, total_cons, cost_em1, em2_remainder].iter().all(|v| v.is_finite()) {
        errors.push(ElectricityValidationError::ResultOutOfRange);
    }

    ElectricityCalculation {
        inputs,
        cons_t1,
        cons_t2,
        total_cons,
        cost_em1,
        em2_remainder,
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn form(old_t1: &str, new_t1: &str, old_t2: &str, new_t2: &str, p1: &str, p2: &str, invoice: &str) -> ElectricityForm {
        ElectricityForm {
            old_t1: old_t1.to_string(),
            new_t1: new_t1.to_string(),
            old_t2: old_t2.to_string(),
            new_t2: new_t2.to_string(),
            price_t1: p1.to_string(),
            price_t2: p2.to_string(),
            invoice_total: invoice.to_string(),
        }
    }

    #[test]
    fn test_reference_scenario() {
        let calc = calculate_electricity(&form("100", "150", "50", "80", "0.15", "0.09", "20"));

        assert!(calc.is_valid);
        assert!(calc.errors.is_empty());
        assert!((calc.cons_t1 - 50.0).abs() < EPSILON);
        assert!((calc.cons_t2 - 30.0).abs() < EPSILON);
        assert!((calc.total_cons - 80.0).abs() < EPSILON);
        assert!((calc.cost_em1 - 10.2).abs() < EPSILON);
        assert!((calc.em2_remainder - 9.8).abs() < EPSILON);
    }

    #[test]
    fn test_overflowing_readings_are_invalid() {
        let calc = calculate_electricity(&form("0", "1e308", "0", "1", "10", "0.09", "20"));

        assert!(calc.cost_em1.is_infinite());
        assert!(!calc.is_valid);
        assert_eq!(calc.errors, vec![ElectricityValidationError::ResultOutOfRange]);
    }

    #[test]
    fn test_new_reading_below_old_for_t1() {
        let calc = calculate_electricity(&form("100", "90", "50", "80", "0.15", "0.09", "20"));

        assert!(!calc.is_valid);
        assert_eq!(calc.errors, vec![ElectricityValidationError::NegativeConsumption(Tariff::T1)]);
        assert!(calc.messages()[0].contains("Т1"));
    }

    #[test]
    fn test_new_reading_below_old_for_t2() {
        let calc = calculate_electricity(&form("100", "150", "50", "40", "0.15", "0.09", "20"));

        assert!(!calc.is_valid);
        assert!(calc.errors.contains(&ElectricityValidationError::NegativeConsumption(Tariff::T2)));
        assert!(calc.messages().iter().any(|m| m.contains("Т2")));
    }

    #[test]
    fn test_all_violations_reported_together() {
        let calc = calculate_electricity(&form("100", "90", "50", "40", "0", "-1", "0"));

        assert!(!calc.is_valid);
        assert_eq!(
            calc.errors,
            vec![
                ElectricityValidationError::NegativeConsumption(Tariff::T1),
                ElectricityValidationError::NegativeConsumption(Tariff::T2),
                ElectricityValidationError::NonPositivePrice(Tariff::T1),
                ElectricityValidationError::NonPositivePrice(Tariff::T2),
                ElectricityValidationError::NonPositiveInvoice,
            ]
        );
    }

    #[test]
    fn test_parse_failures_are_reported_per_field() {
        let calc = calculate_electricity(&form("", "abc", "50", "80", "0.15", "x", "20"));

        assert!(!calc.is_valid);
        assert_eq!(
            calc.errors,
            vec![
                ElectricityValidationError::InvalidNumber(ElectricityField::OldT1),
                ElectricityValidationError::InvalidNumber(ElectricityField::NewT1),
                ElectricityValidationError::InvalidNumber(ElectricityField::PriceT2),
            ]
        );
        assert!(calc.messages()[0].contains("Старо Т1"));
    }

    #[test]
    fn test_equal_readings_are_valid_zero_consumption() {
        let calc = calculate_electricity(&form("100", "100", "50", "50", "0.15", "0.09", "20"));

        assert!(calc.is_valid);
        assert_eq!(calc.total_cons, 0.0);
        assert_eq!(calc.cost_em1, 0.0);
        assert!((calc.em2_remainder - 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_comma_decimal_separator_and_whitespace() {
        let calc = calculate_electricity(&form(" 100,5 ", "150,5", "50", "80", "0,15", "0,09", "20,00"));

        assert!(calc.is_valid);
        assert!((calc.cons_t1 - 50.0).abs() < EPSILON);
        assert!((calc.cost_em1 - 10.2).abs() < EPSILON);
    }

    #[test]
    fn test_results_snapshot_matches_calculation() {
        let calc = calculate_electricity(&form("100", "150", "50", "80", "0.15", "0.09", "20"));
        let results = calc.results();

        assert_eq!(results.cons_t1_kwh, calc.cons_t1);
        assert_eq!(results.total_cons_em1_kwh, calc.total_cons);
        assert_eq!(results.em2_remainder_eur, calc.em2_remainder);
        assert_eq!(calc.inputs.day_price_with_vat, 0.15);
        assert_eq!(calc.inputs.invoice_total, 20.0);
    }

    #[test]
    fn test_deterministic() {
        let f = form("12.3", "45.6", "7.8", "9.1", "0.14986", "0.08870", "33.3");
        assert_eq!(calculate_electricity(&f), calculate_electricity(&f));
    }

    #[test]
    fn test_field_accessors() {
        let mut f = ElectricityForm::default();
        for (i, field) in ElectricityField::ALL.iter().enumerate() {
            field.set(&mut f, i.to_string());
        }
        assert_eq!(f.old_t1, "0");
        assert_eq!(f.price_t2, "5");
        assert_eq!(ElectricityField::InvoiceTotal.value(&f), "6");
    }

    #[test]
    fn test_initial_form_uses_configured_prices() {
        let form = initial_form(&BudgetConfig::default());
        assert_eq!(form.price_t1, "0.14986");
        assert_eq!(form.price_t2, "0.08870");
        assert!(form.old_t1.is_empty());
        assert!(form.invoice_total.is_empty());
    }

    #[test]
    fn test_remainder_identity_over_many_inputs() {
        for step in 0..50 {
            let old = 10.0 * step as f64;
            let new = old + 3.5 * step as f64;
            let f = form(
                &old.to_string(),
                &new.to_string(),
                &(old / 2.0).to_string(),
                &(new / 2.0 + 1.0).to_string(),
                "0.14986",
                "0.0887",
                "120",
            );
            let calc = calculate_electricity(&f);
            assert!(calc.is_valid);
            assert!((calc.total_cons - (calc.cons_t1 + calc.cons_t2)).abs() < EPSILON);
            assert!((calc.em2_remainder - (120.0 - calc.cost_em1)).abs() < EPSILON);
        }
    }
}
