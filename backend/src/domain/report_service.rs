//! Aggregates over every stored month for the reports view.

use log::debug;
use shared::{BudgetReport, CategoryTotal, ExpenseItem, MonthSummary, MonthlyData};
use std::cmp::Ordering;
use std::collections::HashMap;

use super::expense_service::ExpenseService;
use super::formatting::parse_month_label;

pub struct ReportService;

impl ReportService {
    /// Build the full report.
    ///
    /// Months are listed oldest first; labels that do not parse as a month
    /// come after all others, alphabetically. Category totals are largest
    /// first, ties broken by name.
    pub fn build_report(data: &MonthlyData) -> BudgetReport {
        let mut months: Vec<MonthSummary> = data
            .values()
            .map(|record| {
                let expenses = &record.expenses;
                MonthSummary {
                    month: record.month.clone(),
                    total_fixed: ExpenseService::total_fixed(expenses),
                    total_variable: ExpenseService::total_variable(expenses),
                    total: ExpenseService::total(expenses),
                    item_count: expenses.fixed_expenses.len() + expenses.additional_expenses.len(),
                }
            })
            .collect();
        months.sort_by(|a, b| compare_month_labels(&a.month, &b.month));

        let category_totals = Self::category_totals(
            data.values()
                .flat_map(|r| r.expenses.fixed_expenses.iter().chain(r.expenses.additional_expenses.iter())),
        );

        let grand_total: f64 = months.iter().map(|m| m.total).sum();
        let average_monthly_total = if months.is_empty() {
            0.0
        } else {
            grand_total / months.len() as f64
        };

        debug!(
            "Built report over {} months and {} categories",
            months.len(),
            category_totals.len()
        );

        BudgetReport {
            months,
            category_totals,
            grand_total,
            average_monthly_total,
        }
    }

    /// Sum items per category ID.
    ///
    /// The name and icon shown for a category are those of its first item.
    pub fn category_totals<'a>(items: impl Iterator<Item = &'a ExpenseItem>) -> Vec<CategoryTotal> {
        let mut order: Vec<String> = Vec::new();
        let mut totals: HashMap<String, CategoryTotal> = HashMap::new();

        for item in items {
            let entry = totals.entry(item.category_id.clone()).or_insert_with(|| {
                order.push(item.category_id.clone());
                CategoryTotal {
                    category_id: item.category_id.clone(),
                    category_name: item.category_name.clone(),
                    category_icon: item.category_icon,
                    total: 0.0,
                    item_count: 0,
                }
            });
            entry.total += item.amount;
            entry.item_count += 1;
        }

        let mut result: Vec<CategoryTotal> =
            order.into_iter().filter_map(|id| totals.remove(&id)).collect();
        result.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.category_name.cmp(&b.category_name))
        });
        result
    }
}

fn compare_month_labels(a: &str, b: &str) -> Ordering {
    match (parse_month_label(a), parse_month_label(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{CategoryIcon, MonthlyRecord};

    fn item(id: &str, category_id: &str, name: &str, amount: f64) -> ExpenseItem {
        ExpenseItem {
            id: id.to_string(),
            category_id: category_id.to_string(),
            category_name: name.to_string(),
            category_icon: CategoryIcon::ShoppingBag,
            category_color: String::new(),
            amount,
            note: None,
            date: "2026-10-01T00:00:00+00:00".to_string(),
        }
    }

    fn record(month: &str, fixed: Vec<ExpenseItem>, variable: Vec<ExpenseItem>) -> MonthlyRecord {
        let mut record = MonthlyRecord::empty(month, "2026-10-01T00:00:00+00:00".to_string());
        record.expenses.fixed_expenses = fixed;
        record.expenses.additional_expenses = variable;
        record
    }

    fn data(records: Vec<MonthlyRecord>) -> MonthlyData {
        records.into_iter().map(|r| (r.month.clone(), r)).collect()
    }

    #[test]
    fn test_empty_data() {
        let report = ReportService::build_report(&MonthlyData::new());
        assert_eq!(report, BudgetReport::default());
    }

    #[test]
    fn test_months_are_chronological() {
        let report = ReportService::build_report(&data(vec![
            record("Януари 2026", vec![], vec![]),
            record("Декември 2025", vec![], vec![]),
            record("Архив", vec![], vec![]),
            record("Октомври 2026", vec![], vec![]),
            record("Март 2026", vec![], vec![]),
        ]));

        let months: Vec<&str> = report.months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["Декември 2025", "Януари 2026", "Март 2026", "Октомври 2026", "Архив"]);
    }

    #[test]
    fn test_month_and_grand_totals() {
        let report = ReportService::build_report(&data(vec![
            record(
                "Септември 2026",
                vec![item("f1", "rent", "Наем", 500.0)],
                vec![item("e1", "food", "Храна", 40.0), item("e2", "food", "Храна", 60.0)],
            ),
            record("Октомври 2026", vec![item("f2", "rent", "Наем", 500.0)], vec![]),
        ]));

        let september = &report.months[0];
        assert_eq!(september.total_fixed, 500.0);
        assert_eq!(september.total_variable, 100.0);
        assert_eq!(september.total, 600.0);
        assert_eq!(september.item_count, 3);
        assert_eq!(report.grand_total, 1100.0);
        assert_eq!(report.average_monthly_total, 550.0);
    }

    #[test]
    fn test_category_totals_sum_across_months_largest_first() {
        let report = ReportService::build_report(&data(vec![
            record(
                "Септември 2026",
                vec![item("f1", "rent", "Наем", 500.0)],
                vec![item("e1", "food", "Храна", 40.0), item("e2", "fuel", "Гориво", 80.0)],
            ),
            record(
                "Октомври 2026",
                vec![item("f2", "rent", "Наем", 500.0)],
                vec![item("e3", "food", "Храна", 60.0)],
            ),
        ]));

        let totals: Vec<(&str, f64, usize)> = report
            .category_totals
            .iter()
            .map(|c| (c.category_id.as_str(), c.total, c.item_count))
            .collect();
        assert_eq!(totals, vec![("rent", 1000.0, 2), ("food", 100.0, 2), ("fuel", 80.0, 1)]);
    }

    #[test]
    fn test_category_ties_break_by_name() {
        let totals = ReportService::category_totals(
            [item("1", "b", "Бета", 10.0), item("2", "a", "Алфа", 10.0)].iter(),
        );
        let names: Vec<&str> = totals.iter().map(|c| c.category_name.as_str()).collect();
        assert_eq!(names, vec!["Алфа", "Бета"]);
    }
}
