pub mod category_picker;
pub mod electricity_tab;
pub mod header;
pub mod monthly_expenses_tab;
pub mod monthly_totals_chart;
pub mod reports_tab;
pub mod savings_tab;

pub use electricity_tab::ElectricityTab;
pub use header::{Header, Tab};
pub use monthly_expenses_tab::MonthlyExpensesTab;
pub use reports_tab::ReportsTab;
pub use savings_tab::SavingsTab;
