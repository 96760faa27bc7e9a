use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Every stored month, keyed by its month label (e.g. "Октомври 2026")
pub type MonthlyData = BTreeMap<String, MonthlyRecord>;

/// Marker kept in every stored record so older readers recognise the blob
pub const RECORD_TAB_EXPENSES: &str = "expenses";

/// One calendar month of budget data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Month label, also the key of this record in [`MonthlyData`]
    pub month: String,
    #[serde(default = "default_tab")]
    pub tab: String,
    pub meta: RecordMeta,
    /// Last electricity calculation stored for the month (all zero if never calculated)
    #[serde(default)]
    pub inputs: ElectricityInputs,
    #[serde(default)]
    pub results: ElectricityResults,
    #[serde(default)]
    pub expenses: MonthExpenses,
    #[serde(default)]
    pub incomes: Vec<IncomeItem>,
}

fn default_tab() -> String {
    RECORD_TAB_EXPENSES.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    /// RFC 3339 timestamp of when the record was first created
    pub generated_at: String,
}

impl MonthlyRecord {
    /// Create an empty record for a month that has never been written
    pub fn empty(month: &str, generated_at: String) -> Self {
        Self {
            month: month.to_string(),
            tab: default_tab(),
            meta: RecordMeta { generated_at },
            inputs: ElectricityInputs::default(),
            results: ElectricityResults::default(),
            expenses: MonthExpenses::default(),
            incomes: Vec::new(),
        }
    }
}

/// Numeric meter readings and tariffs of a stored electricity calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectricityInputs {
    #[serde(default, deserialize_with = "number_or_zero")]
    pub old_t1: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub new_t1: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub old_t2: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub new_t2: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub day_price_with_vat: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub night_price_with_vat: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub invoice_total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectricityResults {
    #[serde(default, deserialize_with = "number_or_zero")]
    pub cons_t1_kwh: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub cons_t2_kwh: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub total_cons_em1_kwh: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub cost_em1_eur: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub em2_remainder_eur: f64,
}

/// Fixed and variable expenses of one month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthExpenses {
    #[serde(default, deserialize_with = "number_or_zero")]
    pub saved_em2_eur: f64,
    #[serde(default, deserialize_with = "deserialize_fixed_expenses")]
    pub fixed_expenses: Vec<ExpenseItem>,
    #[serde(default)]
    pub additional_expenses: Vec<ExpenseItem>,
}

/// A single expense line inside a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseItem {
    /// Item ID in format: "<prefix>_<epoch_millis>_<suffix>"
    pub id: String,
    pub category_id: String,
    pub category_name: String,
    pub category_icon: CategoryIcon,
    /// Opaque display hint, never interpreted by the core
    pub category_color: String,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// RFC 3339 creation timestamp
    pub date: String,
}

impl ExpenseItem {
    /// Generate an item ID from a prefix, a timestamp and a random suffix
    pub fn generate_id(prefix: &str, epoch_millis: u64, suffix: &str) -> String {
        format!("{}_{}_{}", prefix, epoch_millis, suffix)
    }

    /// Extract the creation timestamp embedded in a generated ID
    pub fn parse_id_timestamp(id: &str) -> Result<u64, ItemIdError> {
        let parts: Vec<&str> = id.rsplitn(3, '_').collect();
        if parts.len() != 3 || parts[2].is_empty() || parts[0].is_empty() {
            return Err(ItemIdError::InvalidFormat);
        }
        parts[1].parse::<u64>().map_err(|_| ItemIdError::InvalidTimestamp)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for ItemIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemIdError::InvalidFormat => write!(f, "Invalid item ID format"),
            ItemIdError::InvalidTimestamp => write!(f, "Invalid timestamp in item ID"),
        }
    }
}

impl std::error::Error for ItemIdError {}

/// Entry of the global savings ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub date: String,
}

/// A category offered by the expense pickers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub id: String,
    pub name: String,
    pub icon_name: CategoryIcon,
    pub color_class: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_custom: bool,
}

/// Closed set of category icons; the UI decides how each one is drawn.
///
/// Unknown names from older data fall back to `CircleHelp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryIcon {
    Droplets,
    Zap,
    Fuel,
    Car,
    Utensils,
    UtensilsCrossed,
    Scissors,
    Film,
    Pill,
    PawPrint,
    Sparkles,
    Shirt,
    Heart,
    Gift,
    GraduationCap,
    Bus,
    CarTaxiFront,
    ShoppingBag,
    CreditCard,
    Phone,
    Wifi,
    Home,
    RefreshCw,
    Shield,
    #[serde(other)]
    CircleHelp,
}

/// Raw text of the electricity form, exactly as the user typed it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricityForm {
    pub old_t1: String,
    pub new_t1: String,
    pub old_t2: String,
    pub new_t2: String,
    pub price_t1: String,
    pub price_t2: String,
    pub invoice_total: String,
}

/// Totals of one month for the reports view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: String,
    pub total_fixed: f64,
    pub total_variable: f64,
    pub total: f64,
    pub item_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category_id: String,
    pub category_name: String,
    pub category_icon: CategoryIcon,
    pub total: f64,
    pub item_count: usize,
}

/// Aggregates over every stored month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    /// Months in chronological order
    pub months: Vec<MonthSummary>,
    /// Category totals across all months, largest first
    pub category_totals: Vec<CategoryTotal>,
    pub grand_total: f64,
    pub average_monthly_total: f64,
}

/// Fixed expenses as stored by the first version of the app
#[derive(Debug, Deserialize)]
struct LegacyFixedExpenses {
    #[serde(default)]
    credit_eur: Option<f64>,
    #[serde(default)]
    phone_eur: Option<f64>,
    #[serde(default)]
    internet_eur: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredFixedExpenses {
    Items(Vec<ExpenseItem>),
    Legacy(LegacyFixedExpenses),
}

impl LegacyFixedExpenses {
    fn into_items(self) -> Vec<ExpenseItem> {
        let now = chrono::Utc::now().to_rfc3339();
        let entries = [
            ("credit", "Кредит", CategoryIcon::CreditCard, "bg-blue-100 text-blue-600", self.credit_eur),
            ("phone", "Телефон", CategoryIcon::Phone, "bg-indigo-100 text-indigo-600", self.phone_eur),
            ("internet", "Интернет", CategoryIcon::Wifi, "bg-cyan-100 text-cyan-600", self.internet_eur),
        ];

        entries
            .into_iter()
            .filter_map(|(id, name, icon, color, amount)| {
                let amount = amount.filter(|a| *a != 0.0)?;
                Some(ExpenseItem {
                    id: format!("fix_legacy_{}", id),
                    category_id: id.to_string(),
                    category_name: name.to_string(),
                    category_icon: icon,
                    category_color: color.to_string(),
                    amount,
                    note: None,
                    date: now.clone(),
                })
            })
            .collect()
    }
}

/// Stored numbers may be `null` where a NaN or infinity was once serialized;
/// those read back as zero
fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

fn deserialize_fixed_expenses<'de, D>(deserializer: D) -> Result<Vec<ExpenseItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Option::<StoredFixedExpenses>::deserialize(deserializer)?;
    Ok(match stored {
        Some(StoredFixedExpenses::Items(items)) => items,
        Some(StoredFixedExpenses::Legacy(legacy)) => legacy.into_items(),
        None => Vec::new(),
    })
}
