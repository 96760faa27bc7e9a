//! Expense categories offered by the pickers.
//!
//! Two built-in catalogs exist: one for variable (day-to-day) expenses and one
//! for fixed monthly payments. Users may add their own categories while the
//! app is open. Custom categories live only in the [`CategoryCatalog`] of the
//! current session and are never written to storage; items created with them
//! keep the category name, icon and color on the item itself.

use anyhow::{anyhow, Result};
use log::info;
use shared::{CategoryIcon, ExpenseCategory};

/// Color class given to every custom category
pub const CUSTOM_CATEGORY_COLOR: &str = "bg-slate-100 text-slate-500";

/// ID of the variable category used for electricity bill items
pub const ELECTRICITY_CATEGORY_ID: &str = "electricity";

const VARIABLE_CATALOG: &[(&str, &str, CategoryIcon, &str)] = &[
    ("water", "Вода", CategoryIcon::Droplets, "bg-blue-100 text-blue-500"),
    ("electricity", "Ток", CategoryIcon::Zap, "bg-yellow-100 text-yellow-600"),
    ("fuel", "Гориво", CategoryIcon::Fuel, "bg-red-100 text-red-500"),
    ("car", "Кола", CategoryIcon::Car, "bg-zinc-100 text-zinc-600"),
    ("food", "Храна", CategoryIcon::Utensils, "bg-orange-100 text-orange-500"),
    ("hair", "Фризьор", CategoryIcon::Scissors, "bg-purple-100 text-purple-500"),
    ("restaurant", "Ресторант", CategoryIcon::UtensilsCrossed, "bg-yellow-100 text-yellow-600"),
    ("cinema", "Кино", CategoryIcon::Film, "bg-indigo-100 text-indigo-500"),
    ("pharmacy", "Аптека", CategoryIcon::Pill, "bg-emerald-100 text-emerald-600"),
    ("pets", "Домашни любимци", CategoryIcon::PawPrint, "bg-amber-100 text-amber-600"),
    ("cleaning", "Почистване", CategoryIcon::Sparkles, "bg-cyan-100 text-cyan-500"),
    ("clothes", "Дрехи", CategoryIcon::Shirt, "bg-pink-100 text-pink-500"),
    ("cosmetics", "Козметика", CategoryIcon::Heart, "bg-rose-100 text-rose-500"),
    ("gifts", "Подаръци", CategoryIcon::Gift, "bg-fuchsia-100 text-fuchsia-500"),
    ("education", "Образование", CategoryIcon::GraduationCap, "bg-blue-100 text-blue-500"),
    ("health", "Здраве", CategoryIcon::Heart, "bg-red-50 text-red-600"),
    ("transport", "Транспорт", CategoryIcon::Bus, "bg-slate-100 text-slate-600"),
    ("taxi", "Такси и услуги", CategoryIcon::CarTaxiFront, "bg-yellow-50 text-yellow-600"),
    ("other", "Други", CategoryIcon::ShoppingBag, "bg-emerald-100 text-emerald-500"),
];

const FIXED_CATALOG: &[(&str, &str, CategoryIcon, &str)] = &[
    ("credit", "Кредит", CategoryIcon::CreditCard, "bg-blue-100 text-blue-600"),
    ("phone", "Телефон", CategoryIcon::Phone, "bg-indigo-100 text-indigo-600"),
    ("internet", "Интернет", CategoryIcon::Wifi, "bg-cyan-100 text-cyan-600"),
    ("rent", "Наем", CategoryIcon::Home, "bg-emerald-100 text-emerald-600"),
    ("subscription", "Абонамент", CategoryIcon::RefreshCw, "bg-purple-100 text-purple-600"),
    ("insurance", "Застраховка", CategoryIcon::Shield, "bg-red-100 text-red-600"),
];

fn build(entries: &[(&str, &str, CategoryIcon, &str)]) -> Vec<ExpenseCategory> {
    entries
        .iter()
        .map(|(id, name, icon, color)| ExpenseCategory {
            id: id.to_string(),
            name: name.to_string(),
            icon_name: *icon,
            color_class: color.to_string(),
            is_custom: false,
        })
        .collect()
}

/// Built-in variable expense categories
pub fn variable_categories() -> Vec<ExpenseCategory> {
    build(VARIABLE_CATALOG)
}

/// Built-in fixed expense categories
pub fn fixed_categories() -> Vec<ExpenseCategory> {
    build(FIXED_CATALOG)
}

pub fn find_fixed_category(id: &str) -> Option<ExpenseCategory> {
    fixed_categories().into_iter().find(|c| c.id == id)
}

pub fn find_variable_category(id: &str) -> Option<ExpenseCategory> {
    variable_categories().into_iter().find(|c| c.id == id)
}

/// Category lists for one session, including the custom categories added so far
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCatalog {
    variable: Vec<ExpenseCategory>,
    fixed: Vec<ExpenseCategory>,
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryCatalog {
    pub fn new() -> Self {
        Self {
            variable: variable_categories(),
            fixed: fixed_categories(),
        }
    }

    /// Variable categories in picker order, custom ones last
    pub fn variable(&self) -> &[ExpenseCategory] {
        &self.variable
    }

    pub fn fixed(&self) -> &[ExpenseCategory] {
        &self.fixed
    }

    /// Create a custom variable category and append it to the picker list
    pub fn add_custom_variable(&mut self, name: &str, epoch_millis: u64) -> Result<ExpenseCategory> {
        let name = validated_name(name)?;
        let id = self.unique_id("custom", epoch_millis);

        let category = ExpenseCategory {
            id,
            name,
            icon_name: CategoryIcon::CircleHelp,
            color_class: CUSTOM_CATEGORY_COLOR.to_string(),
            is_custom: true,
        };
        info!("Added custom category '{}' ({})", category.name, category.id);
        self.variable.push(category.clone());
        Ok(category)
    }

    /// Create a custom fixed category.
    ///
    /// The category is returned for immediate selection but is not added to
    /// the fixed picker list.
    pub fn custom_fixed(&self, name: &str, epoch_millis: u64) -> Result<ExpenseCategory> {
        let name = validated_name(name)?;
        Ok(ExpenseCategory {
            id: format!("custom_fixed_{}", epoch_millis),
            name,
            icon_name: CategoryIcon::CreditCard,
            color_class: CUSTOM_CATEGORY_COLOR.to_string(),
            is_custom: true,
        })
    }

    /// Look a category up in either list
    pub fn find(&self, id: &str) -> Option<&ExpenseCategory> {
        self.variable.iter().chain(self.fixed.iter()).find(|c| c.id == id)
    }

    fn unique_id(&self, prefix: &str, epoch_millis: u64) -> String {
        let mut millis = epoch_millis;
        loop {
            let id = format!("{}_{}", prefix, millis);
            if self.find(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }
}

fn validated_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("Category name cannot be empty"));
    }
    Ok(name.to_string())
}
