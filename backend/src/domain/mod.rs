//! # Domain Module
//!
//! Business logic of the home budget tracker. Everything here is synchronous
//! and free of UI concerns.
//!
//! - [`formatting`]: month labels, decimal parsing, money/kWh display
//! - [`electricity_calculator`]: two-meter bill split with validation
//! - [`category_catalog`]: built-in and session-only expense categories
//! - [`expense_service`], [`savings_service`]: list bookkeeping
//! - [`report_service`]: aggregates across months
//! - [`export_service`]: text export of a calculation
//! - [`app_controller`]: load gate and the single writer of stored state

pub mod app_controller;
pub mod category_catalog;
pub mod electricity_calculator;
pub mod export_service;
pub mod expense_service;
pub mod formatting;
pub mod ids;
pub mod report_service;
pub mod savings_service;

pub use app_controller::{AppController, LoadPhase};
pub use category_catalog::CategoryCatalog;
pub use electricity_calculator::{
    calculate_electricity, ElectricityCalculation, ElectricityField, ElectricityValidationError, Tariff,
};
pub use expense_service::ExpenseService;
pub use report_service::ReportService;
pub use savings_service::SavingsService;
