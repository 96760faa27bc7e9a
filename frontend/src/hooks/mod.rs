pub mod use_budget;

pub use use_budget::use_budget;
