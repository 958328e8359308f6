//! Finance domain: statements, analytics, forecasting and planning.

pub mod analytics;
pub mod balance;
pub mod category;
pub mod currency;
pub mod forecast;
pub mod insights;
pub mod invest;
pub mod month;
pub mod portfolio;
pub mod sample;
pub mod statement;

pub use category::Category;
pub use insights::Insights;
pub use month::YearMonth;
pub use statement::{Statement, StatementError, StatementHeader, Transaction, TxKind};
