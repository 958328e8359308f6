//! Page Modules
//!
//! Each page implements the Module trait and owns its own view state.
//! Rendering lives in `ui::pages`.
//!
//! Modules:
//! - dashboard: portfolio metrics with a time-range dropdown
//! - transactions: filterable statement rows
//! - portfolio: currency holdings
//! - insights: spending, forecast and investment plan
//! - profile: the user form
//! - export: CSV and JSON files

pub mod dashboard;
pub mod export;
pub mod insights;
pub mod portfolio;
pub mod profile;
pub mod transactions;

pub use dashboard::DashboardPage;
pub use insights::{InsightsPage, InsightsPanel};
pub use portfolio::PortfolioPage;
pub use profile::{ProfileEdit, ProfileError, ProfileField, ProfileForm, ProfilePage};
pub use transactions::{FilterState, TransactionsPage};
