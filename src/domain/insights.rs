//! Everything derived from one statement, computed once per load.

use super::analytics::{self, SpendingSummary};
use super::balance::{self, MonthlyBalance};
use super::forecast::{self, ForecastError, ForecastPoint};
use super::invest::{self, InvestmentPlan};
use super::statement::Statement;

const OUTLIER_LOWER_Q: f64 = 0.01;
const OUTLIER_UPPER_Q: f64 = 0.99;
pub const DEFAULT_AGE: u32 = 30;

#[derive(Debug, Clone)]
pub struct Insights {
    pub summary: SpendingSummary,
    /// Last closing balance per month, outliers removed.
    pub history: Vec<MonthlyBalance>,
    pub forecast: Result<Vec<ForecastPoint>, ForecastError>,
    pub average_expense: f64,
    pub negative_balances: usize,
}

impl Insights {
    pub fn compute(statement: &Statement, forecast_months: usize) -> Self {
        let transactions = &statement.transactions;
        let monthly = balance::monthly_last(transactions);
        let history = balance::remove_outliers(&monthly, OUTLIER_LOWER_Q, OUTLIER_UPPER_Q);
        let forecast = forecast::forecast(&history, forecast_months);
        if let Err(err) = &forecast {
            tracing::warn!(error = %err, "balance forecast unavailable");
        }

        Self {
            summary: analytics::summarize(transactions),
            history,
            forecast,
            average_expense: balance::average_monthly_expense(transactions),
            negative_balances: balance::negative_balances(transactions).len(),
        }
    }

    /// Last forecast balance, or the last known one when no forecast exists.
    pub fn current_balance(&self) -> f64 {
        match &self.forecast {
            Ok(points) if !points.is_empty() => points[points.len() - 1].yhat,
            _ => self.history.last().map(|m| m.balance).unwrap_or(0.0),
        }
    }

    pub fn investable(&self) -> f64 {
        invest::investable_amount(self.current_balance(), self.average_expense)
    }

    pub fn plan(&self, age: Option<u32>) -> InvestmentPlan {
        InvestmentPlan::new(age.unwrap_or(DEFAULT_AGE), self.investable())
    }

    pub fn forecast_points(&self) -> &[ForecastPoint] {
        match &self.forecast {
            Ok(points) => points,
            Err(_) => &[],
        }
    }
}
