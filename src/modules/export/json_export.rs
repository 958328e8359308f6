//! JSON Export
//!
//! Writes the statement summary, forecast and investment plan to a JSON file.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::{Insights, StatementHeader};

#[derive(Debug, Serialize)]
pub struct SummaryExport {
    #[serde(skip_serializing_if = "Option::is_none")]
    holder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    period_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    period_to: Option<String>,
    transaction_count: usize,
    total_expenditure: f64,
    total_income: f64,
    average_daily_spending: f64,
    spending_by_category: BTreeMap<String, f64>,
    monthly_spending: BTreeMap<String, f64>,
    forecast: Vec<ExportablePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    forecast_error: Option<String>,
    plan: ExportablePlan,
}

#[derive(Debug, Serialize)]
struct ExportablePoint {
    month: String,
    predicted: f64,
    lower: f64,
    upper: f64,
}

#[derive(Debug, Serialize)]
struct ExportablePlan {
    age: u32,
    risk_tolerance: String,
    investable: f64,
    total: f64,
    equities: f64,
    debt: f64,
}

impl SummaryExport {
    pub fn build(header: &StatementHeader, insights: &Insights, age: Option<u32>) -> Self {
        let summary = &insights.summary;
        let plan = insights.plan(age);

        Self {
            holder_name: header.holder_name.clone(),
            account_number: header.account_number.clone(),
            period_from: header.period_from.clone(),
            period_to: header.period_to.clone(),
            transaction_count: summary.transaction_count,
            total_expenditure: summary.total_expenditure,
            total_income: summary.total_income,
            average_daily_spending: summary.average_daily,
            spending_by_category: summary
                .by_category
                .iter()
                .map(|(category, amount)| (category.title().to_string(), *amount))
                .collect(),
            monthly_spending: summary
                .monthly
                .iter()
                .map(|(month, amount)| (month.to_string(), *amount))
                .collect(),
            forecast: insights
                .forecast_points()
                .iter()
                .map(|point| {
                    let point = point.floored();
                    ExportablePoint {
                        month: point.month.to_string(),
                        predicted: point.yhat,
                        lower: point.lower,
                        upper: point.upper,
                    }
                })
                .collect(),
            forecast_error: insights.forecast.as_ref().err().map(|e| e.to_string()),
            plan: ExportablePlan {
                age: plan.age,
                risk_tolerance: plan.strategy.risk.title().to_string(),
                investable: insights.investable(),
                total: plan.total,
                equities: plan.equity_amount,
                debt: plan.debt_amount,
            },
        }
    }
}

/// Write the summary to JSON file
pub fn write_summary(path: &Path, summary: &SummaryExport) -> Result<usize, Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(summary)?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(1)
}

