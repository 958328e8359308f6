//! Plain-text insights report for `--report`.

use std::fmt::Write;

use crate::domain::analytics::{self, TOP_EXPENSES};
use crate::domain::currency::{format_grouped, format_inr};
use crate::domain::{Insights, Statement};
use crate::ui::widgets::sparkline_text;

pub fn render(statement: &Statement, insights: &Insights, age: Option<u32>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, statement, insights, age);
    out
}

fn write_report(
    out: &mut String,
    statement: &Statement,
    insights: &Insights,
    age: Option<u32>,
) -> std::fmt::Result {
    let header = &statement.header;
    let summary = &insights.summary;

    writeln!(out, "== Statement ==")?;
    if let Some(name) = &header.holder_name {
        writeln!(out, "Holder:          {name}")?;
    }
    if let Some(account) = &header.account_number {
        writeln!(out, "Account:         {account}")?;
    }
    if let (Some(from), Some(to)) = (&header.period_from, &header.period_to) {
        writeln!(out, "Period:          {from} to {to}")?;
    }
    writeln!(out, "Transactions:    {}", summary.transaction_count)?;
    if statement.skipped_rows > 0 {
        writeln!(out, "Skipped rows:    {}", statement.skipped_rows)?;
    }
    writeln!(out)?;

    writeln!(out, "== Spending ==")?;
    writeln!(out, "Total expenditure: ₹{}", format_grouped(summary.total_expenditure))?;
    writeln!(out, "Total income:      ₹{}", format_grouped(summary.total_income))?;
    writeln!(out, "Average daily:     ₹{}", format_grouped(summary.average_daily))?;
    let monthly: Vec<f64> = summary.monthly.values().copied().collect();
    writeln!(out, "Monthly trend:     {}", sparkline_text(&monthly, 36))?;
    writeln!(out)?;
    for (category, amount) in &summary.by_category {
        writeln!(out, "  {:<14}{:>14}", category.title(), format_grouped(*amount))?;
    }
    writeln!(out)?;

    writeln!(out, "== Top {TOP_EXPENSES} expenses ==")?;
    for tx in analytics::top_expenses(&statement.transactions, TOP_EXPENSES) {
        writeln!(
            out,
            "  {}  {:>12}  {}",
            tx.date.format("%Y-%m-%d"),
            format_grouped(tx.amount),
            tx.narration
        )?;
    }
    writeln!(out)?;

    writeln!(out, "== Balance forecast ==")?;
    match &insights.forecast {
        Ok(points) => {
            writeln!(out, "  {:<8}{:>12}{:>12}{:>12}", "Month", "Predicted", "Lower", "Upper")?;
            for point in points {
                let point = point.floored();
                writeln!(
                    out,
                    "  {:<8}{:>12}{:>12}{:>12}",
                    point.month.to_string(),
                    format_inr(point.yhat),
                    format_inr(point.lower),
                    format_inr(point.upper)
                )?;
            }
        }
        Err(err) => writeln!(out, "  unavailable: {err}")?,
    }
    writeln!(out)?;

    let plan = insights.plan(age);
    writeln!(out, "== Investment plan ==")?;
    writeln!(out, "Age:               {}", plan.age)?;
    writeln!(out, "Risk tolerance:    {}", plan.strategy.risk)?;
    writeln!(out, "Avg monthly spend: {}", format_inr(insights.average_expense))?;
    writeln!(out, "Investable:        {}", format_inr(insights.investable()))?;
    writeln!(
        out,
        "Invest now:        {} ({:.1}%)",
        format_inr(plan.total),
        plan.strategy.investment_percent * 100.0
    )?;
    writeln!(
        out,
        "  Equities {:.0}%:    {}",
        plan.allocation.equities * 100.0,
        format_inr(plan.equity_amount)
    )?;
    for fund in plan.equity_funds() {
        writeln!(out, "    {} ({:.1}% 1Y)", fund.name, fund.one_year)?;
    }
    writeln!(
        out,
        "  Debt {:.0}%:        {}",
        plan.allocation.debt * 100.0,
        format_inr(plan.debt_amount)
    )?;
    for fund in plan.debt_funds() {
        writeln!(out, "    {} ({:.1}% 1Y)", fund.name, fund.one_year)?;
    }
    Ok(())
}
