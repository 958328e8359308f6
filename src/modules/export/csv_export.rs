//! CSV Export
//!
//! Writes cleaned transactions and the balance forecast to CSV files.

use std::path::Path;

use crate::domain::forecast::ForecastPoint;
use crate::domain::Transaction;

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write transactions to CSV file
pub fn write_transactions(path: &Path, txs: &[&Transaction]) -> Result<usize, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    // Write header
    wtr.write_record([
        "date",
        "value_dt",
        "narration",
        "chq_ref_number",
        "withdrawal_amt",
        "deposit_amt",
        "closing_balance",
        "amount",
        "transaction_type",
        "narration_clean",
        "category",
    ])?;

    // Write data rows
    for tx in txs {
        wtr.write_record([
            tx.date.format("%Y-%m-%d").to_string(),
            tx.value_date.clone(),
            tx.narration.clone(),
            tx.reference.clone(),
            tx.withdrawal.to_string(),
            tx.deposit.to_string(),
            optional(tx.closing_balance),
            tx.amount.to_string(),
            tx.kind.title().to_string(),
            tx.narration_clean.clone(),
            tx.category.title().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(txs.len())
}

/// Write forecast points to CSV file, values unformatted
pub fn write_forecast(path: &Path, points: &[ForecastPoint]) -> Result<usize, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "Date",
        "Predicted_Closing_Balance",
        "Lower_Confidence_Interval",
        "Upper_Confidence_Interval",
    ])?;

    for point in points {
        let point = point.floored();
        wtr.write_record([
            point.month.to_string(),
            format!("{:.2}", point.yhat),
            format!("{:.2}", point.lower),
            format!("{:.2}", point.upper),
        ])?;
    }

    wtr.flush()?;
    Ok(points.len())
}
