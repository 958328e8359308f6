//! Spending analytics over a list of transactions.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::category::Category;
use super::month::YearMonth;
use super::statement::{Transaction, TxKind};

pub const TOP_EXPENSES: usize = 10;
pub const HISTOGRAM_BINS: usize = 20;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpendingSummary {
    pub total_expenditure: f64,
    pub total_income: f64,
    /// Withdrawals only.
    pub by_category: BTreeMap<Category, f64>,
    /// Withdrawals only.
    pub monthly: BTreeMap<YearMonth, f64>,
    /// Mean spend over the days of each month that had any spending.
    pub avg_daily_by_month: BTreeMap<YearMonth, f64>,
    /// Mean spend over all days that had any spending.
    pub average_daily: f64,
    pub transaction_count: usize,
}

impl SpendingSummary {
    pub fn net(&self) -> f64 {
        self.total_income - self.total_expenditure
    }

    /// Monthly spending in chronological order.
    pub fn monthly_series(&self) -> Vec<(YearMonth, f64)> {
        self.monthly.iter().map(|(m, v)| (*m, *v)).collect()
    }
}

pub fn summarize(transactions: &[Transaction]) -> SpendingSummary {
    let mut summary = SpendingSummary {
        transaction_count: transactions.len(),
        ..SpendingSummary::default()
    };
    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for tx in transactions {
        match tx.kind {
            TxKind::Withdrawal => {
                summary.total_expenditure += tx.amount;
                *summary.by_category.entry(tx.category).or_insert(0.0) += tx.amount;
                *summary.monthly.entry(YearMonth::of(tx.date)).or_insert(0.0) += tx.amount;
                *daily.entry(tx.date).or_insert(0.0) += tx.amount;
            }
            TxKind::Deposit => summary.total_income += tx.amount,
            TxKind::Unknown => {}
        }
    }

    let mut per_month: BTreeMap<YearMonth, (f64, usize)> = BTreeMap::new();
    for (date, amount) in &daily {
        let slot = per_month.entry(YearMonth::of(*date)).or_insert((0.0, 0));
        slot.0 += amount;
        slot.1 += 1;
    }
    summary.avg_daily_by_month = per_month
        .into_iter()
        .map(|(month, (total, days))| (month, total / days as f64))
        .collect();
    if !daily.is_empty() {
        summary.average_daily = daily.values().sum::<f64>() / daily.len() as f64;
    }
    summary
}

/// Largest withdrawals, biggest first; ties keep statement order.
pub fn top_expenses(transactions: &[Transaction], n: usize) -> Vec<&Transaction> {
    let mut withdrawals: Vec<&Transaction> =
        transactions.iter().filter(|tx| tx.is_withdrawal()).collect();
    withdrawals.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    withdrawals.truncate(n);
    withdrawals
}

/// Equal-width histogram of all transaction amounts.
///
/// The last bin includes the maximum. When every amount is equal, all land in
/// the first bin.
pub fn amount_histogram(transactions: &[Transaction], bins: usize) -> Vec<u64> {
    let mut counts = vec![0u64; bins];
    if bins == 0 || transactions.is_empty() {
        return counts;
    }
    let min = transactions.iter().map(|tx| tx.amount).fold(f64::INFINITY, f64::min);
    let max = transactions
        .iter()
        .map(|tx| tx.amount)
        .fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;
    for tx in transactions {
        let idx = if width > 0.0 {
            (((tx.amount - min) / width) as usize).min(bins - 1)
        } else {
            0
        };
        counts[idx] += 1;
    }
    counts
}

/// Distinct narrations that fell through to `Category::Others`, first-seen order.
pub fn uncategorized(transactions: &[Transaction]) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    transactions
        .iter()
        .filter(|tx| tx.category == Category::Others)
        .map(|tx| tx.narration.as_str())
        .filter(|narration| seen.insert(*narration))
        .collect()
}
