//! Closing-balance history: monthly aggregation and outlier trimming.

use std::collections::BTreeMap;

use super::month::YearMonth;
use super::statement::Transaction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyBalance {
    pub month: YearMonth,
    pub balance: f64,
}

pub fn negative_balances(transactions: &[Transaction]) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.closing_balance.is_some_and(|balance| balance < 0.0))
        .collect()
}

/// Last closing balance of each month, in statement order within the month.
pub fn monthly_last(transactions: &[Transaction]) -> Vec<MonthlyBalance> {
    let mut months: BTreeMap<YearMonth, f64> = BTreeMap::new();
    for tx in transactions {
        if let Some(balance) = tx.closing_balance {
            months.insert(YearMonth::of(tx.date), balance);
        }
    }
    months
        .into_iter()
        .map(|(month, balance)| MonthlyBalance { month, balance })
        .collect()
}

pub fn monthly_average(transactions: &[Transaction]) -> Vec<MonthlyBalance> {
    let mut months: BTreeMap<YearMonth, (f64, usize)> = BTreeMap::new();
    for tx in transactions {
        if let Some(balance) = tx.closing_balance {
            let slot = months.entry(YearMonth::of(tx.date)).or_insert((0.0, 0));
            slot.0 += balance;
            slot.1 += 1;
        }
    }
    months
        .into_iter()
        .map(|(month, (sum, count))| MonthlyBalance {
            month,
            balance: sum / count as f64,
        })
        .collect()
}

/// Quantile with linear interpolation between closest ranks.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Keep months whose balance lies within the `[lower_q, upper_q]` quantile band.
pub fn remove_outliers(months: &[MonthlyBalance], lower_q: f64, upper_q: f64) -> Vec<MonthlyBalance> {
    let values: Vec<f64> = months.iter().map(|m| m.balance).collect();
    let (Some(lower), Some(upper)) = (quantile(&values, lower_q), quantile(&values, upper_q)) else {
        return Vec::new();
    };
    months
        .iter()
        .filter(|m| m.balance >= lower && m.balance <= upper)
        .copied()
        .collect()
}

/// Mean of the per-month withdrawal totals, over months present in the data.
pub fn average_monthly_expense(transactions: &[Transaction]) -> f64 {
    let mut months: BTreeMap<YearMonth, f64> = BTreeMap::new();
    for tx in transactions {
        *months.entry(YearMonth::of(tx.date)).or_insert(0.0) += tx.withdrawal;
    }
    if months.is_empty() {
        return 0.0;
    }
    months.values().sum::<f64>() / months.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(y: i32, m: u32, d: u32, withdrawal: f64, balance: Option<f64>) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            "ENTRY",
            withdrawal,
            0.0,
            balance,
        )
    }

    #[test]
    fn monthly_last_takes_final_row_of_month() {
        let txs = vec![
            tx(2024, 1, 5, 10.0, Some(100.0)),
            tx(2024, 1, 20, 10.0, Some(90.0)),
            tx(2024, 1, 28, 10.0, None),
            tx(2024, 2, 2, 10.0, Some(80.0)),
        ];
        let months = monthly_last(&txs);
        assert_eq!(
            months,
            vec![
                MonthlyBalance { month: YearMonth::new(2024, 1), balance: 90.0 },
                MonthlyBalance { month: YearMonth::new(2024, 2), balance: 80.0 },
            ]
        );
        let avg = monthly_average(&txs);
        assert_eq!(avg[0].balance, 95.0);
    }

    #[test]
    fn negative_balances_are_reported() {
        let txs = vec![tx(2024, 1, 5, 10.0, Some(-5.0)), tx(2024, 1, 6, 0.0, Some(5.0))];
        assert_eq!(negative_balances(&txs).len(), 1);
    }

    #[test]
    fn quantile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.5), Some(2.5));
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 1.0), Some(4.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn outliers_outside_band_are_dropped() {
        let months: Vec<MonthlyBalance> = (1..=12)
            .map(|m| MonthlyBalance {
                month: YearMonth::new(2023, m),
                balance: m as f64 * 100.0,
            })
            .collect();
        let kept = remove_outliers(&months, 0.01, 0.99);
        // the extremes sit just outside the interpolated 1% and 99% quantiles
        assert_eq!(kept.len(), 10);
        assert_eq!(kept.first().map(|m| m.month.month), Some(2));
        assert_eq!(kept.last().map(|m| m.month.month), Some(11));
    }

    #[test]
    fn average_monthly_expense_over_present_months() {
        let txs = vec![
            tx(2024, 1, 5, 100.0, None),
            tx(2024, 1, 9, 300.0, None),
            tx(2024, 3, 1, 200.0, None),
        ];
        assert_eq!(average_monthly_expense(&txs), 300.0);
        assert_eq!(average_monthly_expense(&[]), 0.0);
    }
}
