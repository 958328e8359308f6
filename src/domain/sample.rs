//! Deterministic demo statement used when no statement file is configured.

use chrono::NaiveDate;

use super::month::YearMonth;
use super::statement::{Statement, StatementHeader, Transaction};

const FIRST_MONTH: YearMonth = YearMonth { year: 2023, month: 1 };
const MONTHS: i64 = 18;
const OPENING_BALANCE: f64 = 40_000.0;

/// (day, narration, base withdrawal, base deposit, per-month variation)
const SCHEDULE: [(u32, &str, f64, f64, f64); 10] = [
    (1, "SALARY CREDIT ACME CORP", 0.0, 85_000.0, 2_500.0),
    (3, "ELECTRICITY BILL BESCOM", 1_800.0, 0.0, 150.0),
    (5, "UPI-RENT-LANDLORD", 22_000.0, 0.0, 0.0),
    (8, "POS AMAZON RETAIL", 2_500.0, 0.0, 400.0),
    (12, "ZOMATO ORDER", 600.0, 0.0, 90.0),
    (15, "HPCL FUEL STATION", 3_000.0, 0.0, 250.0),
    (18, "NETFLIX SUBSCRIPTION", 649.0, 0.0, 0.0),
    (22, "SWIGGY INSTAMART", 1_800.0, 0.0, 120.0),
    (25, "ATM CASH WITHDRAWAL", 5_000.0, 0.0, 500.0),
    (27, "MUTUAL FUND SIP", 10_000.0, 0.0, 0.0),
];

pub fn sample_statement() -> Statement {
    let mut balance = OPENING_BALANCE;
    let mut transactions = Vec::new();
    let mut reference = 410_000u64;

    for n in 0..MONTHS {
        let month = FIRST_MONTH.offset(n);
        for (slot, (day, narration, withdrawal, deposit, step)) in SCHEDULE.iter().enumerate() {
            let Some(date) = NaiveDate::from_ymd_opt(month.year, month.month, *day) else {
                continue;
            };
            let wobble = ((n as u64 * 7 + slot as u64 * 3) % 5) as f64 * step;
            let (withdrawal, deposit) = if *deposit > 0.0 {
                (0.0, deposit + wobble)
            } else {
                (withdrawal + wobble, 0.0)
            };
            balance += deposit - withdrawal;
            reference += 1;
            transactions.push(
                Transaction::new(date, *narration, withdrawal, deposit, Some(balance))
                    .with_reference(format!("{reference:010}"))
                    .with_value_date(date.format("%d/%m/%y").to_string()),
            );
        }
    }

    let last = FIRST_MONTH.offset(MONTHS - 1);
    Statement {
        header: StatementHeader {
            period_from: Some("01/01/2023".to_string()),
            period_to: Some(format!("28/{:02}/{}", last.month, last.year)),
            account_number: Some("50100234567812".to_string()),
            email: Some("asha.rao@example.com".to_string()),
            holder_name: Some("ASHA RAO".to_string()),
            customer_id: Some("77120034".to_string()),
        },
        transactions,
        skipped_rows: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;

    #[test]
    fn sample_is_stable_and_covers_categories() {
        let a = sample_statement();
        let b = sample_statement();
        assert_eq!(a.transactions, b.transactions);
        assert_eq!(a.transactions.len(), 18 * SCHEDULE.len());
        for category in [
            Category::Salary,
            Category::Transfer,
            Category::Shopping,
            Category::Food,
            Category::Entertainment,
            Category::Utilities,
            Category::Fuel,
            Category::Others,
        ] {
            assert!(
                a.transactions.iter().any(|tx| tx.category == category),
                "missing {category}"
            );
        }
    }
}
