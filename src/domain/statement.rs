//! Bank statement model and CSV statement parser.
//!
//! Statements are the CSV export of a bank's account statement: a free-form
//! preamble (holder, account number, period), a transaction table introduced by
//! a `Date ... Narration ...` header row, and an optional trailing
//! `Statement Summary` block. Cleaned exports written by this crate share the
//! same header names and load through the same path.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use super::category::{categorize, Category};

const HEADER_SCAN_ROWS: usize = 15;
const DATE_FORMATS: [&str; 5] = ["%d/%m/%y", "%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%d-%m-%y"];

#[derive(Debug, Error)]
pub enum StatementError {
    #[error("cannot read statement {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("no transaction table found (expected a row with 'Date' and 'Narration')")]
    NoTransactionTable,
    #[error("transaction table is missing the '{0}' column")]
    MissingColumn(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Withdrawal,
    Deposit,
    Unknown,
}

impl TxKind {
    pub fn title(&self) -> &'static str {
        match self {
            TxKind::Withdrawal => "withdrawal",
            TxKind::Deposit => "deposit",
            TxKind::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "withdrawal" | "debit" | "out" => Some(TxKind::Withdrawal),
            "deposit" | "credit" | "in" => Some(TxKind::Deposit),
            "unknown" => Some(TxKind::Unknown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub value_date: String,
    pub narration: String,
    pub reference: String,
    pub withdrawal: f64,
    pub deposit: f64,
    pub closing_balance: Option<f64>,
    pub amount: f64,
    pub kind: TxKind,
    pub narration_clean: String,
    pub category: Category,
}

impl Transaction {
    /// Build a transaction and derive amount, kind, clean narration and category.
    pub fn new(
        date: NaiveDate,
        narration: impl Into<String>,
        withdrawal: f64,
        deposit: f64,
        closing_balance: Option<f64>,
    ) -> Self {
        let narration = narration.into();
        let (amount, kind) = if withdrawal > 0.0 {
            (withdrawal, TxKind::Withdrawal)
        } else if deposit > 0.0 {
            (deposit, TxKind::Deposit)
        } else {
            (0.0, TxKind::Unknown)
        };
        let narration_clean = clean_text(&narration);
        let category = categorize(&narration_clean);
        Self {
            date,
            value_date: String::new(),
            narration,
            reference: String::new(),
            withdrawal,
            deposit,
            closing_balance,
            amount,
            kind,
            narration_clean,
            category,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn with_value_date(mut self, value_date: impl Into<String>) -> Self {
        self.value_date = value_date.into();
        self
    }

    pub fn is_withdrawal(&self) -> bool {
        self.kind == TxKind::Withdrawal
    }
}

/// Account details found in the statement preamble.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementHeader {
    pub period_from: Option<String>,
    pub period_to: Option<String>,
    pub account_number: Option<String>,
    pub email: Option<String>,
    pub holder_name: Option<String>,
    pub customer_id: Option<String>,
}

impl StatementHeader {
    pub fn is_empty(&self) -> bool {
        *self == StatementHeader::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Statement {
    pub header: StatementHeader,
    pub transactions: Vec<Transaction>,
    /// Table rows dropped because their date could not be parsed.
    pub skipped_rows: usize,
}

impl Statement {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

pub fn load(path: &Path) -> Result<Statement, StatementError> {
    let file = File::open(path).map_err(|source| StatementError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let statement = parse(file)?;
    debug!(
        path = %path.display(),
        transactions = statement.transactions.len(),
        skipped = statement.skipped_rows,
        "statement loaded"
    );
    Ok(statement)
}

pub fn parse<R: Read>(reader: R) -> Result<Statement, StatementError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let header = extract_header(&rows[..rows.len().min(HEADER_SCAN_ROWS)]);
    let table = locate_table(&rows).ok_or(StatementError::NoTransactionTable)?;
    let columns = Columns::from_header(&rows[table.header_row])?;

    let mut transactions = Vec::new();
    let mut skipped_rows = 0;
    for row in &rows[table.header_row + 1..table.end] {
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        match columns.transaction(row) {
            Some(tx) => transactions.push(tx),
            None => {
                skipped_rows += 1;
                warn!(row = ?row, "skipping statement row without a valid date");
            }
        }
    }

    Ok(Statement {
        header,
        transactions,
        skipped_rows,
    })
}

/// Lowercase, replace anything but ASCII letters, digits and spaces with a
/// space, and collapse runs of whitespace.
pub fn clean_text(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == ' ' {
                ch
            } else {
                ' '
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Parse an amount cell; anything unparsable reads as zero.
pub fn parse_amount(value: &str) -> f64 {
    let cleaned: String = value
        .chars()
        .filter(|ch| *ch != ',' && !ch.is_whitespace())
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .unwrap_or(0.0)
}

struct HeaderPatterns {
    period: Regex,
    account: Regex,
    email: Regex,
    customer: Regex,
    name: Regex,
}

fn header_patterns() -> &'static HeaderPatterns {
    static PATTERNS: OnceLock<HeaderPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| HeaderPatterns {
        period: Regex::new(r"Statement From\s*:\s*(.*?)\s*To\s*:\s*(.*)").expect("period pattern"),
        account: Regex::new(r"Account No\s*:\s*(\d+)").expect("account pattern"),
        email: Regex::new(r"Email\s*:\s*(.*)").expect("email pattern"),
        customer: Regex::new(r"Cust ID\s*:\s*(\d+)").expect("customer pattern"),
        name: Regex::new(r"\b(?:MRS|MR|MS)\.?\s+(.+)").expect("name pattern"),
    })
}

fn extract_header(rows: &[Vec<String>]) -> StatementHeader {
    let patterns = header_patterns();
    let mut header = StatementHeader::default();
    for row in rows {
        let line = row
            .iter()
            .filter(|cell| !cell.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        if line.is_empty() {
            continue;
        }
        if line.contains("Statement From") {
            if let Some(caps) = patterns.period.captures(&line) {
                header.period_from = Some(caps[1].trim().to_string());
                header.period_to = Some(caps[2].trim().to_string());
            }
        } else if line.contains("Account No") {
            if let Some(caps) = patterns.account.captures(&line) {
                header.account_number = Some(caps[1].to_string());
            }
        } else if line.contains("Email") {
            if let Some(caps) = patterns.email.captures(&line) {
                header.email = Some(caps[1].trim().to_string());
            }
        } else if line.contains("Cust ID") {
            if let Some(caps) = patterns.customer.captures(&line) {
                header.customer_id = Some(caps[1].to_string());
            }
        } else if header.holder_name.is_none() {
            if let Some(caps) = patterns.name.captures(&line) {
                header.holder_name = Some(caps[1].trim().to_string());
            }
        }
    }
    header
}

struct TableBounds {
    header_row: usize,
    /// Exclusive end of the data rows.
    end: usize,
}

fn locate_table(rows: &[Vec<String>]) -> Option<TableBounds> {
    let mut header_row = None;
    let mut end = rows.len();
    for (idx, row) in rows.iter().enumerate() {
        let lowered: Vec<String> = row.iter().map(|cell| cell.to_lowercase()).collect();
        if lowered.iter().any(|c| c == "date") && lowered.iter().any(|c| c == "narration") {
            header_row = Some(idx);
        } else if lowered.join(" ").contains("statement summary") {
            end = idx;
            break;
        }
    }
    let header_row = header_row?;
    Some(TableBounds {
        header_row,
        end: end.max(header_row + 1),
    })
}

fn normalize_column(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_").replace('.', "")
}

fn position(names: &[String], pred: impl Fn(&str) -> bool) -> Option<usize> {
    names.iter().position(|name| pred(name.as_str()))
}

struct Columns {
    date: usize,
    narration: usize,
    value_date: Option<usize>,
    reference: Option<usize>,
    withdrawal: Option<usize>,
    deposit: Option<usize>,
    closing_balance: Option<usize>,
}

impl Columns {
    fn from_header(row: &[String]) -> Result<Self, StatementError> {
        let names: Vec<String> = row.iter().map(|cell| normalize_column(cell)).collect();

        let date = position(&names, |n| n == "date").ok_or(StatementError::MissingColumn("date"))?;
        let narration = position(&names, |n| n == "narration" || n == "description")
            .ok_or(StatementError::MissingColumn("narration"))?;
        Ok(Self {
            date,
            narration,
            value_date: position(&names, |n| n.starts_with("value")),
            reference: position(&names, |n| n.starts_with("chq") || n.contains("ref")),
            withdrawal: position(&names, |n| n.starts_with("withdrawal") || n == "debit"),
            deposit: position(&names, |n| n.starts_with("deposit") || n == "credit"),
            closing_balance: position(&names, |n| n.starts_with("closing")),
        })
    }

    fn transaction(&self, row: &[String]) -> Option<Transaction> {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(String::as_str);
        let date = parse_date(cell(Some(self.date))?)?;
        let narration = cell(Some(self.narration)).unwrap_or_default();
        let withdrawal = cell(self.withdrawal).map(parse_amount).unwrap_or(0.0);
        let deposit = cell(self.deposit).map(parse_amount).unwrap_or(0.0);
        let closing_balance = cell(self.closing_balance)
            .filter(|value| !value.is_empty())
            .map(parse_amount);
        Some(
            Transaction::new(date, narration, withdrawal, deposit, closing_balance)
                .with_value_date(cell(self.value_date).unwrap_or_default())
                .with_reference(cell(self.reference).unwrap_or_default()),
        )
    }
}
