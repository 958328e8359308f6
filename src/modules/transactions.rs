//! Transactions page - filterable list of statement rows

use chrono::{Duration, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};

use crate::core::{Action, Context, Module, NotifyLevel, PromptKind};
use crate::domain::statement::parse_date;
use crate::domain::{Category, Transaction, TxKind, YearMonth};
use crate::modules::export::ExportKind;

const PAGE_STEP: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum FilterToken {
    Kind(TxKind),
    Category(Category),
    Min(f64),
    Max(f64),
    From(NaiveDate),
    To(NaiveDate),
    Free(String),
}

impl FilterToken {
    fn matches(&self, tx: &Transaction) -> bool {
        match self {
            FilterToken::Kind(kind) => tx.kind == *kind,
            FilterToken::Category(category) => tx.category == *category,
            FilterToken::Min(min) => tx.amount >= *min,
            FilterToken::Max(max) => tx.amount <= *max,
            FilterToken::From(from) => tx.date >= *from,
            FilterToken::To(to) => tx.date <= *to,
            FilterToken::Free(text) => {
                tx.narration_clean.contains(text.as_str())
                    || tx.narration.to_lowercase().contains(text.as_str())
                    || tx.reference.to_lowercase().contains(text.as_str())
            }
        }
    }
}

/// Parsed `key:value` / free-text filter expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub raw: String,
    pub tokens: Vec<FilterToken>,
    /// Recognized keys whose value could not be read.
    pub rejected: Vec<String>,
}

impl FilterState {
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let mut tokens = Vec::new();
        let mut rejected = Vec::new();
        for part in trimmed.split_whitespace() {
            let Some((key, value)) = part.split_once(':') else {
                tokens.push(FilterToken::Free(part.to_lowercase()));
                continue;
            };
            match parse_filter_token(key, value) {
                Some(Some(token)) => tokens.push(token),
                Some(None) => rejected.push(part.to_string()),
                None => tokens.push(FilterToken::Free(part.to_lowercase())),
            }
        }
        Some(Self {
            raw: trimmed.to_string(),
            tokens,
            rejected,
        })
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        self.tokens.iter().all(|token| token.matches(tx))
    }
}

/// `None` for an unknown key, `Some(None)` for a known key with a bad value.
fn parse_filter_token(key: &str, value: &str) -> Option<Option<FilterToken>> {
    let token = match key.to_lowercase().as_str() {
        "type" | "kind" => TxKind::parse(value).map(FilterToken::Kind),
        "cat" | "category" => Category::parse(value).map(FilterToken::Category),
        "min" => parse_number(value).map(FilterToken::Min),
        "max" => parse_number(value).map(FilterToken::Max),
        "from" | "since" => parse_bound(value, false).map(FilterToken::From),
        "to" | "until" => parse_bound(value, true).map(FilterToken::To),
        _ => return None,
    };
    Some(token)
}

fn parse_number(value: &str) -> Option<f64> {
    value.replace(',', "").parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A full date, or `YYYY-MM` meaning the first (or last) day of that month.
fn parse_bound(value: &str, end_of_month: bool) -> Option<NaiveDate> {
    if let Some(date) = parse_date(value) {
        return Some(date);
    }
    let month = YearMonth::parse(value)?;
    if end_of_month {
        month.next().first_day().map(|d| d - Duration::days(1))
    } else {
        month.first_day()
    }
}

pub struct TransactionsPage {
    transactions: Vec<Transaction>,
    filter: Option<FilterState>,
    kind: Option<TxKind>,
    category: Option<Category>,
    visible: Vec<usize>,
    selected: usize,
}

impl TransactionsPage {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        let mut page = Self {
            transactions,
            filter: None,
            kind: None,
            category: None,
            visible: Vec::new(),
            selected: 0,
        };
        page.refilter();
        page
    }

    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
        self.refilter();
    }

    pub fn total(&self) -> usize {
        self.transactions.len()
    }

    pub fn visible(&self) -> Vec<&Transaction> {
        self.visible.iter().map(|&i| &self.transactions[i]).collect()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.visible.get(self.selected).map(|&i| &self.transactions[i])
    }

    pub fn filter(&self) -> Option<&FilterState> {
        self.filter.as_ref()
    }

    pub fn kind_filter(&self) -> Option<TxKind> {
        self.kind
    }

    pub fn category_filter(&self) -> Option<Category> {
        self.category
    }

    /// Human summary of every active filter.
    pub fn filter_label(&self) -> String {
        let mut parts = Vec::new();
        if let Some(kind) = self.kind {
            parts.push(format!("type={}", kind.title()));
        }
        if let Some(category) = self.category {
            parts.push(format!("cat={}", category.title()));
        }
        if let Some(filter) = &self.filter {
            parts.push(format!("\"{}\"", filter.raw));
        }
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(" ")
        }
    }

    /// Apply a filter expression; empty input clears it.
    pub fn apply_filter(&mut self, input: &str) -> Action {
        self.filter = FilterState::parse(input);
        self.refilter();
        match &self.filter {
            None => Action::Notify("Filter cleared".to_string(), NotifyLevel::Info),
            Some(filter) if !filter.rejected.is_empty() => Action::Notify(
                format!("Ignored invalid filter terms: {}", filter.rejected.join(" ")),
                NotifyLevel::Warn,
            ),
            Some(filter) => Action::Notify(
                format!("Filter applied: {} ({} rows)", filter.raw, self.visible.len()),
                NotifyLevel::Info,
            ),
        }
    }

    pub fn clear_filters(&mut self) {
        self.filter = None;
        self.kind = None;
        self.category = None;
        self.refilter();
    }

    pub fn cycle_kind(&mut self) {
        self.kind = match self.kind {
            None => Some(TxKind::Withdrawal),
            Some(TxKind::Withdrawal) => Some(TxKind::Deposit),
            Some(_) => None,
        };
        self.refilter();
    }

    pub fn cycle_category(&mut self) {
        self.category = match self.category {
            None => Category::ALL.first().copied(),
            Some(current) => Category::ALL
                .iter()
                .position(|c| *c == current)
                .and_then(|i| Category::ALL.get(i + 1).copied()),
        };
        self.refilter();
    }

    pub fn select_next(&mut self, step: usize) {
        if self.visible.is_empty() {
            return;
        }
        self.selected = (self.selected + step).min(self.visible.len() - 1);
    }

    pub fn select_prev(&mut self, step: usize) {
        self.selected = self.selected.saturating_sub(step);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible.len().saturating_sub(1);
    }

    fn refilter(&mut self) {
        self.visible = self
            .transactions
            .iter()
            .enumerate()
            .filter(|(_, tx)| self.kind.map_or(true, |kind| tx.kind == kind))
            .filter(|(_, tx)| self.category.map_or(true, |cat| tx.category == cat))
            .filter(|(_, tx)| self.filter.as_ref().map_or(true, |f| f.matches(tx)))
            .map(|(i, _)| i)
            .collect();
        self.selected = self.selected.min(self.visible.len().saturating_sub(1));
    }
}

impl Default for TransactionsPage {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Module for TransactionsPage {
    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> Action {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.select_next(1);
                Action::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select_prev(1);
                Action::None
            }
            KeyCode::PageDown => {
                self.select_next(PAGE_STEP);
                Action::None
            }
            KeyCode::PageUp => {
                self.select_prev(PAGE_STEP);
                Action::None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.select_first();
                Action::None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.select_last();
                Action::None
            }
            KeyCode::Char('/') => Action::OpenPrompt(
                PromptKind::Filter,
                self.filter.as_ref().map(|f| f.raw.clone()).unwrap_or_default(),
            ),
            KeyCode::Char('t') => {
                self.cycle_kind();
                Action::Notify(format!("Filters: {}", self.filter_label()), NotifyLevel::Info)
            }
            KeyCode::Char('c') => {
                self.cycle_category();
                Action::Notify(format!("Filters: {}", self.filter_label()), NotifyLevel::Info)
            }
            KeyCode::Char('x') => {
                self.clear_filters();
                Action::Notify("Filters cleared".to_string(), NotifyLevel::Info)
            }
            KeyCode::Char('y') => match self.selected_transaction() {
                Some(tx) => Action::Copy(tx.narration.clone()),
                None => Action::Notify("Nothing selected".to_string(), NotifyLevel::Warn),
            },
            KeyCode::Char('e') => Action::Export(ExportKind::Transactions),
            _ => Action::None,
        }
    }
}
