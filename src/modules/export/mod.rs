//! Export Module
//!
//! Writes what the views show to files:
//! - Transactions (current filter applied) → CSV
//! - Balance forecast → CSV
//! - Statement summary and investment plan → JSON
//!
//! Files land in the configured export directory with a timestamped name.

mod csv_export;
mod json_export;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{info, warn};

use crate::core::{Action, NotifyLevel};
use crate::domain::{Insights, StatementHeader, Transaction};

pub use csv_export::{write_forecast, write_transactions};
pub use json_export::{write_summary, SummaryExport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Transactions,
    Forecast,
    Summary,
}

impl ExportKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "transactions" | "txs" | "tx" => Some(ExportKind::Transactions),
            "forecast" => Some(ExportKind::Forecast),
            "summary" | "report" => Some(ExportKind::Summary),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ExportKind::Transactions => "transactions",
            ExportKind::Forecast => "forecast",
            ExportKind::Summary => "summary",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            ExportKind::Transactions | ExportKind::Forecast => "csv",
            ExportKind::Summary => "json",
        }
    }
}

/// Data available to the exporters.
pub struct ExportSource<'a> {
    /// Transactions as currently filtered in the transactions view.
    pub transactions: Vec<&'a Transaction>,
    pub header: &'a StatementHeader,
    pub insights: &'a Insights,
    pub age: Option<u32>,
}

/// Resolve the export directory, creating it if needed
fn get_export_dir(configured: Option<&Path>) -> std::io::Result<PathBuf> {
    let export_dir = match configured {
        Some(dir) => dir.to_path_buf(),
        None => crate::config::data_dir()
            .map(|dir| dir.join("exports"))
            .unwrap_or_else(|| PathBuf::from(".finboard").join("exports")),
    };
    fs::create_dir_all(&export_dir)?;
    Ok(export_dir)
}

/// Generate a timestamped filename
fn generate_filename(prefix: &str, extension: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d-%H%M%S");
    format!("{}-{}.{}", prefix, timestamp, extension)
}

/// Write `kind` into `dir` and describe the outcome as a status notification.
pub fn export(kind: ExportKind, dir: Option<&Path>, source: &ExportSource<'_>) -> Action {
    let empty = match kind {
        ExportKind::Transactions => source.transactions.is_empty(),
        ExportKind::Forecast => source.insights.forecast_points().is_empty(),
        ExportKind::Summary => false,
    };
    if empty {
        return Action::Notify(
            format!("No {} to export", kind.title()),
            NotifyLevel::Warn,
        );
    }

    let export_dir = match get_export_dir(dir) {
        Ok(dir) => dir,
        Err(e) => {
            warn!(error = %e, "export directory unavailable");
            return Action::Notify(
                format!("Failed to create export directory: {}", e),
                NotifyLevel::Error,
            );
        }
    };

    let filename = generate_filename(kind.title(), kind.extension());
    let path = export_dir.join(&filename);

    let written = match kind {
        ExportKind::Transactions => write_transactions(&path, &source.transactions),
        ExportKind::Forecast => write_forecast(&path, source.insights.forecast_points()),
        ExportKind::Summary => write_summary(
            &path,
            &SummaryExport::build(source.header, source.insights, source.age),
        ),
    };

    match written {
        Ok(count) => {
            info!(kind = kind.title(), records = count, path = %path.display(), "export written");
            Action::Notify(
                format!("Exported {} {} to {}", count, kind.title(), path.display()),
                NotifyLevel::Info,
            )
        }
        Err(e) => {
            warn!(kind = kind.title(), error = %e, "export failed");
            Action::Notify(format!("Export failed: {}", e), NotifyLevel::Error)
        }
    }
}
