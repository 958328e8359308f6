//! Exports written through the app into a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use finboard::app::{App, AppSettings};
use finboard::core::{Action, NotifyLevel};
use finboard::domain::sample::sample_statement;
use finboard::domain::{Insights, Statement};
use finboard::modules::export::{self, write_forecast, ExportKind, ExportSource};

fn app_exporting_to(dir: &Path) -> App {
    App::new(AppSettings {
        export_dir: Some(dir.to_path_buf()),
        ..AppSettings::default()
    })
}

fn files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort();
    files
}

fn expect_info(action: Action) -> String {
    match action {
        Action::Notify(text, NotifyLevel::Info) => text,
        other => panic!("expected info notification, got {other:?}"),
    }
}

#[test]
fn transactions_export_follows_active_filter() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_exporting_to(dir.path());
    app.transactions.apply_filter("type:withdrawal");
    let expected = app.transactions.visible().len();

    let text = expect_info(app.export(ExportKind::Transactions));
    assert!(text.starts_with(&format!("Exported {expected} transactions to ")));

    let files = files_in(dir.path());
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("transactions-") && name.ends_with(".csv"));

    let content = fs::read_to_string(&files[0]).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("date,value_dt,narration,chq_ref_number,withdrawal_amt,deposit_amt,closing_balance,amount,transaction_type,narration_clean,category")
    );
    assert_eq!(lines.count(), expected);
}

#[test]
fn forecast_export_writes_one_row_per_month() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_exporting_to(dir.path());
    let months = app.insights.forecast_points().len();
    assert!(months > 0);

    expect_info(app.export(ExportKind::Forecast));

    let files = files_in(dir.path());
    let content = fs::read_to_string(&files[0]).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("Date,Predicted_Closing_Balance,Lower_Confidence_Interval,Upper_Confidence_Interval")
    );
    assert_eq!(lines.count(), months);
}

#[test]
fn summary_export_is_valid_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app_exporting_to(dir.path());
    app.ctx.age = Some(62);

    expect_info(app.export(ExportKind::Summary));

    let files = files_in(dir.path());
    assert!(files[0].extension().is_some_and(|ext| ext == "json"));
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&files[0]).unwrap()).unwrap();
    assert_eq!(value["holder_name"], "ASHA RAO");
    assert_eq!(value["plan"]["age"], 62);
    assert_eq!(
        value["transaction_count"].as_u64(),
        Some(app.statement.transactions.len() as u64)
    );
    assert!(value["spending_by_category"].is_object());
}

#[test]
fn empty_forecast_is_not_exported() {
    let dir = tempfile::tempdir().unwrap();
    let statement = Statement::default();
    let insights = Insights::compute(&statement, 12);
    let source = ExportSource {
        transactions: Vec::new(),
        header: &statement.header,
        insights: &insights,
        age: None,
    };

    let action = export::export(ExportKind::Forecast, Some(dir.path()), &source);
    assert_eq!(
        action,
        Action::Notify("No forecast to export".to_string(), NotifyLevel::Warn)
    );
    assert!(files_in(dir.path()).is_empty());
}

#[test]
fn forecast_values_are_never_negative() {
    let dir = tempfile::tempdir().unwrap();
    let insights = Insights::compute(&sample_statement(), 3);
    let path = dir.path().join("forecast.csv");

    let written = write_forecast(&path, insights.forecast_points()).unwrap();
    assert_eq!(written, 3);

    let content = fs::read_to_string(&path).unwrap();
    for line in content.lines().skip(1) {
        for value in line.split(',').skip(1) {
            let amount: f64 = value.parse().unwrap();
            assert!(amount >= 0.0, "negative balance exported: {value}");
            assert_eq!(value.split('.').nth(1).map(str::len), Some(2));
        }
    }
}

#[test]
fn export_command_uses_configured_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested").join("exports");
    let mut app = app_exporting_to(&nested);

    let action = app.execute_command(&finboard::core::parse_command("export summary"));
    app.apply_action(action);

    assert_eq!(files_in(&nested).len(), 1);
}
