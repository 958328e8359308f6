//! Key and command flows across pages.

use std::io::Write;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use finboard::app::{App, InputMode, StatusLevel};
use finboard::core::PromptKind;
use finboard::domain::portfolio::TimeRange;
use finboard::domain::TxKind;
use finboard::modules::{InsightsPanel, ProfileField};

fn key(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        key(app, KeyCode::Char(ch));
    }
}

fn run_command(app: &mut App, text: &str) {
    key(app, KeyCode::Char(':'));
    type_text(app, text);
    key(app, KeyCode::Enter);
}

fn status(app: &App) -> Option<String> {
    app.status_text().map(|(text, _)| text.to_string())
}

#[test]
fn q_and_ctrl_c_quit() {
    let mut app = App::default();
    key(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);

    let mut app = App::default();
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit);
}

#[test]
fn help_popup_swallows_keys_until_closed() {
    let mut app = App::default();
    key(&mut app, KeyCode::Char('?'));
    assert!(app.help_open);
    key(&mut app, KeyCode::Char('2'));
    assert_eq!(app.current_route(), "/");
    key(&mut app, KeyCode::Esc);
    assert!(!app.help_open);
}

#[test]
fn command_bar_escape_discards_input() {
    let mut app = App::default();
    key(&mut app, KeyCode::Char(':'));
    assert_eq!(app.input_mode, InputMode::Command);
    type_text(&mut app, "insights");
    key(&mut app, KeyCode::Esc);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.current_route(), "/");
    assert!(app.command.input.is_empty());
}

#[test]
fn up_recalls_last_command() {
    let mut app = App::default();
    run_command(&mut app, "portfolio");
    key(&mut app, KeyCode::Char(':'));
    key(&mut app, KeyCode::Up);
    assert_eq!(app.command.input, "portfolio");
}

#[test]
fn unknown_command_warns() {
    let mut app = App::default();
    run_command(&mut app, "frobnicate");
    let (text, level) = app.status_text().expect("status");
    assert_eq!(text, "Unknown command: frobnicate");
    assert_eq!(level, StatusLevel::Warn);
}

#[test]
fn range_command_updates_dashboard() {
    let mut app = App::default();
    run_command(&mut app, "range 1y");
    assert_eq!(app.dashboard.range(), TimeRange::Year);

    run_command(&mut app, "range forever");
    assert_eq!(app.dashboard.range(), TimeRange::Year);
    assert_eq!(status(&app).as_deref(), Some("Unknown time range: forever"));
}

#[test]
fn filter_prompt_narrows_transactions() {
    let mut app = App::default();
    app.navigate("/transactions");
    let total = app.transactions.total();

    key(&mut app, KeyCode::Char('/'));
    assert_eq!(app.input_mode, InputMode::Prompt(PromptKind::Filter));
    type_text(&mut app, "type:deposit");
    key(&mut app, KeyCode::Enter);

    let visible = app.transactions.visible();
    assert!(!visible.is_empty());
    assert!(visible.len() < total);
    assert!(visible.iter().all(|tx| tx.kind == TxKind::Deposit));

    run_command(&mut app, "clear");
    assert_eq!(app.transactions.visible().len(), total);
}

#[test]
fn profile_prompt_edits_selected_field() {
    let mut app = App::default();
    app.navigate("/user");
    key(&mut app, KeyCode::Enter);
    assert_eq!(
        app.input_mode,
        InputMode::Prompt(PromptKind::ProfileField(ProfileField::Name.index()))
    );
    type_text(&mut app, "Asha Rao");
    key(&mut app, KeyCode::Enter);

    assert_eq!(app.profile.form().value(ProfileField::Name), "Asha Rao");
    assert_eq!(status(&app).as_deref(), Some("Name updated"));
}

#[test]
fn invalid_email_is_reported_and_blocks_submit() {
    let mut app = App::default();
    app.navigate("/user");
    key(&mut app, KeyCode::Char('j'));
    key(&mut app, KeyCode::Enter);
    type_text(&mut app, "not-an-email");
    key(&mut app, KeyCode::Enter);
    assert_eq!(app.status_text().map(|(_, level)| level), Some(StatusLevel::Warn));

    key(&mut app, KeyCode::Char('s'));
    assert!(!app.profile.is_submitted());
}

#[test]
fn submitted_age_drives_the_plan() {
    let mut app = App::default();
    app.navigate("/user");
    for _ in 0..3 {
        key(&mut app, KeyCode::Char('j'));
    }
    key(&mut app, KeyCode::Enter);
    type_text(&mut app, "58");
    key(&mut app, KeyCode::Enter);
    key(&mut app, KeyCode::Char('s'));

    assert!(app.profile.is_submitted());
    assert_eq!(app.ctx.age, Some(58));
    assert_eq!(app.insights.plan(app.ctx.age).age, 58);
}

#[test]
fn age_command_updates_form_and_context() {
    let mut app = App::default();
    run_command(&mut app, "age 41");
    assert_eq!(app.ctx.age, Some(41));
    assert_eq!(app.profile.form().value(ProfileField::Age), "41");

    run_command(&mut app, "age");
    assert_eq!(status(&app).as_deref(), Some("Usage: age <years>"));
    assert_eq!(app.ctx.age, Some(41));
}

#[test]
fn insights_panels_switch_with_keys() {
    let mut app = App::default();
    app.navigate("/insights");
    assert_eq!(app.insights_page.panel(), InsightsPanel::Spending);
    key(&mut app, KeyCode::Char('l'));
    assert_eq!(app.insights_page.panel(), InsightsPanel::Forecast);
    key(&mut app, KeyCode::Char('p'));
    assert_eq!(app.insights_page.panel(), InsightsPanel::Plan);

    key(&mut app, KeyCode::Char('a'));
    assert_eq!(app.input_mode, InputMode::Command);
    assert_eq!(app.command.input, "age ");
}

#[test]
fn copy_keeps_text_in_context_even_without_clipboard() {
    let mut app = App::default();
    app.navigate("/transactions");
    let narration = app
        .transactions
        .selected_transaction()
        .map(|tx| tx.narration.clone())
        .expect("sample has transactions");
    key(&mut app, KeyCode::Char('y'));
    assert_eq!(app.ctx.get_clipboard(), Some(narration.as_str()));
}

#[test]
fn load_command_replaces_statement() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "\
MR VIKRAM SHAH,,,,,,
Account No : 1234567890,,,,,,
Date,Narration,Chq./Ref.No.,Value Dt,Withdrawal Amt.,Deposit Amt.,Closing Balance
01/01/24,SALARY,1,01/01/24,,50000,60000
10/01/24,ZOMATO ORDER,2,10/01/24,800,,59200
05/02/24,SALARY,3,05/02/24,,50000,109200
bad,row,,,,,
"
    )
    .unwrap();

    let mut app = App::default();
    run_command(&mut app, &format!("load {}", file.path().display()));

    assert_eq!(app.statement.transactions.len(), 3);
    assert_eq!(app.statement.header.holder_name.as_deref(), Some("VIKRAM SHAH"));
    assert_eq!(app.transactions.total(), 3);
    assert_eq!(app.ctx.summary.transaction_count, 3);
    assert_eq!(
        status(&app).as_deref(),
        Some("Loaded 3 transactions, skipped 1 undated rows")
    );
}

#[test]
fn load_failure_keeps_previous_statement() {
    let mut app = App::default();
    let before = app.statement.transactions.len();
    run_command(&mut app, "load /definitely/not/here.csv");
    assert_eq!(app.statement.transactions.len(), before);
    assert_eq!(app.status_text().map(|(_, level)| level), Some(StatusLevel::Error));
}
