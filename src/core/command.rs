//! Command parser for the : command system

use crate::modules::export::ExportKind;
use crate::nav::routes;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation commands
    Go(String),
    Back,
    Menu,

    // Page commands
    Range(String),
    Age(Option<u32>),
    Filter(String),
    ClearFilter,

    // Data commands
    Load(String),
    Export(ExportKind),

    Help,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.to_lowercase().as_str() {
        // Navigation
        "go" | "open" => match args {
            Some(target) => Command::Go(target),
            None => Command::Unknown(input.to_string()),
        },
        "dashboard" | "home" => Command::Go(routes::DASHBOARD.to_string()),
        "transactions" | "txs" | "tx" => Command::Go(routes::TRANSACTIONS.to_string()),
        "portfolio" => Command::Go(routes::PORTFOLIO.to_string()),
        "insights" | "forecast" | "plan" => Command::Go(routes::INSIGHTS.to_string()),
        "user" | "profile" => Command::Go(routes::USER.to_string()),
        "back" => Command::Back,
        "menu" => Command::Menu,

        // Pages
        "range" => match args {
            Some(label) => Command::Range(label),
            None => Command::Unknown(input.to_string()),
        },
        "age" => Command::Age(args.and_then(|s| s.parse().ok())),
        "filter" | "f" => match args {
            Some(expr) => Command::Filter(expr),
            None => Command::ClearFilter,
        },
        "clear" | "reset" => Command::ClearFilter,

        // Data
        "load" => match args {
            Some(path) => Command::Load(path),
            None => Command::Unknown(input.to_string()),
        },
        "export" | "save" => match args.as_deref().map(ExportKind::parse) {
            Some(Some(kind)) => Command::Export(kind),
            _ => Command::Unknown(input.to_string()),
        },

        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,

        _ => Command::Unknown(input.to_string()),
    }
}
