//! Actions that modules can return to communicate with the app

use crate::modules::export::ExportKind;

/// Actions returned by modules to communicate state changes
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action needed
    None,

    /// Ask the router to go to a path
    Navigate(String),

    /// Go back to the previous route
    Back,

    /// Open or close the compact navigation menu
    ToggleMenu,

    /// Copy text to the system clipboard
    Copy(String),

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Open command bar with optional prefilled input
    OpenCommand(Option<String>),

    /// Open an input prompt, prefilled with the given text
    OpenPrompt(PromptKind, String),

    /// Write a report file
    Export(ExportKind),

    /// Request quit
    Quit,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}

/// What a prompt's input is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Transaction filter expression
    Filter,
    /// Index into the profile form fields
    ProfileField(usize),
}
