//! Shared context passed to modules

use crate::domain::analytics::SpendingSummary;

/// Read-mostly state every page can see
#[derive(Debug, Default)]
pub struct Context {
    /// Route the router reported for this event
    pub current_route: String,

    /// Last text copied, also pushed to the system clipboard
    pub clipboard: Option<String>,

    /// Age from the profile form, drives the investment plan
    pub age: Option<u32>,

    /// Summary of the loaded statement
    pub summary: SpendingSummary,

    /// Terminal is narrower than the compact threshold
    pub compact: bool,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set clipboard content
    pub fn set_clipboard(&mut self, content: String) {
        self.clipboard = Some(content);
    }

    /// Get clipboard content
    pub fn get_clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }
}
