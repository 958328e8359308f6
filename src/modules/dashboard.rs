//! Dashboard page - portfolio metrics keyed by a time-range dropdown

use crossterm::event::{KeyCode, KeyEvent};

use crate::core::{Action, Context, Module, NotifyLevel};
use crate::domain::portfolio::{metrics_for, PortfolioMetrics, TimeRange};

pub struct DashboardPage {
    range: TimeRange,
    dropdown_open: bool,
    cursor: usize,
}

impl DashboardPage {
    pub fn new(range: TimeRange) -> Self {
        Self {
            range,
            dropdown_open: false,
            cursor: range.index(),
        }
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn range_label(&self) -> &'static str {
        self.range.label()
    }

    pub fn metrics(&self) -> PortfolioMetrics {
        metrics_for(self.range)
    }

    pub fn dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_range(&mut self, range: TimeRange) {
        self.range = range;
        self.cursor = range.index();
        self.dropdown_open = false;
    }

    /// Select a range by label; unknown labels leave the selection alone.
    pub fn select_label(&mut self, label: &str) -> Action {
        match TimeRange::from_label(label) {
            Some(range) => {
                self.set_range(range);
                Action::Notify(format!("Time range: {}", range.label()), NotifyLevel::Info)
            }
            None => Action::Notify(format!("Unknown time range: {label}"), NotifyLevel::Warn),
        }
    }

    fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
        self.cursor = self.range.index();
    }
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new(TimeRange::default())
    }
}

impl Module for DashboardPage {
    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> Action {
        if self.dropdown_open {
            let last = TimeRange::ALL.len() - 1;
            return match key.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    self.cursor = (self.cursor + 1).min(last);
                    Action::None
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.cursor = self.cursor.saturating_sub(1);
                    Action::None
                }
                KeyCode::Enter => {
                    let range = TimeRange::ALL[self.cursor.min(last)];
                    self.set_range(range);
                    Action::Notify(format!("Time range: {}", range.label()), NotifyLevel::Info)
                }
                KeyCode::Esc | KeyCode::Char('r') => {
                    self.dropdown_open = false;
                    Action::None
                }
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char('r') => {
                self.toggle_dropdown();
                Action::None
            }
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(page: &mut DashboardPage, code: KeyCode) -> Action {
        let mut ctx = Context::new();
        page.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &mut ctx)
    }

    #[test]
    fn dropdown_selects_range() {
        let mut page = DashboardPage::default();
        assert_eq!(page.range_label(), "Last 30 days");

        press(&mut page, KeyCode::Char('r'));
        assert!(page.dropdown_open());
        press(&mut page, KeyCode::Char('j'));
        let action = press(&mut page, KeyCode::Enter);

        assert_eq!(page.range(), TimeRange::Quarter);
        assert!(!page.dropdown_open());
        assert_eq!(
            action,
            Action::Notify("Time range: Last 90 days".to_string(), NotifyLevel::Info)
        );
    }

    #[test]
    fn escape_keeps_previous_range() {
        let mut page = DashboardPage::new(TimeRange::Week);
        press(&mut page, KeyCode::Char('r'));
        press(&mut page, KeyCode::Char('j'));
        press(&mut page, KeyCode::Esc);
        assert_eq!(page.range(), TimeRange::Week);
        assert!(!page.dropdown_open());
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut page = DashboardPage::default();
        press(&mut page, KeyCode::Char('r'));
        for _ in 0..10 {
            press(&mut page, KeyCode::Down);
        }
        assert_eq!(page.cursor(), TimeRange::ALL.len() - 1);
    }

    #[test]
    fn select_label_accepts_short_forms() {
        let mut page = DashboardPage::default();
        page.select_label("12m");
        assert_eq!(page.range(), TimeRange::Year);
        page.select_label("fortnight");
        assert_eq!(page.range(), TimeRange::Year);
        assert_eq!(page.metrics(), metrics_for(TimeRange::Year));
    }
}
