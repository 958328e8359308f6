//! Insights page - spending breakdown, balance forecast and investment plan

use crossterm::event::{KeyCode, KeyEvent};

use crate::core::{Action, Context, Module};
use crate::modules::export::ExportKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsightsPanel {
    #[default]
    Spending,
    Forecast,
    Plan,
}

impl InsightsPanel {
    pub const ALL: [InsightsPanel; 3] = [
        InsightsPanel::Spending,
        InsightsPanel::Forecast,
        InsightsPanel::Plan,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            InsightsPanel::Spending => "Spending",
            InsightsPanel::Forecast => "Forecast",
            InsightsPanel::Plan => "Plan",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Default)]
pub struct InsightsPage {
    panel: InsightsPanel,
    /// First visible row of the forecast table.
    scroll: usize,
}

impl InsightsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self) -> InsightsPanel {
        self.panel
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    fn switch(&mut self, panel: InsightsPanel) {
        self.panel = panel;
        self.scroll = 0;
    }
}

impl Module for InsightsPage {
    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> Action {
        match key.code {
            KeyCode::Char('l') | KeyCode::Right => self.switch(self.panel.next()),
            KeyCode::Char('h') | KeyCode::Left => self.switch(self.panel.prev()),
            KeyCode::Char('s') => self.switch(InsightsPanel::Spending),
            KeyCode::Char('f') => self.switch(InsightsPanel::Forecast),
            KeyCode::Char('p') => self.switch(InsightsPanel::Plan),
            KeyCode::Char('j') | KeyCode::Down => self.scroll += 1,
            KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Char('a') => return Action::OpenCommand(Some("age ".to_string())),
            KeyCode::Char('e') => return Action::Export(ExportKind::Forecast),
            KeyCode::Char('E') => return Action::Export(ExportKind::Summary),
            _ => {}
        }
        Action::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(page: &mut InsightsPage, code: KeyCode) -> Action {
        let mut ctx = Context::new();
        page.handle_key(KeyEvent::new(code, KeyModifiers::NONE), &mut ctx)
    }

    #[test]
    fn panels_wrap_both_ways() {
        let mut page = InsightsPage::new();
        press(&mut page, KeyCode::Left);
        assert_eq!(page.panel(), InsightsPanel::Plan);
        press(&mut page, KeyCode::Char('l'));
        assert_eq!(page.panel(), InsightsPanel::Spending);
        press(&mut page, KeyCode::Char('f'));
        assert_eq!(page.panel(), InsightsPanel::Forecast);
    }

    #[test]
    fn switching_panel_resets_scroll() {
        let mut page = InsightsPage::new();
        press(&mut page, KeyCode::Char('f'));
        press(&mut page, KeyCode::Char('j'));
        press(&mut page, KeyCode::Char('j'));
        assert_eq!(page.scroll(), 2);
        press(&mut page, KeyCode::Char('p'));
        assert_eq!(page.scroll(), 0);
    }

    #[test]
    fn export_keys() {
        let mut page = InsightsPage::new();
        assert_eq!(
            press(&mut page, KeyCode::Char('e')),
            Action::Export(ExportKind::Forecast)
        );
        assert_eq!(
            press(&mut page, KeyCode::Char('E')),
            Action::Export(ExportKind::Summary)
        );
    }
}
