//! Portfolio page - currency holdings as a grid of cards

use crossterm::event::{KeyCode, KeyEvent};

use crate::core::{Action, Context, Module};
use crate::domain::currency::format_grouped;
use crate::domain::portfolio::{CurrencyHolding, HOLDINGS};

pub const WIDE_COLUMNS: usize = 4;
pub const COMPACT_COLUMNS: usize = 2;

#[derive(Default)]
pub struct PortfolioPage {
    selected: usize,
}

impl PortfolioPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holdings(&self) -> &'static [CurrencyHolding] {
        &HOLDINGS
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_holding(&self) -> &'static CurrencyHolding {
        &HOLDINGS[self.selected.min(HOLDINGS.len() - 1)]
    }

    fn step(&mut self, delta: isize) {
        let target = self.selected as isize + delta;
        if (0..HOLDINGS.len() as isize).contains(&target) {
            self.selected = target as usize;
        }
    }
}

pub fn columns(compact: bool) -> usize {
    if compact {
        COMPACT_COLUMNS
    } else {
        WIDE_COLUMNS
    }
}

impl Module for PortfolioPage {
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> Action {
        let row = columns(ctx.compact) as isize;
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.step(-1),
            KeyCode::Char('l') | KeyCode::Right => self.step(1),
            KeyCode::Char('k') | KeyCode::Up => self.step(-row),
            KeyCode::Char('j') | KeyCode::Down => self.step(row),
            KeyCode::Char('y') => {
                let holding = self.selected_holding();
                return Action::Copy(format!(
                    "{} {} (₹{})",
                    holding.code,
                    format_grouped(holding.balance),
                    format_grouped(holding.value_inr())
                ));
            }
            _ => {}
        }
        Action::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(page: &mut PortfolioPage, ctx: &mut Context, c: char) -> Action {
        page.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE), ctx)
    }

    #[test]
    fn grid_navigation_respects_columns() {
        let mut page = PortfolioPage::new();
        let mut ctx = Context::new();
        press(&mut page, &mut ctx, 'j');
        assert_eq!(page.selected(), 4);
        press(&mut page, &mut ctx, 'j');
        assert_eq!(page.selected(), 4);

        ctx.compact = true;
        press(&mut page, &mut ctx, 'k');
        assert_eq!(page.selected(), 2);
        press(&mut page, &mut ctx, 'h');
        press(&mut page, &mut ctx, 'h');
        press(&mut page, &mut ctx, 'h');
        assert_eq!(page.selected(), 0);
    }

    #[test]
    fn copy_describes_selected_holding() {
        let mut page = PortfolioPage::new();
        let mut ctx = Context::new();
        press(&mut page, &mut ctx, 'l');
        assert_eq!(page.selected_holding().code, "USD");
        match press(&mut page, &mut ctx, 'y') {
            Action::Copy(text) => assert!(text.starts_with("USD 2,450.00")),
            other => panic!("unexpected action {other:?}"),
        }
    }
}
