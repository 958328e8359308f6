//! Full-frame renders against the ratatui test backend.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

use finboard::app::{App, InputMode};
use finboard::ui;

fn render(app: &mut App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    terminal.backend().buffer().clone()
}

fn key(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer.get(x, y).symbol())
        .collect()
}

fn screen_text(buffer: &Buffer) -> String {
    (0..buffer.area.height)
        .map(|y| row_text(buffer, y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn wide_header_lists_every_link() {
    let mut app = App::default();
    let buffer = render(&mut app, 120, 32);
    let header = row_text(&buffer, 1);
    for label in ["1 Dashboard", "2 Transactions", "3 My portfolio", "4 Insights", "5 User"] {
        assert!(header.contains(label), "missing {label} in {header:?}");
    }
    assert!(!header.contains("Menu"));
    assert!(!app.is_compact());
}

#[test]
fn narrow_header_shows_hamburger_and_active_label() {
    let mut app = App::default();
    app.navigate("/transactions");
    let buffer = render(&mut app, 70, 32);
    let header = row_text(&buffer, 1);
    assert!(header.contains("≡ Menu"));
    assert!(header.contains("Transactions"));
    assert!(!header.contains("3 My portfolio"));
    assert!(app.is_compact());
}

#[test]
fn open_menu_renders_all_entries() {
    let mut app = App::default();
    app.set_terminal_width(70);
    app.toggle_menu();
    let buffer = render(&mut app, 70, 32);
    let text = screen_text(&buffer);
    for label in ["Dashboard", "Transactions", "My portfolio", "Insights", "User"] {
        assert!(text.contains(label), "menu missing {label}");
    }
}

#[test]
fn unknown_route_renders_not_found() {
    let mut app = App::default();
    app.navigate("/nowhere");
    let text = screen_text(&render(&mut app, 120, 32));
    assert!(text.contains("Page not found"));
    assert!(text.contains("/nowhere"));
}

#[test]
fn every_page_renders_at_common_sizes() {
    let mut app = App::default();
    for route in ["/", "/transactions", "/portfolio", "/insights", "/user"] {
        app.navigate(route);
        render(&mut app, 80, 24);
        render(&mut app, 120, 40);
    }
}

#[test]
fn help_popup_overlays_page() {
    let mut app = App::default();
    app.help_open = true;
    let text = screen_text(&render(&mut app, 120, 40));
    assert!(text.contains("Toggle menu (j/k + Enter inside)"));
}

#[test]
fn wide_layout_never_opens_hidden_menu() {
    let mut app = App::default();
    render(&mut app, 120, 32);

    key(&mut app, KeyCode::Char('m'));
    assert!(!app.nav.menu().is_open());
    let header = row_text(&render(&mut app, 120, 32), 1);
    assert!(!header.contains("Menu"));

    key(&mut app, KeyCode::Tab);
    assert_eq!(app.current_route(), "/transactions");
    key(&mut app, KeyCode::Char('?'));
    assert!(app.help_open);
}

#[test]
fn menu_command_is_ignored_when_wide() {
    let mut app = App::default();
    render(&mut app, 120, 32);
    key(&mut app, KeyCode::Char(':'));
    for ch in "menu".chars() {
        key(&mut app, KeyCode::Char(ch));
    }
    key(&mut app, KeyCode::Enter);
    assert!(!app.nav.menu().is_open());

    key(&mut app, KeyCode::Char(':'));
    assert_eq!(app.input_mode, InputMode::Command);
}

#[test]
fn growing_past_compact_width_shuts_menu() {
    let mut app = App::default();
    render(&mut app, 70, 32);
    key(&mut app, KeyCode::Char('m'));
    assert!(app.nav.menu().is_open());

    let text = screen_text(&render(&mut app, 120, 32));
    assert!(!app.nav.menu().is_open());
    assert!(!text.contains("≡ Menu"));

    key(&mut app, KeyCode::Tab);
    assert_eq!(app.current_route(), "/transactions");
}
