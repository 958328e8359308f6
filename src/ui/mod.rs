use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod pages;
pub mod widgets;

use crate::app::{App, InputMode, Page, StatusLevel};
use crate::core::PromptKind;
use crate::modules::ProfileField;

use self::layout::{nav_item_text, nav_regions, UiAreas, HAMBURGER};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.size();
    app.set_terminal_width(size.width);
    app.sync_context();

    let areas = layout::areas(size);

    draw_header(f, &areas, app);
    draw_page(f, areas.main, app);
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if app.nav.menu().is_open() && app.is_compact() {
        draw_nav_menu(f, &areas, app);
    }
    if app.help_open {
        draw_help_popup(f, areas.size, app);
    }
}

fn draw_header(f: &mut Frame, areas: &UiAreas, app: &App) {
    let header = areas.header;
    f.render_widget(Block::default().borders(Borders::ALL), header);

    let inner = layout::rect_inner(header);
    let current = app.current_route();
    let items = app.nav.render(current);
    let regions = nav_regions(
        areas,
        app.nav.registry().entries(),
        app.is_compact(),
        app.nav.menu().is_open(),
    );

    let brand = Paragraph::new(Span::styled(
        "finboard",
        Style::default()
            .fg(Color::LightCyan)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right);

    if let Some(hamburger) = regions.hamburger {
        f.render_widget(brand, inner);
        let style = if app.nav.menu().is_open() {
            Style::default().fg(Color::Black).bg(Color::LightCyan)
        } else {
            Style::default().fg(Color::LightCyan)
        };
        f.render_widget(Paragraph::new(Span::styled(HAMBURGER, style)), hamburger);

        let active = items
            .iter()
            .find(|item| item.is_active)
            .map(|item| item.entry.label.clone())
            .unwrap_or_else(|| current.to_string());
        let label_x = hamburger.x + hamburger.width + 2;
        if label_x < inner.x + inner.width {
            let label_area = Rect::new(label_x, inner.y, inner.x + inner.width - label_x, 1);
            f.render_widget(
                Paragraph::new(Span::styled(active, Style::default().fg(Color::White))),
                label_area,
            );
        }
        return;
    }

    f.render_widget(brand.alignment(Alignment::Left), inner);
    for (index, rect) in regions.items {
        let Some(item) = items.get(index) else {
            continue;
        };
        let style = if item.is_active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightCyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        f.render_widget(
            Paragraph::new(Span::styled(nav_item_text(index, item.entry), style)),
            rect,
        );
    }
}

fn draw_nav_menu(f: &mut Frame, areas: &UiAreas, app: &App) {
    let regions = nav_regions(areas, app.nav.registry().entries(), true, true);
    let Some(menu) = regions.menu else {
        return;
    };
    f.render_widget(Clear, menu);

    let items: Vec<ListItem> = app
        .nav
        .render(app.current_route())
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let mut style = if item.is_active {
                Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            if index == app.menu_cursor {
                style = style.bg(Color::DarkGray);
            }
            ListItem::new(Span::styled(nav_item_text(index, item.entry), style))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightCyan)),
    );
    f.render_widget(list, menu);
}

fn draw_page(f: &mut Frame, area: Rect, app: &App) {
    match app.current_page() {
        Some(Page::Dashboard) => pages::draw_dashboard(f, area, app),
        Some(Page::Transactions) => pages::draw_transactions(f, area, app),
        Some(Page::Portfolio) => pages::draw_portfolio(f, area, app),
        Some(Page::Insights) => pages::draw_insights(f, area, app),
        Some(Page::User) => pages::draw_profile(f, area, app),
        None => draw_not_found(f, area, app),
    }
}

fn draw_not_found(f: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Page not found",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("No page at {}", app.current_route())),
        Line::from(""),
        Line::from(Span::styled(
            "Backspace to go back, 1-5 to pick a page",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("Route ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.current_route())),
        Span::styled("Source ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.source.describe())),
        Span::styled("Txs ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.statement.transactions.len())),
    ];
    if let Some(age) = app.ctx.age {
        spans.push(Span::styled("Age ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(format!("{age}  ")));
    }
    if app.current_page() == Some(Page::Transactions) {
        spans.push(Span::styled("Filter ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(app.transactions.filter_label()));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("go", "Go to a path or label"),
        ("dashboard", "Open the dashboard"),
        ("transactions", "Open transactions"),
        ("portfolio", "Open the portfolio"),
        ("insights", "Open insights"),
        ("user", "Open the profile form"),
        ("back", "Previous page"),
        ("menu", "Toggle navigation menu"),
        ("range", "Dashboard range: 7d 30d 90d 12m"),
        ("age", "Set age for the plan"),
        ("filter", "type: cat: min: max: from: to: text"),
        ("clear", "Clear transaction filters"),
        ("load", "Load a statement CSV"),
        ("export", "transactions | forecast | summary"),
        ("help", "Show help"),
        ("quit", "Quit"),
    ];

    for (cmd, desc) in commands {
        if cmd.starts_with(&input) {
            return Some(desc);
        }
    }
    None
}

fn prompt_label(kind: PromptKind) -> String {
    match kind {
        PromptKind::Filter => "filter".to_string(),
        PromptKind::ProfileField(index) => ProfileField::from_index(index)
            .map(|field| field.label().to_lowercase())
            .unwrap_or_else(|| "value".to_string()),
    }
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = command_hint(&app.command.input);
            let hint_text = hint.unwrap_or("go <page> | filter <expr> | export <kind> | help");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(app.command.input.as_str()),
                Span::styled(
                    format!("  {}", hint_text),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        InputMode::Prompt(kind) => Line::from(vec![
            Span::styled(
                format!("> {} ", prompt_label(kind)),
                Style::default().fg(Color::LightCyan),
            ),
            Span::raw(app.command.input.as_str()),
            Span::styled(
                "  (Enter=ok Esc=cancel)",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        InputMode::Normal => {
            if let Some((text, level)) = app.status_text() {
                let color = match level {
                    StatusLevel::Info => Color::LightGreen,
                    StatusLevel::Warn => Color::LightYellow,
                    StatusLevel::Error => Color::LightRed,
                };
                Line::from(vec![
                    Span::styled("msg: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(text, Style::default().fg(color)),
                ])
            } else {
                action_hints(app)
            }
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::LightCyan)),
        Span::raw(label),
    ]
}

fn action_hints(app: &App) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    if app.is_compact() {
        spans.extend(hint("m", " Menu  "));
    } else {
        spans.extend(hint("1-5", " Pages  "));
    }
    spans.extend(hint("Tab", " Next  "));

    match app.current_page() {
        Some(Page::Dashboard) => spans.extend(hint("r", " Range  ")),
        Some(Page::Transactions) => {
            spans.extend(hint("/", " Filter  "));
            spans.extend(hint("t/c", " Type/Cat  "));
            spans.extend(hint("y", " Copy  "));
            spans.extend(hint("e", " Export  "));
        }
        Some(Page::Portfolio) => spans.extend(hint("hjkl", " Select  ")),
        Some(Page::Insights) => {
            spans.extend(hint("h/l", " Panel  "));
            spans.extend(hint("e/E", " Export  "));
        }
        Some(Page::User) => {
            spans.extend(hint("Enter", " Edit  "));
            spans.extend(hint("s", " Save  "));
        }
        None => spans.extend(hint("Bksp", " Back  ")),
    }

    spans.extend(hint(":", " Cmd  "));
    spans.extend(hint("?", " Help  "));
    spans.extend(hint("q", " Quit"));
    Line::from(spans)
}

fn draw_help_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = centered_rect(72, 70, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  1-5        Open page"),
        Line::from("  Tab / S-Tab Next / previous page"),
        Line::from("  m          Toggle menu (j/k + Enter inside)"),
        Line::from("  Backspace  Previous page"),
        Line::from("  Mouse      Click a link or the menu button"),
        Line::from(""),
        Line::from("Pages"),
        Line::from("  r          Time range (Dashboard)"),
        Line::from("  /          Filter (Transactions)"),
        Line::from("  t / c / x  Type / category / clear"),
        Line::from("  y          Copy selection"),
        Line::from("  e / E      Export list or forecast / summary"),
        Line::from("  h / l      Switch panel (Insights)"),
        Line::from("  a          Set age (Insights)"),
        Line::from("  Enter / s  Edit field / save (User)"),
        Line::from(""),
        Line::from("Filter examples:"),
        Line::from("  type:withdrawal cat:food min:500"),
        Line::from("  from:2023-03 to:2023-06 amazon"),
        Line::from(""),
        Line::from("  :          Command bar (try :help words)"),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from(format!("Current route: {}", app.current_route())),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
