//! Page bodies drawn below the navigation bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    BarChart, Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Sparkline, Table,
    TableState, Tabs, Wrap,
};
use ratatui::Frame;

use crate::app::{truncate_str, App};
use crate::domain::analytics::{self, HISTOGRAM_BINS, TOP_EXPENSES};
use crate::domain::currency::{format_grouped, format_inr};
use crate::domain::invest::Fund;
use crate::domain::portfolio::{total_holdings_inr, TimeRange};
use crate::domain::TxKind;
use crate::modules::portfolio::columns;
use crate::modules::{InsightsPanel, ProfileField};

use super::widgets::MiniSparkline;

fn label() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title.into())
        .border_style(Style::default().fg(Color::DarkGray))
}

fn signed_color(value: f64) -> Color {
    if value < 0.0 {
        Color::LightRed
    } else {
        Color::LightGreen
    }
}

// -------------------------------------------------------------------
// Dashboard
// -------------------------------------------------------------------

pub fn draw_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(6)])
        .split(area);

    draw_metric_cards(f, rows[0], app);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    draw_statement_totals(f, bottom[0], app);
    draw_category_chart(f, bottom[1], app);

    if app.dashboard.dropdown_open() {
        draw_range_dropdown(f, rows[0], app);
    }
}

fn draw_metric_cards(f: &mut Frame, area: Rect, app: &App) {
    let metrics = app.dashboard.metrics();
    let block = panel(format!(" Portfolio · {} [r] ", app.dashboard.range_label()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cards = [
        ("Total value", format_inr(metrics.total_value), Color::White),
        ("Invested", format_inr(metrics.invested), Color::White),
        (
            "Returns",
            format!("{} ({:+.2}%)", format_inr(metrics.returns), metrics.returns_pct),
            signed_color(metrics.returns),
        ),
        ("Income", format_inr(metrics.income), Color::LightGreen),
        ("Expenses", format_inr(metrics.expenses), Color::LightRed),
        (
            "Savings rate",
            format!("{:.1}%", metrics.savings_rate() * 100.0),
            Color::LightCyan,
        ),
    ];
    let count = if app.is_compact() { 3 } else { cards.len() };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count as u32); count])
        .split(inner);

    for (chunk, (title, value, color)) in chunks.iter().zip(cards) {
        let text = Text::from(vec![
            Line::from(Span::styled(title, label())),
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
        ]);
        f.render_widget(Paragraph::new(text), *chunk);
    }
}

fn draw_range_dropdown(f: &mut Frame, anchor: Rect, app: &App) {
    let width = TimeRange::ALL
        .iter()
        .map(|r| r.label().chars().count() as u16)
        .max()
        .unwrap_or(0)
        + 6;
    let height = TimeRange::ALL.len() as u16 + 2;
    let area = Rect::new(anchor.x + 2, anchor.y + 1, width, height).intersection(f.size());
    f.render_widget(Clear, area);

    let items: Vec<ListItem> = TimeRange::ALL
        .iter()
        .enumerate()
        .map(|(index, range)| {
            let marker = if *range == app.dashboard.range() { "●" } else { " " };
            let mut style = Style::default().fg(Color::Gray);
            if index == app.dashboard.cursor() {
                style = style.bg(Color::DarkGray).fg(Color::White);
            }
            ListItem::new(Span::styled(format!("{marker} {}", range.label()), style))
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Range ")
            .border_style(Style::default().fg(Color::LightCyan)),
    );
    f.render_widget(list, area);
}

fn draw_statement_totals(f: &mut Frame, area: Rect, app: &App) {
    let summary = &app.ctx.summary;
    let block = panel(" Statement ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(2)])
        .split(inner);

    let header = &app.statement.header;
    let mut lines = Vec::new();
    if let Some(name) = header.holder_name.as_deref() {
        lines.push(Line::from(vec![
            Span::styled("Holder   ", label()),
            Span::raw(name.to_string()),
        ]));
    }
    if let (Some(from), Some(to)) = (header.period_from.as_deref(), header.period_to.as_deref()) {
        lines.push(Line::from(vec![
            Span::styled("Period   ", label()),
            Span::raw(format!("{from} – {to}")),
        ]));
    }
    lines.extend([
        Line::from(vec![
            Span::styled("Spent    ", label()),
            Span::styled(
                format!("₹{}", format_grouped(summary.total_expenditure)),
                Style::default().fg(Color::LightRed),
            ),
        ]),
        Line::from(vec![
            Span::styled("Received ", label()),
            Span::styled(
                format!("₹{}", format_grouped(summary.total_income)),
                Style::default().fg(Color::LightGreen),
            ),
        ]),
        Line::from(vec![
            Span::styled("Net      ", label()),
            Span::styled(
                format!("₹{}", format_grouped(summary.net())),
                Style::default().fg(signed_color(summary.net())),
            ),
        ]),
        Line::from(vec![
            Span::styled("Per day  ", label()),
            Span::raw(format!("₹{}", format_grouped(summary.average_daily))),
        ]),
        Line::from(vec![
            Span::styled("Rows     ", label()),
            Span::raw(summary.transaction_count.to_string()),
        ]),
    ]);
    f.render_widget(Paragraph::new(Text::from(lines)), parts[0]);

    let monthly: Vec<f64> = summary.monthly.values().copied().collect();
    if parts[1].height == 0 {
        return;
    }
    let caption = Line::from(Span::styled("Monthly spending", label()));
    f.render_widget(Paragraph::new(caption), Rect { height: 1, ..parts[1] });
    if parts[1].height > 1 {
        let spark_area = Rect {
            y: parts[1].y + 1,
            height: 1,
            ..parts[1]
        };
        f.render_widget(MiniSparkline::new(&monthly), spark_area);
    }
}

fn draw_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let data: Vec<(&str, u64)> = app
        .ctx
        .summary
        .by_category
        .iter()
        .map(|(category, amount)| (category.title(), amount.max(0.0).round() as u64))
        .collect();

    if data.is_empty() {
        f.render_widget(
            Paragraph::new("No spending recorded").block(panel(" Spending by category ")),
            area,
        );
        return;
    }

    let chart = BarChart::default()
        .block(panel(" Spending by category "))
        .data(data.as_slice())
        .bar_width(6)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::LightCyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::LightCyan));
    f.render_widget(chart, area);
}

// -------------------------------------------------------------------
// Transactions
// -------------------------------------------------------------------

pub fn draw_transactions(f: &mut Frame, area: Rect, app: &App) {
    let page = &app.transactions;
    let visible = page.visible();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(3)])
        .split(area);

    let header = Row::new(["Date", "Narration", "Category", "Type", "Amount", "Balance"])
        .style(Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = visible
        .iter()
        .map(|tx| {
            let amount_style = match tx.kind {
                TxKind::Withdrawal => Style::default().fg(Color::LightRed),
                TxKind::Deposit => Style::default().fg(Color::LightGreen),
                TxKind::Unknown => Style::default().fg(Color::Gray),
            };
            Row::new(vec![
                Cell::from(tx.date.format("%Y-%m-%d").to_string()),
                Cell::from(truncate_str(&tx.narration, 40)),
                Cell::from(tx.category.title()),
                Cell::from(tx.kind.title()),
                Cell::from(Span::styled(format_grouped(tx.amount), amount_style)),
                Cell::from(
                    tx.closing_balance
                        .map(format_grouped)
                        .unwrap_or_else(|| "--".to_string()),
                ),
            ])
        })
        .collect();

    let title = format!(
        " Transactions {}/{} · filter: {} ",
        visible.len(),
        page.total(),
        page.filter_label()
    );
    let widths = [
        Constraint::Length(10),
        Constraint::Min(16),
        Constraint::Length(13),
        Constraint::Length(10),
        Constraint::Length(13),
        Constraint::Length(13),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(title))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !visible.is_empty() {
        state.select(Some(page.selected_index()));
    }
    f.render_stateful_widget(table, chunks[0], &mut state);

    let detail = match page.selected_transaction() {
        Some(tx) => Line::from(vec![
            Span::styled("Ref ", label()),
            Span::raw(format!("{}  ", if tx.reference.is_empty() { "--" } else { tx.reference.as_str() })),
            Span::styled("Value date ", label()),
            Span::raw(format!("{}  ", if tx.value_date.is_empty() { "--" } else { tx.value_date.as_str() })),
            Span::raw(tx.narration.clone()),
        ]),
        None => Line::from(Span::styled("No transactions match the filter", label())),
    };
    f.render_widget(
        Paragraph::new(detail).block(panel(" Selected ")).wrap(Wrap { trim: true }),
        chunks[1],
    );
}

// -------------------------------------------------------------------
// Portfolio
// -------------------------------------------------------------------

pub fn draw_portfolio(f: &mut Frame, area: Rect, app: &App) {
    let holdings = app.portfolio.holdings();
    let per_row = columns(app.is_compact());
    let row_count = holdings.len().div_ceil(per_row);

    let block = panel(format!(
        " My portfolio · ₹{} across {} currencies ",
        format_grouped(total_holdings_inr(holdings)),
        holdings.len()
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, row_count as u32); row_count])
        .split(inner);

    for (row_index, row_area) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, per_row as u32); per_row])
            .split(*row_area);
        for (col, cell) in cells.iter().enumerate() {
            let index = row_index * per_row + col;
            let Some(holding) = holdings.get(index) else {
                continue;
            };
            let selected = index == app.portfolio.selected();
            let border = if selected {
                Style::default().fg(Color::LightCyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let card = Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", holding.code))
                .border_style(border);
            let text = Text::from(vec![
                Line::from(Span::styled(holding.name, label())),
                Line::from(Span::styled(
                    format!("{}{}", holding.symbol, format_grouped(holding.balance)),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("≈ {}", format_inr(holding.value_inr()))),
                Line::from(Span::styled(
                    format!("{:+.2}%", holding.change_pct),
                    Style::default().fg(signed_color(holding.change_pct)),
                )),
            ]);
            f.render_widget(Paragraph::new(text).block(card), *cell);
        }
    }
}

// -------------------------------------------------------------------
// Insights
// -------------------------------------------------------------------

pub fn draw_insights(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    let selected = InsightsPanel::ALL
        .iter()
        .position(|p| *p == app.insights_page.panel())
        .unwrap_or(0);
    let tabs = Tabs::new(InsightsPanel::ALL.iter().map(|p| p.title()).collect::<Vec<_>>())
        .block(panel(" Insights "))
        .select(selected)
        .highlight_style(Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[0]);

    match app.insights_page.panel() {
        InsightsPanel::Spending => draw_spending(f, chunks[1], app),
        InsightsPanel::Forecast => draw_forecast(f, chunks[1], app),
        InsightsPanel::Plan => draw_plan(f, chunks[1], app),
    }
}

fn draw_spending(f: &mut Frame, area: Rect, app: &App) {
    let summary = &app.insights.summary;
    let transactions = &app.statement.transactions;

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let mut lines = vec![Line::from(vec![
        Span::styled("Average daily spend ", label()),
        Span::raw(format!("₹{}", format_grouped(summary.average_daily))),
    ])];
    lines.push(Line::from(""));
    for (category, amount) in &summary.by_category {
        let share = if summary.total_expenditure > 0.0 {
            amount / summary.total_expenditure * 100.0
        } else {
            0.0
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<14}", category.title()), label()),
            Span::raw(format!("{:>12}  {:>5.1}%", format_inr(*amount), share)),
        ]));
    }
    let uncategorized = analytics::uncategorized(transactions);
    if !uncategorized.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{} uncategorized narrations", uncategorized.len()),
            Style::default().fg(Color::LightYellow),
        )));
    }
    if app.insights.negative_balances > 0 {
        lines.push(Line::from(Span::styled(
            format!("{} rows with a negative balance", app.insights.negative_balances),
            Style::default().fg(Color::LightRed),
        )));
    }
    f.render_widget(
        Paragraph::new(Text::from(lines)).block(panel(" By category ")),
        cols[0],
    );

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(5)])
        .split(cols[1]);

    let rows: Vec<Row> = analytics::top_expenses(transactions, TOP_EXPENSES)
        .into_iter()
        .map(|tx| {
            Row::new(vec![
                tx.date.format("%Y-%m-%d").to_string(),
                truncate_str(&tx.narration, 32),
                format_grouped(tx.amount),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [Constraint::Length(10), Constraint::Min(12), Constraint::Length(12)],
    )
    .header(Row::new(["Date", "Narration", "Amount"]).style(Style::default().fg(Color::LightCyan)))
    .block(panel(format!(" Top {TOP_EXPENSES} expenses ")));
    f.render_widget(table, right[0]);

    let histogram = analytics::amount_histogram(transactions, HISTOGRAM_BINS);
    let sparkline = Sparkline::default()
        .block(panel(" Amount distribution "))
        .data(&histogram)
        .style(Style::default().fg(Color::LightMagenta));
    f.render_widget(sparkline, right[1]);
}

fn draw_forecast(f: &mut Frame, area: Rect, app: &App) {
    let points = match &app.insights.forecast {
        Ok(points) => points,
        Err(err) => {
            let text = Text::from(vec![
                Line::from(Span::styled(
                    "Forecast unavailable",
                    Style::default().fg(Color::LightYellow),
                )),
                Line::from(err.to_string()),
            ]);
            f.render_widget(Paragraph::new(text).block(panel(" Forecast ")), area);
            return;
        }
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let inner_height = cols[0].height.saturating_sub(3) as usize;
    let max_scroll = points.len().saturating_sub(inner_height);
    let scroll = app.insights_page.scroll().min(max_scroll);
    let rows: Vec<Row> = points
        .iter()
        .skip(scroll)
        .map(|point| {
            let point = point.floored();
            Row::new(vec![
                point.month.to_string(),
                format_inr(point.yhat),
                format_inr(point.lower),
                format_inr(point.upper),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(["Month", "Predicted", "Lower", "Upper"])
            .style(Style::default().fg(Color::LightCyan)),
    )
    .block(panel(format!(" Closing balance forecast · {} months ", points.len())));
    f.render_widget(table, cols[0]);

    let history: Vec<f64> = app.insights.history.iter().map(|m| m.balance).collect();
    let projected: Vec<f64> = points.iter().map(|p| p.floored().yhat).collect();
    let text = Text::from(vec![
        Line::from(vec![
            Span::styled("History months  ", label()),
            Span::raw(history.len().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Last balance    ", label()),
            Span::raw(format_inr(history.last().copied().unwrap_or(0.0))),
        ]),
        Line::from(vec![
            Span::styled("Final forecast  ", label()),
            Span::raw(format_inr(app.insights.current_balance().max(0.0))),
        ]),
    ]);
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Length(4), Constraint::Min(0)])
        .split(cols[1]);
    f.render_widget(Paragraph::new(text).block(panel(" Summary ")), side[0]);

    let spark_block = panel(" History → forecast ");
    let spark_inner = spark_block.inner(side[1]);
    f.render_widget(spark_block, side[1]);
    let series: Vec<f64> = history.iter().chain(projected.iter()).copied().collect();
    f.render_widget(
        MiniSparkline::new(&series).style(Style::default().fg(Color::LightGreen)),
        spark_inner,
    );
}

fn fund_rows(funds: &'static [Fund]) -> Vec<Row<'static>> {
    funds
        .iter()
        .map(|fund| {
            Row::new(vec![
                fund.name.to_string(),
                format!("{:.1}%", fund.one_year),
                format!("{:.1}%", fund.three_year),
                format!("{:.1}%", fund.five_year),
                format!("{:.1}%", fund.since_inception),
            ])
        })
        .collect()
}

fn fund_table(title: String, funds: &'static [Fund]) -> Table<'static> {
    Table::new(
        fund_rows(funds),
        [
            Constraint::Min(20),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
        ],
    )
    .header(
        Row::new(["Fund", "1Y", "3Y", "5Y", "Incep."]).style(Style::default().fg(Color::LightCyan)),
    )
    .block(panel(title))
}

fn draw_plan(f: &mut Frame, area: Rect, app: &App) {
    let plan = app.insights.plan(app.ctx.age);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(4),
            Constraint::Min(4),
        ])
        .split(area);

    let age_note = if app.ctx.age.is_some() {
        String::new()
    } else {
        " (default, set with :age or the User page)".to_string()
    };
    let text = Text::from(vec![
        Line::from(vec![
            Span::styled("Age                 ", label()),
            Span::raw(format!("{}{age_note}", plan.age)),
        ]),
        Line::from(vec![
            Span::styled("Risk tolerance      ", label()),
            Span::raw(plan.strategy.risk.title()),
        ]),
        Line::from(vec![
            Span::styled("Avg monthly expense ", label()),
            Span::raw(format_inr(app.insights.average_expense)),
        ]),
        Line::from(vec![
            Span::styled("Investable          ", label()),
            Span::raw(format_inr(app.insights.investable())),
        ]),
        Line::from(vec![
            Span::styled("Invest now          ", label()),
            Span::styled(
                format!(
                    "{} ({:.1}%)",
                    format_inr(plan.total),
                    plan.strategy.investment_percent * 100.0
                ),
                Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Equities / debt     ", label()),
            Span::raw(format!(
                "{} ({:.0}%) / {} ({:.0}%)",
                format_inr(plan.equity_amount),
                plan.allocation.equities * 100.0,
                format_inr(plan.debt_amount),
                plan.allocation.debt * 100.0
            )),
        ]),
    ]);
    f.render_widget(
        Paragraph::new(text).block(panel(" Investment plan [a: set age] ")),
        chunks[0],
    );

    f.render_widget(
        fund_table(" Equity funds (high risk) ".to_string(), plan.equity_funds()),
        chunks[1],
    );
    f.render_widget(
        fund_table(" Debt funds (low risk) ".to_string(), plan.debt_funds()),
        chunks[2],
    );
}

// -------------------------------------------------------------------
// User
// -------------------------------------------------------------------

pub fn draw_profile(f: &mut Frame, area: Rect, app: &App) {
    let page = &app.profile;
    let form = page.form();
    let selected = page.selected_field();

    let mut lines = Vec::new();
    for field in ProfileField::ALL {
        let is_selected = field == selected;
        let marker = if is_selected { "▶ " } else { "  " };
        let value = form.value(field);
        let value_span = if value.is_empty() {
            Span::styled("(empty)", label())
        } else {
            Span::raw(value.to_string())
        };
        let mut spans = vec![
            Span::styled(
                format!("{marker}{:<12}", field.label()),
                if is_selected {
                    Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                },
            ),
            value_span,
        ];
        if let Some(err) = form.field_error(field) {
            spans.push(Span::styled(
                format!("  ✗ {err}"),
                Style::default().fg(Color::LightRed),
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let state = if page.is_submitted() {
        Span::styled("Saved", Style::default().fg(Color::LightGreen))
    } else {
        Span::styled("Unsaved changes", Style::default().fg(Color::LightYellow))
    };
    lines.push(Line::from(vec![Span::styled("Status  ", label()), state]));
    lines.push(Line::from(Span::styled(
        "Enter edit · d clear · s save · R reset",
        label(),
    )));

    f.render_widget(
        Paragraph::new(Text::from(lines)).block(panel(" User profile ")),
        area,
    );
}
