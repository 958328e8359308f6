use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use finboard::app::{App, AppSettings, StatementSource, StatusLevel};
use finboard::config;
use finboard::domain::sample::sample_statement;
use finboard::domain::{statement, Insights};
use finboard::{report, ui};

#[derive(Debug, Parser)]
#[command(
    name = "finboard",
    version,
    about = "finboard: a terminal dashboard for bank statements"
)]
struct Args {
    /// Bank statement CSV (overrides `statement` in the config file)
    #[arg(long)]
    statement: Option<PathBuf>,

    /// Route to open first, e.g. /insights
    #[arg(long)]
    route: Option<String>,

    /// Always use the compact hamburger menu
    #[arg(long)]
    compact: bool,

    /// Print the insights report to stdout and exit
    #[arg(long)]
    report: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.report);

    let config = config::load();
    let statement_path = args.statement.clone().or_else(|| config.statement_path());

    let mut settings = AppSettings::from_config(&config);
    settings.force_compact = args.compact;
    if let Some(route) = args.route.clone() {
        settings.initial_route = route;
    }

    if args.report {
        let statement = match statement_path {
            Some(path) => statement::load(&path)
                .with_context(|| format!("failed to load statement {}", path.display()))?,
            None => sample_statement(),
        };
        let insights = Insights::compute(&statement, settings.forecast_months);
        print!("{}", report::render(&statement, &insights, settings.profile.age()));
        return Ok(());
    }

    let mut load_error = None;
    let (statement, source) = match statement_path {
        Some(path) => match statement::load(&path) {
            Ok(loaded) => (loaded, StatementSource::File(path)),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "falling back to sample data");
                load_error = Some(format!("Could not load statement: {err}. Showing sample data"));
                (sample_statement(), StatementSource::Sample)
            }
        },
        None => (sample_statement(), StatementSource::Sample),
    };
    info!(source = %source.describe(), transactions = statement.transactions.len(), "starting");

    let mut app = App::with_statement(settings, statement, source);
    if let Some(message) = load_error {
        app.set_status(message, StatusLevel::Error);
    } else if app.statement.skipped_rows > 0 {
        let skipped = app.statement.skipped_rows;
        app.set_status(format!("Skipped {skipped} rows without a valid date"), StatusLevel::Warn);
    }

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

/// The TUI owns stdout, so logs go to a file unless printing a report.
fn init_tracing(to_stderr: bool) {
    let filter = EnvFilter::try_from_env("FINBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    if to_stderr {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
        return;
    }

    let Some(path) = config::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = File::options().create(true).append(true).open(&path) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;
        if app.should_quit {
            info!(requests = app.router.request_count(), "quitting");
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(width, _) => app.set_terminal_width(width),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let Some(size) = terminal_rect() else {
        return;
    };
    let areas = ui::layout::areas(size);
    app.handle_click(&areas, mouse.column, mouse.row);
}

fn terminal_rect() -> Option<Rect> {
    let (width, height) = crossterm::terminal::size().ok()?;
    Some(Rect {
        x: 0,
        y: 0,
        width,
        height,
    })
}
