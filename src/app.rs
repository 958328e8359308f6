use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{info, warn};

use crate::config::{self, Config, DEFAULT_COMPACT_WIDTH, DEFAULT_FORECAST_MONTHS};
use crate::core::{parse_command, Action, Command, Context, Module, NotifyLevel, PromptKind};
use crate::domain::portfolio::TimeRange;
use crate::domain::sample::sample_statement;
use crate::domain::statement;
use crate::domain::{Insights, Statement};
use crate::modules::export::{self, ExportKind, ExportSource};
use crate::modules::{
    DashboardPage, InsightsPage, PortfolioPage, ProfileEdit, ProfileField, ProfileForm,
    ProfilePage, TransactionsPage,
};
use crate::nav::{routes, HistoryRouter, NavigationBar, Router};
use crate::ui::layout::{self, UiAreas};

const STATUS_TTL: Duration = Duration::from_secs(3);

/// Pages reachable through the standard routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Transactions,
    Portfolio,
    Insights,
    User,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Transactions,
        Page::Portfolio,
        Page::Insights,
        Page::User,
    ];

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.path() == path)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Page::Dashboard => routes::DASHBOARD,
            Page::Transactions => routes::TRANSACTIONS,
            Page::Portfolio => routes::PORTFOLIO,
            Page::Insights => routes::INSIGHTS,
            Page::User => routes::USER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
    Prompt(PromptKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

impl From<NotifyLevel> for StatusLevel {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => StatusLevel::Info,
            NotifyLevel::Warn => StatusLevel::Warn,
            NotifyLevel::Error => StatusLevel::Error,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

/// Where the loaded statement came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementSource {
    Sample,
    File(PathBuf),
}

impl StatementSource {
    pub fn describe(&self) -> String {
        match self {
            StatementSource::Sample => "sample data".to_string(),
            StatementSource::File(path) => path.display().to_string(),
        }
    }
}

/// Startup options resolved from the config file and command line.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub initial_route: String,
    pub compact_width: u16,
    pub force_compact: bool,
    pub forecast_months: usize,
    pub export_dir: Option<PathBuf>,
    pub time_range: TimeRange,
    pub profile: ProfileForm,
}

impl AppSettings {
    pub fn from_config(config: &Config) -> Self {
        let time_range = config
            .dashboard
            .time_range
            .as_deref()
            .and_then(TimeRange::from_label)
            .unwrap_or_default();
        Self {
            initial_route: routes::DASHBOARD.to_string(),
            compact_width: config.compact_width,
            force_compact: false,
            forecast_months: config.forecast_months,
            export_dir: config.export_path(),
            time_range,
            profile: ProfileForm::from_config(&config.profile),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            initial_route: routes::DASHBOARD.to_string(),
            compact_width: DEFAULT_COMPACT_WIDTH,
            force_compact: false,
            forecast_months: DEFAULT_FORECAST_MONTHS,
            export_dir: None,
            time_range: TimeRange::default(),
            profile: ProfileForm::default(),
        }
    }
}

pub struct App {
    pub ctx: Context,
    pub router: HistoryRouter,
    pub nav: NavigationBar,

    pub dashboard: DashboardPage,
    pub transactions: TransactionsPage,
    pub portfolio: PortfolioPage,
    pub insights_page: InsightsPage,
    pub profile: ProfilePage,

    pub statement: Statement,
    pub source: StatementSource,
    pub insights: Insights,

    pub input_mode: InputMode,
    pub command: CommandBar,
    pub status: Option<StatusMessage>,
    pub help_open: bool,
    /// Highlighted entry in the open navigation menu.
    pub menu_cursor: usize,
    pub should_quit: bool,

    compact_width: u16,
    force_compact: bool,
    forecast_months: usize,
    export_dir: Option<PathBuf>,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        Self::with_statement(settings, sample_statement(), StatementSource::Sample)
    }

    pub fn with_statement(settings: AppSettings, statement: Statement, source: StatementSource) -> Self {
        let insights = Insights::compute(&statement, settings.forecast_months);
        let mut ctx = Context::new();
        ctx.summary = insights.summary.clone();
        ctx.age = settings.profile.age();
        ctx.compact = settings.force_compact;

        let mut app = Self {
            ctx,
            router: HistoryRouter::new(settings.initial_route.clone()),
            nav: NavigationBar::default(),
            dashboard: DashboardPage::new(settings.time_range),
            transactions: TransactionsPage::new(statement.transactions.clone()),
            portfolio: PortfolioPage::new(),
            insights_page: InsightsPage::new(),
            profile: ProfilePage::new(settings.profile),
            statement,
            source,
            insights,
            input_mode: InputMode::Normal,
            command: CommandBar::default(),
            status: None,
            help_open: false,
            menu_cursor: 0,
            should_quit: false,
            compact_width: settings.compact_width,
            force_compact: settings.force_compact,
            forecast_months: settings.forecast_months,
            export_dir: settings.export_dir,
        };
        app.sync_context();
        app
    }

    pub fn current_route(&self) -> &str {
        self.router.current()
    }

    pub fn current_page(&self) -> Option<Page> {
        Page::from_path(self.router.current())
    }

    pub fn sync_context(&mut self) {
        self.ctx.current_route = self.router.current().to_string();
    }

    /// Switch to the hamburger menu below the configured width. An open menu
    /// is toggled shut when the terminal grows past it.
    pub fn set_terminal_width(&mut self, width: u16) {
        self.ctx.compact = self.force_compact || width < self.compact_width;
        if !self.ctx.compact && self.nav.menu().is_open() {
            self.nav.toggle_menu();
        }
    }

    pub fn is_compact(&self) -> bool {
        self.ctx.compact
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }

    // ---------------------------------------------------------------
    // Statement
    // ---------------------------------------------------------------

    pub fn set_statement(&mut self, statement: Statement, source: StatementSource) {
        self.insights = Insights::compute(&statement, self.forecast_months);
        self.ctx.summary = self.insights.summary.clone();
        self.transactions.set_transactions(statement.transactions.clone());
        self.insights_page.reset_scroll();
        self.statement = statement;
        self.source = source;
    }

    pub fn load_statement(&mut self, path: &Path) -> Action {
        match statement::load(path) {
            Ok(loaded) => {
                let count = loaded.transactions.len();
                let skipped = loaded.skipped_rows;
                info!(path = %path.display(), transactions = count, skipped, "statement replaced");
                self.set_statement(loaded, StatementSource::File(path.to_path_buf()));
                if skipped > 0 {
                    Action::Notify(
                        format!("Loaded {count} transactions, skipped {skipped} undated rows"),
                        NotifyLevel::Warn,
                    )
                } else {
                    Action::Notify(format!("Loaded {count} transactions"), NotifyLevel::Info)
                }
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "statement load failed");
                Action::Notify(format!("Could not load statement: {err}"), NotifyLevel::Error)
            }
        }
    }

    pub fn export(&self, kind: ExportKind) -> Action {
        let source = ExportSource {
            transactions: self.transactions.visible(),
            header: &self.statement.header,
            insights: &self.insights,
            age: self.ctx.age,
        };
        export::export(kind, self.export_dir.as_deref(), &source)
    }

    // ---------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------

    /// Navigate to a registry path or label; anything else is passed to the
    /// router as an opaque path.
    pub fn navigate(&mut self, target: &str) {
        match self.nav.registry().find(target).cloned() {
            Some(entry) => self.nav.activate(&entry, &mut self.router),
            None => self.router.navigate(target),
        }
        self.sync_context();
    }

    pub fn activate_entry(&mut self, index: usize) -> bool {
        let activated = self.nav.activate_index(index, &mut self.router);
        self.sync_context();
        activated
    }

    /// The menu only exists in the compact layout; wide terminals show links.
    pub fn toggle_menu(&mut self) {
        if !self.is_compact() {
            return;
        }
        self.nav.toggle_menu();
        if self.nav.menu().is_open() {
            self.menu_cursor = self
                .nav
                .registry()
                .position(self.router.current())
                .unwrap_or(0);
        }
    }

    fn go_back(&mut self) -> Action {
        if self.router.back() {
            self.sync_context();
            Action::None
        } else {
            Action::Notify("No previous page".to_string(), NotifyLevel::Warn)
        }
    }

    // ---------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.help_open {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.help_open = false;
            }
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Command => self.handle_command_mode(key),
            InputMode::Prompt(kind) => self.handle_prompt_mode(key, kind),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.nav.menu().is_open() && self.is_compact() {
            self.handle_menu_key(key);
            return;
        }

        if self.current_page() == Some(Page::Dashboard) && self.dashboard.dropdown_open() {
            let action = self.dashboard.handle_key(key, &mut self.ctx);
            self.apply_action(action);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.help_open = true,
            KeyCode::Char(':') => self.enter_command(None),
            KeyCode::Char('m') => self.toggle_menu(),
            KeyCode::Tab => {
                self.nav.activate_adjacent(true, &mut self.router);
                self.sync_context();
            }
            KeyCode::BackTab => {
                self.nav.activate_adjacent(false, &mut self.router);
                self.sync_context();
            }
            KeyCode::Backspace => {
                let action = self.go_back();
                self.apply_action(action);
            }
            KeyCode::Char(ch @ '1'..='9') => {
                let index = ch as usize - '1' as usize;
                self.activate_entry(index);
            }
            KeyCode::Esc => {}
            _ => {
                let action = self.dispatch_to_page(key);
                self.apply_action(action);
            }
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let last = self.nav.registry().len().saturating_sub(1);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.menu_cursor = (self.menu_cursor + 1).min(last),
            KeyCode::Char('k') | KeyCode::Up => self.menu_cursor = self.menu_cursor.saturating_sub(1),
            KeyCode::Enter => {
                let index = self.menu_cursor;
                self.activate_entry(index);
            }
            KeyCode::Char(ch @ '1'..='9') => {
                let index = ch as usize - '1' as usize;
                self.activate_entry(index);
            }
            KeyCode::Esc | KeyCode::Char('m') => self.nav.toggle_menu(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn dispatch_to_page(&mut self, key: KeyEvent) -> Action {
        let ctx = &mut self.ctx;
        match Page::from_path(self.router.current()) {
            Some(Page::Dashboard) => self.dashboard.handle_key(key, ctx),
            Some(Page::Transactions) => self.transactions.handle_key(key, ctx),
            Some(Page::Portfolio) => self.portfolio.handle_key(key, ctx),
            Some(Page::Insights) => self.insights_page.handle_key(key, ctx),
            Some(Page::User) => self.profile.handle_key(key, ctx),
            None => Action::None,
        }
    }

    fn handle_command_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.exit_command(),
            KeyCode::Enter => self.apply_command(),
            KeyCode::Backspace => {
                self.command.input.pop();
            }
            KeyCode::Up => {
                if let Some(last) = self.command.last.clone() {
                    self.command.input = last;
                }
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return;
                }
                self.command.input.push(ch);
            }
            _ => {}
        }
    }

    fn handle_prompt_mode(&mut self, key: KeyEvent, kind: PromptKind) {
        match key.code {
            KeyCode::Esc => self.exit_prompt(),
            KeyCode::Enter => self.apply_prompt(kind),
            KeyCode::Backspace => {
                self.command.input.pop();
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return;
                }
                self.command.input.push(ch);
            }
            _ => {}
        }
    }

    /// Click on a navigation entry activates it; the hamburger toggles the menu.
    pub fn handle_click(&mut self, areas: &UiAreas, col: u16, row: u16) {
        if self.help_open || self.input_mode != InputMode::Normal {
            return;
        }
        let regions = layout::nav_regions(
            areas,
            self.nav.registry().entries(),
            self.ctx.compact,
            self.nav.menu().is_open(),
        );
        if let Some(hamburger) = regions.hamburger {
            if layout::rect_contains(hamburger, col, row) {
                self.toggle_menu();
                return;
            }
        }
        if let Some((index, _)) = regions
            .items
            .iter()
            .find(|(_, rect)| layout::rect_contains(*rect, col, row))
        {
            let index = *index;
            self.activate_entry(index);
        } else if self.nav.menu().is_open() {
            self.nav.toggle_menu();
        }
    }

    // ---------------------------------------------------------------
    // Command bar and prompts
    // ---------------------------------------------------------------

    pub fn enter_command(&mut self, prefill: Option<String>) {
        self.input_mode = InputMode::Command;
        self.command.input = prefill.unwrap_or_default();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    pub fn enter_prompt(&mut self, kind: PromptKind, initial: String) {
        self.input_mode = InputMode::Prompt(kind);
        self.command.input = initial;
    }

    pub fn exit_prompt(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = self.command.input.trim().to_string();
        self.exit_command();
        if input.is_empty() {
            return;
        }
        self.command.last = Some(input.clone());
        let cmd = parse_command(&input);
        let action = self.execute_command(&cmd);
        self.apply_action(action);
    }

    pub fn apply_prompt(&mut self, kind: PromptKind) {
        let input = self.command.input.clone();
        self.exit_prompt();
        let action = match kind {
            PromptKind::Filter => self.transactions.apply_filter(&input),
            PromptKind::ProfileField(index) => match ProfileField::from_index(index) {
                Some(field) => {
                    self.profile.apply(ProfileEdit::Set(field, input));
                    match self.profile.form().field_error(field) {
                        Some(err) => Action::Notify(err.to_string(), NotifyLevel::Warn),
                        None => Action::Notify(
                            format!("{} updated", field.label()),
                            NotifyLevel::Info,
                        ),
                    }
                }
                None => Action::None,
            },
        };
        self.apply_action(action);
    }

    /// Execute a parsed command
    pub fn execute_command(&mut self, cmd: &Command) -> Action {
        match cmd {
            Command::Go(target) => Action::Navigate(target.clone()),
            Command::Back => Action::Back,
            Command::Menu => Action::ToggleMenu,

            Command::Range(label) => self.dashboard.select_label(label),
            Command::Age(Some(age)) => {
                self.profile
                    .apply(ProfileEdit::Set(ProfileField::Age, age.to_string()));
                self.ctx.age = Some(*age);
                Action::Notify(format!("Age set to {age}"), NotifyLevel::Info)
            }
            Command::Age(None) => {
                Action::Notify("Usage: age <years>".to_string(), NotifyLevel::Warn)
            }
            Command::Filter(expr) => self.transactions.apply_filter(expr),
            Command::ClearFilter => {
                self.transactions.clear_filters();
                Action::Notify("Filters cleared".to_string(), NotifyLevel::Info)
            }

            Command::Load(path) => match config::expand_path(path) {
                Some(path) => self.load_statement(&path),
                None => Action::Notify("Usage: load <path>".to_string(), NotifyLevel::Warn),
            },
            Command::Export(kind) => Action::Export(*kind),

            Command::Help => {
                self.help_open = true;
                Action::None
            }
            Command::Quit => Action::Quit,

            Command::Unknown(s) => {
                Action::Notify(format!("Unknown command: {}", s), NotifyLevel::Warn)
            }
        }
    }

    /// Apply an action returned by a command or module
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(target) => self.navigate(&target),
            Action::Back => {
                let action = self.go_back();
                self.apply_action(action);
            }
            Action::ToggleMenu => self.toggle_menu(),
            Action::Copy(text) => self.copy_to_clipboard(text),
            Action::Notify(msg, level) => self.set_status(msg, level.into()),
            Action::OpenCommand(prefill) => self.enter_command(prefill),
            Action::OpenPrompt(kind, initial) => self.enter_prompt(kind, initial),
            Action::Export(kind) => {
                let action = self.export(kind);
                self.apply_action(action);
            }
            Action::Quit => self.should_quit = true,
        }
    }

    fn copy_to_clipboard(&mut self, text: String) {
        use arboard::Clipboard;

        self.ctx.set_clipboard(text.clone());
        let shown = truncate_str(&text, 24);
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => self.set_status(format!("Copied: {shown}"), StatusLevel::Info),
            Err(err) => {
                warn!(error = %err, "system clipboard unavailable");
                self.set_status(
                    format!("Copied: {shown} (system clipboard unavailable)"),
                    StatusLevel::Warn,
                );
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

pub fn truncate_str(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    value.chars().take(max).collect::<String>() + "…"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::RouteRegistry;

    #[test]
    fn pages_resolve_from_standard_paths() {
        assert_eq!(Page::from_path("/"), Some(Page::Dashboard));
        assert_eq!(Page::from_path("/portfolio"), Some(Page::Portfolio));
        assert_eq!(Page::from_path("/portfolio/"), None);
        assert_eq!(Page::from_path("/unknown"), None);
    }

    #[test]
    fn every_standard_entry_has_a_page() {
        let registry = RouteRegistry::standard();
        let paths: Vec<&str> = registry.entries().iter().map(|e| e.path.as_str()).collect();
        let pages: Vec<&str> = Page::ALL.iter().map(|page| page.path()).collect();
        assert_eq!(paths, pages);
    }

    #[test]
    fn settings_from_config() {
        let config = config::parse(
            r#"
compact_width = 80
[dashboard]
time_range = "Last 7 days"
[profile]
age = 52
"#,
        )
        .unwrap();
        let settings = AppSettings::from_config(&config);
        assert_eq!(settings.compact_width, 80);
        assert_eq!(settings.time_range, TimeRange::Week);
        assert_eq!(settings.profile.age(), Some(52));

        let app = App::new(settings);
        assert_eq!(app.ctx.age, Some(52));
        assert_eq!(app.dashboard.range(), TimeRange::Week);
    }

    #[test]
    fn compact_follows_width() {
        let mut app = App::default();
        app.set_terminal_width(DEFAULT_COMPACT_WIDTH - 1);
        assert!(app.is_compact());
        app.set_terminal_width(DEFAULT_COMPACT_WIDTH);
        assert!(!app.is_compact());
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_str("abc", 5), "abc");
        assert_eq!(truncate_str("abcdef", 3), "abc…");
    }
}
