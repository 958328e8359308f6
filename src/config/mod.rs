use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_COMPACT_WIDTH: u16 = 100;
pub const DEFAULT_FORECAST_MONTHS: usize = 36;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardConfig {
    pub time_range: Option<String>,
}

/// Prefill values for the profile form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileConfig {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age: Option<u32>,
    pub occupation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub statement: Option<String>,

    #[serde(default = "default_compact_width")]
    pub compact_width: u16,

    #[serde(default = "default_forecast_months")]
    pub forecast_months: usize,

    #[serde(default)]
    pub export_dir: Option<String>,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub profile: ProfileConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            statement: None,
            compact_width: DEFAULT_COMPACT_WIDTH,
            forecast_months: DEFAULT_FORECAST_MONTHS,
            export_dir: None,
            dashboard: DashboardConfig::default(),
            profile: ProfileConfig::default(),
        }
    }
}

fn default_compact_width() -> u16 {
    DEFAULT_COMPACT_WIDTH
}

fn default_forecast_months() -> usize {
    DEFAULT_FORECAST_MONTHS
}

impl Config {
    pub fn statement_path(&self) -> Option<PathBuf> {
        self.statement.as_deref().and_then(expand_path)
    }

    pub fn export_path(&self) -> Option<PathBuf> {
        self.export_dir
            .as_deref()
            .and_then(expand_path)
            .or_else(|| data_dir().map(|dir| dir.join("exports")))
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    parse(&content).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "ignoring malformed config");
        Config::default()
    })
}

pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(content)
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("FINBOARD_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("finboard").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("finboard").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "finboard", "finboard")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("finboard"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("finboard"));
    }
    directories::ProjectDirs::from("io", "finboard", "finboard")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("finboard.log"))
}

/// Expand a leading `~` to the home directory.
pub fn expand_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed == "~" {
        return std::env::var_os("HOME").map(PathBuf::from);
    }
    if let Some(rest) = trimmed.strip_prefix("~/") {
        return std::env::var_os("HOME").map(|home| PathBuf::from(home).join(rest));
    }
    Some(PathBuf::from(trimmed))
}
