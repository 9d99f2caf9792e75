use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::snake::SnakePreset;
use crate::theme::Theme;

/// pcterm - pcstyle.dev over a terminal connection
///
/// Serves the menu-driven terminal interface to every client that connects.
/// Configuration priority: CLI args > Environment variables > Config file > Defaults
#[derive(Parser, Debug, Default)]
#[command(name = "pcterm")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "pcstyle.dev terminal interface", long_about = None)]
pub struct CliArgs {
    /// Address to bind
    #[arg(long, env = "PCTERM_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PCTERM_PORT")]
    pub port: Option<u16>,

    /// Base URL of the site API (contact submissions go to {url}/api/contact)
    #[arg(long, env = "PCTERM_API_URL")]
    pub api_url: Option<String>,

    /// Contact submission timeout in milliseconds (1000-60000)
    #[arg(long, env = "PCTERM_SUBMIT_TIMEOUT_MS")]
    pub submit_timeout_ms: Option<u64>,

    /// Seconds to let sessions finish after an interrupt (1-300)
    #[arg(long, env = "PCTERM_SHUTDOWN_GRACE_SECS")]
    pub shutdown_grace_secs: Option<u64>,

    /// Color theme: neon, amber-crt, green-phosphor
    #[arg(long, env = "PCTERM_THEME", value_parser = Theme::from_str)]
    pub theme: Option<Theme>,

    /// Snake variant served by the arcade: arcade, classic
    #[arg(long, env = "PCTERM_SNAKE", value_parser = SnakePreset::from_str)]
    pub snake: Option<SnakePreset>,

    /// Columns assumed when a client never reports its size (20-500)
    #[arg(long, env = "PCTERM_DEFAULT_COLS")]
    pub default_cols: Option<u16>,

    /// Rows assumed when a client never reports its size (10-200)
    #[arg(long, env = "PCTERM_DEFAULT_ROWS")]
    pub default_rows: Option<u16>,

    /// TOML file with the same keys (snake_case)
    #[arg(short, long, env = "PCTERM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log file used by the local terminal binary
    #[arg(long, env = "PCTERM_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Optional config file layer.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_url: Option<String>,
    pub submit_timeout_ms: Option<u64>,
    pub shutdown_grace_secs: Option<u64>,
    pub theme: Option<String>,
    pub snake: Option<String>,
    pub default_cols: Option<u16>,
    pub default_rows: Option<u16>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_url: String, // no trailing slash
    pub submit_timeout: Duration,
    pub shutdown_grace: Duration,
    pub theme: Theme,
    pub snake: SnakePreset,
    pub default_cols: u16,
    pub default_rows: u16,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 2222,
            api_url: "https://pcstyle.dev".to_string(),
            submit_timeout: Duration::from_millis(10_000),
            shutdown_grace: Duration::from_secs(30),
            theme: Theme::Neon,
            snake: SnakePreset::Arcade,
            default_cols: 80,
            default_rows: 24,
            log_file: PathBuf::from("pcterm.log"),
        }
    }
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

/// Validate URL format (basic check)
fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}

/// Load configuration from CLI args, environment variables and the
/// optional config file.
pub fn load() -> Result<Config> {
    Config::from_args(CliArgs::parse())
}

impl Config {
    /// Resolve parsed arguments, reading the config file they point at.
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::from_path(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(args, file)
    }

    /// Merge the layers: args (already carrying env values) over file over defaults.
    pub fn resolve(args: CliArgs, file: FileConfig) -> Result<Self> {
        let defaults = Config::default();

        let host = args.host.or(file.host).unwrap_or(defaults.host);
        if host.trim().is_empty() {
            return Err(anyhow!("PCTERM_HOST cannot be empty"));
        }

        let port = args.port.or(file.port).unwrap_or(defaults.port);
        let port = validate_in_range(port, 1, u16::MAX, "PCTERM_PORT")?;

        let api_url = args.api_url.or(file.api_url).unwrap_or(defaults.api_url);
        validate_url(&api_url, "PCTERM_API_URL")?;
        let api_url = api_url.trim_end_matches('/').to_string();

        let submit_timeout_ms = args
            .submit_timeout_ms
            .or(file.submit_timeout_ms)
            .unwrap_or(defaults.submit_timeout.as_millis() as u64);
        let submit_timeout_ms =
            validate_in_range(submit_timeout_ms, 1000, 60000, "PCTERM_SUBMIT_TIMEOUT_MS")?;

        let grace_secs = args
            .shutdown_grace_secs
            .or(file.shutdown_grace_secs)
            .unwrap_or(defaults.shutdown_grace.as_secs());
        let grace_secs = validate_in_range(grace_secs, 1, 300, "PCTERM_SHUTDOWN_GRACE_SECS")?;

        let theme = match (args.theme, file.theme) {
            (Some(theme), _) => theme,
            (None, Some(name)) => Theme::from_str(&name).map_err(|e| anyhow!(e))?,
            (None, None) => defaults.theme,
        };

        let snake = match (args.snake, file.snake) {
            (Some(preset), _) => preset,
            (None, Some(name)) => SnakePreset::from_str(&name).map_err(|e| anyhow!(e))?,
            (None, None) => defaults.snake,
        };

        let default_cols = args.default_cols.or(file.default_cols).unwrap_or(defaults.default_cols);
        let default_cols = validate_in_range(default_cols, 20, 500, "PCTERM_DEFAULT_COLS")?;
        let default_rows = args.default_rows.or(file.default_rows).unwrap_or(defaults.default_rows);
        let default_rows = validate_in_range(default_rows, 10, 200, "PCTERM_DEFAULT_ROWS")?;

        Ok(Config {
            host,
            port,
            api_url,
            submit_timeout: Duration::from_millis(submit_timeout_ms),
            shutdown_grace: Duration::from_secs(grace_secs),
            theme,
            snake,
            default_cols,
            default_rows,
            log_file: args.log_file.or(file.log_file).unwrap_or(defaults.log_file),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Log the effective configuration
    pub fn print_summary(&self) {
        log::info!("pcterm configuration:");
        log::info!("  Bind: {}", self.bind_addr());
        log::info!("  API: {}", self.api_url);
        log::info!("  Submit timeout: {}ms", self.submit_timeout.as_millis());
        log::info!("  Shutdown grace: {}s", self.shutdown_grace.as_secs());
        log::info!("  Theme: {}", self.theme);
        log::info!("  Snake: {}", self.snake);
        log::info!("  Fallback geometry: {}x{}", self.default_cols, self.default_rows);
    }
}
