//! Command-line and config-file settings.
//!
//! CLI flags override the TOML config file, which overrides defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Deserialize;

use super::client::DEFAULT_BASE_URL;
use crate::application::AppSettings;

#[derive(Parser, Debug, Default)]
#[command(name = "hrdash", about = "Terminal HR performance dashboard")]
pub struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base address of the employee API.
    #[arg(long, env = "HRDASH_BASE_URL")]
    pub base_url: Option<String>,

    /// Number of employees to request.
    #[arg(long, env = "HRDASH_PAGE_SIZE")]
    pub page_size: Option<usize>,

    /// Quiet period in milliseconds before search text is applied.
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Seed for synthesized departments, ratings and charts.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Per-request timeout in seconds (default: none).
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Shape of the optional TOML config file.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub page_size: Option<usize>,
    pub debounce_ms: Option<u64>,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub page_size: usize,
    pub debounce: Duration,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Reads the config file named by `cli` (if any) and merges it with the flags.
    pub fn load(cli: Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        Self::resolve(cli, file)
    }

    pub fn resolve(cli: Cli, file: ConfigFile) -> Result<Self> {
        let base_url = cli
            .base_url
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if base_url.trim().is_empty() {
            bail!("base URL must not be empty");
        }

        let page_size = cli.page_size.or(file.page_size).unwrap_or(20);
        if page_size == 0 {
            bail!("page size must be at least 1");
        }

        let debounce_ms = cli.debounce_ms.or(file.debounce_ms).unwrap_or(300);

        Ok(Self {
            base_url,
            page_size,
            debounce: Duration::from_millis(debounce_ms),
            seed: cli.seed.or(file.seed),
            log_file: cli.log_file.or(file.log_file),
            timeout: cli.timeout_secs.or(file.timeout_secs).map(Duration::from_secs),
        })
    }

    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            page_size: self.page_size,
            search_debounce: self.debounce,
            ..AppSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::resolve(Cli::default(), ConfigFile::default()).unwrap();
        assert_eq!(config.base_url, "https://dummyjson.com");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.seed, None);
        assert_eq!(config.timeout, None);
        assert_eq!(config.app_settings(), AppSettings::default());
    }

    #[test]
    fn test_cli_overrides_file() {
        let cli = Cli {
            page_size: Some(5),
            ..Cli::default()
        };
        let file = ConfigFile {
            base_url: Some("http://localhost:3000".to_string()),
            page_size: Some(50),
            seed: Some(9),
            ..ConfigFile::default()
        };
        let config = Config::resolve(cli, file).unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let cli = Cli {
            page_size: Some(0),
            ..Cli::default()
        };
        let err = Config::resolve(cli, ConfigFile::default()).unwrap_err();
        assert!(err.to_string().contains("page size"));
    }

    #[test]
    fn test_rejects_empty_base_url() {
        let file = ConfigFile {
            base_url: Some("  ".to_string()),
            ..ConfigFile::default()
        };
        assert!(Config::resolve(Cli::default(), file).is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://example.test\"").unwrap();
        writeln!(file, "debounce_ms = 150").unwrap();
        writeln!(file, "timeout_secs = 10").unwrap();

        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            ..Cli::default()
        };
        let config = Config::load(cli).unwrap();
        assert_eq!(config.base_url, "http://example.test");
        assert_eq!(config.debounce, Duration::from_millis(150));
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.app_settings().search_debounce, Duration::from_millis(150));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "colour = \"blue\"").unwrap();
        assert!(ConfigFile::load(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ConfigFile::load(Path::new("/nonexistent/hrdash.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/hrdash.toml"));
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from(["hrdash", "--page-size", "10", "--seed", "42"]).unwrap();
        assert_eq!(cli.page_size, Some(10));
        assert_eq!(cli.seed, Some(42));
    }
}
