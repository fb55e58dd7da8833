//! Command line configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::record::Portfolio;
use crate::stats::DEFAULT_ASSUMED_YEAR;

/// Owner name used when neither the command line nor the data file sets one.
const DEFAULT_OWNER: &str = "portfolio";

/// Command line configuration for ctfolio.
#[derive(Debug, Clone, Parser)]
#[command(name = "ctfolio", version, about, long_about = None)]
pub struct Config {
    /// Portfolio data file
    #[arg(default_value = "portfolio.toml")]
    pub data: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Directory write-up paths are relative to (defaults to the data file's directory)
    #[arg(long)]
    pub content_root: Option<PathBuf>,

    /// Portfolio owner (overrides the data file)
    #[arg(long)]
    pub owner: Option<String>,

    /// Year for challenge dates written without one
    #[arg(
        long,
        default_value_t = DEFAULT_ASSUMED_YEAR,
        value_parser = clap::value_parser!(i32).range(1000..=9999)
    )]
    pub assumed_year: i32,

    /// Syntax highlighting theme (InspiredGitHub, base16-ocean.dark, etc.)
    #[arg(long, default_value = "InspiredGitHub")]
    pub theme: String,

    /// Do not open the generated index in a browser
    #[arg(long)]
    pub no_open: bool,

    /// Log debug details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Log warnings and errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Configuration with defaults for the given data file.
    pub fn for_data(data: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            data: data.into(),
            output: output.into(),
            content_root: None,
            owner: None,
            assumed_year: DEFAULT_ASSUMED_YEAR,
            theme: "InspiredGitHub".to_string(),
            no_open: true,
            verbose: false,
            quiet: false,
        }
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the data file or an explicit content root does not exist.
    pub fn validate(&self) -> Result<()> {
        if !self.data.is_file() {
            bail!("Data file does not exist: {}", self.data.display());
        }

        if let Some(root) = &self.content_root
            && !root.is_dir()
        {
            bail!("Content root does not exist: {}", root.display());
        }

        Ok(())
    }

    /// Returns content root from configuration or the data file's directory.
    pub fn content_root(&self) -> PathBuf {
        if let Some(root) = &self.content_root {
            return root.clone();
        }

        match self.data.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        }
    }

    /// Returns owner name from configuration, the data file, or the default.
    pub fn owner_name(&self, portfolio: &Portfolio) -> String {
        self.owner
            .as_deref()
            .or(portfolio.owner.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_OWNER)
            .to_string()
    }

    /// Log filter from `RUST_LOG` directives, or the command line level.
    ///
    /// Directives that are empty or fail to parse fall back to
    /// [`Config::log_level`].
    pub fn log_filter(&self, directives: Option<&str>) -> EnvFilter {
        directives
            .map(str::trim)
            .filter(|dirs| !dirs.is_empty())
            .and_then(|dirs| EnvFilter::try_new(dirs).ok())
            .unwrap_or_else(|| EnvFilter::default().add_directive(self.log_level().into()))
    }

    /// Maximum log level selected by `--verbose` and `--quiet`.
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_parse_defaults() {
        // Arrange & Act
        let config = Config::try_parse_from(["ctfolio"]).expect("Should parse");

        // Assert
        assert_eq!(config.data, PathBuf::from("portfolio.toml"));
        assert_eq!(config.output, PathBuf::from("dist"));
        assert_eq!(config.assumed_year, 2025);
        assert_eq!(config.theme, "InspiredGitHub");
        assert!(!config.no_open);
        assert_eq!(config.log_level(), Level::INFO);
    }

    #[test]
    fn test_parse_all_options() {
        let config = Config::try_parse_from([
            "ctfolio",
            "data/site.toml",
            "-o",
            "public",
            "--content-root",
            "notes",
            "--owner",
            "alice",
            "--assumed-year",
            "2023",
            "--no-open",
            "-v",
        ])
        .expect("Should parse");

        assert_eq!(config.data, PathBuf::from("data/site.toml"));
        assert_eq!(config.output, PathBuf::from("public"));
        assert_eq!(config.content_root(), PathBuf::from("notes"));
        assert_eq!(config.assumed_year, 2023);
        assert!(config.no_open);
        assert_eq!(config.log_level(), Level::DEBUG);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = Config::try_parse_from(["ctfolio", "-v", "-q"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_log_level() {
        let config = Config::try_parse_from(["ctfolio", "--quiet"]).expect("Should parse");

        assert_eq!(config.log_level(), Level::WARN);
    }

    #[test]
    fn test_log_filter_uses_command_line_level() {
        // Arrange
        let config = Config::try_parse_from(["ctfolio", "-v"]).expect("Should parse");

        // Act & Assert
        assert_eq!(config.log_filter(None).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(config.log_filter(Some("  ")).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_log_filter_prefers_directives() {
        let config = Config::try_parse_from(["ctfolio", "-v"]).expect("Should parse");

        let filter = config.log_filter(Some("warn"));

        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_log_filter_ignores_invalid_directives() {
        let config = Config::try_parse_from(["ctfolio", "--quiet"]).expect("Should parse");

        let filter = config.log_filter(Some("ctfolio=notalevel"));

        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_assumed_year_range() {
        for year in ["99", "999", "10000", "-2024"] {
            let result = Config::try_parse_from(["ctfolio", "--assumed-year", year]);
            assert!(result.is_err(), "Year {} should be rejected", year);
        }

        let config = Config::try_parse_from(["ctfolio", "--assumed-year", "1000"])
            .expect("Should accept lowest four digit year");
        assert_eq!(config.assumed_year, 1000);
        let config = Config::try_parse_from(["ctfolio", "--assumed-year", "9999"])
            .expect("Should accept highest four digit year");
        assert_eq!(config.assumed_year, 9999);
    }

    #[test]
    fn test_content_root_defaults_to_data_dir() {
        assert_eq!(
            Config::for_data("site/portfolio.toml", "dist").content_root(),
            PathBuf::from("site")
        );
        assert_eq!(
            Config::for_data("portfolio.toml", "dist").content_root(),
            PathBuf::from(".")
        );
    }

    #[test]
    fn test_validate_missing_data_file() {
        // Arrange
        let dir = TempDir::new().expect("Should create temp dir");
        let config = Config::for_data(dir.path().join("missing.toml"), dir.path().join("dist"));

        // Act
        let result = config.validate();

        // Assert
        let err = result.expect_err("Missing data file should fail");
        assert!(err.to_string().contains("Data file does not exist"));
    }

    #[test]
    fn test_validate_existing_data_file() {
        let dir = TempDir::new().expect("Should create temp dir");
        let data = dir.path().join("portfolio.toml");
        std::fs::write(&data, "").expect("Should write data file");

        let config = Config::for_data(&data, dir.path().join("dist"));

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_owner_name_precedence() {
        // Arrange
        let mut portfolio = Portfolio::default();
        let mut config = Config::for_data("portfolio.toml", "dist");

        // Act & Assert
        assert_eq!(config.owner_name(&portfolio), "portfolio");

        portfolio.owner = Some("forrof".to_string());
        assert_eq!(config.owner_name(&portfolio), "forrof");

        config.owner = Some("alice".to_string());
        assert_eq!(config.owner_name(&portfolio), "alice");
    }
}
