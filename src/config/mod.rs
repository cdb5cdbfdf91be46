pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::{sample_roster, ExportFormat, SeedRecord};
use toml_config::RosterConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_range, Validate};
#[cfg(feature = "cli")]
use toml_config::{MAX_CHART_WIDTH, MIN_CHART_WIDTH};

pub const DEFAULT_TITLE: &str = "군 장병 개인별 사이즈 및 알레르기 현황";
pub const DEFAULT_CHART_WIDTH: usize = 40;
pub const DEFAULT_EXPORT_PATH: &str = "roster.csv";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "small-roster")]
#[command(about = "Interactive roster of hat sizes, clothing sizes and food allergies")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Start with an empty roster instead of the sample records
    #[arg(long)]
    pub no_seed: bool,

    /// Width of the text charts in columns
    #[arg(long)]
    pub chart_width: Option<usize>,

    /// Export format used when the target path has no .csv/.json extension
    #[arg(long)]
    pub export_format: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(width) = self.chart_width {
            validate_range("--chart-width", width, MIN_CHART_WIDTH, MAX_CHART_WIDTH)?;
        }
        if let Some(format) = &self.export_format {
            format.parse::<ExportFormat>()?;
        }
        Ok(())
    }
}

/// Effective settings after layering command line flags over the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub title: String,
    pub chart_width: usize,
    pub export_format: ExportFormat,
    pub default_export_path: String,
    pub seed: Vec<SeedRecord>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            chart_width: DEFAULT_CHART_WIDTH,
            export_format: ExportFormat::Csv,
            default_export_path: DEFAULT_EXPORT_PATH.to_string(),
            seed: sample_roster(),
        }
    }
}

impl Settings {
    pub fn from_file_config(file: &RosterConfig) -> Self {
        let defaults = Self::default();
        Self {
            title: file.title().map(str::to_string).unwrap_or(defaults.title),
            chart_width: file.chart_width().unwrap_or(defaults.chart_width),
            export_format: file.export_format().unwrap_or(defaults.export_format),
            default_export_path: file
                .default_export_path()
                .map(str::to_string)
                .unwrap_or(defaults.default_export_path),
            seed: file.seed.clone().unwrap_or(defaults.seed),
        }
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig, file: Option<&RosterConfig>) -> Result<Self> {
        cli.validate()?;
        let mut settings = match file {
            Some(file) => {
                file.validate()?;
                Self::from_file_config(file)
            }
            None => Self::default(),
        };

        if let Some(width) = cli.chart_width {
            settings.chart_width = width;
        }
        if let Some(format) = &cli.export_format {
            settings.export_format = format.parse()?;
        }
        if cli.no_seed {
            settings.seed.clear();
        }
        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn title(&self) -> &str {
        &self.title
    }

    fn chart_width(&self) -> usize {
        self.chart_width
    }

    fn export_format(&self) -> ExportFormat {
        self.export_format
    }

    fn seed_records(&self) -> Vec<SeedRecord> {
        self.seed.clone()
    }
}
