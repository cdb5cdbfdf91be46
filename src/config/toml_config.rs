use crate::domain::model::{ExportFormat, SeedRecord};
use crate::utils::error::{RosterError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MIN_CHART_WIDTH: usize = 10;
pub const MAX_CHART_WIDTH: usize = 120;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    pub roster: Option<RosterSection>,
    pub display: Option<DisplayConfig>,
    pub export: Option<ExportConfig>,
    /// Replaces the built-in sample roster when present.
    pub seed: Option<Vec<SeedRecord>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSection {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub chart_width: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub format: Option<String>,
    pub default_path: Option<String>,
}

impl RosterConfig {
    /// Loads and parses a TOML config file. Call `validate` afterwards.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RosterError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        let config: Self = toml::from_str(&processed_content)?;
        Ok(config)
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RosterError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn title(&self) -> Option<&str> {
        self.roster.as_ref().map(|r| r.title.as_str())
    }

    pub fn chart_width(&self) -> Option<usize> {
        self.display.as_ref().and_then(|d| d.chart_width)
    }

    pub fn export_format(&self) -> Option<ExportFormat> {
        self.export
            .as_ref()
            .and_then(|e| e.format.as_deref())
            .and_then(|f| f.parse().ok())
    }

    pub fn default_export_path(&self) -> Option<&str> {
        self.export.as_ref().and_then(|e| e.default_path.as_deref())
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        if let Some(title) = self.title() {
            validate_non_empty_string("roster.title", title)?;
        }

        if let Some(width) = self.chart_width() {
            validate_range("display.chart_width", width, MIN_CHART_WIDTH, MAX_CHART_WIDTH)?;
        }

        if let Some(export) = &self.export {
            if let Some(format) = &export.format {
                format.parse::<ExportFormat>()?;
            }
            if let Some(path) = &export.default_path {
                validate_path("export.default_path", path)?;
            }
        }

        if let Some(seed) = &self.seed {
            for (i, record) in seed.iter().enumerate() {
                validate_non_empty_string(&format!("seed[{}].name", i), &record.name)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Size;

    #[test]
    fn test_parse_full_config() {
        let config = RosterConfig::from_toml_str(
            r#"
[roster]
title = "1소대 현황"

[display]
chart_width = 30

[export]
format = "json"

[[seed]]
name = "홍길동"
hat_size = "XL"
cloth_size = "XXL"
allergies = ["곡류: 밀"]

[[seed]]
name = "강감찬"
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.title(), Some("1소대 현황"));
        assert_eq!(config.chart_width(), Some(30));
        assert_eq!(config.export_format(), Some(ExportFormat::Json));

        let seed = config.seed.unwrap();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].hat_size, Size::XL);
        assert_eq!(seed[1].hat_size, Size::M);
        assert_eq!(seed[1].cloth_size, Size::L);
        assert!(seed[1].allergies.is_empty());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = RosterConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validation_failures() {
        let config = RosterConfig::from_toml_str("[display]\nchart_width = 500\n").unwrap();
        assert!(config.validate().is_err());

        let config = RosterConfig::from_toml_str("[export]\nformat = \"xlsx\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = RosterConfig::from_toml_str("[[seed]]\nname = \"  \"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_format_is_case_insensitive() {
        let config = RosterConfig::from_toml_str("[export]\nformat = \"JSON\"\n").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.export_format(), Some(ExportFormat::Json));
    }

    #[test]
    fn test_unknown_size_is_a_parse_error() {
        let result = RosterConfig::from_toml_str("[[seed]]\nname = \"홍길동\"\nhat_size = \"XS\"\n");
        assert!(matches!(result, Err(RosterError::TomlError(_))));
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("SMALL_ROSTER_TEST_TITLE", "2소대");
        let config =
            RosterConfig::from_toml_str("[roster]\ntitle = \"${SMALL_ROSTER_TEST_TITLE}\"\n").unwrap();
        assert_eq!(config.title(), Some("2소대"));

        let config =
            RosterConfig::from_toml_str("[roster]\ntitle = \"${SMALL_ROSTER_UNSET_VAR}\"\n").unwrap();
        assert_eq!(config.title(), Some("${SMALL_ROSTER_UNSET_VAR}"));
    }
}
