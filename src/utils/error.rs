use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Record not found: {target}")]
    NotFoundError { target: String },

    #[error("Unknown size '{value}', expected one of S, M, L, XL, XXL, XXXL")]
    UnknownSizeError { value: String },

    #[error("Invalid command: {message}")]
    CommandError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RosterError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(target: impl Into<String>) -> Self {
        Self::NotFoundError {
            target: target.into(),
        }
    }

    pub fn command(message: impl Into<String>) -> Self {
        Self::CommandError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. }
            | Self::NotFoundError { .. }
            | Self::UnknownSizeError { .. }
            | Self::CommandError { .. } => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::TomlError(_) => ErrorCategory::Configuration,
            Self::CsvError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::Export
            }
        }
    }

    /// Input errors never change state, so they are always recoverable.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Export => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::High
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { field, .. } if field == "name" => {
                "이름을 입력해주세요.".to_string()
            }
            Self::ValidationError { message, .. } => message.clone(),
            Self::NotFoundError { target } => format!("{} 항목을 찾을 수 없습니다.", target),
            Self::UnknownSizeError { value } => format!("알 수 없는 사이즈입니다: {}", value),
            Self::CommandError { message } => message.clone(),
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } | Self::TomlError(_) => {
                format!("설정 파일을 확인해주세요: {}", self)
            }
            Self::CsvError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                format!("내보내기에 실패했습니다: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { field, .. } if field == "name" => {
                "Enter a non-empty name and try again"
            }
            Self::ValidationError { .. } => "Enter a valid value and try again",
            Self::NotFoundError { .. } => "Run `list` to see the current row numbers",
            Self::UnknownSizeError { .. } => "Use one of S, M, L, XL, XXL, XXXL",
            Self::CommandError { .. } => "Run `help` to see the available commands",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check the values in the configuration file"
            }
            Self::TomlError(_) => "Make sure the configuration file is valid TOML",
            Self::CsvError(_) | Self::SerializationError(_) => {
                "Try exporting to a different format"
            }
            Self::IoError(_) => "Check that the target directory exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_recoverable() {
        let err = RosterError::validation("name", "Name cannot be empty");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.is_recoverable());
        assert_eq!(err.user_friendly_message(), "이름을 입력해주세요.");

        let err = RosterError::not_found("row 7");
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_config_errors_are_fatal() {
        let err = RosterError::ConfigError {
            message: "missing".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(!err.is_recoverable());
    }
}
