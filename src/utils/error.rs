use crate::domain::fault::{ProviderFault, Stage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{stage} failed for region '{region}'{}: {fault}", place_suffix(.place))]
    ProviderError {
        region: String,
        place: Option<String>,
        stage: Stage,
        fault: ProviderFault,
    },
}

fn place_suffix(place: &Option<String>) -> String {
    match place {
        Some(place) => format!(" at '{}'", place),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Provider,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScoutError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScoutError::HttpError(_) => ErrorCategory::Network,
            ScoutError::IoError(_) | ScoutError::SerializationError(_) => ErrorCategory::Storage,
            ScoutError::ConfigError { .. }
            | ScoutError::ConfigValidationError { .. }
            | ScoutError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ScoutError::ProviderError { .. } => ErrorCategory::Provider,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // provider outages are usually transient, a later run may succeed
            ScoutError::ProviderError { .. } | ScoutError::HttpError(_) => ErrorSeverity::Medium,
            ScoutError::ConfigError { .. }
            | ScoutError::ConfigValidationError { .. }
            | ScoutError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            ScoutError::IoError(_) | ScoutError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ScoutError::HttpError(_) => {
                "Check network connectivity and the provider endpoints".to_string()
            }
            ScoutError::IoError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            ScoutError::SerializationError(_) => {
                "The report could not be encoded as JSON; re-run with --verbose".to_string()
            }
            ScoutError::ConfigError { .. } | ScoutError::ConfigValidationError { .. } => {
                "Review the configuration file syntax".to_string()
            }
            ScoutError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}'", field)
            }
            ScoutError::ProviderError { stage, .. } => format!(
                "The {} provider is failing; retry later or run with --on-fault skip",
                stage
            ),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach a provider: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Provider => format!("Run aborted: {}", self),
            ErrorCategory::Storage => format!("Could not save the report: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
