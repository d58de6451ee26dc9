use std::io;

use thiserror::Error;

/// Library-wide error type for prompt control operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Caller input is missing or outside the legal set.
    #[error("Invalid {field}: {value}. Must be one of: {expected}")]
    Validation { field: &'static str, value: String, expected: String },

    /// Deployment or policy configuration defect.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A policy document carries a key that does not map to any layer.
    #[error("Unknown policy key '{0}'")]
    UnknownPolicyKey(String),

    /// The context template failed to render.
    #[error("Failed to render template {template}: {reason}")]
    TemplateRender { template: String, reason: String },

    /// An assembled prompt failed its pre-send validation gate.
    #[error("Assembled prompt failed validation: {0}")]
    UnsafePrompt(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Missing required request field.
    pub fn missing(field: &'static str, expected: impl Into<String>) -> Self {
        AppError::Validation { field, value: "<missing>".to_string(), expected: expected.into() }
    }

    pub fn parse_error(what: impl Into<String>, details: impl ToString) -> Self {
        AppError::ParseError { what: what.into(), details: details.to_string() }
    }

    /// Name of the offending request field for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AppError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping errors to exit codes.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Validation { .. }
            | AppError::ParseError { .. }
            | AppError::TomlParseError(_)
            | AppError::UnsafePrompt(_) => io::ErrorKind::InvalidInput,
            AppError::Configuration(_)
            | AppError::UnknownPolicyKey(_)
            | AppError::TemplateRender { .. } => io::ErrorKind::InvalidData,
        }
    }
}
