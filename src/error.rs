//! Error types for the Zscaler MCP Server
//!
//! This module defines the error hierarchy for all operations in the server.

use thiserror::Error;

/// Main error type for the Zscaler MCP Server
#[derive(Error, Debug)]
pub enum ZiaMcpError {
    /// Authentication errors (OneAPI or legacy session)
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// ZIA API errors
    #[error("ZIA API error: {0}")]
    Zia(#[from] ZiaApiError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// MCP protocol errors
    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing {mode} credentials: set {vars}")]
    MissingCredentials { mode: String, vars: String },

    #[error("Token request failed: {message}")]
    TokenRequestFailed { message: String },

    #[error("Legacy session login failed: {message}")]
    SessionLoginFailed { message: String },

    #[error("Legacy login response did not set a JSESSIONID cookie")]
    MissingSessionCookie,

    #[error("Invalid API key: {message}")]
    InvalidApiKey { message: String },
}

/// ZIA API errors
#[derive(Error, Debug)]
pub enum ZiaApiError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Rate limited: retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    #[error("API request failed: {message}")]
    RequestFailed { message: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found: {path}")]
    DirNotFound { path: String },

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },

    #[error("Failed to read env file {path}: line {line}: {message}")]
    EnvFile {
        path: String,
        line: usize,
        message: String,
    },

    #[error("Invalid client config file {path}: {message}")]
    InvalidClientConfig { path: String, message: String },
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid parameter: {name} - {message}")]
    InvalidParameter { name: String, message: String },
}

impl ValidationError {
    /// Shorthand for a missing/empty required field
    pub fn missing(field: impl Into<String>) -> Self {
        ValidationError::MissingField {
            field: field.into(),
        }
    }

    /// Shorthand for an invalid parameter value
    pub fn invalid(name: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// MCP protocol errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Invalid tool arguments: {message}")]
    InvalidArguments { message: String },

    #[error("Write tool '{name}' is disabled; start the server with --enable-write-tools")]
    WriteToolDisabled { name: String },

    #[error("Write tool '{name}' is not in the --write-tools allowlist")]
    WriteToolNotAllowed { name: String },
}

/// Result type alias for Zscaler MCP operations
pub type Result<T> = std::result::Result<T, ZiaMcpError>;

impl From<validator::ValidationErrors> for ZiaMcpError {
    fn from(errs: validator::ValidationErrors) -> Self {
        let (name, message) = errs
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, list)| {
                let message = list
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| list.first().map(|e| e.code.to_string()).unwrap_or_default());
                (field.to_string(), message)
            })
            .unwrap_or_else(|| ("arguments".to_string(), errs.to_string()));

        ZiaMcpError::Validation(ValidationError::InvalidParameter { name, message })
    }
}
