use reqwest::StatusCode;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Validation errors for generated test data
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database operation errors (including duplicate keys)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration errors
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Upstream API answered with a non-success status
    #[error("Upstream error: {endpoint} returned HTTP {status}: {body}")]
    Upstream {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    /// Upstream API answered with a body that does not match the expected shape
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// No authentication token could be obtained
    #[error("Authentication token not available: {0}")]
    AuthUnavailable(String),

    /// A bounded wait ran out of attempts
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        AppError::MalformedPayload(msg.into())
    }

    pub fn auth_unavailable(msg: impl Into<String>) -> Self {
        AppError::AuthUnavailable(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// True when the upstream rejected the request with the given status
    pub fn is_upstream_status(&self, expected: StatusCode) -> bool {
        matches!(self, AppError::Upstream { status, .. } if *status == expected)
    }
}
