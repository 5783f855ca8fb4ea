use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Form field '{field}' is missing")]
    MissingField { field: String },

    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    #[error("Station update rejected: {reason}")]
    UpdateRejected { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a command that failed at this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl SiteError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SiteError::ApiError(_)
            | SiteError::MalformedResponse { .. }
            | SiteError::UpdateRejected { .. } => ErrorSeverity::Medium,
            SiteError::MissingField { .. } => ErrorSeverity::Low,
            SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::SerializationError(_) => ErrorSeverity::High,
            SiteError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Short message suitable for a terminal or an alert dialog.
    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::ApiError(e) if e.is_timeout() => {
                "The station service did not answer in time".to_string()
            }
            SiteError::ApiError(_) => "Could not reach the station service".to_string(),
            SiteError::MalformedResponse { .. } => {
                "The station service sent an unexpected reply".to_string()
            }
            SiteError::UpdateRejected { reason } => format!("Update refused: {}", reason),
            SiteError::MissingField { field } => format!("Please fill in '{}'", field),
            SiteError::ConfigValidationError { field, .. }
            | SiteError::InvalidConfigValueError { field, .. } => {
                format!("Check the '{}' setting", field)
            }
            SiteError::SerializationError(_) => "Could not encode the request".to_string(),
            SiteError::IoError(e) => format!("File access failed: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
