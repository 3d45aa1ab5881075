use thiserror::Error;

/// Failures of a single HTTP exchange, before any body is interpreted
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Failed to build request: {0}")]
    Request(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Errors of the upload/import controller.
///
/// Each one has already been reflected in the status message by the time it
/// is returned; callers only need it for logging or tests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// Detected before any request is made
    #[error("Validation error: {0}")]
    Validation(String),

    /// The same call is already in flight
    #[error("Request already in progress")]
    Busy,

    /// Non-success status with a (possibly defaulted) server message
    #[error("Request failed with status {status}: {message}")]
    RequestFailure { status: u16, message: String },

    /// Connection failure or a body that could not be read or parsed
    #[error("Network error: {0}")]
    Network(String),
}

impl ControllerError {
    pub fn no_file_selected() -> Self {
        Self::Validation("no file selected".to_string())
    }
}

impl From<TransportError> for ControllerError {
    fn from(err: TransportError) -> Self {
        Self::Network(err.to_string())
    }
}
