//! Error types for port operations.

/// Failures of a single question-generation call.
///
/// Each variant is a distinct diagnostic kind. The orchestrator collapses the
/// last three into one user-facing message, but they are logged separately.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// No usable credential was configured; no request was sent.
    #[error("Generation credential is not configured")]
    MissingCredential,

    /// Connection-level failure (DNS, refused, reset, timeout).
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// The provider answered with a non-success status.
    #[error("Provider returned HTTP {status}: {body}")]
    HttpStatusFailure { status: u16, body: String },

    /// Success status, but the body was unparsable or had no usable choice.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    pub fn transport(message: impl ToString) -> Self {
        Self::TransportFailure(message.to_string())
    }

    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatusFailure {
            status,
            body: body.into(),
        }
    }

    pub fn malformed(message: impl ToString) -> Self {
        Self::MalformedResponse(message.to_string())
    }

    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::TransportFailure(_) => "transport_failure",
            Self::HttpStatusFailure { .. } => "http_status_failure",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// Persistence failures. Never surfaced to players, only logged.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Backing store could not be read or written.
    #[error("Storage unavailable during {operation}: {message}")]
    Unavailable {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StorageError {
    pub fn unavailable(operation: &'static str, message: impl ToString) -> Self {
        Self::Unavailable {
            operation,
            message: message.to_string(),
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}
