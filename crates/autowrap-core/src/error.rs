//! Error handling for contract and wrapper generation
//!
//! Every error here signals a caller-side usage or configuration defect.
//! Nothing is retried internally; errors surface at the point of detection.

use thiserror::Error;

/// Main error type for generation operations
#[derive(Error, Debug)]
pub enum AutoWrapError {
    /// A required input was absent or empty
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument {
        argument: String,
        message: String,
    },

    /// A member cannot be translated into a declaration
    #[error("Unsupported member '{member}' on '{declaring_type}': {reason}")]
    UnsupportedMember {
        member: String,
        declaring_type: String,
        reason: String,
    },

    /// Lookup of an unregistered type or unknown name
    #[error("Not found: {what}")]
    NotFound {
        what: String,
    },

    /// A wrapper or contract name is blank, or already bound to another type
    #[error("Invalid generated name {name:?} for '{type_name}'")]
    InvalidName {
        type_name: String,
        name: String,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AutoWrapError {
    /// Create a new invalid argument error
    pub fn invalid_argument<A: Into<String>, M: Into<String>>(argument: A, message: M) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// Create a new unsupported member error
    pub fn unsupported_member<M, T, R>(member: M, declaring_type: T, reason: R) -> Self
    where
        M: Into<String>,
        T: Into<String>,
        R: Into<String>,
    {
        Self::UnsupportedMember {
            member: member.into(),
            declaring_type: declaring_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a new not found error
    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create a new invalid name error
    pub fn invalid_name<T: Into<String>, N: Into<String>>(type_name: T, name: N) -> Self {
        Self::InvalidName {
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            field: None,
        }
    }

    /// Create a configuration error tied to a specific field
    pub fn configuration_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Configuration {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Whether this error came from a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for generation operations
pub type AutoWrapResult<T> = Result<T, AutoWrapError>;

/// Returns true when the string is empty or only whitespace
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
