// Sanitization errors

use thiserror::Error;

/// Broad category of a sanitization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed email, URL or file name structure
    InvalidFormat,
    /// Disallowed protocol, domain, extension or tag
    PolicyViolation,
    /// Too short or too long
    LengthViolation,
    /// Path escape attempt
    TraversalDetected,
    /// A caller-supplied hook declined the input
    HookRejection,
}

/// Error returned by the fallible sanitizers.
///
/// Every failure is terminal for the call that produced it: no partial
/// result is ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid characters in domain: {0}")]
    InvalidDomain(String),

    #[error("protocol not allowed: {0}")]
    DisallowedProtocol(String),

    #[error("failed to decode query parameter: {0}")]
    QueryDecode(String),

    #[error("input too short: {actual} characters, minimum is {min}")]
    TooShort { min: usize, actual: usize },

    #[error("input too long: {actual} bytes, maximum is {max}")]
    TooLong { max: usize, actual: usize },

    #[error("email must contain '@' after the first character")]
    MissingAt,

    #[error("invalid local part: {0}")]
    InvalidLocalPart(String),

    #[error("file name must contain an extension")]
    MissingExtension,

    #[error("directory traversal detected")]
    TraversalDetected,

    #[error("invalid characters after sanitization: {0}")]
    InvalidCharacters(String),

    #[error("rejected by hook: {0}")]
    HookRejected(String),
}

impl SanitizeError {
    /// Build the error a hook returns to decline its input
    pub fn hook(message: impl Into<String>) -> Self {
        Self::HookRejected(message.into())
    }

    /// Map this error onto its broad category
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl(_)
            | Self::QueryDecode(_)
            | Self::MissingAt
            | Self::InvalidLocalPart(_)
            | Self::MissingExtension
            | Self::InvalidCharacters(_) => ErrorKind::InvalidFormat,
            Self::InvalidDomain(_) | Self::DisallowedProtocol(_) => ErrorKind::PolicyViolation,
            Self::TooShort { .. } | Self::TooLong { .. } => ErrorKind::LengthViolation,
            Self::TraversalDetected => ErrorKind::TraversalDetected,
            Self::HookRejected(_) => ErrorKind::HookRejection,
        }
    }
}

pub type Result<T> = std::result::Result<T, SanitizeError>;
