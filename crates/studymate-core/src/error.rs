//! Error types for the studymate client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, backend API, input validation and storage
//! errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for studymate operations.
///
/// This error type covers all possible failure modes in the client,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected credentials, expired session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Backend API errors (non-success responses).
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Input validation errors (invalid base URL, malformed generated content).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Token store errors (unreadable or unwritable session file).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login was rejected by the backend.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration was rejected by the backend (e.g. duplicate username).
    #[error("registration rejected: {message}")]
    RegistrationRejected { message: String },

    /// The persisted access token has expired; the session was cleared.
    #[error("session expired")]
    SessionExpired,

    /// The access token payload could not be decoded.
    ///
    /// The authorizer treats this the same as an expired token.
    #[error("malformed token: {reason}")]
    MalformedToken { reason: String },
}

/// A non-success response from the backend.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code (if present, e.g. `token_not_valid`).
    pub code: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, code: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    /// Check if this response indicates a rejected or missing credential.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
            || self.code.as_deref() == Some("token_not_valid")
            || self.code.as_deref() == Some("authentication_failed")
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL format.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Generated quiz/flashcard payload did not parse.
    #[error("malformed generated content: {reason}")]
    GeneratedContent { reason: String },

    /// Quiz submission attempted with unanswered questions.
    #[error("quiz incomplete: {answered}/{total} questions answered")]
    IncompleteQuiz { answered: usize, total: usize },
}

/// Token store failure.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StorageError {
    /// Description of the underlying failure.
    pub message: String,
}

impl StorageError {
    /// Create a new storage error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
