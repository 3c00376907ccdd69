//! Error types for tollgate.
//!
//! This module provides a unified error type with explicit variants for
//! storage, authentication, transport, protocol, and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for tollgate operations.
///
/// The route guard and the request interceptor never produce one of these;
/// they resolve to a safe default instead. Everything else propagates.
#[derive(Debug, Error)]
pub enum Error {
    /// Session store medium errors (unavailable, quota exceeded, IO).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication errors raised by user directories.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-success responses from a backend.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (route paths, URLs, usernames).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Session store errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The medium refused the operation (disabled, poisoned, read-only).
    #[error("storage unavailable: {message}")]
    Unavailable { message: String },

    /// The medium has no room for the value.
    #[error("storage quota exceeded for key '{key}'")]
    QuotaExceeded { key: String },

    /// Underlying IO failure.
    #[error("IO error: {message}")]
    Io { message: String },

    /// A value could not be serialized for writing.
    #[error("failed to serialize value: {message}")]
    Serialize { message: String },
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io {
            message: err.to_string(),
        }
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The username is already registered with the directory.
    #[error("username '{username}' is already taken")]
    UsernameTaken { username: String },

    /// The directory could not verify a password hash.
    #[error("password verification failed: {message}")]
    Verification { message: String },
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The request could not be built.
    #[error("invalid request: {message}")]
    Request { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-success response from a backend.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Response body, if it was readable text.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if the backend rejected the credentials on the request.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid route path.
    #[error("invalid route path '{value}': {reason}")]
    RoutePath { value: String, reason: String },

    /// Invalid route pattern in a classification table.
    #[error("invalid route pattern '{value}': {reason}")]
    RoutePattern { value: String, reason: String },

    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid origin.
    #[error("invalid origin '{value}': {reason}")]
    Origin { value: String, reason: String },

    /// Invalid username.
    #[error("invalid username '{value}': {reason}")]
    Username { value: String, reason: String },

    /// Invalid user identifier.
    #[error("invalid user id '{value}': {reason}")]
    UserId { value: String, reason: String },

    /// Invalid storage key.
    #[error("invalid storage key '{value}': {reason}")]
    StorageKey { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
