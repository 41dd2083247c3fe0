//! Error types for the todo client.
//!
//! # Design
//! `ApiError` describes why a single request failed and is what the `parse_*`
//! methods return. Status codes are not interpreted beyond "2xx or not".
//!
//! `AppError` is what the controller stores in its single error slot. Its
//! `Display` is the message shown to the user; the underlying `ApiError` is
//! kept as the `source()` for logging.

use thiserror::Error;

/// Errors returned by `TodoClient` build/parse methods or reported by the host.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (connection refused, reset, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialize(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialize(String),
}

/// The latest user-visible failure.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("title is required")]
    TitleRequired,

    #[error("failed to load todos")]
    Load(#[source] ApiError),

    #[error("failed to save todo")]
    Save(#[source] ApiError),

    #[error("failed to toggle todo")]
    Toggle(#[source] ApiError),

    #[error("failed to delete todo")]
    Delete(#[source] ApiError),
}

impl AppError {
    /// The request failure behind this error, if any.
    pub fn cause(&self) -> Option<&ApiError> {
        match self {
            AppError::TitleRequired => None,
            AppError::Load(e) | AppError::Save(e) | AppError::Toggle(e) | AppError::Delete(e) => {
                Some(e)
            }
        }
    }
}
