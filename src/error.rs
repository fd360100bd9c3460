//! Error types for the medication registry.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur during registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid request payload: {0}")]
    MalformedInput(String),

    #[error("Missing medication {0}")]
    MissingParameter(&'static str),

    #[error("Medication already exists: {0}")]
    AlreadyExists(String),

    #[error("Medication not found: {0}")]
    NotFound(String),
}

impl RegistryError {
    /// HTTP status reported to the client for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MalformedInput(_) | Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
