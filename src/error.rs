//! Error handling for the lead store

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Error body returned by PostgREST when a request is rejected
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiErrorDetails {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl fmt::Display for ApiErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(code) = &self.code {
            parts.push(format!("Code: {}", code));
        }
        if let Some(message) = &self.message {
            parts.push(format!("Message: {}", message));
        }
        if let Some(details) = &self.details {
            parts.push(format!("Details: {}", details));
        }
        if let Some(hint) = &self.hint {
            parts.push(format!("Hint: {}", hint));
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// Failure of a list, insert, update or delete against the lead store.
///
/// Network, auth and backend-side validation failures all land here; callers
/// only ever look at [`StoreError::message`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The backend answered with a structured error body
    #[error("API error: {details} (Status: {status})")]
    Api {
        details: ApiErrorDetails,
        status: StatusCode,
    },

    /// The backend answered with an error body that is not PostgREST JSON
    #[error("API error (unparsed): {message} (Status: {status})")]
    UnparsedApi { message: String, status: StatusCode },

    /// General errors
    #[error("{0}")]
    General(String),
}

impl StoreError {
    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        StoreError::General(msg.to_string())
    }

    /// Build the error for a non-success response from its status and body
    pub(crate) fn from_response(status: StatusCode, body: String) -> Self {
        match serde_json::from_str::<ApiErrorDetails>(&body) {
            Ok(details) => StoreError::Api { details, status },
            Err(_) => StoreError::UnparsedApi {
                message: body,
                status,
            },
        }
    }

    /// The text shown to the user when a mutation fails
    pub fn message(&self) -> String {
        match self {
            StoreError::Api { details, status } => match &details.message {
                Some(message) => message.clone(),
                None if details.code.is_some() || details.details.is_some() => {
                    details.to_string()
                }
                None => format!("Request failed with status {}", status),
            },
            StoreError::UnparsedApi { message, status } if message.trim().is_empty() => {
                format!("Request failed with status {}", status)
            }
            StoreError::UnparsedApi { message, .. } => message.clone(),
            StoreError::General(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
