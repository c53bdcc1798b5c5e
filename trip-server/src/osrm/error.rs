//! Routing client error types.

use std::fmt;

use crate::polyline::DecodeError;

/// Errors from fetching a single route.
///
/// These never reach the caller of route planning: the route provider
/// answers any of them with a straight-line estimate instead.
#[derive(Debug)]
pub enum RouteFetchError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Service answered but found no route between the points
    NoRoute { code: String, message: String },

    /// Rate limited by the API
    RateLimited,

    /// Returned geometry could not be decoded
    Decode(DecodeError),

    /// Live routing is not configured (offline deployment)
    NotConfigured(String),
}

impl fmt::Display for RouteFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteFetchError::Http(e) => write!(f, "HTTP error: {e}"),
            RouteFetchError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            RouteFetchError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            RouteFetchError::NoRoute { code, message } => {
                write!(f, "no route found ({code})")?;
                if !message.is_empty() {
                    write!(f, ": {message}")?;
                }
                Ok(())
            }
            RouteFetchError::RateLimited => write!(f, "rate limited by routing service"),
            RouteFetchError::Decode(e) => write!(f, "geometry decode error: {e}"),
            RouteFetchError::NotConfigured(msg) => write!(f, "not configured: {msg}"),
        }
    }
}

impl std::error::Error for RouteFetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouteFetchError::Http(e) => Some(e),
            RouteFetchError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RouteFetchError {
    fn from(err: reqwest::Error) -> Self {
        RouteFetchError::Http(err)
    }
}

impl From<DecodeError> for RouteFetchError {
    fn from(err: DecodeError) -> Self {
        RouteFetchError::Decode(err)
    }
}
