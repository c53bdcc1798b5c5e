//! Place search error types.

/// Errors that can occur when querying the place search service.
///
/// The geocoder logs these and answers with an empty suggestion list;
/// they never reach the caller of `Geocoder::search`.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A result's latitude or longitude is not a valid coordinate
    #[error("result {label:?} has invalid position ({lat}, {lon})")]
    InvalidPosition {
        label: String,
        lat: String,
        lon: String,
    },

    /// Client could not be configured
    #[error("invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodeError::Api {
            status: 503,
            message: "busy".into(),
        };
        assert_eq!(err.to_string(), "API error 503: busy");

        let err = GeocodeError::InvalidPosition {
            label: "Nowhere".into(),
            lat: "north".into(),
            lon: "0".into(),
        };
        assert_eq!(
            err.to_string(),
            "result \"Nowhere\" has invalid position (north, 0)"
        );
    }
}
