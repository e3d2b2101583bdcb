//! Error types and handling for the `SkySense` backend

use thiserror::Error;

/// Main error type for the `SkySense` backend
#[derive(Error, Debug)]
pub enum SkySenseError {
    /// Missing or malformed location query
    #[error("{message}")]
    BadRequest { message: String },

    /// A city name matched no geocoding results
    #[error("{message}")]
    NotFound { message: String },

    /// Non-2xx response or transport failure from the weather provider
    #[error("{message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// Device position could not be determined
    #[error("Geolocation unavailable: {message}")]
    GeolocationUnavailable { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl SkySenseError {
    /// Create a new bad request error
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a new not found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an upstream error carrying the provider's status code
    pub fn upstream<S: Into<String>>(status: Option<u16>, message: S) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Create a new geolocation error
    pub fn geolocation<S: Into<String>>(message: S) -> Self {
        Self::GeolocationUnavailable {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status this error should be reported with
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            SkySenseError::BadRequest { .. } => 400,
            SkySenseError::NotFound { .. } => 404,
            SkySenseError::Upstream { status, .. } => status.unwrap_or(500),
            _ => 500,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SkySenseError::BadRequest { message }
            | SkySenseError::NotFound { message }
            | SkySenseError::Upstream { message, .. } => message.clone(),
            SkySenseError::GeolocationUnavailable { .. } => {
                "Unable to determine your location.".to_string()
            }
            SkySenseError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SkySenseError::bad_request("City or Coordinates required");
        assert!(matches!(err, SkySenseError::BadRequest { .. }));

        let err = SkySenseError::not_found("City not found");
        assert!(matches!(err, SkySenseError::NotFound { .. }));

        let err = SkySenseError::upstream(Some(401), "Invalid API key");
        assert!(matches!(
            err,
            SkySenseError::Upstream {
                status: Some(401),
                ..
            }
        ));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(SkySenseError::bad_request("x").status_code(), 400);
        assert_eq!(SkySenseError::not_found("x").status_code(), 404);
        assert_eq!(SkySenseError::upstream(Some(429), "x").status_code(), 429);
        assert_eq!(SkySenseError::upstream(None, "x").status_code(), 500);
        assert_eq!(SkySenseError::config("x").status_code(), 500);
    }

    #[test]
    fn test_user_messages() {
        let err = SkySenseError::upstream(Some(401), "Invalid API key");
        assert_eq!(err.user_message(), "Invalid API key");

        let err = SkySenseError::config("missing key");
        assert!(err.user_message().contains("Configuration error"));
    }
}
