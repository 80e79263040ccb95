//! Connection error types

use thiserror::Error;

/// Errors raised while building a connection or executing a request
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid constructor or request argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// HTTP error with status code
    #[error("HTTP error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },
    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),
    /// Request timeout
    #[error("Request timeout")]
    Timeout,
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Proxy error
    #[error("Proxy error: {0}")]
    Proxy(String),
    /// Client build error
    #[error("Client build error: {0}")]
    Build(String),
    /// Other error
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_builder() {
            Error::Build(err.to_string())
        } else if err.is_connect() {
            Error::Connection(err.to_string())
        } else if err.is_decode() {
            Error::Serialization(err.to_string())
        } else if let Some(status) = err.status() {
            Error::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            Error::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidArgument(format!("Invalid url: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let error = Error::InvalidArgument("url is required".to_string());
        assert_eq!(format!("{}", error), "Invalid argument: url is required");
    }

    #[test]
    fn test_status_display() {
        let error = Error::Status {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(format!("{}", error), "HTTP error (404): Not Found");
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(format!("{}", Error::Timeout), "Request timeout");
    }

    #[test]
    fn test_proxy_display() {
        let error = Error::Proxy("proxy unreachable".to_string());
        assert_eq!(format!("{}", error), "Proxy error: proxy unreachable");
    }

    #[test]
    fn test_from_serde_json_error() {
        let result: Result<String, _> = serde_json::from_str("not valid json");
        let json_error = result.expect_err("Invalid JSON should produce an error");
        let error: Error = json_error.into();

        match error {
            Error::Serialization(msg) => {
                assert!(
                    msg.contains("expected"),
                    "Error message should describe JSON error"
                );
            }
            _ => panic!("Expected Error::Serialization"),
        }
    }

    #[test]
    fn test_from_url_parse_error() {
        let parse_error = url::Url::parse("not a url").expect_err("Should not parse");
        let error: Error = parse_error.into();
        assert!(matches!(error, Error::InvalidArgument(msg) if msg.starts_with("Invalid url")));
    }
}
