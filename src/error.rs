//! Error types for client configuration and request resolution.
//!
//! Configuration problems (bad base URL, unknown HTTP method) surface
//! immediately at the point the invalid value is supplied. Transport failures
//! are carried unmodified from `reqwest`.

/// The main error type for this crate.
///
/// # Examples
///
/// ```
/// use paramfetch::{ClientConfig, Error};
///
/// match ClientConfig::new("not a url") {
///     Err(Error::InvalidBaseUrl(value)) => assert_eq!(value, "not a url"),
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The base URL was missing, did not parse, or cannot carry a path.
    ///
    /// The field holds the offending value (empty when none was supplied).
    #[error("Please provide a valid baseUrl (got {0:?})")]
    InvalidBaseUrl(String),

    /// An HTTP method outside of the supported set was supplied.
    #[error("\"{0}\" is not a valid HTTP method.")]
    InvalidMethod(String),

    /// A request body could not be serialized to JSON.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// Invalid transport configuration, such as a malformed header.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The HTTP primitive failed to complete the round trip.
    ///
    /// The underlying `reqwest::Error` is kept as is.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl Error {
    /// Returns `true` for errors raised while validating caller input,
    /// before any network activity happened.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramfetch::Error;
    ///
    /// assert!(Error::InvalidMethod("FETCH".to_string()).is_configuration());
    /// ```
    pub fn is_configuration(&self) -> bool {
        match self {
            Error::InvalidBaseUrl(_) => true,
            Error::InvalidMethod(_) => true,
            Error::SerializationFailed(_) => true,
            Error::ConfigurationError(_) => true,
            Error::Transport(_) => false,
        }
    }

    /// Returns the underlying transport error, if this is one.
    pub fn transport(&self) -> Option<&reqwest::Error> {
        match self {
            Error::Transport(e) => Some(e),
            _ => None,
        }
    }
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_method_message_names_value() {
        let err = Error::InvalidMethod("UNKNOWN".to_string());
        assert_eq!(err.to_string(), "\"UNKNOWN\" is not a valid HTTP method.");
    }

    #[test]
    fn test_invalid_base_url_message() {
        let err = Error::InvalidBaseUrl("123".to_string());
        assert!(err.to_string().starts_with("Please provide a valid baseUrl"));
        assert!(err.to_string().contains("123"));
        assert!(err.is_configuration());
        assert!(err.transport().is_none());
    }
}
