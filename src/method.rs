//! The closed set of HTTP methods a client may use.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An HTTP method accepted by the client.
///
/// Unlike [`http::Method`], this set is closed: extension methods are
/// rejected with [`Error::InvalidMethod`].
///
/// # Examples
///
/// ```
/// use paramfetch::HttpMethod;
///
/// let method: HttpMethod = "PATCH".parse().unwrap();
/// assert_eq!(method, HttpMethod::Patch);
/// assert!("UNKNOWN".parse::<HttpMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

impl HttpMethod {
    /// Every supported method.
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Connect,
        HttpMethod::Options,
        HttpMethod::Trace,
        HttpMethod::Patch,
    ];

    /// Returns the upper-case wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    /// Method names are matched exactly; `"get"` is not a valid method.
    fn from_str(s: &str) -> Result<Self> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| Error::InvalidMethod(s.to_string()))
    }
}

impl TryFrom<&http::Method> for HttpMethod {
    type Error = Error;

    fn try_from(method: &http::Method) -> Result<Self> {
        method.as_str().parse()
    }
}

impl TryFrom<http::Method> for HttpMethod {
    type Error = Error;

    fn try_from(method: http::Method) -> Result<Self> {
        HttpMethod::try_from(&method)
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Head => http::Method::HEAD,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Delete => http::Method::DELETE,
            HttpMethod::Connect => http::Method::CONNECT,
            HttpMethod::Options => http::Method::OPTIONS,
            HttpMethod::Trace => http::Method::TRACE,
            HttpMethod::Patch => http::Method::PATCH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_methods_parse() {
        for method in HttpMethod::ALL {
            assert_eq!(method.as_str().parse::<HttpMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_unknown_methods_rejected() {
        for name in ["UNKNOWN", "get", "", "PROPFIND", " GET"] {
            match name.parse::<HttpMethod>() {
                Err(Error::InvalidMethod(value)) => assert_eq!(value, name),
                other => panic!("Expected InvalidMethod for {:?}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_http_method_conversion() {
        for method in HttpMethod::ALL {
            let converted: http::Method = method.into();
            assert_eq!(HttpMethod::try_from(&converted).unwrap(), method);
        }

        let extension = http::Method::from_bytes(b"PURGE").unwrap();
        assert!(matches!(
            HttpMethod::try_from(extension),
            Err(Error::InvalidMethod(ref v)) if v == "PURGE"
        ));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&HttpMethod::Delete).unwrap();
        assert_eq!(json, "\"DELETE\"");
        let parsed: HttpMethod = serde_json::from_str("\"OPTIONS\"").unwrap();
        assert_eq!(parsed, HttpMethod::Options);
    }
}
