//! Per-request descriptors and transport pass-through options.

use crate::{params::Values, Error, HttpMethod, ParamValue, ParameterMap, Result};
use http::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use std::time::Duration;

/// How a request treats the client's default parameters.
#[derive(Debug, Clone, Default)]
pub enum ParamsOverride {
    /// Use the client defaults unchanged.
    #[default]
    Inherit,
    /// Inject no parameters at all, not even client defaults.
    Disabled,
    /// Shallow-merge these over the client defaults; these keys win.
    Merge(ParameterMap),
}

/// A request body handed to the HTTP primitive untouched.
#[derive(Debug, Clone)]
pub enum Body {
    Json(serde_json::Value),
    Text(String),
    Bytes(Vec<u8>),
}

/// Options passed through to the HTTP primitive.
///
/// The method is never taken from here; it is always the effective method
/// of the resolved request.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// Extra headers for this request.
    pub headers: HeaderMap,

    /// Optional request body.
    pub body: Option<Body>,

    /// Optional per-request timeout, forwarded as is.
    pub timeout: Option<Duration>,
}

impl TransportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Sets a JSON body from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let json =
            serde_json::to_value(body).map_err(|e| Error::SerializationFailed(e.to_string()))?;
        self.body = Some(Body::Json(json));
        Ok(self)
    }

    /// Sets a plain text body.
    pub fn with_text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(Body::Text(body.into()));
        self
    }

    /// Sets a raw byte body.
    pub fn with_bytes(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(Body::Bytes(body.into()));
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Describes a single call: path, method, parameters, context values and
/// transport options.
///
/// # Examples
///
/// ```
/// use paramfetch::{HttpMethod, RequestDescriptor};
///
/// let descriptor = RequestDescriptor::new()
///     .path("/123")
///     .method(HttpMethod::Delete)
///     .without_params();
/// assert_eq!(descriptor.path, "/123");
/// ```
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// Path joined onto the base URL's path. Defaults to `/`.
    pub path: String,

    /// Method for this call; the client default is used when unset.
    ///
    /// Extension methods are accepted here and rejected at resolution.
    pub method: Option<http::Method>,

    /// Parameter handling for this call.
    pub params: ParamsOverride,

    /// Values exposed to computed parameters through the context.
    pub values: Values,

    /// Options forwarded to the HTTP primitive.
    pub transport: TransportOptions,
}

impl RequestDescriptor {
    pub fn new() -> Self {
        Self {
            path: "/".to_string(),
            method: None,
            params: ParamsOverride::Inherit,
            values: Values::new(),
            transport: TransportOptions::default(),
        }
    }

    /// Sets the request path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the request method.
    pub fn method(mut self, method: impl Into<http::Method>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Sets the request method from its name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMethod`] if the name is not a supported method.
    pub fn try_method(self, method: impl AsRef<str>) -> Result<Self> {
        let method: HttpMethod = method.as_ref().parse()?;
        Ok(self.method(method))
    }

    /// Adds a request-level parameter, merged over the client defaults.
    ///
    /// If parameters were disabled on this descriptor, they are enabled again
    /// with only this parameter on top of the defaults.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let mut map = match std::mem::take(&mut self.params) {
            ParamsOverride::Merge(map) => map,
            ParamsOverride::Inherit | ParamsOverride::Disabled => ParameterMap::new(),
        };
        map.insert(key, value);
        self.params = ParamsOverride::Merge(map);
        self
    }

    /// Replaces the request-level parameters.
    pub fn params(mut self, params: ParameterMap) -> Self {
        self.params = ParamsOverride::Merge(params);
        self
    }

    /// Disables parameter injection for this request, client defaults included.
    pub fn without_params(mut self) -> Self {
        self.params = ParamsOverride::Disabled;
        self
    }

    /// Adds a context value.
    pub fn value(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Replaces all context values.
    pub fn values(mut self, values: Values) -> Self {
        self.values = values;
        self
    }

    /// Sets the transport options.
    pub fn transport(mut self, transport: TransportOptions) -> Self {
        self.transport = transport;
        self
    }
}

impl Default for RequestDescriptor {
    fn default() -> Self {
        Self::new()
    }
}
