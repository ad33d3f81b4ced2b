//! Immutable client configuration: base URL, default parameters and
//! default method.

use crate::{Error, HttpMethod, ParamValue, ParameterMap, RequestResolver, Result};
use url::Url;

/// Validated, immutable configuration shared by every request of a client.
///
/// # Examples
///
/// ```
/// use paramfetch::{ClientConfig, HttpMethod, ParamValue};
///
/// # fn example() -> Result<(), paramfetch::Error> {
/// let config = ClientConfig::builder()
///     .base_url("https://api.example.com/users")
///     .param("id", ParamValue::computed(|ctx| {
///         ctx.value_str("uuid").unwrap_or("default").to_string()
///     }))
///     .default_method(HttpMethod::Get)
///     .build()?;
///
/// assert_eq!(config.base_url().path(), "/users");
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    params: ParameterMap,
    default_method: HttpMethod,
}

impl ClientConfig {
    /// Creates a configuration with no default parameters and `GET` as the
    /// default method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBaseUrl`] if the URL is invalid.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn params(&self) -> &ParameterMap {
        &self.params
    }

    pub fn default_method(&self) -> HttpMethod {
        self.default_method
    }

    /// Returns a resolver bound to this configuration.
    pub fn resolver(&self) -> RequestResolver<'_> {
        RequestResolver::new(self)
    }
}

/// Builder for [`ClientConfig`].
///
/// Setters never fail; every check happens in [`ClientConfigBuilder::build`]
/// so a half-validated configuration can never exist.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    params: ParameterMap,
    default_method: Option<String>,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL. It must be absolute.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Self {
        self.base_url = Some(url.as_ref().to_string());
        self
    }

    /// Adds a default parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Adds several default parameters.
    pub fn params(mut self, params: ParameterMap) -> Self {
        self.params.extend(params);
        self
    }

    /// Sets the default method. `GET` when unset.
    pub fn default_method(mut self, method: HttpMethod) -> Self {
        self.default_method = Some(method.as_str().to_string());
        self
    }

    /// Sets the default method by name; validated in `build`.
    pub fn default_method_str(mut self, method: impl Into<String>) -> Self {
        self.default_method = Some(method.into());
        self
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBaseUrl`] if no base URL was set, if it does not
    /// parse as an absolute URL or if it cannot carry a path (e.g. `mailto:`).
    /// Returns [`Error::InvalidMethod`] if the default method is not supported.
    pub fn build(self) -> Result<ClientConfig> {
        let raw = self
            .base_url
            .ok_or_else(|| Error::InvalidBaseUrl(String::new()))?;
        let base_url = Url::parse(&raw).map_err(|_| Error::InvalidBaseUrl(raw.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(raw));
        }

        let default_method = match self.default_method {
            Some(method) => method.parse()?,
            None => HttpMethod::Get,
        };

        Ok(ClientConfig {
            base_url,
            params: self.params,
            default_method,
        })
    }
}
