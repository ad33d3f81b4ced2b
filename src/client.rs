//! HTTP client that injects default and computed query parameters.
//!
//! The [`Client`] type is the main entry point for making HTTP requests.
//! Use [`ClientBuilder`] to configure and create clients.

use crate::{
    config::{ClientConfig, ClientConfigBuilder},
    descriptor::Body,
    resolver::ResolvedRequest,
    Error, HttpMethod, ParamValue, ParameterMap, RequestDescriptor, Result,
};
use std::sync::Arc;
use std::time::Instant;

/// An HTTP client with a base URL, default query parameters and a default
/// method.
///
/// The client is cheap to clone and safe to share between tasks: the
/// configuration is immutable and every call resolves its own URL.
///
/// # Examples
///
/// ```no_run
/// use paramfetch::{Client, ParamValue, RequestDescriptor};
///
/// # async fn example() -> Result<(), paramfetch::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com/users")
///     .param("id", ParamValue::computed(|ctx| {
///         ctx.value_str("uuid").unwrap_or("default").to_string()
///     }))
///     .build()?;
///
/// // GET https://api.example.com/users?id=abc
/// let response = client.get(RequestDescriptor::new().value("uuid", "abc")).await?;
/// println!("Status: {}", response.status());
///
/// // DELETE https://api.example.com/users/123, no query string
/// let response = client
///     .delete(RequestDescriptor::new().path("/123").without_params())
///     .await?;
/// println!("Status: {}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Wraps an existing configuration with a default `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = default_http_client()?;
        Ok(Self::with_http_client(config, http_client))
    }

    /// Wraps an existing configuration and HTTP client.
    pub fn with_http_client(config: ClientConfig, http_client: reqwest::Client) -> Self {
        Client {
            inner: Arc::new(ClientInner {
                http_client,
                config,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Resolves a descriptor without sending anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMethod`] if the descriptor's method is not
    /// supported.
    pub fn resolve(&self, descriptor: RequestDescriptor) -> Result<ResolvedRequest> {
        self.inner.config.resolver().resolve(descriptor)
    }

    /// Resolves the descriptor and sends the request.
    ///
    /// The response is returned as the HTTP primitive produced it; a non-2xx
    /// status is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMethod`] for an unsupported method and
    /// [`Error::Transport`] if the request could not be completed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use paramfetch::{Client, HttpMethod, RequestDescriptor, TransportOptions};
    /// use serde_json::json;
    ///
    /// # async fn example() -> Result<(), paramfetch::Error> {
    /// let client = Client::builder()
    ///     .base_url("https://api.example.com/users")
    ///     .build()?;
    ///
    /// let descriptor = RequestDescriptor::new()
    ///     .method(HttpMethod::Post)
    ///     .transport(TransportOptions::new().with_json(&json!({ "name": "Fake user" }))?);
    ///
    /// let response = client.request(descriptor).await?;
    /// assert_eq!(response.status().as_u16(), 201);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn request(&self, descriptor: RequestDescriptor) -> Result<reqwest::Response> {
        let ResolvedRequest {
            url,
            method,
            options,
        } = self.resolve(descriptor)?;

        tracing::debug!(method = %method, url = %url, "Executing HTTP request");

        let mut request = self
            .inner
            .http_client
            .request(method.into(), url.clone())
            .headers(options.headers);

        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        request = match options.body {
            Some(Body::Json(json)) => request.json(&json),
            Some(Body::Text(text)) => request.body(text),
            Some(Body::Bytes(bytes)) => request.body(bytes),
            None => request,
        };

        let start_time = Instant::now();
        match request.send().await {
            Ok(response) => {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = start_time.elapsed().as_millis(),
                    "Received HTTP response"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    method = %method,
                    url = %url,
                    "Request failed"
                );
                Err(Error::Transport(e))
            }
        }
    }

    async fn request_as(
        &self,
        method: HttpMethod,
        descriptor: RequestDescriptor,
    ) -> Result<reqwest::Response> {
        self.request(descriptor.method(method)).await
    }

    /// Sends a GET request. Any method set on the descriptor is replaced.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use paramfetch::{Client, RequestDescriptor};
    ///
    /// # async fn example() -> Result<(), paramfetch::Error> {
    /// let client = Client::builder()
    ///     .base_url("https://api.example.com/users")
    ///     .param("id", "41E01554")
    ///     .build()?;
    ///
    /// let response = client.get(RequestDescriptor::new().param("id", "zzz")).await?;
    /// let users: serde_json::Value = response.json().await?;
    /// println!("{}", users);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get(&self, descriptor: RequestDescriptor) -> Result<reqwest::Response> {
        self.request_as(HttpMethod::Get, descriptor).await
    }

    /// Sends a HEAD request. Any method set on the descriptor is replaced.
    pub async fn head(&self, descriptor: RequestDescriptor) -> Result<reqwest::Response> {
        self.request_as(HttpMethod::Head, descriptor).await
    }

    /// Sends a POST request. Any method set on the descriptor is replaced.
    pub async fn post(&self, descriptor: RequestDescriptor) -> Result<reqwest::Response> {
        self.request_as(HttpMethod::Post, descriptor).await
    }

    /// Sends a PUT request.
    pub async fn put(&self, descriptor: RequestDescriptor) -> Result<reqwest::Response> {
        self.request_as(HttpMethod::Put, descriptor).await
    }

    /// Sends a DELETE request.
    pub async fn delete(&self, descriptor: RequestDescriptor) -> Result<reqwest::Response> {
        self.request_as(HttpMethod::Delete, descriptor).await
    }

    /// Sends a CONNECT request.
    pub async fn connect(&self, descriptor: RequestDescriptor) -> Result<reqwest::Response> {
        self.request_as(HttpMethod::Connect, descriptor).await
    }

    /// Sends an OPTIONS request.
    pub async fn options(&self, descriptor: RequestDescriptor) -> Result<reqwest::Response> {
        self.request_as(HttpMethod::Options, descriptor).await
    }

    /// Sends a TRACE request.
    pub async fn trace(&self, descriptor: RequestDescriptor) -> Result<reqwest::Response> {
        self.request_as(HttpMethod::Trace, descriptor).await
    }

    /// Sends a PATCH request.
    pub async fn patch(&self, descriptor: RequestDescriptor) -> Result<reqwest::Response> {
        self.request_as(HttpMethod::Patch, descriptor).await
    }
}

fn default_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| Error::ConfigurationError(format!("Failed to build HTTP client: {}", e)))
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use paramfetch::{ClientBuilder, HttpMethod};
///
/// # fn example() -> Result<(), paramfetch::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.example.com")
///     .param("lang", "en")
///     .param("page", 1)
///     .default_method(HttpMethod::Post)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfigBuilder,
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL for all requests. Validated in `build`.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Self {
        self.config = self.config.base_url(url);
        self
    }

    /// Adds a default query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.config = self.config.param(key, value);
        self
    }

    /// Adds a default query parameter computed per request.
    pub fn computed_param<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&crate::Context<'_>) -> String + Send + Sync + 'static,
    {
        self.param(key, ParamValue::computed(f))
    }

    /// Adds several default query parameters.
    pub fn params(mut self, params: ParameterMap) -> Self {
        self.config = self.config.params(params);
        self
    }

    /// Sets the default method. `GET` when unset.
    pub fn default_method(mut self, method: HttpMethod) -> Self {
        self.config = self.config.default_method(method);
        self
    }

    /// Sets the default method by name. Validated in `build`.
    pub fn default_method_str(mut self, method: impl Into<String>) -> Self {
        self.config = self.config.default_method_str(method);
        self
    }

    /// Uses a preconfigured `reqwest::Client` as the HTTP primitive.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBaseUrl`] or [`Error::InvalidMethod`] if the
    /// configuration is invalid, or [`Error::ConfigurationError`] if the HTTP
    /// client cannot be built.
    pub fn build(self) -> Result<Client> {
        let config = self.config.build()?;
        let http_client = match self.http_client {
            Some(http_client) => http_client,
            None => default_http_client()?,
        };
        Ok(Client::with_http_client(config, http_client))
    }
}
