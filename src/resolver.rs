//! Turns a [`RequestDescriptor`] into a concrete URL, method and transport
//! options.

use crate::{
    descriptor::{ParamsOverride, TransportOptions},
    params::{evaluate, merge_maps, Context},
    ClientConfig, HttpMethod, ParameterMap, RequestDescriptor, Result,
};
use std::borrow::Cow;
use url::Url;

/// A fully resolved request, ready to be handed to the HTTP primitive.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    /// Absolute URL with the joined path and the evaluated query string.
    pub url: Url,

    /// The effective method.
    pub method: HttpMethod,

    /// Transport options from the descriptor, passed through verbatim.
    pub options: TransportOptions,
}

/// Resolves descriptors against a [`ClientConfig`].
///
/// Resolution is pure apart from running computed parameters, so a single
/// configuration can serve any number of concurrent resolutions.
///
/// # Examples
///
/// ```
/// use paramfetch::{ClientConfig, ParamValue, RequestDescriptor};
///
/// # fn example() -> Result<(), paramfetch::Error> {
/// let config = ClientConfig::builder()
///     .base_url("https://api.example.com/users")
///     .param("id", ParamValue::computed(|ctx| {
///         ctx.value_str("uuid").unwrap_or("default").to_string()
///     }))
///     .build()?;
///
/// let resolved = config
///     .resolver()
///     .resolve(RequestDescriptor::new().value("uuid", "abc"))?;
/// assert_eq!(resolved.url.as_str(), "https://api.example.com/users?id=abc");
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequestResolver<'a> {
    config: &'a ClientConfig,
}

impl<'a> RequestResolver<'a> {
    pub fn new(config: &'a ClientConfig) -> Self {
        Self { config }
    }

    /// Resolves a descriptor into a [`ResolvedRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMethod`](crate::Error::InvalidMethod) if the
    /// descriptor carries a method outside of the supported set.
    pub fn resolve(&self, descriptor: RequestDescriptor) -> Result<ResolvedRequest> {
        let RequestDescriptor {
            path,
            method,
            params,
            values,
            transport,
        } = descriptor;

        let method = match method {
            Some(method) => HttpMethod::try_from(&method)?,
            None => self.config.default_method(),
        };
        let params = self.effective_params(&params);

        let mut url = self.config.base_url().clone();
        let joined = join_path(url.path(), &path);
        url.set_path(&joined);

        for (key, value) in params.iter() {
            let evaluated = evaluate(value, &Context::new(url.as_str(), &values));
            set_query_param(&mut url, key, &evaluated);
        }

        tracing::debug!(method = %method, url = %url, "Resolved request");

        Ok(ResolvedRequest {
            url,
            method,
            options: transport,
        })
    }

    /// Picks the parameter map for a request.
    pub fn effective_params<'p>(&self, params: &'p ParamsOverride) -> Cow<'p, ParameterMap>
    where
        'a: 'p,
    {
        match params {
            ParamsOverride::Inherit => Cow::Borrowed(self.config.params()),
            ParamsOverride::Disabled => Cow::Owned(ParameterMap::new()),
            ParamsOverride::Merge(overrides) => {
                Cow::Owned(merge_maps(self.config.params(), overrides))
            }
        }
    }
}

/// Concatenates a base path and a request path and collapses every run of
/// `/` into one.
///
/// An empty request path, or one that is exactly `/`, leaves the base path
/// as it is.
///
/// # Examples
///
/// ```
/// use paramfetch::join_path;
///
/// assert_eq!(join_path("/users/", "/123"), "/users/123");
/// assert_eq!(join_path("/users", "/"), "/users");
/// assert_eq!(join_path("/", "//a///b"), "/a/b");
/// ```
pub fn join_path(base: &str, path: &str) -> String {
    if path.is_empty() || path == "/" {
        return base.to_string();
    }

    let mut joined = String::with_capacity(base.len() + path.len());
    for c in base.chars().chain(path.chars()) {
        if c == '/' && joined.ends_with('/') {
            continue;
        }
        joined.push(c);
    }
    joined
}

/// Sets `key` in the URL's query string, replacing any existing values.
///
/// The first existing occurrence keeps its position; later duplicates are
/// dropped.
fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;
    for (k, v) in url.query_pairs() {
        if k == key {
            if !replaced {
                pairs.push((k.into_owned(), value.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((k.into_owned(), v.into_owned()));
        }
    }
    if !replaced {
        pairs.push((key.to_string(), value.to_string()));
    }

    url.query_pairs_mut().clear().extend_pairs(pairs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParamValue;
    use std::sync::{Arc, Mutex};

    fn users_config() -> ClientConfig {
        ClientConfig::builder()
            .base_url("https://api.example.com/users")
            .param(
                "id",
                ParamValue::computed(|ctx| ctx.value_str("uuid").unwrap_or("default").to_string()),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_join_path_collapses_slashes() {
        assert_eq!(join_path("/users/", "/123"), "/users/123");
        assert_eq!(join_path("/users", "/123"), "/users/123");
        assert_eq!(join_path("/users//", "///123//x"), "/users/123/x");
        assert_eq!(join_path("/", "/123"), "/123");
    }

    #[test]
    fn test_join_path_default_keeps_base() {
        assert_eq!(join_path("/users", "/"), "/users");
        assert_eq!(join_path("/users/", ""), "/users/");
        assert_eq!(join_path("/", "/"), "/");
    }

    #[test]
    fn test_computed_from_values() {
        let config = users_config();
        let resolved = config
            .resolver()
            .resolve(RequestDescriptor::new().value("uuid", "abc"))
            .unwrap();
        assert_eq!(resolved.url.as_str(), "https://api.example.com/users?id=abc");
        assert_eq!(resolved.method, HttpMethod::Get);
    }

    #[test]
    fn test_computed_fallback() {
        let config = users_config();
        let resolved = config.resolver().resolve(RequestDescriptor::new()).unwrap();
        assert_eq!(resolved.url.as_str(), "https://api.example.com/users?id=default");
    }

    #[test]
    fn test_request_param_overrides_default() {
        let config = users_config();
        let resolved = config
            .resolver()
            .resolve(RequestDescriptor::new().param("id", "zzz"))
            .unwrap();
        assert_eq!(resolved.url.as_str(), "https://api.example.com/users?id=zzz");
    }

    #[test]
    fn test_disabled_params_have_no_query() {
        let config = users_config();
        let resolved = config
            .resolver()
            .resolve(RequestDescriptor::new().without_params())
            .unwrap();
        assert_eq!(resolved.url.as_str(), "https://api.example.com/users");
        assert!(resolved.url.query().is_none());
    }

    #[test]
    fn test_no_params_no_query() {
        let config = ClientConfig::new("https://api.example.com/users/").unwrap();
        let resolved = config
            .resolver()
            .resolve(RequestDescriptor::new().path("/123"))
            .unwrap();
        assert_eq!(resolved.url.as_str(), "https://api.example.com/users/123");
    }

    #[test]
    fn test_effective_params() {
        let config = users_config();
        let resolver = config.resolver();

        assert_eq!(resolver.effective_params(&ParamsOverride::Inherit).len(), 1);
        assert!(resolver.effective_params(&ParamsOverride::Disabled).is_empty());

        let overrides =
            ParamsOverride::Merge(ParameterMap::new().with("id", "zzz").with("page", 2));
        let merged = resolver.effective_params(&overrides);
        assert_eq!(merged.len(), 2);
        assert!(matches!(merged.get("id"), Some(ParamValue::Literal(v)) if v == "zzz"));
    }

    #[test]
    fn test_method_defaults_and_overrides() {
        let config = ClientConfig::builder()
            .base_url("https://api.example.com")
            .default_method(HttpMethod::Post)
            .build()
            .unwrap();

        let resolved = config.resolver().resolve(RequestDescriptor::new()).unwrap();
        assert_eq!(resolved.method, HttpMethod::Post);

        let resolved = config
            .resolver()
            .resolve(RequestDescriptor::new().method(HttpMethod::Trace))
            .unwrap();
        assert_eq!(resolved.method, HttpMethod::Trace);
    }

    #[test]
    fn test_extension_method_rejected() {
        let config = users_config();
        let descriptor = RequestDescriptor::new().method(http::Method::from_bytes(b"PURGE").unwrap());
        match config.resolver().resolve(descriptor) {
            Err(crate::Error::InvalidMethod(value)) => assert_eq!(value, "PURGE"),
            other => panic!("Expected InvalidMethod, got {:?}", other),
        }
    }

    #[test]
    fn test_set_semantics_replace_base_query() {
        let config = ClientConfig::builder()
            .base_url("https://api.example.com/search?q=old&lang=en&q=older")
            .param("q", "new")
            .build()
            .unwrap();
        let resolved = config.resolver().resolve(RequestDescriptor::new()).unwrap();
        assert_eq!(
            resolved.url.as_str(),
            "https://api.example.com/search?q=new&lang=en"
        );
    }

    #[test]
    fn test_query_values_are_encoded() {
        let config = ClientConfig::builder()
            .base_url("https://api.example.com")
            .param("name", "a b&c")
            .build()
            .unwrap();
        let resolved = config.resolver().resolve(RequestDescriptor::new()).unwrap();
        assert_eq!(resolved.url.as_str(), "https://api.example.com/?name=a+b%26c");
        let pairs: Vec<_> = resolved.url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("name".to_string(), "a b&c".to_string())]);
    }

    #[test]
    fn test_context_carries_url_and_values() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let config = ClientConfig::builder()
            .base_url("https://api.example.com/users")
            .param(
                "id",
                ParamValue::computed(move |ctx| {
                    seen_clone
                        .lock()
                        .unwrap()
                        .push((ctx.url().to_string(), ctx.values().clone()));
                    "x".to_string()
                }),
            )
            .build()
            .unwrap();

        config
            .resolver()
            .resolve(RequestDescriptor::new().path("/42").value("uuid", "abc"))
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "https://api.example.com/users/42");
        assert_eq!(seen[0].1.get("uuid"), Some(&serde_json::json!("abc")));
    }

    #[test]
    fn test_transport_options_pass_through() {
        let config = ClientConfig::new("https://api.example.com").unwrap();
        let options = TransportOptions::new()
            .with_header("x-request-id", "r-1")
            .unwrap()
            .with_text("hello");
        let resolved = config
            .resolver()
            .resolve(RequestDescriptor::new().transport(options))
            .unwrap();
        assert_eq!(resolved.options.headers.get("x-request-id").unwrap(), "r-1");
        assert!(matches!(
            resolved.options.body,
            Some(crate::descriptor::Body::Text(ref t)) if t == "hello"
        ));
    }
}
