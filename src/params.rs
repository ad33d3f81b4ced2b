//! Query parameter values, parameter maps and the evaluation context.
//!
//! A parameter is either a literal or a function computed from a per-request
//! [`Context`]. Client-level defaults and request-level parameters are both
//! [`ParameterMap`]s and are combined with [`merge_maps`].

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::sync::Arc;

/// Caller-supplied values made available to computed parameters.
pub type Values = serde_json::Map<String, serde_json::Value>;

type ComputeFn = dyn Fn(&Context<'_>) -> String + Send + Sync;

/// Read-only snapshot handed to computed parameters.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    url: &'a str,
    values: &'a Values,
}

impl<'a> Context<'a> {
    /// Creates a context over the given URL and values.
    pub fn new(url: &'a str, values: &'a Values) -> Self {
        Self { url, values }
    }

    /// The request URL as built so far.
    pub fn url(&self) -> &'a str {
        self.url
    }

    /// All values supplied with the request.
    pub fn values(&self) -> &'a Values {
        self.values
    }

    /// Looks up a single value.
    pub fn value(&self, key: &str) -> Option<&'a serde_json::Value> {
        self.values.get(key)
    }

    /// Looks up a value that is a JSON string.
    pub fn value_str(&self, key: &str) -> Option<&'a str> {
        self.value(key)?.as_str()
    }
}

/// The value of a single query parameter.
///
/// # Examples
///
/// ```
/// use paramfetch::{Context, ParamValue, Values};
///
/// let page = ParamValue::from(2);
/// let id = ParamValue::computed(|ctx| ctx.value_str("uuid").unwrap_or("default").to_string());
///
/// let values = Values::new();
/// let ctx = Context::new("https://api.example.com/", &values);
/// assert_eq!(page.evaluate(&ctx), "2");
/// assert_eq!(id.evaluate(&ctx), "default");
/// ```
#[derive(Clone)]
pub enum ParamValue {
    /// A fixed value.
    Literal(String),
    /// A value produced per request from the [`Context`].
    Computed(Arc<ComputeFn>),
}

impl ParamValue {
    /// Wraps a function that computes the value for each request.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Context<'_>) -> String + Send + Sync + 'static,
    {
        ParamValue::Computed(Arc::new(f))
    }

    /// Returns `true` if this value is computed per request.
    pub fn is_computed(&self) -> bool {
        matches!(self, ParamValue::Computed(_))
    }

    /// Resolves the value against a context.
    pub fn evaluate(&self, ctx: &Context<'_>) -> String {
        evaluate(self, ctx)
    }
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            ParamValue::Computed(_) => f.write_str("Computed(<fn>)"),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Literal(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Literal(value.to_string())
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Literal(value.clone())
    }
}

macro_rules! literal_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Literal(value.to_string())
                }
            }
        )*
    };
}

literal_from_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Evaluates a parameter: computed values are invoked with the context,
/// literals are returned as they are.
pub fn evaluate(value: &ParamValue, ctx: &Context<'_>) -> String {
    match value {
        ParamValue::Literal(literal) => literal.clone(),
        ParamValue::Computed(f) => f(ctx),
    }
}

/// A set of named query parameters.
///
/// Keys are unique. Iteration is in key order so that generated URLs are
/// stable, but callers must not depend on the order computed values run in.
///
/// # Examples
///
/// ```
/// use paramfetch::ParameterMap;
///
/// let params = ParameterMap::new()
///     .with("page", 1)
///     .with("sort", "name");
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParameterMap {
    entries: BTreeMap<String, ParamValue>,
}

impl ParameterMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, returning the map.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds a computed parameter, returning the map.
    pub fn with_computed<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Context<'_>) -> String + Send + Sync + 'static,
    {
        self.with(key, ParamValue::computed(f))
    }

    /// Inserts a parameter, returning the previous value for the key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes a parameter.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
        self.entries.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterMap
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ParameterMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<K, V> Extend<(K, V)> for ParameterMap
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for ParameterMap {
    type Item = (String, ParamValue);
    type IntoIter = btree_map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParameterMap {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Shallow-merges two maps. Keys in `overrides` win.
///
/// # Examples
///
/// ```
/// use paramfetch::{merge_maps, ParamValue, ParameterMap};
///
/// let defaults = ParameterMap::new().with("id", "default").with("lang", "en");
/// let request = ParameterMap::new().with("id", "zzz");
///
/// let merged = merge_maps(&defaults, &request);
/// assert!(matches!(merged.get("id"), Some(ParamValue::Literal(v)) if v == "zzz"));
/// assert!(matches!(merged.get("lang"), Some(ParamValue::Literal(v)) if v == "en"));
/// ```
pub fn merge_maps(base: &ParameterMap, overrides: &ParameterMap) -> ParameterMap {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn literal(map: &ParameterMap, key: &str) -> Option<String> {
        match map.get(key)? {
            ParamValue::Literal(v) => Some(v.clone()),
            ParamValue::Computed(_) => None,
        }
    }

    #[test]
    fn test_literal_from_numbers() {
        assert!(matches!(ParamValue::from(42u32), ParamValue::Literal(ref v) if v == "42"));
        assert!(matches!(ParamValue::from(-7i64), ParamValue::Literal(ref v) if v == "-7"));
        assert!(matches!(ParamValue::from(1.5f64), ParamValue::Literal(ref v) if v == "1.5"));
    }

    #[test]
    fn test_computed_receives_context() {
        let mut values = Values::new();
        values.insert("uuid".to_string(), json!("abc"));
        let ctx = Context::new("https://api.example.com/users", &values);

        let value = ParamValue::computed(|ctx| format!("{}|{}", ctx.url(), ctx.value_str("uuid").unwrap_or("none")));
        assert!(value.is_computed());
        assert_eq!(evaluate(&value, &ctx), "https://api.example.com/users|abc");
    }

    #[test]
    fn test_computed_value_used_verbatim() {
        let values = Values::new();
        let ctx = Context::new("https://example.com/", &values);
        let value = ParamValue::computed(|_| "  spaced & raw ".to_string());
        assert_eq!(value.evaluate(&ctx), "  spaced & raw ");
    }

    #[test]
    fn test_merge_override_wins_and_adds() {
        let defaults = ParameterMap::new().with("id", "default").with("page", 1);
        let overrides = ParameterMap::new().with("id", "zzz").with("limit", 10);

        let merged = merge_maps(&defaults, &overrides);
        assert_eq!(merged.len(), 3);
        assert_eq!(literal(&merged, "id").as_deref(), Some("zzz"));
        assert_eq!(literal(&merged, "page").as_deref(), Some("1"));
        assert_eq!(literal(&merged, "limit").as_deref(), Some("10"));

        // inputs untouched
        assert_eq!(literal(&defaults, "id").as_deref(), Some("default"));
        assert_eq!(defaults.len(), 2);
    }

    #[test]
    fn test_merge_with_empty_override_keeps_defaults() {
        let defaults = ParameterMap::new().with_computed("id", |_| "x".to_string());
        let merged = merge_maps(&defaults, &ParameterMap::new());
        assert_eq!(merged.len(), 1);
        assert!(merged.get("id").is_some_and(ParamValue::is_computed));
    }

    #[test]
    fn test_from_iterator_and_debug() {
        let map: ParameterMap = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        let computed = ParamValue::computed(|_| String::new());
        assert_eq!(format!("{:?}", computed), "Computed(<fn>)");
    }
}
