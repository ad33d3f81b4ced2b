//! # paramfetch - HTTP requests with default and computed query parameters
//!
//! `paramfetch` is a thin layer over `reqwest`. A client carries a base URL, a
//! set of default query parameters and a default HTTP method. Each request can
//! add or override parameters, disable them entirely, and supply values that
//! computed parameters read when the URL is built.
//!
//! ## Quick Start
//!
//! ```no_run
//! use paramfetch::{Client, ParamValue, RequestDescriptor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), paramfetch::Error> {
//!     let client = Client::builder()
//!         .base_url("https://api.example.com/users")
//!         .param("id", ParamValue::computed(|ctx| {
//!             ctx.value_str("uuid").unwrap_or("default").to_string()
//!         }))
//!         .build()?;
//!
//!     // https://api.example.com/users?id=abc
//!     client.get(RequestDescriptor::new().value("uuid", "abc")).await?;
//!
//!     // https://api.example.com/users?id=zzz (request parameters win)
//!     client.get(RequestDescriptor::new().param("id", "zzz")).await?;
//!
//!     // https://api.example.com/users (no query string at all)
//!     client.get(RequestDescriptor::new().without_params()).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Resolution
//!
//! Building a request URL is a pure step that can be used on its own:
//!
//! ```
//! use paramfetch::{ClientConfig, RequestDescriptor};
//!
//! # fn example() -> Result<(), paramfetch::Error> {
//! let config = ClientConfig::builder()
//!     .base_url("https://api.example.com/users/")
//!     .param("lang", "en")
//!     .build()?;
//!
//! let resolved = config.resolver().resolve(RequestDescriptor::new().path("/123"))?;
//! assert_eq!(resolved.url.as_str(), "https://api.example.com/users/123?lang=en");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Errors
//!
//! Invalid base URLs and unsupported methods fail fast with
//! [`Error::InvalidBaseUrl`] and [`Error::InvalidMethod`]. Failures of the
//! HTTP round trip are returned as [`Error::Transport`] holding the original
//! `reqwest::Error`; non-2xx responses are not errors.

mod client;
mod config;
pub mod descriptor;
mod error;
mod method;
pub mod params;
mod resolver;

pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use descriptor::{Body, ParamsOverride, RequestDescriptor, TransportOptions};
pub use error::{Error, Result};
pub use method::HttpMethod;
pub use params::{evaluate, merge_maps, Context, ParamValue, ParameterMap, Values};
pub use resolver::{join_path, RequestResolver, ResolvedRequest};
