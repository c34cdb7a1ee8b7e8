//! proxy6 API client.
//!
//! `wire` holds the provider's JSON shapes, `mapper` turns them into
//! [`crate::entities`] values, and `http` issues the request.

pub mod http;
pub mod mapper;
pub mod state;
pub mod wire;

pub use http::{Client, HttpClient, HttpClientBuilder, DEFAULT_ADDR};
pub use state::{ListProxyParams, ProxyState};
