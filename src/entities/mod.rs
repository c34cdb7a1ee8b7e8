//! Domain model produced by the client.

pub mod proxy;
pub mod sensitive;

pub use proxy::{Proxy, ProxyType};
pub use sensitive::{Sensitive, REDACTED};
