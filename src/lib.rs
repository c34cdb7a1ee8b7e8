pub mod client;
pub mod config;
pub mod context;
pub mod entities;
pub mod error;
pub mod logging;

pub use client::{Client, HttpClient, ListProxyParams, ProxyState};
pub use config::Config;
pub use context::Context;
pub use entities::{Proxy, ProxyType, Sensitive};
pub use error::{ClientError, Result};
pub use logging::{ConsoleLogger, GetLogger, LogField, Logger, NoopLogger, TracingLogger};
