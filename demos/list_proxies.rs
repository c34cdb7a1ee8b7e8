//! List active proxies programmatically, logging through `tracing`.
//!
//! Usage:
//!   export PROXY6_API_KEY=your_key
//!   cargo run --example list_proxies

use proxysix::logging::tracing_factory;
use proxysix::{Client, Context, HttpClient, ListProxyParams, ProxyState};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("proxysix=debug")
        .init();

    let key = std::env::var("PROXY6_API_KEY")?;
    let client = HttpClient::builder(key)
        .logger_fn(tracing_factory())
        .build()?;

    let ctx = Context::new().with_timeout(Duration::from_secs(30));
    let params = ListProxyParams {
        descr: String::new(),
        state: ProxyState::Active,
    };

    for proxy in client.list_proxies(&ctx, &params).await? {
        println!(
            "{} {}:{} ({}) expires {}",
            proxy.id, proxy.host, proxy.port, proxy.proxy_type, proxy.expire_date
        );
    }

    Ok(())
}
