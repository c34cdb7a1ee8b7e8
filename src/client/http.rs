use super::mapper::map_proxy_response;
use super::state::ListProxyParams;
use super::wire::ProxyListResponse;
use crate::context::Context;
use crate::entities::{Proxy, Sensitive, REDACTED};
use crate::error::{ClientError, Result};
use crate::logging::{noop_factory, GetLogger, LogField, Logger};

use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Instant;

pub const DEFAULT_ADDR: &str = "https://proxy6.net";

const GET_PROXY_PATH: &str = "/api/{api_key}/getproxy";

/// Read access to a proxy6 account.
#[allow(async_fn_in_trait)]
pub trait Client {
    async fn list_proxies(&self, ctx: &Context, params: &ListProxyParams) -> Result<Vec<Proxy>>;
}

pub struct HttpClientBuilder {
    addr: String,
    key: String,
    http: Option<reqwest::Client>,
    logger_fn: GetLogger,
}

impl HttpClientBuilder {
    /// Override the API base address (scheme and host, no trailing path).
    #[must_use]
    pub fn addr(mut self, addr: impl Into<String>) -> Self {
        self.addr = addr.into();
        self
    }

    /// Resolve a logger per request instead of discarding log output.
    #[must_use]
    pub fn logger_fn(mut self, logger_fn: GetLogger) -> Self {
        self.logger_fn = logger_fn;
        self
    }

    #[must_use]
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        if self.addr.is_empty() {
            return Err(ClientError::general("addr is empty"));
        }
        if self.key.is_empty() {
            return Err(ClientError::general("api key is empty"));
        }

        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .user_agent(concat!("proxysix/", env!("CARGO_PKG_VERSION")))
                .build()?,
        };

        Ok(HttpClient {
            addr: self.addr.trim_end_matches('/').to_string(),
            key: Sensitive::new(self.key),
            http,
            logger_fn: self.logger_fn,
        })
    }
}

#[derive(Clone)]
pub struct HttpClient {
    addr: String,
    key: Sensitive<String>,
    http: reqwest::Client,
    logger_fn: GetLogger,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("addr", &self.addr)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    pub fn builder(api_key: impl Into<String>) -> HttpClientBuilder {
        HttpClientBuilder {
            addr: DEFAULT_ADDR.to_string(),
            key: api_key.into(),
            http: None,
            logger_fn: noop_factory(),
        }
    }

    /// `getproxy` endpoint for this account. The key is inserted into the path verbatim.
    #[must_use]
    pub fn get_proxy_url(&self) -> String {
        format!(
            "{}{}",
            self.addr,
            GET_PROXY_PATH.replace("{api_key}", self.key.expose())
        )
    }

    /// The request URL with the key replaced by [`REDACTED`] before any encoding,
    /// so no form of the key reaches the logs.
    fn loggable_url(&self, query: &[(&str, &str)]) -> String {
        let path = GET_PROXY_PATH.replace("{api_key}", REDACTED);
        match reqwest::Url::parse(&format!("{}{}", self.addr, path)) {
            Ok(mut url) => {
                url.query_pairs_mut().extend_pairs(query);
                url.to_string()
            }
            Err(_) => format!("{}{}", self.addr, path),
        }
    }

    async fn load_proxies(
        &self,
        ctx: &Context,
        params: &ListProxyParams,
    ) -> Result<ProxyListResponse> {
        let log = (self.logger_fn)(ctx);

        let query = [
            ("state", params.state.as_str()),
            ("descr", params.descr.as_str()),
            ("nokey", ""),
        ];
        let mut builder = self.http.get(self.get_proxy_url()).query(&query);
        if let Some(timeout) = ctx.timeout() {
            builder = builder.timeout(timeout);
        }
        let request = builder.build()?;

        let response: ProxyListResponse =
            do_request(&self.http, request, log.as_ref(), &self.loggable_url(&query)).await?;

        if response.is_error() {
            log.error(
                "provider rejected request",
                &[
                    LogField::new("error_id", response.error_id),
                    LogField::new("error", &response.error),
                ],
            );
            return Err(ClientError::request(response.error_id, response.error));
        }

        Ok(response)
    }
}

impl Client for HttpClient {
    async fn list_proxies(&self, ctx: &Context, params: &ListProxyParams) -> Result<Vec<Proxy>> {
        let response = self.load_proxies(ctx, params).await?;
        let list_count = response.list_count;

        let proxies = map_proxy_response(response)?;

        (self.logger_fn)(ctx).debug(
            "proxies mapped",
            &[
                LogField::new("list_count", list_count),
                LogField::new("mapped", proxies.len()),
            ],
        );

        Ok(proxies)
    }
}

/// Send once, read the whole body, then decode it unless the status is an error.
async fn do_request<T: DeserializeOwned>(
    http: &reqwest::Client,
    request: reqwest::Request,
    log: &dyn Logger,
    log_url: &str,
) -> Result<T> {
    log.debug(
        "sending request",
        &[
            LogField::new("method", request.method().as_str()),
            LogField::new("req_url", log_url),
        ],
    );

    let begin = Instant::now();

    let response = http.execute(request).await?;
    let status = response.status().as_u16();
    let body = response.text().await?;

    log.info(
        "request processed",
        &[
            LogField::new("code", status),
            LogField::new("duration", format!("{:?}", begin.elapsed())),
            LogField::new("body", &body),
        ],
    );

    if status >= 400 {
        return Err(ClientError::request(i64::from(status), body));
    }

    Ok(serde_json::from_str(&body)?)
}
