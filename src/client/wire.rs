//! Raw JSON shapes of the proxy6 API.
//!
//! Fields mirror the provider's names; absent fields fall back to their defaults.

use serde::Deserialize;

/// One entry of the `list` array, as sent by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawProxy {
    pub id: String,
    pub host: String,
    pub port: String,
    pub user: String,
    pub pass: String,
    #[serde(rename = "type")]
    pub proxy_type: String,
    pub country: String,
    pub date: String,
    pub date_end: String,
    pub unixtime: i64,
    pub unixtime_end: i64,
    pub descr: String,
    pub active: String,
}

/// `getproxy` response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProxyListResponse {
    /// `"yes"` or `"no"`.
    pub status: String,
    pub error_id: i64,
    pub error: String,
    pub list_count: i64,
    pub list: Vec<RawProxy>,
}

impl ProxyListResponse {
    /// The provider reports failures inside a successful HTTP response.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == "no" || self.error_id > 0 || !self.error.is_empty()
    }
}
