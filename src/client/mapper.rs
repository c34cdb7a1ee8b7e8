use super::wire::{ProxyListResponse, RawProxy};
use crate::entities::{Proxy, ProxyType, Sensitive};
use crate::error::{ClientError, Result};
use chrono::{DateTime, Utc};

/// Map every record of a successful envelope. The first bad record fails the whole batch.
pub fn map_proxy_response(response: ProxyListResponse) -> Result<Vec<Proxy>> {
    response.list.into_iter().map(map_proxy).collect()
}

/// Translate one provider record into a [`Proxy`].
pub fn map_proxy(raw: RawProxy) -> Result<Proxy> {
    let port = raw.port.parse::<u16>().map_err(|source| ClientError::Port {
        value: raw.port.clone(),
        source,
    })?;
    let proxy_type = ProxyType::parse(&raw.proxy_type)?;
    let date = from_unix("unixtime", raw.unixtime)?;
    let expire_date = from_unix("unixtime_end", raw.unixtime_end)?;

    Ok(Proxy {
        id: raw.id,
        host: raw.host,
        port,
        user: raw.user,
        password: Sensitive::new(raw.pass),
        proxy_type,
        country: raw.country,
        date,
        expire_date,
        description: raw.descr,
        active: raw.active.eq_ignore_ascii_case("1"),
    })
}

fn from_unix(name: &str, secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| ClientError::parse(name, format!("timestamp {secs} out of range")))
}
