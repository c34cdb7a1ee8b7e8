use crate::error::{ClientError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Lifecycle filter accepted by `getproxy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProxyState {
    Unknown,
    #[default]
    Active,
    Expired,
    Expiring,
    All,
}

impl ProxyState {
    /// Case-insensitive parse of `all`, `expiring`, `expired` or `active`.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "expiring" => Ok(Self::Expiring),
            "expired" => Ok(Self::Expired),
            "active" => Ok(Self::Active),
            _ => Err(ClientError::parse(
                "state",
                format!("unsupported value {value}"),
            )),
        }
    }

    /// Like [`parse`](Self::parse), but an empty filter selects [`ProxyState::All`].
    pub fn from_filter(value: &str) -> Result<Self> {
        if value.is_empty() {
            return Ok(Self::All);
        }
        Self::parse(value)
    }

    /// Query-string form. `Unknown` renders empty.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Expiring => "expiring",
            Self::Expired => "expired",
            Self::Active => "active",
            Self::Unknown => "",
        }
    }
}

impl FromStr for ProxyState {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ProxyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProxyState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Filters for a list call. An empty `descr` means no description filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProxyParams {
    pub descr: String,
    pub state: ProxyState,
}
