//! Error types for the proxy6 client.

use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ClientError {
    /// Setup or configuration problem.
    #[error("{message}")]
    General { message: String },

    /// Non-success HTTP status, or an error reported inside the provider's envelope.
    #[error("unexpected code {code}{}", message_suffix(.message))]
    Request { code: i64, message: String },

    #[error("parsing {name}: {reason}")]
    Parse { name: String, reason: String },

    #[error("type {value}: wrong proxy type")]
    WrongProxyType { value: String },

    #[error("parsing port {value:?}: {source}")]
    Port {
        value: String,
        source: ParseIntError,
    },

    #[error("doing request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("decoding json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn message_suffix(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {message}")
    }
}

impl ClientError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General {
            message: msg.into(),
        }
    }

    pub fn request(code: i64, msg: impl Into<String>) -> Self {
        Self::Request {
            code,
            message: msg.into(),
        }
    }

    pub fn parse(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Status code or provider error id of a request error, `-1` otherwise.
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            Self::Request { code, .. } => *code,
            _ => -1,
        }
    }

    /// Message carried by a request or general error, empty otherwise.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Request { message, .. } | Self::General { message } => message.as_str(),
            _ => "",
        }
    }
}

fn find_client_error<'a>(err: &'a (dyn std::error::Error + 'static)) -> Option<&'a ClientError> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(client_err) = e.downcast_ref::<ClientError>() {
            return Some(client_err);
        }
        current = e.source();
    }
    None
}

/// Extract the request code from any error whose source chain holds a [`ClientError`].
#[must_use]
pub fn get_code(err: &(dyn std::error::Error + 'static)) -> i64 {
    find_client_error(err).map_or(-1, ClientError::code)
}

/// Extract the message from any error whose source chain holds a [`ClientError`].
#[must_use]
pub fn get_message(err: &(dyn std::error::Error + 'static)) -> String {
    find_client_error(err)
        .map(|e| e.message().to_string())
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, ClientError>;
