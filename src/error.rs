use thiserror::Error;

use crate::method::Method;

/// Failure reported by a [`WordpressApi`](crate::client::WordpressApi) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("xml-rpc fault {code}: {message}")]
    Fault { code: i32, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl ClientError {
    pub fn fault(code: i32, message: impl Into<String>) -> Self {
        Self::Fault {
            code,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while loading or validating component settings.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to build configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("failed to construct wordpress client: {0}")]
    Connect(#[source] ClientError),
}

impl ConfigurationError {
    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by forwarded calls.
#[derive(Debug, Error)]
pub enum WordpressError {
    #[error("method `{method}` is not supported by the wordpress component")]
    MethodNotSupported { method: String },
    #[error("invalid arguments for `{method}`: {reason}")]
    InvalidArguments { method: Method, reason: String },
    #[error("wordpress call `{method}` failed: {source}")]
    Call {
        method: Method,
        #[source]
        source: ClientError,
    },
    #[error("failed to encode result of `{method}`: {source}")]
    Encode {
        method: Method,
        #[source]
        source: serde_json::Error,
    },
}

impl WordpressError {
    pub(crate) fn invalid_arguments(method: Method, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            method,
            reason: reason.into(),
        }
    }

    /// The collaborator error behind a propagated call failure.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Call { source, .. } => Some(source),
            _ => None,
        }
    }
}
