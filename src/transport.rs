//! Helpers for [`WordpressApi`](crate::client::WordpressApi) implementations
//! that talk HTTP through `reqwest`.
//!
//! Only basic authentication is available here; `digest` and `ntlm` modes
//! are reported as [`ClientError::Unsupported`].

use reqwest::{Client, Proxy, RequestBuilder};

use crate::config::{AuthMode, HttpAuthConfig, ProxyConfig};
use crate::error::{ClientError, ClientResult};

pub fn user_agent() -> &'static str {
    concat!("wpbridge/", env!("CARGO_PKG_VERSION"))
}

fn ensure_basic(mode: AuthMode, what: &str) -> ClientResult<()> {
    match mode {
        AuthMode::Basic | AuthMode::Any => Ok(()),
        AuthMode::Digest | AuthMode::Ntlm => Err(ClientError::unsupported(format!(
            "{what} auth mode `{mode}` is not available over reqwest"
        ))),
    }
}

/// Build a `reqwest` proxy routing every scheme through `config`.
pub fn proxy(config: &ProxyConfig) -> ClientResult<Proxy> {
    let proxy = Proxy::all(format!("http://{}:{}", config.ip, config.port))
        .map_err(|err| ClientError::transport(err.to_string()))?;

    match (config.user.as_deref(), config.password.as_deref()) {
        (Some(user), Some(password)) => {
            ensure_basic(config.mode, "proxy")?;
            Ok(proxy.basic_auth(user, password))
        }
        _ => Ok(proxy),
    }
}

/// An HTTP client with this crate's user agent and an optional proxy.
pub fn http_client(proxy_config: Option<&ProxyConfig>) -> ClientResult<Client> {
    let mut builder = Client::builder().user_agent(user_agent());
    if let Some(config) = proxy_config {
        builder = builder.proxy(proxy(config)?);
    }
    builder
        .build()
        .map_err(|err| ClientError::transport(err.to_string()))
}

/// Attach HTTP authentication to an outgoing request.
pub fn authorize(request: RequestBuilder, auth: &HttpAuthConfig) -> ClientResult<RequestBuilder> {
    ensure_basic(auth.mode, "http")?;
    Ok(request.basic_auth(&auth.user, Some(&auth.password)))
}
