//! Configuration layer: typed settings with layered precedence (file → env).

use std::{fmt, path::Path, str::FromStr, time::Duration};

use config::{Config, Environment, File};
use serde::Deserialize;
use url::Url;

use crate::error::ConfigurationError;

const LOCAL_CONFIG_BASENAME: &str = "wordpress";
const ENV_PREFIX: &str = "WORDPRESS";
const ENV_SEPARATOR: &str = "__";
pub(crate) const DEFAULT_QUERY_CACHE_DURATION_SECS: u64 = 3600;
pub(crate) const DEFAULT_QUERY_CACHE_CAPACITY: usize = 1024;

/// Settings of one WordPress component, before validation.
#[derive(Debug, Clone)]
pub struct WordpressSettings {
    /// XML-RPC endpoint, e.g. `https://blog.example.com/xmlrpc.php`.
    pub endpoint: String,
    /// Every forwarded call is made on behalf of this user.
    pub username: String,
    pub password: String,
    pub proxy: Option<ProxyConfig>,
    pub http_auth: Option<HttpAuthConfig>,
    pub query_cache: QueryCacheSettings,
    /// Log failed calls and return the operation's fallback instead of an error.
    pub catch_exceptions: bool,
}

impl WordpressSettings {
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: username.into(),
            password: password.into(),
            proxy: None,
            http_auth: None,
            query_cache: QueryCacheSettings::default(),
            catch_exceptions: true,
        }
    }

    /// Check the settings and resolve the endpoint and credentials.
    pub fn validate(&self) -> Result<Connection, ConfigurationError> {
        let endpoint = parse_endpoint(&self.endpoint)?;

        if self.username.trim().is_empty() || self.password.trim().is_empty() {
            return Err(ConfigurationError::invalid(
                "username",
                "a WordPress username and password are required",
            ));
        }

        if let Some(proxy) = self.proxy.as_ref() {
            proxy.validate()?;
        }
        if let Some(auth) = self.http_auth.as_ref() {
            auth.validate()?;
        }

        Ok(Connection {
            endpoint,
            credentials: Credentials {
                username: self.username.clone(),
                password: self.password.clone(),
            },
        })
    }
}

/// Query cache knobs of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryCacheSettings {
    /// Only results of calls made inside a `cache` scope are cached, and only
    /// while this flag is set.
    pub enabled: bool,
    /// Default lifetime of cached results; zero means they never expire.
    pub duration: Duration,
    /// Capacity of the built-in memory backend.
    pub capacity: usize,
}

impl Default for QueryCacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            duration: Duration::from_secs(DEFAULT_QUERY_CACHE_DURATION_SECS),
            capacity: DEFAULT_QUERY_CACHE_CAPACITY,
        }
    }
}

/// How a proxy or web server authenticates the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Basic,
    Digest,
    Ntlm,
    Any,
}

impl AuthMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthMode::Basic => "basic",
            AuthMode::Digest => "digest",
            AuthMode::Ntlm => "ntlm",
            AuthMode::Any => "any",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(AuthMode::Basic),
            "digest" => Ok(AuthMode::Digest),
            "ntlm" => Ok(AuthMode::Ntlm),
            "any" => Ok(AuthMode::Any),
            other => Err(format!(
                "unknown auth mode `{other}` (expected basic, digest, ntlm or any)"
            )),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Proxy host, without the port.
    pub ip: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub mode: AuthMode,
}

impl ProxyConfig {
    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.ip.trim().is_empty() {
            return Err(ConfigurationError::invalid(
                "proxy.ip",
                "proxy host must not be empty",
            ));
        }
        if self.port == 0 {
            return Err(ConfigurationError::invalid(
                "proxy.port",
                "port must be greater than zero",
            ));
        }
        if self.user.is_some() != self.password.is_some() {
            return Err(ConfigurationError::invalid(
                "proxy.user",
                "proxy user and password must be given together",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("ip", &self.ip)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("mode", &self.mode)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct HttpAuthConfig {
    pub user: String,
    pub password: String,
    pub mode: AuthMode,
}

impl HttpAuthConfig {
    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.user.trim().is_empty() {
            return Err(ConfigurationError::invalid(
                "http_auth.user",
                "http auth user must not be empty",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for HttpAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpAuthConfig")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("mode", &self.mode)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated endpoint and credentials, ready for client construction.
#[derive(Debug, Clone)]
pub struct Connection {
    pub endpoint: Url,
    pub credentials: Credentials,
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigurationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigurationError::invalid(
            "endpoint",
            "a URL to the WordPress XML-RPC endpoint is required",
        ));
    }

    let url = Url::parse(trimmed).map_err(|err| {
        ConfigurationError::invalid("endpoint", format!("`{trimmed}` is not a valid URL: {err}"))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigurationError::invalid(
            "endpoint",
            format!("unsupported scheme `{}`", url.scheme()),
        ));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ConfigurationError::invalid(
            "endpoint",
            "URL must include a host",
        ));
    }
    Ok(url)
}

/// Load settings using the configured precedence (file → environment).
///
/// `wordpress.{toml,yaml,json}` in the working directory is read when present,
/// then `config_file` when given, then `WORDPRESS__*` environment variables
/// (for example `WORDPRESS__QUERY_CACHE__DURATION_SECS`).
pub fn load(config_file: Option<&Path>) -> Result<WordpressSettings, ConfigurationError> {
    let mut builder =
        Config::builder().add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR));

    let raw: RawSettings = builder.build()?.try_deserialize()?;
    let settings = WordpressSettings::from_raw(raw)?;
    settings.validate()?;
    Ok(settings)
}

impl WordpressSettings {
    fn from_raw(raw: RawSettings) -> Result<Self, ConfigurationError> {
        let RawSettings {
            endpoint,
            username,
            password,
            proxy,
            http_auth,
            query_cache,
            catch_exceptions,
        } = raw;

        Ok(Self {
            endpoint: endpoint.unwrap_or_default(),
            username: username.unwrap_or_default(),
            password: password.unwrap_or_default(),
            proxy: proxy.map(build_proxy_config).transpose()?,
            http_auth: http_auth.map(build_http_auth_config).transpose()?,
            query_cache: build_query_cache_settings(query_cache),
            catch_exceptions: catch_exceptions.unwrap_or(true),
        })
    }
}

fn build_proxy_config(proxy: RawProxySettings) -> Result<ProxyConfig, ConfigurationError> {
    let ip = proxy
        .ip
        .ok_or_else(|| ConfigurationError::invalid("proxy.ip", "proxy host is required"))?;
    let port = proxy
        .port
        .ok_or_else(|| ConfigurationError::invalid("proxy.port", "proxy port is required"))?;
    let mode = parse_mode(proxy.mode, "proxy.mode")?;

    Ok(ProxyConfig {
        ip,
        port,
        user: proxy.user,
        password: proxy.password,
        mode,
    })
}

fn build_http_auth_config(auth: RawHttpAuthSettings) -> Result<HttpAuthConfig, ConfigurationError> {
    let user = auth
        .user
        .ok_or_else(|| ConfigurationError::invalid("http_auth.user", "user is required"))?;
    let mode = parse_mode(auth.mode, "http_auth.mode")?;

    Ok(HttpAuthConfig {
        user,
        password: auth.password.unwrap_or_default(),
        mode,
    })
}

fn build_query_cache_settings(raw: RawQueryCacheSettings) -> QueryCacheSettings {
    QueryCacheSettings {
        enabled: raw.enabled.unwrap_or(true),
        duration: Duration::from_secs(
            raw.duration_secs
                .unwrap_or(DEFAULT_QUERY_CACHE_DURATION_SECS),
        ),
        capacity: raw.capacity.unwrap_or(DEFAULT_QUERY_CACHE_CAPACITY),
    }
}

fn parse_mode(raw: Option<String>, key: &'static str) -> Result<AuthMode, ConfigurationError> {
    match raw {
        Some(value) => value
            .parse()
            .map_err(|reason| ConfigurationError::invalid(key, reason)),
        None => Ok(AuthMode::default()),
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    endpoint: Option<String>,
    username: Option<String>,
    password: Option<String>,
    proxy: Option<RawProxySettings>,
    http_auth: Option<RawHttpAuthSettings>,
    query_cache: RawQueryCacheSettings,
    catch_exceptions: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct RawProxySettings {
    ip: Option<String>,
    port: Option<u16>,
    user: Option<String>,
    password: Option<String>,
    mode: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct RawHttpAuthSettings {
    user: Option<String>,
    password: Option<String>,
    mode: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawQueryCacheSettings {
    enabled: Option<bool>,
    duration_secs: Option<u64>,
    capacity: Option<usize>,
}
