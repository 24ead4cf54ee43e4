//! WordPress XML-RPC component with scoped query caching.
//!
//! [`Wordpress`] validates its settings, builds a [`WordpressApi`] client and
//! forwards an allow-listed set of operations to it. Data-retrieval calls made
//! inside [`Wordpress::cache`] are served from a [`QueryCache`]; failures can
//! be turned into per-operation fallback values.

pub mod answer;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod method;
pub mod telemetry;
pub mod transport;
mod wordpress;

pub use answer::{Answer, Fallback, Origin};
pub use cache::{
    CacheDirective, CacheKey, Dependency, MemoryQueryCache, QueryCache, ScopeStack,
    VersionDependency,
};
pub use client::{NewTerm, Record, WordpressApi};
pub use config::{
    AuthMode, Connection, Credentials, HttpAuthConfig, ProxyConfig, QueryCacheSettings,
    WordpressSettings,
};
pub use error::{ClientError, ClientResult, ConfigurationError, WordpressError};
pub use method::{FallbackKind, Method, UnknownMethod};
pub use wordpress::{CallResult, Wordpress};
