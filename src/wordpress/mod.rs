//! The WordPress component.
//!
//! [`Wordpress`] validates its settings, owns the client collaborator and
//! forwards every allow-listed operation to it, consulting the query cache
//! for data-retrieval calls made inside a [`Wordpress::cache`] scope.

mod dynamic;
mod operations;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error, instrument, trace, warn};
use url::Url;

use crate::answer::{Answer, Fallback};
use crate::cache::{CacheDirective, CacheKey, Dependency, MemoryQueryCache, QueryCache, ScopeStack};
use crate::client::WordpressApi;
use crate::config::{QueryCacheSettings, WordpressSettings};
use crate::error::{ClientResult, ConfigurationError, WordpressError};
use crate::method::Method;
use crate::telemetry::{
    METRIC_CALL_FAILURE_TOTAL, METRIC_QUERY_CACHE_HIT_TOTAL, METRIC_QUERY_CACHE_MISS_TOTAL,
};

const COMPONENT: &str = "wpbridge::Wordpress";

pub type CallResult<T> = Result<Answer<T>, WordpressError>;

struct Inner<C> {
    client: C,
    endpoint: Url,
    identity: String,
    query_cache: Option<Arc<dyn QueryCache>>,
    cache_settings: QueryCacheSettings,
    catch_exceptions: bool,
}

/// Cache parameters that apply to the call being forwarded.
struct ActiveCache {
    backend: Arc<dyn QueryCache>,
    ttl: Option<Duration>,
    dependency: Option<Arc<dyn Dependency>>,
}

/// A handle on one WordPress site.
///
/// Handles are cheap to clone and share the client, the settings and the
/// cache backend. Each handle also carries its own cache scope stack; the
/// handles passed to [`cache`](Self::cache) and [`no_cache`](Self::no_cache)
/// closures are the only ones that see the scope they open.
pub struct Wordpress<C> {
    inner: Arc<Inner<C>>,
    scope: ScopeStack,
}

impl<C> Clone for Wordpress<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            scope: self.scope.clone(),
        }
    }
}

impl<C: WordpressApi> Wordpress<C> {
    /// Validate `settings`, connect the client and use an in-memory query
    /// cache sized by `settings.query_cache.capacity`.
    pub fn new(settings: WordpressSettings) -> Result<Self, ConfigurationError> {
        let backend: Arc<dyn QueryCache> =
            Arc::new(MemoryQueryCache::new(settings.query_cache.capacity));
        Self::with_query_cache(settings, Some(backend))
    }

    /// Like [`new`](Self::new), with an explicit cache backend (or none).
    pub fn with_query_cache(
        settings: WordpressSettings,
        query_cache: Option<Arc<dyn QueryCache>>,
    ) -> Result<Self, ConfigurationError> {
        let connection = settings.validate()?;

        let mut client = C::connect(&connection.endpoint, &connection.credentials)
            .map_err(ConfigurationError::Connect)?;
        if let Some(proxy) = settings.proxy.as_ref() {
            client.set_proxy(proxy);
        }
        if let Some(auth) = settings.http_auth.as_ref() {
            client.set_auth(auth);
        }

        debug!(
            endpoint = %connection.endpoint,
            query_cache = query_cache.is_some(),
            catch_exceptions = settings.catch_exceptions,
            "WordPress client ready"
        );

        let identity = format!("{COMPONENT}@{}", connection.endpoint);
        Ok(Self {
            inner: Arc::new(Inner {
                client,
                endpoint: connection.endpoint,
                identity,
                query_cache,
                cache_settings: settings.query_cache,
                catch_exceptions: settings.catch_exceptions,
            }),
            scope: ScopeStack::default(),
        })
    }
}

impl<C> Wordpress<C> {
    /// The underlying client collaborator.
    pub fn client(&self) -> &C {
        &self.inner.client
    }

    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    pub fn scope(&self) -> &ScopeStack {
        &self.scope
    }

    /// Number of cache scopes enclosing this handle.
    pub fn scope_depth(&self) -> usize {
        self.scope.depth()
    }

    /// Run `f` with a handle whose data-retrieval calls use the query cache.
    ///
    /// Results are kept for `duration` (default: the configured
    /// `query_cache.duration`; zero keeps them until evicted) and are
    /// dropped early when `dependency` changes. Whatever `f` returns,
    /// including errors, is passed through unchanged.
    ///
    /// ```ignore
    /// let profile = blog
    ///     .cache(None, None, |blog| async move { blog.get_profile(&[]).await })
    ///     .await?;
    /// ```
    pub fn cache<F, Fut>(
        &self,
        duration: Option<Duration>,
        dependency: Option<Arc<dyn Dependency>>,
        f: F,
    ) -> Fut
    where
        F: FnOnce(Self) -> Fut,
        Fut: Future,
    {
        let duration = duration.unwrap_or(self.inner.cache_settings.duration);
        f(self.scoped(CacheDirective::Enabled {
            duration,
            dependency,
        }))
    }

    /// Run `f` with a handle that bypasses the query cache, even inside an
    /// enclosing [`cache`](Self::cache) scope.
    pub fn no_cache<F, Fut>(&self, f: F) -> Fut
    where
        F: FnOnce(Self) -> Fut,
        Fut: Future,
    {
        f(self.scoped(CacheDirective::Disabled))
    }

    fn scoped(&self, directive: CacheDirective) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            scope: self.scope.push(directive),
        }
    }

    fn active_cache(&self) -> Option<ActiveCache> {
        if !self.inner.cache_settings.enabled {
            return None;
        }
        let backend = self.inner.query_cache.as_ref()?;
        match self.scope.current()? {
            CacheDirective::Enabled {
                duration,
                dependency,
            } => Some(ActiveCache {
                backend: Arc::clone(backend),
                ttl: (!duration.is_zero()).then_some(*duration),
                dependency: dependency.clone(),
            }),
            CacheDirective::Disabled => None,
        }
    }

    /// Forward one call to the client, applying the cache and failure policy.
    ///
    /// `args` is only evaluated when the call is cacheable.
    #[instrument(name = "wordpress.call", skip_all, fields(method = %method))]
    pub(crate) async fn forward<'a, T, A, F, Fut>(
        &'a self,
        method: Method,
        args: A,
        call: F,
    ) -> CallResult<T>
    where
        T: Serialize + DeserializeOwned + Fallback,
        A: FnOnce() -> Vec<Value>,
        F: FnOnce(&'a C) -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let cache = if method.is_data_retrieval() {
            self.active_cache()
                .map(|cache| (CacheKey::new(&self.inner.identity, method, &args()), cache))
        } else {
            None
        };

        if let Some((key, cache)) = cache.as_ref() {
            if let Some(value) = cache.backend.get(key) {
                match serde_json::from_value::<T>(value) {
                    Ok(value) => {
                        counter!(METRIC_QUERY_CACHE_HIT_TOTAL).increment(1);
                        trace!(key_digest = key.digest(), "Query result served from cache");
                        return Ok(Answer::cached(value));
                    }
                    Err(err) => warn!(
                        key_digest = key.digest(),
                        error = %err,
                        "Ignoring cached query result that no longer decodes"
                    ),
                }
            }
            counter!(METRIC_QUERY_CACHE_MISS_TOTAL).increment(1);
        }

        match call(&self.inner.client).await {
            Ok(value) => {
                if let Some((key, cache)) = cache {
                    store(key, cache, &value);
                }
                Ok(Answer::remote(value))
            }
            Err(source) => {
                counter!(METRIC_CALL_FAILURE_TOTAL, "method" => method.name()).increment(1);
                if self.inner.catch_exceptions {
                    error!(error = %source, "WordPress API call failed; returning fallback");
                    Ok(Answer::fallback(T::fallback(), source))
                } else {
                    Err(WordpressError::Call { method, source })
                }
            }
        }
    }
}

fn store<T: Serialize>(key: CacheKey, cache: ActiveCache, value: &T) {
    match serde_json::to_value(value) {
        Ok(json) => {
            let digest = key.digest();
            cache.backend.set(key, json, cache.ttl, cache.dependency);
            trace!(key_digest = digest, "Saved query result in cache");
        }
        Err(err) => warn!(error = %err, "Query result could not be encoded for caching"),
    }
}
