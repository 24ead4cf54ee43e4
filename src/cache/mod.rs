//! Query cache.
//!
//! Results of data-retrieval calls made inside a `cache` scope are stored in
//! a [`QueryCache`] backend and served from it on later identical calls.
//!
//! ```toml
//! [query_cache]
//! enabled = true
//! duration_secs = 3600   # 0 = never expire
//! capacity = 1024
//! ```

pub mod deps;
mod keys;
mod lock;
mod scope;
mod store;

pub use deps::{Dependency, VersionDependency};
pub use keys::CacheKey;
pub use scope::{CacheDirective, ScopeStack};
pub use store::{MemoryQueryCache, QueryCache};
