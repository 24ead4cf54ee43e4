//! Query cache scopes.
//!
//! Each component handle carries an immutable stack of directives. Entering a
//! scope builds a new stack that shares its tail with the old one, so the
//! caller's stack never changes, whatever the scoped code does.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::deps::Dependency;

#[derive(Clone)]
pub enum CacheDirective {
    /// Cache data-retrieval results for `duration` (zero: no expiry).
    Enabled {
        duration: Duration,
        dependency: Option<Arc<dyn Dependency>>,
    },
    /// Bypass the cache, even inside an enclosing `Enabled` scope.
    Disabled,
}

impl fmt::Debug for CacheDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheDirective::Enabled {
                duration,
                dependency,
            } => f
                .debug_struct("Enabled")
                .field("duration", duration)
                .field("has_dependency", &dependency.is_some())
                .finish(),
            CacheDirective::Disabled => f.write_str("Disabled"),
        }
    }
}

struct Frame {
    directive: CacheDirective,
    parent: Option<Arc<Frame>>,
    depth: usize,
}

#[derive(Clone, Default)]
pub struct ScopeStack {
    top: Option<Arc<Frame>>,
}

impl ScopeStack {
    pub fn push(&self, directive: CacheDirective) -> Self {
        let depth = self.depth() + 1;
        Self {
            top: Some(Arc::new(Frame {
                directive,
                parent: self.top.clone(),
                depth,
            })),
        }
    }

    /// The innermost directive, if any scope is active.
    pub fn current(&self) -> Option<&CacheDirective> {
        self.top.as_deref().map(|frame| &frame.directive)
    }

    pub fn depth(&self) -> usize {
        self.top.as_ref().map_or(0, |frame| frame.depth)
    }

    /// The enclosing stack, as seen before the innermost scope was entered.
    pub fn parent(&self) -> Self {
        Self {
            top: self.top.as_ref().and_then(|frame| frame.parent.clone()),
        }
    }
}

impl fmt::Debug for ScopeStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeStack")
            .field("depth", &self.depth())
            .field("current", &self.current())
            .finish()
    }
}
