//! Cache dependencies.
//!
//! A dependency is evaluated when a result is stored and again when it is
//! read back; a changed value makes the stored result stale.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub trait Dependency: Send + Sync {
    /// Current state of whatever the cached result depends on.
    fn evaluate(&self) -> u64;
}

impl<F> Dependency for F
where
    F: Fn() -> u64 + Send + Sync,
{
    fn evaluate(&self) -> u64 {
        self()
    }
}

/// A shared version counter. Bumping it invalidates every entry stored
/// under any clone of this dependency.
#[derive(Clone, Default)]
pub struct VersionDependency {
    version: Arc<AtomicU64>,
}

impl VersionDependency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&self) {
        self.version.fetch_add(1, Ordering::AcqRel);
    }
}

impl Dependency for VersionDependency {
    fn evaluate(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}

impl fmt::Debug for VersionDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionDependency")
            .field("version", &self.evaluate())
            .finish()
    }
}

/// A dependency paired with its value at store time.
#[derive(Clone)]
pub(crate) struct DependencySnapshot {
    dependency: Arc<dyn Dependency>,
    evaluated: u64,
}

impl DependencySnapshot {
    pub(crate) fn capture(dependency: Arc<dyn Dependency>) -> Self {
        let evaluated = dependency.evaluate();
        Self {
            dependency,
            evaluated,
        }
    }

    pub(crate) fn is_changed(&self) -> bool {
        self.dependency.evaluate() != self.evaluated
    }
}
