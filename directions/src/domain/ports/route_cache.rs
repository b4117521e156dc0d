//! Port interface for caching provider responses by query similarity.
use std::sync::Arc;

use crate::domain::{CacheEntry, RouteQuery};

/// Similarity-keyed store of previous provider responses.
///
/// Implementations must keep at most one entry matching any query under
/// [`RouteQuery::is_same_query`], and must make `insert`'s
/// find-evict-append sequence atomic with respect to concurrent callers.
/// Neither operation can fail.
#[cfg_attr(test, mockall::automock)]
pub trait RouteCache: Send + Sync {
    /// Return the first stored entry whose query matches `query`.
    fn lookup(&self, query: &RouteQuery) -> Option<Arc<CacheEntry>>;

    /// Store `entry`, evicting any entry whose query matches it.
    fn insert(&self, entry: Arc<CacheEntry>);

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// Whether nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
