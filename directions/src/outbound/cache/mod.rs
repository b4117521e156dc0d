//! In-process route cache adapter.
//!
//! Entries live in a `Vec` scanned linearly with the similarity predicate;
//! there is no hashable key because matching is tolerance based. The cache is
//! unbounded: entries leave only when a fresher similar entry replaces them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{trace, warn};

use crate::domain::ports::RouteCache;
use crate::domain::{CacheEntry, RouteQuery};

/// Mutex-guarded, similarity-keyed route cache.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use chrono::Utc;
/// use directions::domain::ports::{DirectionsResponse, DirectionsStatus, RouteCache};
/// use directions::domain::{CacheEntry, GeoPoint, RouteQuery};
/// use directions::outbound::cache::InMemoryRouteCache;
///
/// let p = |lat, lng| GeoPoint::new(lat, lng).expect("valid point");
/// let query = RouteQuery::new(p(0.0, 0.0), vec![], p(1.0, 1.0));
/// let response = DirectionsResponse { status: DirectionsStatus::Ok, routes: vec![] };
///
/// let cache = InMemoryRouteCache::new();
/// cache.insert(Arc::new(CacheEntry::new(query.clone(), response, Utc::now())));
/// assert!(cache.lookup(&query).is_some());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRouteCache {
    entries: Mutex<Vec<Arc<CacheEntry>>>,
}

impl InMemoryRouteCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of stored entries in iteration order.
    pub fn entries(&self) -> Vec<Arc<CacheEntry>> {
        self.lock_entries().clone()
    }

    fn lock_entries(&self) -> MutexGuard<'_, Vec<Arc<CacheEntry>>> {
        self.entries.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("route cache mutex poisoned; recovering entries");
            poisoned.into_inner()
        })
    }
}

impl RouteCache for InMemoryRouteCache {
    fn lookup(&self, query: &RouteQuery) -> Option<Arc<CacheEntry>> {
        self.lock_entries()
            .iter()
            .find(|entry| query.is_same_query(entry.query()))
            .cloned()
    }

    fn insert(&self, entry: Arc<CacheEntry>) {
        let mut entries = self.lock_entries();
        let before = entries.len();
        entries.retain(|existing| !existing.query().is_same_query(entry.query()));
        let evicted = before - entries.len();
        entries.push(entry);
        trace!(evicted, cached_entries = entries.len(), "route cache insert");
    }

    fn len(&self) -> usize {
        self.lock_entries().len()
    }
}
