//! Cached provider results and the per-call provenance envelope.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::RouteQuery;
use super::ports::DirectionsResponse;

/// A provider response remembered for the query that produced it.
///
/// Entries are immutable once stored; whether a caller got one from the cache
/// is reported through [`ResolvedDirections`].
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    query: RouteQuery,
    response: DirectionsResponse,
    fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Wrap a fresh provider response.
    pub const fn new(
        query: RouteQuery,
        response: DirectionsResponse,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            query,
            response,
            fetched_at,
        }
    }

    /// Query the response answers.
    pub const fn query(&self) -> &RouteQuery {
        &self.query
    }

    /// Provider payload.
    pub const fn response(&self) -> &DirectionsResponse {
        &self.response
    }

    /// When the provider was called.
    pub const fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}

/// Directions resolved for one call, with provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDirections {
    entry: Arc<CacheEntry>,
    served_from_cache: bool,
}

impl ResolvedDirections {
    /// Directions that were just fetched from the provider.
    pub const fn fresh(entry: Arc<CacheEntry>) -> Self {
        Self {
            entry,
            served_from_cache: false,
        }
    }

    /// Directions found in the cache.
    pub const fn cached(entry: Arc<CacheEntry>) -> Self {
        Self {
            entry,
            served_from_cache: true,
        }
    }

    /// Underlying entry.
    pub fn entry(&self) -> &CacheEntry {
        &self.entry
    }

    /// Whether the cache answered this call without a provider round trip.
    pub const fn served_from_cache(&self) -> bool {
        self.served_from_cache
    }
}
