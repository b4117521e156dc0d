//! Domain orchestration service for walk directions.
//!
//! The service owns the cache policy: similarity lookup before calling the
//! provider, no caching of quota refusals, replacement of similar entries on
//! every fresh save, and the "route or nothing" error contract.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    DirectionsRequest, DirectionsRequestOptions, DirectionsSource, RouteCache, RouteNormalizer,
};
use crate::domain::{CacheEntry, GeoPoint, ModeSwitchSignal, ResolvedDirections, RouteQuery, Walk};

mod failure;

use failure::ResolveFailure;

/// Service configuration, read once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionsServiceConfig {
    /// Consult and populate the route cache.
    pub cache_enabled: bool,
    /// Provider credentials and routing heuristic.
    pub request_options: DirectionsRequestOptions,
}

impl Default for DirectionsServiceConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            request_options: DirectionsRequestOptions::default(),
        }
    }
}

/// Port bundle required by the directions service.
pub struct DirectionsServicePorts {
    /// Outbound provider adapter.
    pub source: Arc<dyn DirectionsSource>,
    /// Similarity-keyed response store.
    pub cache: Arc<dyn RouteCache>,
    /// Payload to walk translator.
    pub normalizer: Arc<dyn RouteNormalizer>,
}

impl DirectionsServicePorts {
    /// Build a strongly-typed port bundle.
    pub fn new(
        source: Arc<dyn DirectionsSource>,
        cache: Arc<dyn RouteCache>,
        normalizer: Arc<dyn RouteNormalizer>,
    ) -> Self {
        Self {
            source,
            cache,
            normalizer,
        }
    }
}

/// Cache-fronted directions resolver.
///
/// `get_directions` may be called concurrently from many tasks; the provider
/// call is the only suspension point and no cache lock is held across it.
pub struct DirectionsService {
    source: Arc<dyn DirectionsSource>,
    cache: Option<Arc<dyn RouteCache>>,
    normalizer: Arc<dyn RouteNormalizer>,
    clock: Arc<dyn Clock + Send + Sync>,
    request_options: DirectionsRequestOptions,
}

impl DirectionsService {
    /// Build a service. When caching is disabled the cache port is dropped
    /// and never touched.
    /// ```rust,ignore
    /// let service = DirectionsService::new(ports, Arc::new(DefaultClock), config);
    /// ```
    pub fn new(
        ports: DirectionsServicePorts,
        clock: Arc<dyn Clock + Send + Sync>,
        config: DirectionsServiceConfig,
    ) -> Self {
        Self {
            source: ports.source,
            cache: config.cache_enabled.then_some(ports.cache),
            normalizer: ports.normalizer,
            clock,
            request_options: config.request_options,
        }
    }

    /// Whether lookups consult the cache.
    pub const fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Number of cached responses; zero when caching is disabled.
    pub fn cache_len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.len())
    }

    /// Resolve a walk from `origin` through `waypoints` to `destination`.
    ///
    /// Returns `Ok(None)` when no route is available right now (quota
    /// refusal, transport or decode failure, unusable payload). Only a
    /// [`ModeSwitchSignal`] is returned as an error.
    /// ```rust,ignore
    /// let walk = service.get_directions(origin, vec![], destination).await?;
    /// ```
    pub async fn get_directions(
        &self,
        origin: GeoPoint,
        waypoints: Vec<GeoPoint>,
        destination: GeoPoint,
    ) -> Result<Option<Walk>, ModeSwitchSignal> {
        self.get_directions_for(RouteQuery::new(origin, waypoints, destination))
            .await
    }

    /// Resolve a walk for a prepared query. See [`Self::get_directions`].
    pub async fn get_directions_for(
        &self,
        query: RouteQuery,
    ) -> Result<Option<Walk>, ModeSwitchSignal> {
        match self.resolve_walk(query).await {
            Ok(walk) => Ok(walk),
            Err(ResolveFailure::Propagate(signal)) => {
                info!(rule = signal.rule(), "propagating mode switch signal");
                Err(signal)
            }
            Err(ResolveFailure::Absorbed(reason)) => {
                warn!(%reason, "directions unavailable; returning no route");
                Ok(None)
            }
        }
    }

    async fn resolve_walk(&self, query: RouteQuery) -> Result<Option<Walk>, ResolveFailure> {
        let Some(resolved) = self.resolve(query).await? else {
            return Ok(None);
        };
        let walk = self.normalizer.normalize(&resolved)?;
        Ok(Some(walk))
    }

    async fn resolve(&self, query: RouteQuery) -> Result<Option<ResolvedDirections>, ResolveFailure> {
        if let Some(entry) = self.lookup_cached(&query) {
            return Ok(Some(ResolvedDirections::cached(entry)));
        }

        let request = DirectionsRequest::new(query, &self.request_options);
        let response = self.source.fetch_directions(&request).await?;
        if response.status.is_over_query_limit() {
            info!("directions provider over query limit; response not cached");
            return Ok(None);
        }

        let entry = Arc::new(CacheEntry::new(
            request.into_query(),
            response,
            self.clock.utc(),
        ));
        if let Some(cache) = &self.cache {
            cache.insert(Arc::clone(&entry));
            debug!(
                status = entry.response().status.as_str(),
                cached_entries = cache.len(),
                "stored fresh directions"
            );
        }
        Ok(Some(ResolvedDirections::fresh(entry)))
    }

    fn lookup_cached(&self, query: &RouteQuery) -> Option<Arc<CacheEntry>> {
        let cache = self.cache.as_ref()?;
        let hit = cache.lookup(query);
        debug!(hit = hit.is_some(), "route cache lookup");
        hit
    }
}

#[cfg(test)]
mod tests;
