//! Behavioural tests for the cache-fronted directions service.

use std::sync::Arc;

use rstest::rstest;
use tokio::sync::Barrier;

use super::*;
use crate::domain::ports::{
    DirectionsResponse, DirectionsSourceError, DirectionsStatus, MockDirectionsSource,
    MockRouteCache, MockRouteNormalizer, RouteNormalizerError,
};
use crate::domain::{StepWalkNormalizer, TravelMode};
use crate::outbound::cache::InMemoryRouteCache;
use crate::test_support::{
    FixedClock, ScriptedDirectionsSource, ok_response, over_query_limit_response, point,
    sample_instant,
};

struct Harness {
    service: DirectionsService,
    source: Arc<ScriptedDirectionsSource>,
    cache: Arc<InMemoryRouteCache>,
}

fn harness(source: ScriptedDirectionsSource, config: DirectionsServiceConfig) -> Harness {
    let source = Arc::new(source);
    let cache = Arc::new(InMemoryRouteCache::new());
    let ports = DirectionsServicePorts::new(
        source.clone(),
        cache.clone(),
        Arc::new(StepWalkNormalizer),
    );
    Harness {
        service: DirectionsService::new(ports, Arc::new(FixedClock::default()), config),
        source,
        cache,
    }
}

fn zero_results_response() -> DirectionsResponse {
    DirectionsResponse {
        status: DirectionsStatus::parse("ZERO_RESULTS"),
        routes: Vec::new(),
    }
}

#[tokio::test]
async fn drifted_origin_is_served_from_cache() {
    let h = harness(
        ScriptedDirectionsSource::echoing(),
        DirectionsServiceConfig::default(),
    );
    let origin = point(51.5007, -0.1246);
    let destination = point(51.5033, -0.1195);

    let first = h
        .service
        .get_directions(origin, vec![], destination)
        .await
        .expect("no signal")
        .expect("route available");
    let second = h
        .service
        .get_directions(origin.offset_north(5.0), vec![], destination)
        .await
        .expect("no signal")
        .expect("route available");

    assert!(!first.from_cache);
    assert!(second.from_cache);
    assert_eq!(second.points, first.points);
    assert_eq!(second.requested_at, first.requested_at);
    assert_eq!(h.source.calls(), 1);
    assert_eq!(h.service.cache_len(), 1);
}

#[tokio::test]
async fn fresh_walk_carries_clock_time_and_provider_totals() {
    let h = harness(
        ScriptedDirectionsSource::echoing(),
        DirectionsServiceConfig::default(),
    );
    let origin = point(48.8584, 2.2945);
    let destination = point(48.8606, 2.3376);

    let walk = h
        .service
        .get_directions(origin, vec![], destination)
        .await
        .expect("no signal")
        .expect("route available");

    assert!(!walk.from_cache);
    assert_eq!(walk.requested_at, sample_instant());
    assert_eq!(walk.points, vec![origin, destination]);
    assert_eq!(walk.distance_metres, 100);
}

#[tokio::test]
async fn query_past_tolerance_goes_to_provider() {
    let h = harness(
        ScriptedDirectionsSource::echoing(),
        DirectionsServiceConfig::default(),
    );
    let origin = point(51.5007, -0.1246);
    let destination = point(51.5033, -0.1195);

    for candidate in [origin, origin.offset_north(10.5)] {
        let walk = h
            .service
            .get_directions(candidate, vec![], destination)
            .await
            .expect("no signal")
            .expect("route available");
        assert!(!walk.from_cache);
    }
    assert_eq!(h.source.calls(), 2);
    assert_eq!(h.service.cache_len(), 2);
}

#[tokio::test]
async fn waypoint_difference_misses_the_cache() {
    let h = harness(
        ScriptedDirectionsSource::echoing(),
        DirectionsServiceConfig::default(),
    );
    let origin = point(40.7580, -73.9855);
    let destination = point(40.7484, -73.9857);
    let via = point(40.7527, -73.9772);

    h.service
        .get_directions(origin, vec![], destination)
        .await
        .expect("no signal");
    let walk = h
        .service
        .get_directions(origin, vec![via], destination)
        .await
        .expect("no signal")
        .expect("route available");

    assert!(!walk.from_cache);
    assert_eq!(h.source.calls(), 2);
}

#[tokio::test]
async fn disabled_cache_is_never_touched() {
    let mut cache = MockRouteCache::new();
    cache.expect_lookup().never();
    cache.expect_insert().never();
    cache.expect_len().never();
    let source = Arc::new(ScriptedDirectionsSource::echoing());
    let ports = DirectionsServicePorts::new(
        source.clone(),
        Arc::new(cache),
        Arc::new(StepWalkNormalizer),
    );
    let service = DirectionsService::new(
        ports,
        Arc::new(FixedClock::default()),
        DirectionsServiceConfig {
            cache_enabled: false,
            ..DirectionsServiceConfig::default()
        },
    );
    let origin = point(35.6586, 139.7454);
    let destination = point(35.6595, 139.7005);

    for _ in 0..3 {
        let walk = service
            .get_directions(origin, vec![], destination)
            .await
            .expect("no signal")
            .expect("route available");
        assert!(!walk.from_cache);
    }

    assert!(!service.cache_enabled());
    assert_eq!(service.cache_len(), 0);
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn over_query_limit_is_not_cached() {
    let h = harness(
        ScriptedDirectionsSource::always(Ok(over_query_limit_response())),
        DirectionsServiceConfig::default(),
    );
    let origin = point(52.5163, 13.3777);
    let destination = point(52.5200, 13.4050);

    for _ in 0..2 {
        let walk = h
            .service
            .get_directions(origin, vec![], destination)
            .await
            .expect("no signal");
        assert!(walk.is_none());
    }

    assert_eq!(h.source.calls(), 2);
    assert!(h.cache.entries().is_empty());
}

#[tokio::test]
async fn zero_results_is_cached_but_yields_no_walk() {
    let h = harness(
        ScriptedDirectionsSource::always(Ok(zero_results_response())),
        DirectionsServiceConfig::default(),
    );
    let origin = point(0.0, -30.0);
    let destination = point(0.0, -29.0);

    for _ in 0..2 {
        let walk = h
            .service
            .get_directions(origin, vec![], destination)
            .await
            .expect("no signal");
        assert!(walk.is_none());
    }

    assert_eq!(h.source.calls(), 1);
    assert_eq!(h.service.cache_len(), 1);
}

#[rstest]
#[case::transport(DirectionsSourceError::transport("connection reset"))]
#[case::timeout(DirectionsSourceError::timeout("deadline elapsed"))]
#[case::rate_limited(DirectionsSourceError::rate_limited("status 429"))]
#[case::decode(DirectionsSourceError::decode("missing status"))]
#[case::invalid_request(DirectionsSourceError::invalid_request("status 403"))]
#[tokio::test]
async fn provider_failures_are_absorbed(#[case] error: DirectionsSourceError) {
    let h = harness(
        ScriptedDirectionsSource::always(Err(error)),
        DirectionsServiceConfig::default(),
    );

    let walk = h
        .service
        .get_directions(point(10.0, 10.0), vec![], point(10.01, 10.0))
        .await
        .expect("failure must be absorbed");

    assert!(walk.is_none());
    assert_eq!(h.service.cache_len(), 0);
}

#[tokio::test]
async fn mode_switch_from_source_is_propagated() {
    let mut source = MockDirectionsSource::new();
    source
        .expect_fetch_directions()
        .times(1)
        .returning(|_| Err(DirectionsSourceError::mode_switch("battery-saver")));
    let cache = Arc::new(InMemoryRouteCache::new());
    let service = DirectionsService::new(
        DirectionsServicePorts::new(
            Arc::new(source),
            cache.clone(),
            Arc::new(StepWalkNormalizer),
        ),
        Arc::new(FixedClock::default()),
        DirectionsServiceConfig::default(),
    );

    let signal = service
        .get_directions(point(1.0, 1.0), vec![], point(1.01, 1.0))
        .await
        .expect_err("signal must escape");

    assert_eq!(signal.rule(), "battery-saver");
    assert!(cache.entries().is_empty());
}

#[tokio::test]
async fn mode_switch_from_normalizer_is_propagated() {
    let mut normalizer = MockRouteNormalizer::new();
    normalizer
        .expect_normalize()
        .times(1)
        .returning(|_| Err(RouteNormalizerError::mode_switch("night-walk")));
    let source = Arc::new(ScriptedDirectionsSource::echoing());
    let cache = Arc::new(InMemoryRouteCache::new());
    let service = DirectionsService::new(
        DirectionsServicePorts::new(source.clone(), cache.clone(), Arc::new(normalizer)),
        Arc::new(FixedClock::default()),
        DirectionsServiceConfig::default(),
    );

    let signal = service
        .get_directions(point(1.0, 1.0), vec![], point(1.01, 1.0))
        .await
        .expect_err("signal must escape");

    assert_eq!(signal.rule(), "night-walk");
    assert_eq!(source.calls(), 1);
    assert_eq!(cache.entries().len(), 1);
}

#[tokio::test]
async fn malformed_payload_is_absorbed() {
    let mut normalizer = MockRouteNormalizer::new();
    normalizer
        .expect_normalize()
        .times(1)
        .returning(|_| Err(RouteNormalizerError::malformed("route has no legs")));
    let service = DirectionsService::new(
        DirectionsServicePorts::new(
            Arc::new(ScriptedDirectionsSource::echoing()),
            Arc::new(InMemoryRouteCache::new()),
            Arc::new(normalizer),
        ),
        Arc::new(FixedClock::default()),
        DirectionsServiceConfig::default(),
    );

    let walk = service
        .get_directions(point(1.0, 1.0), vec![], point(1.01, 1.0))
        .await
        .expect("failure must be absorbed");

    assert!(walk.is_none());
}

#[tokio::test]
async fn request_options_reach_the_source() {
    let config = DirectionsServiceConfig {
        cache_enabled: true,
        request_options: DirectionsRequestOptions {
            api_key: Some("k-123".to_owned()),
            travel_mode: Some(TravelMode::new("walking").expect("valid mode")),
        },
    };
    let h = harness(ScriptedDirectionsSource::echoing(), config);
    let via = point(45.4380, 12.3358);

    h.service
        .get_directions(point(45.4408, 12.3155), vec![via], point(45.4340, 12.3388))
        .await
        .expect("no signal");

    let requests = h.source.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.api_key(), Some("k-123"));
    assert_eq!(request.travel_mode().map(TravelMode::as_str), Some("walking"));
    assert_eq!(request.query().waypoints(), &[via]);
}

#[tokio::test]
async fn concurrent_distinct_queries_both_land_in_cache() {
    let barrier = Arc::new(Barrier::new(2));
    let h = harness(
        ScriptedDirectionsSource::echoing().with_barrier(barrier),
        DirectionsServiceConfig::default(),
    );
    let destination = point(41.9029, 12.4534);

    let (first, second) = tokio::join!(
        h.service
            .get_directions(point(41.8902, 12.4922), vec![], destination),
        h.service
            .get_directions(point(41.8986, 12.4769), vec![], destination),
    );

    assert!(first.expect("no signal").is_some());
    assert!(second.expect("no signal").is_some());
    assert_eq!(h.source.calls(), 2);
    assert_eq!(h.service.cache_len(), 2);
}

#[tokio::test]
async fn concurrent_similar_queries_leave_one_entry() {
    let barrier = Arc::new(Barrier::new(2));
    let h = harness(
        ScriptedDirectionsSource::scripted(vec![
            Ok(ok_response(point(41.8902, 12.4922), point(41.9029, 12.4534), 3100)),
            Ok(ok_response(point(41.8902, 12.4922), point(41.9029, 12.4534), 3200)),
        ])
        .with_barrier(barrier),
        DirectionsServiceConfig::default(),
    );
    let origin = point(41.8902, 12.4922);
    let destination = point(41.9029, 12.4534);

    let (first, second) = tokio::join!(
        h.service.get_directions(origin, vec![], destination),
        h.service
            .get_directions(origin.offset_north(3.0), vec![], destination),
    );

    assert!(first.expect("no signal").is_some());
    assert!(second.expect("no signal").is_some());
    assert_eq!(h.source.calls(), 2);
    let entries = h.cache.entries();
    assert_eq!(entries.len(), 1);
    let kept = entries[0].response().routes[0].legs[0].distance_metres;
    assert!(kept == 3100 || kept == 3200, "unexpected cached payload {kept}");
}
