//! Resolve one walk through the cached directions service and print it.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use directions::domain::{
    DirectionsService, DirectionsServicePorts, GeoPoint, RouteQuery, StepWalkNormalizer,
};
use directions::outbound::cache::InMemoryRouteCache;
use directions::outbound::google::GoogleDirectionsHttpSource;
use directions::settings::DirectionsSettings;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `directions-probe` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "directions-probe",
    about = "Resolve a walk through the cached directions service and print it as JSON",
    version
)]
struct CliArgs {
    /// Start of the walk as `lat,lng`.
    #[arg(long, value_name = "lat,lng", value_parser = parse_point)]
    origin: GeoPoint,
    /// End of the walk as `lat,lng`.
    #[arg(long, value_name = "lat,lng", value_parser = parse_point)]
    destination: GeoPoint,
    /// Intermediate stop as `lat,lng`; repeat for several, in order.
    #[arg(long = "waypoint", value_name = "lat,lng", value_parser = parse_point)]
    waypoints: Vec<GeoPoint>,
    /// Resolve the same query this many times to observe cache hits.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    repeat: u32,
}

fn main() -> io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        eprintln!("tracing init failed: {error}");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let service = build_service()?;
    let query = RouteQuery::new(args.origin, args.waypoints, args.destination);

    let mut stdout = io::stdout().lock();
    for attempt in 1..=args.repeat {
        let walk = service
            .get_directions_for(query.clone())
            .await
            .map_err(|signal| io::Error::other(format!("directions interrupted: {signal}")))?;
        if walk.is_none() {
            warn!(attempt, "no walk available");
        }
        serde_json::to_writer(&mut stdout, &walk)
            .map_err(|error| io::Error::other(format!("serialise walk: {error}")))?;
        writeln!(stdout)?;
    }
    info!(cached_entries = service.cache_len(), "probe finished");
    Ok(())
}

fn build_service() -> io::Result<DirectionsService> {
    let settings = DirectionsSettings::load_from_iter([OsString::from("directions-probe")])
        .map_err(|error| io::Error::other(format!("load directions settings: {error}")))?;
    let config = settings.service_config().map_err(io::Error::other)?;
    let base_url = settings.base_url().map_err(io::Error::other)?;
    let source = GoogleDirectionsHttpSource::new(&base_url, settings.request_timeout())
        .map_err(|error| io::Error::other(format!("build directions source: {error}")))?;
    info!(
        endpoint = %source.endpoint(),
        cache_enabled = config.cache_enabled,
        "directions service wired"
    );

    let ports = DirectionsServicePorts::new(
        Arc::new(source),
        Arc::new(InMemoryRouteCache::new()),
        Arc::new(StepWalkNormalizer),
    );
    Ok(DirectionsService::new(ports, Arc::new(DefaultClock), config))
}

fn parse_point(raw: &str) -> Result<GeoPoint, String> {
    let (latitude, longitude) = raw
        .split_once(',')
        .ok_or_else(|| "point must be two comma-separated numbers: lat,lng".to_owned())?;
    let latitude = latitude
        .trim()
        .parse::<f64>()
        .map_err(|error| format!("failed to parse latitude: {error}"))?;
    let longitude = longitude
        .trim()
        .parse::<f64>()
        .map_err(|error| format!("failed to parse longitude: {error}"))?;
    GeoPoint::new(latitude, longitude).map_err(|error| error.to_string())
}
