//! Query-string construction for the Directions API.
//!
//! Coordinates are written with `f64`'s `Display`, which is the shortest
//! representation that round-trips and always uses `.` as the decimal
//! separator, whatever the process locale.

use crate::domain::GeoPoint;
use crate::domain::ports::DirectionsRequest;

const WAYPOINTS_PREFIX: &str = "optimize:false";

/// Format a point as `lat,lng`.
pub(super) fn format_point(point: GeoPoint) -> String {
    format!("{},{}", point.latitude(), point.longitude())
}

/// Build the ordered query parameters for one request.
pub(super) fn query_parameters(request: &DirectionsRequest) -> Vec<(&'static str, String)> {
    let query = request.query();
    let mut parameters = vec![
        ("origin", format_point(query.origin())),
        ("destination", format_point(query.destination())),
        ("sensor", "false".to_owned()),
    ];

    if !query.waypoints().is_empty() {
        let stops = query
            .waypoints()
            .iter()
            .map(|point| format_point(*point))
            .collect::<Vec<_>>();
        parameters.push((
            "waypoints",
            format!("{WAYPOINTS_PREFIX}|{}", stops.join("|")),
        ));
    }
    if let Some(key) = request.api_key() {
        parameters.push(("key", key.to_owned()));
    }
    if let Some(mode) = request.travel_mode() {
        parameters.push(("mode", mode.as_str().to_owned()));
    }
    parameters
}
