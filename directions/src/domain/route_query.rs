//! Directions query identity and the cache similarity predicate.
//!
//! Two queries are the same request when both endpoints lie strictly within
//! [`ENDPOINT_TOLERANCE_METRES`] of each other and the waypoint sequences are
//! exactly equal, element by element and in order. Endpoints come from GPS
//! fixes and drift between calls; waypoints are generated and must not.

use serde::Serialize;

use super::GeoPoint;

/// Maximum (exclusive) endpoint drift for two queries to match.
pub const ENDPOINT_TOLERANCE_METRES: f64 = 10.0;

/// Return whether `distance_metres` is inside the endpoint tolerance.
///
/// ```
/// use directions::domain::within_endpoint_tolerance;
///
/// assert!(within_endpoint_tolerance(9.999));
/// assert!(!within_endpoint_tolerance(10.0));
/// ```
pub fn within_endpoint_tolerance(distance_metres: f64) -> bool {
    distance_metres < ENDPOINT_TOLERANCE_METRES
}

/// Origin, ordered waypoints, and destination of one directions request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuery {
    origin: GeoPoint,
    waypoints: Vec<GeoPoint>,
    destination: GeoPoint,
}

impl RouteQuery {
    /// Build a query. Waypoint order is significant.
    pub fn new(origin: GeoPoint, waypoints: Vec<GeoPoint>, destination: GeoPoint) -> Self {
        Self {
            origin,
            waypoints,
            destination,
        }
    }

    /// Starting point.
    pub const fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// Intermediate stops in visiting order.
    pub fn waypoints(&self) -> &[GeoPoint] {
        &self.waypoints
    }

    /// End point.
    pub const fn destination(&self) -> GeoPoint {
        self.destination
    }

    /// Cache similarity predicate.
    ///
    /// # Examples
    /// ```
    /// use directions::domain::{GeoPoint, RouteQuery};
    ///
    /// let p = |lat, lng| GeoPoint::new(lat, lng).expect("valid point");
    /// let first = RouteQuery::new(p(0.0, 0.0), vec![], p(1.0, 1.0));
    /// let drifted = RouteQuery::new(p(0.000_05, 0.000_05), vec![], p(1.0, 1.0));
    /// assert!(first.is_same_query(&drifted));
    /// ```
    pub fn is_same_query(&self, other: &Self) -> bool {
        let endpoints_match = within_endpoint_tolerance(self.origin.distance_to(&other.origin))
            && within_endpoint_tolerance(self.destination.distance_to(&other.destination));
        if !endpoints_match {
            return false;
        }

        self.waypoints == other.waypoints
    }
}

#[cfg(test)]
mod tests {
    //! Similarity predicate regression coverage.

    use super::*;
    use rstest::{fixture, rstest};

    fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint::new(latitude, longitude).expect("valid test point")
    }

    #[fixture]
    fn origin() -> GeoPoint {
        point(55.9533, -3.1883)
    }

    #[fixture]
    fn destination() -> GeoPoint {
        point(55.9486, -3.1999)
    }

    #[rstest]
    #[case(9.999, true)]
    #[case(10.0, false)]
    #[case(0.0, true)]
    #[case(10.000_001, false)]
    fn tolerance_is_strict(#[case] distance: f64, #[case] expected: bool) {
        assert_eq!(within_endpoint_tolerance(distance), expected);
    }

    #[rstest]
    #[case::origin_inside(9.9, 0.0, true)]
    #[case::origin_outside(10.1, 0.0, false)]
    #[case::destination_inside(0.0, 9.9, true)]
    #[case::destination_outside(0.0, 10.1, false)]
    #[case::both_inside(5.0, 5.0, true)]
    fn endpoint_drift_is_tolerated_below_ten_metres(
        origin: GeoPoint,
        destination: GeoPoint,
        #[case] origin_drift: f64,
        #[case] destination_drift: f64,
        #[case] expected: bool,
    ) {
        let base = RouteQuery::new(origin, vec![], destination);
        let drifted = RouteQuery::new(
            origin.offset_north(origin_drift),
            vec![],
            destination.offset_north(destination_drift),
        );

        assert_eq!(base.is_same_query(&drifted), expected);
        assert_eq!(drifted.is_same_query(&base), expected);
    }

    #[rstest]
    fn empty_waypoint_lists_match(origin: GeoPoint, destination: GeoPoint) {
        let a = RouteQuery::new(origin, vec![], destination);
        let b = RouteQuery::new(origin, Vec::new(), destination);
        assert!(a.is_same_query(&b));
    }

    #[rstest]
    fn waypoint_order_is_significant(origin: GeoPoint, destination: GeoPoint) {
        let first = point(55.95, -3.19);
        let second = point(55.951, -3.195);
        let forward = RouteQuery::new(origin, vec![first, second], destination);
        let reversed = RouteQuery::new(origin, vec![second, first], destination);

        assert!(!forward.is_same_query(&reversed));
        assert!(!reversed.is_same_query(&forward));
    }

    #[rstest]
    fn identical_waypoints_in_either_order_match(origin: GeoPoint, destination: GeoPoint) {
        let stop = point(55.95, -3.19);
        let forward = RouteQuery::new(origin, vec![stop, stop], destination);
        let reversed = RouteQuery::new(origin, vec![stop, stop], destination);
        assert!(forward.is_same_query(&reversed));
    }

    #[rstest]
    fn waypoints_use_exact_equality(origin: GeoPoint, destination: GeoPoint) {
        let stop = point(55.95, -3.19);
        let nudged = stop.offset_north(0.01);
        let a = RouteQuery::new(origin, vec![stop], destination);
        let b = RouteQuery::new(origin, vec![nudged], destination);
        assert!(!a.is_same_query(&b));
    }

    #[rstest]
    fn waypoint_count_mismatch_does_not_match(origin: GeoPoint, destination: GeoPoint) {
        let stop = point(55.95, -3.19);
        let one = RouteQuery::new(origin, vec![stop], destination);
        let two = RouteQuery::new(origin, vec![stop, stop], destination);
        assert!(!one.is_same_query(&two));
        assert!(!two.is_same_query(&one));
    }

    #[rstest]
    fn distant_endpoints_short_circuit_even_with_equal_waypoints(destination: GeoPoint) {
        let stop = point(55.95, -3.19);
        let a = RouteQuery::new(point(0.0, 0.0), vec![stop], destination);
        let b = RouteQuery::new(point(1.0, 1.0), vec![stop], destination);
        assert!(!a.is_same_query(&b));
    }

    #[rstest]
    fn predicate_is_symmetric_over_a_mixed_set() {
        let stop = point(10.0, 10.0);
        let queries = [
            RouteQuery::new(point(0.0, 0.0), vec![], point(1.0, 1.0)),
            RouteQuery::new(point(0.000_05, 0.000_05), vec![], point(1.0, 1.0)),
            RouteQuery::new(point(0.000_1, 0.000_1), vec![], point(1.0, 1.0)),
            RouteQuery::new(point(0.0, 0.0), vec![stop], point(1.0, 1.0)),
            RouteQuery::new(point(0.0, 0.0), vec![stop, stop], point(1.0, 1.0)),
            RouteQuery::new(point(0.0, 0.0), vec![], point(1.000_08, 1.0)),
        ];

        for a in &queries {
            for b in &queries {
                assert_eq!(a.is_same_query(b), b.is_same_query(a), "{a:?} vs {b:?}");
            }
        }
    }
}
