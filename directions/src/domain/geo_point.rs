//! WGS84 coordinate value type and great-circle distance.
//!
//! Purpose: carry a validated latitude/longitude pair through the cache and
//! provider layers. Equality is exact (`f64 ==` on both components); distance
//! based matching lives in [`crate::domain::RouteQuery`].

use serde::Serialize;
use thiserror::Error;

/// Mean Earth radius in metres used for great-circle distances.
pub const EARTH_RADIUS_METRES: f64 = 6_376_500.0;

const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Validation errors returned when constructing a [`GeoPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoPointValidationError {
    /// Latitude or longitude is NaN or infinite.
    #[error("coordinates must be finite (lat {latitude}, lng {longitude})")]
    NonFinite {
        /// Rejected latitude.
        latitude: f64,
        /// Rejected longitude.
        longitude: f64,
    },
    /// Latitude outside `[-90, 90]`.
    #[error("latitude {0} must be within [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude outside `[-180, 180]`.
    #[error("longitude {0} must be within [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A point on the Earth's surface in decimal degrees.
///
/// # Examples
/// ```
/// use directions::domain::GeoPoint;
///
/// let edinburgh = GeoPoint::new(55.9533, -3.1883).expect("valid point");
/// assert_eq!(edinburgh.latitude(), 55.9533);
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Validate and construct a point.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoPointValidationError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(GeoPointValidationError::NonFinite {
                latitude,
                longitude,
            });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoPointValidationError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoPointValidationError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in metres (haversine).
    ///
    /// The result is symmetric: `a.distance_to(&b) == b.distance_to(&a)`.
    ///
    /// ```
    /// use directions::domain::GeoPoint;
    ///
    /// let a = GeoPoint::new(0.0, 0.0).expect("valid point");
    /// let b = GeoPoint::new(0.0, 1.0).expect("valid point");
    /// let metres = a.distance_to(&b);
    /// assert!((metres - 111_290.0).abs() < 10.0);
    /// ```
    pub fn distance_to(&self, other: &Self) -> f64 {
        let lat_from = self.latitude * DEG_TO_RAD;
        let lat_to = other.latitude * DEG_TO_RAD;
        let delta_lat = lat_to - lat_from;
        let delta_lng = (other.longitude - self.longitude) * DEG_TO_RAD;

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat_from.cos() * lat_to.cos() * (delta_lng / 2.0).sin().powi(2);
        let central_angle = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_METRES * central_angle
    }

    /// Return a point `metres` due north of this one.
    ///
    /// Latitude is clamped at the pole. Used to build points at a known
    /// distance along a meridian.
    pub fn offset_north(&self, metres: f64) -> Self {
        let latitude = (self.latitude + metres / (EARTH_RADIUS_METRES * DEG_TO_RAD)).min(90.0);
        Self {
            latitude,
            longitude: self.longitude,
        }
    }
}
