// src/geopoint.rs

use serde::{Deserialize, Serialize};

use crate::error::LocatorError;

/// Mean Earth radius in meters used for great-circle distances.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Represents a geographical point in degrees.
///
/// [`GeoPoint::new`] and deserialization both check the coordinate ranges. The fields stay public
/// so derived points (way midpoints, box centers) can be built directly; a point built by hand
/// is not validated.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(try_from = "UncheckedGeoPoint")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

// Wire shape of a `GeoPoint` before range checks.
#[derive(Deserialize)]
struct UncheckedGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<UncheckedGeoPoint> for GeoPoint {
    type Error = LocatorError;

    fn try_from(raw: UncheckedGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Creates a new `GeoPoint`.
    ///
    /// # Arguments
    /// * `latitude`: Degrees north of the equator, in `[-90, 90]`.
    /// * `longitude`: Degrees east of Greenwich, in `[-180, 180]`.
    ///
    /// # Errors
    /// Returns `LocatorError::InvalidInput` if either coordinate is not finite, latitude is not
    /// between -90 and 90, or longitude is not between -180 and 180.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocatorError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(LocatorError::InvalidInput(format!(
                "Latitude must be between -90 and 90 degrees, got {}.",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocatorError::InvalidInput(format!(
                "Longitude must be between -180 and 180 degrees, got {}.",
                longitude
            )));
        }
        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }

    /// Great-circle (haversine) distance to `other`, in meters.
    ///
    /// Uses a spherical Earth of radius [`EARTH_RADIUS_METERS`]. The result is symmetric,
    /// never negative, and exactly zero for identical points.
    pub fn haversine_distance_to(&self, other: &GeoPoint) -> f64 {
        let phi1 = self.latitude.to_radians();
        let phi2 = other.latitude.to_radians();
        let delta_phi = (other.latitude - self.latitude).to_radians();
        let delta_lambda = (other.longitude - self.longitude).to_radians();

        let a = (delta_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
        // Rounding can push `a` a hair above 1 for antipodal points.
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_METERS * c
    }
}
