// src/bbox.rs

use serde::{Deserialize, Serialize};

use crate::error::LocatorError;
use crate::geopoint::GeoPoint;

/// Kilometers per degree of latitude (flat-Earth approximation).
pub const KM_PER_DEGREE: f64 = 111.111;

/// Axis-aligned rectangle in latitude/longitude degrees.
///
/// `south <= north` and `west <= east` hold for every box made by [`BoundingBox::new`],
/// [`SearchArea::from_center_and_radius`] or deserialization. Boxes crossing the antimeridian
/// are not representable. Writing the public fields directly skips the check.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(try_from = "UncheckedBoundingBox")]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

// Wire shape of a `BoundingBox` before the edge-order check.
#[derive(Deserialize)]
struct UncheckedBoundingBox {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

impl TryFrom<UncheckedBoundingBox> for BoundingBox {
    type Error = LocatorError;

    fn try_from(raw: UncheckedBoundingBox) -> Result<Self, Self::Error> {
        BoundingBox::new(raw.south, raw.west, raw.north, raw.east)
    }
}

impl BoundingBox {
    /// Creates a box from its four edges.
    ///
    /// # Arguments
    /// * `south`, `north`: Latitude bounds in degrees.
    /// * `west`, `east`: Longitude bounds in degrees.
    ///
    /// # Errors
    /// Returns `LocatorError::InvalidInput` if any edge is NaN, `south > north`, or `west > east`.
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self, LocatorError> {
        if south.is_nan() || north.is_nan() || south > north {
            return Err(LocatorError::InvalidInput(format!(
                "Bounding box south edge {} must not exceed north edge {}.",
                south, north
            )));
        }
        if west.is_nan() || east.is_nan() || west > east {
            return Err(LocatorError::InvalidInput(format!(
                "Bounding box west edge {} must not exceed east edge {}.",
                west, east
            )));
        }
        Ok(Self {
            south,
            west,
            north,
            east,
        })
    }

    /// Geometric center: plain average of the edges, not a geodesic centroid.
    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            latitude: (self.south + self.north) / 2.0,
            longitude: (self.west + self.east) / 2.0,
        }
    }

    /// Returns true if `point` lies inside the box or on its edges.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.latitude >= self.south
            && point.latitude <= self.north
            && point.longitude >= self.west
            && point.longitude <= self.east
    }
}

/// A bounding box to query plus the point results are ranked against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchArea {
    pub bbox: BoundingBox,
    pub center: GeoPoint,
}

impl SearchArea {
    /// Builds a box `radius_km` wide and tall around `center`.
    ///
    /// The latitude span is `radius_km / 111.111` degrees. The longitude span is widened by
    /// `1 / cos(latitude)`. At exactly ±90° that factor is infinite and so is the resulting box;
    /// this approximation limit is left unclamped.
    ///
    /// # Arguments
    /// * `center`: The point the box is built around, also used as the ranking reference.
    /// * `radius_km`: Edge length of the box in kilometers.
    ///
    /// # Errors
    /// Returns `LocatorError::InvalidInput` if `radius_km` is negative or not finite.
    pub fn from_center_and_radius(center: GeoPoint, radius_km: f64) -> Result<Self, LocatorError> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(LocatorError::InvalidInput(format!(
                "Search radius must be a finite, non-negative number of kilometers, got {}.",
                radius_km
            )));
        }

        let lat_delta = radius_km / KM_PER_DEGREE;
        let lon_delta = radius_km / (KM_PER_DEGREE * center.latitude.to_radians().cos());

        let bbox = BoundingBox {
            south: center.latitude - lat_delta / 2.0,
            west: center.longitude - lon_delta / 2.0,
            north: center.latitude + lat_delta / 2.0,
            east: center.longitude + lon_delta / 2.0,
        };

        log::debug!(
            "Search area around ({}, {}) with radius {} km: {:?}",
            center.latitude,
            center.longitude,
            radius_km,
            bbox
        );

        Ok(Self { bbox, center })
    }

    /// Uses the viewport unchanged and ranks against its center.
    pub fn from_viewport(viewport: BoundingBox) -> Self {
        Self {
            bbox: viewport,
            center: viewport.center(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_km_around_bilbao() {
        let center = GeoPoint::new(43.264331, -2.9207012).unwrap();
        let area = SearchArea::from_center_and_radius(center, 20.0).unwrap();

        // 20 / 111.111 degrees of latitude; 20 / (111.111 * cos 43.264°) of longitude.
        assert!((area.bbox.south - 43.174331).abs() < 1e-5);
        assert!((area.bbox.north - 43.354331).abs() < 1e-5);
        assert!((area.bbox.west - -3.044294).abs() < 1e-5);
        assert!((area.bbox.east - -2.797109).abs() < 1e-5);
        assert_eq!(area.center, center);
        assert!(area.bbox.contains(&center));
    }

    #[test]
    fn longitude_span_widens_with_latitude() {
        let equator =
            SearchArea::from_center_and_radius(GeoPoint::new(0.0, 0.0).unwrap(), 10.0).unwrap();
        let north =
            SearchArea::from_center_and_radius(GeoPoint::new(60.0, 0.0).unwrap(), 10.0).unwrap();

        let equator_span = equator.bbox.east - equator.bbox.west;
        let north_span = north.bbox.east - north.bbox.west;
        assert!((north_span / equator_span - 2.0).abs() < 1e-9);
    }

    #[test]
    fn pole_yields_unbounded_longitude_span() {
        let pole = GeoPoint::new(90.0, 0.0).unwrap();
        let area = SearchArea::from_center_and_radius(pole, 10.0).unwrap();
        // cos(90°) is ~6e-17 in floating point, so the span is astronomically wide or infinite.
        assert!(area.bbox.east - area.bbox.west > 1e10);
        assert!(!area.bbox.north.is_nan());
        assert!(!area.bbox.west.is_nan());
    }

    #[test]
    fn rejects_negative_and_non_finite_radius() {
        let center = GeoPoint::new(43.264331, -2.9207012).unwrap();
        for radius in [-10.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match SearchArea::from_center_and_radius(center, radius) {
                Err(LocatorError::InvalidInput(_)) => {}
                other => panic!("radius {} should be rejected, got {:?}", radius, other),
            }
        }

        let point = SearchArea::from_center_and_radius(center, 0.0).unwrap();
        assert_eq!(point.bbox.south, point.bbox.north);
        assert_eq!(point.bbox.west, point.bbox.east);
    }

    #[test]
    fn viewport_keeps_box_and_centers_reference() {
        let viewport = BoundingBox::new(43.0, -3.0, 43.2, -2.8).unwrap();
        let area = SearchArea::from_viewport(viewport);
        assert_eq!(area.bbox, viewport);
        assert!((area.center.latitude - 43.1).abs() < 1e-12);
        assert!((area.center.longitude - -2.9).abs() < 1e-12);
    }

    #[test]
    fn new_rejects_inverted_edges() {
        assert!(BoundingBox::new(1.0, 0.0, 0.0, 1.0).is_err());
        assert!(BoundingBox::new(0.0, 1.0, 1.0, 0.0).is_err());
        assert!(BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0).is_err());
        assert!(BoundingBox::new(0.0, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn deserialization_checks_edge_order() {
        let ok: BoundingBox =
            serde_json::from_str(r#"{"south": 43.0, "west": -3.0, "north": 43.2, "east": -2.8}"#)
                .unwrap();
        assert_eq!(ok, BoundingBox::new(43.0, -3.0, 43.2, -2.8).unwrap());

        let inverted = serde_json::from_str::<BoundingBox>(
            r#"{"south": 43.2, "west": -3.0, "north": 43.0, "east": -2.8}"#,
        );
        assert!(inverted.is_err());
    }
}
