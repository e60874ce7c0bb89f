// src/ranking.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geopoint::GeoPoint;
use crate::types::RawFeature;

/// A normalized search result with its distance to the reference point.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RankedFeature {
    pub latitude: f64,
    pub longitude: f64,
    pub tags: BTreeMap<String, String>,
    pub distance_to_center_meters: f64,
}

impl RankedFeature {
    /// The feature's position as a [`GeoPoint`].
    pub fn position(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Distance in kilometers rounded to three decimals, e.g. `"1.234 Km"`.
    pub fn distance_label(&self) -> String {
        format!("{:.3} Km", self.distance_to_center_meters / 1000.0)
    }
}

/// A feature's position and tags, before a distance is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFeature {
    pub position: GeoPoint,
    pub tags: BTreeMap<String, String>,
}

/// Reduces a raw element to a single point.
///
/// Nodes keep their coordinates; ways collapse to the midpoint of their bounds. Anything else
/// yields `None`.
pub fn normalize(feature: RawFeature) -> Option<NormalizedFeature> {
    match feature {
        RawFeature::Node { lat, lon, tags } => Some(NormalizedFeature {
            position: GeoPoint {
                latitude: lat,
                longitude: lon,
            },
            tags: tags.into_inner(),
        }),
        RawFeature::Way { bounds, tags } => {
            let (latitude, longitude) = bounds.midpoint();
            Some(NormalizedFeature {
                position: GeoPoint {
                    latitude,
                    longitude,
                },
                tags: tags.into_inner(),
            })
        }
        RawFeature::Other => None,
    }
}

/// Attaches distances to `center` and sorts nearest-first.
///
/// The sort is stable, so features at equal distances keep their input order.
///
/// # Arguments
/// * `features` - Normalized features, in any order.
/// * `center` - The point distances are measured from.
///
/// # Returns
/// The features as `RankedFeature`s, ascending by `distance_to_center_meters`.
pub fn rank_features<I>(features: I, center: &GeoPoint) -> Vec<RankedFeature>
where
    I: IntoIterator<Item = NormalizedFeature>,
{
    let mut ranked: Vec<RankedFeature> = features
        .into_iter()
        .map(|f| RankedFeature {
            latitude: f.position.latitude,
            longitude: f.position.longitude,
            distance_to_center_meters: center.haversine_distance_to(&f.position),
            tags: f.tags,
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.distance_to_center_meters
            .total_cmp(&b.distance_to_center_meters)
    });
    ranked
}

/// Turns the raw `elements` array of a response into a ranked list.
///
/// This is the pure part of [`OverpassClient::search`](crate::OverpassClient::search) and can be
/// fed a response that was fetched some other way.
///
/// Elements of other kinds are dropped at debug level; node and way elements that fail to
/// deserialize (missing coordinates or bounds) are dropped at warn level.
pub fn rank_elements(elements: Vec<Value>, center: &GeoPoint) -> Vec<RankedFeature> {
    let total = elements.len();

    let normalized: Vec<NormalizedFeature> = elements
        .into_iter()
        .filter_map(|element| {
            let kind = element
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or("<missing>")
                .to_string();
            match serde_json::from_value::<RawFeature>(element) {
                Ok(RawFeature::Other) => {
                    log::debug!("Skipping element of unsupported type '{}'", kind);
                    None
                }
                Ok(feature) => normalize(feature),
                Err(e) => {
                    log::warn!("Dropping malformed '{}' element: {}", kind, e);
                    None
                }
            }
        })
        .collect();

    log::debug!(
        "Normalized {} of {} elements around ({}, {})",
        normalized.len(),
        total,
        center.latitude,
        center.longitude
    );

    rank_features(normalized, center)
}
