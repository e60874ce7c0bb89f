// src/types/element.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Free-form key/value tags attached to a geodata element.
///
/// The service sends strings, but nothing stops a mirror from sending numbers or booleans;
/// those are kept in their JSON text form. A missing or `null` tag object is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(pub BTreeMap<String, String>);

impl Tags {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
        let tags = raw
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| {
                let v = match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (k, v)
            })
            .collect();
        Ok(Tags(tags))
    }
}

impl Serialize for Tags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

/// Extent the service attaches to ways when geometry output is requested.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub minlat: f64,
    pub minlon: f64,
    pub maxlat: f64,
    pub maxlon: f64,
}

impl Bounds {
    /// Midpoint of the extent, used as the way's position.
    pub fn midpoint(&self) -> (f64, f64) {
        (
            (self.minlat + self.maxlat) / 2.0,
            (self.minlon + self.maxlon) / 2.0,
        )
    }
}

/// One element of the service's `elements` array, discriminated by its `type` field.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawFeature {
    Node {
        lat: f64,
        lon: f64,
        #[serde(default)]
        tags: Tags,
    },
    Way {
        bounds: Bounds,
        #[serde(default)]
        tags: Tags,
    },
    /// Relations, areas and anything else the pipeline does not rank.
    #[serde(other)]
    Other,
}

impl RawFeature {
    pub fn kind(&self) -> &'static str {
        match self {
            RawFeature::Node { .. } => "node",
            RawFeature::Way { .. } => "way",
            RawFeature::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_node_with_tags() {
        let node: RawFeature = serde_json::from_value(json!({
            "type": "node",
            "id": 42,
            "lat": 43.27,
            "lon": -2.92,
            "tags": { "amenity": "toilets", "fee": "no" }
        }))
        .unwrap();

        match node {
            RawFeature::Node { lat, lon, tags } => {
                assert_eq!(lat, 43.27);
                assert_eq!(lon, -2.92);
                assert_eq!(tags.get("fee"), Some("no"));
            }
            other => panic!("expected node, got {:?}", other),
        }
    }

    #[test]
    fn deserializes_way_bounds_and_ignores_geometry() {
        let way: RawFeature = serde_json::from_value(json!({
            "type": "way",
            "id": 7,
            "bounds": { "minlat": 43.0, "minlon": -3.0, "maxlat": 43.2, "maxlon": -2.8 },
            "nodes": [1, 2, 3],
            "geometry": [{ "lat": 43.0, "lon": -3.0 }]
        }))
        .unwrap();

        match way {
            RawFeature::Way { bounds, tags } => {
                let (lat, lon) = bounds.midpoint();
                assert!((lat - 43.1).abs() < 1e-12);
                assert!((lon - -2.9).abs() < 1e-12);
                assert!(tags.0.is_empty());
            }
            other => panic!("expected way, got {:?}", other),
        }
    }

    #[test]
    fn unknown_kinds_become_other() {
        let relation: RawFeature = serde_json::from_value(json!({
            "type": "relation",
            "id": 1,
            "members": []
        }))
        .unwrap();
        assert_eq!(relation, RawFeature::Other);
    }

    #[test]
    fn non_string_and_null_tags_are_tolerated() {
        let node: RawFeature = serde_json::from_value(json!({
            "type": "node", "lat": 1.0, "lon": 2.0,
            "tags": { "capacity": 4, "wheelchair": true }
        }))
        .unwrap();
        if let RawFeature::Node { tags, .. } = node {
            assert_eq!(tags.get("capacity"), Some("4"));
            assert_eq!(tags.get("wheelchair"), Some("true"));
        } else {
            panic!("expected node");
        }

        let bare: RawFeature =
            serde_json::from_value(json!({ "type": "node", "lat": 1.0, "lon": 2.0, "tags": null }))
                .unwrap();
        if let RawFeature::Node { tags, .. } = bare {
            assert!(tags.0.is_empty());
        } else {
            panic!("expected node");
        }
    }

    #[test]
    fn node_without_coordinates_is_an_error() {
        let result = serde_json::from_value::<RawFeature>(json!({ "type": "node", "id": 3 }));
        assert!(result.is_err());
    }
}
