// src/query.rs

use url::form_urlencoded;

use crate::amenity::AmenityTag;
use crate::bbox::BoundingBox;

/// Server-side execution ceiling advertised in every query, in seconds.
pub const QUERY_TIMEOUT_SECS: u32 = 120;

/// Name of the form field the Overpass interpreter reads the query from.
pub const FORM_FIELD: &str = "data";

/// An Overpass QL query selecting nodes and ways tagged `amenity=<tag>` inside a bounding box.
///
/// Relations are never selected. The query asks for `out geom`, which makes the service attach
/// `bounds` to ways.
#[derive(Debug, Clone, PartialEq)]
pub struct OverpassQuery {
    tag: AmenityTag,
    bbox: BoundingBox,
    timeout_secs: u32,
}

impl OverpassQuery {
    /// Creates a new `OverpassQuery` for the given amenity and box.
    ///
    /// # Arguments
    /// * `tag` - The amenity to select, matched as `amenity=<tag>`.
    /// * `bbox` - The area to search; must satisfy the [`BoundingBox`] edge ordering.
    pub fn new(tag: AmenityTag, bbox: BoundingBox) -> Self {
        Self {
            tag,
            bbox,
            timeout_secs: QUERY_TIMEOUT_SECS,
        }
    }

    /// Returns the amenity this query selects.
    pub fn tag(&self) -> AmenityTag {
        self.tag
    }

    /// Returns the box this query is restricted to.
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Renders the query text.
    ///
    /// The output has the shape
    /// `[out:json][timeout:120];(node["amenity"="toilets"](s,w,n,e);way[...](s,w,n,e););out geom;`.
    pub fn build(&self) -> String {
        let b = &self.bbox;
        let bbox = format!("{},{},{},{}", b.south, b.west, b.north, b.east);
        let filter = format!(r#"["amenity"="{}"]"#, self.tag.osm_value());
        format!(
            "[out:json][timeout:{}];(node{filter}({bbox});way{filter}({bbox}););out geom;",
            self.timeout_secs,
            filter = filter,
            bbox = bbox
        )
    }

    /// Renders the `application/x-www-form-urlencoded` request body (`data=<query>`).
    pub fn to_form_body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(FORM_FIELD, &self.build())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox() -> BoundingBox {
        BoundingBox::new(43.1, -3.0, 43.3, -2.8).unwrap()
    }

    #[test]
    fn build_embeds_tag_and_bbox_in_south_west_north_east_order() {
        let query = OverpassQuery::new(AmenityTag::Toilet, bbox()).build();
        assert_eq!(
            query,
            r#"[out:json][timeout:120];(node["amenity"="toilets"](43.1,-3,43.3,-2.8);way["amenity"="toilets"](43.1,-3,43.3,-2.8););out geom;"#
        );
    }

    #[test]
    fn build_never_selects_relations() {
        let query = OverpassQuery::new(AmenityTag::DrinkingWater, bbox()).build();
        assert!(query.contains(r#"node["amenity"="drinking_water"]"#));
        assert!(query.contains(r#"way["amenity"="drinking_water"]"#));
        assert!(!query.contains("relation"));
        assert!(!query.contains("nwr"));
    }

    #[test]
    fn form_body_is_urlencoded_data_field() {
        let query = OverpassQuery::new(AmenityTag::Toilet, bbox());
        let body = query.to_form_body();
        assert!(body.starts_with("data="));
        assert!(!body.contains('"'));
        assert!(!body.contains('['));

        let decoded: Vec<(String, String)> = form_urlencoded::parse(body.as_bytes())
            .into_owned()
            .collect();
        assert_eq!(decoded, vec![("data".to_string(), query.build())]);
    }
}
