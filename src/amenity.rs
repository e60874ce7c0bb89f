// src/amenity.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LocatorError;

/// The amenity categories the locator knows how to search for.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AmenityTag {
    Toilet,
    DrinkingWater,
}

impl AmenityTag {
    /// Value of the `amenity` key in the geodata service's schema.
    pub fn osm_value(&self) -> &'static str {
        match self {
            AmenityTag::Toilet => "toilets",
            AmenityTag::DrinkingWater => "drinking_water",
        }
    }

    /// Search radius used in point mode when the caller does not override it.
    pub fn default_radius_km(&self) -> f64 {
        match self {
            AmenityTag::Toilet => 20.0,
            AmenityTag::DrinkingWater => 10.0,
        }
    }
}

impl fmt::Display for AmenityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.osm_value())
    }
}

/// What to search for and, in point mode, how far out.
///
/// The radius is always finite and positive: it starts at the tag's default and can only be
/// changed through [`with_radius_km`](AmenityQuerySpec::with_radius_km).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmenityQuerySpec {
    tag: AmenityTag,
    search_radius_km: f64,
}

impl AmenityQuerySpec {
    /// Creates a spec for `tag` with its default radius (20 km for toilets, 10 km for drinking
    /// water).
    pub fn new(tag: AmenityTag) -> Self {
        Self {
            tag,
            search_radius_km: tag.default_radius_km(),
        }
    }

    /// The amenity to search for.
    pub fn tag(&self) -> AmenityTag {
        self.tag
    }

    /// Search radius in kilometers.
    pub fn search_radius_km(&self) -> f64 {
        self.search_radius_km
    }

    /// Overrides the default radius.
    ///
    /// # Errors
    /// Returns `LocatorError::InvalidInput` unless `radius_km` is finite and greater than zero.
    pub fn with_radius_km(mut self, radius_km: f64) -> Result<Self, LocatorError> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(LocatorError::InvalidInput(format!(
                "Search radius must be a positive number of kilometers, got {}.",
                radius_km
            )));
        }
        self.search_radius_km = radius_km;
        Ok(self)
    }
}

impl From<AmenityTag> for AmenityQuerySpec {
    fn from(tag: AmenityTag) -> Self {
        AmenityQuerySpec::new(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_radii_depend_on_tag() {
        assert_eq!(AmenityQuerySpec::new(AmenityTag::Toilet).search_radius_km(), 20.0);
        assert_eq!(
            AmenityQuerySpec::new(AmenityTag::DrinkingWater).search_radius_km(),
            10.0
        );
    }

    #[test]
    fn radius_override_is_validated() {
        let spec = AmenityQuerySpec::new(AmenityTag::Toilet)
            .with_radius_km(5.0)
            .unwrap();
        assert_eq!(spec.search_radius_km(), 5.0);
        assert_eq!(spec.tag(), AmenityTag::Toilet);

        assert!(AmenityQuerySpec::new(AmenityTag::Toilet)
            .with_radius_km(0.0)
            .is_err());
        assert!(AmenityQuerySpec::new(AmenityTag::Toilet)
            .with_radius_km(f64::NAN)
            .is_err());
        assert!(AmenityQuerySpec::new(AmenityTag::Toilet)
            .with_radius_km(-10.0)
            .is_err());
    }

    #[test]
    fn osm_values_match_service_schema() {
        assert_eq!(AmenityTag::Toilet.to_string(), "toilets");
        assert_eq!(AmenityTag::DrinkingWater.to_string(), "drinking_water");
    }
}
