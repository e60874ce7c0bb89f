pub mod amenity;
pub mod bbox;
pub mod client;
pub mod config;
pub mod error;
pub mod geopoint;
pub mod locator;
pub mod query;
pub mod ranking;
mod requests;
pub mod types;

pub use amenity::{AmenityQuerySpec, AmenityTag};
pub use bbox::{BoundingBox, SearchArea};
pub use client::OverpassClient;
pub use config::ClientConfig;
pub use error::{GeolocationError, LocatorError, QueryFailure};
pub use geopoint::GeoPoint;
pub use locator::{FixedPosition, Locator, Marker, PositionSource, ResultSet, SearchState};
pub use query::OverpassQuery;
pub use ranking::RankedFeature;

// Re-export the raw element types for callers that post-process responses themselves
pub use types::{RawFeature, Tags};
