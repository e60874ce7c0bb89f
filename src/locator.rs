// src/locator.rs

use std::future::Future;

use serde::Serialize;

use crate::amenity::{AmenityQuerySpec, AmenityTag};
use crate::bbox::BoundingBox;
use crate::client::OverpassClient;
use crate::config::ClientConfig;
use crate::error::{GeolocationError, LocatorError};
use crate::geopoint::GeoPoint;
use crate::ranking::RankedFeature;

/// Supplies the device's current position, or one of the three geolocation failures.
///
/// The returned future is not required to be `Send`, so single-threaded sources such as a
/// browser geolocation callback wrapped in a future can implement it. With such a source,
/// [`Locator::find_near_me`] is not `Send` either and needs a single-threaded executor.
pub trait PositionSource {
    /// Resolves once with the current position or the reason it is unavailable.
    fn current_position(&self) -> impl Future<Output = Result<GeoPoint, GeolocationError>>;
}

/// A position source that always reports the same point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition(pub GeoPoint);

impl PositionSource for FixedPosition {
    fn current_position(&self) -> impl Future<Output = Result<GeoPoint, GeolocationError>> {
        let position = self.0;
        async move { Ok(position) }
    }
}

/// Where a search trigger is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Searching,
    IdleWithResults(usize),
    IdleWithError,
}

impl SearchState {
    /// Returns true while a request is in flight.
    pub fn is_searching(&self) -> bool {
        matches!(self, SearchState::Searching)
    }

    /// Label of the control that starts a search.
    pub fn trigger_label(&self) -> &'static str {
        match self {
            SearchState::Searching => "Finding...",
            _ => "Find",
        }
    }
}

/// Everything the map layer needs to draw one result.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Marker {
    pub position: GeoPoint,
    pub popup_label: String,
    pub link: String,
    pub feature: RankedFeature,
}

impl Marker {
    /// Builds the marker for `feature`, with a `"<km> Km"` popup and a map search link.
    pub fn from_feature(feature: RankedFeature, config: &ClientConfig) -> Self {
        Self {
            position: feature.position(),
            popup_label: feature.distance_label(),
            link: config.map_search_url(feature.latitude, feature.longitude),
            feature,
        }
    }
}

/// The markers currently on display, replaced wholesale by every search.
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct ResultSet {
    /// The user's own position, when the search was made from it.
    pub origin: Option<GeoPoint>,
    pub markers: Vec<Marker>,
}

impl ResultSet {
    /// Returns true if the last search found nothing or failed.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Number of result markers, not counting the origin.
    pub fn len(&self) -> usize {
        self.markers.len()
    }
}

/// Ties a position source and a client to one search trigger.
///
/// The locator owns the current [`ResultSet`]; a finished search swaps it out, a failed one
/// clears it.
#[derive(Debug)]
pub struct Locator<P> {
    client: OverpassClient,
    position_source: P,
    state: SearchState,
    results: ResultSet,
}

impl<P: PositionSource> Locator<P> {
    /// Creates an idle locator with an empty result set.
    ///
    /// # Arguments
    /// * `client` - Client used for every search this locator triggers.
    /// * `position_source` - Where `find_near_me` gets the device position from.
    pub fn new(client: OverpassClient, position_source: P) -> Self {
        Self {
            client,
            position_source,
            state: SearchState::Idle,
            results: ResultSet::default(),
        }
    }

    /// Current state of the search trigger.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Markers from the last successful search.
    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    /// The client searches go through.
    pub fn client(&self) -> &OverpassClient {
        &self.client
    }

    /// Locates the device and searches around it.
    ///
    /// Previous results are cleared first. A geolocation failure is returned before any
    /// request is made and puts the trigger back to `Idle`; the caller is expected to show
    /// [`GeolocationError::alert_text`].
    pub async fn find_near_me(&mut self, spec: &AmenityQuerySpec) -> Result<&ResultSet, LocatorError> {
        self.results = ResultSet::default();

        let position = self.position_source.current_position().await.map_err(|e| {
            log::warn!("Geolocation failed: {}", e);
            self.state = SearchState::Idle;
            LocatorError::Geolocation(e)
        })?;

        log::debug!(
            "Device position: ({}, {})",
            position.latitude,
            position.longitude
        );

        self.state = SearchState::Searching;
        let outcome = self.client.search_near(position, spec).await;
        self.finish(outcome, Some(position))
    }

    /// Searches the visible map area, ranking against its center.
    ///
    /// # Errors
    /// `LocatorError::QueryFailed` if the request fails; the state becomes `IdleWithError`.
    pub async fn find_in_viewport(
        &mut self,
        viewport: BoundingBox,
        tag: AmenityTag,
    ) -> Result<&ResultSet, LocatorError> {
        self.results = ResultSet::default();
        self.state = SearchState::Searching;
        let outcome = self.client.search_viewport(viewport, tag).await;
        self.finish(outcome, None)
    }

    fn finish(
        &mut self,
        outcome: Result<Vec<RankedFeature>, LocatorError>,
        origin: Option<GeoPoint>,
    ) -> Result<&ResultSet, LocatorError> {
        match outcome {
            Ok(features) => {
                let config = self.client.config();
                let markers = features
                    .into_iter()
                    .map(|f| Marker::from_feature(f, config))
                    .collect::<Vec<_>>();
                self.state = SearchState::IdleWithResults(markers.len());
                self.results = ResultSet { origin, markers };
                Ok(&self.results)
            }
            Err(e) => {
                log::error!("Search failed: {}", e);
                self.state = SearchState::IdleWithError;
                Err(e)
            }
        }
    }
}
