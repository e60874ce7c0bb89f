// src/client.rs

use crate::amenity::{AmenityQuerySpec, AmenityTag};
use crate::bbox::{BoundingBox, SearchArea};
use crate::config::ClientConfig;
use crate::error::LocatorError;
use crate::geopoint::GeoPoint;
use crate::query::OverpassQuery;
use crate::ranking::{rank_elements, RankedFeature};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Url};

/// The client for running distance-ranked amenity searches against an Overpass interpreter.
///
/// `OverpassClient` holds the endpoint and a shared `reqwest::Client`. It keeps no per-search
/// state: every call to [`search`](OverpassClient::search) builds its own query, sends exactly
/// one request and owns its results, so a single client can serve concurrent searches. Clones
/// share the underlying connection pool.
///
/// ```rust,no_run
/// use amenity_locator::{AmenityQuerySpec, AmenityTag, GeoPoint, LocatorError, OverpassClient};
///
/// # async fn run() -> Result<(), LocatorError> {
/// let client = OverpassClient::default_endpoint()?;
/// let here = GeoPoint::new(43.264331, -2.9207012)?;
///
/// let toilets = client
///     .search_near(here, &AmenityQuerySpec::new(AmenityTag::Toilet))
///     .await?;
///
/// for feature in &toilets {
///     println!("{} at {},{}", feature.distance_label(), feature.latitude, feature.longitude);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OverpassClient {
    pub(crate) endpoint: Url,
    pub(crate) config: ClientConfig,
    pub(crate) http_client: Client,
}

impl OverpassClient {
    /// Creates a client for `endpoint` with otherwise default settings.
    ///
    /// # Arguments
    ///
    /// * `endpoint`: URL of an Overpass interpreter (e.g., `"https://overpass-api.de/api/interpreter"`).
    ///   A missing scheme is treated as `http://`.
    ///
    /// # Returns
    ///
    /// A `Result` containing the new `OverpassClient`, or a `LocatorError` if the endpoint is not
    /// a usable HTTP URL.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use amenity_locator::{LocatorError, OverpassClient};
    ///
    /// # fn main() -> Result<(), LocatorError> {
    /// let client = OverpassClient::new("https://overpass.kumi.systems/api/interpreter")?;
    /// assert_eq!(client.endpoint().host_str(), Some("overpass.kumi.systems"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(endpoint: &str) -> Result<Self, LocatorError> {
        Self::with_config(ClientConfig::default().with_endpoint(endpoint))
    }

    /// Creates a client for the public Overpass API at
    /// [`DEFAULT_ENDPOINT`](crate::config::DEFAULT_ENDPOINT).
    pub fn default_endpoint() -> Result<Self, LocatorError> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client from a full configuration.
    ///
    /// The endpoint is normalized the same way as in [`OverpassClient::new`]. The user agent
    /// and an `Accept: application/json` header are installed as default headers on the
    /// underlying `reqwest::Client`. No client-side timeout is set.
    ///
    /// # Arguments
    ///
    /// * `config`: Endpoint, user agent and map search base to use.
    ///
    /// # Errors
    ///
    /// `UrlParseError` if the endpoint is not a URL, `InvalidInput` if it cannot serve as a
    /// request target or the user agent is not a valid header value, `QueryFailed` if the HTTP
    /// client cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self, LocatorError> {
        let mut endpoint_string = config.endpoint.trim().to_string();
        if !endpoint_string.starts_with("http://") && !endpoint_string.starts_with("https://") {
            endpoint_string = format!("http://{}", endpoint_string);
        }

        let endpoint = Url::parse(&endpoint_string)?;
        if endpoint.cannot_be_a_base() || endpoint.host_str().is_none() {
            return Err(LocatorError::InvalidInput(format!(
                "The endpoint '{}' resolved to '{}', which is not a usable HTTP URL.",
                config.endpoint, endpoint
            )));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| {
                LocatorError::InvalidInput(format!(
                    "Invalid user agent '{}': {}",
                    config.user_agent, e
                ))
            })?,
        );
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = Client::builder().default_headers(default_headers).build()?;

        log::debug!("OverpassClient initialized with endpoint: {}", endpoint);

        Ok(Self {
            endpoint,
            config,
            http_client,
        })
    }

    /// The normalized interpreter URL requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Runs one distance-ranked amenity search.
    ///
    /// Queries nodes and ways tagged with `tag` inside `bbox`, places ways at the midpoint of
    /// their bounds, and returns the features sorted by haversine distance to `center`,
    /// nearest first. Exactly one request is sent. The client holds no per-search state, so
    /// concurrent calls on the same client are independent.
    ///
    /// # Arguments
    ///
    /// * `bbox`: The area to query, sent in (south, west, north, east) order.
    /// * `tag`: The amenity to look for.
    /// * `center`: The reference point distances are measured from.
    ///
    /// # Returns
    ///
    /// A `Result` containing the ranked features. A response whose `elements` field is missing
    /// or `null` yields an empty vector, not an error.
    ///
    /// # Errors
    ///
    /// `LocatorError::QueryFailed` on transport failure, an HTTP error status, or a body that
    /// is not JSON. No partial results are returned.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use amenity_locator::{AmenityTag, BoundingBox, GeoPoint, LocatorError, OverpassClient};
    ///
    /// # async fn run() -> Result<(), LocatorError> {
    /// let client = OverpassClient::default_endpoint()?;
    /// let bbox = BoundingBox::new(43.17, -3.04, 43.35, -2.80)?;
    /// let center = GeoPoint::new(43.264331, -2.9207012)?;
    ///
    /// let fountains = client.search(&bbox, AmenityTag::DrinkingWater, &center).await?;
    /// if let Some(nearest) = fountains.first() {
    ///     println!("Nearest fountain is {} away", nearest.distance_label());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(
        &self,
        bbox: &BoundingBox,
        tag: AmenityTag,
        center: &GeoPoint,
    ) -> Result<Vec<RankedFeature>, LocatorError> {
        let query = OverpassQuery::new(tag, *bbox);
        let elements = self._post_query(&query).await?;
        let ranked = rank_elements(elements, center);

        log::debug!("Search for '{}' returned {} features", tag, ranked.len());
        Ok(ranked)
    }

    /// Searches a prepared [`SearchArea`], ranking against its center.
    ///
    /// # Errors
    ///
    /// Same as [`OverpassClient::search`].
    pub async fn search_area(
        &self,
        area: &SearchArea,
        tag: AmenityTag,
    ) -> Result<Vec<RankedFeature>, LocatorError> {
        self.search(&area.bbox, tag, &area.center).await
    }

    /// Searches a box `spec.search_radius_km()` kilometers wide around `center`, ranked against
    /// `center`.
    ///
    /// # Arguments
    ///
    /// * `center`: Usually the device position.
    /// * `spec`: The amenity and radius; see [`AmenityQuerySpec::new`] for the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`OverpassClient::search`].
    pub async fn search_near(
        &self,
        center: GeoPoint,
        spec: &AmenityQuerySpec,
    ) -> Result<Vec<RankedFeature>, LocatorError> {
        let area = SearchArea::from_center_and_radius(center, spec.search_radius_km())?;
        self.search_area(&area, spec.tag()).await
    }

    /// Searches the current map viewport, ranked against the viewport's center.
    ///
    /// # Errors
    ///
    /// Same as [`OverpassClient::search`].
    pub async fn search_viewport(
        &self,
        viewport: BoundingBox,
        tag: AmenityTag,
    ) -> Result<Vec<RankedFeature>, LocatorError> {
        let area = SearchArea::from_viewport(viewport);
        self.search_area(&area, tag).await
    }
}
