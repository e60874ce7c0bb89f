// src/config.rs

/// Public Overpass API interpreter endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Base of the external map search links attached to markers.
pub const DEFAULT_MAP_SEARCH_BASE: &str = "https://www.google.com.sa/maps";

/// Connection settings for an [`OverpassClient`](crate::OverpassClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Interpreter URL queries are POSTed to.
    pub endpoint: String,
    /// `User-Agent` header sent with every request. Public Overpass instances ask clients to
    /// identify themselves.
    pub user_agent: String,
    /// Map search links are rendered as `<map_search_base>/search/<lat>,<lon>`.
    pub map_search_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            map_search_base: DEFAULT_MAP_SEARCH_BASE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Sets the interpreter URL. It is normalized when the client is built, not here.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the `User-Agent` header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the base of marker links, without a trailing slash.
    pub fn with_map_search_base(mut self, base: impl Into<String>) -> Self {
        self.map_search_base = base.into();
        self
    }

    /// Link to the external map search for a position.
    pub fn map_search_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/search/{},{}",
            self.map_search_base.trim_end_matches('/'),
            latitude,
            longitude
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_services() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "https://overpass-api.de/api/interpreter");
        assert!(config.user_agent.starts_with("amenity-locator/"));
    }

    #[test]
    fn map_search_url_is_templated_on_position() {
        let config = ClientConfig::default();
        assert_eq!(
            config.map_search_url(43.27, -2.92),
            "https://www.google.com.sa/maps/search/43.27,-2.92"
        );

        let custom = ClientConfig::default().with_map_search_base("https://maps.example.org/");
        assert_eq!(
            custom.map_search_url(1.5, 2.0),
            "https://maps.example.org/search/1.5,2"
        );
    }
}
