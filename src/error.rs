// src/error.rs
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("Geodata query failed: {0}")]
    QueryFailed(#[from] QueryFailure),

    #[error("Geolocation failed: {0}")]
    Geolocation(#[from] GeolocationError),

    #[error("URL parsing failed: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LocatorError {
    /// Returns true for failures of the network round trip (transport, status or body).
    pub fn is_query_failed(&self) -> bool {
        matches!(self, LocatorError::QueryFailed(_))
    }
}

impl From<reqwest::Error> for LocatorError {
    fn from(err: reqwest::Error) -> Self {
        LocatorError::QueryFailed(QueryFailure::Transport(err))
    }
}

/// Everything that can go wrong between sending the query and holding a JSON document.
#[derive(Error, Debug)]
pub enum QueryFailure {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Geodata service answered HTTP {status}: {body_snippet}")]
    HttpStatus { status: u16, body_snippet: String },

    #[error("Response body is not JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl QueryFailure {
    /// Creates a `QueryFailure` from a non-success HTTP status and the raw response body.
    ///
    /// Overpass reports errors as HTML or plain text, so the body is only kept as a short snippet.
    /// A JSON body carrying a `remark` field (Overpass' runtime error channel) is preferred.
    pub(crate) fn from_response(status_code: u16, response_body: &str) -> Self {
        let remark = serde_json::from_str::<Value>(response_body)
            .ok()
            .and_then(|v| v.get("remark").and_then(|r| r.as_str()).map(str::to_string));

        let body_snippet = match remark {
            Some(remark) => remark,
            None => response_body.chars().take(100).collect(),
        };

        QueryFailure::HttpStatus {
            status: status_code,
            body_snippet,
        }
    }
}

/// The three ways a device position lookup can fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeolocationError {
    #[error("Permission denied")]
    PermissionDenied,
    #[error("Position unavailable")]
    PositionUnavailable,
    #[error("Request timeout")]
    Timeout,
}

impl GeolocationError {
    /// Maps the numeric codes used by the browser geolocation API (1, 2, 3).
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(GeolocationError::PermissionDenied),
            2 => Some(GeolocationError::PositionUnavailable),
            3 => Some(GeolocationError::Timeout),
            _ => None,
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            GeolocationError::PermissionDenied => 1,
            GeolocationError::PositionUnavailable => 2,
            GeolocationError::Timeout => 3,
        }
    }

    /// Fixed human-readable message for this failure kind.
    pub fn message(&self) -> &'static str {
        match self {
            GeolocationError::PermissionDenied => "Permission denied",
            GeolocationError::PositionUnavailable => "Position unavailable",
            GeolocationError::Timeout => "Request timeout",
        }
    }

    /// Text of the blocking notification shown to the user.
    pub fn alert_text(&self) -> String {
        format!("Error: {}", self.message())
    }
}
