//! HTTP clients for the forward-geocoding and routing providers.
//!
//! Both wrap `reqwest` with bounded timeouts, a descriptive `User-Agent`,
//! and typed response deserialization. Base URLs are injectable so tests
//! point at a mock server; the defaults are the public reference providers,
//! which require no API key.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GeoError;
use crate::types::{Coordinates, DistanceResult, GeocodeCandidate, RouteResponse};

const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_ROUTER_URL: &str = "https://router.project-osrm.org";

/// Candidates requested per geocoding query; more than one so the scorer
/// has alternatives to rank.
const CANDIDATE_LIMIT: u32 = 5;

fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, GeoError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

fn parse_base_url(base_url: &str) -> Result<Url, GeoError> {
    // Normalise: ensure the base URL ends with exactly one slash so that
    // joining a relative path appends rather than replacing the last segment.
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| GeoError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Client for a Nominatim-shaped forward-geocoding API.
pub struct GeocodingClient {
    client: Client,
    base_url: Url,
}

impl GeocodingClient {
    /// Creates a client pointed at the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, GeoError> {
        Self::with_base_url(DEFAULT_GEOCODER_URL, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL (for testing with wiremock,
    /// or a self-hosted provider).
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`GeoError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeoError> {
        Ok(Self {
            client: build_http_client(timeout_secs, user_agent)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Runs one forward-geocoding query and returns up to 5 candidates.
    ///
    /// `restrict_country` adds `countrycodes=in`; the global last-resort
    /// strategy searches without it.
    ///
    /// # Errors
    ///
    /// - [`GeoError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`GeoError::Deserialize`] if the body is not a candidate array.
    pub async fn search(
        &self,
        query: &str,
        restrict_country: bool,
    ) -> Result<Vec<GeocodeCandidate>, GeoError> {
        let url = self.search_url(query, restrict_country);
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeoError::Deserialize {
            context: format!("geocode search \"{query}\""),
            source: e,
        })
    }

    fn search_url(&self, query: &str, restrict_country: bool) -> Url {
        let mut url = self
            .base_url
            .join("search")
            .expect("static path joins onto a parsed base URL");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            pairs.append_pair("format", "json");
            pairs.append_pair("limit", &CANDIDATE_LIMIT.to_string());
            pairs.append_pair("addressdetails", "1");
            if restrict_country {
                pairs.append_pair("countrycodes", "in");
            }
        }
        url
    }
}

/// Client for an OSRM-shaped routing API.
pub struct RoutingClient {
    client: Client,
    base_url: Url,
}

impl RoutingClient {
    /// Creates a client pointed at the public OSRM instance.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, GeoError> {
        Self::with_base_url(DEFAULT_ROUTER_URL, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`GeoError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeoError> {
        Ok(Self {
            client: build_http_client(timeout_secs, user_agent)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Fetches the driving route between two points and returns its
    /// distance/duration. Exactly one route is requested and never retried;
    /// the pipeline's fallback handles failure.
    ///
    /// # Errors
    ///
    /// - [`GeoError::NoRouteFound`] if the provider returns no routes.
    /// - [`GeoError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`GeoError::Deserialize`] if the body does not match the expected
    ///   shape.
    pub async fn route(&self, from: Coordinates, to: Coordinates) -> Result<DistanceResult, GeoError> {
        let url = self.route_url(from, to);
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let parsed: RouteResponse =
            serde_json::from_str(&body).map_err(|e| GeoError::Deserialize {
                context: format!("route {},{} -> {},{}", from.lat, from.lon, to.lat, to.lon),
                source: e,
            })?;

        let route = parsed.routes.first().ok_or(GeoError::NoRouteFound)?;
        Ok(DistanceResult {
            distance_meters: route.distance,
            duration_seconds: route.duration,
        })
    }

    fn route_url(&self, from: Coordinates, to: Coordinates) -> Url {
        // OSRM takes lon,lat pairs in the path.
        let path = format!(
            "route/v1/driving/{},{};{},{}",
            from.lon, from.lat, to.lon, to.lat
        );
        let mut url = self
            .base_url
            .join(&path)
            .expect("coordinate path joins onto a parsed base URL");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("overview", "false");
            pairs.append_pair("steps", "false");
        }
        url
    }
}
