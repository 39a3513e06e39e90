use thiserror::Error;

/// Errors raised by the geocoding/routing clients and the resolver.
///
/// None of these ever reach the pipeline's caller: every failure inside
/// [`crate::ShippingPipeline::estimate`] degrades to the offline fallback
/// estimator instead.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A provider base URL could not be parsed at client construction.
    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Every geocoding strategy was exhausted without an accepted candidate.
    #[error("no geocoding match for \"{address}\" after trying all strategies")]
    NoGeocodeMatch { address: String },

    /// The routing provider returned no route between the coordinate pairs.
    #[error("no route found between the given coordinates")]
    NoRouteFound,

    /// The supplied pincode is not 6 digits with a non-zero leading digit.
    #[error("invalid pincode format \"{0}\": must be 6 digits, first digit 1-9")]
    InvalidPincode(String),
}
