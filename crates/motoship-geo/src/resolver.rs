//! Strategy-driven geocode resolution.
//!
//! Walks the ordered strategy list, one bounded request per strategy, and
//! stops at the first accepted candidate. Transport errors and empty result
//! sets are normal "strategy failed" outcomes, logged and swallowed rather
//! than propagated, so a flaky provider degrades to the next strategy
//! instead of failing the request.

use std::sync::Arc;

use crate::cache::PincodeCache;
use crate::client::GeocodingClient;
use crate::error::GeoError;
use crate::pincode::is_valid_pincode;
use crate::score::{best_candidate, score_pincode_candidate, score_text_candidate};
use crate::strategy::{generate_strategies, pincode_queries};
use crate::types::{Confidence, GeocodeResult};

pub struct GeocodeResolver {
    geocoder: GeocodingClient,
    cache: Arc<PincodeCache>,
}

impl GeocodeResolver {
    pub fn new(geocoder: GeocodingClient, cache: Arc<PincodeCache>) -> Self {
        Self { geocoder, cache }
    }

    /// Resolves a free-text address by trying each query strategy in order.
    ///
    /// The first strategy that yields an accepted candidate terminates the
    /// loop; remaining strategies are never attempted.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::NoGeocodeMatch`] once every strategy has been
    /// exhausted. Per-strategy failures are not surfaced.
    pub async fn resolve_address(&self, address: &str) -> Result<GeocodeResult, GeoError> {
        let strategies = generate_strategies(address);
        let total = strategies.len();

        for (i, strategy) in strategies.iter().enumerate() {
            tracing::debug!(
                strategy = strategy.name,
                attempt = i + 1,
                total,
                "trying geocoding strategy"
            );

            let candidates = match self
                .geocoder
                .search(&strategy.query, strategy.restrict_country)
                .await
            {
                Ok(candidates) => candidates,
                Err(error) => {
                    tracing::warn!(
                        strategy = strategy.name,
                        error = %error,
                        "geocoding strategy failed, trying next"
                    );
                    continue;
                }
            };

            let best = best_candidate(&candidates, |c| score_text_candidate(c, address));
            if let Some(result) =
                best.and_then(|c| GeocodeResult::from_candidate(c, strategy.name, Confidence::Medium))
            {
                tracing::debug!(
                    strategy = strategy.name,
                    display_name = %result.display_name,
                    "address geocoded"
                );
                return Ok(result);
            }
        }

        Err(GeoError::NoGeocodeMatch {
            address: address.to_string(),
        })
    }

    /// Resolves a pincode to coordinates, serving repeats from the cache.
    ///
    /// A cache hit issues no network call and performs no re-scoring. On a
    /// miss, four query phrasings are tried in order and the winning result
    /// is cached for the life of the process.
    ///
    /// # Errors
    ///
    /// - [`GeoError::InvalidPincode`] for malformed input (not retried).
    /// - [`GeoError::NoGeocodeMatch`] when every phrasing comes up empty.
    pub async fn resolve_pincode(&self, pincode: &str) -> Result<GeocodeResult, GeoError> {
        if !is_valid_pincode(pincode) {
            return Err(GeoError::InvalidPincode(pincode.to_string()));
        }

        if let Some(cached) = self.cache.get(pincode) {
            tracing::debug!(pincode, "pincode served from cache");
            return Ok(cached);
        }

        for query in pincode_queries(pincode) {
            let candidates = match self.geocoder.search(&query, true).await {
                Ok(candidates) => candidates,
                Err(error) => {
                    tracing::warn!(pincode, query = %query, error = %error, "pincode query failed, trying next");
                    continue;
                }
            };

            let best = best_candidate(&candidates, |c| score_pincode_candidate(c, pincode));
            if let Some(result) =
                best.and_then(|c| GeocodeResult::from_candidate(c, "pincode-based", Confidence::High))
            {
                self.cache.insert(pincode, result.clone());
                tracing::debug!(pincode, display_name = %result.display_name, "pincode geocoded and cached");
                return Ok(result);
            }
        }

        Err(GeoError::NoGeocodeMatch {
            address: pincode.to_string(),
        })
    }

    /// The cache backing pincode resolution, shared with the pipeline.
    #[must_use]
    pub fn cache(&self) -> &Arc<PincodeCache> {
        &self.cache
    }
}
