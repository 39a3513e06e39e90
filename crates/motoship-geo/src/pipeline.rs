//! Top-level shipping resolution.
//!
//! Composes the resolver, routing client, cost rules, and offline fallback
//! into the single entry point the HTTP layer and CLI consume. The pipeline
//! never returns an error: every internal failure degrades to the next
//! stage, and total failure degrades to the offline estimator, which cannot
//! fail. Stages run sequentially: each depends on whether the previous one
//! produced an acceptable result, and the free reference providers are
//! rate-limited, so there is nothing to gain from concurrent fan-out.
//! Cancelling the request future aborts any in-flight provider call.

use std::sync::Arc;

use motoship_core::{AppConfig, ShopOrigin};

use crate::cache::PincodeCache;
use crate::client::{GeocodingClient, RoutingClient};
use crate::cost::{
    cost_for_distance, cost_for_zone, zone_duration_hours, FREE_SHIPPING_THRESHOLD,
};
use crate::error::GeoError;
use crate::fallback::fallback_quote;
use crate::pincode::{extract_pincode, is_valid_pincode, normalize_pincode, zone_for_pincode, ZoneDescriptor};
use crate::resolver::GeocodeResolver;
use crate::types::{
    Confidence, Coordinates, GeocodeResult, PincodeValidation, QuoteMethod, ShippingQuote,
};

pub struct ShippingPipeline {
    resolver: GeocodeResolver,
    router: RoutingClient,
    shop: ShopOrigin,
}

impl ShippingPipeline {
    pub fn new(
        geocoder: GeocodingClient,
        router: RoutingClient,
        cache: Arc<PincodeCache>,
        shop: ShopOrigin,
    ) -> Self {
        Self {
            resolver: GeocodeResolver::new(geocoder, cache),
            router,
            shop,
        }
    }

    /// Builds a pipeline with a fresh cache from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] or [`GeoError::InvalidBaseUrl`] if either
    /// provider client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, GeoError> {
        let geocoder = GeocodingClient::with_base_url(
            &config.geocoder_base_url,
            config.request_timeout_secs,
            &config.http_user_agent,
        )?;
        let router = RoutingClient::with_base_url(
            &config.router_base_url,
            config.request_timeout_secs,
            &config.http_user_agent,
        )?;
        Ok(Self::new(
            geocoder,
            router,
            Arc::new(PincodeCache::new()),
            config.shop_origin.clone(),
        ))
    }

    #[must_use]
    pub fn shop_origin(&self) -> &ShopOrigin {
        &self.shop
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<PincodeCache> {
        self.resolver.cache()
    }

    /// Resolves an address and order value to a shipping quote. Infallible:
    /// the worst case is a low-confidence fallback quote.
    ///
    /// Stage order: pincode attempt (when a valid pincode is embedded),
    /// then text-strategy geocoding, then routing, then the offline
    /// fallback.
    pub async fn estimate(&self, address: &str, order_value: f64) -> ShippingQuote {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return fallback_quote(trimmed, order_value, "empty address, using offline estimate");
        }

        if let Some(pincode) = extract_pincode(trimmed).filter(|p| is_valid_pincode(p)) {
            match self.resolver.resolve_pincode(&pincode).await {
                Ok(location) => {
                    if let Some(zone) = zone_for_pincode(&pincode) {
                        return Self::pincode_quote(zone, location, order_value);
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        pincode = %pincode,
                        error = %error,
                        "pincode attempt failed, trying text strategies"
                    );
                }
            }
        }

        let location = match self.resolver.resolve_address(trimmed).await {
            Ok(location) => location,
            Err(error) => {
                tracing::warn!(error = %error, "geocoding failed, using offline estimate");
                return fallback_quote(trimmed, order_value, "geocoding failed, using offline estimate");
            }
        };

        match self
            .router
            .route(self.shop_coordinates(), location.coordinates())
            .await
        {
            Ok(leg) => {
                let confidence = location.confidence;
                ShippingQuote {
                    shipping_cost: cost_for_distance(leg.distance_km(), order_value),
                    distance_km: leg.distance_km(),
                    duration_hours: leg.duration_hours(),
                    coordinates: Some(location),
                    zone: None,
                    method: QuoteMethod::GeocodingBased,
                    confidence,
                    fallback_reason: None,
                }
            }
            Err(error) => {
                tracing::warn!(error = %error, "route calculation failed, using offline estimate");
                fallback_quote(
                    trimmed,
                    order_value,
                    "route calculation failed, using offline estimate",
                )
            }
        }
    }

    /// Resolves a free-text address to coordinates without pricing it.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::NoGeocodeMatch`] when every strategy fails.
    pub async fn resolve_address(&self, address: &str) -> Result<GeocodeResult, GeoError> {
        self.resolver.resolve_address(address).await
    }

    /// Validates a standalone pincode and prices its zone.
    ///
    /// All failures (bad format, unreachable provider, no match) are
    /// reported in-band so checkout flows always get a renderable response.
    pub async fn validate_pincode(&self, pincode: &str, order_value: f64) -> PincodeValidation {
        let normalized = normalize_pincode(pincode);
        let Some(zone) = zone_for_pincode(&normalized) else {
            return PincodeValidation {
                valid: false,
                pincode: pincode.to_string(),
                coordinates: None,
                zone: None,
                shipping_cost: None,
                distance_km: None,
                duration_hours: None,
                error: Some("invalid pincode format: must be 6 digits, first digit 1-9".to_string()),
            };
        };

        match self.resolver.resolve_pincode(&normalized).await {
            Ok(location) => {
                let free = order_value >= FREE_SHIPPING_THRESHOLD;
                PincodeValidation {
                    valid: true,
                    pincode: normalized,
                    coordinates: Some(location),
                    zone: if free { None } else { Some(zone) },
                    shipping_cost: Some(cost_for_zone(zone, order_value)),
                    distance_km: Some(if free { 0.0 } else { zone.distance_km }),
                    duration_hours: Some(if free { 0.0 } else { zone_duration_hours(zone) }),
                    error: None,
                }
            }
            Err(error) => {
                tracing::warn!(pincode = %normalized, error = %error, "pincode validation lookup failed");
                PincodeValidation {
                    valid: false,
                    pincode: normalized,
                    coordinates: None,
                    zone: None,
                    shipping_cost: None,
                    distance_km: None,
                    duration_hours: None,
                    error: Some(format!("unable to resolve pincode: {error}")),
                }
            }
        }
    }

    fn pincode_quote(
        zone: &'static ZoneDescriptor,
        location: GeocodeResult,
        order_value: f64,
    ) -> ShippingQuote {
        let free = order_value >= FREE_SHIPPING_THRESHOLD;
        ShippingQuote {
            shipping_cost: cost_for_zone(zone, order_value),
            distance_km: if free { 0.0 } else { zone.distance_km },
            duration_hours: if free { 0.0 } else { zone_duration_hours(zone) },
            coordinates: Some(location),
            zone: if free { None } else { Some(zone) },
            method: QuoteMethod::PincodeBased,
            confidence: Confidence::High,
            fallback_reason: None,
        }
    }

    fn shop_coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.shop.lat,
            lon: self.shop.lon,
        }
    }
}
