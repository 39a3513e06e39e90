//! Wire types for the geocoding/routing providers and the domain types the
//! engine produces.
//!
//! Wire types model the JSON actually returned by Nominatim-shaped and
//! OSRM-shaped APIs. Nominatim returns `lat`/`lon` as *strings* and the
//! `address` object's key set varies per result; both are kept as-is here
//! and converted at the domain boundary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::pincode::ZoneDescriptor;

// ---------------------------------------------------------------------------
// Forward geocoding (Nominatim /search)
// ---------------------------------------------------------------------------

/// One candidate from the forward-geocoding provider.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeCandidate {
    /// Latitude as a decimal string, e.g. `"17.3850440"`.
    pub lat: String,
    /// Longitude as a decimal string.
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
    /// Address components keyed by kind (`"city"`, `"state"`, `"postcode"`, …).
    #[serde(default)]
    pub address: HashMap<String, serde_json::Value>,
    /// Nominatim relevance ranking in `[0, 1]`; absent on some results.
    #[serde(default)]
    pub importance: Option<f64>,
}

impl GeocodeCandidate {
    /// The `postcode` (or legacy `postal_code`) address component, if present.
    #[must_use]
    pub fn postcode(&self) -> Option<&str> {
        self.address
            .get("postcode")
            .or_else(|| self.address.get("postal_code"))
            .and_then(serde_json::Value::as_str)
    }
}

// ---------------------------------------------------------------------------
// Routing (OSRM /route/v1/driving)
// ---------------------------------------------------------------------------

/// Top-level routing response; `routes` is empty when no route exists.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Route {
    /// Driving distance in meters.
    pub distance: f64,
    /// Driving duration in seconds.
    pub duration: f64,
}

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Qualitative trust level attached to a resolution.
///
/// `High` = pincode-component exact match, `Medium` = text heuristic,
/// `Low` = offline fallback with no external confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Which path of the resolution pipeline produced a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteMethod {
    PincodeBased,
    GeocodingBased,
    Fallback,
}

/// A resolved location. Immutable once returned; owned by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct GeocodeResult {
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
    /// Raw provider address components, kept for downstream display.
    pub address: HashMap<String, serde_json::Value>,
    /// Name of the query strategy that produced this result.
    pub strategy: &'static str,
    pub confidence: Confidence,
}

impl GeocodeResult {
    /// Converts a wire candidate into a domain result.
    ///
    /// Returns `None` if the provider's string coordinates do not parse;
    /// such a candidate is unusable and the caller moves on.
    #[must_use]
    pub fn from_candidate(
        candidate: &GeocodeCandidate,
        strategy: &'static str,
        confidence: Confidence,
    ) -> Option<Self> {
        let lat = candidate.lat.parse::<f64>().ok()?;
        let lon = candidate.lon.parse::<f64>().ok()?;
        Some(Self {
            lat,
            lon,
            display_name: candidate.display_name.clone(),
            address: candidate.address.clone(),
            strategy,
            confidence,
        })
    }

    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// One driving leg as reported by the routing provider. Derived per request,
/// never cached.
#[derive(Debug, Clone, Copy)]
pub struct DistanceResult {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl DistanceResult {
    #[must_use]
    pub fn distance_km(self) -> f64 {
        self.distance_meters / 1000.0
    }

    #[must_use]
    pub fn duration_hours(self) -> f64 {
        self.duration_seconds / 3600.0
    }
}

/// Terminal artifact of shipping resolution; no further mutation after
/// construction.
#[derive(Debug, Clone, Serialize)]
pub struct ShippingQuote {
    /// Shipping cost in whole rupees.
    pub shipping_cost: u32,
    pub distance_km: f64,
    pub duration_hours: f64,
    /// Resolved customer coordinates; `None` on the fallback path.
    pub coordinates: Option<GeocodeResult>,
    /// Pincode zone backing the quote; `None` for geocoding-based quotes.
    pub zone: Option<&'static ZoneDescriptor>,
    pub method: QuoteMethod,
    pub confidence: Confidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

/// Outcome of a standalone pincode validation.
///
/// Format problems and provider failures are reported in-band via `valid` /
/// `error` rather than as errors, so checkout flows can always render a
/// response.
#[derive(Debug, Clone, Serialize)]
pub struct PincodeValidation {
    pub valid: bool,
    pub pincode: String,
    pub coordinates: Option<GeocodeResult>,
    pub zone: Option<&'static ZoneDescriptor>,
    pub shipping_cost: Option<u32>,
    pub distance_km: Option<f64>,
    pub duration_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
