//! Offline shipping estimation from address text alone.
//!
//! Used only when both the geocoding and routing paths fail outright. Pure
//! function of the raw address and order value; guaranteed to terminate with
//! a cost, so the pipeline can promise a quote on every request.

use crate::cost::{cost_for_zone, estimated_duration_hours, zone_duration_hours, FREE_SHIPPING_THRESHOLD};
use crate::pincode::{extract_pincode, zone_for_pincode};
use crate::types::{Confidence, QuoteMethod, ShippingQuote};

const DEFAULT_COST: f64 = 150.0;
const DEFAULT_DISTANCE_KM: f64 = 200.0;

/// Metro cities with dense courier coverage.
const TIER1_CITIES: &[&str] = &[
    "mumbai", "delhi", "bangalore", "chennai", "hyderabad", "kolkata", "pune", "ahmedabad",
    "surat", "jaipur", "lucknow", "kanpur",
];

const TIER2_CITIES: &[&str] = &[
    "nagpur", "indore", "thane", "bhopal", "visakhapatnam", "pimpri", "patna", "vadodara",
    "ghaziabad", "ludhiana", "agra", "nashik",
];

const TIER3_CITIES: &[&str] = &[
    "faridabad", "meerut", "rajkot", "kalyan", "vasai", "varanasi", "srinagar", "aurangabad",
    "noida", "solapur", "vijayawada", "kolhapur",
];

/// Per-state cost multiplier and distance estimate, measured from the
/// Hyderabad depot. Iteration order is fixed and significant: the first
/// state name found in the address wins.
const STATE_ADJUSTMENTS: &[(&str, f64, f64)] = &[
    // Southern states (closest to the depot)
    ("andhra pradesh", 0.8, 100.0),
    ("telangana", 0.7, 50.0),
    ("karnataka", 0.9, 200.0),
    ("tamil nadu", 0.9, 300.0),
    ("kerala", 1.0, 400.0),
    // Western states
    ("maharashtra", 0.8, 150.0),
    ("gujarat", 0.9, 200.0),
    ("goa", 1.0, 300.0),
    // Northern states
    ("uttar pradesh", 1.2, 500.0),
    ("rajasthan", 1.1, 400.0),
    ("punjab", 1.3, 600.0),
    ("haryana", 1.2, 550.0),
    ("delhi", 1.2, 550.0),
    // Eastern states
    ("west bengal", 1.1, 400.0),
    ("odisha", 1.0, 300.0),
    ("bihar", 1.2, 500.0),
    ("jharkhand", 1.1, 450.0),
    // Remote areas
    ("jammu and kashmir", 1.5, 800.0),
    ("himachal pradesh", 1.4, 700.0),
    ("uttarakhand", 1.3, 600.0),
    ("arunachal pradesh", 1.6, 900.0),
    ("assam", 1.3, 600.0),
    ("manipur", 1.5, 800.0),
    ("meghalaya", 1.4, 700.0),
    ("mizoram", 1.5, 800.0),
    ("nagaland", 1.5, 800.0),
    ("sikkim", 1.4, 700.0),
    ("tripura", 1.3, 600.0),
];

/// Derives a quote from address text alone. Never fails.
///
/// Override order (literal, later steps win): city tier, then the first
/// matching state adjustment, then the leading-digit zone when a valid
/// pincode is present. The zone step replaces the cost and distance with
/// exactly what the live pincode-zone path would compute.
#[must_use]
pub fn fallback_quote(address: &str, order_value: f64, reason: &str) -> ShippingQuote {
    if order_value >= FREE_SHIPPING_THRESHOLD {
        return ShippingQuote {
            shipping_cost: 0,
            distance_km: 0.0,
            duration_hours: 0.0,
            coordinates: None,
            zone: None,
            method: QuoteMethod::Fallback,
            confidence: Confidence::Low,
            fallback_reason: Some(reason.to_string()),
        };
    }

    let address_lower = address.to_lowercase();
    let mut cost = DEFAULT_COST;
    let mut distance_km = DEFAULT_DISTANCE_KM;

    if TIER1_CITIES.iter().any(|city| address_lower.contains(city)) {
        cost = 100.0;
        distance_km = 50.0;
    } else if TIER2_CITIES.iter().any(|city| address_lower.contains(city)) {
        cost = 120.0;
        distance_km = 100.0;
    } else if TIER3_CITIES.iter().any(|city| address_lower.contains(city)) {
        cost = 140.0;
        distance_km = 150.0;
    }

    for (state, multiplier, state_distance) in STATE_ADJUSTMENTS {
        if address_lower.contains(state) {
            cost = (cost * multiplier).round();
            distance_km = *state_distance;
            break;
        }
    }

    let mut matched_zone = None;
    if let Some(zone) = extract_pincode(address).as_deref().and_then(zone_for_pincode) {
        cost = f64::from(cost_for_zone(zone, order_value));
        distance_km = zone.distance_km;
        matched_zone = Some(zone);
    }

    let duration_hours = matched_zone
        .map_or_else(|| estimated_duration_hours(distance_km), zone_duration_hours);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let shipping_cost = cost.round() as u32;

    ShippingQuote {
        shipping_cost,
        distance_km,
        duration_hours,
        coordinates: None,
        zone: matched_zone,
        method: QuoteMethod::Fallback,
        confidence: Confidence::Low,
        fallback_reason: Some(reason.to_string()),
    }
}
