//! Deterministic shipping-cost rules.
//!
//! Two variants: distance-banded pricing for geocoded addresses, and
//! zone-multiplier pricing for pincode resolutions. Both honor the
//! free-shipping cutoff before anything else.

use crate::pincode::ZoneDescriptor;

/// Orders at or above this value (rupees) ship free. Hard cutoff, no
/// partial discount.
pub const FREE_SHIPPING_THRESHOLD: f64 = 999.0;

/// Base rate the zone multiplier scales.
const ZONE_BASE_RATE: f64 = 150.0;

/// Assumed average driving speed for zone duration estimates.
const AVERAGE_SPEED_KMPH: f64 = 50.0;

/// Shipping cost in whole rupees for a driving distance and order value.
///
/// Base tier by distance band plus a surcharge of 25 rupees per started
/// 100 km.
#[must_use]
pub fn cost_for_distance(distance_km: f64, order_value: f64) -> u32 {
    if order_value >= FREE_SHIPPING_THRESHOLD {
        return 0;
    }

    let base: u32 = if distance_km < 10.0 {
        50 // local
    } else if distance_km < 50.0 {
        100 // city
    } else if distance_km < 100.0 {
        150 // regional
    } else if distance_km < 300.0 {
        200 // state
    } else if distance_km < 500.0 {
        300 // inter-state
    } else {
        500 // long distance
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let surcharge = (distance_km / 100.0).ceil() as u32 * 25;

    base + surcharge
}

/// Shipping cost in whole rupees for a pincode zone and order value.
#[must_use]
pub fn cost_for_zone(zone: &ZoneDescriptor, order_value: f64) -> u32 {
    if order_value >= FREE_SHIPPING_THRESHOLD {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cost = (ZONE_BASE_RATE * zone.multiplier).round() as u32;
    cost
}

/// Estimated delivery duration for a zone, in whole hours at the assumed
/// average speed.
#[must_use]
pub fn zone_duration_hours(zone: &ZoneDescriptor) -> f64 {
    (zone.distance_km / AVERAGE_SPEED_KMPH).round()
}

/// Estimated duration for a heuristic distance, same speed assumption.
#[must_use]
pub fn estimated_duration_hours(distance_km: f64) -> f64 {
    (distance_km / AVERAGE_SPEED_KMPH).round()
}
