//! Indian pincode extraction, validation, and the static postal-zone table.
//!
//! The first digit of a 6-digit pincode identifies a coarse geographic zone.
//! The same table backs both the live pincode-based cost path and the offline
//! fallback estimator, so the two always agree numerically.

use regex::Regex;

/// One of the 9 static pincode-digit zones. Constructed once, never mutated.
#[derive(Debug, PartialEq, serde::Serialize)]
pub struct ZoneDescriptor {
    /// Leading pincode digit, `'1'..='9'`.
    pub digit: char,
    pub name: &'static str,
    pub states: &'static [&'static str],
    /// Nominal road distance from the shop depot in km.
    pub distance_km: f64,
    /// Cost multiplier applied to the zone base rate.
    pub multiplier: f64,
}

/// Postal zones by leading pincode digit, ordered `1..=9`.
pub static ZONES: [ZoneDescriptor; 9] = [
    ZoneDescriptor {
        digit: '1',
        name: "Delhi, Haryana, Punjab, Himachal Pradesh, Jammu & Kashmir, Chandigarh",
        states: &[
            "Delhi",
            "Haryana",
            "Punjab",
            "Himachal Pradesh",
            "Jammu and Kashmir",
            "Chandigarh",
        ],
        distance_km: 500.0,
        multiplier: 1.2,
    },
    ZoneDescriptor {
        digit: '2',
        name: "Uttar Pradesh, Uttarakhand",
        states: &["Uttar Pradesh", "Uttarakhand"],
        distance_km: 400.0,
        multiplier: 1.1,
    },
    ZoneDescriptor {
        digit: '3',
        name: "Rajasthan, Gujarat, Daman & Diu, Dadra & Nagar Haveli",
        states: &["Rajasthan", "Gujarat", "Daman and Diu", "Dadra and Nagar Haveli"],
        distance_km: 300.0,
        multiplier: 1.0,
    },
    ZoneDescriptor {
        digit: '4',
        name: "Maharashtra, Goa, Madhya Pradesh, Chhattisgarh",
        states: &["Maharashtra", "Goa", "Madhya Pradesh", "Chhattisgarh"],
        distance_km: 200.0,
        multiplier: 0.9,
    },
    ZoneDescriptor {
        digit: '5',
        name: "Karnataka, Andhra Pradesh, Telangana",
        states: &["Karnataka", "Andhra Pradesh", "Telangana"],
        distance_km: 100.0,
        multiplier: 0.8,
    },
    ZoneDescriptor {
        digit: '6',
        name: "Tamil Nadu, Kerala, Puducherry, Lakshadweep",
        states: &["Tamil Nadu", "Kerala", "Puducherry", "Lakshadweep"],
        distance_km: 200.0,
        multiplier: 0.9,
    },
    ZoneDescriptor {
        digit: '7',
        name: "West Bengal, Odisha, Assam, Sikkim, Arunachal Pradesh, Manipur, Meghalaya, Mizoram, Nagaland, Tripura",
        states: &[
            "West Bengal",
            "Odisha",
            "Assam",
            "Sikkim",
            "Arunachal Pradesh",
            "Manipur",
            "Meghalaya",
            "Mizoram",
            "Nagaland",
            "Tripura",
        ],
        distance_km: 400.0,
        multiplier: 1.1,
    },
    ZoneDescriptor {
        digit: '8',
        name: "Bihar, Jharkhand",
        states: &["Bihar", "Jharkhand"],
        distance_km: 500.0,
        multiplier: 1.2,
    },
    ZoneDescriptor {
        digit: '9',
        name: "Army Postal Service (APS)",
        states: &["Army Postal Service"],
        distance_km: 600.0,
        multiplier: 1.3,
    },
];

/// Extracts the first standalone 6-digit token from free-form address text.
///
/// The token may appear anywhere in the string; word boundaries keep longer
/// digit runs (phone numbers, 7+ digits) from matching.
#[must_use]
pub fn extract_pincode(address: &str) -> Option<String> {
    let re = Regex::new(r"\b(\d{6})\b").expect("valid pincode regex");
    re.captures(address)
        .map(|caps| caps[1].to_string())
}

/// Strips everything but ASCII digits, so `" 560 001"` normalizes to
/// `"560001"` before validation.
#[must_use]
pub fn normalize_pincode(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// `true` iff `pincode` is exactly 6 ASCII digits with a non-zero first digit.
#[must_use]
pub fn is_valid_pincode(pincode: &str) -> bool {
    pincode.len() == 6
        && pincode.bytes().all(|b| b.is_ascii_digit())
        && !pincode.starts_with('0')
}

/// Looks up the zone for a pincode by its leading digit.
///
/// Returns `None` for anything that fails [`is_valid_pincode`].
#[must_use]
pub fn zone_for_pincode(pincode: &str) -> Option<&'static ZoneDescriptor> {
    if !is_valid_pincode(pincode) {
        return None;
    }
    let digit = pincode.chars().next()?;
    ZONES.iter().find(|zone| zone.digit == digit)
}
