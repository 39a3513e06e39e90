//! Query strategy generation for forward geocoding.
//!
//! A raw customer address rarely geocodes verbatim, so the resolver walks an
//! ordered list of reformulations: verbatim, cleaned, city+state, pincode
//! area, and finally an unrestricted global search. Order is significant:
//! the first strategy that yields an accepted candidate wins.

use regex::Regex;

use crate::pincode::extract_pincode;

/// One candidate query formulation for the geocoding provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    pub name: &'static str,
    pub query: String,
    /// Restrict results to India (`countrycodes=in`). The global last-resort
    /// strategy turns this off.
    pub restrict_country: bool,
}

/// Derives the ordered strategy list for a raw address.
///
/// Duplicate request shapes (same query text AND same country restriction)
/// are dropped, keeping the earliest occurrence. The global strategy reuses
/// the cleaned text but is a distinct request shape, so it survives.
#[must_use]
pub fn generate_strategies(address: &str) -> Vec<Strategy> {
    let cleaned = clean_address(address);

    let mut candidates = vec![Strategy {
        name: "full address",
        query: address.to_string(),
        restrict_country: true,
    }];

    if cleaned != address {
        candidates.push(Strategy {
            name: "cleaned address",
            query: cleaned.clone(),
            restrict_country: true,
        });
    }

    if let Some(city_state) = extract_city_state(address) {
        candidates.push(Strategy {
            name: "city + state",
            query: city_state,
            restrict_country: true,
        });
    }

    if let Some(pincode_area) = extract_pincode_area(address) {
        candidates.push(Strategy {
            name: "pincode area",
            query: pincode_area,
            restrict_country: true,
        });
    }

    candidates.push(Strategy {
        name: "global search",
        query: cleaned,
        restrict_country: false,
    });

    let mut seen: Vec<(String, bool)> = Vec::new();
    candidates
        .into_iter()
        .filter(|s| {
            let key = (s.query.clone(), s.restrict_country);
            if seen.contains(&key) {
                false
            } else {
                seen.push(key);
                true
            }
        })
        .collect()
}

/// Query phrasings tried, in order, when resolving a bare pincode.
#[must_use]
pub fn pincode_queries(pincode: &str) -> [String; 4] {
    [
        format!("Pincode {pincode}, India"),
        format!("Postal Code {pincode}, India"),
        format!("{pincode}, India"),
        format!("India {pincode}"),
    ]
}

/// Normalizes whitespace and comma noise out of a raw address.
///
/// Collapses runs of whitespace, removes empty comma segments, and trims
/// leading/trailing commas.
#[must_use]
pub fn clean_address(address: &str) -> String {
    let whitespace = Regex::new(r"\s+").expect("valid whitespace regex");
    let empty_segment = Regex::new(r",\s*,").expect("valid empty-segment regex");
    let edge_commas = Regex::new(r"^,\s*|,\s*$").expect("valid edge-comma regex");

    let collapsed = whitespace.replace_all(address, " ");
    let unsegmented = empty_segment.replace_all(&collapsed, ",");
    edge_commas.replace_all(&unsegmented, "").trim().to_string()
}

/// City+state heuristic: the first comma segment longer than 3 characters
/// that is not a bare number becomes the city, the next qualifying segment
/// the state.
#[must_use]
pub fn extract_city_state(address: &str) -> Option<String> {
    let parts: Vec<&str> = address.split(',').map(str::trim).collect();

    for (i, part) in parts.iter().enumerate() {
        if !segment_qualifies(part) {
            continue;
        }
        for next in &parts[i + 1..] {
            if segment_qualifies(next) {
                return Some(format!("{part}, {next}, India"));
            }
        }
        return Some(format!("{part}, India"));
    }

    None
}

fn segment_qualifies(segment: &str) -> bool {
    segment.len() > 3 && !segment.chars().all(|c| c.is_ascii_digit())
}

/// `"Pincode NNNNNN, India"` when the address embeds a 6-digit token.
#[must_use]
pub fn extract_pincode_area(address: &str) -> Option<String> {
    extract_pincode(address).map(|pincode| format!("Pincode {pincode}, India"))
}
