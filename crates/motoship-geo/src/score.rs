//! Candidate scoring for geocoding results.
//!
//! Stateless routines, deliberately separate from the I/O-performing
//! resolver so relevance ranking is unit-testable without network mocks.

use crate::types::GeocodeCandidate;

/// Relevance score of a candidate against the original free-text address.
///
/// Weights: +100 when the formatted address contains the whole lowercased
/// input, +10 per input word (longer than 2 chars) found in the formatted
/// address, +2 per populated address component, plus the provider's
/// importance ranking scaled by 50.
#[must_use]
pub fn score_text_candidate(candidate: &GeocodeCandidate, original_address: &str) -> f64 {
    let display_name = candidate.display_name.to_lowercase();
    let original = original_address.to_lowercase();

    let mut score = 0.0;

    if display_name.contains(&original) {
        score += 100.0;
    }

    for word in original.split_whitespace() {
        if word.len() > 2 && display_name.contains(word) {
            score += 10.0;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    {
        score += candidate.address.len() as f64 * 2.0;
    }

    if let Some(importance) = candidate.importance {
        score += importance * 50.0;
    }

    score
}

/// Relevance score of a candidate against a target pincode.
///
/// An exact `postcode` component match dominates (+2000); the pincode
/// appearing in the formatted text (+1000) and post-office phrasing (+500)
/// help disambiguate between localities sharing the code.
#[must_use]
pub fn score_pincode_candidate(candidate: &GeocodeCandidate, pincode: &str) -> f64 {
    let display_name = candidate.display_name.to_lowercase();

    let mut score = 0.0;

    if display_name.contains(pincode) {
        score += 1000.0;
    }

    if candidate.postcode() == Some(pincode) {
        score += 2000.0;
    }

    #[allow(clippy::cast_precision_loss)]
    {
        score += candidate.address.len() as f64 * 10.0;
    }

    if let Some(importance) = candidate.importance {
        score += importance * 100.0;
    }

    if display_name.contains("post office") || display_name.contains("postal") {
        score += 500.0;
    }

    score
}

/// Picks the highest-scoring candidate; ties break toward the earliest
/// candidate in provider order.
#[must_use]
pub fn best_candidate<F>(candidates: &[GeocodeCandidate], score: F) -> Option<&GeocodeCandidate>
where
    F: Fn(&GeocodeCandidate) -> f64,
{
    let mut best: Option<(&GeocodeCandidate, f64)> = None;
    for candidate in candidates {
        let candidate_score = score(candidate);
        let better = match best {
            Some((_, best_score)) => candidate_score > best_score,
            None => true,
        };
        if better {
            best = Some((candidate, candidate_score));
        }
    }
    best.map(|(candidate, _)| candidate)
}
