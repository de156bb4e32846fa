use super::super::domain::Budget;
use super::ScoredCandidate;

/// Prices strictly below this fall in the low band.
pub const LOW_BAND_CEILING: f64 = 20.0;
/// Prices strictly above this fall in the high band; the bound itself is medium.
pub const HIGH_BAND_FLOOR: f64 = 50.0;

/// Fixed price-band policy. Non-finite prices match no band.
pub fn budget_matches(budget: Budget, price: f64) -> bool {
    if !price.is_finite() {
        return false;
    }
    match budget {
        Budget::Low => price < LOW_BAND_CEILING,
        Budget::Medium => (LOW_BAND_CEILING..=HIGH_BAND_FLOOR).contains(&price),
        Budget::High => price > HIGH_BAND_FLOOR,
    }
}

/// Keeps strictly positive scores, orders them by score descending, and truncates.
///
/// Equal scores keep their input order (`sort_by` is stable).
pub(crate) fn rank(mut scored: Vec<ScoredCandidate<'_>>, limit: usize) -> Vec<ScoredCandidate<'_>> {
    scored.retain(|candidate| candidate.score > 0);
    scored.sort_by(|left, right| right.score.cmp(&left.score));
    scored.truncate(limit);
    scored
}
