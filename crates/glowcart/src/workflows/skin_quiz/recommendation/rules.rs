use serde::{Deserialize, Serialize};

use super::super::domain::{CatalogItem, SkinProfile};
use super::config::RecommendationConfig;
use super::policy::budget_matches;

/// Profile dimension that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    SkinType,
    SkinConcern,
    PreferredIngredient,
    AvoidedIngredient,
    Budget,
}

impl SignalKind {
    /// Penalty signals move the score but are never shown to shoppers.
    pub const fn is_penalty(self) -> bool {
        matches!(self, SignalKind::AvoidedIngredient)
    }
}

/// Discrete contribution to an item score, kept for audits and explanations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSignal {
    pub kind: SignalKind,
    pub points: i32,
    pub reason: String,
}

/// Case-insensitive substring containment; `description` must already be lower-cased.
///
/// Free-text matching is the only ingredient signal the catalog carries, so "dryness"
/// also matches "drynessrelief".
pub fn contains_term(description: &str, term: &str) -> bool {
    description.contains(term.to_lowercase().as_str())
}

pub(crate) fn match_signals(
    profile: &SkinProfile,
    item: &CatalogItem,
    config: &RecommendationConfig,
) -> Vec<MatchSignal> {
    if item.category != config.eligible_category {
        return Vec::new();
    }

    let weights = &config.weights;
    let description = item.description.to_lowercase();
    let mut signals = Vec::new();

    if contains_term(&description, profile.skin_type.label()) {
        signals.push(MatchSignal {
            kind: SignalKind::SkinType,
            points: weights.skin_type,
            reason: format!("Formulated for {} skin", profile.skin_type),
        });
    }

    for concern in &profile.skin_concerns {
        if contains_term(&description, concern.label()) {
            signals.push(MatchSignal {
                kind: SignalKind::SkinConcern,
                points: weights.skin_concern,
                reason: format!("Addresses {concern}"),
            });
        }
    }

    for ingredient in &profile.preferred_ingredients {
        if contains_term(&description, ingredient) {
            signals.push(MatchSignal {
                kind: SignalKind::PreferredIngredient,
                points: weights.preferred_ingredient,
                reason: format!("Contains {ingredient}"),
            });
        }
    }

    for ingredient in &profile.avoid_ingredients {
        if contains_term(&description, ingredient) {
            signals.push(MatchSignal {
                kind: SignalKind::AvoidedIngredient,
                points: weights.avoid_ingredient,
                reason: format!("Contains {ingredient}, which you prefer to avoid"),
            });
        }
    }

    if budget_matches(profile.budget, item.price) {
        signals.push(MatchSignal {
            kind: SignalKind::Budget,
            points: weights.budget_match,
            reason: "Matches your budget preference".to_string(),
        });
    }

    signals
}

/// Sums signal points and floors the result at zero.
pub(crate) fn clamped_total(signals: &[MatchSignal]) -> (i64, u32) {
    let raw = signals
        .iter()
        .fold(0_i64, |total, signal| total.saturating_add(i64::from(signal.points)));
    let clamped = u32::try_from(raw.max(0)).unwrap_or(u32::MAX);
    (raw, clamped)
}
