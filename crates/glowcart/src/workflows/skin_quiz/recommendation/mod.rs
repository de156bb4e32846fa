mod config;
mod policy;
mod rules;

pub use config::{RecommendationConfig, ScoringWeights, DEFAULT_RECOMMENDATION_LIMIT};
pub use policy::{budget_matches, HIGH_BAND_FLOOR, LOW_BAND_CEILING};
pub use rules::{contains_term, MatchSignal, SignalKind};

use super::domain::{CatalogItem, SkinProfile};
use serde::Serialize;

/// Stateless scorer that ranks catalog items against a skin profile.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
}

impl RecommendationEngine {
    pub fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    /// Full signal trail for one item, including penalties hidden from shoppers.
    pub fn breakdown(&self, profile: &SkinProfile, item: &CatalogItem) -> ScoreBreakdown {
        let signals = rules::match_signals(profile, item, &self.config);
        let (raw_total, score) = rules::clamped_total(&signals);

        ScoreBreakdown {
            raw_total,
            score,
            signals,
        }
    }

    pub fn score(&self, profile: &SkinProfile, item: &CatalogItem) -> ItemScore {
        self.breakdown(profile, item).into()
    }

    /// Scores every candidate and returns at most `limit` positive matches, best first.
    pub fn recommend<'a>(
        &self,
        profile: &SkinProfile,
        candidates: &'a [CatalogItem],
        limit: usize,
    ) -> Vec<ScoredCandidate<'a>> {
        let scored = candidates
            .iter()
            .map(|item| {
                let ItemScore {
                    score,
                    match_reasons,
                } = self.score(profile, item);
                ScoredCandidate {
                    item,
                    score,
                    match_reasons,
                }
            })
            .collect();

        policy::rank(scored, limit)
    }

    /// `recommend` with the configured default limit.
    pub fn top_matches<'a>(
        &self,
        profile: &SkinProfile,
        candidates: &'a [CatalogItem],
    ) -> Vec<ScoredCandidate<'a>> {
        self.recommend(profile, candidates, self.config.limit)
    }
}

/// Raw and clamped totals with the signals that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub raw_total: i64,
    pub score: u32,
    pub signals: Vec<MatchSignal>,
}

/// Shopper-facing score with penalty reasons removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemScore {
    pub score: u32,
    pub match_reasons: Vec<String>,
}

impl From<ScoreBreakdown> for ItemScore {
    fn from(breakdown: ScoreBreakdown) -> Self {
        let match_reasons = breakdown
            .signals
            .into_iter()
            .filter(|signal| !signal.kind.is_penalty())
            .map(|signal| signal.reason)
            .collect();

        Self {
            score: breakdown.score,
            match_reasons,
        }
    }
}

/// Ranked recommendation borrowing the catalog item it describes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate<'a> {
    pub item: &'a CatalogItem,
    pub score: u32,
    pub match_reasons: Vec<String>,
}
