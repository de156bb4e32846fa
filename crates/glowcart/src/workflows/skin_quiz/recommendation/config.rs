use serde::{Deserialize, Serialize};

use super::super::domain::ProductCategory;

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;

/// Point contribution of each matching signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skin_type: i32,
    pub skin_concern: i32,
    pub preferred_ingredient: i32,
    /// Applied once per avoided ingredient found; expected to be negative.
    pub avoid_ingredient: i32,
    pub budget_match: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skin_type: 50,
            skin_concern: 20,
            preferred_ingredient: 15,
            avoid_ingredient: -30,
            budget_match: 10,
        }
    }
}

/// Immutable settings handed to the recommendation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    #[serde(default)]
    pub weights: ScoringWeights,
    #[serde(default = "default_eligible_category")]
    pub eligible_category: ProductCategory,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            eligible_category: default_eligible_category(),
            limit: default_limit(),
        }
    }
}

fn default_eligible_category() -> ProductCategory {
    ProductCategory::Beauty
}

fn default_limit() -> usize {
    DEFAULT_RECOMMENDATION_LIMIT
}
