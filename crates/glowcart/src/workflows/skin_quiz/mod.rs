//! Skin analysis quiz: submission validation, product recommendations, and analysis history.
//!
//! The scorer in [`recommendation`] is a pure function of the profile and the candidate list.
//! Everything around it (guard, repository, catalog, router) only feeds it well-formed input
//! and persists which products it picked.

pub mod domain;
pub mod recommendation;
pub mod repository;
pub mod router;
pub mod service;
pub(crate) mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    AnalysisId, Budget, CatalogItem, ProductCategory, ProductId, QuizAnswer, QuizResponse,
    QuizSubmission, RoutineComplexity, RoutinePreferences, SkinConcern, SkinProfile, SkinType,
    UnknownVariant, UserId,
};
pub use recommendation::{
    ItemScore, MatchSignal, RecommendationConfig, RecommendationEngine, ScoreBreakdown,
    ScoredCandidate, ScoringWeights, SignalKind,
};
pub use repository::{
    AnalysisRecord, AnalysisRepository, AnalysisSummary, CatalogError, CatalogReader,
    RepositoryError,
};
pub use router::{skin_analysis_router, USER_ID_HEADER};
pub use service::{
    AnalysisDetail, AnalysisResult, ProductView, RecommendationView, SkinAnalysisError,
    SkinAnalysisService,
};
pub use validation::{
    QuizGuard, QuizValidationError, ValidatedSubmission, MAX_INGREDIENTS_PER_LIST,
};
