use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{
    AnalysisId, CatalogItem, ProductId, QuizResponse, QuizSubmission, SkinProfile, UserId,
};
use super::recommendation::{RecommendationConfig, RecommendationEngine, ScoredCandidate};
use super::repository::{
    AnalysisRecord, AnalysisRepository, AnalysisSummary, CatalogError, CatalogReader,
    RepositoryError,
};
use super::validation::{QuizGuard, QuizValidationError, ValidatedSubmission};

/// Service composing the quiz guard, analysis repository, catalog, and scorer.
pub struct SkinAnalysisService<R, C> {
    guard: Arc<QuizGuard>,
    repository: Arc<R>,
    catalog: Arc<C>,
    engine: Arc<RecommendationEngine>,
}

static ANALYSIS_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_analysis_id() -> AnalysisId {
    let id = ANALYSIS_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AnalysisId(format!("analysis-{id:06}"))
}

impl<R, C> SkinAnalysisService<R, C>
where
    R: AnalysisRepository + 'static,
    C: CatalogReader + 'static,
{
    pub fn new(repository: Arc<R>, catalog: Arc<C>, config: RecommendationConfig) -> Self {
        Self::with_guard(QuizGuard::default(), repository, catalog, config)
    }

    pub fn with_guard(
        guard: QuizGuard,
        repository: Arc<R>,
        catalog: Arc<C>,
        config: RecommendationConfig,
    ) -> Self {
        Self {
            guard: Arc::new(guard),
            repository,
            catalog,
            engine: Arc::new(RecommendationEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    /// Validate a quiz submission, rank the catalog for it, and store the analysis.
    ///
    /// Nothing is persisted unless the catalog read succeeds.
    pub fn submit(
        &self,
        user_id: &UserId,
        submission: QuizSubmission,
    ) -> Result<AnalysisResult, SkinAnalysisError> {
        let ValidatedSubmission {
            profile,
            quiz_responses,
        } = self.guard.profile_from_submission(submission)?;

        let config = self.engine.config();
        let candidates = self.catalog.eligible_items(config.eligible_category)?;
        let ranked = self.engine.recommend(&profile, &candidates, config.limit);

        let record = self.repository.insert(AnalysisRecord {
            id: next_analysis_id(),
            user_id: user_id.clone(),
            profile,
            quiz_responses,
            recommended_products: ranked
                .iter()
                .map(|candidate| candidate.item.id.clone())
                .collect(),
            created_at: Utc::now(),
        })?;

        debug!(
            analysis_id = %record.id,
            candidates = candidates.len(),
            matches = ranked.len(),
            "scored catalog for skin analysis"
        );
        if ranked.is_empty() {
            info!(analysis_id = %record.id, "no confident product matches");
        }

        Ok(AnalysisResult {
            analysis_id: record.id,
            recommendations: ranked.into_iter().map(RecommendationView::from).collect(),
        })
    }

    /// Fetch one of the shopper's analyses with its recommended products re-hydrated.
    pub fn get(
        &self,
        user_id: &UserId,
        analysis_id: &AnalysisId,
    ) -> Result<AnalysisDetail, SkinAnalysisError> {
        let record = self
            .repository
            .fetch(analysis_id)?
            .ok_or(RepositoryError::NotFound)?;

        if &record.user_id != user_id {
            warn!(analysis_id = %analysis_id, "analysis requested by a different user");
            return Err(SkinAnalysisError::Forbidden(analysis_id.clone()));
        }

        let products = self.catalog.find(&record.recommended_products)?;
        if products.len() < record.recommended_products.len() {
            debug!(
                analysis_id = %analysis_id,
                missing = record.recommended_products.len() - products.len(),
                "recommended products no longer in catalog"
            );
        }

        Ok(AnalysisDetail {
            id: record.id,
            profile: record.profile,
            quiz_responses: record.quiz_responses,
            recommended_products: products.iter().map(ProductView::from).collect(),
            created_at: record.created_at,
        })
    }

    /// Summaries of the shopper's analyses, newest first.
    pub fn history(&self, user_id: &UserId) -> Result<Vec<AnalysisSummary>, SkinAnalysisError> {
        let mut records = self.repository.list_for_user(user_id)?;
        records.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(records.iter().map(AnalysisRecord::summary).collect())
    }
}

/// Response payload for a freshly submitted quiz.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub analysis_id: AnalysisId,
    pub recommendations: Vec<RecommendationView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationView {
    pub product: ProductView,
    pub score: u32,
    pub match_reasons: Vec<String>,
}

impl From<ScoredCandidate<'_>> for RecommendationView {
    fn from(candidate: ScoredCandidate<'_>) -> Self {
        Self {
            product: ProductView::from(candidate.item),
            score: candidate.score,
            match_reasons: candidate.match_reasons,
        }
    }
}

/// Product fields exposed to the storefront.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
}

impl From<&CatalogItem> for ProductView {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            image: item.image.clone(),
        }
    }
}

/// Stored analysis with recommended products loaded from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisDetail {
    pub id: AnalysisId,
    pub profile: SkinProfile,
    pub quiz_responses: Vec<QuizResponse>,
    pub recommended_products: Vec<ProductView>,
    pub created_at: DateTime<Utc>,
}

/// Error raised by the skin analysis service.
#[derive(Debug, thiserror::Error)]
pub enum SkinAnalysisError {
    #[error(transparent)]
    Validation(#[from] QuizValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("analysis {0} belongs to another user")]
    Forbidden(AnalysisId),
}
