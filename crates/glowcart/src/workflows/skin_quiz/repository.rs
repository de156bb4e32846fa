use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    AnalysisId, CatalogItem, ProductCategory, ProductId, QuizResponse, SkinConcern, SkinProfile,
    SkinType, UserId,
};

/// Persisted quiz submission with the product ids chosen for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: AnalysisId,
    pub user_id: UserId,
    pub profile: SkinProfile,
    pub quiz_responses: Vec<QuizResponse>,
    pub recommended_products: Vec<ProductId>,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            id: self.id.clone(),
            skin_type: self.profile.skin_type,
            skin_concerns: self.profile.skin_concerns.clone(),
            created_at: self.created_at,
        }
    }
}

/// History listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    pub id: AnalysisId,
    pub skin_type: SkinType,
    pub skin_concerns: Vec<SkinConcern>,
    pub created_at: DateTime<Utc>,
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait AnalysisRepository: Send + Sync {
    fn insert(&self, record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError>;
    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError>;
    fn list_for_user(&self, user_id: &UserId) -> Result<Vec<AnalysisRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Read-only view over the product catalog.
pub trait CatalogReader: Send + Sync {
    /// Active products in `category`, in catalog order.
    fn eligible_items(&self, category: ProductCategory) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Products for `ids` in the requested order; unknown ids are skipped.
    fn find(&self, ids: &[ProductId]) -> Result<Vec<CatalogItem>, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
