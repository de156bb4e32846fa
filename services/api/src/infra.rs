use glowcart::workflows::catalog::{CatalogImportError, CatalogImporter};
use glowcart::workflows::skin_quiz::{
    AnalysisId, AnalysisRecord, AnalysisRepository, CatalogError, CatalogItem, CatalogReader,
    ProductCategory, ProductId, RecommendationConfig, RepositoryError, UserId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

const SAMPLE_CATALOG: &[u8] = include_bytes!("../../../crates/glowcart/sample_catalog.csv");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) recommendations: RecommendationConfig,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAnalysisRepository {
    records: Arc<Mutex<HashMap<AnalysisId, AnalysisRecord>>>,
}

impl AnalysisRepository for InMemoryAnalysisRepository {
    fn insert(&self, record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    fn list_for_user(&self, user_id: &UserId) -> Result<Vec<AnalysisRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))?;
        Ok(guard
            .values()
            .filter(|record| &record.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// Read-only catalog loaded once at startup.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCatalog {
    items: Arc<Vec<CatalogItem>>,
}

impl InMemoryCatalog {
    pub(crate) fn with_items(items: Vec<CatalogItem>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}

impl CatalogReader for InMemoryCatalog {
    fn eligible_items(&self, category: ProductCategory) -> Result<Vec<CatalogItem>, CatalogError> {
        Ok(self
            .items
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect())
    }

    fn find(&self, ids: &[ProductId]) -> Result<Vec<CatalogItem>, CatalogError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.items.iter().find(|item| &item.id == id).cloned())
            .collect())
    }
}

pub(crate) fn sample_catalog() -> Result<Vec<CatalogItem>, CatalogImportError> {
    CatalogImporter::from_reader(SAMPLE_CATALOG)
}

/// Reads the CSV export at `path`, or the bundled sample catalog when none is configured.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<Vec<CatalogItem>, CatalogImportError> {
    match path {
        Some(path) => CatalogImporter::from_path(path),
        None => sample_catalog(),
    }
}

pub(crate) fn recommendation_config(limit: usize) -> RecommendationConfig {
    RecommendationConfig {
        limit,
        ..RecommendationConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use glowcart::workflows::skin_quiz::{SkinProfile, SkinType};

    fn record(id: &str) -> AnalysisRecord {
        AnalysisRecord {
            id: AnalysisId(id.to_string()),
            user_id: UserId("user-001".to_string()),
            profile: SkinProfile::new(SkinType::Normal),
            quiz_responses: Vec::new(),
            recommended_products: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn repository_rejects_duplicate_inserts() {
        let repository = InMemoryAnalysisRepository::default();
        repository.insert(record("a-1")).expect("first insert");

        assert!(matches!(
            repository.insert(record("a-1")),
            Err(RepositoryError::Conflict)
        ));
        let stored = repository
            .fetch(&AnalysisId("a-1".to_string()))
            .expect("fetch succeeds");
        assert!(stored.is_some());
    }

    #[test]
    fn catalog_filters_by_category_and_finds_in_requested_order() {
        let catalog = InMemoryCatalog::with_items(sample_catalog().expect("sample imports"));
        assert_eq!(catalog.len(), 9);

        let beauty = catalog
            .eligible_items(ProductCategory::Beauty)
            .expect("eligible items");
        assert_eq!(beauty.len(), 7);

        let found = catalog
            .find(&[
                ProductId("gc-106".to_string()),
                ProductId("missing".to_string()),
                ProductId("gc-101".to_string()),
            ])
            .expect("find succeeds");
        let ids: Vec<&str> = found.iter().map(|item| item.id.0.as_str()).collect();
        assert_eq!(ids, vec!["gc-106", "gc-101"]);
    }
}
