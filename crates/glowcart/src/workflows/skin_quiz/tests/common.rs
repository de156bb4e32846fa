use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::skin_quiz::domain::{
    AnalysisId, Budget, CatalogItem, ProductCategory, ProductId, QuizAnswer, QuizResponse,
    QuizSubmission, RoutinePreferences, SkinConcern, SkinProfile, SkinType, UserId,
};
use crate::workflows::skin_quiz::recommendation::{RecommendationConfig, RecommendationEngine};
use crate::workflows::skin_quiz::repository::{
    AnalysisRecord, AnalysisRepository, CatalogError, CatalogReader, RepositoryError,
};
use crate::workflows::skin_quiz::{skin_analysis_router, SkinAnalysisService};

pub(super) fn item(
    id: &str,
    description: &str,
    price: f64,
    category: ProductCategory,
) -> CatalogItem {
    CatalogItem {
        id: ProductId(id.to_string()),
        name: format!("Product {id}"),
        description: description.to_string(),
        price,
        category,
        image: format!("https://cdn.glowcart.test/{id}.jpg"),
    }
}

pub(super) fn beauty_item(id: &str, description: &str, price: f64) -> CatalogItem {
    item(id, description, price, ProductCategory::Beauty)
}

/// Oily skin, acne, salicylic acid, medium budget.
pub(super) fn oily_acne_profile() -> SkinProfile {
    SkinProfile::new(SkinType::Oily)
        .with_concerns([SkinConcern::Acne])
        .with_preferred_ingredients(["salicylic acid"])
        .with_budget(Budget::Medium)
}

pub(super) fn gel_cleanser() -> CatalogItem {
    beauty_item(
        "gel-cleanser",
        "A lightweight gel for oily skin that targets acne with salicylic acid",
        25.0,
    )
}

/// Catalog whose items score 95, 80, 80, 10 and 0 against `oily_acne_profile`.
pub(super) fn ranked_catalog() -> Vec<CatalogItem> {
    vec![
        beauty_item("toner", "Hydrating toner", 25.0),
        beauty_item("spot-gel", "Oily skin acne gel", 30.0),
        gel_cleanser(),
        beauty_item("clay-mask", "Acne clay mask for oily complexions", 40.0),
        beauty_item("luxe-toner", "Hydrating toner", 80.0),
    ]
}

pub(super) fn engine() -> RecommendationEngine {
    RecommendationEngine::new(RecommendationConfig::default())
}

pub(super) fn shopper() -> UserId {
    UserId("user-001".to_string())
}

pub(super) fn other_shopper() -> UserId {
    UserId("user-002".to_string())
}

pub(super) fn submission() -> QuizSubmission {
    QuizSubmission {
        skin_type: SkinType::Oily,
        skin_concerns: vec![SkinConcern::Acne],
        routine_preferences: RoutinePreferences {
            current_products: Some(vec!["Foaming cleanser".to_string()]),
            preferred_ingredients: Some(vec!["Salicylic Acid".to_string()]),
            avoid_ingredients: Some(vec!["fragrance".to_string()]),
            budget: Some(Budget::Medium),
            routine_complexity: None,
        },
        quiz_responses: vec![
            QuizResponse {
                question_id: "skinType".to_string(),
                answer: QuizAnswer::Single("oily".to_string()),
            },
            QuizResponse {
                question_id: "skinConcerns".to_string(),
                answer: QuizAnswer::Multiple(vec!["acne".to_string()]),
            },
        ],
    }
}

pub(super) fn timestamp(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn stored_record(id: &str, user_id: UserId, day: u32) -> AnalysisRecord {
    AnalysisRecord {
        id: AnalysisId(id.to_string()),
        user_id,
        profile: oily_acne_profile(),
        quiz_responses: Vec::new(),
        recommended_products: Vec::new(),
        created_at: timestamp(day),
    }
}

pub(super) type MemoryService = SkinAnalysisService<MemoryRepository, MemoryCatalog>;

pub(super) fn build_service(
    items: Vec<CatalogItem>,
) -> (MemoryService, Arc<MemoryRepository>, Arc<MemoryCatalog>) {
    let repository = Arc::new(MemoryRepository::default());
    let catalog = Arc::new(MemoryCatalog::with_items(items));
    let service = SkinAnalysisService::new(
        repository.clone(),
        catalog.clone(),
        RecommendationConfig::default(),
    );
    (service, repository, catalog)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    skin_analysis_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<AnalysisId, AnalysisRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl AnalysisRepository for MemoryRepository {
    fn insert(&self, record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_for_user(&self, user_id: &UserId) -> Result<Vec<AnalysisRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCatalog {
    items: Arc<Mutex<Vec<CatalogItem>>>,
}

impl MemoryCatalog {
    pub(super) fn with_items(items: Vec<CatalogItem>) -> Self {
        Self {
            items: Arc::new(Mutex::new(items)),
        }
    }

    pub(super) fn remove(&self, id: &str) {
        self.items
            .lock()
            .expect("catalog mutex poisoned")
            .retain(|item| item.id.0 != id);
    }
}

impl CatalogReader for MemoryCatalog {
    fn eligible_items(&self, category: ProductCategory) -> Result<Vec<CatalogItem>, CatalogError> {
        let guard = self.items.lock().expect("catalog mutex poisoned");
        Ok(guard
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect())
    }

    fn find(&self, ids: &[ProductId]) -> Result<Vec<CatalogItem>, CatalogError> {
        let guard = self.items.lock().expect("catalog mutex poisoned");
        Ok(ids
            .iter()
            .filter_map(|id| guard.iter().find(|item| &item.id == id).cloned())
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl AnalysisRepository for UnavailableRepository {
    fn insert(&self, _record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_for_user(&self, _user_id: &UserId) -> Result<Vec<AnalysisRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct UnavailableCatalog;

impl CatalogReader for UnavailableCatalog {
    fn eligible_items(&self, _category: ProductCategory) -> Result<Vec<CatalogItem>, CatalogError> {
        Err(CatalogError::Unavailable("catalog offline".to_string()))
    }

    fn find(&self, _ids: &[ProductId]) -> Result<Vec<CatalogItem>, CatalogError> {
        Err(CatalogError::Unavailable("catalog offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
