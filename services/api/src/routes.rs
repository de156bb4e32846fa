use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use glowcart::error::AppError;
use glowcart::workflows::catalog::CatalogImporter;
use glowcart::workflows::skin_quiz::{
    skin_analysis_router, AnalysisRepository, CatalogReader, ProductCategory, QuizGuard,
    QuizSubmission, RecommendationEngine, RecommendationView, SkinAnalysisService, SkinProfile,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

/// Scores an ad-hoc catalog export without persisting an analysis.
#[derive(Debug, Deserialize)]
pub(crate) struct PreviewRequest {
    pub(crate) submission: QuizSubmission,
    pub(crate) catalog_csv: String,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PreviewResponse {
    pub(crate) profile: SkinProfile,
    pub(crate) eligible_category: ProductCategory,
    pub(crate) catalog_size: usize,
    pub(crate) recommendations: Vec<RecommendationView>,
}

pub(crate) fn with_skin_analysis_routes<R, C>(
    service: Arc<SkinAnalysisService<R, C>>,
) -> axum::Router
where
    R: AnalysisRepository + 'static,
    C: CatalogReader + 'static,
{
    skin_analysis_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/recommendations/preview",
            axum::routing::post(preview_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Scores with the service's configured weights and limit unless the request overrides the limit.
pub(crate) async fn preview_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let PreviewRequest {
        submission,
        catalog_csv,
        limit,
    } = payload;

    let validated = QuizGuard::default().profile_from_submission(submission)?;
    let items = CatalogImporter::from_reader(Cursor::new(catalog_csv.into_bytes()))?;

    let engine = RecommendationEngine::new(state.recommendations);
    let limit = limit.unwrap_or(engine.config().limit);
    let recommendations = engine
        .recommend(&validated.profile, &items, limit)
        .into_iter()
        .map(RecommendationView::from)
        .collect();

    Ok(Json(PreviewResponse {
        profile: validated.profile,
        eligible_category: engine.config().eligible_category,
        catalog_size: items.len(),
        recommendations,
    }))
}
