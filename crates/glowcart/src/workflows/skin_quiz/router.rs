use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::domain::{AnalysisId, QuizSubmission, UserId};
use super::repository::{AnalysisRepository, CatalogReader, RepositoryError};
use super::service::{SkinAnalysisError, SkinAnalysisService};

/// Header carrying the shopper id once the gateway has authenticated the request.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Router builder exposing HTTP endpoints for quiz submission and history.
pub fn skin_analysis_router<R, C>(service: Arc<SkinAnalysisService<R, C>>) -> Router
where
    R: AnalysisRepository + 'static,
    C: CatalogReader + 'static,
{
    Router::new()
        .route(
            "/api/v1/skin-analysis",
            get(history_handler::<R, C>).post(submit_handler::<R, C>),
        )
        .route(
            "/api/v1/skin-analysis/:analysis_id",
            get(detail_handler::<R, C>),
        )
        .with_state(service)
}

fn authenticated_user(headers: &HeaderMap) -> Option<UserId> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| UserId(value.to_string()))
}

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({
        "success": false,
        "error": message.into(),
    });
    (status, Json(payload)).into_response()
}

fn unauthenticated() -> Response {
    failure(StatusCode::UNAUTHORIZED, "Authentication required")
}

fn error_response(error: SkinAnalysisError) -> Response {
    match error {
        SkinAnalysisError::Validation(error) => {
            failure(StatusCode::UNPROCESSABLE_ENTITY, error.to_string())
        }
        SkinAnalysisError::Repository(RepositoryError::NotFound) => {
            failure(StatusCode::NOT_FOUND, "Analysis not found")
        }
        SkinAnalysisError::Forbidden(_) => failure(StatusCode::FORBIDDEN, "Unauthorized access"),
        other => {
            tracing::error!(error = %other, "skin analysis request failed");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong. Please try again.",
            )
        }
    }
}

pub(crate) async fn submit_handler<R, C>(
    State(service): State<Arc<SkinAnalysisService<R, C>>>,
    headers: HeaderMap,
    payload: Result<Json<QuizSubmission>, JsonRejection>,
) -> Response
where
    R: AnalysisRepository + 'static,
    C: CatalogReader + 'static,
{
    let Some(user_id) = authenticated_user(&headers) else {
        return unauthenticated();
    };
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return failure(rejection.status(), rejection.body_text()),
    };

    match service.submit(&user_id, submission) {
        Ok(result) => {
            let payload = json!({
                "success": true,
                "skin_analysis_id": result.analysis_id,
                "recommendations": result.recommendations,
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<R, C>(
    State(service): State<Arc<SkinAnalysisService<R, C>>>,
    headers: HeaderMap,
) -> Response
where
    R: AnalysisRepository + 'static,
    C: CatalogReader + 'static,
{
    let Some(user_id) = authenticated_user(&headers) else {
        return unauthenticated();
    };

    match service.history(&user_id) {
        Ok(analyses) => {
            let payload = json!({
                "success": true,
                "analyses": analyses,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn detail_handler<R, C>(
    State(service): State<Arc<SkinAnalysisService<R, C>>>,
    headers: HeaderMap,
    Path(analysis_id): Path<String>,
) -> Response
where
    R: AnalysisRepository + 'static,
    C: CatalogReader + 'static,
{
    let Some(user_id) = authenticated_user(&headers) else {
        return unauthenticated();
    };

    match service.get(&user_id, &AnalysisId(analysis_id)) {
        Ok(analysis) => {
            let payload = json!({
                "success": true,
                "analysis": analysis,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}
