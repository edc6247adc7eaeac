use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::batch::{evaluate_csv, BatchReport};
use super::decision::DecisionStatus;
use super::domain::ApplicantSubmission;
use super::EligibilityPipeline;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub(crate) struct BatchRequest {
    pub(crate) csv: String,
}

/// Router exposing the eligibility pipeline over HTTP.
pub fn eligibility_router(pipeline: Arc<EligibilityPipeline>) -> Router {
    Router::new()
        .route("/api/v1/eligibility/decisions", post(decision_handler))
        .route("/api/v1/eligibility/features", get(features_handler))
        .route("/api/v1/eligibility/batch", post(batch_handler))
        .with_state(pipeline)
}

pub(crate) async fn decision_handler(
    State(pipeline): State<Arc<EligibilityPipeline>>,
    Json(submission): Json<ApplicantSubmission>,
) -> Response {
    let outcome = pipeline.evaluate(submission).to_outcome();
    let status = match outcome.status {
        DecisionStatus::Error => StatusCode::INTERNAL_SERVER_ERROR,
        DecisionStatus::Approved | DecisionStatus::Rejected => StatusCode::OK,
    };

    (status, Json(outcome)).into_response()
}

pub(crate) async fn features_handler(
    State(pipeline): State<Arc<EligibilityPipeline>>,
) -> Json<serde_json::Value> {
    Json(json!({ "feature_names": pipeline.feature_columns() }))
}

pub(crate) async fn batch_handler(
    State(pipeline): State<Arc<EligibilityPipeline>>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchReport>, AppError> {
    let report = evaluate_csv(request.csv.as_bytes(), &pipeline)?;
    Ok(Json(report))
}
