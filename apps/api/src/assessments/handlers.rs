use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{Map, Value};

use crate::assessments::keys::AssessmentTimestamp;
use crate::assessments::service::{
    self, DataEntry, LatestAssessment, OrderedAssessments, SavedAssessment, BARTHEL_INDEX,
    MOCA_5MIN,
};
use crate::errors::AppError;
use crate::state::AppState;
use crate::store::FieldMap;

/// POST /api/:patient_id/:assessment_name
pub async fn handle_save_assessment(
    State(state): State<AppState>,
    Path((patient_id, assessment_name)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SavedAssessment>, AppError> {
    save(&state, &patient_id, &assessment_name, body).await
}

/// POST /api/:patient_id/assessments
pub async fn handle_save_assessments_named(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SavedAssessment>, AppError> {
    save(&state, &patient_id, "assessments", body).await
}

/// POST /api/:patient_id/all
pub async fn handle_save_all_named(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SavedAssessment>, AppError> {
    save(&state, &patient_id, "all", body).await
}

async fn save(
    state: &AppState,
    patient_id: &str,
    assessment_name: &str,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SavedAssessment>, AppError> {
    // Absent or malformed bodies are reported after the patient check.
    let payload = body.ok().map(|Json(value)| value);
    let saved = service::save_assessment(
        state.store.as_ref(),
        patient_id,
        assessment_name,
        payload,
        AssessmentTimestamp::now(),
    )
    .await?;
    Ok(Json(saved))
}

/// GET /api/:patient_id/:assessment_name
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    Path((patient_id, assessment_name)): Path<(String, String)>,
) -> Result<Json<FieldMap>, AppError> {
    let fields =
        service::get_assessment(state.store.as_ref(), &patient_id, &assessment_name).await?;
    Ok(Json(fields))
}

/// GET /api/:patient_id/assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<OrderedAssessments>, AppError> {
    let assessments = service::list_assessments(state.store.as_ref(), &patient_id).await?;
    Ok(Json(assessments))
}

/// GET /api/:patient_id/all
pub async fn handle_get_all_data(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<BTreeMap<String, DataEntry>>, AppError> {
    let all_data = service::get_all_data(state.store.as_ref(), &identifier).await?;
    Ok(Json(all_data))
}

/// GET /api/:patient_id/barthel/latest
pub async fn handle_latest_barthel(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<LatestAssessment<FieldMap>>, AppError> {
    let latest = service::latest_fixed(state.store.as_ref(), &patient_id, BARTHEL_INDEX).await?;
    Ok(Json(latest))
}

/// GET /api/:patient_id/moca5min/latest
pub async fn handle_latest_moca5min(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<Json<LatestAssessment<FieldMap>>, AppError> {
    let latest = service::latest_fixed(state.store.as_ref(), &patient_id, MOCA_5MIN).await?;
    Ok(Json(latest))
}

/// GET /api/:patient_id/:assessment_name/latest
pub async fn handle_latest_assessment(
    State(state): State<AppState>,
    Path((patient_id, assessment_name)): Path<(String, String)>,
) -> Result<Json<LatestAssessment<Map<String, Value>>>, AppError> {
    let latest =
        service::latest_decoded(state.store.as_ref(), &patient_id, &assessment_name).await?;
    Ok(Json(latest))
}
