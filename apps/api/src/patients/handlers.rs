use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::patients::service;
use crate::state::AppState;
use crate::store::FieldMap;

#[derive(Serialize)]
pub struct CreatedResponse {
    pub message: String,
}

/// POST /api
pub async fn handle_create_patient(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let payload = body.ok().map(|Json(value)| value);
    service::create_patient(state.store.as_ref(), payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Patient created successfully".to_string(),
        }),
    ))
}

/// GET /api/:patient_id
pub async fn handle_get_patient(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<FieldMap>, AppError> {
    let fields = service::get_patient(state.store.as_ref(), &identifier).await?;
    Ok(Json(fields))
}
