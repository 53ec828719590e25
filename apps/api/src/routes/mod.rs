pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessments::handlers as assessments;
use crate::patients::handlers as patients;
use crate::state::AppState;

/// Static second segments (`assessments`, `all`) and the fixed-name latest
/// routes take priority over the `:assessment_name` captures. POST on the
/// static segments still saves an assessment under that literal name.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api", post(patients::handle_create_patient))
        .route("/api/:patient_id", get(patients::handle_get_patient))
        .route(
            "/api/:patient_id/assessments",
            get(assessments::handle_list_assessments)
                .post(assessments::handle_save_assessments_named),
        )
        .route(
            "/api/:patient_id/all",
            get(assessments::handle_get_all_data).post(assessments::handle_save_all_named),
        )
        .route(
            "/api/:patient_id/:assessment_name",
            get(assessments::handle_get_assessment).post(assessments::handle_save_assessment),
        )
        .route(
            "/api/:patient_id/barthel/latest",
            get(assessments::handle_latest_barthel),
        )
        .route(
            "/api/:patient_id/moca5min/latest",
            get(assessments::handle_latest_moca5min),
        )
        .route(
            "/api/:patient_id/:assessment_name/latest",
            get(assessments::handle_latest_assessment),
        )
        .with_state(state)
}
