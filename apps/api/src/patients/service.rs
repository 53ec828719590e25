use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::patients::validation::is_valid_identifier;
use crate::store::{FieldMap, HashStore};

/// Creates the patient hash `{created: "true"}` under `identifier`.
///
/// The existence check and the write are separate commands; two concurrent
/// creates for the same identifier can both succeed.
pub async fn create_patient(
    store: &dyn HashStore,
    payload: Option<Value>,
) -> Result<String, AppError> {
    let identifier = payload
        .as_ref()
        .and_then(|body| body.get("identifier"))
        .and_then(Value::as_str)
        .filter(|id| is_valid_identifier(id))
        .ok_or_else(|| AppError::InvalidInput("Invalid input".to_string()))?;

    if store.exists(identifier).await? {
        return Err(AppError::Conflict(
            "Patient with this ID already exists".to_string(),
        ));
    }

    let fields = FieldMap::from([("created".to_string(), "true".to_string())]);
    store.set_fields(identifier, &fields).await?;
    info!("Created patient {identifier}");

    Ok(identifier.to_string())
}

/// All fields stored under `identifier`. An empty hash counts as missing.
pub async fn get_patient(store: &dyn HashStore, identifier: &str) -> Result<FieldMap, AppError> {
    let fields = store.get_fields(identifier).await?;
    if fields.is_empty() {
        return Err(AppError::NoData("Hashmap not found".to_string()));
    }
    Ok(fields)
}
