use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::assessments::keys::{AssessmentKey, AssessmentTimestamp, StoredKey};
use crate::assessments::selection::{select_latest, sort_by_last_segment_desc};
use crate::assessments::values::{decode_fields, normalize_payload};
use crate::errors::AppError;
use crate::store::{FieldMap, HashStore};

/// Assessment types with a dedicated "latest" route that returns raw strings.
#[derive(Debug, Clone, Copy)]
pub struct FixedAssessment {
    pub name: &'static str,
    /// Short form used in "none found" messages.
    pub label: &'static str,
}

pub const BARTHEL_INDEX: FixedAssessment = FixedAssessment {
    name: "Barthel Index",
    label: "Barthel",
};

pub const MOCA_5MIN: FixedAssessment = FixedAssessment {
    name: "MoCA 5min",
    label: "MoCA 5min",
};

#[derive(Debug, Clone, Serialize)]
pub struct SavedAssessment {
    pub message: String,
    pub timestamp: String,
    pub unix_timestamp: i64,
    pub key: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LatestAssessment<T> {
    pub timestamp: String,
    pub unix_timestamp: i64,
    pub data: T,
    pub key: String,
}

/// Assessments keyed by storage key, serialized in the order held.
#[derive(Debug, Clone, Default)]
pub struct OrderedAssessments(pub Vec<(String, FieldMap)>);

impl Serialize for OrderedAssessments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, fields) in &self.0 {
            map.serialize_entry(key, fields)?;
        }
        map.end()
    }
}

/// One entry of the "all data" view.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum DataEntry {
    Timestamped {
        data: FieldMap,
        timestamp: String,
        unix_timestamp: String,
    },
    Raw(FieldMap),
}

async fn require_patient(
    store: &dyn HashStore,
    patient_id: &str,
    missing_message: &str,
) -> Result<(), AppError> {
    if store.exists(patient_id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(missing_message.to_string()))
    }
}

/// Writes a new assessment record under a fresh timestamped key.
pub async fn save_assessment(
    store: &dyn HashStore,
    patient_id: &str,
    assessment_name: &str,
    payload: Option<Value>,
    timestamp: AssessmentTimestamp,
) -> Result<SavedAssessment, AppError> {
    require_patient(store, patient_id, "Patient ID does not exist").await?;

    let fields = match payload {
        Some(Value::Object(map)) if !map.is_empty() => normalize_payload(map),
        _ => return Err(AppError::InvalidInput("Invalid input".to_string())),
    };

    let key = AssessmentKey::new(patient_id, assessment_name, timestamp);
    let storage_key = key.storage_key();
    store.set_fields(&storage_key, &fields).await?;

    info!(
        "Saved {} field(s) for {patient_id} / {assessment_name} under '{storage_key}'",
        fields.len()
    );

    Ok(SavedAssessment {
        message: "Assessment saved successfully".to_string(),
        timestamp: key.timestamp.human,
        unix_timestamp: key.timestamp.unix,
        key: storage_key,
    })
}

/// Reads the unsuffixed `{patient_id}:{assessment_name}` hash.
pub async fn get_assessment(
    store: &dyn HashStore,
    patient_id: &str,
    assessment_name: &str,
) -> Result<FieldMap, AppError> {
    require_patient(
        store,
        patient_id,
        "Patient ID does not exist or might need to be created",
    )
    .await?;

    let fields = store
        .get_fields(&AssessmentKey::unsuffixed(patient_id, assessment_name))
        .await?;
    if fields.is_empty() {
        return Err(AppError::NoData("Assessment not found".to_string()));
    }
    Ok(fields)
}

/// Every non-empty record under the patient, newest-looking first.
pub async fn list_assessments(
    store: &dyn HashStore,
    patient_id: &str,
) -> Result<OrderedAssessments, AppError> {
    require_patient(store, patient_id, "Patient ID does not exist").await?;

    let mut keys = store
        .keys_with_prefix(&AssessmentKey::patient_prefix(patient_id))
        .await?;
    sort_by_last_segment_desc(&mut keys);

    let mut assessments = Vec::with_capacity(keys.len());
    for key in keys {
        let fields = store.get_fields(&key).await?;
        if !fields.is_empty() {
            assessments.push((key, fields));
        }
    }

    if assessments.is_empty() {
        return Err(AppError::NoData("No assessments found".to_string()));
    }
    Ok(OrderedAssessments(assessments))
}

/// Every record under the identifier; timestamped keys are unpacked.
pub async fn get_all_data(
    store: &dyn HashStore,
    identifier: &str,
) -> Result<BTreeMap<String, DataEntry>, AppError> {
    require_patient(
        store,
        identifier,
        "Patient ID does not exist or might need to be created",
    )
    .await?;

    let keys = store
        .keys_with_prefix(&AssessmentKey::patient_prefix(identifier))
        .await?;

    let mut all_data = BTreeMap::new();
    for key in keys {
        let data = store.get_fields(&key).await?;
        let entry = match StoredKey::parse(&key).timestamp_segments() {
            Some((unix, human)) => DataEntry::Timestamped {
                data,
                timestamp: human.to_string(),
                unix_timestamp: unix.to_string(),
            },
            None => DataEntry::Raw(data),
        };
        all_data.insert(key, entry);
    }

    if all_data.is_empty() {
        return Err(AppError::NoData("No data found for this ID".to_string()));
    }
    Ok(all_data)
}

/// Most recent record of one assessment type, values as stored.
pub async fn latest_fixed(
    store: &dyn HashStore,
    patient_id: &str,
    assessment: FixedAssessment,
) -> Result<LatestAssessment<FieldMap>, AppError> {
    latest_raw(
        store,
        patient_id,
        assessment.name,
        format!("No {} assessments found", assessment.label),
        "Failed to retrieve latest assessment".to_string(),
    )
    .await
}

/// Most recent record of any assessment type, values decoded from JSON where they parse.
pub async fn latest_decoded(
    store: &dyn HashStore,
    patient_id: &str,
    assessment_name: &str,
) -> Result<LatestAssessment<Map<String, Value>>, AppError> {
    let latest = latest_raw(
        store,
        patient_id,
        assessment_name,
        format!("No {assessment_name} assessments found"),
        format!("Failed to retrieve latest {assessment_name} assessment"),
    )
    .await?;

    Ok(LatestAssessment {
        timestamp: latest.timestamp,
        unix_timestamp: latest.unix_timestamp,
        data: decode_fields(latest.data),
        key: latest.key,
    })
}

async fn latest_raw(
    store: &dyn HashStore,
    patient_id: &str,
    assessment_name: &str,
    none_found: String,
    failure: String,
) -> Result<LatestAssessment<FieldMap>, AppError> {
    require_patient(store, patient_id, "Patient not found").await?;

    let keys = store
        .keys_with_prefix(&AssessmentKey::assessment_prefix(patient_id, assessment_name))
        .await?;
    if keys.is_empty() {
        return Err(AppError::NoData(none_found));
    }

    let internal = |details: String| {
        warn!("Error retrieving latest {assessment_name} assessment for {patient_id}: {details}");
        AppError::Internal {
            error: failure.clone(),
            details,
        }
    };

    let latest_key = match select_latest(&keys) {
        Ok(Some(key)) => key.to_string(),
        Ok(None) => return Err(AppError::NoData(none_found)),
        Err(e) => return Err(internal(e.to_string())),
    };

    let data = store
        .get_fields(&latest_key)
        .await
        .map_err(|e| internal(e.to_string()))?;
    if data.is_empty() {
        return Err(AppError::NoData("Latest assessment is empty".to_string()));
    }

    let (unix_timestamp, timestamp) = StoredKey::parse(&latest_key)
        .resolved_timestamps()
        .map_err(|e| internal(e.to_string()))?;

    Ok(LatestAssessment {
        timestamp,
        unix_timestamp,
        data,
        key: latest_key,
    })
}
