//! Composite storage keys for assessment records.
//!
//! Callers deal in `AssessmentKey`; the colon-delimited string exists only at
//! the storage boundary. `StoredKey` is the read-side view over keys found by
//! a prefix scan, which may have been written by anything.

use std::num::ParseIntError;

use chrono::{DateTime, Local};

pub const KEY_DELIMITER: char = ':';
pub const HUMAN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reported when a key carries no human-readable timestamp.
pub const UNKNOWN_TIMESTAMP: &str = "Unknown";

/// Creation time of an assessment in both stored forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentTimestamp {
    pub unix: i64,
    pub human: String,
}

impl AssessmentTimestamp {
    pub fn now() -> Self {
        Local::now().into()
    }
}

/// Truncates to whole seconds; the human form is rendered in the server's
/// local time zone.
impl From<DateTime<Local>> for AssessmentTimestamp {
    fn from(at: DateTime<Local>) -> Self {
        Self {
            unix: at.timestamp(),
            human: at.format(HUMAN_TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Identity of one saved assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentKey {
    pub patient_id: String,
    pub assessment_name: String,
    pub timestamp: AssessmentTimestamp,
}

impl AssessmentKey {
    pub fn new(patient_id: &str, assessment_name: &str, timestamp: AssessmentTimestamp) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            assessment_name: assessment_name.to_string(),
            timestamp,
        }
    }

    /// `{patient_id}:{assessment_name}:{unix}:{human}`
    pub fn storage_key(&self) -> String {
        format!(
            "{}{d}{}{d}{}{d}{}",
            self.patient_id,
            self.assessment_name,
            self.timestamp.unix,
            self.timestamp.human,
            d = KEY_DELIMITER
        )
    }

    /// Prefix shared by every record of one patient.
    pub fn patient_prefix(patient_id: &str) -> String {
        format!("{patient_id}{KEY_DELIMITER}")
    }

    /// Prefix shared by every record of one assessment type for a patient.
    pub fn assessment_prefix(patient_id: &str, assessment_name: &str) -> String {
        format!("{patient_id}{KEY_DELIMITER}{assessment_name}{KEY_DELIMITER}")
    }

    /// Patient and name without any timestamp. Save never writes this form.
    pub fn unsuffixed(patient_id: &str, assessment_name: &str) -> String {
        format!("{patient_id}{KEY_DELIMITER}{assessment_name}")
    }
}

/// Segment view of a key returned by a prefix scan.
///
/// The human-readable timestamp itself contains colons, so a key written by
/// save splits into six segments, not four.
#[derive(Debug, Clone)]
pub struct StoredKey<'a> {
    raw: &'a str,
    segments: Vec<&'a str>,
}

impl<'a> StoredKey<'a> {
    pub fn parse(raw: &'a str) -> Self {
        Self {
            raw,
            segments: raw.split(KEY_DELIMITER).collect(),
        }
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Final segment, or `""` for keys with two segments or fewer.
    pub fn sort_segment(&self) -> &'a str {
        if self.segments.len() > 2 {
            self.segments.last().copied().unwrap_or("")
        } else {
            ""
        }
    }

    /// Segment 2 as an integer; keys too short to carry one rank as 0.
    pub fn selection_timestamp(&self) -> Result<i64, ParseIntError> {
        match self.segments.get(2) {
            Some(segment) => segment.trim().parse::<i64>(),
            None => Ok(0),
        }
    }

    /// Raw (unix, human) segments for keys with at least four segments.
    pub fn timestamp_segments(&self) -> Option<(&'a str, &'a str)> {
        if self.segments.len() >= 4 {
            Some((self.segments[2], self.segments[3]))
        } else {
            None
        }
    }

    /// Unix timestamp and full human timestamp, rejoining every segment from
    /// index 3 on. Falls back to `(0, "Unknown")` for short keys.
    pub fn resolved_timestamps(&self) -> Result<(i64, String), ParseIntError> {
        if self.segments.len() >= 4 {
            let unix = self.segments[2].trim().parse::<i64>()?;
            let delimiter = KEY_DELIMITER.to_string();
            let human = self.segments[3..].join(delimiter.as_str());
            Ok((unix, human))
        } else {
            Ok((0, UNKNOWN_TIMESTAMP.to_string()))
        }
    }
}
