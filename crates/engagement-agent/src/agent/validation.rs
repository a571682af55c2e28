use serde::Serialize;

use super::domain::{UserRecord, REQUIRED_FIELDS};

/// Outcome of checking a record against [`REQUIRED_FIELDS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub missing_fields: Vec<&'static str>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.missing_fields.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_valid() {
            "all required fields present".to_string()
        } else {
            format!("missing {}", self.missing_fields.join(", "))
        }
    }
}

/// Reports every required key absent from `record`. Values are not inspected.
pub fn validate_user_record(record: &UserRecord) -> ValidationReport {
    let missing_fields = REQUIRED_FIELDS
        .into_iter()
        .filter(|field| !record.contains_key(*field))
        .collect();

    ValidationReport { missing_fields }
}

pub fn validate_user_data(record: &UserRecord) -> bool {
    REQUIRED_FIELDS
        .iter()
        .all(|field| record.contains_key(*field))
}
