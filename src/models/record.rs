use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One rescue-animal outcome entry from the Austin Animal Center data set.
///
/// Records are immutable once fetched. The pipeline only ever replaces whole
/// collections of them, it never edits a record in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalRecord {
    /// Row number in the original export, when present.
    #[serde(default)]
    pub rec_num: Option<i64>,
    /// Shelter-assigned animal identifier (e.g. `A746874`).
    #[serde(default)]
    pub animal_id: String,
    pub animal_type: String,
    pub breed: String,
    #[serde(default)]
    pub color: Option<String>,
    /// Animal name; empty when the shelter never named the animal.
    #[serde(default)]
    pub name: String,
    pub sex_upon_outcome: String,
    /// Human readable age, e.g. `"2 years"`.
    #[serde(default)]
    pub age_upon_outcome: Option<String>,
    pub age_upon_outcome_in_weeks: f64,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub monthyear: Option<String>,
    #[serde(default)]
    pub outcome_type: Option<String>,
    #[serde(default)]
    pub outcome_subtype: Option<String>,
    #[serde(default)]
    pub location_lat: Option<f64>,
    #[serde(default)]
    pub location_long: Option<f64>,
}

/// An [`AnimalRecord`] as held by the store, including its internal identifier.
///
/// The identifier never leaves the store adapter's callers: the working set
/// manager strips it before publishing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub record: AnimalRecord,
}

impl StoredRecord {
    /// Drop the store-internal identifier.
    pub fn into_record(self) -> AnimalRecord {
        self.record
    }
}

/// Columns of the record table, in display order.
pub const RECORD_COLUMNS: &[&str] = &[
    "rec_num",
    "age_upon_outcome",
    "animal_id",
    "animal_type",
    "breed",
    "color",
    "date_of_birth",
    "datetime",
    "monthyear",
    "name",
    "outcome_subtype",
    "outcome_type",
    "sex_upon_outcome",
    "location_lat",
    "location_long",
    "age_upon_outcome_in_weeks",
];
