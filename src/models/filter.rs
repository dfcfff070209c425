use serde::{Deserialize, Serialize};

use super::AnimalRecord;

/// Text columns a clause can constrain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    AnimalType,
    Breed,
    Color,
    Name,
    OutcomeType,
    SexUponOutcome,
}

impl TextField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::AnimalType => "animal_type",
            Self::Breed => "breed",
            Self::Color => "color",
            Self::Name => "name",
            Self::OutcomeType => "outcome_type",
            Self::SexUponOutcome => "sex_upon_outcome",
        }
    }

    pub fn value<'a>(&self, record: &'a AnimalRecord) -> Option<&'a str> {
        match self {
            Self::AnimalType => Some(record.animal_type.as_str()),
            Self::Breed => Some(record.breed.as_str()),
            Self::Color => record.color.as_deref(),
            Self::Name => Some(record.name.as_str()),
            Self::OutcomeType => record.outcome_type.as_deref(),
            Self::SexUponOutcome => Some(record.sex_upon_outcome.as_str()),
        }
    }
}

/// Numeric columns a range clause can constrain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    AgeUponOutcomeInWeeks,
    LocationLat,
    LocationLong,
}

impl NumericField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::AgeUponOutcomeInWeeks => "age_upon_outcome_in_weeks",
            Self::LocationLat => "location_lat",
            Self::LocationLong => "location_long",
        }
    }

    pub fn value(&self, record: &AnimalRecord) -> Option<f64> {
        match self {
            Self::AgeUponOutcomeInWeeks => Some(record.age_upon_outcome_in_weeks),
            Self::LocationLat => record.location_lat,
            Self::LocationLong => record.location_long,
        }
    }
}

/// A single condition of a [`FilterPredicate`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Clause {
    /// Field value is one of `values`.
    OneOf { field: TextField, values: Vec<String> },
    /// Field value equals `value`.
    Equals { field: TextField, value: String },
    /// Field value lies in `[min, max]`, both ends inclusive.
    Between { field: NumericField, min: f64, max: f64 },
}

impl Clause {
    pub fn matches(&self, record: &AnimalRecord) -> bool {
        match self {
            Self::OneOf { field, values } => field
                .value(record)
                .is_some_and(|v| values.iter().any(|candidate| candidate == v)),
            Self::Equals { field, value } => field.value(record) == Some(value.as_str()),
            Self::Between { field, min, max } => field
                .value(record)
                .is_some_and(|v| *min <= v && v <= *max),
        }
    }
}

/// A store-agnostic query: all clauses must hold.
///
/// The empty predicate matches every record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterPredicate {
    #[serde(default)]
    pub clauses: Vec<Clause>,
}

impl FilterPredicate {
    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn with(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, record: &AnimalRecord) -> bool {
        self.clauses.iter().all(|clause| clause.matches(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(breed: &str, sex: &str, weeks: f64) -> AnimalRecord {
        serde_json::from_value(serde_json::json!({
            "animal_type": "Dog",
            "breed": breed,
            "sex_upon_outcome": sex,
            "age_upon_outcome_in_weeks": weeks
        }))
        .unwrap()
    }

    #[test]
    fn empty_predicate_matches_everything() {
        let predicate = FilterPredicate::match_all();
        assert!(predicate.is_empty());
        assert!(predicate.matches(&record("Bloodhound", "Neutered Male", 900.0)));
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let predicate = FilterPredicate::match_all().with(Clause::Between {
            field: NumericField::AgeUponOutcomeInWeeks,
            min: 26.0,
            max: 156.0,
        });

        assert!(predicate.matches(&record("Newfoundland", "Intact Female", 26.0)));
        assert!(predicate.matches(&record("Newfoundland", "Intact Female", 156.0)));
        assert!(!predicate.matches(&record("Newfoundland", "Intact Female", 25.9)));
        assert!(!predicate.matches(&record("Newfoundland", "Intact Female", 156.1)));
    }

    #[test]
    fn clauses_are_conjunctive() {
        let predicate = FilterPredicate::match_all()
            .with(Clause::OneOf {
                field: TextField::Breed,
                values: vec!["Rottweiler".to_string(), "Bloodhound".to_string()],
            })
            .with(Clause::Equals {
                field: TextField::SexUponOutcome,
                value: "Intact Male".to_string(),
            });

        assert!(predicate.matches(&record("Rottweiler", "Intact Male", 40.0)));
        assert!(!predicate.matches(&record("Rottweiler", "Intact Female", 40.0)));
        assert!(!predicate.matches(&record("Beagle", "Intact Male", 40.0)));
    }

    #[test]
    fn missing_optional_column_never_matches() {
        let predicate = FilterPredicate::match_all().with(Clause::Between {
            field: NumericField::LocationLat,
            min: -90.0,
            max: 90.0,
        });

        assert!(!predicate.matches(&record("Beagle", "Intact Male", 40.0)));
    }
}
