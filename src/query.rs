//! Maps rescue selectors to store queries.

use crate::models::{Clause, FilterPredicate, NumericField, Selector, TextField};

const WATER_BREEDS: &[&str] = &[
    "Labrador Retriever Mix",
    "Chesapeake Bay Retriever",
    "Newfoundland",
];

const MOUNTAIN_BREEDS: &[&str] = &[
    "German Shepherd",
    "Alaskan Malamute",
    "Old English Sheepdog",
    "Siberian Husky",
    "Rottweiler",
];

const DISASTER_BREEDS: &[&str] = &[
    "Doberman Pinscher",
    "German Shepherd",
    "Golden Retriever",
    "Bloodhound",
    "Rottweiler",
];

const INTACT_FEMALE: &str = "Intact Female";
const INTACT_MALE: &str = "Intact Male";

/// Build the filter predicate for a selector.
///
/// `Reset` yields the empty predicate, which matches every record.
pub fn build(selector: Selector) -> FilterPredicate {
    match selector {
        Selector::Water => rescue_profile(WATER_BREEDS, INTACT_FEMALE, 26.0, 156.0),
        Selector::Mountain => rescue_profile(MOUNTAIN_BREEDS, INTACT_MALE, 26.0, 156.0),
        Selector::Disaster => rescue_profile(DISASTER_BREEDS, INTACT_MALE, 20.0, 300.0),
        Selector::Reset => FilterPredicate::match_all(),
    }
}

/// Build the predicate for a raw selector value as sent by the view.
/// Unknown values behave like `reset`.
pub fn build_from_str(value: &str) -> FilterPredicate {
    build(Selector::parse(value))
}

fn rescue_profile(breeds: &[&str], sex: &str, min_weeks: f64, max_weeks: f64) -> FilterPredicate {
    FilterPredicate::match_all()
        .with(Clause::OneOf {
            field: TextField::Breed,
            values: breeds.iter().map(|b| b.to_string()).collect(),
        })
        .with(Clause::Equals {
            field: TextField::SexUponOutcome,
            value: sex.to_string(),
        })
        .with(Clause::Between {
            field: NumericField::AgeUponOutcomeInWeeks,
            min: min_weeks,
            max: max_weeks,
        })
}
