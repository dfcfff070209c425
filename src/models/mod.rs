//! Domain models for the rescue dashboard.
//!
//! # Core Concepts
//!
//! ## Store-side
//!
//! - [`AnimalRecord`]: One shelter outcome entry, validated at the store boundary.
//! - [`StoredRecord`]: An [`AnimalRecord`] together with the store-internal identifier.
//!
//! ## Query-side
//!
//! - [`Selector`]: The categorical rescue intent chosen by the user.
//! - [`FilterPredicate`]: Store-agnostic conjunctive query built from a selector.
//!
//! ## View-side
//!
//! - [`WorkingSet`]: The published, normalized records for the current selector.
//! - [`VisibleRow`]: A row as the view layer currently renders it (after its own sort/filter).
//! - [`BreedCount`], [`GeoMarker`], [`MapView`], [`ColumnHighlight`]: Derived view artifacts.

mod filter;
mod projection;
mod record;
mod selector;
mod working_set;

pub use filter::*;
pub use projection::*;
pub use record::*;
pub use selector::*;
pub use working_set::*;
