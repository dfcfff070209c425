//! Rescue dashboard backend.
//!
//! Turns a rescue-type selector into a store query, republishes the matching
//! shelter records as the working set, and derives the breed chart, map
//! marker and column highlights from whatever rows the table shows.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod projection;
pub mod query;
pub mod working_set;
