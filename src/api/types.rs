//! Request and response bodies for the HTTP view surface.

use serde::{Deserialize, Serialize};

use crate::models::*;

// ============================================================
// Request Types
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorInput {
    /// Missing, `null`, non-string and unknown values behave like `reset`.
    #[serde(default)]
    pub selector: Selector,
}

/// The table's current rows and selected row indices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisibleRowsInput {
    #[serde(default)]
    pub rows: Vec<VisibleRow>,
    #[serde(default)]
    pub selected_rows: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnSelectionInput {
    #[serde(default)]
    pub selected_columns: Vec<String>,
}

/// Paging over the working set. Without `limit` the whole set is returned;
/// the table pages it client-side using `DashboardConfig::page_size`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRecordsQuery {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

// ============================================================
// Response Types
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsPage {
    pub selector: Selector,
    pub generation: u64,
    /// Size of the whole working set, regardless of paging.
    pub total: usize,
    pub records: Vec<AnimalRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorResponse {
    pub working_set: WorkingSet,
    pub aggregate: Vec<BreedCount>,
    pub map: MapView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibleRowsResponse {
    pub aggregate: Vec<BreedCount>,
    pub map: MapView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub map: MapView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightResponse {
    pub highlights: Vec<ColumnHighlight>,
}
