use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::types::*;
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::models::*;
use crate::pipeline::{DashboardEvent, DashboardHandle, ViewRefresh};
use crate::projection;

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

// ============================================================
// Error Handling
// ============================================================

/// Log a pipeline fault and return a sanitized response to the client.
/// Store outages are reported as 503 so the view can show its own fallback.
fn pipeline_error(e: DashboardError) -> (StatusCode, String) {
    match e {
        DashboardError::StoreUnavailable(_) => {
            tracing::error!("Store error: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Record store unavailable".to_string(),
            )
        }
        DashboardError::PipelineClosed => {
            tracing::error!("Internal error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

fn missing_output(what: &str) -> (StatusCode, String) {
    tracing::error!("Dashboard reply is missing its {} output", what);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

fn take<T>(value: Option<T>, what: &str) -> Result<T, (StatusCode, String)> {
    value.ok_or_else(|| missing_output(what))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// View metadata
// ============================================================

pub async fn list_selectors() -> Json<Vec<SelectorOption>> {
    Json(Selector::ALL.into_iter().map(SelectorOption::from).collect())
}

pub async fn list_columns() -> Json<Vec<&'static str>> {
    Json(RECORD_COLUMNS.to_vec())
}

pub async fn get_config(State(dashboard): State<DashboardHandle>) -> Json<DashboardConfig> {
    Json(dashboard.config().clone())
}

pub async fn default_map(State(dashboard): State<DashboardHandle>) -> Json<MapView> {
    Json(projection::map_view(None, dashboard.config()))
}

// ============================================================
// Working set
// ============================================================

pub async fn list_records(
    State(dashboard): State<DashboardHandle>,
    Query(query): Query<ListRecordsQuery>,
) -> Json<RecordsPage> {
    let working_set = dashboard.working_set();

    let offset = query.offset.unwrap_or(0);
    let records = working_set.records.iter().skip(offset);
    let records: Vec<AnimalRecord> = match query.limit {
        Some(limit) => records.take(limit).cloned().collect(),
        None => records.cloned().collect(),
    };

    Json(RecordsPage {
        selector: working_set.selector,
        generation: working_set.generation,
        total: working_set.len(),
        records,
    })
}

pub async fn change_selector(
    State(dashboard): State<DashboardHandle>,
    Json(input): Json<SelectorInput>,
) -> ApiResult<SelectorResponse> {
    let ViewRefresh {
        working_set,
        aggregate,
        map,
        ..
    } = dashboard
        .dispatch(DashboardEvent::SelectorChanged(input.selector))
        .await
        .map_err(pipeline_error)?;

    Ok(Json(SelectorResponse {
        working_set: take(working_set, "working set")?.as_ref().clone(),
        aggregate: take(aggregate, "aggregate")?,
        map: take(map, "map")?,
    }))
}

// ============================================================
// View events
// ============================================================

pub async fn visible_rows_changed(
    State(dashboard): State<DashboardHandle>,
    Json(input): Json<VisibleRowsInput>,
) -> ApiResult<VisibleRowsResponse> {
    let refresh = dashboard
        .dispatch(DashboardEvent::VisibleRowsChanged {
            selection: RowSelection::from_indices(&input.selected_rows),
            rows: input.rows,
        })
        .await
        .map_err(pipeline_error)?;

    Ok(Json(VisibleRowsResponse {
        aggregate: take(refresh.aggregate, "aggregate")?,
        map: take(refresh.map, "map")?,
    }))
}

pub async fn row_selection_changed(
    State(dashboard): State<DashboardHandle>,
    Json(input): Json<VisibleRowsInput>,
) -> ApiResult<SelectionResponse> {
    let refresh = dashboard
        .dispatch(DashboardEvent::RowSelectionChanged {
            selection: RowSelection::from_indices(&input.selected_rows),
            rows: input.rows,
        })
        .await
        .map_err(pipeline_error)?;

    Ok(Json(SelectionResponse {
        map: take(refresh.map, "map")?,
    }))
}

pub async fn column_highlight_changed(
    State(dashboard): State<DashboardHandle>,
    Json(input): Json<ColumnSelectionInput>,
) -> ApiResult<HighlightResponse> {
    let refresh = dashboard
        .dispatch(DashboardEvent::ColumnHighlightChanged(
            input.selected_columns,
        ))
        .await
        .map_err(pipeline_error)?;

    Ok(Json(HighlightResponse {
        highlights: take(refresh.highlights, "highlights")?,
    }))
}
