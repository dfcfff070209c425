mod handlers;
pub mod types;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::pipeline::DashboardHandle;

pub fn create_router(dashboard: DashboardHandle) -> Router {
    let api = Router::new()
        // Static view metadata
        .route("/selectors", get(handlers::list_selectors))
        .route("/columns", get(handlers::list_columns))
        .route("/config", get(handlers::get_config))
        .route("/map", get(handlers::default_map))
        // Working set
        .route("/records", get(handlers::list_records))
        .route("/selector", post(handlers::change_selector))
        // View events
        .route("/view/rows", post(handlers::visible_rows_changed))
        .route("/view/selection", post(handlers::row_selection_changed))
        .route("/view/columns", post(handlers::column_highlight_changed))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(dashboard)
}
