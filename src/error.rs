use thiserror::Error;

/// Faults the dashboard pipeline reports to its callers.
///
/// Only genuine faults live here. Unknown selectors, empty inputs and
/// out-of-range selections all have defined default outputs instead.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Record store unavailable: {0:#}")]
    StoreUnavailable(anyhow::Error),

    #[error("Dashboard pipeline is not running")]
    PipelineClosed,
}

pub type DashboardResult<T> = Result<T, DashboardError>;
