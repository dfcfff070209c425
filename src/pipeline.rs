//! The dashboard's application state and its event loop.
//!
//! A single task owns [`Dashboard`] and handles one [`DashboardEvent`] at a
//! time. A selector change publishes its new working set before the reply is
//! sent, so any projection requested afterwards observes the complete set.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};

use crate::config::DashboardConfig;
use crate::db::RecordStore;
use crate::error::{DashboardError, DashboardResult};
use crate::models::{
    BreedCount, ColumnHighlight, MapView, RowSelection, Selector, VisibleRow, WorkingSet,
};
use crate::working_set::WorkingSetManager;
use crate::{projection, query};

const EVENT_QUEUE_DEPTH: usize = 64;

/// An input from the view layer.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// The rescue type radio changed.
    SelectorChanged(Selector),
    /// The table re-sorted or re-filtered its rows.
    VisibleRowsChanged {
        rows: Vec<VisibleRow>,
        selection: RowSelection,
    },
    /// A different row was selected.
    RowSelectionChanged {
        rows: Vec<VisibleRow>,
        selection: RowSelection,
    },
    /// The highlighted table columns changed.
    ColumnHighlightChanged(Vec<String>),
}

/// The outputs an event produced. Fields an event does not affect are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewRefresh {
    pub working_set: Option<Arc<WorkingSet>>,
    pub aggregate: Option<Vec<BreedCount>>,
    pub map: Option<MapView>,
    pub highlights: Option<Vec<ColumnHighlight>>,
}

/// Application state: the current selector and the working set publisher.
pub struct Dashboard {
    selector: Selector,
    working_set: WorkingSetManager,
    config: Arc<DashboardConfig>,
}

impl Dashboard {
    pub fn new(store: Arc<dyn RecordStore>, config: DashboardConfig) -> Self {
        Self {
            selector: Selector::Reset,
            working_set: WorkingSetManager::new(store),
            config: Arc::new(config),
        }
    }

    /// The selector of the last successful change.
    pub fn selector(&self) -> Selector {
        self.selector
    }

    pub fn working_set(&self) -> Arc<WorkingSet> {
        self.working_set.current()
    }

    /// Handle one event to completion.
    pub fn handle(&mut self, event: DashboardEvent) -> DashboardResult<ViewRefresh> {
        match event {
            DashboardEvent::SelectorChanged(selector) => self.change_selector(selector),
            DashboardEvent::VisibleRowsChanged { rows, selection } => Ok(ViewRefresh {
                aggregate: Some(projection::aggregate(&rows)),
                map: Some(self.map_for(&rows, selection)),
                ..ViewRefresh::default()
            }),
            DashboardEvent::RowSelectionChanged { rows, selection } => Ok(ViewRefresh {
                map: Some(self.map_for(&rows, selection)),
                ..ViewRefresh::default()
            }),
            DashboardEvent::ColumnHighlightChanged(columns) => Ok(ViewRefresh {
                highlights: Some(projection::highlight(
                    &columns,
                    &self.config.highlight_color,
                )),
                ..ViewRefresh::default()
            }),
        }
    }

    fn change_selector(&mut self, selector: Selector) -> DashboardResult<ViewRefresh> {
        tracing::info!(from = %self.selector, to = %selector, "Selector changed");

        let predicate = query::build(selector);
        let working_set = self.working_set.refresh(selector, &predicate)?;
        self.selector = selector;

        // New table data clears the row selection, so the map shows its default.
        Ok(ViewRefresh {
            aggregate: Some(projection::aggregate(&working_set.records)),
            map: Some(projection::map_view(None, &self.config)),
            working_set: Some(working_set),
            highlights: None,
        })
    }

    fn map_for(&self, rows: &[VisibleRow], selection: RowSelection) -> MapView {
        let marker = projection::locate(rows, selection);
        if marker.is_none() && selection.index().is_some() {
            tracing::debug!(
                index = ?selection.index(),
                rows = rows.len(),
                "Selected row has no location, using default map"
            );
        }
        projection::map_view(marker, &self.config)
    }

    /// Load the initial `reset` working set and start the event loop.
    ///
    /// Fails if the initial load cannot read the store. Must be called from
    /// within a tokio runtime.
    pub fn start(mut self) -> DashboardResult<DashboardHandle> {
        self.change_selector(Selector::Reset)?;
        Ok(self.spawn())
    }

    /// Move the dashboard onto its own task and return a handle to it.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn(self) -> DashboardHandle {
        let (tx, rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let handle = DashboardHandle {
            tx,
            working_set: self.working_set.subscribe(),
            config: self.config.clone(),
        };

        tokio::spawn(self.run(rx));
        handle
    }

    async fn run(mut self, mut rx: mpsc::Receiver<Command>) {
        tracing::debug!("Dashboard event loop started");

        while let Some(Command { event, reply }) = rx.recv().await {
            let result = self.handle(event);
            if reply.send(result).is_err() {
                tracing::debug!("Caller went away before the reply was ready");
            }
        }

        tracing::debug!("Dashboard event loop stopped");
    }
}

struct Command {
    event: DashboardEvent,
    reply: oneshot::Sender<DashboardResult<ViewRefresh>>,
}

/// Cloneable entry point to a running [`Dashboard`].
#[derive(Clone)]
pub struct DashboardHandle {
    tx: mpsc::Sender<Command>,
    working_set: watch::Receiver<Arc<WorkingSet>>,
    config: Arc<DashboardConfig>,
}

impl DashboardHandle {
    /// Queue an event and wait for its outputs.
    ///
    /// Events are handled in the order they are queued; concurrent selector
    /// changes resolve last-writer-wins.
    pub async fn dispatch(&self, event: DashboardEvent) -> DashboardResult<ViewRefresh> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Command { event, reply })
            .await
            .map_err(|_| DashboardError::PipelineClosed)?;
        response.await.map_err(|_| DashboardError::PipelineClosed)?
    }

    /// The most recently published working set.
    pub fn working_set(&self) -> Arc<WorkingSet> {
        self.working_set.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<WorkingSet>> {
        self.working_set.clone()
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }
}
