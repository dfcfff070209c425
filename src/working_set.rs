//! Holds and republishes the active record collection.

use std::sync::Arc;

use tokio::sync::watch;

use crate::db::RecordStore;
use crate::error::{DashboardError, DashboardResult};
use crate::models::{AnimalRecord, FilterPredicate, Selector, WorkingSet};

/// Owns the published [`WorkingSet`] and the store it is derived from.
///
/// Publication goes through a `watch` channel holding an `Arc`, so readers
/// always see a complete set, either the previous one or the new one.
pub struct WorkingSetManager {
    store: Arc<dyn RecordStore>,
    publisher: watch::Sender<Arc<WorkingSet>>,
}

impl WorkingSetManager {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let (publisher, _) = watch::channel(Arc::new(WorkingSet::default()));
        Self { store, publisher }
    }

    /// Read the records matching `predicate`, without publishing them.
    ///
    /// Store-internal identifiers are stripped. A failed read is reported as
    /// [`DashboardError::StoreUnavailable`], never as an empty result.
    pub fn fetch(&self, predicate: &FilterPredicate) -> DashboardResult<Vec<AnimalRecord>> {
        let stored = self.store.read(predicate).map_err(|e| {
            tracing::error!("Record store read failed: {:#}", e);
            DashboardError::StoreUnavailable(e)
        })?;

        Ok(stored.into_iter().map(|s| s.into_record()).collect())
    }

    /// Replace the working set with the records matching `predicate`.
    ///
    /// On failure nothing is published and the previous set stays current.
    pub fn refresh(
        &self,
        selector: Selector,
        predicate: &FilterPredicate,
    ) -> DashboardResult<Arc<WorkingSet>> {
        let records = self.fetch(predicate)?;
        let generation = self.publisher.borrow().generation + 1;

        let working_set = Arc::new(WorkingSet {
            selector,
            generation,
            records,
        });
        self.publisher.send_replace(working_set.clone());

        tracing::info!(
            selector = %selector,
            generation,
            records = working_set.len(),
            "Published working set"
        );
        Ok(working_set)
    }

    pub fn current(&self) -> Arc<WorkingSet> {
        self.publisher.borrow().clone()
    }

    /// A receiver that observes every future publication.
    pub fn subscribe(&self) -> watch::Receiver<Arc<WorkingSet>> {
        self.publisher.subscribe()
    }
}
