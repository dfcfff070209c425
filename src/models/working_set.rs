use serde::{Deserialize, Serialize};

use super::{AnimalRecord, Selector};

/// The normalized record collection published for the current selector.
///
/// A working set is never edited after publication; a selector change
/// produces a new one with the next `generation`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkingSet {
    pub selector: Selector,
    /// Incremented on every publish, starting at 1 for the first load.
    pub generation: u64,
    pub records: Vec<AnimalRecord>,
}

impl WorkingSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
