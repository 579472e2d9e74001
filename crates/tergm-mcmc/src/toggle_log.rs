use serde::{Deserialize, Serialize};
use tergm_core::{Dyad, Timestamp, Vertex};

/// One logged toggle: the step it was accepted in and its dyad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleRecord {
    /// Timer value of the step that produced the toggle.
    pub time: Timestamp,
    /// Tail vertex.
    pub tail: Vertex,
    /// Head vertex.
    pub head: Vertex,
}

impl ToggleRecord {
    /// Dyad named by the record.
    pub fn dyad(&self, directed: bool) -> Dyad {
        Dyad::new(self.tail, self.head, directed)
    }
}

/// Fixed-capacity toggle log.
///
/// Appends past capacity are refused rather than overrunning; the sampler
/// checks [`is_full`](Self::is_full) to decide whether a run that needs every
/// toggle has lost some.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleLog {
    records: Vec<ToggleRecord>,
    capacity: usize,
    sealed: Option<usize>,
}

impl ToggleLog {
    /// Creates an empty log holding at most `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity.min(4096)),
            capacity,
            sealed: None,
        }
    }

    /// Appends a record. Returns `false` and drops it when the log is full.
    pub fn push(&mut self, record: ToggleRecord) -> bool {
        if self.is_full() {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Whether the write cursor has reached capacity.
    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    /// Number of records written.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of records.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records in write order.
    pub fn records(&self) -> &[ToggleRecord] {
        &self.records
    }

    /// Moves the write cursor back to the start, discarding earlier records.
    pub fn rewind(&mut self) {
        self.records.clear();
    }

    /// Writes the trailing sentinel holding the final cursor position.
    pub fn seal(&mut self) {
        self.sealed = Some(self.records.len());
    }

    /// Cursor position stored by [`seal`](Self::seal), if the run completed
    /// with full-resolution logging.
    pub fn sealed_len(&self) -> Option<usize> {
        self.sealed
    }
}
