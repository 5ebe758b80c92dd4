//! Search-history persistence collaborator.
//!
//! The engine only hands over the raw query string and a caller identity;
//! anything beyond [`MemoryHistory`] (a database, a file) implements
//! [`HistoryStore`] outside this crate.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Identifier assigned to a stored history entry.
pub type HistoryId = u64;

/// One persisted search: who searched what, and when.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub user: String,
    pub sequence: String,
    pub created_at: DateTime<Utc>,
}

/// Destination for raw query sequences associated with a caller identity.
pub trait HistoryStore {
    /// Persist one search, returning the generated entry id.
    fn record(&mut self, user: &str, sequence: &str) -> Result<HistoryId>;

    /// Snapshot of stored entries, oldest first.
    fn entries(&self) -> Vec<HistoryEntry>;
}

/// In-memory history with monotonically increasing ids, starting at 1.
#[derive(Clone, Debug, Default)]
pub struct MemoryHistory {
    next_id: HistoryId,
    entries: Vec<HistoryEntry>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistory {
    fn record(&mut self, user: &str, sequence: &str) -> Result<HistoryId> {
        self.next_id += 1;
        self.entries.push(HistoryEntry {
            id: self.next_id,
            user: user.to_string(),
            sequence: sequence.to_string(),
            created_at: Utc::now(),
        });
        Ok(self.next_id)
    }

    fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }
}
