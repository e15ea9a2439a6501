//! Snapshot undo/redo history with keystroke coalescing.
//!
//! Entries are whole-value snapshots. A change ending in a delimiter (space or
//! newline) commits at once; anything else is held as a pending edit until the
//! caller reports that typing paused for that revision.

/// Characters that force an immediate commit when they end a change
pub const COMMIT_DELIMITERS: [char; 2] = [' ', '\n'];

/// Default cap on stored entries
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// What `record_change` did with a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// Appended as a new entry
    Committed,
    /// Held as pending; commit once the pause for `revision` elapses
    Pending { revision: u64 },
    /// Identical to the current entry, nothing to do
    Unchanged,
}

#[derive(Debug, Clone)]
struct PendingEdit {
    revision: u64,
    value: String,
}

/// Undo history over snapshots of the field value.
///
/// Invariants: `entries` is never empty, `cursor < entries.len()`, and
/// `entries[0]` is the value the history was created with.
#[derive(Debug, Clone)]
pub struct EditHistory {
    entries: Vec<String>,
    cursor: usize,
    pending: Option<PendingEdit>,
    next_revision: u64,
    max_entries: usize,
}

impl EditHistory {
    /// Create a history whose first entry is `initial`
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_max_entries(initial, DEFAULT_MAX_ENTRIES)
    }

    /// Create a history with a cap on stored entries (at least 2)
    pub fn with_max_entries(initial: impl Into<String>, max_entries: usize) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
            pending: None,
            next_revision: 0,
            max_entries: max_entries.max(2),
        }
    }

    /// Record a new live value, committing now or marking it pending
    pub fn record_change(&mut self, value: impl Into<String>) -> Recorded {
        let value = value.into();
        if value.ends_with(COMMIT_DELIMITERS) {
            self.pending = None;
            return if self.commit(value) {
                Recorded::Committed
            } else {
                Recorded::Unchanged
            };
        }

        if self.pending.is_none() && value == self.entries[self.cursor] {
            return Recorded::Unchanged;
        }

        self.next_revision += 1;
        let revision = self.next_revision;
        self.pending = Some(PendingEdit { revision, value });
        Recorded::Pending { revision }
    }

    /// Commit the pending edit if it still carries `revision`
    pub fn commit_pending(&mut self, revision: u64) -> bool {
        match self.pending.take() {
            Some(pending) if pending.revision == revision => self.commit(pending.value),
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// Commit any pending edit regardless of revision
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => self.commit(pending.value),
            None => false,
        }
    }

    /// Step back one entry, returning the value to display
    pub fn undo(&mut self) -> Option<&str> {
        self.flush();
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one entry, returning the value to display
    pub fn redo(&mut self) -> Option<&str> {
        if self.pending.is_some() || self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.cursor > 0 || self.pending.is_some()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.pending.is_none() && self.cursor + 1 < self.entries.len()
    }

    /// Index of the displayed entry
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All committed entries, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Currently displayed committed entry
    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    /// Check if an uncommitted edit is waiting for a pause
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Append `value`, dropping any redo branch first
    fn commit(&mut self, value: String) -> bool {
        if value == self.entries[self.cursor] {
            return false;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push(value);

        // entries[0] is pinned; evict the oldest entry after it
        while self.entries.len() > self.max_entries {
            self.entries.remove(1);
        }
        self.cursor = self.entries.len() - 1;

        tracing::trace!(
            target: "history",
            entries = self.entries.len(),
            cursor = self.cursor,
            "commit"
        );
        true
    }
}
