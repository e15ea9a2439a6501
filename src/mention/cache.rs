//! Per-session cache of resolved mention queries.

use std::collections::HashMap;

use super::lookup::Candidate;

/// Append-only map from exact query text to its candidates.
///
/// Entries live as long as the field; there is no expiry.
#[derive(Debug, Clone, Default)]
pub struct MentionCache {
    entries: HashMap<String, Vec<Candidate>>,
}

impl MentionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query: &str) -> Option<&[Candidate]> {
        self.entries.get(query).map(Vec::as_slice)
    }

    /// Store a result; an existing entry for the query is kept
    pub fn insert(&mut self, query: impl Into<String>, candidates: Vec<Candidate>) {
        self.entries.entry(query.into()).or_insert(candidates);
    }

    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains_key(query)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
