//! Mention composition state machine.
//!
//! ```text
//! Idle ──trigger──▶ Composing ──query change──▶ Resolving ──candidates──▶ Open
//!   ▲                  │  ▲                         │                      │
//!   └──escape/space────┘  └──────── cache hit ──────┼──────────────────────┤
//!   └───────────── empty result / failure ──────────┘   commit / escape ───┘
//! ```
//!
//! Transitions are synchronous. A cache miss returns
//! [`MentionEffect::Lookup`]; the caller runs the lookup and feeds the
//! outcome back through [`MentionAutocomplete::on_result`].

use std::collections::HashSet;

use crate::editable::{char_len, Selection};

use super::cache::MentionCache;
use super::lookup::{Candidate, LookupError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MentionPhase {
    #[default]
    Idle,
    Composing,
    Resolving,
    Open,
}

/// Trigger position and the text typed after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionQuery {
    pub trigger_offset: usize,
    pub query_text: String,
}

impl MentionQuery {
    /// Offset just past the last query character
    pub fn span_end(&self) -> usize {
        self.trigger_offset + 1 + char_len(&self.query_text)
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MentionEffect {
    None,
    /// Run the injected lookup for this query
    Lookup(String),
}

/// A committed mention: where to write and what was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionCommit {
    pub query: MentionQuery,
    pub candidate: Candidate,
}

#[derive(Debug, Clone)]
pub struct MentionAutocomplete {
    trigger: char,
    phase: MentionPhase,
    query: Option<MentionQuery>,
    candidates: Vec<Candidate>,
    focus: usize,
    cache: MentionCache,
    in_flight: HashSet<String>,
}

impl MentionAutocomplete {
    pub fn new(trigger: char) -> Self {
        Self {
            trigger,
            phase: MentionPhase::Idle,
            query: None,
            candidates: Vec::new(),
            focus: 0,
            cache: MentionCache::new(),
            in_flight: HashSet::new(),
        }
    }

    pub fn trigger(&self) -> char {
        self.trigger
    }

    pub fn phase(&self) -> MentionPhase {
        self.phase
    }

    pub fn query(&self) -> Option<&MentionQuery> {
        self.query.as_ref()
    }

    /// Check if a composition is in progress (any phase but Idle)
    pub fn is_active(&self) -> bool {
        self.phase != MentionPhase::Idle
    }

    /// Check if the candidate panel is showing
    pub fn is_open(&self) -> bool {
        self.phase == MentionPhase::Open
    }

    /// Visible candidates (empty unless open)
    pub fn candidates(&self) -> &[Candidate] {
        if self.is_open() {
            &self.candidates
        } else {
            &[]
        }
    }

    pub fn focus_index(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> Option<&Candidate> {
        self.candidates().get(self.focus)
    }

    pub fn cache(&self) -> &MentionCache {
        &self.cache
    }

    /// Check if a lookup for `query` has been issued and not yet answered
    pub fn is_in_flight(&self, query: &str) -> bool {
        self.in_flight.contains(query)
    }

    /// A character was typed at `offset` (its position before insertion)
    pub fn on_char(&mut self, ch: char, offset: usize) -> MentionEffect {
        if !self.is_at_span_end(offset) {
            self.cancel();
        }

        if !self.is_active() {
            if ch == self.trigger {
                self.phase = MentionPhase::Composing;
                self.query = Some(MentionQuery {
                    trigger_offset: offset,
                    query_text: String::new(),
                });
                tracing::debug!(target: "mention", offset, "composition started");
            }
            return MentionEffect::None;
        }

        if ch.is_whitespace() || ch.is_control() {
            self.cancel();
            return MentionEffect::None;
        }

        if let Some(query) = self.query.as_mut() {
            query.query_text.push(ch);
        }
        self.resolve()
    }

    /// Backspace was pressed with a collapsed cursor at `cursor`
    pub fn on_backspace(&mut self, cursor: usize) -> MentionEffect {
        if !self.is_at_span_end(cursor) {
            self.cancel();
            return MentionEffect::None;
        }
        let Some(query) = self.query.as_mut() else {
            return MentionEffect::None;
        };
        if query.query_text.pop().is_none() {
            // The trigger itself is being deleted
            self.cancel();
            return MentionEffect::None;
        }
        self.resolve()
    }

    /// Cancel any composition unconditionally
    pub fn cancel(&mut self) {
        if self.is_active() {
            tracing::debug!(target: "mention", "composition cancelled");
        }
        self.phase = MentionPhase::Idle;
        self.query = None;
        self.candidates.clear();
        self.focus = 0;
        // Late results still land in the cache; only dedupe within one composition
        self.in_flight.clear();
    }

    /// Cancel unless the cursor still sits at the end of the query
    pub fn on_selection_changed(&mut self, selection: Selection) {
        if !selection.is_collapsed() || !self.is_at_span_end(selection.start) {
            self.cancel();
        }
    }

    /// True when idle, or when `offset` is where the next query character goes
    fn is_at_span_end(&self, offset: usize) -> bool {
        self.query.as_ref().map_or(true, |q| q.span_end() == offset)
    }

    /// Apply a lookup outcome; returns true if visible state changed
    pub fn on_result(
        &mut self,
        query: &str,
        result: Result<Vec<Candidate>, LookupError>,
    ) -> bool {
        self.in_flight.remove(query);

        let candidates = match result {
            Ok(candidates) => {
                self.cache.insert(query, candidates.clone());
                candidates
            }
            Err(e) => {
                tracing::debug!(target: "mention", query, error = %e, "lookup failed");
                Vec::new()
            }
        };

        let current = self.query.as_ref().map(|q| q.query_text.as_str());
        if !self.is_active() || current != Some(query) {
            tracing::trace!(target: "mention", query, "dropping stale lookup result");
            return false;
        }

        self.show(candidates);
        true
    }

    /// Move focus down, wrapping at the end
    pub fn focus_next(&mut self) {
        let len = self.candidates().len();
        if len > 0 {
            self.focus = (self.focus + 1) % len;
        }
    }

    /// Move focus up, wrapping at the start
    pub fn focus_prev(&mut self) {
        let len = self.candidates().len();
        if len > 0 {
            self.focus = (self.focus + len - 1) % len;
        }
    }

    /// Commit the focused candidate
    pub fn commit(&mut self) -> Option<MentionCommit> {
        self.select(self.focus)
    }

    /// Commit the candidate at `index` (e.g. clicked)
    pub fn select(&mut self, index: usize) -> Option<MentionCommit> {
        let candidate = self.candidates().get(index)?.clone();
        let query = self.query.take()?;
        self.cancel();
        Some(MentionCommit { query, candidate })
    }

    fn resolve(&mut self) -> MentionEffect {
        let Some(query) = self.query.as_ref().map(|q| q.query_text.clone()) else {
            return MentionEffect::None;
        };

        self.candidates.clear();
        self.focus = 0;

        if query.is_empty() {
            self.phase = MentionPhase::Composing;
            return MentionEffect::None;
        }

        if let Some(hit) = self.cache.get(&query) {
            let hit = hit.to_vec();
            tracing::trace!(target: "mention", query, "cache hit");
            self.show(hit);
            return MentionEffect::None;
        }

        self.phase = MentionPhase::Resolving;
        if self.in_flight.insert(query.clone()) {
            MentionEffect::Lookup(query)
        } else {
            MentionEffect::None
        }
    }

    fn show(&mut self, candidates: Vec<Candidate>) {
        if candidates.is_empty() {
            self.cancel();
            return;
        }
        self.phase = MentionPhase::Open;
        self.candidates = candidates;
        self.focus = 0;
    }
}
