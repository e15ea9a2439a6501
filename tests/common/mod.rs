//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use markfield::config::FieldConfig;
use markfield::editable::Selection;
use markfield::mention::{Candidate, LookupError, MentionLookup};
use markfield::messages::{EditMsg, Msg};
use markfield::runtime::{FieldRuntime, RecordingHost};
use markfield::update::update;
use markfield::FieldModel;

/// Config with short timers so runtime tests finish quickly
pub fn fast_config() -> FieldConfig {
    FieldConfig {
        commit_pause_ms: 40,
        notify_debounce_ms: 30,
        ..FieldConfig::default()
    }
}

/// Create a test model with the given text and selection
pub fn test_model(text: &str, start: usize, end: usize) -> FieldModel {
    let mut model = FieldModel::new(text, FieldConfig::default());
    model.selection = Selection::new(start, end);
    model
}

/// Type each character through the update loop
pub fn type_text(model: &mut FieldModel, text: &str) {
    for ch in text.chars() {
        update(model, Msg::Edit(EditMsg::InsertChar(ch)));
    }
}

/// Directory lookup over a fixed list, counting calls
#[derive(Debug, Default)]
pub struct Directory {
    pub people: Vec<Candidate>,
    pub calls: AtomicUsize,
}

impl Directory {
    pub fn new(people: &[(&str, &str)]) -> Self {
        Self {
            people: people
                .iter()
                .map(|(id, label)| Candidate::new(*id, *label))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MentionLookup for Directory {
    fn lookup(&self, query: &str) -> Result<Vec<Candidate>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .people
            .iter()
            .filter(|c| c.label.starts_with(query))
            .cloned()
            .collect())
    }
}

pub fn team() -> Arc<Directory> {
    Arc::new(Directory::new(&[
        ("u1", "ada"),
        ("u2", "alan"),
        ("u3", "grace"),
    ]))
}

pub fn runtime_with(lookup: Arc<Directory>) -> FieldRuntime<RecordingHost> {
    FieldRuntime::new(
        FieldModel::new("", fast_config()),
        RecordingHost::default(),
        lookup,
    )
}
