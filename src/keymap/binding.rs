//! Keybinding struct representing a mapping from a chord to a command

use super::command::{ActionPayload, Command};
use super::context::Condition;
use super::types::Keystroke;

/// A single keybinding mapping one chord to a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub keystroke: Keystroke,
    pub command: Command,
    /// Extra data for commands that take it (heading level, link URL, table size)
    pub payload: Option<ActionPayload>,
    /// Conditions that must be true for this binding to activate
    pub when: Option<Vec<Condition>>,
}

impl Keybinding {
    pub fn new(keystroke: Keystroke, command: Command) -> Self {
        Self {
            keystroke,
            command,
            payload: None,
            when: None,
        }
    }

    /// Attach a payload (builder pattern)
    pub fn with_payload(mut self, payload: ActionPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Add conditions to this binding (builder pattern)
    pub fn when(mut self, conditions: Vec<Condition>) -> Self {
        self.when = Some(conditions);
        self
    }

    /// Add a single condition to this binding
    pub fn when_single(mut self, condition: Condition) -> Self {
        self.when = Some(vec![condition]);
        self
    }

    /// Check if this binding is for the same chord under the same conditions
    pub fn same_trigger(&self, other: &Keybinding) -> bool {
        self.keystroke == other.keystroke && self.when == other.when
    }

    pub fn display_string(&self) -> String {
        self.keystroke.display_string()
    }
}
