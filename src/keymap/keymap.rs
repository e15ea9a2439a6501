//! Keymap struct for storing and looking up keybindings

use std::collections::HashMap;

use super::binding::Keybinding;
use super::command::{ActionPayload, Command};
use super::context::{Condition, KeyContext};
use super::types::Keystroke;

/// Result of looking up a keystroke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Execute this command with its bound payload
    Execute(Command, Option<ActionPayload>),
    /// No binding matches this keystroke
    NoMatch,
}

/// The keymap stores all keybindings and handles lookup
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    /// All registered bindings
    bindings: Vec<Keybinding>,
    /// Fast lookup (indices into bindings)
    /// Multiple bindings can share the same keystroke with different conditions
    lookup: HashMap<Keystroke, Vec<usize>>,
}

impl Keymap {
    /// Create an empty keymap
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a keymap with the given bindings
    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    /// Add a binding to the keymap
    pub fn add_binding(&mut self, binding: Keybinding) {
        let idx = self.bindings.len();
        self.lookup.entry(binding.keystroke).or_default().push(idx);
        self.bindings.push(binding);
    }

    /// Handle a keystroke under the given context
    ///
    /// Bindings with conditions are checked before unconditional ones; within
    /// each group the first registered binding wins.
    pub fn handle_keystroke(&self, keystroke: Keystroke, context: &KeyContext) -> KeyAction {
        match self.find_matching_binding(&keystroke, Some(context)) {
            Some(binding) => KeyAction::Execute(binding.command, binding.payload.clone()),
            None => KeyAction::NoMatch,
        }
    }

    fn find_matching_binding(
        &self,
        keystroke: &Keystroke,
        context: Option<&KeyContext>,
    ) -> Option<&Keybinding> {
        let indices = self.lookup.get(keystroke)?;

        // First pass: find bindings with conditions that match
        for &idx in indices {
            let binding = &self.bindings[idx];
            if let Some(ref conditions) = binding.when {
                if let Some(ctx) = context {
                    if Condition::evaluate_all(conditions, ctx) {
                        return Some(binding);
                    }
                }
                // If no context provided but binding has conditions, skip it
            }
        }

        // Second pass: find unconditional bindings
        indices
            .iter()
            .map(|&idx| &self.bindings[idx])
            .find(|binding| binding.when.is_none())
    }

    /// Look up a keystroke ignoring conditional bindings
    pub fn lookup(&self, keystroke: &Keystroke) -> Option<Command> {
        self.find_matching_binding(keystroke, None)
            .map(|binding| binding.command)
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// Get the keybinding for a command (first match)
    pub fn binding_for(&self, command: Command) -> Option<&Keybinding> {
        self.bindings.iter().find(|b| b.command == command)
    }

    /// Shortcut label for a toolbar button tooltip
    pub fn display_for(&self, command: Command) -> Option<String> {
        self.binding_for(command).map(|b| b.display_string())
    }
}
