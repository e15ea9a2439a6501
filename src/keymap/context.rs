//! Context system for conditional keybindings
//!
//! Enables bindings that only activate under certain conditions,
//! such as "Enter commits the mention while the panel is open".

use serde::Deserialize;

/// Field state relevant to keybinding evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    /// Whether there's an active text selection
    pub has_selection: bool,
    /// Whether the mention panel is showing candidates
    pub mention_open: bool,
    /// Whether a mention query is being composed (panel open or not)
    pub composing: bool,
    /// Whether the structured surface is active
    pub structured_mode: bool,
}

/// Conditions that can be attached to keybindings
///
/// Multiple conditions on a binding are ANDed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    HasSelection,
    NoSelection,
    /// Binding only active while candidates are listed
    MentionOpen,
    /// Binding only active when no mention is being composed
    MentionInactive,
    /// Binding only active while a mention query is being typed
    Composing,
    StructuredMode,
    SourceMode,
}

impl Condition {
    /// Evaluate this condition against the current context
    pub fn evaluate(self, ctx: &KeyContext) -> bool {
        match self {
            Condition::HasSelection => ctx.has_selection,
            Condition::NoSelection => !ctx.has_selection,
            Condition::MentionOpen => ctx.mention_open,
            Condition::MentionInactive => !ctx.composing,
            Condition::Composing => ctx.composing,
            Condition::StructuredMode => ctx.structured_mode,
            Condition::SourceMode => !ctx.structured_mode,
        }
    }

    /// Evaluate all conditions (AND logic)
    pub fn evaluate_all(conditions: &[Condition], ctx: &KeyContext) -> bool {
        conditions.iter().all(|c| c.evaluate(ctx))
    }
}
