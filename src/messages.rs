//! Message types for the Elm-style update loop
//!
//! Every state change in a field goes through one of these messages.

use crate::editable::{EditAction, Selection};
use crate::mention::{Candidate, LookupError};
use crate::mode::EditMode;

/// Top-level message
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Edit(EditMsg),
    History(HistoryMsg),
    Mention(MentionMsg),
    Mode(ModeMsg),
    Field(FieldMsg),
}

/// Text changes and cursor moves
#[derive(Debug, Clone, PartialEq)]
pub enum EditMsg {
    /// A character typed by the user
    InsertChar(char),
    /// Text inserted in one go (paste, completion)
    InsertText(String),
    /// Backspace
    DeleteBackward,
    /// Cursor/selection moved without changing text
    SetSelection(Selection),
    /// The active surface changed the text itself
    Replace { text: String, selection: Selection },
    /// Toolbar or shortcut action
    Apply(EditAction),
}

/// Undo/redo and coalescing timers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryMsg {
    Undo,
    Redo,
    /// The typing pause for `revision` elapsed
    CommitReady { revision: u64 },
}

/// Mention panel navigation and lookup results
#[derive(Debug, Clone, PartialEq)]
pub enum MentionMsg {
    FocusNext,
    FocusPrev,
    /// Commit the focused candidate
    Commit,
    /// Commit the candidate at this index (click)
    Select(usize),
    Cancel,
    Resolved {
        query: String,
        result: Result<Vec<Candidate>, LookupError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeMsg {
    Toggle,
    Set(EditMode),
}

/// Field lifecycle and outward propagation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldMsg {
    /// The notify debounce for `revision` elapsed
    NotifyReady { revision: u64 },
    /// The owning form replaced the value (e.g. reset)
    ExternalReset(String),
    /// The field is being torn down
    Unmount,
}
