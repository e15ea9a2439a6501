//! Command enum representing all bindable field actions
//!
//! Commands are the bridge between keybindings/toolbar buttons and the
//! message system. Each command maps to zero or more `Msg` values.

use std::str::FromStr;

use crate::editable::{EditAction, InlineFormat, ListKind};
use crate::messages::{EditMsg, HistoryMsg, MentionMsg, ModeMsg, Msg};

/// URL used when a link is inserted without one
pub const DEFAULT_LINK_URL: &str = "url";

/// Table size used when no size is given
pub const DEFAULT_TABLE_SIZE: (usize, usize) = (3, 3);

/// All actions that can be bound to a chord or a toolbar button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // ========================================================================
    // Inline formatting (wraps the selection)
    // ========================================================================
    Bold,
    Italic,
    Strikethrough,
    Underline,
    Spoiler,
    InlineCode,

    // ========================================================================
    // Line formatting
    // ========================================================================
    /// Toggle a heading; needs a `Level` payload
    Heading,
    Quote,
    BulletedList,
    NumberedList,
    CheckboxList,

    // ========================================================================
    // Insertion
    // ========================================================================
    Link,
    Table,
    /// Line break with list continuation
    InsertNewline,

    // ========================================================================
    // History & mode
    // ========================================================================
    Undo,
    Redo,
    ToggleMode,

    // ========================================================================
    // Mention panel
    // ========================================================================
    MentionNext,
    MentionPrev,
    MentionCommit,
    MentionCancel,

    /// Removes a binding when used in a user keymap
    Unbound,
}

/// Extra data carried by a binding or toolbar invocation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionPayload {
    Level(u8),
    Url(String),
    Table { rows: usize, cols: usize },
}

impl Command {
    /// The edit action this command performs, if it is an edit.
    ///
    /// Returns `None` for non-edit commands and for edits whose payload is
    /// missing or of the wrong kind.
    pub fn edit_action(self, payload: Option<&ActionPayload>) -> Option<EditAction> {
        let action = match (self, payload) {
            (Command::Bold, _) => EditAction::Inline(InlineFormat::Bold),
            (Command::Italic, _) => EditAction::Inline(InlineFormat::Italic),
            (Command::Strikethrough, _) => EditAction::Inline(InlineFormat::Strikethrough),
            (Command::Underline, _) => EditAction::Inline(InlineFormat::Underline),
            (Command::Spoiler, _) => EditAction::Inline(InlineFormat::Spoiler),
            (Command::InlineCode, _) => EditAction::Inline(InlineFormat::Code),
            (Command::Heading, Some(ActionPayload::Level(level))) => EditAction::Heading(*level),
            (Command::Quote, _) => EditAction::Quote,
            (Command::BulletedList, _) => EditAction::List(ListKind::Bulleted),
            (Command::NumberedList, _) => EditAction::List(ListKind::Numbered),
            (Command::CheckboxList, _) => EditAction::List(ListKind::Checkbox),
            (Command::Link, None) => EditAction::Link {
                url: DEFAULT_LINK_URL.to_string(),
            },
            (Command::Link, Some(ActionPayload::Url(url))) => EditAction::Link { url: url.clone() },
            (Command::Table, None) => EditAction::Table {
                rows: DEFAULT_TABLE_SIZE.0,
                cols: DEFAULT_TABLE_SIZE.1,
            },
            (Command::Table, Some(ActionPayload::Table { rows, cols })) => EditAction::Table {
                rows: *rows,
                cols: *cols,
            },
            (Command::InsertNewline, _) => EditAction::InsertNewline,
            _ => return None,
        };
        Some(action)
    }

    /// Translate into messages for the update loop
    pub fn to_msgs(self, payload: Option<&ActionPayload>) -> Vec<Msg> {
        if let Some(action) = self.edit_action(payload) {
            return vec![Msg::Edit(EditMsg::Apply(action))];
        }

        match self {
            Command::Undo => vec![Msg::History(HistoryMsg::Undo)],
            Command::Redo => vec![Msg::History(HistoryMsg::Redo)],
            Command::ToggleMode => vec![Msg::Mode(ModeMsg::Toggle)],
            Command::MentionNext => vec![Msg::Mention(MentionMsg::FocusNext)],
            Command::MentionPrev => vec![Msg::Mention(MentionMsg::FocusPrev)],
            Command::MentionCommit => vec![Msg::Mention(MentionMsg::Commit)],
            Command::MentionCancel => vec![Msg::Mention(MentionMsg::Cancel)],
            Command::Unbound => vec![],
            _ => {
                tracing::warn!(
                    "Ignoring {:?} with malformed payload {:?}",
                    self,
                    payload
                );
                vec![]
            }
        }
    }

    /// Check if this command may fire on every key repeat
    pub fn is_repeatable(self) -> bool {
        matches!(
            self,
            Command::InsertNewline
                | Command::MentionNext
                | Command::MentionPrev
                | Command::MentionCommit
                | Command::MentionCancel
        )
    }

    /// Check if this command drives the mention panel
    pub fn is_mention_navigation(self) -> bool {
        matches!(
            self,
            Command::MentionNext
                | Command::MentionPrev
                | Command::MentionCommit
                | Command::MentionCancel
        )
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bold" => Ok(Command::Bold),
            "Italic" => Ok(Command::Italic),
            "Strikethrough" => Ok(Command::Strikethrough),
            "Underline" => Ok(Command::Underline),
            "Spoiler" => Ok(Command::Spoiler),
            "InlineCode" => Ok(Command::InlineCode),
            "Heading" => Ok(Command::Heading),
            "Quote" => Ok(Command::Quote),
            "BulletedList" => Ok(Command::BulletedList),
            "NumberedList" => Ok(Command::NumberedList),
            "CheckboxList" => Ok(Command::CheckboxList),
            "Link" => Ok(Command::Link),
            "Table" => Ok(Command::Table),
            "InsertNewline" => Ok(Command::InsertNewline),
            "Undo" => Ok(Command::Undo),
            "Redo" => Ok(Command::Redo),
            "ToggleMode" => Ok(Command::ToggleMode),
            "MentionNext" => Ok(Command::MentionNext),
            "MentionPrev" => Ok(Command::MentionPrev),
            "MentionCommit" => Ok(Command::MentionCommit),
            "MentionCancel" => Ok(Command::MentionCancel),
            "Unbound" => Ok(Command::Unbound),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_command_to_msgs() {
        let msgs = Command::Bold.to_msgs(None);
        assert_eq!(
            msgs,
            vec![Msg::Edit(EditMsg::Apply(EditAction::Inline(
                InlineFormat::Bold
            )))]
        );
    }

    #[test]
    fn test_heading_requires_level() {
        assert!(Command::Heading.to_msgs(None).is_empty());
        assert!(Command::Heading
            .to_msgs(Some(&ActionPayload::Url("x".into())))
            .is_empty());
        assert_eq!(
            Command::Heading.to_msgs(Some(&ActionPayload::Level(2))),
            vec![Msg::Edit(EditMsg::Apply(EditAction::Heading(2)))]
        );
    }

    #[test]
    fn test_link_and_table_defaults() {
        assert_eq!(
            Command::Link.edit_action(None),
            Some(EditAction::Link {
                url: DEFAULT_LINK_URL.to_string()
            })
        );
        assert_eq!(
            Command::Table.edit_action(None),
            Some(EditAction::Table { rows: 3, cols: 3 })
        );
        assert_eq!(
            Command::Table.edit_action(Some(&ActionPayload::Level(1))),
            None
        );
    }

    #[test]
    fn test_non_edit_commands() {
        assert_eq!(
            Command::Undo.to_msgs(None),
            vec![Msg::History(HistoryMsg::Undo)]
        );
        assert_eq!(
            Command::ToggleMode.to_msgs(None),
            vec![Msg::Mode(ModeMsg::Toggle)]
        );
        assert!(Command::Unbound.to_msgs(None).is_empty());
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(Command::from_str("Bold"), Ok(Command::Bold));
        assert_eq!(Command::from_str("MentionCommit"), Ok(Command::MentionCommit));
        assert_eq!(Command::from_str("SaveFile"), Err(()));
    }
}
