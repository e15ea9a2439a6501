//! Markdown edit actions and their mapping onto the pure transforms.

use std::collections::BTreeSet;

use super::selection::Selection;
use super::transform::{
    apply_to_lines, continue_list_on_enter, insert_at_cursor, insert_table, is_checkbox_item,
    pad_selection, strip_list_marker, toggle_line_prefix, Edit, EditError,
};

/// Inline formats applied by wrapping the selection in markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InlineFormat {
    Bold,
    Italic,
    Strikethrough,
    Underline,
    Spoiler,
    Code,
}

impl InlineFormat {
    /// Opening and closing markers
    pub const fn markers(self) -> (&'static str, &'static str) {
        match self {
            InlineFormat::Bold => ("**", "**"),
            InlineFormat::Italic => ("*", "*"),
            InlineFormat::Strikethrough => ("~~", "~~"),
            InlineFormat::Underline => ("<u>", "</u>"),
            InlineFormat::Spoiler => (">!", "!<"),
            InlineFormat::Code => ("`", "`"),
        }
    }
}

/// Line-level list conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Bulleted,
    Numbered,
    Checkbox,
}

impl ListKind {
    /// Rewrite one line as an item of this kind (`index` is 0-based)
    pub fn convert_line(self, line: &str, index: usize) -> String {
        if self == ListKind::Checkbox && is_checkbox_item(line) {
            return line.to_string();
        }
        let (indent, rest) = strip_list_marker(line);
        match self {
            ListKind::Bulleted => format!("{indent}- {rest}"),
            ListKind::Numbered => format!("{indent}{}. {rest}", index + 1),
            ListKind::Checkbox => format!("{indent}- [ ] {rest}"),
        }
    }
}

/// A markdown editing action, independent of how it was triggered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditAction {
    Inline(InlineFormat),
    /// Heading of the given level (clamped to 1..=6)
    Heading(u8),
    Quote,
    List(ListKind),
    Link { url: String },
    Table { rows: usize, cols: usize },
    InsertText(String),
    /// Line break with list continuation
    InsertNewline,
}

/// Heading prefix for `level`, e.g. `"## "`
pub fn heading_prefix(level: u8) -> String {
    format!("{} ", "#".repeat(usize::from(level.clamp(1, 6))))
}

pub const QUOTE_PREFIX: &str = "> ";

/// Apply an action to `text` at `selection`.
pub fn apply(action: &EditAction, text: &str, selection: Selection) -> Result<Edit, EditError> {
    match action {
        EditAction::Inline(format) => {
            let (prefix, suffix) = format.markers();
            pad_selection(text, selection, prefix, suffix)
        }
        EditAction::Heading(level) => Ok(toggle_line_prefix(
            text,
            selection,
            &heading_prefix(*level),
        )),
        EditAction::Quote => Ok(toggle_line_prefix(text, selection, QUOTE_PREFIX)),
        EditAction::List(kind) => Ok(apply_to_lines(text, selection, |line, index| {
            kind.convert_line(line, index)
        })),
        EditAction::Link { url } => {
            if selection.is_collapsed() {
                Ok(insert_at_cursor(text, selection, &format!("[{url}]({url})")))
            } else {
                pad_selection(text, selection, "[", &format!("]({url})"))
            }
        }
        EditAction::Table { rows, cols } => Ok(insert_table(text, selection.end, *rows, *cols)),
        EditAction::InsertText(s) => Ok(insert_at_cursor(text, selection, s)),
        EditAction::InsertNewline => Ok(continue_list_on_enter(text, selection).edit),
    }
}

/// Toolbar highlighting state: which actions are "on" at the caret.
///
/// Only meaningful for the structured surface; the source surface always
/// reports [`ActiveFormats::none`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFormats {
    pub inline: BTreeSet<InlineFormat>,
    pub heading: Option<u8>,
    pub quote: bool,
    pub list: Option<ListKind>,
    pub link: bool,
}

impl ActiveFormats {
    /// All-false state
    pub fn none() -> Self {
        Self::default()
    }

    /// Check if nothing is active
    pub fn is_empty(&self) -> bool {
        *self == Self::none()
    }

    /// Check if the toolbar control for `action` should be highlighted
    pub fn is_active(&self, action: &EditAction) -> bool {
        match action {
            EditAction::Inline(format) => self.inline.contains(format),
            EditAction::Heading(level) => self.heading == Some(*level),
            EditAction::Quote => self.quote,
            EditAction::List(kind) => self.list == Some(*kind),
            EditAction::Link { .. } => self.link,
            EditAction::Table { .. } | EditAction::InsertText(_) | EditAction::InsertNewline => {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_prefix_clamps_level() {
        assert_eq!(heading_prefix(0), "# ");
        assert_eq!(heading_prefix(2), "## ");
        assert_eq!(heading_prefix(9), "###### ");
    }

    #[test]
    fn test_inline_formats() {
        let sel = Selection::new(0, 4);
        let cases = [
            (InlineFormat::Italic, "*word*"),
            (InlineFormat::Strikethrough, "~~word~~"),
            (InlineFormat::Underline, "<u>word</u>"),
            (InlineFormat::Spoiler, ">!word!<"),
            (InlineFormat::Code, "`word`"),
        ];
        for (format, expected) in cases {
            let edit = apply(&EditAction::Inline(format), "word", sel).unwrap();
            assert_eq!(edit.text, expected, "{:?}", format);
        }
    }

    #[test]
    fn test_numbered_list_renumbers_from_one() {
        let text = "5. five\n- bullet\nplain";
        let action = EditAction::List(ListKind::Numbered);
        let edit = apply(&action, text, Selection::new(0, 20)).unwrap();
        assert_eq!(edit.text, "1. five\n2. bullet\n3. plain");

        // Re-applying to its own output is a fixed point
        let again = apply(&action, &edit.text, edit.selection).unwrap();
        assert_eq!(again, edit);
    }

    #[test]
    fn test_checkbox_list_keeps_checked_items() {
        let edit = apply(
            &EditAction::List(ListKind::Checkbox),
            "- [x] done\ntodo",
            Selection::new(0, 12),
        )
        .unwrap();
        assert_eq!(edit.text, "- [x] done\n- [ ] todo");
    }

    #[test]
    fn test_bulleted_list_replaces_numbers() {
        let edit = apply(
            &EditAction::List(ListKind::Bulleted),
            "1. a\n2. b",
            Selection::new(0, 7),
        )
        .unwrap();
        assert_eq!(edit.text, "- a\n- b");
    }

    #[test]
    fn test_link_with_and_without_selection() {
        let action = EditAction::Link {
            url: "https://example.com".to_string(),
        };
        let edit = apply(&action, "see docs", Selection::new(4, 8)).unwrap();
        assert_eq!(edit.text, "see [docs](https://example.com)");
        assert_eq!(edit.selection, Selection::new(5, 9));

        let edit = apply(&action, "", Selection::collapsed(0)).unwrap();
        assert_eq!(edit.text, "[https://example.com](https://example.com)");
    }

    #[test]
    fn test_active_formats_none_is_all_false() {
        let active = ActiveFormats::none();
        assert!(active.is_empty());
        assert!(!active.is_active(&EditAction::Inline(InlineFormat::Bold)));
        assert!(!active.is_active(&EditAction::Heading(1)));
    }
}
