//! Pure markdown transforms over a text value and a selection.
//!
//! Every function takes the current value plus a [`Selection`] and returns a
//! fresh [`Edit`]; nothing here holds state or reads focus from a surface.
//! Offsets are clamped to the text, so malformed selections never panic.

use std::sync::LazyLock;

use regex::Regex;

use super::buffer::{char_len, RopeBuffer};
use super::selection::Selection;

/// Numbered list item: `1. item`
static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(\d+)\.\s").expect("valid numbered-item pattern"));

/// Checkbox item: `- [ ] item` / `- [x] item`
static CHECKBOX_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([-*]) \[[ xX]\] ").expect("valid checkbox pattern"));

/// Bulleted item: `- item` / `* item`
static BULLETED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([-*]) ").expect("valid bullet pattern"));

/// Any list marker, used when converting lines between list kinds
static ANY_LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)(?:[-*] \[[ xX]\] |[-*] |\d+\.\s)").expect("valid list-marker pattern")
});

/// Result of a transform: the new value and where the selection ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub selection: Selection,
}

impl Edit {
    pub fn new(text: impl Into<String>, selection: Selection) -> Self {
        Self {
            text: text.into(),
            selection,
        }
    }
}

/// Recoverable, user-visible editing failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// A wrapping format was requested with nothing selected
    #[error("Select some text to apply this format")]
    NoSelection,
}

/// Outcome of a line-break request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continuation {
    pub edit: Edit,
    /// False when the line was not a list item and a plain newline was used
    pub handled: bool,
}

/// Insert `marker` at the cursor, replacing any selected text.
///
/// The cursor ends up just after the inserted text.
pub fn insert_at_cursor(text: &str, selection: Selection, marker: &str) -> Edit {
    let mut buf = RopeBuffer::from_text(text);
    let sel = selection.clamp(buf.len_chars());
    buf.replace(sel.start..sel.end, marker);
    Edit::new(
        buf.content(),
        Selection::collapsed(sel.start + char_len(marker)),
    )
}

/// Wrap the selected text with `prefix` and `suffix`.
///
/// The returned selection covers exactly the original text, markers excluded.
pub fn pad_selection(
    text: &str,
    selection: Selection,
    prefix: &str,
    suffix: &str,
) -> Result<Edit, EditError> {
    let mut buf = RopeBuffer::from_text(text);
    let sel = selection.clamp(buf.len_chars());
    if sel.is_collapsed() {
        return Err(EditError::NoSelection);
    }

    buf.insert(sel.end, suffix);
    buf.insert(sel.start, prefix);

    let shift = char_len(prefix);
    Ok(Edit::new(
        buf.content(),
        Selection::new(sel.start + shift, sel.end + shift),
    ))
}

/// Add or remove `prefix` at the start of the line containing `selection.start`.
///
/// Only that one line is touched, even when the selection spans several.
pub fn toggle_line_prefix(text: &str, selection: Selection, prefix: &str) -> Edit {
    let mut buf = RopeBuffer::from_text(text);
    let sel = selection.clamp(buf.len_chars());
    let line = buf.line_range_at(sel.start);
    let line_text = buf.slice(line.clone());
    let prefix_len = char_len(prefix);

    let adjust: Box<dyn Fn(usize) -> usize> = if line_text.starts_with(prefix) {
        buf.remove(line.start..line.start + prefix_len);
        Box::new(move |offset| {
            if offset <= line.start {
                offset
            } else if offset < line.start + prefix_len {
                line.start
            } else {
                offset - prefix_len
            }
        })
    } else {
        buf.insert(line.start, prefix);
        Box::new(move |offset| {
            if offset < line.start {
                offset
            } else {
                offset + prefix_len
            }
        })
    };

    Edit::new(
        buf.content(),
        Selection::new(adjust(sel.start), adjust(sel.end)),
    )
}

/// Rewrite every line overlapping the selection with `transform(line, index)`.
///
/// `index` counts from 0 within the selection. A non-collapsed selection that
/// ends exactly at the start of a line does not pull that line in. The
/// returned selection covers the whole rewritten span.
pub fn apply_to_lines<F>(text: &str, selection: Selection, mut transform: F) -> Edit
where
    F: FnMut(&str, usize) -> String,
{
    let mut buf = RopeBuffer::from_text(text);
    let sel = selection.clamp(buf.len_chars());

    let first = buf.line_of(sel.start);
    let mut last = buf.line_of(sel.end);
    if last > first && !sel.is_collapsed() && buf.line_start(last) == sel.end {
        last -= 1;
    }

    let span = buf.line_start(first)..buf.line_end(last);
    let rewritten: Vec<_> = (first..=last)
        .enumerate()
        .map(|(index, line)| {
            let range = buf.line_start(line)..buf.line_end(line);
            let new_text = transform(&buf.slice(range.clone()), index);
            (range, new_text)
        })
        .collect();

    // Line separators between the rewritten lines are left as they were
    let mut span_end = span.end;
    for (range, new_text) in rewritten.into_iter().rev() {
        span_end = span_end + char_len(&new_text) - range.len();
        buf.replace(range, &new_text);
    }

    Edit::new(buf.content(), Selection::new(span.start, span_end))
}

/// Build the markdown skeleton for a `rows` x `cols` table (no trailing newline).
pub fn table_skeleton(rows: usize, cols: usize) -> String {
    let rows = rows.max(1);
    let cols = cols.max(1);

    let row = |cell: &str| format!("| {} |", vec![cell; cols].join(" | "));
    let mut lines = Vec::with_capacity(rows + 2);
    lines.push(row("Header"));
    lines.push(row("---"));
    lines.extend(std::iter::repeat_with(|| row("")).take(rows));
    lines.join("\n")
}

/// Insert a table skeleton at `offset`, followed by a newline.
///
/// A newline is prepended when `offset` is mid-line so the table starts on a
/// line of its own.
pub fn insert_table(text: &str, offset: usize, rows: usize, cols: usize) -> Edit {
    let buf = RopeBuffer::from_text(text);
    let offset = buf.clamp(offset);
    let lead = match buf.char_before(offset) {
        Some(ch) if ch != '\n' => "\n",
        _ => "",
    };
    let block = format!("{lead}{}\n", table_skeleton(rows, cols));
    insert_at_cursor(text, Selection::collapsed(offset), &block)
}

/// Marker that continues the list item on `line`, if it is one.
pub fn continuation_marker(line: &str) -> Option<String> {
    if let Some(caps) = NUMBERED_ITEM.captures(line) {
        let number: u64 = caps[2].parse().ok()?;
        return Some(format!("{}{}. ", &caps[1], number.checked_add(1)?));
    }
    if let Some(caps) = CHECKBOX_ITEM.captures(line) {
        return Some(format!("{}{} [ ] ", &caps[1], &caps[2]));
    }
    if let Some(caps) = BULLETED_ITEM.captures(line) {
        return Some(format!("{}{} ", &caps[1], &caps[2]));
    }
    None
}

/// Handle a line break, continuing the list on the current line if any.
pub fn continue_list_on_enter(text: &str, selection: Selection) -> Continuation {
    let buf = RopeBuffer::from_text(text);
    let sel = selection.clamp(buf.len_chars());
    let line = buf.slice(buf.line_range_at(sel.start));

    match continuation_marker(&line) {
        Some(marker) => Continuation {
            edit: insert_at_cursor(text, sel, &format!("\n{marker}")),
            handled: true,
        },
        None => Continuation {
            edit: insert_at_cursor(text, sel, "\n"),
            handled: false,
        },
    }
}

/// Delete the selection, or the character before a collapsed cursor.
pub fn delete_backward(text: &str, selection: Selection) -> Edit {
    let mut buf = RopeBuffer::from_text(text);
    let sel = selection.clamp(buf.len_chars());
    let range = if sel.is_collapsed() {
        sel.start.saturating_sub(1)..sel.start
    } else {
        sel.start..sel.end
    };
    buf.remove(range.clone());
    Edit::new(buf.content(), Selection::collapsed(range.start))
}

/// Split a line into its leading indentation and the text after any list marker.
pub fn strip_list_marker(line: &str) -> (&str, &str) {
    match ANY_LIST_MARKER.captures(line) {
        Some(caps) => {
            let indent = caps.get(1).map_or("", |m| m.as_str());
            let marker_end = caps.get(0).map_or(0, |m| m.end());
            (indent, &line[marker_end..])
        }
        None => {
            let rest = line.trim_start();
            (&line[..line.len() - rest.len()], rest)
        }
    }
}

/// Check if `line` is already a checkbox item
pub fn is_checkbox_item(line: &str) -> bool {
    CHECKBOX_ITEM.is_match(line)
}
