//! Text editing tests - markdown actions through the update loop

mod common;

use common::{test_model, type_text};
use markfield::editable::{EditAction, InlineFormat, ListKind, Selection};
use markfield::messages::{EditMsg, Msg};
use markfield::update::update;
use markfield::Cmd;

fn apply(model: &mut markfield::FieldModel, action: EditAction) -> Option<Cmd> {
    update(model, Msg::Edit(EditMsg::Apply(action)))
}

// ========================================================================
// Inline formatting
// ========================================================================

#[test]
fn test_bold_wraps_selection_and_keeps_it() {
    let mut model = test_model("a bold word", 2, 6);
    apply(&mut model, EditAction::Inline(InlineFormat::Bold));

    assert_eq!(model.value, "a **bold** word");
    assert_eq!(model.selection, Selection::new(4, 8));
}

#[test]
fn test_each_inline_marker() {
    let cases = [
        (InlineFormat::Italic, "*x*"),
        (InlineFormat::Strikethrough, "~~x~~"),
        (InlineFormat::Underline, "<u>x</u>"),
        (InlineFormat::Spoiler, ">!x!<"),
        (InlineFormat::Code, "`x`"),
    ];
    for (format, expected) in cases {
        let mut model = test_model("x", 0, 1);
        apply(&mut model, EditAction::Inline(format));
        assert_eq!(model.value, expected, "{:?}", format);
    }
}

#[test]
fn test_inline_format_without_selection_is_rejected() {
    let mut model = test_model("plain", 2, 2);
    let cmd = apply(&mut model, EditAction::Inline(InlineFormat::Italic));

    assert!(matches!(cmd, Some(Cmd::ShowNotice { .. })));
    assert_eq!(model.value, "plain");
    assert_eq!(model.history.entries().len(), 1);
}

#[test]
fn test_bold_on_multibyte_text_uses_char_offsets() {
    let mut model = test_model("héllo wörld", 6, 11);
    apply(&mut model, EditAction::Inline(InlineFormat::Bold));
    assert_eq!(model.value, "héllo **wörld**");
}

// ========================================================================
// Line formatting
// ========================================================================

#[test]
fn test_heading_toggle_is_idempotent_pair() {
    let mut model = test_model("title\nbody", 2, 2);
    apply(&mut model, EditAction::Heading(2));
    assert_eq!(model.value, "## title\nbody");
    assert_eq!(model.selection, Selection::collapsed(5));

    apply(&mut model, EditAction::Heading(2));
    assert_eq!(model.value, "title\nbody");
    assert_eq!(model.selection, Selection::collapsed(2));
}

#[test]
fn test_quote_on_second_line() {
    let mut model = test_model("one\ntwo", 5, 5);
    apply(&mut model, EditAction::Quote);
    assert_eq!(model.value, "one\n> two");
}

#[test]
fn test_numbered_list_over_selection() {
    let mut model = test_model("milk\neggs\nbread", 0, 15);
    apply(&mut model, EditAction::List(ListKind::Numbered));
    assert_eq!(model.value, "1. milk\n2. eggs\n3. bread");
}

#[test]
fn test_converting_bullets_to_checkboxes() {
    let mut model = test_model("- a\n- b", 0, 7);
    apply(&mut model, EditAction::List(ListKind::Checkbox));
    assert_eq!(model.value, "- [ ] a\n- [ ] b");
}

// ========================================================================
// Insertion
// ========================================================================

#[test]
fn test_link_with_selection() {
    let mut model = test_model("see docs", 4, 8);
    apply(
        &mut model,
        EditAction::Link {
            url: "https://example.com".into(),
        },
    );
    assert_eq!(model.value, "see [docs](https://example.com)");
}

#[test]
fn test_link_at_cursor() {
    let mut model = test_model("", 0, 0);
    apply(&mut model, EditAction::Link { url: "url".into() });
    assert_eq!(model.value, "[url](url)");
    assert_eq!(model.selection, Selection::collapsed(10));
}

#[test]
fn test_table_shape() {
    let mut model = test_model("", 0, 0);
    apply(&mut model, EditAction::Table { rows: 2, cols: 3 });

    let lines: Vec<&str> = model.value.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "| Header | Header | Header |");
    assert_eq!(lines[1], "| --- | --- | --- |");
    assert!(model.value.ends_with('\n'));
}

#[test]
fn test_table_mid_line_starts_on_new_line() {
    let mut model = test_model("intro", 5, 5);
    apply(&mut model, EditAction::Table { rows: 1, cols: 1 });
    assert!(model.value.starts_with("intro\n| Header |"));
}

// ========================================================================
// Typing
// ========================================================================

#[test]
fn test_enter_continues_numbered_list() {
    let mut model = test_model("1. first", 8, 8);
    type_text(&mut model, "\n");
    assert_eq!(model.value, "1. first\n2. ");
}

#[test]
fn test_enter_continues_checkbox_unchecked() {
    let mut model = test_model("  - [x] done", 12, 12);
    type_text(&mut model, "\n");
    assert_eq!(model.value, "  - [x] done\n  - [ ] ");
}

#[test]
fn test_enter_on_plain_line() {
    let mut model = test_model("text", 4, 4);
    type_text(&mut model, "\nmore");
    assert_eq!(model.value, "text\nmore");
}

#[test]
fn test_backspace_deletes_selection() {
    let mut model = test_model("hello world", 5, 11);
    update(&mut model, Msg::Edit(EditMsg::DeleteBackward));
    assert_eq!(model.value, "hello");
    assert_eq!(model.selection, Selection::collapsed(5));
}

#[test]
fn test_selection_is_clamped() {
    let mut model = test_model("abc", 0, 0);
    update(
        &mut model,
        Msg::Edit(EditMsg::SetSelection(Selection::new(1, 99))),
    );
    assert_eq!(model.selection, Selection::new(1, 3));
}
