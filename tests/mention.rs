//! Mention autocomplete tests - composition through the update loop

mod common;

use common::{test_model, type_text};
use markfield::editable::Selection;
use markfield::mention::{Candidate, LookupError, MentionPhase};
use markfield::messages::{EditMsg, MentionMsg, Msg};
use markfield::update::update;
use markfield::{Cmd, FieldModel};

fn people() -> Vec<Candidate> {
    vec![Candidate::new("u1", "ada"), Candidate::new("u2", "alan")]
}

fn resolve(model: &mut FieldModel, query: &str, result: Result<Vec<Candidate>, LookupError>) {
    update(
        model,
        Msg::Mention(MentionMsg::Resolved {
            query: query.to_string(),
            result,
        }),
    );
}

fn lookups(cmd: Option<Cmd>) -> Vec<String> {
    cmd.map(Cmd::into_vec)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|c| match c {
            Cmd::LookupMentions { query } => Some(query),
            _ => None,
        })
        .collect()
}

// ========================================================================
// Composition
// ========================================================================

#[test]
fn test_trigger_starts_composition_without_lookup() {
    let mut model = test_model("", 0, 0);
    let cmd = update(&mut model, Msg::Edit(EditMsg::InsertChar('@')));

    assert!(lookups(cmd).is_empty());
    assert_eq!(model.mention.phase(), MentionPhase::Composing);
}

#[test]
fn test_each_query_character_requests_lookup() {
    let mut model = test_model("", 0, 0);
    type_text(&mut model, "@");

    let cmd = update(&mut model, Msg::Edit(EditMsg::InsertChar('a')));
    assert_eq!(lookups(cmd), ["a"]);
    assert_eq!(model.mention.phase(), MentionPhase::Resolving);
}

#[test]
fn test_space_cancels_composition() {
    let mut model = test_model("", 0, 0);
    type_text(&mut model, "@al ");
    assert_eq!(model.mention.phase(), MentionPhase::Idle);
    assert_eq!(model.value, "@al ");
}

#[test]
fn test_backspace_over_trigger_cancels() {
    let mut model = test_model("", 0, 0);
    type_text(&mut model, "@a");
    update(&mut model, Msg::Edit(EditMsg::DeleteBackward));
    assert!(model.mention.is_active());

    update(&mut model, Msg::Edit(EditMsg::DeleteBackward));
    assert!(!model.mention.is_active());
    assert_eq!(model.value, "");
}

#[test]
fn test_moving_cursor_away_cancels() {
    let mut model = test_model("hi ", 3, 3);
    type_text(&mut model, "@al");
    update(
        &mut model,
        Msg::Edit(EditMsg::SetSelection(Selection::collapsed(1))),
    );
    assert!(!model.mention.is_active());
}

#[test]
fn test_cursor_at_query_end_keeps_composition() {
    let mut model = test_model("", 0, 0);
    type_text(&mut model, "@ab");
    update(
        &mut model,
        Msg::Edit(EditMsg::SetSelection(Selection::collapsed(3))),
    );
    assert!(model.mention.is_active());
    assert_eq!(model.mention.query().unwrap().query_text, "ab");
}

#[test]
fn test_typing_inside_query_does_not_drift() {
    let mut model = test_model("", 0, 0);
    type_text(&mut model, "@ab");
    update(
        &mut model,
        Msg::Edit(EditMsg::SetSelection(Selection::collapsed(2))),
    );

    let cmd = update(&mut model, Msg::Edit(EditMsg::InsertChar('x')));
    assert!(lookups(cmd).is_empty());
    assert_eq!(model.value, "@axb");
    assert!(!model.mention.is_active());
}

#[test]
fn test_backspace_inside_query_cancels() {
    let mut model = test_model("", 0, 0);
    type_text(&mut model, "@abc");
    // Cursor lands between "b" and "c" without a selection message
    model.selection = Selection::collapsed(3);

    let cmd = update(&mut model, Msg::Edit(EditMsg::DeleteBackward));
    assert!(lookups(cmd).is_empty());
    assert_eq!(model.value, "@ac");
    assert!(!model.mention.is_active());
}

#[test]
fn test_replacing_a_selection_cancels() {
    let mut model = test_model("", 0, 0);
    type_text(&mut model, "@ab");
    model.selection = Selection::new(1, 3);

    let cmd = update(&mut model, Msg::Edit(EditMsg::InsertChar('z')));
    assert!(lookups(cmd).is_empty());
    assert_eq!(model.value, "@z");
    assert!(!model.mention.is_active());
}

// ========================================================================
// Results
// ========================================================================

#[test]
fn test_result_opens_panel() {
    let mut model = test_model("", 0, 0);
    type_text(&mut model, "@a");
    resolve(&mut model, "a", Ok(people()));

    assert!(model.mention.is_open());
    assert_eq!(model.mention.candidates().len(), 2);
    assert_eq!(model.mention.focus_index(), 0);
}

#[test]
fn test_stale_result_is_ignored() {
    let mut model = test_model("", 0, 0);
    type_text(&mut model, "@al");
    resolve(&mut model, "a", Ok(people()));

    assert_eq!(model.mention.phase(), MentionPhase::Resolving);
    // Still cached for when the query returns to "a"
    assert!(model.mention.cache().contains("a"));
}

#[test]
fn test_cached_query_skips_lookup() {
    let mut model = test_model("", 0, 0);
    type_text(&mut model, "@a");
    resolve(&mut model, "a", Ok(people()));
    type_text(&mut model, "l");

    let cmd = update(&mut model, Msg::Edit(EditMsg::DeleteBackward));
    assert!(lookups(cmd).is_empty());
    assert!(model.mention.is_open());
}

#[test]
fn test_empty_result_closes() {
    let mut model = test_model("", 0, 0);
    type_text(&mut model, "@z");
    resolve(&mut model, "z", Ok(vec![]));
    assert_eq!(model.mention.phase(), MentionPhase::Idle);
}

#[test]
fn test_failed_lookup_closes_and_is_not_cached() {
    let mut model = test_model("", 0, 0);
    type_text(&mut model, "@a");
    resolve(&mut model, "a", Err(LookupError::Timeout));

    assert_eq!(model.mention.phase(), MentionPhase::Idle);
    assert!(!model.mention.cache().contains("a"));
}

// ========================================================================
// Commit
// ========================================================================

#[test]
fn test_commit_focused_candidate() {
    let mut model = test_model("hey ", 4, 4);
    type_text(&mut model, "@a");
    resolve(&mut model, "a", Ok(people()));

    update(&mut model, Msg::Mention(MentionMsg::FocusNext));
    update(&mut model, Msg::Mention(MentionMsg::Commit));

    assert_eq!(model.value, "hey [@alan](u2) ");
    assert_eq!(model.selection, Selection::collapsed(16));
    assert!(!model.mention.is_active());
}

#[test]
fn test_focus_wraps_both_ways() {
    let mut model = test_model("", 0, 0);
    type_text(&mut model, "@a");
    resolve(&mut model, "a", Ok(people()));

    update(&mut model, Msg::Mention(MentionMsg::FocusPrev));
    assert_eq!(model.mention.focus_index(), 1);
    update(&mut model, Msg::Mention(MentionMsg::FocusNext));
    assert_eq!(model.mention.focus_index(), 0);
}

#[test]
fn test_select_by_index() {
    let mut model = test_model("", 0, 0);
    type_text(&mut model, "@a");
    resolve(&mut model, "a", Ok(people()));

    update(&mut model, Msg::Mention(MentionMsg::Select(0)));
    assert_eq!(model.value, "[@ada](u1) ");
}

#[test]
fn test_select_out_of_range_keeps_panel() {
    let mut model = test_model("", 0, 0);
    type_text(&mut model, "@a");
    resolve(&mut model, "a", Ok(people()));

    assert_eq!(update(&mut model, Msg::Mention(MentionMsg::Select(9))), None);
    assert!(model.mention.is_open());
}
