//! Mention autocomplete update handlers

use crate::commands::Cmd;
use crate::editable::transform::insert_at_cursor;
use crate::editable::Selection;
use crate::mention::MentionCommit;
use crate::messages::MentionMsg;
use crate::model::FieldModel;

use super::apply_edit;

/// Handle mention panel messages
pub fn update_mention(model: &mut FieldModel, msg: MentionMsg) -> Option<Cmd> {
    match msg {
        MentionMsg::FocusNext => {
            model.mention.focus_next();
            None
        }
        MentionMsg::FocusPrev => {
            model.mention.focus_prev();
            None
        }
        MentionMsg::Commit => {
            let commit = model.mention.commit()?;
            commit_mention(model, commit).into_option()
        }
        MentionMsg::Select(index) => {
            let commit = model.mention.select(index)?;
            commit_mention(model, commit).into_option()
        }
        MentionMsg::Cancel => {
            model.mention.cancel();
            None
        }
        MentionMsg::Resolved { query, result } => {
            model.mention.on_result(&query, result);
            None
        }
    }
}

/// Replace `[trigger, cursor)` with the candidate's reference
fn commit_mention(model: &mut FieldModel, commit: MentionCommit) -> Cmd {
    let start = commit.query.trigger_offset;
    let span = Selection::new(start, model.selection.end.max(start));
    let reference = commit.candidate.reference(model.mention.trigger());

    tracing::debug!(
        target: "mention",
        id = %commit.candidate.id,
        query = %commit.query.query_text,
        "committed mention"
    );

    let edit = insert_at_cursor(&model.value, span, &reference);
    apply_edit(model, edit)
}
