//! Text editing update handlers

use crate::commands::Cmd;
use crate::editable::transform::{delete_backward, insert_at_cursor};
use crate::editable::{char_len, Edit, EditAction};
use crate::mention::MentionEffect;
use crate::messages::EditMsg;
use crate::model::FieldModel;

use super::{apply_edit, notify_error};

/// Handle text and selection messages
pub fn update_edit(model: &mut FieldModel, msg: EditMsg) -> Option<Cmd> {
    match msg {
        EditMsg::InsertChar('\n') => apply_action(model, EditAction::InsertNewline),

        EditMsg::InsertChar(ch) => {
            let selection = model.selection.clamp(char_len(&model.value));
            if !selection.is_collapsed() {
                model.mention.cancel();
            }
            let edit = insert_at_cursor(&model.value, selection, ch.encode_utf8(&mut [0; 4]));
            let cmd = apply_edit(model, edit);
            let effect = model.mention.on_char(ch, selection.start);
            Cmd::batch(vec![cmd, lookup_cmd(effect)]).into_option()
        }

        EditMsg::InsertText(text) => {
            model.mention.cancel();
            let edit = insert_at_cursor(&model.value, model.selection, &text);
            apply_edit(model, edit).into_option()
        }

        EditMsg::DeleteBackward => {
            let selection = model.selection.clamp(char_len(&model.value));
            let effect = if selection.is_collapsed() {
                model.mention.on_backspace(selection.start)
            } else {
                model.mention.cancel();
                MentionEffect::None
            };
            let edit = delete_backward(&model.value, selection);
            let cmd = apply_edit(model, edit);
            Cmd::batch(vec![cmd, lookup_cmd(effect)]).into_option()
        }

        EditMsg::SetSelection(selection) => {
            model.selection = selection.clamp(char_len(&model.value));
            model.mention.on_selection_changed(model.selection);
            None
        }

        EditMsg::Replace { text, selection } => {
            let cmd = apply_edit(model, Edit::new(text, selection));
            model.mention.on_selection_changed(model.selection);
            cmd.into_option()
        }

        EditMsg::Apply(action) => apply_action(model, action),
    }
}

/// Run an action through the active surface
fn apply_action(model: &mut FieldModel, action: EditAction) -> Option<Cmd> {
    model.mention.cancel();

    let action = match action {
        EditAction::Table { rows, cols } => {
            let (rows, cols) = model.config.clamp_table(rows, cols);
            EditAction::Table { rows, cols }
        }
        other => other,
    };

    tracing::debug!(target: "message", ?action, mode = %model.mode(), "applying action");

    match model
        .modes
        .apply_action(&action, &model.value, model.selection)
    {
        Ok(edit) => apply_edit(model, edit).into_option(),
        Err(e) => Some(notify_error(model, e)),
    }
}

fn lookup_cmd(effect: MentionEffect) -> Cmd {
    match effect {
        MentionEffect::None => Cmd::None,
        MentionEffect::Lookup(query) => Cmd::LookupMentions { query },
    }
}
