//! Undo/redo update handlers

use crate::commands::Cmd;
use crate::messages::HistoryMsg;
use crate::model::FieldModel;

use super::restore_value;

/// Handle history messages
pub fn update_history(model: &mut FieldModel, msg: HistoryMsg) -> Option<Cmd> {
    match msg {
        HistoryMsg::Undo => {
            model.mention.cancel();
            let value = model.history.undo()?.to_string();
            tracing::debug!(target: "history", cursor = model.history.cursor(), "undo");
            Some(restore_value(model, value))
        }

        HistoryMsg::Redo => {
            model.mention.cancel();
            let value = model.history.redo()?.to_string();
            tracing::debug!(target: "history", cursor = model.history.cursor(), "redo");
            Some(restore_value(model, value))
        }

        HistoryMsg::CommitReady { revision } => {
            if !model.history.commit_pending(revision) {
                tracing::trace!(target: "history", revision, "stale commit timer");
            }
            None
        }
    }
}
