//! Field lifecycle update handlers

use crate::commands::Cmd;
use crate::editable::{char_len, EditHistory, Selection};
use crate::messages::FieldMsg;
use crate::model::FieldModel;

/// Handle notification timers, external resets and teardown
pub fn update_field(model: &mut FieldModel, msg: FieldMsg) -> Option<Cmd> {
    match msg {
        FieldMsg::NotifyReady { revision } => {
            // Skip if the value has changed since the debounce started
            if revision != model.revision {
                tracing::trace!(
                    "Skipping stale notify: revision {} != current {}",
                    revision,
                    model.revision
                );
                return None;
            }
            Some(Cmd::NotifyChange {
                value: model.value.clone(),
            })
        }

        FieldMsg::ExternalReset(value) => {
            tracing::debug!("External reset ({} chars)", char_len(&value));
            model.mention.cancel();
            model.history = EditHistory::with_max_entries(value.clone(), model.config.history_limit);
            model.selection = Selection::collapsed(char_len(&value));
            model.value = value;
            model.revision += 1;
            model.modes.reload(&model.value);
            None
        }

        FieldMsg::Unmount => {
            tracing::debug!("Field unmounted");
            model.mention.cancel();
            model.mounted = false;
            None
        }
    }
}
