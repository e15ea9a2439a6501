//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod field;
mod history;
mod mention;
mod mode;
mod text_edit;

use std::time::Instant;

use crate::commands::Cmd;
use crate::editable::{char_len, Edit, EditError, Recorded};
use crate::keymap::{ActionPayload, Command, Dispatch, Keystroke};
use crate::messages::Msg;
use crate::model::FieldModel;

pub use field::update_field;
pub use history::update_history;
pub use mention::update_mention;
pub use mode::update_mode;
pub use text_edit::update_edit;

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut FieldModel, msg: Msg) -> Option<Cmd> {
    if !model.mounted {
        tracing::trace!(target: "message", ?msg, "field unmounted, dropping message");
        return None;
    }

    tracing::trace!(target: "message", ?msg, "processing");

    let result = match msg {
        Msg::Edit(m) => text_edit::update_edit(model, m),
        Msg::History(m) => history::update_history(model, m),
        Msg::Mention(m) => mention::update_mention(model, m),
        Msg::Mode(m) => mode::update_mode(model, m),
        Msg::Field(m) => field::update_field(model, m),
    };

    model.refresh_active_formats();
    result
}

/// Resolve a chord into messages
///
/// Returns `None` when no binding matches, so the host can fall back to
/// ordinary text input. A suppressed repeat yields an empty list.
pub fn key_to_msgs(model: &mut FieldModel, stroke: Keystroke, now: Instant) -> Option<Vec<Msg>> {
    let ctx = model.key_context();
    match model.dispatcher.handle_key(&ctx, stroke, now) {
        Dispatch::Execute(command, payload) => Some(command.to_msgs(payload.as_ref())),
        Dispatch::Suppressed => Some(vec![]),
        Dispatch::NoMatch => None,
    }
}

/// Translate a toolbar button press into messages
pub fn toolbar_to_msgs(
    model: &mut FieldModel,
    command: Command,
    payload: Option<ActionPayload>,
    now: Instant,
) -> Vec<Msg> {
    match model.dispatcher.handle_toolbar(command, payload, now) {
        Dispatch::Execute(command, payload) => command.to_msgs(payload.as_ref()),
        Dispatch::Suppressed | Dispatch::NoMatch => vec![],
    }
}

/// Install an edit as the new value
///
/// Records it in the history and schedules the debounced notification (and
/// the typing-pause commit when the change is held as pending).
pub(crate) fn apply_edit(model: &mut FieldModel, edit: Edit) -> Cmd {
    let selection = edit.selection.clamp(char_len(&edit.text));
    if edit.text == model.value {
        model.selection = selection;
        return Cmd::None;
    }

    model.value = edit.text;
    model.selection = selection;
    model.revision += 1;

    let mut cmds = vec![Cmd::DebouncedNotify {
        revision: model.revision,
        delay_ms: model.config.notify_debounce_ms,
    }];

    if let Recorded::Pending { revision } = model.history.record_change(model.value.clone()) {
        cmds.push(Cmd::DebouncedCommit {
            revision,
            delay_ms: model.config.commit_pause_ms,
        });
    }

    Cmd::batch(cmds)
}

/// Replace the value from history and notify without debounce
pub(crate) fn restore_value(model: &mut FieldModel, value: String) -> Cmd {
    model.selection = model.selection.clamp(char_len(&value));
    model.value = value;
    // Any debounced notify still in flight is now stale
    model.revision += 1;
    model.modes.reload(&model.value);

    Cmd::NotifyChange {
        value: model.value.clone(),
    }
}

/// Surface an edit failure as a transient notice
pub(crate) fn notify_error(model: &mut FieldModel, error: EditError) -> Cmd {
    let message = error.to_string();
    tracing::debug!(target: "message", %message, "edit rejected");
    model.set_notice(message.clone());
    Cmd::ShowNotice { message }
}
