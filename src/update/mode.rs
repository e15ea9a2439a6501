//! Editing mode update handlers

use crate::commands::Cmd;
use crate::messages::ModeMsg;
use crate::model::FieldModel;

/// Handle mode switches; the value is never touched
pub fn update_mode(model: &mut FieldModel, msg: ModeMsg) -> Option<Cmd> {
    let target = match msg {
        ModeMsg::Toggle => model.mode().toggled(),
        ModeMsg::Set(mode) => mode,
    };

    if model.modes.set_mode(target, &model.value) {
        model.mention.cancel();
    }
    None
}
