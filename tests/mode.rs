//! Editing mode tests - source/structured switching with a host surface

mod common;

use std::sync::{Arc, Mutex};

use common::{test_model, type_text};
use markfield::editable::{
    apply, ActiveFormats, Edit, EditAction, EditError, InlineFormat, Selection,
};
use markfield::messages::{EditMsg, ModeMsg, Msg};
use markfield::mode::{EditMode, EditSurface};
use markfield::update::update;

/// Structured surface that records loads, refuses tables and reports bold as
/// always active
#[derive(Debug, Default)]
struct RichSurface {
    loads: Arc<Mutex<Vec<String>>>,
}

impl EditSurface for RichSurface {
    fn mode(&self) -> EditMode {
        EditMode::Structured
    }

    fn load(&mut self, text: &str) {
        if let Ok(mut loads) = self.loads.lock() {
            loads.push(text.to_string());
        }
    }

    fn apply_action(
        &mut self,
        action: &EditAction,
        text: &str,
        selection: Selection,
    ) -> Result<Edit, EditError> {
        match action {
            EditAction::Table { .. } => Err(EditError::NoSelection),
            other => apply(other, text, selection),
        }
    }

    fn active_formats(&self, _text: &str, _selection: Selection) -> ActiveFormats {
        let mut formats = ActiveFormats::none();
        formats.inline.insert(InlineFormat::Bold);
        formats
    }
}

fn structured_model(text: &str) -> (markfield::FieldModel, Arc<Mutex<Vec<String>>>) {
    let loads = Arc::new(Mutex::new(Vec::new()));
    let surface = RichSurface {
        loads: Arc::clone(&loads),
    };
    let model = test_model(text, 0, 0).with_structured(Box::new(surface));
    (model, loads)
}

// ========================================================================
// Switching
// ========================================================================

#[test]
fn test_toggle_without_surface_stays_in_source() {
    let mut model = test_model("text", 0, 0);
    update(&mut model, Msg::Mode(ModeMsg::Toggle));
    assert_eq!(model.mode(), EditMode::Source);
}

#[test]
fn test_toggle_loads_value_without_changing_it() {
    let (mut model, loads) = structured_model("# doc");
    let revision = model.revision;

    let cmd = update(&mut model, Msg::Mode(ModeMsg::Toggle));

    assert_eq!(cmd, None);
    assert_eq!(model.mode(), EditMode::Structured);
    assert_eq!(model.value, "# doc");
    assert_eq!(model.revision, revision);
    assert_eq!(*loads.lock().unwrap(), ["# doc"]);
}

#[test]
fn test_set_same_mode_is_noop() {
    let (mut model, loads) = structured_model("x");
    update(&mut model, Msg::Mode(ModeMsg::Set(EditMode::Source)));
    assert!(loads.lock().unwrap().is_empty());
}

#[test]
fn test_mode_switch_cancels_mention() {
    let (mut model, _) = structured_model("");
    type_text(&mut model, "@a");
    assert!(model.mention.is_active());

    update(&mut model, Msg::Mode(ModeMsg::Toggle));
    assert!(!model.mention.is_active());
}

// ========================================================================
// Actions and formats
// ========================================================================

#[test]
fn test_structured_surface_receives_actions() {
    let (mut model, _) = structured_model("word");
    update(&mut model, Msg::Mode(ModeMsg::Set(EditMode::Structured)));
    model.selection = Selection::new(0, 4);

    update(
        &mut model,
        Msg::Edit(EditMsg::Apply(EditAction::Table { rows: 1, cols: 1 })),
    );
    assert_eq!(model.value, "word");
    assert!(model.active_notice().is_some());

    update(
        &mut model,
        Msg::Edit(EditMsg::Apply(EditAction::Inline(InlineFormat::Code))),
    );
    assert_eq!(model.value, "`word`");
}

#[test]
fn test_active_formats_follow_mode() {
    let (mut model, _) = structured_model("word");
    update(&mut model, Msg::Mode(ModeMsg::Toggle));
    assert!(model
        .active_formats
        .is_active(&EditAction::Inline(InlineFormat::Bold)));

    update(&mut model, Msg::Mode(ModeMsg::Toggle));
    assert!(model.active_formats.is_empty());
}

#[test]
fn test_undo_reloads_active_surface() {
    let (mut model, loads) = structured_model("");
    update(&mut model, Msg::Mode(ModeMsg::Toggle));
    type_text(&mut model, "hi ");

    update(&mut model, Msg::History(markfield::messages::HistoryMsg::Undo));
    assert_eq!(loads.lock().unwrap().last().map(String::as_str), Some(""));
}
