//! Field model - the complete state of one markdown field
//!
//! Follows the Elm Architecture: this struct is only mutated by `update`.

mod notice;

pub use notice::TransientNotice;

use crate::config::FieldConfig;
use crate::editable::{char_len, ActiveFormats, EditHistory, Selection};
use crate::keymap::{
    default_bindings, get_default_keymap_yaml, parse_keymap_yaml, Dispatcher, KeyContext, Keymap,
};
use crate::mention::MentionAutocomplete;
use crate::mode::{EditMode, EditSurface, ModeController};

/// The complete field model
#[derive(Debug)]
pub struct FieldModel {
    /// Current markdown value
    pub value: String,
    pub selection: Selection,
    pub history: EditHistory,
    pub mention: MentionAutocomplete,
    pub modes: ModeController,
    pub dispatcher: Dispatcher,
    /// Toolbar highlighting, recomputed after every update
    pub active_formats: ActiveFormats,
    pub notice: Option<TransientNotice>,
    /// Bumped on every value change; debounced notifications carry it
    pub revision: u64,
    /// False once the field has been torn down
    pub mounted: bool,
    pub config: FieldConfig,
}

impl FieldModel {
    /// Create a field holding `value`, with the cursor at the end
    ///
    /// Uses the embedded default keymap; see [`FieldModel::with_keymap`] for
    /// layered user keymaps.
    pub fn new(value: impl Into<String>, config: FieldConfig) -> Self {
        let keymap = match parse_keymap_yaml(get_default_keymap_yaml()) {
            Ok(bindings) => Keymap::with_bindings(bindings),
            Err(e) => {
                tracing::warn!("Failed to parse embedded keymap: {}", e);
                Keymap::with_bindings(default_bindings())
            }
        };

        let value = value.into();
        let end = char_len(&value);
        Self {
            history: EditHistory::with_max_entries(value.clone(), config.history_limit),
            mention: MentionAutocomplete::new(config.mention_trigger),
            dispatcher: Dispatcher::new(keymap, config.action_repeat()),
            value,
            selection: Selection::collapsed(end),
            modes: ModeController::new(),
            active_formats: ActiveFormats::none(),
            notice: None,
            revision: 0,
            mounted: true,
            config,
        }
    }

    /// Replace the keymap (builder pattern)
    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.dispatcher = Dispatcher::new(keymap, self.config.action_repeat());
        self
    }

    /// Register the host's structured surface (builder pattern)
    pub fn with_structured(mut self, surface: Box<dyn EditSurface>) -> Self {
        self.modes = ModeController::with_structured(surface);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn mode(&self) -> EditMode {
        self.modes.mode()
    }

    /// Context for conditional keybindings
    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            has_selection: !self.selection.is_collapsed(),
            mention_open: self.mention.is_open(),
            composing: self.mention.is_active(),
            structured_mode: self.mode() == EditMode::Structured,
        }
    }

    /// The current notice, if it hasn't expired
    pub fn active_notice(&self) -> Option<&TransientNotice> {
        self.notice.as_ref().filter(|n| !n.is_expired())
    }

    pub fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(TransientNotice::new(text, self.config.notice_duration()));
    }

    pub fn refresh_active_formats(&mut self) {
        self.active_formats = self.modes.active_formats(&self.value, self.selection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_model_cursor_at_end() {
        let model = FieldModel::new("héllo", FieldConfig::default());
        assert_eq!(model.selection, Selection::collapsed(5));
        assert_eq!(model.history.entries(), ["héllo".to_string()]);
        assert!(model.mounted);
    }

    #[test]
    fn test_key_context_reflects_selection() {
        let mut model = FieldModel::new("text", FieldConfig::default());
        assert!(!model.key_context().has_selection);

        model.selection = Selection::new(0, 2);
        assert!(model.key_context().has_selection);
        assert!(!model.key_context().structured_mode);
    }
}
