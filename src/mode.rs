//! Source/structured editing surfaces
//!
//! Both surfaces implement [`EditSurface`] and operate on the one value held
//! by the model; the [`ModeController`] only decides which surface receives
//! actions. Switching never mutates the value.

use std::fmt;

use crate::editable::{apply, ActiveFormats, Edit, EditAction, EditError, Selection};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EditMode {
    /// Plain text with markdown syntax visible
    #[default]
    Source,
    /// Rich visual editing provided by the host
    Structured,
}

impl EditMode {
    pub fn toggled(self) -> Self {
        match self {
            EditMode::Source => EditMode::Structured,
            EditMode::Structured => EditMode::Source,
        }
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditMode::Source => write!(f, "source"),
            EditMode::Structured => write!(f, "structured"),
        }
    }
}

/// Capability set shared by every editing surface.
pub trait EditSurface: fmt::Debug + Send {
    fn mode(&self) -> EditMode;

    /// Render `text` after becoming the active surface or after an external
    /// change
    fn load(&mut self, _text: &str) {}

    /// Apply an action to the shared value
    fn apply_action(
        &mut self,
        action: &EditAction,
        text: &str,
        selection: Selection,
    ) -> Result<Edit, EditError>;

    /// Formatting active at the caret, for toolbar highlighting
    fn active_formats(&self, _text: &str, _selection: Selection) -> ActiveFormats {
        ActiveFormats::none()
    }
}

/// Markdown source surface: actions go straight to the text transforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceSurface;

impl EditSurface for SourceSurface {
    fn mode(&self) -> EditMode {
        EditMode::Source
    }

    fn apply_action(
        &mut self,
        action: &EditAction,
        text: &str,
        selection: Selection,
    ) -> Result<Edit, EditError> {
        apply(action, text, selection)
    }
}

/// Owns the surfaces and routes actions to the active one.
#[derive(Debug)]
pub struct ModeController {
    mode: EditMode,
    source: SourceSurface,
    structured: Option<Box<dyn EditSurface>>,
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeController {
    /// Source-only controller (no structured surface registered)
    pub fn new() -> Self {
        Self {
            mode: EditMode::Source,
            source: SourceSurface,
            structured: None,
        }
    }

    /// Controller with a host-provided structured surface
    pub fn with_structured(surface: Box<dyn EditSurface>) -> Self {
        Self {
            structured: Some(surface),
            ..Self::new()
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn has_structured(&self) -> bool {
        self.structured.is_some()
    }

    /// Switch to `mode`, loading `text` into the newly active surface.
    ///
    /// Returns false if nothing changed (already active, or no structured
    /// surface to switch to).
    pub fn set_mode(&mut self, mode: EditMode, text: &str) -> bool {
        if mode == self.mode {
            return false;
        }
        if mode == EditMode::Structured && self.structured.is_none() {
            tracing::warn!("No structured surface registered, staying in source mode");
            return false;
        }
        self.mode = mode;
        self.active_surface_mut().load(text);
        tracing::debug!(target: "mode", %mode, "switched editing surface");
        true
    }

    pub fn toggle(&mut self, text: &str) -> bool {
        self.set_mode(self.mode.toggled(), text)
    }

    /// Re-render the active surface after an external value change
    pub fn reload(&mut self, text: &str) {
        self.active_surface_mut().load(text);
    }

    pub fn apply_action(
        &mut self,
        action: &EditAction,
        text: &str,
        selection: Selection,
    ) -> Result<Edit, EditError> {
        self.active_surface_mut()
            .apply_action(action, text, selection)
    }

    /// Toolbar highlighting; always all-false in source mode
    pub fn active_formats(&self, text: &str, selection: Selection) -> ActiveFormats {
        match (self.mode, self.structured.as_deref()) {
            (EditMode::Structured, Some(surface)) => surface.active_formats(text, selection),
            _ => ActiveFormats::none(),
        }
    }

    fn active_surface_mut(&mut self) -> &mut dyn EditSurface {
        match (self.mode, self.structured.as_deref_mut()) {
            (EditMode::Structured, Some(surface)) => surface,
            _ => &mut self.source,
        }
    }
}
