//! Host callbacks

/// What the embedding form sees of a field
pub trait FieldHost: Send {
    /// The value changed (debounced; undo/redo arrive immediately)
    fn on_change(&mut self, value: &str);

    /// A transient notice should be shown to the user
    fn on_notice(&mut self, _message: &str) {}
}

/// Host that records everything it is told, for tests and demos
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingHost {
    pub changes: Vec<String>,
    pub notices: Vec<String>,
}

impl FieldHost for RecordingHost {
    fn on_change(&mut self, value: &str) {
        self.changes.push(value.to_string());
    }

    fn on_notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
