//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The runtime executes them and feeds any results back as messages.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Tell the host about a new value right away
    NotifyChange { value: String },
    /// Start debounce timer for outward notification
    /// After delay_ms, sends Msg::Field(NotifyReady)
    DebouncedNotify { revision: u64, delay_ms: u64 },
    /// Start the typing-pause timer for a pending undo entry
    /// After delay_ms, sends Msg::History(CommitReady)
    DebouncedCommit { revision: u64, delay_ms: u64 },
    /// Run the mention lookup in a background worker
    /// Sends Msg::Mention(Resolved) when done
    LookupMentions { query: String },
    /// Show a transient notice to the user
    ShowNotice { message: String },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands, dropping `None`s
    ///
    /// Collapses to a single command (or `None`) where possible.
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }

    /// Flatten nested batches into a list of leaf commands
    pub fn into_vec(self) -> Vec<Cmd> {
        match self {
            Cmd::None => vec![],
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::into_vec).collect(),
            cmd => vec![cmd],
        }
    }

    /// Wrap for returning from an update handler
    pub fn into_option(self) -> Option<Cmd> {
        if self.is_none() {
            None
        } else {
            Some(self)
        }
    }
}
