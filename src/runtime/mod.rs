//! Field runtime: runs the update loop and executes commands
//!
//! Timers and mention lookups run on short-lived threads and report back over
//! an mpsc channel. Nothing is delivered until the host calls [`FieldRuntime::pump`]
//! (or [`FieldRuntime::pump_until`]), so every state change still happens on
//! the host's thread.

mod host;

pub use host::{FieldHost, RecordingHost};

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::commands::Cmd;
use crate::editable::Selection;
use crate::keymap::{ActionPayload, Command, Keystroke};
use crate::mention::{LookupError, MentionLookup};
use crate::messages::{EditMsg, FieldMsg, HistoryMsg, MentionMsg, Msg};
use crate::model::FieldModel;
use crate::update::{key_to_msgs, toolbar_to_msgs, update};

pub struct FieldRuntime<H: FieldHost> {
    model: FieldModel,
    host: H,
    lookup: Arc<dyn MentionLookup>,
    msg_tx: Sender<Msg>,
    /// Dropped on unmount so late timers and lookups go nowhere
    msg_rx: Option<Receiver<Msg>>,
}

impl<H: FieldHost> FieldRuntime<H> {
    pub fn new(model: FieldModel, host: H, lookup: Arc<dyn MentionLookup>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            host,
            lookup,
            msg_tx,
            msg_rx: Some(msg_rx),
        }
    }

    pub fn model(&self) -> &FieldModel {
        &self.model
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_mounted(&self) -> bool {
        self.model.mounted
    }

    /// Run one message through the update loop
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    /// Handle a chord; returns false if unbound (the host should treat the
    /// key as ordinary input)
    pub fn handle_key(&mut self, stroke: Keystroke) -> bool {
        let Some(msgs) = key_to_msgs(&mut self.model, stroke, Instant::now()) else {
            return false;
        };
        for msg in msgs {
            self.dispatch(msg);
        }
        true
    }

    /// Toolbar button press
    pub fn toolbar(&mut self, command: Command, payload: Option<ActionPayload>) {
        for msg in toolbar_to_msgs(&mut self.model, command, payload, Instant::now()) {
            self.dispatch(msg);
        }
    }

    pub fn type_char(&mut self, ch: char) {
        self.dispatch(Msg::Edit(EditMsg::InsertChar(ch)));
    }

    pub fn type_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.type_char(ch);
        }
    }

    pub fn backspace(&mut self) {
        self.dispatch(Msg::Edit(EditMsg::DeleteBackward));
    }

    pub fn select(&mut self, selection: Selection) {
        self.dispatch(Msg::Edit(EditMsg::SetSelection(selection)));
    }

    pub fn undo(&mut self) {
        self.dispatch(Msg::History(HistoryMsg::Undo));
    }

    pub fn redo(&mut self) {
        self.dispatch(Msg::History(HistoryMsg::Redo));
    }

    /// Commit the mention candidate at `index` (e.g. clicked)
    pub fn select_mention(&mut self, index: usize) {
        self.dispatch(Msg::Mention(MentionMsg::Select(index)));
    }

    /// The owning form replaced the value
    pub fn reset(&mut self, value: impl Into<String>) {
        self.dispatch(Msg::Field(FieldMsg::ExternalReset(value.into())));
    }

    /// Deliver every message that has already arrived; returns how many
    pub fn pump(&mut self) -> usize {
        let mut pending = Vec::new();
        if let Some(rx) = &self.msg_rx {
            while let Ok(msg) = rx.try_recv() {
                pending.push(msg);
            }
        }

        let count = pending.len();
        for msg in pending {
            self.dispatch(msg);
        }
        count
    }

    /// Deliver messages as they arrive until `done` holds or `timeout` passes
    ///
    /// Returns whether `done` became true.
    pub fn pump_until<F>(&mut self, timeout: Duration, mut done: F) -> bool
    where
        F: FnMut(&FieldModel, &H) -> bool,
    {
        let deadline = Instant::now() + timeout;
        loop {
            self.pump();
            if done(&self.model, &self.host) {
                return true;
            }

            let Some(rx) = &self.msg_rx else {
                return false;
            };
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match rx.recv_timeout(remaining) {
                Ok(msg) => self.dispatch(msg),
                Err(RecvTimeoutError::Timeout) => return done(&self.model, &self.host),
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
    }

    /// Tear the field down; later timers and lookups are discarded
    pub fn unmount(&mut self) {
        if !self.model.mounted {
            return;
        }
        self.dispatch(Msg::Field(FieldMsg::Unmount));
        self.msg_rx = None;
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::NotifyChange { value } => {
                if self.model.mounted {
                    self.host.on_change(&value);
                }
            }
            Cmd::DebouncedNotify { revision, delay_ms } => {
                self.send_after(delay_ms, Msg::Field(FieldMsg::NotifyReady { revision }));
            }
            Cmd::DebouncedCommit { revision, delay_ms } => {
                self.send_after(delay_ms, Msg::History(HistoryMsg::CommitReady { revision }));
            }
            Cmd::LookupMentions { query } => {
                let tx = self.msg_tx.clone();
                let lookup = Arc::clone(&self.lookup);
                thread::spawn(move || {
                    // A panicking lookup still has to answer, or the field stays Resolving
                    let result = panic::catch_unwind(AssertUnwindSafe(|| lookup.lookup(&query)))
                        .unwrap_or_else(|_| {
                            tracing::warn!(target: "mention", %query, "lookup panicked");
                            Err(LookupError::Failed("lookup panicked".to_string()))
                        });
                    let _ = tx.send(Msg::Mention(MentionMsg::Resolved { query, result }));
                });
            }
            Cmd::ShowNotice { message } => {
                self.host.on_notice(&message);
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    fn send_after(&self, delay_ms: u64, msg: Msg) {
        let tx = self.msg_tx.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(delay_ms));
            let _ = tx.send(msg);
        });
    }
}

impl<H: FieldHost> Drop for FieldRuntime<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
