//! Shortcut dispatcher: keymap lookup plus key-repeat suppression
//!
//! Toolbar clicks and keyboard chords share one dispatcher, so a held chord
//! and a double click are throttled the same way.

use std::time::{Duration, Instant};

use super::command::{ActionPayload, Command};
use super::context::KeyContext;
use super::keymap::{KeyAction, Keymap};
use super::types::Keystroke;

/// Repeated invocations of the same action inside this window are dropped
pub const DEFAULT_REPEAT_WINDOW: Duration = Duration::from_millis(100);

/// Outcome of dispatching a chord or toolbar action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Run this command
    Execute(Command, Option<ActionPayload>),
    /// Same action fired too recently
    Suppressed,
    /// No binding; let the host handle the key
    NoMatch,
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    keymap: Keymap,
    repeat_window: Duration,
    last_fired: Option<(Command, Option<ActionPayload>, Instant)>,
}

impl Dispatcher {
    pub fn new(keymap: Keymap, repeat_window: Duration) -> Self {
        Self {
            keymap,
            repeat_window,
            last_fired: None,
        }
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Resolve a chord against the keymap and throttle repeats
    pub fn handle_key(&mut self, ctx: &KeyContext, stroke: Keystroke, now: Instant) -> Dispatch {
        match self.keymap.handle_keystroke(stroke, ctx) {
            KeyAction::Execute(command, payload) => self.fire(command, payload, now),
            KeyAction::NoMatch => Dispatch::NoMatch,
        }
    }

    /// Toolbar button press
    pub fn handle_toolbar(
        &mut self,
        command: Command,
        payload: Option<ActionPayload>,
        now: Instant,
    ) -> Dispatch {
        self.fire(command, payload, now)
    }

    fn fire(&mut self, command: Command, payload: Option<ActionPayload>, now: Instant) -> Dispatch {
        if command.is_repeatable() {
            return Dispatch::Execute(command, payload);
        }

        if let Some((last_command, last_payload, fired_at)) = &self.last_fired {
            let is_rapid = now.saturating_duration_since(*fired_at) < self.repeat_window;
            if is_rapid && *last_command == command && *last_payload == payload {
                tracing::trace!(target: "keymap", ?command, "suppressed repeat");
                return Dispatch::Suppressed;
            }
        }

        self.last_fired = Some((command, payload.clone(), now));
        Dispatch::Execute(command, payload)
    }
}
