//! Configurable keyboard mapping for markdown fields
//!
//! This module provides a data-driven keybinding system that:
//! - Maps chords to field commands
//! - Supports platform-specific modifier handling (Cmd on macOS, Ctrl elsewhere)
//! - Enables user customization via layered YAML files
//! - Lets conditional bindings (mention panel open) take precedence
//!
//! # Architecture
//!
//! ```text
//! host key event → Keystroke → Keymap → Dispatcher → Command → Vec<Msg>
//! ```

mod binding;
mod command;
mod config;
mod context;
mod defaults;
mod dispatch;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::{ActionPayload, Command, DEFAULT_LINK_URL, DEFAULT_TABLE_SIZE};
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use context::{Condition, KeyContext};
pub use defaults::{
    default_bindings, get_default_keymap_yaml, load_default_keymap, load_layered_keymap,
    merge_bindings,
};
pub use dispatch::{Dispatch, Dispatcher, DEFAULT_REPEAT_WINDOW};
pub use keymap::{KeyAction, Keymap};
pub use types::{KeyCode, Keystroke, Modifiers};
