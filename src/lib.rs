//! markfield - markdown-aware form fields
//!
//! Selection-based markdown transforms, coalesced undo/redo, a data-driven
//! shortcut table, mention autocomplete and a source/structured mode switch,
//! wired together with the Elm Architecture: `FieldModel` holds the state,
//! `Msg` describes events, `update` is the only place state changes, and
//! `Cmd` describes side effects run by the `FieldRuntime`.

pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod keymap;
pub mod mention;
pub mod messages;
pub mod mode;
pub mod model;
pub mod runtime;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::FieldConfig;
pub use messages::Msg;
pub use model::FieldModel;
pub use runtime::{FieldHost, FieldRuntime};
pub use update::update;
