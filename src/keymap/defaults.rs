//! Default keybindings for markdown fields
//!
//! The embedded keymap.yaml is the source of truth; the hardcoded table below
//! is only used if it fails to parse.

use std::path::Path;

use super::binding::Keybinding;
use super::command::{ActionPayload, Command};
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load and merge keymaps: defaults + overrides
///
/// Loading order (each layer overrides the previous):
/// 1. Embedded default keymap (compiled into binary)
/// 2. keymap.yaml in current directory (project-local overrides)
/// 3. User config at ~/.config/markfield/keymap.yaml
///
/// Bindings with `command: Unbound` remove matching bindings from earlier layers.
pub fn load_default_keymap() -> Vec<Keybinding> {
    let user_path = crate::config_paths::keymap_file();
    load_layered_keymap(Some(Path::new("keymap.yaml")), user_path.as_deref())
}

/// Same as [`load_default_keymap`] with explicit override locations
pub fn load_layered_keymap(project: Option<&Path>, user: Option<&Path>) -> Vec<Keybinding> {
    let mut bindings = match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::info!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    };

    for (layer, path) in [("project", project), ("user", user)] {
        let Some(path) = path.filter(|p| p.exists()) else {
            continue;
        };
        match load_keymap_file(path) {
            Ok(layer_bindings) => {
                tracing::info!(
                    "Merging {} keymap from {} ({} bindings)",
                    layer,
                    path.display(),
                    layer_bindings.len()
                );
                bindings = merge_bindings(bindings, layer_bindings);
            }
            Err(e) => {
                tracing::warn!("Failed to load {} keymap from {}: {}", layer, path.display(), e);
            }
        }
    }

    bindings
}

/// Merge override bindings into base bindings
///
/// - Same keystroke + conditions → replaces base
/// - Command `Unbound` → removes base bindings for that keystroke
/// - Otherwise → added
pub fn merge_bindings(base: Vec<Keybinding>, overrides: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for binding in overrides {
        if binding.command == Command::Unbound {
            result.retain(|b| b.keystroke != binding.keystroke);
            continue;
        }

        match result.iter().position(|b| b.same_trigger(&binding)) {
            Some(idx) => result[idx] = binding,
            None => result.push(binding),
        }
    }

    result
}

/// Hardcoded fallback bindings for the current platform
///
/// Uses Cmd on macOS, Ctrl on Windows/Linux for the "command" modifier.
pub fn default_bindings() -> Vec<Keybinding> {
    let cmd = Modifiers::cmd();
    let cmd_shift = cmd | Modifiers::SHIFT;
    let cmd_alt = cmd | Modifiers::ALT;
    let none = Modifiers::NONE;

    vec![
        // ====================================================================
        // Inline formatting
        // ====================================================================
        bind(KeyCode::Char('b'), cmd, Command::Bold),
        bind(KeyCode::Char('i'), cmd, Command::Italic),
        bind(KeyCode::Char('x'), cmd_shift, Command::Strikethrough),
        bind(KeyCode::Char('u'), cmd, Command::Underline),
        bind(KeyCode::Char('p'), cmd_shift, Command::Spoiler),
        bind(KeyCode::Char('e'), cmd, Command::InlineCode),
        // ====================================================================
        // Line formatting
        // ====================================================================
        bind(KeyCode::Char('1'), cmd_alt, Command::Heading).with_payload(ActionPayload::Level(1)),
        bind(KeyCode::Char('2'), cmd_alt, Command::Heading).with_payload(ActionPayload::Level(2)),
        bind(KeyCode::Char('3'), cmd_alt, Command::Heading).with_payload(ActionPayload::Level(3)),
        bind(KeyCode::Char('.'), cmd_shift, Command::Quote),
        bind(KeyCode::Char('8'), cmd_shift, Command::BulletedList),
        bind(KeyCode::Char('7'), cmd_shift, Command::NumberedList),
        bind(KeyCode::Char('9'), cmd_shift, Command::CheckboxList),
        // ====================================================================
        // Insertion
        // ====================================================================
        bind(KeyCode::Char('k'), cmd, Command::Link),
        bind(KeyCode::Char('t'), cmd_alt, Command::Table)
            .with_payload(ActionPayload::Table { rows: 3, cols: 3 }),
        bind(KeyCode::Enter, none, Command::InsertNewline),
        // ====================================================================
        // History & mode
        // ====================================================================
        bind(KeyCode::Char('z'), cmd, Command::Undo),
        bind(KeyCode::Char('z'), cmd_shift, Command::Redo),
        bind(KeyCode::Char('y'), cmd, Command::Redo),
        bind(KeyCode::Char('m'), cmd_shift, Command::ToggleMode),
        // ====================================================================
        // Mention panel
        // ====================================================================
        bind(KeyCode::Down, none, Command::MentionNext).when_single(Condition::MentionOpen),
        bind(KeyCode::Tab, none, Command::MentionNext).when_single(Condition::MentionOpen),
        bind(KeyCode::Up, none, Command::MentionPrev).when_single(Condition::MentionOpen),
        bind(KeyCode::Tab, Modifiers::SHIFT, Command::MentionPrev)
            .when_single(Condition::MentionOpen),
        bind(KeyCode::Enter, none, Command::MentionCommit).when_single(Condition::MentionOpen),
        bind(KeyCode::Escape, none, Command::MentionCancel).when_single(Condition::Composing),
    ]
}

fn bind(key: KeyCode, mods: Modifiers, command: Command) -> Keybinding {
    Keybinding::new(Keystroke::new(key, mods), command)
}
