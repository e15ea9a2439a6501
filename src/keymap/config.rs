//! YAML configuration parsing for keymaps
//!
//! Parses keymap.yaml files into Keybinding structs.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use super::binding::Keybinding;
use super::command::{ActionPayload, Command};
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub command: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub when: Option<Vec<String>>,
    /// Heading level
    #[serde(default)]
    pub level: Option<u8>,
    /// Link target
    #[serde(default)]
    pub url: Option<String>,
    /// Table size
    #[serde(default)]
    pub rows: Option<usize>,
    #[serde(default)]
    pub cols: Option<usize>,
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone, Error)]
pub enum KeymapError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Invalid condition: {0}")]
    InvalidCondition(String),
    #[error("Invalid payload for {command}: {reason}")]
    InvalidPayload { command: String, reason: String },
}

/// Load keybindings from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::Io(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse keybindings from YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::Parse(e.to_string()))?;

    let current_platform = get_current_platform();
    let mut bindings = Vec::new();

    for entry in config.bindings {
        // Skip if platform-specific and doesn't match current platform
        if let Some(ref platform) = entry.platform {
            if platform != current_platform {
                continue;
            }
        }

        let keystroke = parse_key_string(&entry.key)?;
        let command = parse_command(&entry.command)?;
        let conditions = parse_conditions(&entry.when)?;
        let payload = parse_payload(&entry)?;

        let mut binding = Keybinding::new(keystroke, command);
        binding.payload = payload;
        if let Some(conds) = conditions {
            binding = binding.when(conds);
        }
        bindings.push(binding);
    }

    Ok(bindings)
}

/// Parse a key string like "cmd+shift+x" into a Keystroke
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    for part in key_str.split('+') {
        let part_lower = part.trim().to_lowercase();
        match part_lower.as_str() {
            "cmd" => {
                // Platform command key
                mods = mods | Modifiers::cmd();
            }
            "ctrl" | "control" => {
                mods = mods | Modifiers::CTRL;
            }
            "shift" => {
                mods = mods | Modifiers::SHIFT;
            }
            "alt" | "option" | "opt" => {
                mods = mods | Modifiers::ALT;
            }
            "meta" | "super" | "win" => {
                mods = mods | Modifiers::META;
            }
            _ => {
                if key_part.is_some() {
                    return Err(KeymapError::InvalidKey(format!(
                        "Multiple keys in binding: {}",
                        key_str
                    )));
                }
                key_part = Some(parse_key_code(&part_lower)?);
            }
        }
    }

    let key = key_part
        .ok_or_else(|| KeymapError::InvalidKey(format!("No key found in binding: {}", key_str)))?;

    Ok(Keystroke::new(key, mods))
}

fn parse_key_code(key: &str) -> Result<KeyCode, KeymapError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c.to_ascii_lowercase()));
    }

    match key {
        "enter" | "return" => Ok(KeyCode::Enter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" | "back" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "space" => Ok(KeyCode::Space),

        "up" | "arrowup" => Ok(KeyCode::Up),
        "down" | "arrowdown" => Ok(KeyCode::Down),
        "left" | "arrowleft" => Ok(KeyCode::Left),
        "right" | "arrowright" => Ok(KeyCode::Right),

        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),

        _ => Err(KeymapError::InvalidKey(format!("Unknown key: {}", key))),
    }
}

fn parse_command(cmd: &str) -> Result<Command, KeymapError> {
    Command::from_str(cmd).map_err(|_| KeymapError::InvalidCommand(cmd.to_string()))
}

/// Parse condition strings into Condition enums
fn parse_conditions(when: &Option<Vec<String>>) -> Result<Option<Vec<Condition>>, KeymapError> {
    let Some(conditions) = when else {
        return Ok(None);
    };

    let mut result = Vec::with_capacity(conditions.len());
    for cond_str in conditions {
        result.push(parse_condition(cond_str)?);
    }
    Ok(Some(result))
}

fn parse_condition(cond: &str) -> Result<Condition, KeymapError> {
    match cond.to_lowercase().as_str() {
        "has_selection" | "hasselection" | "selection" => Ok(Condition::HasSelection),
        "no_selection" | "noselection" => Ok(Condition::NoSelection),
        "mention_open" | "mentionopen" | "mention" => Ok(Condition::MentionOpen),
        "mention_inactive" | "mentioninactive" | "no_mention" => Ok(Condition::MentionInactive),
        "composing" => Ok(Condition::Composing),
        "structured_mode" | "structured" => Ok(Condition::StructuredMode),
        "source_mode" | "source" => Ok(Condition::SourceMode),
        _ => Err(KeymapError::InvalidCondition(cond.to_string())),
    }
}

/// Build the payload from the flat `level`/`url`/`rows`/`cols` fields
fn parse_payload(entry: &BindingConfig) -> Result<Option<ActionPayload>, KeymapError> {
    let invalid = |reason: &str| KeymapError::InvalidPayload {
        command: entry.command.clone(),
        reason: reason.to_string(),
    };

    match (entry.level, &entry.url, entry.rows, entry.cols) {
        (None, None, None, None) => Ok(None),
        (Some(level), None, None, None) => {
            if (1..=6).contains(&level) {
                Ok(Some(ActionPayload::Level(level)))
            } else {
                Err(invalid("level must be between 1 and 6"))
            }
        }
        (None, Some(url), None, None) => Ok(Some(ActionPayload::Url(url.clone()))),
        (None, None, Some(rows), Some(cols)) => {
            if rows == 0 || cols == 0 {
                Err(invalid("rows and cols must be positive"))
            } else {
                Ok(Some(ActionPayload::Table { rows, cols }))
            }
        }
        (None, None, _, _) => Err(invalid("rows and cols must be given together")),
        _ => Err(invalid("only one of level, url, or rows/cols may be set")),
    }
}

fn get_current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let stroke = parse_key_string("a").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('a'));
        assert!(stroke.mods.is_empty());
    }

    #[test]
    fn test_parse_key_with_multiple_modifiers() {
        let stroke = parse_key_string("ctrl+shift+x").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('x'));
        assert!(stroke.mods.ctrl());
        assert!(stroke.mods.shift());
    }

    #[test]
    fn test_parse_cmd_modifier() {
        let stroke = parse_key_string("cmd+b").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('b'));
        // cmd maps to META on macOS, CTRL elsewhere
        assert!(stroke.mods.has_cmd());
    }

    #[test]
    fn test_parse_named_key() {
        assert_eq!(parse_key_string("enter").unwrap().key, KeyCode::Enter);
        assert_eq!(parse_key_string("esc").unwrap().key, KeyCode::Escape);
        assert_eq!(parse_key_string("shift+tab").unwrap().key, KeyCode::Tab);
    }

    #[test]
    fn test_parse_invalid_keys() {
        assert!(matches!(
            parse_key_string("ctrl+a+b"),
            Err(KeymapError::InvalidKey(_))
        ));
        assert!(matches!(
            parse_key_string("ctrl+shift"),
            Err(KeymapError::InvalidKey(_))
        ));
        assert!(matches!(
            parse_key_string("hyper+f13"),
            Err(KeymapError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
bindings:
  - key: "cmd+b"
    command: Bold
  - key: "cmd+z"
    command: Undo
"#;

        let bindings = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].command, Command::Bold);
        assert_eq!(bindings[1].command, Command::Undo);
    }

    #[test]
    fn test_parse_yaml_payloads() {
        let yaml = r#"
bindings:
  - key: "cmd+alt+2"
    command: Heading
    level: 2
  - key: "cmd+k"
    command: Link
    url: "https://example.com"
  - key: "cmd+alt+t"
    command: Table
    rows: 2
    cols: 4
"#;

        let bindings = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(bindings[0].payload, Some(ActionPayload::Level(2)));
        assert_eq!(
            bindings[1].payload,
            Some(ActionPayload::Url("https://example.com".into()))
        );
        assert_eq!(
            bindings[2].payload,
            Some(ActionPayload::Table { rows: 2, cols: 4 })
        );
    }

    #[test]
    fn test_parse_yaml_rejects_bad_payload() {
        let yaml = r#"
bindings:
  - key: "cmd+alt+9"
    command: Heading
    level: 9
"#;
        assert!(matches!(
            parse_keymap_yaml(yaml),
            Err(KeymapError::InvalidPayload { .. })
        ));

        let yaml = r#"
bindings:
  - key: "cmd+alt+t"
    command: Table
    rows: 2
"#;
        assert!(matches!(
            parse_keymap_yaml(yaml),
            Err(KeymapError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_parse_yaml_with_conditions() {
        let yaml = r#"
bindings:
  - key: "enter"
    command: MentionCommit
    when: ["mention_open"]
"#;
        let bindings = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(bindings[0].when, Some(vec![Condition::MentionOpen]));
    }

    #[test]
    fn test_parse_yaml_unknown_command() {
        let yaml = r#"
bindings:
  - key: "cmd+s"
    command: SaveFile
"#;
        assert!(matches!(
            parse_keymap_yaml(yaml),
            Err(KeymapError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_parse_yaml_with_platform() {
        let yaml = r#"
bindings:
  - key: "cmd+b"
    command: Bold
  - key: "meta+u"
    command: Underline
    platform: macos
"#;

        let bindings = parse_keymap_yaml(yaml).unwrap();

        #[cfg(target_os = "macos")]
        assert_eq!(bindings.len(), 2);

        #[cfg(not(target_os = "macos"))]
        assert_eq!(bindings.len(), 1);
    }
}
