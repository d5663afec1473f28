//! Claude Code settings file editing.
//!
//! Registers `arden hook <Event>` commands under the `hooks` key of
//! `settings.json` without disturbing anything else in the file.

use crate::error::ArdenError;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

pub const HOOK_BINARY: &str = "arden";

/// Hook events that get an Arden telemetry command.
pub const HOOK_EVENTS: &[&str] = &[
    "PreToolUse",
    "PostToolUse",
    "Notification",
    "UserPromptSubmit",
    "Stop",
    "SubagentStop",
    "PreCompact",
];

pub fn hook_command(event: &str) -> String {
    format!("{HOOK_BINARY} hook {event}")
}

/// Load a settings file; a missing file is an empty object.
pub fn load_settings(path: &Path) -> Result<Value, ArdenError> {
    if !path.exists() {
        return Ok(Value::Object(Map::new()));
    }

    let raw = fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    let value: Value = serde_json::from_str(&raw).map_err(|e| ArdenError::Settings {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if !value.is_object() {
        return Err(ArdenError::Settings {
            path: path.to_path_buf(),
            message: "top-level value is not a JSON object".to_string(),
        });
    }
    Ok(value)
}

/// Add the Arden hook for every event in [`HOOK_EVENTS`] that lacks it.
///
/// Returns the number of hooks added; running it twice adds nothing the
/// second time.
pub fn merge_hooks(settings: &mut Value, path: &Path) -> Result<usize, ArdenError> {
    let invalid = |message: &str| ArdenError::Settings {
        path: path.to_path_buf(),
        message: message.to_string(),
    };

    let root = settings
        .as_object_mut()
        .ok_or_else(|| invalid("top-level value is not a JSON object"))?;
    let hooks = root
        .entry("hooks")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| invalid("\"hooks\" is not a JSON object"))?;

    let mut added = 0;
    for event in HOOK_EVENTS {
        let command = hook_command(event);
        let groups = hooks
            .entry(event.to_string())
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()
            .ok_or_else(|| invalid(&format!("\"hooks.{event}\" is not an array")))?;

        if groups.iter().any(|group| group_has_command(group, &command)) {
            continue;
        }

        groups.push(json!({
            "matcher": "",
            "hooks": [{ "type": "command", "command": command }]
        }));
        added += 1;
    }

    Ok(added)
}

fn group_has_command(group: &Value, command: &str) -> bool {
    group
        .get("hooks")
        .and_then(Value::as_array)
        .is_some_and(|hooks| {
            hooks
                .iter()
                .any(|h| h.get("command").and_then(Value::as_str) == Some(command))
        })
}

/// Pretty-printed with a trailing newline.
pub fn render_settings(settings: &Value) -> Result<String, ArdenError> {
    let mut rendered = serde_json::to_string_pretty(settings)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write the settings file, creating parent directories.
pub fn write_settings(path: &Path, settings: &Value) -> Result<(), ArdenError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_settings(settings)?)?;
    Ok(())
}
