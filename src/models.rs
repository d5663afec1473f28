use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One line of a Claude Code session log.
///
/// Parsing is lenient: every field except the shape itself is optional and
/// unknown fields are ignored, since the log schema changes between Claude
/// Code releases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "type", default)]
    pub entry_type: String,
    #[serde(default)]
    pub timestamp: String,
    pub version: Option<String>,
    #[serde(rename = "userType")]
    pub user_type: Option<String>,
    pub cwd: Option<String>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
    #[serde(rename = "isMeta")]
    pub is_meta: Option<bool>,
    pub message: Option<Message>,
}

impl LogEntry {
    pub fn is_meta(&self) -> bool {
        self.is_meta.unwrap_or(false)
    }

    pub fn usage(&self) -> Option<&TokenUsage> {
        self.message.as_ref().and_then(|m| m.usage.as_ref())
    }

    pub fn model(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.model.as_deref())
    }

    /// Character count of the message text, 0 when there is no message.
    pub fn content_len(&self) -> usize {
        self.message
            .as_ref()
            .and_then(|m| m.content.as_ref())
            .map_or(0, MessageContent::char_len)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    pub role: Option<String>,
    pub model: Option<String>,
    pub content: Option<MessageContent>,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl MessageContent {
    /// Plain strings count every character; block lists count only `text` blocks.
    pub fn char_len(&self) -> usize {
        match self {
            MessageContent::Text(text) => text.chars().count(),
            MessageContent::Blocks(blocks) => blocks
                .iter()
                .filter(|b| b.block_type == "text")
                .filter_map(|b| b.text.as_deref())
                .map(|t| t.chars().count())
                .sum(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_creation_input_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_read_input_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_tier: Option<String>,
}

/// Normalized telemetry record sent to the Arden telemetry endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArdenEvent {
    pub session_id: String,
    pub project_path: String,
    pub timestamp: String,
    pub event: EventBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBody {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost_micro_cents: Option<u64>,
}

/// Ad-hoc agent event submitted through `events send`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentEvent {
    pub agent: String,
    pub user: String,
    pub bid: u64,
    pub mult: u64,
    pub time: DateTime<Utc>,
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

/// Payload Claude Code writes to a hook command's stdin.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookPayload {
    pub session_id: Option<String>,
    pub transcript_path: Option<String>,
    pub cwd: Option<String>,
    pub hook_event_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assistant_entry() {
        let line = r#"{"type":"assistant","timestamp":"2025-06-01T10:00:00.000Z","version":"1.0.17","userType":"external","cwd":"/Users/me/proj","message":{"role":"assistant","model":"claude-sonnet-4-20250514","content":[{"type":"text","text":"hi"}],"usage":{"input_tokens":10,"output_tokens":20,"cache_read_input_tokens":5}}}"#;
        let entry: LogEntry = serde_json::from_str(line).unwrap();

        assert_eq!(entry.entry_type, "assistant");
        assert_eq!(entry.user_type.as_deref(), Some("external"));
        assert_eq!(entry.model(), Some("claude-sonnet-4-20250514"));
        let usage = entry.usage().unwrap();
        assert_eq!(usage.input_tokens, 10);
        assert_eq!(usage.cache_creation_input_tokens, None);
        assert_eq!(usage.cache_read_input_tokens, Some(5));
    }

    #[test]
    fn test_content_len_counts_text_blocks_only() {
        let line = r#"{"type":"user","message":{"role":"user","content":[{"type":"text","text":"abc"},{"type":"tool_result","tool_use_id":"x","content":"ignored output"},{"type":"text","text":"de"}]}}"#;
        let entry: LogEntry = serde_json::from_str(line).unwrap();
        assert_eq!(entry.content_len(), 5);

        let line = r#"{"type":"user","message":{"role":"user","content":"héllo"}}"#;
        let entry: LogEntry = serde_json::from_str(line).unwrap();
        assert_eq!(entry.content_len(), 5);
    }

    #[test]
    fn test_event_omits_absent_fields() {
        let event = ArdenEvent {
            session_id: "s".to_string(),
            project_path: "p".to_string(),
            timestamp: "t".to_string(),
            event: EventBody {
                event_type: "user".to_string(),
                model: None,
                usage: None,
                estimated_cost_micro_cents: None,
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["sessionId"], "s");
        assert_eq!(json["projectPath"], "p");
        assert_eq!(json["event"], serde_json::json!({"type": "user"}));
    }
}
