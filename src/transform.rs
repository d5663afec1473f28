use crate::models::{ArdenEvent, EventBody, LogEntry};
use crate::pricing::estimate_cost_micro_cents;

/// User messages at or below this many characters are not recorded.
pub const MIN_USER_CONTENT_CHARS: usize = 50;

/// Decide whether a log entry is worth recording.
///
/// Assistant turns count when they carry usage. User turns count when they are
/// real prompts: longer than [`MIN_USER_CONTENT_CHARS`] and not marked `isMeta`.
pub fn should_process_event(entry: &LogEntry) -> bool {
    match entry.entry_type.as_str() {
        "assistant" => entry.usage().is_some(),
        "user" => !entry.is_meta() && entry.content_len() > MIN_USER_CONTENT_CHARS,
        _ => false,
    }
}

/// Convert a log entry into the canonical telemetry shape.
pub fn transform_to_arden_event(entry: &LogEntry, project_path: &str, session_id: &str) -> ArdenEvent {
    let usage = entry.usage().cloned();
    let estimated_cost_micro_cents = usage.as_ref().map(estimate_cost_micro_cents);

    ArdenEvent {
        session_id: session_id.to_string(),
        project_path: project_path.to_string(),
        timestamp: entry.timestamp.clone(),
        event: EventBody {
            event_type: entry.entry_type.clone(),
            model: entry.model().map(str::to_string),
            usage,
            estimated_cost_micro_cents,
        },
    }
}
