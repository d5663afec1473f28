use crate::cli::HookArgs;
use crate::client::TelemetryClient;
use crate::config::Config;
use crate::models::{ArdenEvent, EventBody, HookPayload, LogEntry};
use crate::parser::{parse_jsonl_file, project_path_from_cwd};
use crate::transform::transform_to_arden_event;
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Hook entry point. Always succeeds; failures are only logged.
pub async fn run(args: HookArgs, config: &Config) -> Result<()> {
    if let Err(e) = forward(args, config).await {
        warn!(error = %format!("{e:#}"), "hook telemetry not sent");
    }
    Ok(())
}

async fn forward(args: HookArgs, config: &Config) -> Result<()> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("Failed to read hook payload from stdin")?;

    let payload: HookPayload = if raw.trim().is_empty() {
        HookPayload::default()
    } else {
        serde_json::from_str(&raw).context("Invalid hook payload")?
    };

    let event = build_hook_event(&payload, args.event.as_deref(), Utc::now());
    let client = TelemetryClient::new(config)?;
    client.send_telemetry(&event).await?;

    debug!(event = %event.event.event_type, session = %event.session_id, "hook telemetry sent");
    Ok(())
}

/// Build the telemetry event for one hook invocation.
///
/// `Stop` and `SubagentStop` carry the usage of the last assistant turn in the
/// session transcript, when one can be read.
pub fn build_hook_event(payload: &HookPayload, event_name: Option<&str>, now: DateTime<Utc>) -> ArdenEvent {
    let event_type = event_name
        .or(payload.hook_event_name.as_deref())
        .unwrap_or("hook");
    let session_id = payload.session_id.clone().unwrap_or_default();
    let project_path = payload
        .cwd
        .as_deref()
        .map(project_path_from_cwd)
        .unwrap_or_default();
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    let last_turn = match event_type {
        "Stop" | "SubagentStop" => payload
            .transcript_path
            .as_deref()
            .and_then(|p| last_assistant_turn(Path::new(p))),
        _ => None,
    };

    match last_turn {
        Some(entry) => {
            let transformed = transform_to_arden_event(&entry, &project_path, &session_id);
            ArdenEvent {
                timestamp,
                event: EventBody {
                    event_type: event_type.to_string(),
                    ..transformed.event
                },
                ..transformed
            }
        }
        None => ArdenEvent {
            session_id,
            project_path,
            timestamp,
            event: EventBody {
                event_type: event_type.to_string(),
                model: None,
                usage: None,
                estimated_cost_micro_cents: None,
            },
        },
    }
}

fn last_assistant_turn(transcript: &Path) -> Option<LogEntry> {
    match parse_jsonl_file(transcript) {
        Ok(parsed) => parsed
            .entries
            .into_iter()
            .rev()
            .find(|e| e.entry_type == "assistant" && e.usage().is_some()),
        Err(e) => {
            debug!(transcript = %transcript.display(), error = %e, "transcript not readable");
            None
        }
    }
}
