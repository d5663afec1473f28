use crate::cli::SendArgs;
use crate::client::TelemetryClient;
use crate::config::Config;
use crate::error::ArdenError;
use crate::models::AgentEvent;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use std::collections::BTreeMap;
use tracing::info;

pub async fn send(args: SendArgs, config: &Config) -> Result<()> {
    let event = build_event(&args, Utc::now())?;

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&event)?);
        eprintln!("{}", "Dry run: event validated, not sent".yellow());
        return Ok(());
    }

    let client = TelemetryClient::new(config)?;
    client
        .send_event(&event)
        .await
        .with_context(|| format!("Failed to send event to {}", client.host()))?;

    info!(agent = %event.agent, user = %event.user, "event sent");
    println!("{} Event sent for agent {}", "✓".green(), event.agent.bold());
    Ok(())
}

/// Validate the flags and assemble the event. Nothing here touches the network.
pub fn build_event(args: &SendArgs, time: DateTime<Utc>) -> Result<AgentEvent, ArdenError> {
    let agent = required(&args.agent, "agent")?;
    let user = required(&args.user, "user")?;
    let bid = required(&args.bid, "bid")?;
    let mult = required(&args.mult, "mult")?;
    let data = required(&args.data, "data")?;

    let bid = bid.parse::<u64>().map_err(|_| ArdenError::InvalidFlag {
        flag: "bid",
        message: format!("'{bid}' is not a non-negative integer"),
    })?;
    let mult = match mult.parse::<u64>() {
        Ok(m) if m > 0 => m,
        _ => {
            return Err(ArdenError::InvalidFlag {
                flag: "mult",
                message: format!("'{mult}' is not a positive integer"),
            })
        }
    };

    Ok(AgentEvent {
        agent: agent.to_string(),
        user: user.to_string(),
        bid,
        mult,
        time,
        data: parse_data(data),
        metadata: parse_pairs(&args.pairs)?,
    })
}

fn required<'a>(value: &'a Option<String>, flag: &'static str) -> Result<&'a str, ArdenError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ArdenError::MissingFlag(flag))
}

/// JSON payloads are sent as-is; anything else is sent as a string.
fn parse_data(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

/// Split `key=value` arguments on the first `=`. Later keys win.
pub fn parse_pairs(pairs: &[String]) -> Result<BTreeMap<String, String>, ArdenError> {
    let mut metadata = BTreeMap::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| ArdenError::InvalidPair(pair.clone()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ArdenError::InvalidPair(pair.clone()));
        }
        metadata.insert(key.to_string(), value.to_string());
    }
    Ok(metadata)
}
