use crate::cli::ImportArgs;
use crate::client::TelemetryClient;
use crate::config::Config;
use crate::formatters::print_import_summary;
use crate::parser::{extract_project_path, extract_session_id, parse_jsonl_file, LogParser};
use crate::transform::{should_process_event, transform_to_arden_event};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub files_scanned: usize,
    pub files_failed: usize,
    pub lines: usize,
    pub malformed: usize,
    pub selected: usize,
    pub sent: usize,
    pub failed: usize,
    pub dry_run: bool,
    pub limit_reached: bool,
}

pub async fn run(args: ImportArgs, config: &Config) -> Result<()> {
    // A real import needs a token before any log is read.
    let client = if args.dry_run {
        None
    } else {
        Some(TelemetryClient::new(config)?)
    };

    let parser = LogParser::new(&args.claude_dir);
    let mut stdout = std::io::stdout();
    let summary = import_logs(&parser, args.limit, client.as_ref(), &mut stdout).await?;

    print_import_summary(&summary);

    if summary.sent == 0 && summary.failed > 0 {
        anyhow::bail!(
            "all {} telemetry submissions to {} failed",
            summary.failed,
            config.host
        );
    }
    Ok(())
}

/// Walk the session logs and submit every event worth recording.
///
/// With no client the events are written to `out` as JSON lines instead.
/// A `limit` of 0 means no limit.
pub async fn import_logs<W: Write>(
    parser: &LogParser,
    limit: usize,
    client: Option<&TelemetryClient>,
    out: &mut W,
) -> Result<ImportSummary> {
    let mut summary = ImportSummary {
        dry_run: client.is_none(),
        ..Default::default()
    };

    let files = parser.session_files();
    info!(
        count = files.len(),
        dir = %parser.projects_dir().display(),
        "found session logs"
    );

    let pb = if client.is_some() {
        ProgressBar::new(files.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("#>-"),
    );

    'files: for path in &files {
        pb.inc(1);
        let parsed = match parse_jsonl_file(path) {
            Ok(parsed) => parsed,
            Err(e) => {
                summary.files_failed += 1;
                warn!(file = %path.display(), error = %e, "skipping unreadable session log");
                continue;
            }
        };
        summary.files_scanned += 1;
        summary.lines += parsed.lines;
        summary.malformed += parsed.malformed;

        let project_path = extract_project_path(path);
        let session_id = extract_session_id(path);

        for entry in parsed.entries.iter().filter(|e| should_process_event(e)) {
            if limit > 0 && summary.selected >= limit {
                summary.limit_reached = true;
                break 'files;
            }
            summary.selected += 1;

            let event = transform_to_arden_event(entry, &project_path, &session_id);
            match client {
                None => {
                    serde_json::to_writer(&mut *out, &event)?;
                    writeln!(out)?;
                }
                Some(client) => match client.send_telemetry(&event).await {
                    Ok(()) => summary.sent += 1,
                    Err(e) => {
                        summary.failed += 1;
                        warn!(
                            session = %session_id,
                            timestamp = %event.timestamp,
                            error = %e,
                            "failed to send telemetry event"
                        );
                    }
                },
            }
        }
    }

    pb.finish_and_clear();
    info!(
        selected = summary.selected,
        sent = summary.sent,
        failed = summary.failed,
        "import finished"
    );
    Ok(summary)
}
