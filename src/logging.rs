use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Map a `LOG_LEVEL` value to an `EnvFilter` directive.
///
/// Accepts the usual level names in any case (plus `warning`), or a full
/// filter directive such as `arden=debug,reqwest=info`.
pub fn level_directive(log_level: Option<&str>) -> String {
    let Some(raw) = log_level.map(str::trim).filter(|l| !l.is_empty()) else {
        return DEFAULT_LOG_LEVEL.to_string();
    };

    match raw.to_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        lower @ ("trace" | "debug" | "info" | "warn" | "error" | "off") => lower.to_string(),
        _ => raw.to_string(),
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays usable
/// for dry-run JSON output.
pub fn init_logging(log_level: Option<&str>) {
    let filter = EnvFilter::try_new(level_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact();

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
