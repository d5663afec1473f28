use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArdenError {
    #[error("missing required flag --{0}")]
    MissingFlag(&'static str),

    #[error("invalid value for --{flag}: {message}")]
    InvalidFlag { flag: &'static str, message: String },

    #[error("invalid key=value pair '{0}'")]
    InvalidPair(String),

    #[error("no API token configured; set ARDEN_API_TOKEN or pass --token")]
    MissingToken,

    #[error("telemetry request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("telemetry API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid settings file {}: {message}", path.display())]
    Settings { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
