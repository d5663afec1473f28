use crate::config::expand_path;
use crate::models::LogEntry;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Entries read from one session log, plus line accounting for the summary.
#[derive(Debug, Default)]
pub struct ParsedFile {
    pub entries: Vec<LogEntry>,
    pub lines: usize,
    pub malformed: usize,
}

pub struct LogParser {
    claude_dir: PathBuf,
}

impl LogParser {
    pub fn new(claude_dir: &str) -> Self {
        Self {
            claude_dir: expand_path(claude_dir),
        }
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.claude_dir.join("projects")
    }

    pub fn session_files(&self) -> Vec<PathBuf> {
        find_jsonl_files(&self.projects_dir())
    }
}

/// Read a JSONL file line by line. Blank lines are ignored and lines that
/// fail to parse, including lines that are not valid UTF-8, are counted and
/// skipped. Only I/O failures are errors.
pub fn parse_jsonl_file(path: &Path) -> Result<ParsedFile> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open JSONL file {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut parsed = ParsedFile::default();

    for (line_num, line) in reader.split(b'\n').enumerate() {
        let line = line.with_context(|| {
            format!("Failed to read line {} of {}", line_num + 1, path.display())
        })?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        parsed.lines += 1;

        match serde_json::from_slice::<LogEntry>(&line) {
            Ok(entry) => parsed.entries.push(entry),
            Err(e) => {
                parsed.malformed += 1;
                warn!(
                    file = %path.display(),
                    line = line_num + 1,
                    error = %e,
                    "skipping malformed log line"
                );
            }
        }
    }

    debug!(
        file = %path.display(),
        entries = parsed.entries.len(),
        malformed = parsed.malformed,
        "parsed session log"
    );
    Ok(parsed)
}

/// Recursively collect `.jsonl` files below `root`, sorted by path.
///
/// A missing root yields an empty list rather than an error.
pub fn find_jsonl_files(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        debug!(root = %root.display(), "projects directory does not exist");
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "jsonl")
        {
            files.push(entry.into_path());
        }
    }

    files.sort();
    files
}

/// Derive the project path from a session log's parent directory name.
///
/// Claude Code encodes `/Users/me/proj` as `-Users-me-proj`; the leading `-`
/// is dropped and the remaining ones become `/`. Names without a leading `-`
/// pass through unchanged.
pub fn extract_project_path(file: &Path) -> String {
    let dir_name = file
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    decode_project_dir(&dir_name)
}

/// Project path for a working directory, as an import of that project's
/// logs would report it.
///
/// The directory is encoded the way Claude Code names its project log
/// directories (every character other than an ASCII letter or digit becomes
/// `-`) and then decoded like [`extract_project_path`], so `/Users/me/my-app`
/// yields `Users/me/my/app` from both.
pub fn project_path_from_cwd(cwd: &str) -> String {
    let encoded: String = cwd
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    decode_project_dir(&encoded)
}

fn decode_project_dir(name: &str) -> String {
    match name.strip_prefix('-') {
        Some(rest) => rest.replace('-', "/"),
        None => name.to_string(),
    }
}

/// Session logs are named `<sessionId>.jsonl`.
pub fn extract_session_id(file: &Path) -> String {
    file.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
