use crate::cli::InstallArgs;
use crate::config::expand_path;
use crate::settings::{load_settings, merge_hooks, render_settings, write_settings};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, PartialEq, Eq)]
pub enum InstallOutcome {
    DryRun { added: usize, rendered: String },
    AlreadyInstalled,
    Cancelled,
    Installed { added: usize },
}

pub fn run(args: &InstallArgs) -> Result<()> {
    let path = expand_path(&args.settings);
    let stdin = io::stdin();
    let outcome = install(args, &path, &mut stdin.lock())?;

    match outcome {
        InstallOutcome::DryRun { added, rendered } => {
            print!("{rendered}");
            eprintln!(
                "{}",
                format!("Dry run: would add {added} hook(s) to {}", path.display()).yellow()
            );
        }
        InstallOutcome::AlreadyInstalled => {
            println!("Arden hooks already installed in {}", path.display());
        }
        InstallOutcome::Cancelled => {
            println!("Installation cancelled");
        }
        InstallOutcome::Installed { added } => {
            println!(
                "{} Installed {} hook(s) in {}",
                "✓".green(),
                added,
                path.display()
            );
        }
    }
    Ok(())
}

/// Merge the hooks into the settings at `path`, asking on `input` before
/// writing unless `--yes` was given.
pub fn install<R: BufRead>(args: &InstallArgs, path: &Path, input: &mut R) -> Result<InstallOutcome> {
    let mut settings = load_settings(path)?;
    let added = merge_hooks(&mut settings, path)?;

    if args.dry_run {
        return Ok(InstallOutcome::DryRun {
            added,
            rendered: render_settings(&settings)?,
        });
    }
    if added == 0 {
        return Ok(InstallOutcome::AlreadyInstalled);
    }

    let prompt = format!("Add {added} Arden hook(s) to {}?", path.display());
    if !args.yes && !confirm(&prompt, input)? {
        return Ok(InstallOutcome::Cancelled);
    }

    write_settings(path, &settings)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;
    info!(path = %path.display(), added, "hooks installed");
    Ok(InstallOutcome::Installed { added })
}

/// End of input counts as "no".
fn confirm<R: BufRead>(prompt: &str, input: &mut R) -> Result<bool> {
    eprint!("{prompt} [y/N] ");
    io::stderr().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
