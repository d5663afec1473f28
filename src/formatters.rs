use crate::commands::import::ImportSummary;
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

pub fn format_import_summary(summary: &ImportSummary) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(vec![
        Cell::new("Metric").style_spec("bFc"),
        Cell::new("Count").style_spec("bFc"),
    ]));

    let failed_style = if summary.failed > 0 { "Fr" } else { "" };
    let rows = [
        ("Session files", summary.files_scanned, ""),
        ("Unreadable files", summary.files_failed, ""),
        ("Log lines", summary.lines, ""),
        ("Malformed lines", summary.malformed, ""),
        ("Events selected", summary.selected, ""),
        ("Events sent", summary.sent, "Fg"),
        ("Send failures", summary.failed, failed_style),
    ];

    for (label, count, style) in rows {
        table.add_row(Row::new(vec![
            Cell::new(label),
            Cell::new(&format_number(count as u64)).style_spec(style),
        ]));
    }

    table.to_string()
}

/// Summary goes to stderr; stdout carries the dry-run events.
pub fn print_import_summary(summary: &ImportSummary) {
    let heading = if summary.dry_run {
        "=== Import Summary (dry run) ==="
    } else {
        "=== Import Summary ==="
    };
    eprintln!("\n{}", heading.bright_cyan().bold());
    eprint!("{}", format_import_summary(summary));

    if summary.limit_reached {
        eprintln!(
            "{}",
            format!("Stopped after {} events (--limit)", summary.selected).yellow()
        );
    }
    if summary.dry_run {
        eprintln!("{}", "Dry run: no events were sent".yellow());
    }
}

pub fn format_number(num: u64) -> String {
    let num_str = num.to_string();
    let mut result = String::new();
    let mut count = 0;

    for ch in num_str.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}
