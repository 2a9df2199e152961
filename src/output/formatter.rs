use std::io::IsTerminal;
use owo_colors::OwoColorize;

use crate::github::types::PullRequestRecord;
use crate::output::buckets::{classify, Classification, AGE_BUCKETS};

/// Format a single record as one line
/// Format: "{days} days | github.com/{org}/{repo}/pull/{number}: {title} <{author}>"
pub fn format_record_line(record: &PullRequestRecord, use_colors: bool) -> String {
    let days = record.age.num_days();
    if use_colors {
        format!(
            "{} days | {}: {} <{}>",
            days,
            record.web_path().underline(),
            record.title.bold(),
            record.author.yellow()
        )
    } else {
        format!(
            "{} days | {}: {} <{}>",
            days,
            record.web_path(),
            record.title,
            record.author
        )
    }
}

/// Marker printed before the first record older than a bucket's threshold
fn format_marker(label: &str, use_colors: bool) -> String {
    let marker = format!("Older than {}", label);
    if use_colors {
        marker.bold().cyan().to_string()
    } else {
        marker
    }
}

/// Per-bucket counts followed by the remainder newer than every bucket
pub fn format_summary(classification: &Classification, use_colors: bool) -> String {
    let header = format!("Summary of {} PRs", classification.total);
    let mut lines = vec![if use_colors {
        header.bold().to_string()
    } else {
        header
    }];

    for (bucket, count) in AGE_BUCKETS.iter().zip(classification.counts.iter()) {
        lines.push(format!("- {}: {} PRs", bucket.label, count));
    }

    let newest = AGE_BUCKETS[AGE_BUCKETS.len() - 1];
    lines.push(format!(
        "- Newer than {}: {}",
        newest.label,
        classification.newer_than_all()
    ));

    lines.join("\n")
}

/// Render the full report for records already sorted oldest first.
///
/// Layout: a count line, every record (each bucket's marker before its first
/// record), two blank lines, then the summary.
pub fn format_report(records: &[PullRequestRecord], use_colors: bool) -> String {
    let classification = classify(records.iter().map(|r| r.age));

    let mut lines = vec![format!("Found {} open pull requests", records.len())];
    for (index, record) in records.iter().enumerate() {
        if let Some(bucket) = classification.marker_before(index) {
            lines.push(format_marker(bucket.label, use_colors));
        }
        lines.push(format_record_line(record, use_colors));
    }
    lines.push(String::new());
    lines.push(String::new());
    lines.push(format_summary(&classification, use_colors));

    lines.join("\n")
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}
