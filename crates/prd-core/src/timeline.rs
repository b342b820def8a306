//! Timeline section parsing.
//!
//! Each content line is claimed by the first matching rule: a start date
//! line, a completion date line, a milestone line, or plain timeline text.
//! Dates are read as `YYYY-MM-DD` first, then `MM/DD/YYYY`; anything else
//! leaves the date unset.

use crate::error::{PrdError, Result};
use crate::extract::{content_lines, markers};
use crate::prd::Timeline;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

const ISO_FORMAT: &str = "%Y-%m-%d";
const US_FORMAT: &str = "%m/%d/%Y";

static DATE_RE: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();

fn date_re() -> Result<&'static Regex> {
    DATE_RE
        .get_or_init(|| Regex::new(r"(\d{4}-\d{2}-\d{2}|\d{1,2}/\d{1,2}/\d{4})"))
        .as_ref()
        .map_err(|e| PrdError::Pattern(e.clone()))
}

enum LineKind {
    StartDate,
    CompletionDate,
    Milestone,
    Text,
}

fn classify_line(lower: &str) -> LineKind {
    if lower.contains("start date") {
        LineKind::StartDate
    } else if lower.contains("target completion") || lower.contains("completion date") {
        LineKind::CompletionDate
    } else if lower.contains("milestone") {
        LineKind::Milestone
    } else {
        LineKind::Text
    }
}

/// First date-looking substring of `line`, if it parses as a calendar date.
pub fn find_date(line: &str) -> Result<Option<NaiveDate>> {
    let Some(m) = date_re()?.find(line) else {
        return Ok(None);
    };
    let raw = m.as_str();
    Ok(NaiveDate::parse_from_str(raw, ISO_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, US_FORMAT))
        .ok())
}

pub fn parse_timeline(lines: &[String]) -> Result<Timeline> {
    let m = markers()?;
    let mut timeline = Timeline::default();
    let mut text: Vec<&str> = Vec::new();

    for line in content_lines(lines) {
        match classify_line(&line.to_lowercase()) {
            LineKind::StartDate => {
                if let Some(date) = find_date(line)? {
                    timeline.start_date = Some(date);
                }
            }
            LineKind::CompletionDate => {
                if let Some(date) = find_date(line)? {
                    timeline.target_completion_date = Some(date);
                }
            }
            LineKind::Milestone => {
                let milestone = m.strip_list_marker(line);
                if milestone.chars().count() > 2 {
                    timeline.key_milestones.push(milestone);
                }
            }
            LineKind::Text => text.push(line),
        }
    }

    timeline.text = text.join("\n");
    Ok(timeline)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
