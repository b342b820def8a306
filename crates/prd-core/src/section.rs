//! Splits a PRD into named sections.
//!
//! A line is a section header when, after trimming, it is a markdown heading
//! of any level whose text is one of the recognized labels (see
//! [`SectionId::label`]), case-insensitively and optionally wrapped in `**`.
//! Everything between two headers belongs to the first one. Content before
//! the first recognized header is dropped here.

use crate::error::{PrdError, Result};
use crate::types::SectionId;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub lines: Vec<String>,
}

// ---------------------------------------------------------------------------
// Header table
// ---------------------------------------------------------------------------

type HeaderTable = Vec<(SectionId, Regex)>;

static HEADER_PATTERNS: OnceLock<std::result::Result<HeaderTable, regex::Error>> =
    OnceLock::new();

fn header_pattern(id: SectionId) -> String {
    format!(
        r"(?i)^#{{1,6}}\s*\*{{0,2}}\s*{}\s*\*{{0,2}}\s*$",
        regex::escape(id.label())
    )
}

/// Ordered `(SectionId, pattern)` table, compiled once.
fn header_patterns() -> Result<&'static [(SectionId, Regex)]> {
    HEADER_PATTERNS
        .get_or_init(|| {
            SectionId::all()
                .iter()
                .map(|&id| Regex::new(&header_pattern(id)).map(|re| (id, re)))
                .collect()
        })
        .as_deref()
        .map_err(|e| PrdError::Pattern(e.clone()))
}

/// The section a line opens, if it is a recognized header.
pub fn match_header(line: &str) -> Result<Option<SectionId>> {
    let trimmed = line.trim();
    if !trimmed.starts_with('#') {
        return Ok(None);
    }
    Ok(header_patterns()?
        .iter()
        .find(|(_, re)| re.is_match(trimmed))
        .map(|(id, _)| *id))
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

pub fn tokenize(lines: &[&str]) -> Result<BTreeMap<SectionId, Section>> {
    let mut sections: BTreeMap<SectionId, Section> = BTreeMap::new();
    let mut current: Option<SectionId> = None;
    let mut acc: Vec<String> = Vec::new();

    for line in lines {
        if let Some(id) = match_header(line)? {
            if let Some(open) = current {
                flush(&mut sections, open, &mut acc);
            }
            current = Some(id);
            acc.clear();
        } else if current.is_some() && !line.trim().is_empty() {
            acc.push((*line).to_string());
        }
    }

    if let Some(open) = current {
        flush(&mut sections, open, &mut acc);
    }
    Ok(sections)
}

fn flush(sections: &mut BTreeMap<SectionId, Section>, id: SectionId, acc: &mut Vec<String>) {
    if acc.is_empty() {
        return;
    }
    sections
        .entry(id)
        .or_insert_with(|| Section {
            id,
            lines: Vec::new(),
        })
        .lines
        .append(acc);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
