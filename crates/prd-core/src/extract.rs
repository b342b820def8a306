use crate::error::{PrdError, Result};
use crate::prd::Timeline;
use crate::section::Section;
use crate::timeline::parse_timeline;
use crate::types::FieldKind;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Items shorter than this (after cleanup) are noise, not list entries.
const MIN_ITEM_CHARS: usize = 3;

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    List(Vec<String>),
    Text(String),
    Map(BTreeMap<String, String>),
    Timeline(Timeline),
}

// ---------------------------------------------------------------------------
// Markdown markers
// ---------------------------------------------------------------------------

pub(crate) struct Markers {
    bullet: Regex,
    ordinal: Regex,
    checkbox: Regex,
    bold: Regex,
    italic: Regex,
}

static MARKERS: OnceLock<std::result::Result<Markers, regex::Error>> = OnceLock::new();

pub(crate) fn markers() -> Result<&'static Markers> {
    MARKERS
        .get_or_init(|| {
            Ok(Markers {
                bullet: Regex::new(r"^[*\-+]\s*")?,
                ordinal: Regex::new(r"^\d+\.\s*")?,
                checkbox: Regex::new(r"^\s*\[[ xX]?\]\s*")?,
                bold: Regex::new(r"\*\*(.*?)\*\*")?,
                italic: Regex::new(r"\*(.*?)\*")?,
            })
        })
        .as_ref()
        .map_err(|e| PrdError::Pattern(e.clone()))
}

impl Markers {
    /// Strip a leading bullet and then a leading ordinal.
    pub(crate) fn strip_list_marker(&self, line: &str) -> String {
        let line = self.bullet.replace(line, "");
        self.ordinal.replace(&line, "").into_owned()
    }

    pub(crate) fn strip_checkbox(&self, line: &str) -> String {
        self.checkbox.replace(line, "").into_owned()
    }

    pub(crate) fn strip_emphasis(&self, line: &str) -> String {
        let line = self.bold.replace_all(line, "${1}");
        self.italic.replace_all(&line, "${1}").into_owned()
    }
}

/// A `---` horizontal rule (or any line starting with one).
pub(crate) fn is_separator(line: &str) -> bool {
    line.starts_with("---")
}

/// Trimmed, non-blank, non-separator lines.
pub(crate) fn content_lines(lines: &[String]) -> impl Iterator<Item = &str> {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !is_separator(l))
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

pub fn extract(section: &Section, kind: FieldKind) -> Result<FieldValue> {
    let value = match kind {
        FieldKind::ListOfString => FieldValue::List(extract_list(&section.lines)?),
        FieldKind::FreeText => FieldValue::Text(extract_text(&section.lines)?),
        FieldKind::KeyValueMap => FieldValue::Map(extract_map(&section.lines)),
        FieldKind::TimelineStruct => FieldValue::Timeline(parse_timeline(&section.lines)?),
    };
    Ok(value)
}

pub fn extract_list(lines: &[String]) -> Result<Vec<String>> {
    let m = markers()?;
    let items = content_lines(lines)
        .map(|line| {
            let line = m.strip_list_marker(line);
            let line = m.strip_checkbox(&line);
            m.strip_emphasis(&line).trim().to_string()
        })
        .filter(|item| item.chars().count() >= MIN_ITEM_CHARS)
        .collect();
    Ok(items)
}

pub fn extract_text(lines: &[String]) -> Result<String> {
    let m = markers()?;
    let text: Vec<String> = content_lines(lines).map(|l| m.strip_emphasis(l)).collect();
    Ok(text.join("\n"))
}

pub fn extract_map(lines: &[String]) -> BTreeMap<String, String> {
    content_lines(lines)
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| {
            let key = key.trim().to_lowercase().replace('*', "").replace(' ', "_");
            (key, value.trim().to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
