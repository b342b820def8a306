//! The `parse` entry point.
//!
//! `parse` is total: any internal error is logged and turned into a fallback
//! record (see [`ParsedPrd::fallback`]) instead of being returned.

use crate::classifier;
use crate::config::ValidationConfig;
use crate::error::{PrdError, Result};
use crate::extract::{extract, FieldValue};
use crate::prd::ParsedPrd;
use crate::section::{tokenize, Section};
use crate::title;
use crate::validate::{validate_with, ValidationResult};
use serde::{Deserialize, Serialize};

/// A parsed record together with its validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub prd: ParsedPrd,
    pub validation: ValidationResult,
}

pub fn parse(content: &str, filename: Option<&str>) -> ParsedPrd {
    match try_parse(content, filename) {
        Ok(prd) => prd,
        Err(e) => {
            tracing::warn!(
                error = %e,
                filename = filename.unwrap_or("<none>"),
                "prd parse failed, returning fallback record"
            );
            ParsedPrd::fallback(content, filename, e.to_string())
        }
    }
}

pub fn parse_and_validate(
    content: &str,
    filename: Option<&str>,
    cfg: &ValidationConfig,
) -> ParseOutcome {
    let prd = parse(content, filename);
    let validation = validate_with(&prd, cfg);
    ParseOutcome { prd, validation }
}

fn try_parse(content: &str, filename: Option<&str>) -> Result<ParsedPrd> {
    check_garbled(content)?;

    let lines: Vec<&str> = content.lines().collect();
    let mut prd = ParsedPrd::new(content, filename);
    prd.title = title::resolve(&lines);

    let sections = tokenize(&lines)?;
    tracing::debug!(
        sections = ?sections.keys().map(|id| id.as_str()).collect::<Vec<_>>(),
        "prd sections recognized"
    );
    for section in sections.values() {
        apply_section(&mut prd, section)?;
    }

    prd.prd_type = classifier::classify(content, &prd.title, &prd.requirements_text());
    Ok(prd)
}

fn apply_section(prd: &mut ParsedPrd, section: &Section) -> Result<()> {
    match extract(section, section.id.field_kind())? {
        FieldValue::List(items) => {
            if let Some(field) = prd.list_field_mut(section.id) {
                *field = items;
            }
        }
        FieldValue::Text(text) => {
            if let Some(field) = prd.text_field_mut(section.id) {
                *field = text;
            }
        }
        FieldValue::Map(map) => prd.performance_requirements = map,
        FieldValue::Timeline(timeline) => prd.timeline = timeline,
    }
    Ok(())
}

/// Replacement characters or NUL bytes mean the bytes were decoded lossily
/// or are not text at all.
fn check_garbled(content: &str) -> Result<()> {
    let replacements = content.chars().filter(|&c| c == '\u{FFFD}').count();
    if replacements > 0 {
        return Err(PrdError::GarbledContent(format!(
            "{replacements} invalid character sequence(s)"
        )));
    }
    if content.contains('\0') {
        return Err(PrdError::GarbledContent("contains NUL bytes".to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
