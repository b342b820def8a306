//! Render a parsed PRD back into normalized markdown.
//!
//! The title goes in an explicit `## Title` section and the fields use the
//! recognized section headers, so feeding the output back through
//! [`crate::parser::parse`] yields the same title and section contents.

use crate::prd::ParsedPrd;
use crate::types::{FieldKind, SectionId};

pub fn to_markdown(prd: &ParsedPrd) -> String {
    let mut out = String::new();
    out.push_str(&format!("## {}\n\n", SectionId::Title.label()));
    out.push_str(&format!("{}\n\n", prd.title));
    out.push_str(&format!("_Type: {}_\n", prd.prd_type));
    if let Some(filename) = &prd.original_filename {
        out.push_str(&format!("_Source: {filename}_\n"));
    }
    out.push('\n');

    for &id in SectionId::all() {
        if id == SectionId::Title {
            continue;
        }
        let body = section_body(prd, id);
        if body.is_empty() {
            continue;
        }
        out.push_str(&format!("## {}\n\n", id.label()));
        out.push_str(&body);
        out.push('\n');
    }
    out
}

fn section_body(prd: &ParsedPrd, id: SectionId) -> String {
    let mut body = String::new();
    match id.field_kind() {
        FieldKind::ListOfString => {
            for item in prd.list_field(id).unwrap_or_default() {
                body.push_str(&format!("- {item}\n"));
            }
        }
        FieldKind::FreeText => {
            let text = match id {
                SectionId::Description => prd.description.as_str(),
                SectionId::ProblemStatement => prd.problem_statement.as_str(),
                _ => "",
            };
            if !text.trim().is_empty() {
                body.push_str(text);
                body.push('\n');
            }
        }
        FieldKind::KeyValueMap => {
            for (key, value) in &prd.performance_requirements {
                body.push_str(&format!("{key}: {value}\n"));
            }
        }
        FieldKind::TimelineStruct => {
            let t = &prd.timeline;
            if let Some(date) = t.start_date {
                body.push_str(&format!("Start Date: {}\n", date.format("%Y-%m-%d")));
            }
            if let Some(date) = t.target_completion_date {
                body.push_str(&format!("Target Completion: {}\n", date.format("%Y-%m-%d")));
            }
            for milestone in &t.key_milestones {
                body.push_str(&format!("- {milestone}\n"));
            }
            if !t.text.trim().is_empty() {
                body.push_str(&t.text);
                body.push('\n');
            }
        }
    }
    body
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
