use crate::output::{print_fields, print_json, print_list};
use anyhow::Context;
use prd_core::classifier;
use prd_core::config::Config;
use prd_core::render::to_markdown;
use prd_core::upload::parse_upload;
use prd_core::ParseOutcome;
use std::path::Path;

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

fn load(root: &Path, file: &Path) -> anyhow::Result<ParseOutcome> {
    let config = Config::load(root).context("failed to load config")?;
    let bytes =
        std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let filename = file.file_name().and_then(|n| n.to_str());
    parse_upload(&bytes, filename, &config)
        .with_context(|| format!("failed to ingest {}", file.display()))
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

pub fn parse(root: &Path, file: &Path, json: bool) -> anyhow::Result<()> {
    let outcome = load(root, file)?;
    if json {
        return print_json(&outcome);
    }

    let prd = &outcome.prd;
    let mut rows = vec![
        ("Title", prd.title.clone()),
        ("Type", prd.prd_type.to_string()),
        (
            "Completeness",
            format!("{:.0}%", outcome.validation.completeness_score),
        ),
    ];
    if let Some(name) = &prd.original_filename {
        rows.push(("File", name.clone()));
    }
    if let Some(date) = prd.timeline.start_date {
        rows.push(("Start", date.to_string()));
    }
    if let Some(date) = prd.timeline.target_completion_date {
        rows.push(("Target", date.to_string()));
    }
    print_fields(&rows);

    if !prd.description.is_empty() {
        println!("\n{}", prd.description);
    }
    print_list("Requirements", &prd.requirements);
    print_list("Target users", &prd.target_users);
    print_list("Acceptance criteria", &prd.acceptance_criteria);
    print_list("Success metrics", &prd.success_metrics);
    print_list("Milestones", &prd.timeline.key_milestones);
    print_list("Errors", &outcome.validation.errors);
    print_list("Warnings", &outcome.validation.warnings);
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

pub fn validate(root: &Path, file: &Path, json: bool) -> anyhow::Result<()> {
    let outcome = load(root, file)?;
    let validation = &outcome.validation;

    if json {
        print_json(validation)?;
    } else {
        let status = if validation.is_valid { "valid" } else { "invalid" };
        println!(
            "{}: {status} (completeness {:.0}%)",
            file.display(),
            validation.completeness_score
        );
        for e in &validation.errors {
            println!("[error] {e}");
        }
        for w in &validation.warnings {
            println!("[warning] {w}");
        }
    }

    if !validation.is_valid {
        anyhow::bail!("PRD validation found errors");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// classify
// ---------------------------------------------------------------------------

pub fn classify(root: &Path, file: &Path, json: bool) -> anyhow::Result<()> {
    let outcome = load(root, file)?;
    let prd = &outcome.prd;

    if json {
        // A fallback record was never scored; its type is the default.
        let value = if prd.is_fallback() {
            serde_json::json!({
                "title": prd.title,
                "prd_type": prd.prd_type,
                "fallback": true,
                "parse_error": prd.parse_error,
            })
        } else {
            let scores =
                classifier::score(&prd.file_content, &prd.title, &prd.requirements_text());
            serde_json::json!({
                "title": prd.title,
                "prd_type": prd.prd_type,
                "fallback": false,
                "scores": scores,
            })
        };
        return print_json(&value);
    }

    println!("{}", prd.prd_type);
    Ok(())
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

pub fn render(root: &Path, file: &Path) -> anyhow::Result<()> {
    let outcome = load(root, file)?;
    print!("{}", to_markdown(&outcome.prd));
    Ok(())
}
