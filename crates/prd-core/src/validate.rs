use crate::config::ValidationConfig;
use crate::prd::ParsedPrd;
use serde::{Deserialize, Serialize};

pub const LOW_COMPLETENESS_WARNING: &str =
    "PRD has low completeness score - consider adding more details";

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Percentage of tracked fields that are present, 0 to 100.
    pub completeness_score: f64,
}

// ---------------------------------------------------------------------------
// Tracked fields
// ---------------------------------------------------------------------------

pub struct TrackedField {
    pub name: &'static str,
    pub required: bool,
    pub present: fn(&ParsedPrd) -> bool,
}

fn has_text(s: &str) -> bool {
    !s.trim().is_empty()
}

pub const TRACKED_FIELDS: &[TrackedField] = &[
    TrackedField {
        name: "title",
        required: true,
        present: |p| has_text(&p.title),
    },
    TrackedField {
        name: "description",
        required: true,
        present: |p| has_text(&p.description),
    },
    TrackedField {
        name: "problem_statement",
        required: true,
        present: |p| has_text(&p.problem_statement),
    },
    TrackedField {
        name: "target_users",
        required: false,
        present: |p| !p.target_users.is_empty(),
    },
    TrackedField {
        name: "user_stories",
        required: false,
        present: |p| !p.user_stories.is_empty(),
    },
    TrackedField {
        name: "requirements",
        required: false,
        present: |p| !p.requirements.is_empty(),
    },
    TrackedField {
        name: "acceptance_criteria",
        required: false,
        present: |p| !p.acceptance_criteria.is_empty(),
    },
    TrackedField {
        name: "technical_requirements",
        required: false,
        present: |p| !p.technical_requirements.is_empty(),
    },
    TrackedField {
        name: "success_metrics",
        required: false,
        present: |p| !p.success_metrics.is_empty(),
    },
    TrackedField {
        name: "timeline",
        required: false,
        present: |p| has_text(&p.timeline.text),
    },
];

pub fn completeness_score(prd: &ParsedPrd) -> f64 {
    let present = TRACKED_FIELDS.iter().filter(|f| (f.present)(prd)).count();
    100.0 * present as f64 / TRACKED_FIELDS.len() as f64
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate(prd: &ParsedPrd) -> ValidationResult {
    validate_with(prd, &ValidationConfig::default())
}

pub fn validate_with(prd: &ParsedPrd, cfg: &ValidationConfig) -> ValidationResult {
    let completeness_score = completeness_score(prd);

    let mut warnings = Vec::new();
    if completeness_score < cfg.low_completeness_threshold {
        warnings.push(LOW_COMPLETENESS_WARNING.to_string());
    }

    if let Some(reason) = &prd.parse_error {
        return ValidationResult {
            is_valid: false,
            errors: vec![format!("Failed to parse PRD content: {reason}")],
            warnings,
            completeness_score,
        };
    }

    let errors: Vec<String> = TRACKED_FIELDS
        .iter()
        .filter(|f| f.required && !(f.present)(prd))
        .map(|f| format!("Missing required field: {}", f.name))
        .collect();

    let title_len = prd.title.chars().count();
    if title_len > cfg.max_title_len {
        warnings.push(format!(
            "Title is {title_len} characters, limit is {}",
            cfg.max_title_len
        ));
    }

    if prd.requirements.len() > cfg.max_requirements {
        warnings.push(format!(
            "PRD lists {} requirements, limit is {}",
            prd.requirements.len(),
            cfg.max_requirements
        ));
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        completeness_score,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_prd() -> ParsedPrd {
        ParsedPrd {
            title: "Order Routing".to_string(),
            description: "Routes orders".to_string(),
            problem_statement: "Orders are misrouted".to_string(),
            target_users: vec!["ops".to_string()],
            user_stories: vec!["As ops I route".to_string()],
            requirements: vec!["route orders".to_string()],
            acceptance_criteria: vec!["all routed".to_string()],
            technical_requirements: vec!["rust".to_string()],
            success_metrics: vec!["99% routed".to_string()],
            timeline: crate::prd::Timeline {
                text: "Q3".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn tracked_fields_shape() {
        assert_eq!(TRACKED_FIELDS.len(), 10);
        assert_eq!(TRACKED_FIELDS.iter().filter(|f| f.required).count(), 3);
    }

    #[test]
    fn complete_prd_is_valid() {
        let result = validate(&complete_prd());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(result.completeness_score, 100.0);
    }

    #[test]
    fn missing_required_fields_are_errors() {
        let prd = ParsedPrd {
            title: "  ".to_string(),
            ..Default::default()
        };
        let result = validate(&prd);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                "Missing required field: title",
                "Missing required field: description",
                "Missing required field: problem_statement",
            ]
        );
        assert_eq!(result.completeness_score, 0.0);
        assert_eq!(result.warnings, vec![LOW_COMPLETENESS_WARNING]);
    }

    #[test]
    fn low_completeness_is_only_a_warning() {
        let prd = ParsedPrd {
            title: "T".to_string(),
            description: "D".to_string(),
            problem_statement: "P".to_string(),
            ..Default::default()
        };
        let result = validate(&prd);
        assert!(result.is_valid);
        assert_eq!(result.completeness_score, 30.0);
        assert_eq!(result.warnings, vec![LOW_COMPLETENESS_WARNING]);
    }

    #[test]
    fn threshold_is_configurable() {
        let prd = ParsedPrd {
            title: "T".to_string(),
            description: "D".to_string(),
            problem_statement: "P".to_string(),
            ..Default::default()
        };
        let cfg = ValidationConfig {
            low_completeness_threshold: 30.0,
            ..Default::default()
        };
        assert!(validate_with(&prd, &cfg).warnings.is_empty());
    }

    #[test]
    fn completeness_is_monotone() {
        let mut prd = ParsedPrd::default();
        let mut last = completeness_score(&prd);
        let steps: Vec<fn(&mut ParsedPrd)> = vec![
            |p| p.title = "T".to_string(),
            |p| p.target_users.push("devs".to_string()),
            |p| p.risks.push("untracked field".to_string()),
            |p| p.description = "D".to_string(),
            |p| p.timeline.text = "soon".to_string(),
            |p| p.success_metrics.push("uptime".to_string()),
        ];
        for step in steps {
            step(&mut prd);
            let next = completeness_score(&prd);
            assert!(next >= last, "{next} < {last}");
            last = next;
        }
        assert_eq!(last, 50.0);
    }

    #[test]
    fn soft_limits_warn() {
        let mut prd = complete_prd();
        prd.title = "x".repeat(201);
        prd.requirements = (0..51).map(|i| format!("req {i}")).collect();
        let result = validate(&prd);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("201 characters"));
        assert!(result.warnings[1].contains("51 requirements"));
    }

    #[test]
    fn fallback_record_has_single_error() {
        let prd = ParsedPrd::fallback("junk", None, "content looks garbled");
        let result = validate(&prd);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("content looks garbled"));
        assert_eq!(result.completeness_score, 20.0);
        assert_eq!(result.warnings, vec![LOW_COMPLETENESS_WARNING.to_string()]);
    }
}
