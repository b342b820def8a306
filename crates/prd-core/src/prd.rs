use crate::types::{PrdType, SectionId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const UNTITLED: &str = "Untitled PRD";
pub const FALLBACK_TITLE: &str = "Uploaded PRD";
pub const FALLBACK_DESCRIPTION_CHARS: usize = 500;

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Timeline lines that are neither dates nor milestones.
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub key_milestones: Vec<String>,
}

// ---------------------------------------------------------------------------
// ParsedPrd
// ---------------------------------------------------------------------------

/// Structured record assembled from one PRD document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPrd {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prd_type: PrdType,
    #[serde(default)]
    pub problem_statement: String,
    #[serde(default)]
    pub target_users: Vec<String>,
    #[serde(default)]
    pub user_stories: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub functional_requirements: Vec<String>,
    #[serde(default)]
    pub non_functional_requirements: Vec<String>,
    #[serde(default)]
    pub platform_requirements: Vec<String>,
    #[serde(default)]
    pub infrastructure_requirements: Vec<String>,
    #[serde(default)]
    pub operational_requirements: Vec<String>,
    #[serde(default)]
    pub agent_capabilities: Vec<String>,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(default)]
    pub technical_requirements: Vec<String>,
    #[serde(default)]
    pub performance_requirements: BTreeMap<String, String>,
    #[serde(default)]
    pub security_requirements: Vec<String>,
    #[serde(default)]
    pub integration_requirements: Vec<String>,
    #[serde(default)]
    pub deployment_requirements: Vec<String>,
    #[serde(default)]
    pub success_metrics: Vec<String>,
    #[serde(default)]
    pub timeline: Timeline,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub assumptions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    #[serde(default)]
    pub file_content: String,
    /// Set only on fallback records; carries the reason parsing was abandoned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

impl ParsedPrd {
    pub fn new(content: &str, filename: Option<&str>) -> Self {
        Self {
            title: UNTITLED.to_string(),
            original_filename: filename.map(str::to_string),
            file_content: content.to_string(),
            ..Self::default()
        }
    }

    /// Minimal record returned when parsing fails part-way through.
    pub fn fallback(content: &str, filename: Option<&str>, reason: impl Into<String>) -> Self {
        Self {
            title: FALLBACK_TITLE.to_string(),
            description: truncate_description(content),
            parse_error: Some(reason.into()),
            ..Self::new(content, filename)
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.parse_error.is_some()
    }

    /// The list field backing a list-typed section. `None` for sections of
    /// any other kind.
    pub fn list_field_mut(&mut self, id: SectionId) -> Option<&mut Vec<String>> {
        let field = match id {
            SectionId::TargetUsers => &mut self.target_users,
            SectionId::UserStories => &mut self.user_stories,
            SectionId::Requirements => &mut self.requirements,
            SectionId::FunctionalRequirements => &mut self.functional_requirements,
            SectionId::NonFunctionalRequirements => &mut self.non_functional_requirements,
            SectionId::PlatformRequirements => &mut self.platform_requirements,
            SectionId::InfrastructureRequirements => &mut self.infrastructure_requirements,
            SectionId::OperationalRequirements => &mut self.operational_requirements,
            SectionId::AgentCapabilities => &mut self.agent_capabilities,
            SectionId::AcceptanceCriteria => &mut self.acceptance_criteria,
            SectionId::TechnicalRequirements => &mut self.technical_requirements,
            SectionId::SecurityRequirements => &mut self.security_requirements,
            SectionId::IntegrationRequirements => &mut self.integration_requirements,
            SectionId::DeploymentRequirements => &mut self.deployment_requirements,
            SectionId::SuccessMetrics => &mut self.success_metrics,
            SectionId::Dependencies => &mut self.dependencies,
            SectionId::Risks => &mut self.risks,
            SectionId::Assumptions => &mut self.assumptions,
            SectionId::Title
            | SectionId::Description
            | SectionId::ProblemStatement
            | SectionId::PerformanceRequirements
            | SectionId::Timeline => return None,
        };
        Some(field)
    }

    pub fn list_field(&self, id: SectionId) -> Option<&[String]> {
        let field = match id {
            SectionId::TargetUsers => &self.target_users,
            SectionId::UserStories => &self.user_stories,
            SectionId::Requirements => &self.requirements,
            SectionId::FunctionalRequirements => &self.functional_requirements,
            SectionId::NonFunctionalRequirements => &self.non_functional_requirements,
            SectionId::PlatformRequirements => &self.platform_requirements,
            SectionId::InfrastructureRequirements => &self.infrastructure_requirements,
            SectionId::OperationalRequirements => &self.operational_requirements,
            SectionId::AgentCapabilities => &self.agent_capabilities,
            SectionId::AcceptanceCriteria => &self.acceptance_criteria,
            SectionId::TechnicalRequirements => &self.technical_requirements,
            SectionId::SecurityRequirements => &self.security_requirements,
            SectionId::IntegrationRequirements => &self.integration_requirements,
            SectionId::DeploymentRequirements => &self.deployment_requirements,
            SectionId::SuccessMetrics => &self.success_metrics,
            SectionId::Dependencies => &self.dependencies,
            SectionId::Risks => &self.risks,
            SectionId::Assumptions => &self.assumptions,
            _ => return None,
        };
        Some(field)
    }

    /// The text field backing a free-text section. The `Title` section has
    /// none: the record title always comes from [`crate::title::resolve`].
    pub fn text_field_mut(&mut self, id: SectionId) -> Option<&mut String> {
        match id {
            SectionId::Description => Some(&mut self.description),
            SectionId::ProblemStatement => Some(&mut self.problem_statement),
            _ => None,
        }
    }

    /// The requirements list joined into one string, as fed to the classifier.
    pub fn requirements_text(&self) -> String {
        self.requirements.join("\n")
    }
}

/// First 500 characters of `content`, with `...` appended when cut.
pub fn truncate_description(content: &str) -> String {
    match content.char_indices().nth(FALLBACK_DESCRIPTION_CHARS) {
        Some((idx, _)) => format!("{}...", &content[..idx]),
        None => content.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
