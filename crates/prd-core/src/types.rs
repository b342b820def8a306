use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PrdType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrdType {
    Platform,
    #[default]
    Agent,
}

impl PrdType {
    pub fn as_str(self) -> &'static str {
        match self {
            PrdType::Platform => "platform",
            PrdType::Agent => "agent",
        }
    }
}

impl fmt::Display for PrdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PrdType {
    type Err = crate::error::PrdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "platform" => Ok(PrdType::Platform),
            "agent" => Ok(PrdType::Agent),
            _ => Err(crate::error::PrdError::InvalidPrdType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// Shape of the value a section is extracted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    ListOfString,
    FreeText,
    KeyValueMap,
    TimelineStruct,
}

// ---------------------------------------------------------------------------
// SectionId
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Title,
    Description,
    ProblemStatement,
    TargetUsers,
    UserStories,
    Requirements,
    FunctionalRequirements,
    NonFunctionalRequirements,
    PlatformRequirements,
    InfrastructureRequirements,
    OperationalRequirements,
    AcceptanceCriteria,
    TechnicalRequirements,
    PerformanceRequirements,
    SecurityRequirements,
    IntegrationRequirements,
    DeploymentRequirements,
    SuccessMetrics,
    Timeline,
    Dependencies,
    Risks,
    Assumptions,
    AgentCapabilities,
}

impl SectionId {
    /// Header matching order. The first section whose header matches a line wins.
    pub fn all() -> &'static [SectionId] {
        &[
            SectionId::Title,
            SectionId::Description,
            SectionId::ProblemStatement,
            SectionId::TargetUsers,
            SectionId::UserStories,
            SectionId::Requirements,
            SectionId::FunctionalRequirements,
            SectionId::NonFunctionalRequirements,
            SectionId::PlatformRequirements,
            SectionId::InfrastructureRequirements,
            SectionId::OperationalRequirements,
            SectionId::AcceptanceCriteria,
            SectionId::TechnicalRequirements,
            SectionId::PerformanceRequirements,
            SectionId::SecurityRequirements,
            SectionId::IntegrationRequirements,
            SectionId::DeploymentRequirements,
            SectionId::SuccessMetrics,
            SectionId::Timeline,
            SectionId::Dependencies,
            SectionId::Risks,
            SectionId::Assumptions,
            SectionId::AgentCapabilities,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Title => "title",
            SectionId::Description => "description",
            SectionId::ProblemStatement => "problem_statement",
            SectionId::TargetUsers => "target_users",
            SectionId::UserStories => "user_stories",
            SectionId::Requirements => "requirements",
            SectionId::FunctionalRequirements => "functional_requirements",
            SectionId::NonFunctionalRequirements => "non_functional_requirements",
            SectionId::PlatformRequirements => "platform_requirements",
            SectionId::InfrastructureRequirements => "infrastructure_requirements",
            SectionId::OperationalRequirements => "operational_requirements",
            SectionId::AcceptanceCriteria => "acceptance_criteria",
            SectionId::TechnicalRequirements => "technical_requirements",
            SectionId::PerformanceRequirements => "performance_requirements",
            SectionId::SecurityRequirements => "security_requirements",
            SectionId::IntegrationRequirements => "integration_requirements",
            SectionId::DeploymentRequirements => "deployment_requirements",
            SectionId::SuccessMetrics => "success_metrics",
            SectionId::Timeline => "timeline",
            SectionId::Dependencies => "dependencies",
            SectionId::Risks => "risks",
            SectionId::Assumptions => "assumptions",
            SectionId::AgentCapabilities => "agent_capabilities",
        }
    }

    /// Human-readable header label, as written in a PRD heading.
    pub fn label(self) -> &'static str {
        match self {
            SectionId::Title => "Title",
            SectionId::Description => "Description",
            SectionId::ProblemStatement => "Problem Statement",
            SectionId::TargetUsers => "Target Users",
            SectionId::UserStories => "User Stories",
            SectionId::Requirements => "Requirements",
            SectionId::FunctionalRequirements => "Functional Requirements",
            SectionId::NonFunctionalRequirements => "Non-Functional Requirements",
            SectionId::PlatformRequirements => "Platform Requirements",
            SectionId::InfrastructureRequirements => "Infrastructure Requirements",
            SectionId::OperationalRequirements => "Operational Requirements",
            SectionId::AcceptanceCriteria => "Acceptance Criteria",
            SectionId::TechnicalRequirements => "Technical Requirements",
            SectionId::PerformanceRequirements => "Performance Requirements",
            SectionId::SecurityRequirements => "Security Requirements",
            SectionId::IntegrationRequirements => "Integration Requirements",
            SectionId::DeploymentRequirements => "Deployment Requirements",
            SectionId::SuccessMetrics => "Success Metrics",
            SectionId::Timeline => "Timeline",
            SectionId::Dependencies => "Dependencies",
            SectionId::Risks => "Risks",
            SectionId::Assumptions => "Assumptions",
            SectionId::AgentCapabilities => "Agent Capabilities",
        }
    }

    pub fn field_kind(self) -> FieldKind {
        match self {
            SectionId::Title | SectionId::Description | SectionId::ProblemStatement => {
                FieldKind::FreeText
            }
            SectionId::PerformanceRequirements => FieldKind::KeyValueMap,
            SectionId::Timeline => FieldKind::TimelineStruct,
            SectionId::TargetUsers
            | SectionId::UserStories
            | SectionId::Requirements
            | SectionId::FunctionalRequirements
            | SectionId::NonFunctionalRequirements
            | SectionId::PlatformRequirements
            | SectionId::InfrastructureRequirements
            | SectionId::OperationalRequirements
            | SectionId::AcceptanceCriteria
            | SectionId::TechnicalRequirements
            | SectionId::SecurityRequirements
            | SectionId::IntegrationRequirements
            | SectionId::DeploymentRequirements
            | SectionId::SuccessMetrics
            | SectionId::Dependencies
            | SectionId::Risks
            | SectionId::Assumptions
            | SectionId::AgentCapabilities => FieldKind::ListOfString,
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SectionId {
    type Err = crate::error::PrdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| crate::error::PrdError::InvalidSection(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
