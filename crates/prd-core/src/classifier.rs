use crate::types::PrdType;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Keyword tables
// ---------------------------------------------------------------------------

/// Matched as plain substrings of the lower-cased document, so `api` also
/// counts inside `rapid`.
pub const PLATFORM_KEYWORDS: &[&str] = &[
    "platform",
    "infrastructure",
    "architecture",
    "system",
    "framework",
    "api",
    "backend",
    "frontend",
    "database",
    "deployment",
    "scaling",
    "microservices",
    "kubernetes",
    "docker",
    "cloud",
    "monitoring",
    "logging",
    "authentication",
    "authorization",
    "pipeline",
    "orchestrator",
    "dashboard",
];

pub const AGENT_KEYWORDS: &[&str] = &[
    "agent",
    "bot",
    "chatbot",
    "assistant",
    "ai",
    "nlp",
    "machine learning",
    "artificial intelligence",
    "automation",
    "workflow",
    "llm",
    "gpt",
    "openai",
    "anthropic",
    "claude",
    "conversation",
    "prediction",
    "recommendation",
];

const EXPLICIT_MARKERS: &[&str] = &["prd type", "platform prd", "agent prd", "type:", "category:"];

const PLATFORM_TITLE_WORDS: &[&str] = &["platform", "system", "infrastructure", "framework"];
const AGENT_TITLE_WORDS: &[&str] = &["agent", "bot", "assistant", "ai"];
const TITLE_BOOST: u32 = 3;

const PLATFORM_REQUIREMENT_WORDS: &[&str] =
    &["api", "database", "deployment", "scaling", "infrastructure"];
const AGENT_REQUIREMENT_WORDS: &[&str] = &["nlp", "ml", "training", "model", "intelligence"];
const REQUIREMENT_BOOST: u32 = 2;

// ---------------------------------------------------------------------------
// TypeScores
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeScores {
    pub platform: u32,
    pub agent: u32,
    /// Type stated outright in the document, which bypasses scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit: Option<PrdType>,
}

impl TypeScores {
    /// Ties go to `Agent`.
    pub fn decide(&self) -> PrdType {
        if let Some(explicit) = self.explicit {
            return explicit;
        }
        if self.platform > self.agent {
            PrdType::Platform
        } else {
            PrdType::Agent
        }
    }
}

fn count_hits(haystack: &str, needles: &[&str]) -> u32 {
    needles.iter().filter(|n| haystack.contains(*n)).count() as u32
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(*n))
}

fn explicit_type(content_lower: &str) -> Option<PrdType> {
    if !contains_any(content_lower, EXPLICIT_MARKERS) {
        return None;
    }
    match (
        content_lower.contains("platform"),
        content_lower.contains("agent"),
    ) {
        (true, false) => Some(PrdType::Platform),
        (false, true) => Some(PrdType::Agent),
        _ => None,
    }
}

pub fn score(content: &str, title: &str, requirements_text: &str) -> TypeScores {
    let content_lower = content.to_lowercase();
    let explicit = explicit_type(&content_lower);

    let mut platform = count_hits(&content_lower, PLATFORM_KEYWORDS);
    let mut agent = count_hits(&content_lower, AGENT_KEYWORDS);

    let title_lower = title.to_lowercase();
    if contains_any(&title_lower, PLATFORM_TITLE_WORDS) {
        platform += TITLE_BOOST;
    }
    if contains_any(&title_lower, AGENT_TITLE_WORDS) {
        agent += TITLE_BOOST;
    }

    let requirements_lower = requirements_text.to_lowercase();
    if contains_any(&requirements_lower, PLATFORM_REQUIREMENT_WORDS) {
        platform += REQUIREMENT_BOOST;
    }
    if contains_any(&requirements_lower, AGENT_REQUIREMENT_WORDS) {
        agent += REQUIREMENT_BOOST;
    }

    TypeScores {
        platform,
        agent,
        explicit,
    }
}

pub fn classify(content: &str, title: &str, requirements_text: &str) -> PrdType {
    let scores = score(content, title, requirements_text);
    let decided = scores.decide();
    tracing::debug!(
        platform = scores.platform,
        agent = scores.agent,
        explicit = ?scores.explicit,
        prd_type = %decided,
        "prd classified"
    );
    decided
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
