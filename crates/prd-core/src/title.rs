use crate::prd::UNTITLED;

const EXPLICIT_TITLE_HEADERS: &[&str] = &["## title", "## **title**", "### title", "### **title**"];
const GENERIC_H2_WORDS: &[&str] = &["description", "overview", "summary", "introduction", "title"];
const BOILERPLATE: &[&str] = &[
    "product requirements document",
    "prd",
    "document information",
    "table of contents",
    "overview",
    "summary",
];
const MAX_TITLE_CHARS: usize = 100;

// ---------------------------------------------------------------------------
// Strategy chain
// ---------------------------------------------------------------------------

/// A title strategy: inspects the raw lines and either claims a title or
/// passes to the next one.
pub struct TitleStrategy {
    pub id: &'static str,
    pub resolve: fn(&[&str]) -> Option<String>,
}

const STRATEGIES: &[TitleStrategy] = &[
    TitleStrategy {
        id: "explicit_title_section",
        resolve: explicit_title_section,
    },
    TitleStrategy {
        id: "first_h1",
        resolve: first_h1,
    },
    TitleStrategy {
        id: "first_h2",
        resolve: first_h2,
    },
    TitleStrategy {
        id: "leading_line",
        resolve: leading_line,
    },
    TitleStrategy {
        id: "first_non_empty_line",
        resolve: first_non_empty_line,
    },
];

pub fn default_strategies() -> &'static [TitleStrategy] {
    STRATEGIES
}

/// Resolve a document title. Always returns a non-empty string.
pub fn resolve(lines: &[&str]) -> String {
    for strategy in default_strategies() {
        if let Some(title) = (strategy.resolve)(lines) {
            tracing::debug!(strategy = strategy.id, %title, "title resolved");
            return title;
        }
    }
    UNTITLED.to_string()
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn explicit_title_section(lines: &[&str]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        let lower = line.trim().to_lowercase();
        if !EXPLICIT_TITLE_HEADERS.contains(&lower.as_str()) {
            continue;
        }
        let mut window = lines.iter().skip(i + 1).take(2).map(|l| l.trim());
        if let Some(next) = window.find(|l| !l.is_empty() && !l.starts_with('#')) {
            return Some(next.to_string());
        }
    }
    None
}

fn heading_text<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.trim()
        .strip_prefix(prefix)
        .map(str::trim)
        .filter(|t| t.chars().count() > 3)
}

fn first_h1(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .find_map(|l| heading_text(l, "# "))
        .map(str::to_string)
}

fn first_h2(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .filter(|l| {
            let lower = l.to_lowercase();
            !GENERIC_H2_WORDS.iter().any(|w| lower.contains(w))
        })
        .find_map(|l| heading_text(l, "## "))
        .map(str::to_string)
}

fn starts_with_ordinal(line: &str) -> bool {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && line[digits..].starts_with('.')
}

fn leading_line(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .take(5)
        .filter(|l| {
            let lower = l.to_lowercase();
            !BOILERPLATE.iter().any(|b| lower.contains(b))
        })
        .find(|l| {
            let len = l.chars().count();
            len > 5
                && len < MAX_TITLE_CHARS
                && !l.starts_with('#')
                && !l.starts_with('-')
                && !l.starts_with('*')
                && !starts_with_ordinal(l)
        })
        .map(str::to_string)
}

fn first_non_empty_line(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .map(|l| l.chars().take(MAX_TITLE_CHARS).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
