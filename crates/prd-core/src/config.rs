use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const PRD_DIR: &str = ".prd";
pub const CONFIG_FILE: &str = ".prd/config.yaml";

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// IntakeConfig
// ---------------------------------------------------------------------------

/// Limits applied to uploaded files before they reach the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeConfig {
    #[serde(default = "default_max_content_bytes")]
    pub max_content_bytes: usize,
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_max_content_bytes() -> usize {
    1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    vec![".md".to_string(), ".txt".to_string()]
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_content_bytes: default_max_content_bytes(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl IntakeConfig {
    pub fn allows(&self, filename: &str) -> bool {
        let lower = filename.to_lowercase();
        self.allowed_extensions
            .iter()
            .any(|ext| lower.ends_with(&ext.to_lowercase()))
    }
}

// ---------------------------------------------------------------------------
// ValidationConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Completeness below this percentage produces a warning.
    #[serde(default = "default_low_completeness")]
    pub low_completeness_threshold: f64,
    #[serde(default = "default_max_title_len")]
    pub max_title_len: usize,
    #[serde(default = "default_max_requirements")]
    pub max_requirements: usize,
}

fn default_low_completeness() -> f64 {
    50.0
}

fn default_max_title_len() -> usize {
    200
}

fn default_max_requirements() -> usize {
    50
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            low_completeness_threshold: default_low_completeness(),
            max_title_len: default_max_title_len(),
            max_requirements: default_max_requirements(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub intake: IntakeConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl Config {
    /// Load `.prd/config.yaml`, falling back to defaults when it does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&data)?)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = config_path(root);
        let data = serde_yaml::to_string(self)?;
        atomic_write(&path, data.as_bytes())
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let threshold = self.validation.low_completeness_threshold;
        if !(0.0..=100.0).contains(&threshold) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "validation.low_completeness_threshold must be within 0-100, got {threshold}"
                ),
            });
        }

        if self.intake.max_content_bytes == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "intake.max_content_bytes is 0: every upload would be rejected"
                    .to_string(),
            });
        }

        if self.intake.allowed_extensions.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "intake.allowed_extensions is empty".to_string(),
            });
        }

        for ext in &self.intake.allowed_extensions {
            if !ext.starts_with('.') {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("extension '{ext}' should start with '.'"),
                });
            }
        }

        if self.validation.max_title_len == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "validation.max_title_len is 0: every title will be flagged".to_string(),
            });
        }

        warnings
    }
}

/// Write via a tempfile in the same directory so a crash never leaves a
/// half-written config behind.
fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
