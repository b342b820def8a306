//! Upload boundary: turns raw file bytes into text the parser accepts.
//!
//! This is the only place encoding and size errors surface. Once content is
//! decoded, [`crate::parser::parse`] never fails.

use crate::config::{Config, IntakeConfig};
use crate::error::{PrdError, Result};
use crate::parser::{parse_and_validate, ParseOutcome};

pub fn decode_upload(bytes: &[u8], filename: Option<&str>, intake: &IntakeConfig) -> Result<String> {
    let filename = filename
        .filter(|f| !f.trim().is_empty())
        .ok_or(PrdError::MissingFilename)?;

    if !intake.allows(filename) {
        return Err(PrdError::UnsupportedFileType {
            filename: filename.to_string(),
            allowed: intake.allowed_extensions.join(", "),
        });
    }

    if bytes.len() > intake.max_content_bytes {
        return Err(PrdError::ContentTooLarge {
            size: bytes.len(),
            limit: intake.max_content_bytes,
        });
    }

    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Decode, parse and validate an uploaded file in one step.
pub fn parse_upload(bytes: &[u8], filename: Option<&str>, cfg: &Config) -> Result<ParseOutcome> {
    let content = decode_upload(bytes, filename, &cfg.intake)?;
    let outcome = parse_and_validate(&content, filename, &cfg.validation);
    tracing::debug!(
        filename = filename.unwrap_or_default(),
        bytes = bytes.len(),
        completeness = outcome.validation.completeness_score,
        "prd upload parsed"
    );
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf8_markdown() {
        let text = decode_upload("# Héllo".as_bytes(), Some("a.md"), &IntakeConfig::default())
            .unwrap();
        assert_eq!(text, "# Héllo");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let err = decode_upload(b"\xff\xfe", Some("a.md"), &IntakeConfig::default()).unwrap_err();
        assert!(matches!(err, PrdError::InvalidEncoding(_)));
    }

    #[test]
    fn rejects_missing_filename() {
        let intake = IntakeConfig::default();
        assert!(matches!(
            decode_upload(b"x", None, &intake).unwrap_err(),
            PrdError::MissingFilename
        ));
        assert!(matches!(
            decode_upload(b"x", Some("  "), &intake).unwrap_err(),
            PrdError::MissingFilename
        ));
    }

    #[test]
    fn rejects_unsupported_extension() {
        let err = decode_upload(b"x", Some("deck.pdf"), &IntakeConfig::default()).unwrap_err();
        assert!(matches!(err, PrdError::UnsupportedFileType { .. }));
        assert!(err.to_string().contains(".md, .txt"));
    }

    #[test]
    fn rejects_oversized_content() {
        let intake = IntakeConfig {
            max_content_bytes: 4,
            ..Default::default()
        };
        let err = decode_upload(b"12345", Some("a.txt"), &intake).unwrap_err();
        assert!(matches!(
            err,
            PrdError::ContentTooLarge { size: 5, limit: 4 }
        ));
        assert!(decode_upload(b"1234", Some("a.txt"), &intake).is_ok());
    }

    #[test]
    fn parse_upload_runs_the_pipeline() {
        let doc = b"# Billing Platform\n## Description\nInvoices\n## Problem Statement\nLate invoices";
        let outcome = parse_upload(doc, Some("billing.md"), &Config::default()).unwrap();
        assert_eq!(outcome.prd.title, "Billing Platform");
        assert_eq!(outcome.prd.original_filename.as_deref(), Some("billing.md"));
        assert!(outcome.validation.is_valid);
        assert_eq!(outcome.validation.completeness_score, 30.0);
    }
}
