//! Draft file load and submitted-gig write helpers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::core::draft::GigDraft;
use crate::core::validators::validate_invariants;

/// JSON Schema for draft files.
pub const DRAFT_SCHEMA: &str = include_str!("../../../schemas/gig_draft/v1.schema.json");

/// Load and validate a draft from disk (schema + invariants).
pub fn load_draft(path: &Path) -> Result<GigDraft> {
    debug!(path = %path.display(), "loading draft");
    let contents =
        fs::read_to_string(path).with_context(|| format!("read draft {}", path.display()))?;
    parse_draft(&contents).with_context(|| format!("load draft {}", path.display()))
}

/// Parse and validate a draft from JSON text.
pub fn parse_draft(raw: &str) -> Result<GigDraft> {
    let value: Value = serde_json::from_str(raw).context("parse draft json")?;
    validate_schema(&value)?;
    let draft: GigDraft = serde_json::from_value(value).context("deserialize draft")?;
    let errors = validate_invariants(&draft);
    if !errors.is_empty() {
        return Err(anyhow!("draft invariants failed: {}", errors.join("; ")));
    }
    Ok(draft)
}

/// Write `value` as pretty-printed JSON with trailing newline.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let mut buf = serde_json::to_string_pretty(value).context("serialize json")?;
    buf.push('\n');
    fs::write(path, buf).with_context(|| format!("write {}", path.display()))
}

fn validate_schema(draft: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(DRAFT_SCHEMA).context("parse draft schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(draft) {
        let messages = compiled
            .iter_errors(draft)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!(
            "draft schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::complete_draft;

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("draft.json");
        let draft = complete_draft();
        write_json(&path, &draft).expect("write");
        assert_eq!(load_draft(&path).expect("load"), draft);
    }

    #[test]
    fn missing_fields_default() {
        let draft = parse_draft(r#"{"category": "design", "title": "Logo"}"#).expect("parse");
        assert_eq!(draft.category.as_deref(), Some("design"));
        assert_eq!(draft.amount, None);
        assert!(!draft.agreed_to_terms);
    }

    #[test]
    fn schema_rejects_unknown_fields_and_bad_types() {
        let err = parse_draft(r#"{"titel": "typo"}"#).expect_err("unknown field");
        assert!(format!("{err:#}").contains("schema validation failed"));

        let err = parse_draft(r#"{"amount": -5}"#).expect_err("negative amount");
        assert!(format!("{err:#}").contains("schema validation failed"));

        let err = parse_draft(r#"{"deadline": "March 1"}"#).expect_err("bad date");
        assert!(format!("{err:#}").contains("schema validation failed"));
    }

    #[test]
    fn invariants_reject_zero_amount() {
        let err = parse_draft(r#"{"amount": 0}"#).expect_err("zero amount");
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn padded_skills_rejected() {
        let err = parse_draft(r#"{"skills": ["Figma", " Figma", "Branding "]}"#)
            .expect_err("padded skills");
        assert!(err.to_string().contains("surrounding whitespace"));
    }

    #[test]
    fn too_many_skills_rejected() {
        let err = parse_draft(r#"{"skills": ["a","b","c","d","e","f"]}"#).expect_err("skills");
        assert!(format!("{err:#}").contains("schema validation failed"));
    }
}
