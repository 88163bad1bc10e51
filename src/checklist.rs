//! Standards checklist document
//!
//! The readiness checker is driven by an externally authored checklist:
//! chapters of declarative check descriptors, each naming a query type and
//! its parameters. A NABH-derived checklist is bundled as the default;
//! deployments can substitute their own document at load time. Checklist
//! content is trusted but may be edited independently of the code, so the
//! interpreter still fails closed on malformed descriptors.

use crate::issue::Severity;
use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_CHECKLIST: &str = include_str!("../data/nabh-checklist.json");

/// One declarative check: a query type plus its parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckDescriptor {
    pub id: String,
    pub description: String,
    pub severity: Severity,
    pub fix_hint: String,
    /// Query type name; untyped text until parsed by the interpreter
    pub query: String,
    /// Query parameters; shape depends on the query type
    #[serde(default)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

/// A named, independently weighted group of checks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub number: u32,
    pub name: String,
    pub checks: Vec<CheckDescriptor>,
}

/// The full checklist document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    /// Human-readable name of the standard the checklist mirrors
    #[serde(default)]
    pub standard: String,
    pub chapters: Vec<Chapter>,
}

impl Checklist {
    /// The bundled NABH physical-infrastructure checklist
    pub fn builtin() -> Self {
        serde_json::from_str(BUILTIN_CHECKLIST).expect("bundled checklist is valid JSON")
    }

    /// Load a checklist from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read checklist file {}", path.display()))?;
        let checklist: Self = serde_json::from_str(&content)
            .with_context(|| format!("invalid checklist JSON in {}", path.display()))?;
        Ok(checklist)
    }

    /// Total number of checks across all chapters
    pub fn check_count(&self) -> usize {
        self.chapters.iter().map(|c| c.checks.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_builtin_checklist_parses() {
        let checklist = Checklist::builtin();
        assert!(!checklist.chapters.is_empty());
        assert!(checklist.check_count() > 20);
    }

    #[test]
    fn test_builtin_has_go_live_chapters() {
        // The go-live scorer maps chapters 8, 5, and 1-2 into its categories
        let checklist = Checklist::builtin();
        for number in [1, 2, 5, 8] {
            assert!(
                checklist.chapters.iter().any(|c| c.number == number),
                "chapter {number} missing from bundled checklist"
            );
        }
    }

    #[test]
    fn test_builtin_descriptor_ids_are_unique() {
        let checklist = Checklist::builtin();
        let mut seen = std::collections::HashSet::new();
        for chapter in &checklist.chapters {
            for check in &chapter.checks {
                assert!(seen.insert(check.id.clone()), "duplicate check id {}", check.id);
            }
        }
    }

    #[test]
    fn test_load_from_file() {
        let json = r#"{
            "standard": "Test Standard",
            "chapters": [{
                "number": 1,
                "name": "Basics",
                "checks": [{
                    "id": "T-1",
                    "description": "OPD exists",
                    "severity": "BLOCKER",
                    "fixHint": "Create an OPD unit.",
                    "query": "UNIT_TYPE_EXISTS",
                    "params": {"unitTypeCode": "OPD"}
                }]
            }]
        }"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let checklist = Checklist::load(file.path()).unwrap();
        assert_eq!(checklist.standard, "Test Standard");
        assert_eq!(checklist.check_count(), 1);
        assert_eq!(checklist.chapters[0].checks[0].severity, Severity::Blocker);
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        assert!(Checklist::load(file.path()).is_err());
    }

    #[test]
    fn test_descriptor_params_default_empty() {
        let json = r#"{"id": "X-1", "description": "d", "severity": "INFO",
                       "fixHint": "f", "query": "BED_COUNT_SYNC"}"#;
        let descriptor: CheckDescriptor = serde_json::from_str(json).unwrap();
        assert!(descriptor.params.is_empty());
    }
}
