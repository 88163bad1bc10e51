//! Shared issue vocabulary
//!
//! Every checker in the engine reports findings through the same `Issue`
//! record, tagged with a `Severity` and a category string. Severity carries
//! its own scoring weight and sort rank so the two cannot drift apart
//! between components.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of an issue, ordered by urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Must be resolved before go-live
    Blocker,
    /// Should be fixed but not blocking
    Warning,
    /// Informational
    Info,
}

impl Severity {
    /// Checklist weight used by the readiness scorer
    pub fn weight(self) -> u32 {
        match self {
            Severity::Blocker => 3,
            Severity::Warning => 2,
            Severity::Info => 1,
        }
    }

    /// Penalty subtracted from the consistency score per issue
    pub fn penalty(self) -> f64 {
        match self {
            Severity::Blocker => 5.0,
            Severity::Warning => 2.0,
            Severity::Info => 0.5,
        }
    }

    /// Sort rank: blockers first
    pub fn rank(self) -> u8 {
        match self {
            Severity::Blocker => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Blocker => write!(f, "BLOCKER"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// Consistency-check categories
///
/// Categories double as routing keys for fix suggestions, so the constants
/// live here rather than in the consistency module.
pub mod category {
    pub const BRANCH: &str = "BRANCH";
    pub const LOCATION: &str = "LOCATION";
    pub const DEPARTMENT: &str = "DEPARTMENT";
    pub const UNIT_TYPE: &str = "UNIT_TYPE";
    pub const UNIT: &str = "UNIT";
    pub const ROOM: &str = "ROOM";
    pub const RESOURCE: &str = "RESOURCE";
}

/// A single finding reported by a checker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Stable identifier, unique within one evaluation run
    pub id: String,
    /// Configuration domain the issue belongs to
    pub category: String,
    pub severity: Severity,
    /// One-line summary
    pub title: String,
    /// Why the rule fired
    pub details: String,
    /// Remediation guidance
    pub fix_hint: String,
    /// Concrete entity the issue is about, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// Cardinality when the issue aggregates multiple occurrences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl Issue {
    /// Create a new issue
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        severity: Severity,
        title: impl Into<String>,
        details: impl Into<String>,
        fix_hint: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            severity,
            title: title.into(),
            details: details.into(),
            fix_hint: fix_hint.into(),
            entity_type: None,
            entity_id: None,
            count: None,
        }
    }

    /// Attach the entity this issue is about
    pub fn for_entity(mut self, entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Attach an entity type without a concrete id
    pub fn for_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Attach an occurrence count
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}
