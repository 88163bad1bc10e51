//! Cross-module consistency checker
//!
//! A fixed battery of hand-written structural checks over the snapshot,
//! grouped into seven categories (Branch, Location, Department, UnitType,
//! Unit, Room, Resource). Unlike the checklist interpreter these checks are
//! code, not data; each category contributes zero or more issues directly.
//!
//! Checks record themselves through an explicit [`Tracker`] accumulator so
//! every category is independently unit-testable and no counting state
//! hides in closures. A check that yields no issue still counts toward
//! `totalChecks`/`passCount`.

mod branch;
mod department;
mod location;
mod resource;
mod room;
mod unit;
mod unit_type;

use crate::config::ConsistencyConfig;
use crate::issue::{Issue, Severity};
use crate::snapshot::Snapshot;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-category check/issue totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub checks: usize,
    pub issues: usize,
}

/// Accumulator threaded through every category's checks
#[derive(Debug, Default)]
pub struct Tracker {
    issues: Vec<Issue>,
    checks_run: usize,
    by_category: IndexMap<String, CategoryStat>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one check that produced at most one issue
    pub fn check(&mut self, category: &str, issue: Option<Issue>) {
        self.check_many(category, issue.into_iter().collect());
    }

    /// Record one check that produced any number of issues
    pub fn check_many(&mut self, category: &str, issues: Vec<Issue>) {
        self.checks_run += 1;
        let stat = self.by_category.entry(category.to_string()).or_default();
        stat.checks += 1;
        stat.issues += issues.len();
        self.issues.extend(issues);
    }

    /// Issues recorded so far
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Checks recorded so far
    pub fn checks_run(&self) -> usize {
        self.checks_run
    }

    fn finish(self) -> ConsistencyResult {
        ConsistencyResult::build(self.checks_run, self.issues, self.by_category)
    }
}

/// The consistency checker's full output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyResult {
    pub total_checks: usize,
    pub pass_count: usize,
    pub issues: Vec<Issue>,
    pub blockers: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub infos: Vec<Issue>,
    /// 0-100, penalized per issue by severity
    pub score: u32,
    pub category_summary: IndexMap<String, CategoryStat>,
}

impl ConsistencyResult {
    fn build(
        total_checks: usize,
        issues: Vec<Issue>,
        category_summary: IndexMap<String, CategoryStat>,
    ) -> Self {
        let filter = |severity: Severity| -> Vec<Issue> {
            issues
                .iter()
                .filter(|i| i.severity == severity)
                .cloned()
                .collect()
        };
        let blockers = filter(Severity::Blocker);
        let warnings = filter(Severity::Warning);
        let infos = filter(Severity::Info);

        let raw: f64 = 100.0 - issues.iter().map(|i| i.severity.penalty()).sum::<f64>();
        let score = raw.round().clamp(0.0, 100.0) as u32;

        Self {
            total_checks,
            pass_count: total_checks.saturating_sub(issues.len()),
            issues,
            blockers,
            warnings,
            infos,
            score,
            category_summary,
        }
    }
}

/// Run all consistency checks against a snapshot
pub fn evaluate(ctx: &Snapshot, config: &ConsistencyConfig) -> ConsistencyResult {
    let mut tracker = Tracker::new();

    branch::run(ctx, &mut tracker);
    location::run(ctx, config, &mut tracker);
    department::run(ctx, &mut tracker);
    unit_type::run(ctx, &mut tracker);
    unit::run(ctx, config, &mut tracker);
    room::run(ctx, config, &mut tracker);
    resource::run(ctx, config, &mut tracker);

    let result = tracker.finish();
    debug!(
        checks = result.total_checks,
        issues = result.issues.len(),
        score = result.score,
        "consistency checks complete"
    );
    result
}
