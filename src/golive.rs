//! Go-live score aggregator
//!
//! Folds the consistency checker's issues and the readiness scorecard into
//! three weighted categories and one overall score with a pass/fail gate.
//! Rounding happens per category before the weighted scores are summed;
//! downstream consumers depend on the exact integers this produces, so the
//! order is deliberate.

use crate::consistency::ConsistencyResult;
use crate::issue::{category, Severity};
use crate::readiness::{CheckStatus, ReadinessResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Letter grade over the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    fn from_score(score: u32) -> Self {
        match score {
            90.. => Grade::A,
            75.. => Grade::B,
            60.. => Grade::C,
            40.. => Grade::D,
            _ => Grade::F,
        }
    }
}

/// One weighted scoring category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoLiveCategory {
    pub name: String,
    /// Percentage points out of 100 this category contributes
    pub weight: u32,
    pub score: u32,
    pub weighted_score: u32,
    pub blockers: Vec<String>,
    pub warnings: Vec<String>,
    pub passed_checks: usize,
    pub total_checks: usize,
}

/// The composite go-live decision
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoLiveResult {
    pub overall: u32,
    pub grade: Grade,
    pub can_go_live: bool,
    pub phase: String,
    pub categories: IndexMap<String, GoLiveCategory>,
    pub total_blockers: usize,
    pub total_warnings: usize,
    pub recommendation: String,
    pub next_phase_hint: String,
}

/// Accumulates one category's pass/fail tallies before scoring
#[derive(Default)]
struct CategoryTally {
    blockers: Vec<String>,
    warnings: Vec<String>,
    passed: usize,
    total: usize,
}

impl CategoryTally {
    /// Fold in every check of the readiness chapters with the given numbers
    fn add_chapters(&mut self, readiness: &ReadinessResult, chapter_numbers: &[u32]) {
        for chapter in &readiness.chapters {
            if !chapter_numbers.contains(&chapter.number) {
                continue;
            }
            for check in &chapter.checks {
                self.total += 1;
                if check.status == CheckStatus::Pass {
                    self.passed += 1;
                } else if check.severity == Severity::Blocker {
                    self.blockers.push(format!("{}: {}", check.id, check.description));
                } else {
                    self.warnings.push(format!("{}: {}", check.id, check.description));
                }
            }
        }
    }

    /// Fold in consistency issues from the given categories. Info issues
    /// count as passed; they depress the consistency score, not this gate.
    fn add_issues(&mut self, consistency: &ConsistencyResult, categories: &[&str]) {
        for issue in &consistency.issues {
            if !categories.contains(&issue.category.as_str()) {
                continue;
            }
            self.total += 1;
            match issue.severity {
                Severity::Blocker => self.blockers.push(issue.title.clone()),
                Severity::Warning => self.warnings.push(issue.title.clone()),
                Severity::Info => self.passed += 1,
            }
        }
    }

    fn build(self, name: &str, weight: u32) -> GoLiveCategory {
        // A category with nothing to check passes vacuously
        let score = if self.total > 0 {
            ((self.passed as f64 / self.total as f64 * 100.0).round() as u32).min(100)
        } else {
            100
        };
        let weighted_score = (score as f64 * weight as f64 / 100.0).round() as u32;
        GoLiveCategory {
            name: name.to_string(),
            weight,
            score,
            weighted_score,
            blockers: self.blockers,
            warnings: self.warnings,
            passed_checks: self.passed,
            total_checks: self.total,
        }
    }
}

/// Aggregate consistency and readiness results into the go-live decision
pub fn aggregate(consistency: &ConsistencyResult, readiness: &ReadinessResult) -> GoLiveResult {
    // Branch Configuration: management chapter + branch/department issues
    let mut branch = CategoryTally::default();
    branch.add_chapters(readiness, &[8]);
    branch.add_issues(consistency, &[category::BRANCH, category::DEPARTMENT]);
    let branch = branch.build("Branch Configuration", 30);

    // Location & Safety: facility chapter + location issues
    let mut location = CategoryTally::default();
    location.add_chapters(readiness, &[5]);
    location.add_issues(consistency, &[category::LOCATION]);
    let location = location.build("Location & Safety", 35);

    // Units & Resources: access/care chapters + physical setup issues
    let mut units = CategoryTally::default();
    units.add_chapters(readiness, &[1, 2]);
    units.add_issues(
        consistency,
        &[category::UNIT_TYPE, category::UNIT, category::ROOM, category::RESOURCE],
    );
    let units = units.build("Units & Resources", 35);

    let all = [&branch, &location, &units];
    let overall: u32 = all.iter().map(|c| c.weighted_score).sum();
    let total_blockers: usize = all.iter().map(|c| c.blockers.len()).sum();
    let total_warnings: usize = all.iter().map(|c| c.warnings.len()).sum();

    let grade = Grade::from_score(overall);
    let can_go_live = total_blockers == 0 && overall >= 60;

    let recommendation = if can_go_live && grade == Grade::A {
        "Physical infrastructure is fully ready. Proceed to configure Services & Billing."
            .to_string()
    } else if can_go_live {
        format!(
            "Infrastructure ready (score: {overall}%). Address {total_warnings} warning(s) \
             for a higher score before moving on."
        )
    } else if total_blockers > 0 {
        format!(
            "Not ready. {total_blockers} blocker(s) must be resolved first. Run the \
             consistency check for details."
        )
    } else {
        format!(
            "Score too low ({overall}%). Improve location, unit, and room configuration \
             to reach 60%."
        )
    };

    debug!(overall, total_blockers, can_go_live, "go-live score aggregated");

    let mut categories = IndexMap::new();
    categories.insert("branchConfig".to_string(), branch);
    categories.insert("locationSafety".to_string(), location);
    categories.insert("unitsResources".to_string(), units);

    GoLiveResult {
        overall,
        grade,
        can_go_live,
        phase: "Physical Infrastructure".to_string(),
        categories,
        total_blockers,
        total_warnings,
        recommendation,
        next_phase_hint: "Once infrastructure is ready, the next phase adds Services & \
                          Billing checks to this score."
            .to_string(),
    }
}
