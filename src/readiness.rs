//! Standards readiness checker
//!
//! Runs the checklist query interpreter over every chapter of a checklist
//! document and produces a weighted, chaptered scorecard. Check weight
//! derives from severity (3/2/1); a chapter's score is the percentage of
//! weight earned, and the overall score is weight-earned over
//! weight-possible across the whole document, so chapters with more or
//! heavier checks dominate.
//!
//! A malformed descriptor fails its own check with a diagnostic detail;
//! it never aborts the chapter or the run.

use crate::checklist::Checklist;
use crate::issue::Severity;
use crate::query::Query;
use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome status of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    Pass,
    Fail,
}

/// Result of one checklist check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub id: String,
    pub description: String,
    pub status: CheckStatus,
    pub severity: Severity,
    pub fix_hint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Score for one chapter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterResult {
    pub number: u32,
    pub name: String,
    /// Percentage of chapter weight earned, 0-100
    pub score: u32,
    /// Sum of per-check weights
    pub max_score: u32,
    pub checks: Vec<CheckResult>,
}

/// The full readiness scorecard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResult {
    pub overall_score: u32,
    pub max_score: u32,
    pub chapters: Vec<ChapterResult>,
    /// Failed blocker checks as "<id>: <description>"
    pub blockers: Vec<String>,
    /// Failed warning checks as "<id>: <description>"
    pub warnings: Vec<String>,
    pub pass_count: u32,
    pub fail_count: u32,
}

/// Evaluate a checklist document against a snapshot
pub fn evaluate(ctx: &Snapshot, checklist: &Checklist) -> ReadinessResult {
    debug!(
        chapters = checklist.chapters.len(),
        checks = checklist.check_count(),
        "running readiness checks"
    );

    let mut chapters = Vec::with_capacity(checklist.chapters.len());
    let mut blockers = Vec::new();
    let mut warnings = Vec::new();
    let mut total_score = 0u32;
    let mut total_max = 0u32;
    let mut pass_count = 0u32;
    let mut fail_count = 0u32;

    for chapter in &checklist.chapters {
        let mut results = Vec::with_capacity(chapter.checks.len());
        let mut chapter_score = 0u32;
        let mut chapter_max = 0u32;

        for check in &chapter.checks {
            let weight = check.severity.weight();
            chapter_max += weight;

            let outcome = Query::run(&check.query, &check.params, ctx);

            if outcome.passed {
                chapter_score += weight;
                pass_count += 1;
            } else {
                fail_count += 1;
                match check.severity {
                    Severity::Blocker => {
                        blockers.push(format!("{}: {}", check.id, check.description));
                    }
                    Severity::Warning => {
                        warnings.push(format!("{}: {}", check.id, check.description));
                    }
                    // Info failures are counted but not listed
                    Severity::Info => {}
                }
            }

            results.push(CheckResult {
                id: check.id.clone(),
                description: check.description.clone(),
                status: if outcome.passed {
                    CheckStatus::Pass
                } else {
                    CheckStatus::Fail
                },
                severity: check.severity,
                fix_hint: check.fix_hint.clone(),
                details: outcome.details,
            });
        }

        total_score += chapter_score;
        total_max += chapter_max;

        chapters.push(ChapterResult {
            number: chapter.number,
            name: chapter.name.clone(),
            // A chapter with no checks is vacuously compliant
            score: if chapter_max > 0 {
                (chapter_score as f64 / chapter_max as f64 * 100.0).round() as u32
            } else {
                100
            },
            max_score: chapter_max,
            checks: results,
        });
    }

    ReadinessResult {
        overall_score: if total_max > 0 {
            (total_score as f64 / total_max as f64 * 100.0).round() as u32
        } else {
            0
        },
        max_score: total_max,
        chapters,
        blockers,
        warnings,
        pass_count,
        fail_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::{Chapter, CheckDescriptor};
    use serde_json::json;

    fn descriptor(id: &str, severity: Severity, query: &str, params: serde_json::Value) -> CheckDescriptor {
        CheckDescriptor {
            id: id.to_string(),
            description: format!("check {id}"),
            severity,
            fix_hint: "fix it".to_string(),
            query: query.to_string(),
            params: params.as_object().cloned().unwrap_or_default(),
        }
    }

    fn checklist(checks: Vec<CheckDescriptor>) -> Checklist {
        Checklist {
            standard: String::new(),
            chapters: vec![Chapter {
                number: 1,
                name: "Test".to_string(),
                checks,
            }],
        }
    }

    #[test]
    fn test_all_pass_scores_100() {
        let ctx = Snapshot::default();
        let list = checklist(vec![
            descriptor("T-1", Severity::Blocker, "ALWAYS_PASS", json!({})),
            descriptor("T-2", Severity::Info, "ALWAYS_PASS", json!({})),
        ]);
        let result = evaluate(&ctx, &list);
        assert_eq!(result.overall_score, 100);
        assert_eq!(result.max_score, 4);
        assert_eq!(result.pass_count, 2);
        assert_eq!(result.fail_count, 0);
        assert!(result.blockers.is_empty());
    }

    #[test]
    fn test_weights_follow_severity() {
        // One failing blocker (3) against one passing info (1): 1/4 = 25%
        let ctx = Snapshot::default();
        let list = checklist(vec![
            descriptor(
                "T-1",
                Severity::Blocker,
                "UNIT_TYPE_EXISTS",
                json!({"unitTypeCode": "OPD"}),
            ),
            descriptor("T-2", Severity::Info, "ALWAYS_PASS", json!({})),
        ]);
        let result = evaluate(&ctx, &list);
        assert_eq!(result.chapters[0].score, 25);
        assert_eq!(result.overall_score, 25);
    }

    #[test]
    fn test_failed_checks_listed_by_severity() {
        let ctx = Snapshot::default();
        let list = checklist(vec![
            descriptor(
                "T-1",
                Severity::Blocker,
                "UNIT_TYPE_EXISTS",
                json!({"unitTypeCode": "OPD"}),
            ),
            descriptor(
                "T-2",
                Severity::Warning,
                "LOCATION_HAS_EMERGENCY_EXIT",
                json!({}),
            ),
            descriptor(
                "T-3",
                Severity::Info,
                "ROOM_TYPE_EXISTS",
                json!({"roomType": "PROCEDURE"}),
            ),
        ]);
        let result = evaluate(&ctx, &list);
        assert_eq!(result.blockers, vec!["T-1: check T-1"]);
        assert_eq!(result.warnings, vec!["T-2: check T-2"]);
        // Info failure counted but not listed
        assert_eq!(result.fail_count, 3);
    }

    #[test]
    fn test_malformed_check_fails_without_aborting_run() {
        let ctx = Snapshot::default();
        let list = checklist(vec![
            descriptor("T-1", Severity::Warning, "UNIT_TYPE_EXISTS", json!({})),
            descriptor("T-2", Severity::Info, "ALWAYS_PASS", json!({})),
        ]);
        let result = evaluate(&ctx, &list);
        assert_eq!(result.pass_count, 1);
        assert_eq!(result.fail_count, 1);
        let bad = &result.chapters[0].checks[0];
        assert_eq!(bad.status, CheckStatus::Fail);
        assert!(bad.details.as_deref().unwrap().contains("unitTypeCode"));
    }

    #[test]
    fn test_unknown_query_detail_text() {
        let ctx = Snapshot::default();
        let list = checklist(vec![descriptor(
            "T-1",
            Severity::Info,
            "FUTURE_QUERY",
            json!({}),
        )]);
        let result = evaluate(&ctx, &list);
        assert_eq!(
            result.chapters[0].checks[0].details.as_deref(),
            Some("Unknown check query: FUTURE_QUERY")
        );
    }

    #[test]
    fn test_empty_chapter_scores_100_but_empty_checklist_scores_0() {
        let ctx = Snapshot::default();
        let list = Checklist {
            standard: String::new(),
            chapters: vec![Chapter {
                number: 3,
                name: "Empty".to_string(),
                checks: vec![],
            }],
        };
        let result = evaluate(&ctx, &list);
        assert_eq!(result.chapters[0].score, 100);
        assert_eq!(result.overall_score, 0);
        assert_eq!(result.max_score, 0);
    }

    #[test]
    fn test_chapter_scores_bounded() {
        let ctx = Snapshot::default();
        let result = evaluate(&ctx, &Checklist::builtin());
        for chapter in &result.chapters {
            assert!(chapter.score <= 100, "chapter {} out of range", chapter.number);
        }
        assert!(result.overall_score <= 100);
    }

    #[test]
    fn test_check_result_wire_format() {
        let ctx = Snapshot::default();
        let list = checklist(vec![descriptor("T-1", Severity::Info, "ALWAYS_PASS", json!({}))]);
        let result = evaluate(&ctx, &list);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"overallScore\""));
        assert!(json.contains("\"maxScore\""));
        assert!(json.contains("\"passCount\""));
        assert!(json.contains("\"status\":\"PASS\""));
    }
}
