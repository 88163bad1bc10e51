//! Report rendering
//!
//! Renders evaluation results as Text, JSON, or Markdown for the CLI and
//! for embedding in dashboards. JSON output is the verbatim wire contract;
//! the text and markdown forms are presentation only.

use crate::consistency::ConsistencyResult;
use crate::fixes::FixReport;
use crate::golive::GoLiveResult;
use crate::health::BranchHealth;
use crate::issue::Issue;
use crate::readiness::{CheckStatus, ReadinessResult};
use serde::Serialize;
use std::fmt::Write as FmtWrite;

/// Report output format
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

/// Renderable evaluation result
pub trait Render: Serialize {
    /// Format as human-readable text
    fn format_text(&self) -> String;

    /// Format as Markdown
    fn format_markdown(&self) -> String;

    /// Format as pretty-printed JSON
    fn format_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format based on format type
    fn format(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Text => self.format_text(),
            ReportFormat::Json => self.format_json(),
            ReportFormat::Markdown => self.format_markdown(),
        }
    }
}

fn write_issue_line(out: &mut String, issue: &Issue) {
    writeln!(out, "  [{}] {}: {}", issue.severity, issue.id, issue.title).unwrap();
    writeln!(out, "         fix: {}", issue.fix_hint).unwrap();
}

impl Render for ConsistencyResult {
    fn format_text(&self) -> String {
        let mut out = String::new();

        writeln!(out, "CONSISTENCY REPORT").unwrap();
        writeln!(out, "==================\n").unwrap();
        writeln!(
            out,
            "Score: {}/100  ({}/{} checks passed)",
            self.score, self.pass_count, self.total_checks
        )
        .unwrap();
        writeln!(
            out,
            "Issues: {} ({} blockers, {} warnings, {} infos)\n",
            self.issues.len(),
            self.blockers.len(),
            self.warnings.len(),
            self.infos.len()
        )
        .unwrap();

        for (category, stat) in &self.category_summary {
            writeln!(
                out,
                "{} {} {}/{} checks, {} issue(s)",
                category,
                ".".repeat(24usize.saturating_sub(category.len())),
                stat.checks.saturating_sub(stat.issues.min(stat.checks)),
                stat.checks,
                stat.issues
            )
            .unwrap();
        }
        if !self.issues.is_empty() {
            writeln!(out).unwrap();
        }
        for issue in &self.issues {
            write_issue_line(&mut out, issue);
        }

        out
    }

    fn format_markdown(&self) -> String {
        let mut out = String::new();

        writeln!(out, "# Consistency Report\n").unwrap();
        writeln!(out, "| Metric | Value |").unwrap();
        writeln!(out, "|--------|-------|").unwrap();
        writeln!(out, "| Score | {}/100 |", self.score).unwrap();
        writeln!(out, "| Checks passed | {}/{} |", self.pass_count, self.total_checks).unwrap();
        writeln!(out, "| Blockers | {} |", self.blockers.len()).unwrap();
        writeln!(out, "| Warnings | {} |", self.warnings.len()).unwrap();
        writeln!(out, "| Infos | {} |\n", self.infos.len()).unwrap();

        if !self.issues.is_empty() {
            writeln!(out, "## Issues\n").unwrap();
            for issue in &self.issues {
                writeln!(
                    out,
                    "- **[{}] {}** ({}): {}",
                    issue.severity, issue.id, issue.category, issue.title
                )
                .unwrap();
            }
        }

        out
    }
}

impl Render for ReadinessResult {
    fn format_text(&self) -> String {
        let mut out = String::new();

        writeln!(out, "STANDARDS READINESS REPORT").unwrap();
        writeln!(out, "==========================\n").unwrap();
        writeln!(
            out,
            "Overall: {}%  ({} passed, {} failed)",
            self.overall_score, self.pass_count, self.fail_count
        )
        .unwrap();
        writeln!(out).unwrap();

        for chapter in &self.chapters {
            writeln!(
                out,
                "Chapter {} - {}: {}%",
                chapter.number, chapter.name, chapter.score
            )
            .unwrap();
            for check in &chapter.checks {
                let status = match check.status {
                    CheckStatus::Pass => "PASS",
                    CheckStatus::Fail => "FAIL",
                };
                writeln!(out, "  [{}] {} {}", status, check.id, check.description).unwrap();
                if check.status == CheckStatus::Fail {
                    if let Some(details) = &check.details {
                        writeln!(out, "         {}", details).unwrap();
                    }
                }
            }
        }

        if !self.blockers.is_empty() {
            writeln!(out, "\nBlockers:").unwrap();
            for blocker in &self.blockers {
                writeln!(out, "  - {}", blocker).unwrap();
            }
        }

        out
    }

    fn format_markdown(&self) -> String {
        let mut out = String::new();

        writeln!(out, "# Standards Readiness Report\n").unwrap();
        writeln!(out, "Overall score: **{}%**\n", self.overall_score).unwrap();
        writeln!(out, "| Chapter | Name | Score |").unwrap();
        writeln!(out, "|---------|------|-------|").unwrap();
        for chapter in &self.chapters {
            writeln!(
                out,
                "| {} | {} | {}% |",
                chapter.number, chapter.name, chapter.score
            )
            .unwrap();
        }
        writeln!(out).unwrap();

        for chapter in &self.chapters {
            writeln!(out, "## Chapter {}: {}\n", chapter.number, chapter.name).unwrap();
            for check in &chapter.checks {
                let mark = match check.status {
                    CheckStatus::Pass => "x",
                    CheckStatus::Fail => " ",
                };
                writeln!(out, "- [{}] **{}**: {}", mark, check.id, check.description).unwrap();
            }
            writeln!(out).unwrap();
        }

        out
    }
}

impl Render for GoLiveResult {
    fn format_text(&self) -> String {
        let mut out = String::new();

        writeln!(out, "GO-LIVE READINESS").unwrap();
        writeln!(out, "=================\n").unwrap();
        writeln!(out, "Overall: {}%  (grade {:?})", self.overall, self.grade).unwrap();
        writeln!(
            out,
            "Gate: {}",
            if self.can_go_live { "GO" } else { "NO-GO" }
        )
        .unwrap();
        writeln!(out).unwrap();

        for category in self.categories.values() {
            writeln!(
                out,
                "{} {} {}% (weight {}, weighted {})",
                category.name,
                ".".repeat(24usize.saturating_sub(category.name.len())),
                category.score,
                category.weight,
                category.weighted_score
            )
            .unwrap();
            for blocker in &category.blockers {
                writeln!(out, "  [BLOCKER] {}", blocker).unwrap();
            }
            for warning in &category.warnings {
                writeln!(out, "  [WARNING] {}", warning).unwrap();
            }
        }

        writeln!(out, "\n{}", self.recommendation).unwrap();
        out
    }

    fn format_markdown(&self) -> String {
        let mut out = String::new();

        writeln!(out, "# Go-Live Readiness\n").unwrap();
        writeln!(
            out,
            "**{}%** (grade {:?}) - {}\n",
            self.overall,
            self.grade,
            if self.can_go_live { "GO" } else { "NO-GO" }
        )
        .unwrap();
        writeln!(out, "| Category | Score | Weight | Weighted |").unwrap();
        writeln!(out, "|----------|-------|--------|----------|").unwrap();
        for category in self.categories.values() {
            writeln!(
                out,
                "| {} | {}% | {} | {} |",
                category.name, category.score, category.weight, category.weighted_score
            )
            .unwrap();
        }
        writeln!(out, "\n{}", self.recommendation).unwrap();
        out
    }
}

impl Render for FixReport {
    fn format_text(&self) -> String {
        let mut out = String::new();

        writeln!(out, "FIX SUGGESTIONS").unwrap();
        writeln!(out, "===============\n").unwrap();
        writeln!(
            out,
            "{} suggestion(s): {} navigable, {} manual",
            self.total, self.navigable, self.manual
        )
        .unwrap();
        writeln!(out).unwrap();

        for suggestion in &self.suggestions {
            writeln!(out, "[{}] {}", suggestion.severity, suggestion.title).unwrap();
            writeln!(out, "  {}", suggestion.suggested_action).unwrap();
            if let Some(route) = &suggestion.navigate_to {
                writeln!(out, "  go to: {}", route).unwrap();
            }
        }

        out
    }

    fn format_markdown(&self) -> String {
        let mut out = String::new();

        writeln!(out, "# Fix Suggestions\n").unwrap();
        for suggestion in &self.suggestions {
            let route = suggestion
                .navigate_to
                .as_deref()
                .map(|r| format!(" (`{r}`)"))
                .unwrap_or_default();
            writeln!(
                out,
                "- **[{}]** {}{}",
                suggestion.severity, suggestion.title, route
            )
            .unwrap();
        }
        out
    }
}

impl Render for BranchHealth {
    fn format_text(&self) -> String {
        let mut out = String::new();

        writeln!(out, "BRANCH HEALTH: {}", self.branch_name).unwrap();
        writeln!(out, "{}\n", "=".repeat(15 + self.branch_name.len())).unwrap();
        writeln!(out, "Overall: {:?}", self.overall_health).unwrap();
        writeln!(out, "Consistency: {}/100", self.consistency_score).unwrap();
        writeln!(out, "Readiness:   {}%", self.readiness_score).unwrap();
        writeln!(out, "Go-live:     {}%", self.go_live_score).unwrap();
        writeln!(
            out,
            "Blockers: {}  Warnings: {}",
            self.total_blockers, self.total_warnings
        )
        .unwrap();
        writeln!(out, "\n{}", self.summary).unwrap();
        out
    }

    fn format_markdown(&self) -> String {
        let mut out = String::new();

        writeln!(out, "# Branch Health: {}\n", self.branch_name).unwrap();
        writeln!(out, "| Metric | Value |").unwrap();
        writeln!(out, "|--------|-------|").unwrap();
        writeln!(out, "| Overall | {:?} |", self.overall_health).unwrap();
        writeln!(out, "| Consistency | {}/100 |", self.consistency_score).unwrap();
        writeln!(out, "| Readiness | {}% |", self.readiness_score).unwrap();
        writeln!(out, "| Go-live | {}% |", self.go_live_score).unwrap();
        writeln!(out, "| Blockers | {} |", self.total_blockers).unwrap();
        writeln!(out, "\n{}", self.summary).unwrap();
        out
    }
}
