//! Composite branch health summary
//!
//! One-call rollup of the three evaluators for dashboards and sidebar
//! badges: overall tier, the individual scores, and a one-line summary.

use crate::consistency::ConsistencyResult;
use crate::golive::GoLiveResult;
use crate::readiness::ReadinessResult;
use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};

/// Overall health tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthTier {
    Excellent,
    Good,
    NeedsAttention,
    Critical,
}

/// Composite health status for one branch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchHealth {
    pub branch_id: String,
    pub branch_name: String,
    pub overall_health: HealthTier,
    pub consistency_score: u32,
    pub readiness_score: u32,
    pub go_live_score: u32,
    pub total_blockers: usize,
    pub total_warnings: usize,
    pub can_go_live: bool,
    pub summary: String,
}

/// Roll the three evaluation results up into one health status
pub fn summarize(
    ctx: &Snapshot,
    consistency: &ConsistencyResult,
    readiness: &ReadinessResult,
    golive: &GoLiveResult,
) -> BranchHealth {
    let total_blockers = golive.total_blockers;
    let total_warnings = golive.total_warnings;

    let overall_health = if total_blockers == 0 && consistency.score >= 90 {
        HealthTier::Excellent
    } else if total_blockers == 0 && consistency.score >= 70 {
        HealthTier::Good
    } else if total_blockers <= 3 {
        HealthTier::NeedsAttention
    } else {
        HealthTier::Critical
    };

    let summary = match overall_health {
        HealthTier::Excellent => {
            "Infrastructure is in great shape. All major areas are configured.".to_string()
        }
        HealthTier::Good => {
            "Infrastructure is progressing well. A few areas need attention.".to_string()
        }
        HealthTier::NeedsAttention => format!(
            "Infrastructure needs work. {total_blockers} blocker(s) and {total_warnings} \
             warning(s) found."
        ),
        HealthTier::Critical => format!(
            "Critical gaps found. {total_blockers} blocker(s) must be resolved before go-live."
        ),
    };

    BranchHealth {
        branch_id: ctx.branch.id.clone(),
        branch_name: ctx.branch.name.clone(),
        overall_health,
        consistency_score: consistency.score,
        readiness_score: readiness.overall_score,
        go_live_score: golive.overall,
        total_blockers,
        total_warnings,
        can_go_live: golive.can_go_live,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::Checklist;
    use crate::config::ConsistencyConfig;

    fn health_for(ctx: &Snapshot) -> BranchHealth {
        let consistency = crate::consistency::evaluate(ctx, &ConsistencyConfig::default());
        let readiness = crate::readiness::evaluate(ctx, &Checklist::builtin());
        let golive = crate::golive::aggregate(&consistency, &readiness);
        summarize(ctx, &consistency, &readiness, &golive)
    }

    #[test]
    fn test_empty_branch_is_not_excellent() {
        let health = health_for(&Snapshot::default());
        assert_ne!(health.overall_health, HealthTier::Excellent);
        assert!(!health.can_go_live);
        assert!(health.total_blockers > 0);
        assert!(!health.summary.is_empty());
    }

    #[test]
    fn test_tier_thresholds() {
        // Hand-rolled results exercise the tier decision table directly
        let ctx = Snapshot::default();
        let consistency = crate::consistency::evaluate(&ctx, &ConsistencyConfig::default());
        let readiness = crate::readiness::evaluate(&ctx, &Checklist::builtin());
        let golive = crate::golive::aggregate(&consistency, &readiness);

        let mut quiet_golive = golive.clone();
        quiet_golive.total_blockers = 0;
        let mut strong_consistency = consistency.clone();
        strong_consistency.score = 95;
        let health = summarize(&ctx, &strong_consistency, &readiness, &quiet_golive);
        assert_eq!(health.overall_health, HealthTier::Excellent);

        strong_consistency.score = 75;
        let health = summarize(&ctx, &strong_consistency, &readiness, &quiet_golive);
        assert_eq!(health.overall_health, HealthTier::Good);

        let mut few_blockers = golive.clone();
        few_blockers.total_blockers = 3;
        let health = summarize(&ctx, &consistency, &readiness, &few_blockers);
        assert_eq!(health.overall_health, HealthTier::NeedsAttention);

        let mut many_blockers = golive;
        many_blockers.total_blockers = 4;
        let health = summarize(&ctx, &consistency, &readiness, &many_blockers);
        assert_eq!(health.overall_health, HealthTier::Critical);
        assert!(health.summary.starts_with("Critical gaps found. 4 blocker(s)"));
    }

    #[test]
    fn test_wire_format() {
        let health = health_for(&Snapshot::default());
        let json = serde_json::to_string(&health).unwrap();
        assert!(json.contains("\"overallHealth\""));
        assert!(json.contains("\"consistencyScore\""));
        assert!(json.contains("\"goLiveScore\""));
        assert!(json.contains("\"canGoLive\""));
    }
}
