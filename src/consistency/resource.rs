//! Resource category: state hygiene and availability ratios

use super::Tracker;
use crate::config::ConsistencyConfig;
use crate::issue::{category, Issue, Severity};
use crate::snapshot::Snapshot;

pub(super) fn run(ctx: &Snapshot, config: &ConsistencyConfig, out: &mut Tracker) {
    let active_units: Vec<_> = ctx.units.active().collect();
    let total_resources: usize = active_units.iter().map(|u| u.resources.total).sum();

    // Resources stranded in deactivated units
    let in_inactive: usize = ctx
        .units
        .units
        .iter()
        .filter(|u| !u.is_active)
        .map(|u| u.resources.total)
        .sum();
    out.check(
        category::RESOURCE,
        (in_inactive > 0).then(|| {
            Issue::new(
                "RES-001",
                category::RESOURCE,
                Severity::Warning,
                format!("{in_inactive} active resource(s) in inactive units"),
                "These resources can't be used since their parent unit is deactivated.",
                "Deactivate these resources or reactivate their parent units.",
            )
            .with_count(in_inactive)
        }),
    );

    // The snapshot only carries per-state counts, not individual records,
    // so blocked/reserved reasons can only be surfaced for verification.
    let blocked: usize = active_units.iter().map(|u| u.resources.in_state("BLOCKED")).sum();
    out.check(
        category::RESOURCE,
        (blocked > 0).then(|| {
            Issue::new(
                "RES-002",
                category::RESOURCE,
                Severity::Info,
                format!("{blocked} BLOCKED resource(s); verify blockedReason is documented"),
                "Blocked resources should have a reason documented for auditing.",
                "Add blockedReason to each blocked resource.",
            )
            .with_count(blocked)
        }),
    );

    let reserved: usize = active_units.iter().map(|u| u.resources.in_state("RESERVED")).sum();
    out.check(
        category::RESOURCE,
        (reserved > 0).then(|| {
            Issue::new(
                "RES-003",
                category::RESOURCE,
                Severity::Info,
                format!("{reserved} RESERVED resource(s); verify reservedReason is documented"),
                "Reserved resources should document who/why they're reserved.",
                "Add reservedReason to each reserved resource.",
            )
            .with_count(reserved)
        }),
    );

    // High ratio of unavailable resources. Skipped on nearly-empty
    // configurations to avoid false positives.
    let mut unavailable_issue = None;
    if total_resources >= config.unavailable_min_resources {
        let unavailable: usize = active_units
            .iter()
            .map(|u| {
                u.resources.in_state("MAINTENANCE")
                    + u.resources.in_state("BLOCKED")
                    + u.resources.in_state("INACTIVE")
            })
            .sum();
        let pct = (unavailable as f64 / total_resources as f64 * 100.0).round() as u32;
        if pct > config.unavailable_percent_threshold {
            unavailable_issue = Some(Issue::new(
                "RES-004",
                category::RESOURCE,
                Severity::Warning,
                format!(
                    "{pct}% of resources are MAINTENANCE/BLOCKED/INACTIVE \
                     ({unavailable}/{total_resources})"
                ),
                "A high percentage of unavailable resources reduces operational capacity.",
                "Review blocked/maintenance resources and return them to AVAILABLE where \
                 possible.",
            ));
        }
    }
    out.check(category::RESOURCE, unavailable_issue);

    out.check(
        category::RESOURCE,
        (total_resources == 0 && !active_units.is_empty()).then(|| {
            Issue::new(
                "RES-007",
                category::RESOURCE,
                Severity::Warning,
                "No resources (beds, chairs, bays, etc.) created across all units",
                "Units need resources for patient allocation and scheduling.",
                "Add resources to units; at minimum, add beds to IPD units.",
            )
        }),
    );
}
