//! Unit category: bed/room coverage, location binding, bed-count sync

use super::Tracker;
use crate::config::ConsistencyConfig;
use crate::issue::{category, Issue, Severity};
use crate::snapshot::Snapshot;
use std::collections::HashMap;

pub(super) fn run(ctx: &Snapshot, config: &ConsistencyConfig, out: &mut Tracker) {
    let active_units: Vec<_> = ctx.units.active().collect();
    let branch = &ctx.branch;

    // Bed-based units with no bed resources
    let bedless: Vec<Issue> = active_units
        .iter()
        .filter(|u| config.is_bed_based(&u.type_code) && u.resources.beds == 0)
        .map(|u| {
            Issue::new(
                format!("UNIT-001-{}", u.id),
                category::UNIT,
                Severity::Blocker,
                format!("{} unit \"{}\" has no beds", u.type_code, u.name),
                "Bed-based unit requires at least one active BED resource for admissions.",
                format!(
                    "Navigate to Units -> \"{}\" -> Resources and add BED resources.",
                    u.name
                ),
            )
            .for_entity("UNIT", &u.id)
        })
        .collect();
    out.check_many(category::UNIT, bedless);

    // Units with no rooms at all
    let roomless: Vec<Issue> = active_units
        .iter()
        .filter(|u| u.rooms.is_empty())
        .map(|u| {
            Issue::new(
                format!("UNIT-002-{}", u.id),
                category::UNIT,
                Severity::Warning,
                format!("Unit \"{}\" ({}) uses rooms but has none", u.name, u.type_code),
                "This unit is configured to use rooms, but zero rooms have been created.",
                format!("Add rooms to unit \"{}\" or disable room usage if not needed.", u.name),
            )
            .for_entity("UNIT", &u.id)
        })
        .collect();
    out.check_many(category::UNIT, roomless);

    let unlinked = active_units
        .iter()
        .filter(|u| u.location_node_id.is_none())
        .count();
    out.check(
        category::UNIT,
        (unlinked > 0).then(|| {
            Issue::new(
                "UNIT-003",
                category::UNIT,
                Severity::Info,
                format!("{unlinked} unit(s) not linked to a location node"),
                "Units should be mapped to location nodes for wayfinding and spatial \
                 tracking.",
                "Edit each unit and assign the appropriate location node.",
            )
            .with_count(unlinked)
        }),
    );

    // Duplicate unit codes (case-insensitive)
    let mut codes: HashMap<String, usize> = HashMap::new();
    for unit in &active_units {
        let normalized = unit.code.to_uppercase();
        if !normalized.is_empty() {
            *codes.entry(normalized).or_default() += 1;
        }
    }
    let duplicates: usize = codes.values().filter(|&&n| n > 1).sum();
    out.check(
        category::UNIT,
        (duplicates > 0).then(|| {
            Issue::new(
                "UNIT-004",
                category::UNIT,
                Severity::Warning,
                format!("{duplicates} units share duplicate codes"),
                "Unit codes must be unique within a branch.",
                "Rename duplicate unit codes.",
            )
            .with_count(duplicates)
        }),
    );

    // Declared bed count versus provisioned bed resources. A branch that
    // claims beds while none are provisioned is blocking; any other
    // mismatch is a warning.
    let actual_beds: usize = active_units.iter().map(|u| u.resources.beds).sum();
    let bed_issue = match branch.bed_count {
        Some(declared) if declared as usize != actual_beds => {
            let severity = if actual_beds == 0 {
                Severity::Blocker
            } else {
                Severity::Warning
            };
            Some(
                Issue::new(
                    "UNIT-005",
                    category::UNIT,
                    severity,
                    format!(
                        "Branch bed count ({declared}) does not match actual bed \
                         resources ({actual_beds})"
                    ),
                    format!(
                        "Branch profile says {declared} beds but {actual_beds} active BED \
                         resources exist."
                    ),
                    "Sync: either update Branch.bedCount or add/remove bed resources to match.",
                )
                .for_entity("BRANCH", &branch.id),
            )
        }
        None if actual_beds > 0 => Some(
            Issue::new(
                "UNIT-006",
                category::UNIT,
                Severity::Info,
                format!("Branch bedCount is not set but {actual_beds} bed resource(s) exist"),
                "Setting the branch bed count helps with reporting and NABH readiness \
                 checks.",
                "Set the bed count in Branch Profile.",
            )
            .for_entity("BRANCH", &branch.id),
        ),
        _ => None,
    };
    out.check(category::UNIT, bed_issue);
}
