//! UnitType category: enablement versus actual units

use super::Tracker;
use crate::issue::{category, Issue, Severity};
use crate::snapshot::Snapshot;

pub(super) fn run(ctx: &Snapshot, out: &mut Tracker) {
    let by_type = &ctx.units.by_type;

    out.check(
        category::UNIT_TYPE,
        by_type.is_empty().then(|| {
            Issue::new(
                "UT-001",
                category::UNIT_TYPE,
                Severity::Blocker,
                "No unit types enabled for this branch",
                "You must enable at least one unit type (e.g., OPD, WARD, ICU) to \
                 create units.",
                "Enable unit types in Branch -> Unit Types.",
            )
        }),
    );

    // Enabled types with zero units created
    let empty_types: Vec<Issue> = by_type
        .iter()
        .filter(|(_, info)| info.count == 0)
        .map(|(code, info)| {
            let type_name = info.type_name.as_deref().unwrap_or(code);
            Issue::new(
                format!("UT-002-{code}"),
                category::UNIT_TYPE,
                Severity::Warning,
                format!("Unit type \"{type_name}\" is enabled but has no units"),
                format!("{code} is enabled for this branch but zero units have been created."),
                format!(
                    "Create at least one {type_name} unit, or disable this unit type \
                     if not needed."
                ),
            )
            .for_entity_type("BRANCH_UNIT_TYPE")
        })
        .collect();
    out.check_many(category::UNIT_TYPE, empty_types);
}
