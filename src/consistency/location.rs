//! Location category: tree integrity, safety flags, sibling code uniqueness

use super::Tracker;
use crate::config::ConsistencyConfig;
use crate::issue::{category, Issue, Severity};
use crate::snapshot::Snapshot;
use std::collections::HashMap;

/// Depth of a location kind in the canonical hierarchy. Unknown kinds sort
/// below everything so they always violate the ordering check.
fn kind_depth(kind: &str) -> u32 {
    match kind {
        "CAMPUS" => 0,
        "BUILDING" => 1,
        "FLOOR" => 2,
        "ZONE" => 3,
        "AREA" => 4,
        _ => 99,
    }
}

pub(super) fn run(ctx: &Snapshot, config: &ConsistencyConfig, out: &mut Tracker) {
    let loc = &ctx.location;

    out.check(
        category::LOCATION,
        (loc.total_nodes == 0).then(|| {
            Issue::new(
                "LOC-001",
                category::LOCATION,
                Severity::Warning,
                "No location nodes defined",
                "The location hierarchy (Campus -> Building -> Floor -> Zone -> Area) is empty.",
                "Create a Campus node, then add Buildings and Floors beneath it.",
            )
        }),
    );

    if loc.total_nodes == 0 {
        return;
    }

    let flat = loc.flat_nodes();
    let with_parent = loc.nodes_with_parent();
    let by_id: HashMap<&str, &crate::snapshot::LocationNode> =
        flat.iter().map(|n| (n.id.as_str(), *n)).collect();

    // Root of the tree must be a CAMPUS
    let campus_roots = loc.count_root_kind("CAMPUS");
    out.check(
        category::LOCATION,
        (campus_roots == 0).then(|| {
            Issue::new(
                "LOC-002",
                category::LOCATION,
                Severity::Warning,
                "No CAMPUS root node found",
                format!(
                    "Found {} root node(s) but none are of kind CAMPUS.",
                    loc.tree.len()
                ),
                "Create a top-level CAMPUS location node as the root of the hierarchy.",
            )
        }),
    );

    // A child's kind must sit deeper in the hierarchy than its parent's.
    // Violations are counted and reported as one aggregated issue.
    let mut hierarchy_violations = 0usize;
    for (node, parent_id) in &with_parent {
        let Some(parent) = parent_id.and_then(|id| by_id.get(id)) else {
            continue;
        };
        if kind_depth(&node.kind) <= kind_depth(&parent.kind) {
            hierarchy_violations += 1;
        }
    }
    out.check(
        category::LOCATION,
        (hierarchy_violations > 0).then(|| {
            Issue::new(
                "LOC-004",
                category::LOCATION,
                Severity::Warning,
                format!("{hierarchy_violations} location hierarchy violation(s)"),
                "Child nodes should be a deeper kind than their parent \
                 (e.g., FLOOR under BUILDING, not BUILDING under FLOOR).",
                "Review and correct the parent-child kind assignments.",
            )
            .with_count(hierarchy_violations)
        }),
    );

    let no_revision = loc.nodes_without_revision;
    out.check(
        category::LOCATION,
        (no_revision > 0).then(|| {
            Issue::new(
                "LOC-005",
                category::LOCATION,
                Severity::Warning,
                format!("{no_revision} location node(s) without an active revision"),
                "Each location node needs at least one active revision for its code, \
                 name, and attributes.",
                "Edit each affected node to create or activate a revision.",
            )
            .with_count(no_revision)
        }),
    );

    // Fire zone coverage on BUILDING and FLOOR nodes
    let fireable: Vec<_> = flat
        .iter()
        .filter(|n| n.kind == "BUILDING" || n.kind == "FLOOR")
        .collect();
    let missing_fire = fireable.iter().filter(|n| n.fire_zone.is_none()).count();
    out.check(
        category::LOCATION,
        (!fireable.is_empty() && missing_fire > 0).then(|| {
            Issue::new(
                "LOC-006",
                category::LOCATION,
                Severity::Warning,
                format!("{missing_fire} building/floor node(s) without fire zone designation"),
                "Fire zone mapping is required for NABH fire safety and emergency \
                 evacuation compliance.",
                "Edit each Building/Floor node and set its fire zone.",
            )
            .with_count(missing_fire)
        }),
    );

    out.check(
        category::LOCATION,
        (!loc.has_emergency_exits).then(|| {
            Issue::new(
                "LOC-007",
                category::LOCATION,
                Severity::Warning,
                "No emergency exits marked in the location tree",
                "At least one node should be flagged as an emergency exit for \
                 evacuation planning.",
                "Mark appropriate location nodes as emergency exits in Location settings.",
            )
        }),
    );

    out.check(
        category::LOCATION,
        (!loc.has_wheelchair_access && loc.total_nodes >= config.wheelchair_min_nodes).then(|| {
            Issue::new(
                "LOC-008",
                category::LOCATION,
                Severity::Info,
                "No wheelchair-accessible nodes marked",
                "Marking wheelchair-accessible paths helps with patient navigation and \
                 NABH accessibility compliance.",
                "Flag wheelchair-accessible nodes in Location settings.",
            )
        }),
    );

    // Codes must be unique within each sibling group; root nodes share the
    // no-parent group. Duplicates are counted globally.
    let mut sibling_codes: HashMap<Option<&str>, HashMap<&str, usize>> = HashMap::new();
    for (node, parent_id) in &with_parent {
        let Some(code) = node.code.as_deref().filter(|c| !c.is_empty()) else {
            continue;
        };
        *sibling_codes
            .entry(*parent_id)
            .or_default()
            .entry(code)
            .or_default() += 1;
    }
    let duplicate_codes: usize = sibling_codes
        .values()
        .flat_map(|codes| codes.values())
        .filter(|&&n| n > 1)
        .sum();
    out.check(
        category::LOCATION,
        (duplicate_codes > 0).then(|| {
            Issue::new(
                "LOC-010",
                category::LOCATION,
                Severity::Warning,
                format!("{duplicate_codes} duplicate location code(s) among sibling nodes"),
                "Sibling location nodes should have unique codes for unambiguous reference.",
                "Rename location codes to be unique within each parent level.",
            )
            .with_count(duplicate_codes)
        }),
    );
}
