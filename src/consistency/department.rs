//! Department category: heads, unit coverage, code uniqueness

use super::Tracker;
use crate::issue::{category, Issue, Severity};
use crate::snapshot::Snapshot;
use std::collections::HashMap;

pub(super) fn run(ctx: &Snapshot, out: &mut Tracker) {
    let departments = &ctx.departments.departments;

    out.check(
        category::DEPARTMENT,
        departments.is_empty().then(|| {
            Issue::new(
                "DEPT-001",
                category::DEPARTMENT,
                Severity::Warning,
                "No departments created",
                "Departments organize units, staff, and services. At least one is needed.",
                "Create departments in the Department setup.",
            )
        }),
    );

    let without_head = departments.iter().filter(|d| !d.has_head).count();
    out.check(
        category::DEPARTMENT,
        (!departments.is_empty() && without_head > 0).then(|| {
            Issue::new(
                "DEPT-002",
                category::DEPARTMENT,
                Severity::Info,
                format!("{without_head} department(s) without a designated head"),
                "NABH requires each department to have an identifiable head for \
                 accountability.",
                "Assign a department head in Department settings.",
            )
            .with_count(without_head)
        }),
    );

    // Departments with no active units assigned
    let mut unit_counts: HashMap<&str, usize> = HashMap::new();
    for unit in ctx.units.active() {
        if let Some(dept_id) = unit.department_id.as_deref() {
            *unit_counts.entry(dept_id).or_default() += 1;
        }
    }
    let orphaned: Vec<Issue> = departments
        .iter()
        .filter(|d| unit_counts.get(d.id.as_str()).copied().unwrap_or(0) == 0)
        .map(|d| {
            Issue::new(
                format!("DEPT-003-{}", d.id),
                category::DEPARTMENT,
                Severity::Info,
                format!("Department \"{}\" has no active units", d.name),
                format!("Department {} exists but no units are assigned to it.", d.code),
                format!(
                    "Create units under department \"{}\" or reassign existing units.",
                    d.name
                ),
            )
            .for_entity("DEPARTMENT", &d.id)
        })
        .collect();
    out.check_many(category::DEPARTMENT, orphaned);

    // Duplicate department codes (case-insensitive)
    let mut codes: HashMap<String, usize> = HashMap::new();
    for dept in departments {
        let normalized = dept.code.to_uppercase();
        if !normalized.is_empty() {
            *codes.entry(normalized).or_default() += 1;
        }
    }
    let duplicates: usize = codes.values().filter(|&&n| n > 1).sum();
    out.check(
        category::DEPARTMENT,
        (duplicates > 0).then(|| {
            Issue::new(
                "DEPT-005",
                category::DEPARTMENT,
                Severity::Warning,
                format!("{duplicates} departments share duplicate codes"),
                "Department codes should be unique for unambiguous identification.",
                "Rename duplicate department codes.",
            )
            .with_count(duplicates)
        }),
    );
}
