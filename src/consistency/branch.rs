//! Branch category: statutory fields and profile completeness

use super::Tracker;
use crate::issue::{category, Issue, Severity};
use crate::snapshot::Snapshot;

fn unset(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

pub(super) fn run(ctx: &Snapshot, out: &mut Tracker) {
    let branch = &ctx.branch;
    let branch_id = branch.id.as_str();

    out.check(
        category::BRANCH,
        unset(&branch.legal_entity_name).then(|| {
            Issue::new(
                "BR-001",
                category::BRANCH,
                Severity::Warning,
                "Legal entity name not set",
                "Required on invoices, tax filings, and official documents.",
                "Set the legal entity name in Branch Profile.",
            )
            .for_entity("BRANCH", branch_id)
        }),
    );

    out.check(
        category::BRANCH,
        unset(&branch.gst_number).then(|| {
            Issue::new(
                "BR-002",
                category::BRANCH,
                Severity::Warning,
                "GSTIN not configured",
                "GSTIN is needed for tax invoicing and GST return filing.",
                "Enter the 15-character GSTIN in Branch Profile.",
            )
            .for_entity("BRANCH", branch_id)
        }),
    );

    out.check(
        category::BRANCH,
        unset(&branch.pan_number).then(|| {
            Issue::new(
                "BR-003",
                category::BRANCH,
                Severity::Warning,
                "PAN not configured",
                "PAN is required for TDS compliance and statutory reporting.",
                "Enter the PAN in Branch Profile.",
            )
            .for_entity("BRANCH", branch_id)
        }),
    );

    let mut missing = Vec::new();
    if unset(&branch.address) {
        missing.push("address");
    }
    if unset(&branch.pin_code) {
        missing.push("PIN code");
    }
    if unset(&branch.state) {
        missing.push("state");
    }
    out.check(
        category::BRANCH,
        (!missing.is_empty()).then(|| {
            Issue::new(
                "BR-004",
                category::BRANCH,
                Severity::Warning,
                "Branch address incomplete",
                format!(
                    "Missing: {}. Full address is required for invoicing and NABH.",
                    missing.join(", ")
                ),
                "Complete all address fields in Branch Profile.",
            )
            .for_entity("BRANCH", branch_id)
        }),
    );

    out.check(
        category::BRANCH,
        (unset(&branch.contact_phone1) && unset(&branch.contact_email)).then(|| {
            Issue::new(
                "BR-005",
                category::BRANCH,
                Severity::Warning,
                "No contact information set",
                "At least one phone number or email is needed for correspondence.",
                "Add contact phone or email in Branch Profile.",
            )
            .for_entity("BRANCH", branch_id)
        }),
    );

    out.check(
        category::BRANCH,
        unset(&branch.clinical_est_reg_number).then(|| {
            Issue::new(
                "BR-006",
                category::BRANCH,
                Severity::Info,
                "Clinical Establishment Registration number not set",
                "Required under the Clinical Establishments Act in applicable states.",
                "Enter the registration number in Branch Profile.",
            )
            .for_entity("BRANCH", branch_id)
        }),
    );

    out.check(
        category::BRANCH,
        branch.working_hours.is_none().then(|| {
            Issue::new(
                "BR-007",
                category::BRANCH,
                Severity::Info,
                "Working hours not configured",
                "Working hours help with scheduling, OPD slot generation, and reporting.",
                "Set working hours in Branch Settings.",
            )
            .for_entity("BRANCH", branch_id)
        }),
    );
}
