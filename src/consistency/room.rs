//! Room category: critical-care amenities, pricing tiers, room typing

use super::Tracker;
use crate::config::ConsistencyConfig;
use crate::issue::{category, Issue, Severity};
use crate::snapshot::{Room, Snapshot};

pub(super) fn run(ctx: &Snapshot, config: &ConsistencyConfig, out: &mut Tracker) {
    let active_units: Vec<_> = ctx.units.active().collect();

    // Active rooms left inside deactivated units
    let rooms_in_inactive: usize = ctx
        .units
        .units
        .iter()
        .filter(|u| !u.is_active)
        .map(|u| u.active_rooms().count())
        .sum();
    out.check(
        category::ROOM,
        (rooms_in_inactive > 0).then(|| {
            Issue::new(
                "ROOM-001",
                category::ROOM,
                Severity::Warning,
                format!("{rooms_in_inactive} active room(s) belong to inactive units"),
                "These rooms won't be usable since their parent unit is deactivated.",
                "Deactivate these rooms or reactivate their parent units.",
            )
            .with_count(rooms_in_inactive)
        }),
    );

    // Critical-care amenity coverage. Partial gaps are warnings; a room with
    // neither oxygen nor suction is blocking on its own.
    let critical_rooms: Vec<&Room> = active_units
        .iter()
        .filter(|u| config.is_critical_care(&u.type_code))
        .flat_map(|u| u.active_rooms())
        .collect();
    let no_oxygen_only = critical_rooms
        .iter()
        .filter(|r| !r.has_oxygen && r.has_suction)
        .count();
    let no_suction_only = critical_rooms
        .iter()
        .filter(|r| r.has_oxygen && !r.has_suction)
        .count();
    let neither = critical_rooms
        .iter()
        .filter(|r| !r.has_oxygen && !r.has_suction)
        .count();

    out.check(
        category::ROOM,
        (no_oxygen_only > 0).then(|| {
            Issue::new(
                "ROOM-002",
                category::ROOM,
                Severity::Warning,
                format!("{no_oxygen_only} critical care room(s) without oxygen supply"),
                "ICU/HDU/CCU rooms must have piped oxygen for patient safety.",
                "Enable the oxygen flag on these critical care rooms.",
            )
            .with_count(no_oxygen_only)
        }),
    );

    out.check(
        category::ROOM,
        (no_suction_only > 0).then(|| {
            Issue::new(
                "ROOM-003",
                category::ROOM,
                Severity::Info,
                format!("{no_suction_only} critical care room(s) without suction"),
                "Critical care rooms should have suction for airway management.",
                "Enable the suction flag on these rooms.",
            )
            .with_count(no_suction_only)
        }),
    );

    out.check(
        category::ROOM,
        (neither > 0).then(|| {
            Issue::new(
                "ROOM-008",
                category::ROOM,
                Severity::Blocker,
                format!("{neither} critical care room(s) with neither oxygen nor suction"),
                "Rooms in ICU/HDU/CCU/NICU/PICU units lack both piped oxygen and suction.",
                "Enable oxygen and suction on these rooms before admitting patients.",
            )
            .with_count(neither)
        }),
    );

    // Bed-based rooms without a pricing tier
    let no_pricing: usize = active_units
        .iter()
        .filter(|u| config.is_bed_based(&u.type_code))
        .flat_map(|u| u.active_rooms())
        .filter(|r| r.pricing_tier.is_none())
        .count();
    out.check(
        category::ROOM,
        (no_pricing > 0).then(|| {
            Issue::new(
                "ROOM-004",
                category::ROOM,
                Severity::Info,
                format!("{no_pricing} IPD room(s) without a pricing tier"),
                "Pricing tier (ECONOMY, STANDARD, DELUXE, etc.) is used for \
                 auto-applying bed charges.",
                "Set the pricing tier on each IPD room.",
            )
            .with_count(no_pricing)
        }),
    );

    // Rooms with no room type anywhere in the branch
    let untyped: usize = ctx
        .units
        .units
        .iter()
        .flat_map(|u| u.active_rooms())
        .filter(|r| r.room_type.is_none())
        .count();
    out.check(
        category::ROOM,
        (untyped > 0).then(|| {
            Issue::new(
                "ROOM-005",
                category::ROOM,
                Severity::Info,
                format!("{untyped} room(s) without a room type set"),
                "Room type (CONSULTATION, PROCEDURE, PATIENT_ROOM, etc.) helps with \
                 scheduling and reporting.",
                "Set the room type on each room.",
            )
            .with_count(untyped)
        }),
    );

    // Inpatient branches should have isolation capacity
    let has_bed_based = active_units.iter().any(|u| config.is_bed_based(&u.type_code));
    let isolation_rooms = active_units
        .iter()
        .flat_map(|u| u.active_rooms())
        .filter(|r| {
            matches!(
                r.room_type.as_deref(),
                Some("ISOLATION") | Some("NEGATIVE_PRESSURE")
            )
        })
        .count();
    out.check(
        category::ROOM,
        (has_bed_based && isolation_rooms == 0).then(|| {
            Issue::new(
                "ROOM-006",
                category::ROOM,
                Severity::Info,
                "No isolation / negative-pressure rooms configured",
                "NABH recommends isolation rooms for infection control in IPD facilities.",
                "Add at least one ISOLATION or NEGATIVE_PRESSURE room type.",
            )
        }),
    );

    // Ward patient rooms left at the single-bed default occupancy
    let single_occupancy_ward_rooms: usize = active_units
        .iter()
        .filter(|u| u.type_code.to_uppercase() == "WARD")
        .flat_map(|u| u.active_rooms())
        .filter(|r| r.room_type.as_deref() == Some("PATIENT_ROOM") && r.max_occupancy == Some(1))
        .count();
    out.check(
        category::ROOM,
        (single_occupancy_ward_rooms > 0).then(|| {
            Issue::new(
                "ROOM-007",
                category::ROOM,
                Severity::Info,
                format!("{single_occupancy_ward_rooms} ward patient room(s) with maxOccupancy = 1"),
                "Ward rooms typically have multi-bed occupancy. Max occupancy may need \
                 adjustment.",
                "Review and set correct maxOccupancy for ward patient rooms.",
            )
            .with_count(single_occupancy_ward_rooms)
        }),
    );
}
