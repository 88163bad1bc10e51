//! Checklist query interpreter
//!
//! Each check descriptor names one query type and its parameters. The
//! query types form a closed set, modeled as a sum type with typed
//! parameter records; the untyped descriptor is parsed into it at
//! evaluation time. An unknown query name or a missing/malformed parameter
//! is an evaluation failure surfaced as a diagnostic string, never a panic.
//!
//! Evaluation is a pure function of the snapshot: no clock, no randomness,
//! no I/O.

use crate::snapshot::Snapshot;
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a descriptor could not be turned into a runnable query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Unknown check query: {0}")]
    UnknownQuery(String),
    #[error("query {query}: missing required parameter `{param}`")]
    MissingParam { query: String, param: &'static str },
    #[error("query {query}: parameter `{param}` must be {expected}")]
    BadParam {
        query: String,
        param: &'static str,
        expected: &'static str,
    },
    #[error("unknown amenity flag `{0}`")]
    UnknownAmenity(String),
    #[error("unknown branch field `{0}`")]
    UnknownBranchField(String),
}

/// Room amenity flags a checklist may require
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amenity {
    Oxygen,
    Suction,
}

impl Amenity {
    fn parse(name: &str) -> Result<Self, QueryError> {
        match name {
            "hasOxygen" => Ok(Amenity::Oxygen),
            "hasSuction" => Ok(Amenity::Suction),
            other => Err(QueryError::UnknownAmenity(other.to_string())),
        }
    }
}

/// Result of evaluating one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub passed: bool,
    pub details: Option<String>,
}

impl Outcome {
    fn new(passed: bool, details: impl Into<String>) -> Self {
        Self {
            passed,
            details: Some(details.into()),
        }
    }
}

/// The closed set of checklist query types
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    AlwaysPass,
    UnitTypeExists {
        unit_type_code: String,
    },
    UnitTypeExistsIfEmergency {
        unit_type_code: String,
    },
    RoomTypeExists {
        room_type: String,
    },
    RoomTypeExistsAny {
        room_types: Vec<String>,
    },
    RoomTypeInUnitType {
        room_type: String,
        unit_type_code: String,
    },
    RoomTypeInUnitTypes {
        room_type: String,
        unit_type_codes: Vec<String>,
    },
    UnitHasResource {
        resource_type: String,
        unit_type_codes: Vec<String>,
        min_count: usize,
    },
    BedCountSync,
    CriticalCareRoomsHaveAmenity {
        amenity: Amenity,
        amenity_name: String,
        unit_type_codes: Vec<String>,
    },
    LocationRootExists {
        kind: String,
    },
    LocationKindExists {
        kind: String,
    },
    LocationFireZoneCoverage {
        kinds: Vec<String>,
    },
    LocationHasEmergencyExit,
    LocationHasWheelchairAccess,
    LocationHasStretcherAccess,
    LocationAllHaveActiveRevision,
    UnitsLinkedToLocation {
        min_percent: u32,
    },
    BranchFieldSet {
        field: String,
    },
    BranchAddressComplete,
    DepartmentsWithHead {
        min_percent: u32,
    },
    DepartmentCountMin {
        min: usize,
    },
    InfraConfigExists,
}

// Parameter extraction helpers. Presence and shape are both validated;
// a wrong-typed value is an error even when a default exists.

fn str_param(query: &str, params: &Map<String, Value>, key: &'static str) -> Result<String, QueryError> {
    match params.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(QueryError::BadParam {
            query: query.to_string(),
            param: key,
            expected: "a string",
        }),
        None => Err(QueryError::MissingParam {
            query: query.to_string(),
            param: key,
        }),
    }
}

fn str_list_param(
    query: &str,
    params: &Map<String, Value>,
    key: &'static str,
) -> Result<Vec<String>, QueryError> {
    let bad = || QueryError::BadParam {
        query: query.to_string(),
        param: key,
        expected: "a list of strings",
    };
    match params.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or_else(bad))
            .collect(),
        Some(_) => Err(bad()),
        None => Err(QueryError::MissingParam {
            query: query.to_string(),
            param: key,
        }),
    }
}

fn uint_param_or(
    query: &str,
    params: &Map<String, Value>,
    key: &'static str,
    default: u64,
) -> Result<u64, QueryError> {
    match params.get(key) {
        Some(value) => value.as_u64().ok_or(QueryError::BadParam {
            query: query.to_string(),
            param: key,
            expected: "a non-negative integer",
        }),
        None => Ok(default),
    }
}

fn pct(part: usize, whole: usize) -> u32 {
    (part as f64 / whole as f64 * 100.0).round() as u32
}

impl Query {
    /// Parse an untyped descriptor query into a typed one
    pub fn parse(query: &str, params: &Map<String, Value>) -> Result<Self, QueryError> {
        let parsed = match query {
            "ALWAYS_PASS" => Query::AlwaysPass,
            "UNIT_TYPE_EXISTS" => Query::UnitTypeExists {
                unit_type_code: str_param(query, params, "unitTypeCode")?,
            },
            "UNIT_TYPE_EXISTS_IF_EMERGENCY" => Query::UnitTypeExistsIfEmergency {
                unit_type_code: str_param(query, params, "unitTypeCode")?,
            },
            "ROOM_TYPE_EXISTS" => Query::RoomTypeExists {
                room_type: str_param(query, params, "roomType")?,
            },
            "ROOM_TYPE_EXISTS_ANY" => Query::RoomTypeExistsAny {
                room_types: str_list_param(query, params, "roomTypes")?,
            },
            "ROOM_TYPE_IN_UNIT_TYPE" => Query::RoomTypeInUnitType {
                room_type: str_param(query, params, "roomType")?,
                unit_type_code: str_param(query, params, "unitTypeCode")?,
            },
            "ROOM_TYPE_IN_UNIT_TYPES" => Query::RoomTypeInUnitTypes {
                room_type: str_param(query, params, "roomType")?,
                unit_type_codes: str_list_param(query, params, "unitTypeCodes")?,
            },
            "UNIT_HAS_RESOURCE" => Query::UnitHasResource {
                resource_type: str_param(query, params, "resourceType")?,
                unit_type_codes: str_list_param(query, params, "unitTypeCodes")?,
                min_count: uint_param_or(query, params, "minCount", 1)? as usize,
            },
            "BED_COUNT_SYNC" => Query::BedCountSync,
            "CRITICAL_CARE_ROOMS_HAVE_AMENITY" => {
                let amenity_name = str_param(query, params, "amenity")?;
                Query::CriticalCareRoomsHaveAmenity {
                    amenity: Amenity::parse(&amenity_name)?,
                    amenity_name,
                    unit_type_codes: str_list_param(query, params, "unitTypeCodes")?,
                }
            }
            "LOCATION_ROOT_EXISTS" => Query::LocationRootExists {
                kind: str_param(query, params, "kind")?,
            },
            "LOCATION_KIND_EXISTS" => Query::LocationKindExists {
                kind: str_param(query, params, "kind")?,
            },
            "LOCATION_FIRE_ZONE_COVERAGE" => Query::LocationFireZoneCoverage {
                kinds: str_list_param(query, params, "kinds")?,
            },
            "LOCATION_HAS_EMERGENCY_EXIT" => Query::LocationHasEmergencyExit,
            "LOCATION_HAS_WHEELCHAIR_ACCESS" => Query::LocationHasWheelchairAccess,
            "LOCATION_HAS_STRETCHER_ACCESS" => Query::LocationHasStretcherAccess,
            "LOCATION_ALL_HAVE_ACTIVE_REVISION" => Query::LocationAllHaveActiveRevision,
            "UNITS_LINKED_TO_LOCATION" => Query::UnitsLinkedToLocation {
                min_percent: uint_param_or(query, params, "minPercent", 80)? as u32,
            },
            "BRANCH_FIELD_SET" => {
                let field = str_param(query, params, "field")?;
                Query::BranchFieldSet { field }
            }
            "BRANCH_ADDRESS_COMPLETE" => Query::BranchAddressComplete,
            "DEPARTMENTS_WITH_HEAD" => Query::DepartmentsWithHead {
                min_percent: uint_param_or(query, params, "minPercent", 80)? as u32,
            },
            "DEPARTMENT_COUNT_MIN" => Query::DepartmentCountMin {
                min: uint_param_or(query, params, "min", 1)? as usize,
            },
            "INFRA_CONFIG_EXISTS" => Query::InfraConfigExists,
            other => return Err(QueryError::UnknownQuery(other.to_string())),
        };
        Ok(parsed)
    }

    /// Evaluate the query against a snapshot
    pub fn evaluate(&self, ctx: &Snapshot) -> Result<Outcome, QueryError> {
        let units = &ctx.units;
        let location = &ctx.location;

        let outcome = match self {
            Query::AlwaysPass => Outcome {
                passed: true,
                details: None,
            },

            Query::UnitTypeExists { unit_type_code } => {
                let count = units.active().filter(|u| u.type_code == *unit_type_code).count();
                Outcome::new(count > 0, format!("Found {count} active {unit_type_code} unit(s)"))
            }

            Query::UnitTypeExistsIfEmergency { unit_type_code } => {
                if !ctx.branch.emergency_24x7 {
                    Outcome::new(
                        true,
                        format!("Branch is not 24x7 emergency; {unit_type_code} unit not required"),
                    )
                } else {
                    let count = units.active().filter(|u| u.type_code == *unit_type_code).count();
                    Outcome::new(
                        count > 0,
                        format!("Emergency 24x7 branch: found {count} {unit_type_code} unit(s)"),
                    )
                }
            }

            Query::RoomTypeExists { room_type } => {
                let count = units
                    .active()
                    .flat_map(|u| u.active_rooms())
                    .filter(|r| r.room_type.as_deref() == Some(room_type.as_str()))
                    .count();
                Outcome::new(count > 0, format!("Found {count} {room_type} room(s)"))
            }

            Query::RoomTypeExistsAny { room_types } => {
                let count = units
                    .active()
                    .flat_map(|u| u.active_rooms())
                    .filter(|r| {
                        r.room_type
                            .as_deref()
                            .is_some_and(|t| room_types.iter().any(|rt| rt == t))
                    })
                    .count();
                Outcome::new(
                    count > 0,
                    format!("Found {count} room(s) of types: {}", room_types.join(", ")),
                )
            }

            Query::RoomTypeInUnitType {
                room_type,
                unit_type_code,
            } => {
                let count = units
                    .active()
                    .filter(|u| u.type_code == *unit_type_code)
                    .flat_map(|u| u.active_rooms())
                    .filter(|r| r.room_type.as_deref() == Some(room_type.as_str()))
                    .count();
                Outcome::new(
                    count > 0,
                    format!("Found {count} {room_type} room(s) in {unit_type_code} units"),
                )
            }

            Query::RoomTypeInUnitTypes {
                room_type,
                unit_type_codes,
            } => {
                let count = units
                    .active()
                    .filter(|u| unit_type_codes.contains(&u.type_code))
                    .flat_map(|u| u.active_rooms())
                    .filter(|r| r.room_type.as_deref() == Some(room_type.as_str()))
                    .count();
                Outcome::new(
                    count > 0,
                    format!(
                        "Found {count} {room_type} room(s) in {} units",
                        unit_type_codes.join("/")
                    ),
                )
            }

            Query::UnitHasResource {
                resource_type,
                unit_type_codes,
                min_count,
            } => {
                let count: usize = units
                    .active()
                    .filter(|u| unit_type_codes.contains(&u.type_code))
                    .map(|u| u.resources.of_type(resource_type))
                    .sum();
                Outcome::new(
                    count >= *min_count,
                    format!(
                        "Found {count} {resource_type} resource(s) in {} units",
                        unit_type_codes.join("/")
                    ),
                )
            }

            Query::BedCountSync => {
                let actual: usize = units.units.iter().map(|u| u.resources.beds).sum();
                match ctx.branch.bed_count {
                    None => Outcome::new(
                        actual > 0,
                        format!("Branch.bedCount not set; {actual} BED resource(s) exist"),
                    ),
                    Some(declared) => Outcome::new(
                        declared as usize == actual,
                        format!("Branch.bedCount = {declared}, actual BED resources = {actual}"),
                    ),
                }
            }

            Query::CriticalCareRoomsHaveAmenity {
                amenity,
                amenity_name,
                unit_type_codes,
            } => {
                let rooms: Vec<_> = units
                    .active()
                    .filter(|u| unit_type_codes.contains(&u.type_code))
                    .flat_map(|u| u.active_rooms())
                    .collect();
                if rooms.is_empty() {
                    Outcome::new(true, format!("No rooms in {} units", unit_type_codes.join("/")))
                } else {
                    let with_amenity = rooms
                        .iter()
                        .filter(|r| match amenity {
                            Amenity::Oxygen => r.has_oxygen,
                            Amenity::Suction => r.has_suction,
                        })
                        .count();
                    Outcome::new(
                        with_amenity == rooms.len(),
                        format!(
                            "{with_amenity}/{} critical care rooms have {amenity_name}",
                            rooms.len()
                        ),
                    )
                }
            }

            Query::LocationRootExists { kind } => {
                let count = location.count_root_kind(kind);
                Outcome::new(count > 0, format!("Found {count} root {kind} node(s)"))
            }

            Query::LocationKindExists { kind } => {
                let count = location.count_kind(kind);
                Outcome::new(count > 0, format!("Found {count} {kind} node(s)"))
            }

            Query::LocationFireZoneCoverage { kinds } => {
                let targets: Vec<_> = location
                    .flat_nodes()
                    .into_iter()
                    .filter(|n| kinds.contains(&n.kind))
                    .collect();
                if targets.is_empty() {
                    Outcome::new(false, format!("No {} nodes found", kinds.join("/")))
                } else {
                    let with_fire = targets.iter().filter(|n| n.fire_zone.is_some()).count();
                    Outcome::new(
                        with_fire == targets.len(),
                        format!(
                            "{with_fire}/{} ({}%) have fire zone",
                            targets.len(),
                            pct(with_fire, targets.len())
                        ),
                    )
                }
            }

            Query::LocationHasEmergencyExit => {
                let count = location.flat_nodes().iter().filter(|n| n.emergency_exit).count();
                Outcome::new(count > 0, format!("{count} emergency exit(s) marked"))
            }

            Query::LocationHasWheelchairAccess => {
                let count = location
                    .flat_nodes()
                    .iter()
                    .filter(|n| n.wheelchair_access)
                    .count();
                Outcome::new(count > 0, format!("{count} wheelchair-accessible node(s)"))
            }

            Query::LocationHasStretcherAccess => {
                let count = location
                    .flat_nodes()
                    .iter()
                    .filter(|n| n.stretcher_access)
                    .count();
                Outcome::new(count > 0, format!("{count} stretcher-accessible node(s)"))
            }

            Query::LocationAllHaveActiveRevision => {
                let total = location.total_nodes;
                if total == 0 {
                    Outcome::new(true, "No location nodes")
                } else {
                    let with_revision = total.saturating_sub(location.nodes_without_revision);
                    Outcome::new(
                        with_revision == total,
                        format!("{with_revision}/{total} nodes have active revisions"),
                    )
                }
            }

            Query::UnitsLinkedToLocation { min_percent } => {
                let total = units.active().count();
                if total == 0 {
                    Outcome::new(true, "No active units")
                } else {
                    let linked = units.active().filter(|u| u.location_node_id.is_some()).count();
                    let linked_pct = pct(linked, total);
                    Outcome::new(
                        linked_pct >= *min_percent,
                        format!("{linked}/{total} ({linked_pct}%) units linked to location"),
                    )
                }
            }

            Query::BranchFieldSet { field } => {
                let value = ctx
                    .branch
                    .string_field(field)
                    .ok_or_else(|| QueryError::UnknownBranchField(field.clone()))?;
                let is_set = value.as_deref().is_some_and(|v| !v.is_empty());
                Outcome::new(
                    is_set,
                    if is_set {
                        format!("{field} is set")
                    } else {
                        format!("{field} is not set")
                    },
                )
            }

            Query::BranchAddressComplete => {
                let branch = &ctx.branch;
                let mut missing = Vec::new();
                if branch.address.is_none() {
                    missing.push("address");
                }
                if branch.pin_code.is_none() {
                    missing.push("pinCode");
                }
                if branch.state.is_none() {
                    missing.push("state");
                }
                if missing.is_empty() {
                    Outcome::new(true, "Address complete")
                } else {
                    Outcome::new(false, format!("Missing: {}", missing.join(", ")))
                }
            }

            Query::DepartmentsWithHead { min_percent } => {
                let total = ctx.departments.total;
                if total == 0 {
                    Outcome::new(true, "No departments")
                } else {
                    let with_head = ctx.departments.with_head;
                    let head_pct = pct(with_head, total);
                    Outcome::new(
                        head_pct >= *min_percent,
                        format!("{with_head}/{total} ({head_pct}%) departments have heads"),
                    )
                }
            }

            Query::DepartmentCountMin { min } => {
                let count = ctx.departments.total;
                Outcome::new(count >= *min, format!("{count} active department(s)"))
            }

            // The snapshot does not carry the infra-config record itself;
            // presence is inferred from the fields it populates.
            Query::InfraConfigExists => {
                let has_config =
                    ctx.branch.bed_count.is_some() || ctx.branch.working_hours.is_some();
                Outcome::new(
                    has_config,
                    if has_config {
                        "Config initialized"
                    } else {
                        "BranchInfraConfig not found"
                    },
                )
            }
        };
        Ok(outcome)
    }

    /// Parse and evaluate a descriptor in one step, folding parse failures
    /// into a failed outcome with the error message as details.
    pub fn run(query: &str, params: &Map<String, Value>, ctx: &Snapshot) -> Outcome {
        match Query::parse(query, params).and_then(|q| q.evaluate(ctx)) {
            Ok(outcome) => outcome,
            Err(err) => Outcome::new(false, err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{
        Branch, Department, DepartmentSummary, LocationNode, LocationSummary, ResourceSummary,
        Room, Snapshot, Unit, UnitSummary,
    };
    use serde_json::json;

    fn params(value: serde_json::Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn unit(type_code: &str, rooms: Vec<Room>, resources: ResourceSummary) -> Unit {
        Unit {
            id: format!("unit-{type_code}"),
            code: type_code.to_string(),
            name: format!("{type_code} unit"),
            type_code: type_code.to_string(),
            is_active: true,
            rooms,
            resources,
            ..Default::default()
        }
    }

    fn room(room_type: &str, oxygen: bool, suction: bool) -> Room {
        Room {
            id: format!("room-{room_type}"),
            room_type: Some(room_type.to_string()),
            has_oxygen: oxygen,
            has_suction: suction,
            is_active: true,
            ..Default::default()
        }
    }

    fn snapshot_with_units(units: Vec<Unit>) -> Snapshot {
        Snapshot {
            units: UnitSummary {
                total_units: units.len(),
                active_units: units.iter().filter(|u| u.is_active).count(),
                units,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_unknown_query_fails_closed() {
        let ctx = Snapshot::default();
        let outcome = Query::run("NO_SUCH_QUERY", &Map::new(), &ctx);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.details.as_deref(),
            Some("Unknown check query: NO_SUCH_QUERY")
        );
    }

    #[test]
    fn test_missing_param_is_failed_check_not_panic() {
        let ctx = Snapshot::default();
        let outcome = Query::run("UNIT_TYPE_EXISTS", &Map::new(), &ctx);
        assert!(!outcome.passed);
        assert!(outcome.details.unwrap().contains("unitTypeCode"));
    }

    #[test]
    fn test_wrong_param_type_is_failed_check() {
        let ctx = Snapshot::default();
        let outcome = Query::run(
            "UNIT_HAS_RESOURCE",
            &params(json!({"resourceType": "BED", "unitTypeCodes": ["WARD"], "minCount": "three"})),
            &ctx,
        );
        assert!(!outcome.passed);
        assert!(outcome.details.unwrap().contains("minCount"));
    }

    #[test]
    fn test_unit_type_exists() {
        let ctx = snapshot_with_units(vec![unit("OPD", vec![], ResourceSummary::default())]);
        let outcome = Query::run("UNIT_TYPE_EXISTS", &params(json!({"unitTypeCode": "OPD"})), &ctx);
        assert!(outcome.passed);
        assert_eq!(outcome.details.as_deref(), Some("Found 1 active OPD unit(s)"));

        let outcome = Query::run("UNIT_TYPE_EXISTS", &params(json!({"unitTypeCode": "ICU"})), &ctx);
        assert!(!outcome.passed);
    }

    #[test]
    fn test_unit_type_exists_ignores_inactive_units() {
        let mut icu = unit("ICU", vec![], ResourceSummary::default());
        icu.is_active = false;
        let ctx = snapshot_with_units(vec![icu]);
        let outcome = Query::run("UNIT_TYPE_EXISTS", &params(json!({"unitTypeCode": "ICU"})), &ctx);
        assert!(!outcome.passed);
    }

    #[test]
    fn test_emergency_conditional_check() {
        let mut ctx = snapshot_with_units(vec![]);
        // Not a 24x7 branch: vacuously satisfied
        let outcome = Query::run(
            "UNIT_TYPE_EXISTS_IF_EMERGENCY",
            &params(json!({"unitTypeCode": "ER"})),
            &ctx,
        );
        assert!(outcome.passed);

        ctx.branch.emergency_24x7 = true;
        let outcome = Query::run(
            "UNIT_TYPE_EXISTS_IF_EMERGENCY",
            &params(json!({"unitTypeCode": "ER"})),
            &ctx,
        );
        assert!(!outcome.passed);
    }

    #[test]
    fn test_room_type_queries() {
        let ctx = snapshot_with_units(vec![
            unit("OPD", vec![room("CONSULTATION", false, false)], ResourceSummary::default()),
            unit("ER", vec![room("TRIAGE", false, false)], ResourceSummary::default()),
        ]);

        assert!(Query::run("ROOM_TYPE_EXISTS", &params(json!({"roomType": "TRIAGE"})), &ctx).passed);
        assert!(
            Query::run(
                "ROOM_TYPE_EXISTS_ANY",
                &params(json!({"roomTypes": ["RECEPTION", "CONSULTATION"]})),
                &ctx
            )
            .passed
        );
        assert!(
            Query::run(
                "ROOM_TYPE_IN_UNIT_TYPE",
                &params(json!({"roomType": "CONSULTATION", "unitTypeCode": "OPD"})),
                &ctx
            )
            .passed
        );
        assert!(
            !Query::run(
                "ROOM_TYPE_IN_UNIT_TYPE",
                &params(json!({"roomType": "TRIAGE", "unitTypeCode": "OPD"})),
                &ctx
            )
            .passed
        );
        assert!(
            Query::run(
                "ROOM_TYPE_IN_UNIT_TYPES",
                &params(json!({"roomType": "TRIAGE", "unitTypeCodes": ["ER", "OPD"]})),
                &ctx
            )
            .passed
        );
    }

    #[test]
    fn test_unit_has_resource_min_count() {
        let mut resources = ResourceSummary::default();
        resources.by_type.insert("BED".to_string(), 4);
        let ctx = snapshot_with_units(vec![unit("WARD", vec![], resources)]);

        let p = params(json!({"resourceType": "BED", "unitTypeCodes": ["WARD"], "minCount": 4}));
        assert!(Query::run("UNIT_HAS_RESOURCE", &p, &ctx).passed);

        let p = params(json!({"resourceType": "BED", "unitTypeCodes": ["WARD"], "minCount": 5}));
        assert!(!Query::run("UNIT_HAS_RESOURCE", &p, &ctx).passed);
    }

    #[test]
    fn test_bed_count_sync() {
        let mut resources = ResourceSummary::default();
        resources.beds = 10;
        let mut ctx = snapshot_with_units(vec![unit("WARD", vec![], resources)]);

        ctx.branch.bed_count = Some(10);
        assert!(Query::run("BED_COUNT_SYNC", &Map::new(), &ctx).passed);

        ctx.branch.bed_count = Some(12);
        let outcome = Query::run("BED_COUNT_SYNC", &Map::new(), &ctx);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.details.as_deref(),
            Some("Branch.bedCount = 12, actual BED resources = 10")
        );

        // Unset declared count passes as long as beds exist
        ctx.branch.bed_count = None;
        assert!(Query::run("BED_COUNT_SYNC", &Map::new(), &ctx).passed);
    }

    #[test]
    fn test_critical_care_amenity_coverage() {
        let ctx = snapshot_with_units(vec![unit(
            "ICU",
            vec![room("PATIENT_ROOM", true, true), room("PATIENT_ROOM", false, true)],
            ResourceSummary::default(),
        )]);

        let p = params(json!({"amenity": "hasOxygen", "unitTypeCodes": ["ICU", "HDU"]}));
        let outcome = Query::run("CRITICAL_CARE_ROOMS_HAVE_AMENITY", &p, &ctx);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.details.as_deref(),
            Some("1/2 critical care rooms have hasOxygen")
        );

        let p = params(json!({"amenity": "hasSuction", "unitTypeCodes": ["ICU", "HDU"]}));
        assert!(Query::run("CRITICAL_CARE_ROOMS_HAVE_AMENITY", &p, &ctx).passed);

        // No rooms in scope passes vacuously
        let p = params(json!({"amenity": "hasOxygen", "unitTypeCodes": ["NICU"]}));
        assert!(Query::run("CRITICAL_CARE_ROOMS_HAVE_AMENITY", &p, &ctx).passed);

        // Unknown amenity flag fails closed
        let p = params(json!({"amenity": "hasDefibrillator", "unitTypeCodes": ["ICU"]}));
        let outcome = Query::run("CRITICAL_CARE_ROOMS_HAVE_AMENITY", &p, &ctx);
        assert!(!outcome.passed);
        assert!(outcome.details.unwrap().contains("hasDefibrillator"));
    }

    fn location_fixture() -> LocationSummary {
        LocationSummary {
            total_nodes: 3,
            nodes_without_revision: 1,
            tree: vec![LocationNode {
                id: "campus".to_string(),
                kind: "CAMPUS".to_string(),
                is_active: true,
                children: vec![LocationNode {
                    id: "bldg".to_string(),
                    kind: "BUILDING".to_string(),
                    is_active: true,
                    fire_zone: Some("FZ-1".to_string()),
                    children: vec![LocationNode {
                        id: "floor".to_string(),
                        kind: "FLOOR".to_string(),
                        is_active: true,
                        emergency_exit: true,
                        wheelchair_access: true,
                        ..Default::default()
                    }],
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_location_queries() {
        let ctx = Snapshot {
            location: location_fixture(),
            ..Default::default()
        };

        let outcome = Query::run("LOCATION_ROOT_EXISTS", &params(json!({"kind": "CAMPUS"})), &ctx);
        assert!(outcome.passed);
        assert_eq!(outcome.details.as_deref(), Some("Found 1 root CAMPUS node(s)"));

        assert!(Query::run("LOCATION_KIND_EXISTS", &params(json!({"kind": "FLOOR"})), &ctx).passed);
        assert!(!Query::run("LOCATION_KIND_EXISTS", &params(json!({"kind": "ZONE"})), &ctx).passed);

        // One of building+floor lacks a fire zone
        let outcome = Query::run(
            "LOCATION_FIRE_ZONE_COVERAGE",
            &params(json!({"kinds": ["BUILDING", "FLOOR"]})),
            &ctx,
        );
        assert!(!outcome.passed);
        assert_eq!(outcome.details.as_deref(), Some("1/2 (50%) have fire zone"));

        assert!(Query::run("LOCATION_HAS_EMERGENCY_EXIT", &Map::new(), &ctx).passed);
        assert!(Query::run("LOCATION_HAS_WHEELCHAIR_ACCESS", &Map::new(), &ctx).passed);
        assert!(!Query::run("LOCATION_HAS_STRETCHER_ACCESS", &Map::new(), &ctx).passed);

        let outcome = Query::run("LOCATION_ALL_HAVE_ACTIVE_REVISION", &Map::new(), &ctx);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.details.as_deref(),
            Some("2/3 nodes have active revisions")
        );
    }

    #[test]
    fn test_location_queries_on_empty_tree_have_distinct_details() {
        let ctx = Snapshot::default();

        let root = Query::run("LOCATION_ROOT_EXISTS", &params(json!({"kind": "CAMPUS"})), &ctx);
        let building = Query::run("LOCATION_KIND_EXISTS", &params(json!({"kind": "BUILDING"})), &ctx);
        let floor = Query::run("LOCATION_KIND_EXISTS", &params(json!({"kind": "FLOOR"})), &ctx);

        assert!(!root.passed && !building.passed && !floor.passed);
        assert_eq!(root.details.as_deref(), Some("Found 0 root CAMPUS node(s)"));
        assert_eq!(building.details.as_deref(), Some("Found 0 BUILDING node(s)"));
        assert_eq!(floor.details.as_deref(), Some("Found 0 FLOOR node(s)"));
    }

    #[test]
    fn test_units_linked_to_location_threshold() {
        let mut linked = unit("OPD", vec![], ResourceSummary::default());
        linked.location_node_id = Some("floor".to_string());
        let unlinked = unit("WARD", vec![], ResourceSummary::default());
        let ctx = snapshot_with_units(vec![linked, unlinked]);

        let outcome = Query::run(
            "UNITS_LINKED_TO_LOCATION",
            &params(json!({"minPercent": 80})),
            &ctx,
        );
        assert!(!outcome.passed);
        assert_eq!(
            outcome.details.as_deref(),
            Some("1/2 (50%) units linked to location")
        );

        let outcome = Query::run(
            "UNITS_LINKED_TO_LOCATION",
            &params(json!({"minPercent": 50})),
            &ctx,
        );
        assert!(outcome.passed);
    }

    #[test]
    fn test_branch_field_queries() {
        let ctx = Snapshot {
            branch: Branch {
                gst_number: Some("29ABCDE1234F1Z5".to_string()),
                address: Some("12 MG Road".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(Query::run("BRANCH_FIELD_SET", &params(json!({"field": "gstNumber"})), &ctx).passed);
        let outcome = Query::run("BRANCH_FIELD_SET", &params(json!({"field": "panNumber"})), &ctx);
        assert!(!outcome.passed);
        assert_eq!(outcome.details.as_deref(), Some("panNumber is not set"));

        let outcome = Query::run("BRANCH_FIELD_SET", &params(json!({"field": "bogus"})), &ctx);
        assert!(!outcome.passed);
        assert!(outcome.details.unwrap().contains("bogus"));

        let outcome = Query::run("BRANCH_ADDRESS_COMPLETE", &Map::new(), &ctx);
        assert!(!outcome.passed);
        assert_eq!(outcome.details.as_deref(), Some("Missing: pinCode, state"));
    }

    #[test]
    fn test_department_queries() {
        let ctx = Snapshot {
            departments: DepartmentSummary {
                total: 4,
                with_head: 3,
                departments: vec![Department::default(); 4],
                ..Default::default()
            },
            ..Default::default()
        };

        let outcome = Query::run("DEPARTMENTS_WITH_HEAD", &params(json!({"minPercent": 80})), &ctx);
        assert!(!outcome.passed);
        assert_eq!(
            outcome.details.as_deref(),
            Some("3/4 (75%) departments have heads")
        );

        assert!(Query::run("DEPARTMENT_COUNT_MIN", &params(json!({"min": 4})), &ctx).passed);
        assert!(!Query::run("DEPARTMENT_COUNT_MIN", &params(json!({"min": 5})), &ctx).passed);

        // Empty department list passes the head-percentage check vacuously
        let empty = Snapshot::default();
        assert!(Query::run("DEPARTMENTS_WITH_HEAD", &Map::new(), &empty).passed);
    }

    #[test]
    fn test_infra_config_heuristic() {
        let mut ctx = Snapshot::default();
        assert!(!Query::run("INFRA_CONFIG_EXISTS", &Map::new(), &ctx).passed);

        ctx.branch.bed_count = Some(20);
        assert!(Query::run("INFRA_CONFIG_EXISTS", &Map::new(), &ctx).passed);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let ctx = snapshot_with_units(vec![unit(
            "ICU",
            vec![room("PATIENT_ROOM", false, false)],
            ResourceSummary::default(),
        )]);
        let p = params(json!({"amenity": "hasOxygen", "unitTypeCodes": ["ICU"]}));
        let first = Query::run("CRITICAL_CARE_ROOMS_HAVE_AMENITY", &p, &ctx);
        let second = Query::run("CRITICAL_CARE_ROOMS_HAVE_AMENITY", &p, &ctx);
        assert_eq!(first, second);
    }
}
