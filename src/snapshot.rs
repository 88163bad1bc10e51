//! Branch configuration snapshot
//!
//! The immutable, fully-materialized view of one branch's physical and
//! organizational setup that every checker evaluates against. The snapshot
//! is produced by an external context provider and arrives as JSON; the
//! engine treats it as read-only and never issues queries of its own.
//!
//! Field names follow the provider's wire contract (camelCase).

use anyhow::Context as _;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Branch identity and statutory fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Branch {
    pub id: String,
    pub code: Option<String>,
    pub name: String,
    pub legal_entity_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_code: Option<String>,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub clinical_est_reg_number: Option<String>,
    pub rohini_id: Option<String>,
    pub hfr_id: Option<String>,
    pub accreditations: Option<serde_json::Value>,
    pub bed_count: Option<u32>,
    pub established_date: Option<String>,
    pub default_currency: Option<String>,
    pub timezone: Option<String>,
    pub fiscal_year_start_month: Option<u8>,
    pub working_hours: Option<serde_json::Value>,
    #[serde(rename = "emergency24x7")]
    pub emergency_24x7: bool,
    pub multi_language_support: bool,
    pub supported_languages: Option<serde_json::Value>,
    pub contact_phone1: Option<String>,
    pub contact_email: Option<String>,
}

impl Branch {
    /// Look up a string field by its wire name.
    ///
    /// Returns `None` for field names outside the known set, so callers can
    /// distinguish "unknown field" from "field not populated".
    pub fn string_field(&self, field: &str) -> Option<&Option<String>> {
        match field {
            "code" => Some(&self.code),
            "legalEntityName" => Some(&self.legal_entity_name),
            "address" => Some(&self.address),
            "city" => Some(&self.city),
            "state" => Some(&self.state),
            "pinCode" => Some(&self.pin_code),
            "gstNumber" => Some(&self.gst_number),
            "panNumber" => Some(&self.pan_number),
            "clinicalEstRegNumber" => Some(&self.clinical_est_reg_number),
            "rohiniId" => Some(&self.rohini_id),
            "hfrId" => Some(&self.hfr_id),
            "defaultCurrency" => Some(&self.default_currency),
            "timezone" => Some(&self.timezone),
            "contactPhone1" => Some(&self.contact_phone1),
            "contactEmail" => Some(&self.contact_email),
            _ => None,
        }
    }
}

/// One node in the location hierarchy (Campus → Building → Floor → Zone → Area)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationNode {
    pub id: String,
    pub kind: String,
    pub code: Option<String>,
    pub name: Option<String>,
    pub is_active: bool,
    pub floor_number: Option<i32>,
    pub wheelchair_access: bool,
    pub emergency_exit: bool,
    pub stretcher_access: bool,
    pub fire_zone: Option<String>,
    pub children: Vec<LocationNode>,
}

/// Location tree plus rollups precomputed by the context provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationSummary {
    pub total_nodes: usize,
    pub by_kind: IndexMap<String, usize>,
    pub tree: Vec<LocationNode>,
    pub has_fire_zones: bool,
    pub has_emergency_exits: bool,
    pub has_wheelchair_access: bool,
    pub nodes_without_revision: usize,
}

impl LocationSummary {
    /// Flatten the tree into a list of all nodes
    pub fn flat_nodes(&self) -> Vec<&LocationNode> {
        let mut out = Vec::new();
        let mut stack: Vec<&LocationNode> = self.tree.iter().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter());
        }
        out
    }

    /// Flatten the tree into (node, parent id) pairs; roots carry `None`
    pub fn nodes_with_parent(&self) -> Vec<(&LocationNode, Option<&str>)> {
        let mut out = Vec::new();
        let mut stack: Vec<(&LocationNode, Option<&str>)> =
            self.tree.iter().map(|n| (n, None)).collect();
        while let Some((node, parent)) = stack.pop() {
            out.push((node, parent));
            for child in &node.children {
                stack.push((child, Some(node.id.as_str())));
            }
        }
        out
    }

    /// Count nodes of a given kind anywhere in the tree
    pub fn count_kind(&self, kind: &str) -> usize {
        self.flat_nodes().iter().filter(|n| n.kind == kind).count()
    }

    /// Count root-level nodes of a given kind
    pub fn count_root_kind(&self, kind: &str) -> usize {
        self.tree.iter().filter(|n| n.kind == kind).count()
    }
}

/// One room inside a unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Room {
    pub id: String,
    pub code: String,
    pub name: String,
    pub room_type: Option<String>,
    pub area_sq_ft: Option<u32>,
    pub max_occupancy: Option<u32>,
    pub pricing_tier: Option<String>,
    pub has_attached_bathroom: bool,
    #[serde(rename = "hasAC")]
    pub has_ac: bool,
    #[serde(rename = "hasTV")]
    pub has_tv: bool,
    pub has_oxygen: bool,
    pub has_suction: bool,
    pub is_active: bool,
}

/// Aggregated resource counts for one unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceSummary {
    pub total: usize,
    pub beds: usize,
    pub schedulable: usize,
    pub by_type: IndexMap<String, usize>,
    pub by_state: IndexMap<String, usize>,
}

impl ResourceSummary {
    /// Count of resources in a given lifecycle state
    pub fn in_state(&self, state: &str) -> usize {
        self.by_state.get(state).copied().unwrap_or(0)
    }

    /// Count of resources of a given type
    pub fn of_type(&self, resource_type: &str) -> usize {
        self.by_type.get(resource_type).copied().unwrap_or(0)
    }
}

/// One unit with its rooms and resource rollup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Unit {
    pub id: String,
    pub code: String,
    pub name: String,
    pub type_name: String,
    pub type_code: String,
    pub is_active: bool,
    pub location_node_id: Option<String>,
    pub department_id: Option<String>,
    pub department_name: Option<String>,
    pub rooms: Vec<Room>,
    pub resources: ResourceSummary,
}

impl Unit {
    /// Active rooms of this unit
    pub fn active_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|r| r.is_active)
    }
}

/// Per-type rollup entry in [`UnitSummary::by_type`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnitTypeInfo {
    pub count: usize,
    pub type_name: Option<String>,
}

/// All units of the branch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnitSummary {
    pub total_units: usize,
    pub active_units: usize,
    pub by_type: IndexMap<String, UnitTypeInfo>,
    pub units: Vec<Unit>,
}

impl UnitSummary {
    /// Units currently active
    pub fn active(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.is_active)
    }
}

/// One department
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Department {
    pub id: String,
    pub code: String,
    pub name: String,
    pub has_head: bool,
    pub staff_count: usize,
    pub facility_type: Option<String>,
}

/// All active departments of the branch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DepartmentSummary {
    pub total: usize,
    pub with_head: usize,
    pub with_staff: usize,
    pub departments: Vec<Department>,
}

/// Point-in-time snapshot of one branch's configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub branch: Branch,
    pub location: LocationSummary,
    pub units: UnitSummary,
    pub departments: DepartmentSummary,
}

impl Snapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot file {}", path.display()))?;
        let snapshot: Self = serde_json::from_str(&content)
            .with_context(|| format!("invalid snapshot JSON in {}", path.display()))?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, kind: &str, children: Vec<LocationNode>) -> LocationNode {
        LocationNode {
            id: id.to_string(),
            kind: kind.to_string(),
            is_active: true,
            children,
            ..Default::default()
        }
    }

    #[test]
    fn test_flat_nodes_covers_whole_tree() {
        let summary = LocationSummary {
            total_nodes: 4,
            tree: vec![node(
                "campus",
                "CAMPUS",
                vec![node(
                    "bldg",
                    "BUILDING",
                    vec![node("f1", "FLOOR", vec![]), node("f2", "FLOOR", vec![])],
                )],
            )],
            ..Default::default()
        };

        assert_eq!(summary.flat_nodes().len(), 4);
        assert_eq!(summary.count_kind("FLOOR"), 2);
        assert_eq!(summary.count_root_kind("CAMPUS"), 1);
        assert_eq!(summary.count_root_kind("BUILDING"), 0);
    }

    #[test]
    fn test_nodes_with_parent_tracks_parent_ids() {
        let summary = LocationSummary {
            total_nodes: 2,
            tree: vec![node("campus", "CAMPUS", vec![node("bldg", "BUILDING", vec![])])],
            ..Default::default()
        };

        let pairs = summary.nodes_with_parent();
        let root = pairs.iter().find(|(n, _)| n.id == "campus").unwrap();
        assert!(root.1.is_none());
        let child = pairs.iter().find(|(n, _)| n.id == "bldg").unwrap();
        assert_eq!(child.1, Some("campus"));
    }

    #[test]
    fn test_branch_string_field_lookup() {
        let branch = Branch {
            gst_number: Some("29ABCDE1234F1Z5".to_string()),
            ..Default::default()
        };
        assert_eq!(
            branch.string_field("gstNumber").unwrap().as_deref(),
            Some("29ABCDE1234F1Z5")
        );
        assert!(branch.string_field("panNumber").unwrap().is_none());
        assert!(branch.string_field("noSuchField").is_none());
    }

    #[test]
    fn test_snapshot_deserializes_camel_case() {
        let json = r#"{
            "branch": {"id": "b1", "name": "City Hospital", "bedCount": 40, "emergency24x7": true},
            "location": {"totalNodes": 0},
            "units": {"units": [{"id": "u1", "code": "ICU-A", "name": "ICU A",
                                 "typeCode": "ICU", "isActive": true,
                                 "rooms": [{"id": "r1", "code": "R1", "name": "Bay 1",
                                            "hasOxygen": true, "isActive": true}],
                                 "resources": {"total": 2, "beds": 2,
                                               "byType": {"ICU_BED": 2},
                                               "byState": {"AVAILABLE": 2}}}]},
            "departments": {"total": 0}
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.branch.bed_count, Some(40));
        assert!(snapshot.branch.emergency_24x7);
        let unit = &snapshot.units.units[0];
        assert_eq!(unit.type_code, "ICU");
        assert_eq!(unit.resources.of_type("ICU_BED"), 2);
        assert_eq!(unit.resources.in_state("AVAILABLE"), 2);
        assert!(unit.rooms[0].has_oxygen);
        assert!(!unit.rooms[0].has_suction);
    }

    #[test]
    fn test_resource_summary_missing_keys_are_zero() {
        let resources = ResourceSummary::default();
        assert_eq!(resources.in_state("BLOCKED"), 0);
        assert_eq!(resources.of_type("BED"), 0);
    }
}
