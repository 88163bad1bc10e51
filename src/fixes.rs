//! Fix suggestion generator
//!
//! Transforms issue lists into ordered, navigable remediation suggestions.
//! Each issue yields exactly one suggestion; routing is keyed on the
//! issue's entity type, falling back to a category mapping when no entity
//! is attached. Route generators degrade to collection-level routes when
//! the entity id is absent.

use crate::issue::{category, Issue, Severity};
use serde::{Deserialize, Serialize};

/// How the user acts on a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    /// A UI route is available
    Navigate,
    /// No route; follow the instructions by hand
    Manual,
}

/// One actionable remediation step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixSuggestion {
    pub issue_id: String,
    pub category: String,
    pub severity: Severity,
    pub title: String,
    pub suggested_action: String,
    pub action_type: ActionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
}

/// The sorted suggestion list plus rollup counts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixReport {
    pub total: usize,
    pub suggestions: Vec<FixSuggestion>,
    pub navigable: usize,
    pub manual: usize,
    pub blocker_fixes: usize,
    pub warning_fixes: usize,
}

/// Resolved navigation target for one route key
struct Route {
    route: String,
    action: &'static str,
}

fn entity_route(collection: &str, entity_id: Option<&str>, action: &'static str) -> Route {
    Route {
        route: match entity_id {
            Some(id) => format!("{collection}/{id}"),
            None => collection.to_string(),
        },
        action,
    }
}

fn route_for(key: &str, entity_id: Option<&str>) -> Option<Route> {
    let route = match key {
        "BRANCH" => Route {
            route: "/infra/branch/profile".to_string(),
            action: "Update the branch profile with the missing information.",
        },
        "LOCATION_NODE" => entity_route(
            "/infra/locations",
            entity_id,
            "Edit this location node to add missing attributes (fire zone, accessibility, \
             revision).",
        ),
        "LOCATION_TREE" => Route {
            route: "/infra/locations".to_string(),
            action: "Review the location tree and fix structural issues.",
        },
        "DEPARTMENT" => entity_route(
            "/infra/departments",
            entity_id,
            "Update this department's configuration.",
        ),
        "BRANCH_UNIT_TYPE" => Route {
            route: "/infra/unit-types".to_string(),
            action: "Review enabled unit types and create units for each, or disable unused \
                     types.",
        },
        "UNIT" => entity_route(
            "/infra/units",
            entity_id,
            "Edit this unit to add missing rooms, resources, or location binding.",
        ),
        "UNIT_ROOM" => entity_route(
            "/infra/rooms",
            entity_id,
            "Update this room's attributes (oxygen, suction, pricing tier, room type).",
        ),
        "UNIT_RESOURCE" => entity_route(
            "/infra/resources",
            entity_id,
            "Review this resource's state and add missing reason/documentation.",
        ),
        _ => return None,
    };
    Some(route)
}

/// Route key for issues that carry no entity type of their own
fn category_route_key(issue_category: &str) -> &'static str {
    match issue_category {
        category::BRANCH => "BRANCH",
        category::LOCATION => "LOCATION_TREE",
        category::DEPARTMENT => "DEPARTMENT",
        category::UNIT_TYPE => "BRANCH_UNIT_TYPE",
        category::UNIT => "UNIT",
        category::ROOM => "UNIT_ROOM",
        category::RESOURCE => "UNIT_RESOURCE",
        _ => "BRANCH",
    }
}

/// Map every issue to one suggestion, sorted blockers-first
pub fn suggest(issues: &[Issue]) -> FixReport {
    let mut suggestions: Vec<FixSuggestion> = issues
        .iter()
        .map(|issue| {
            let route_key = issue
                .entity_type
                .clone()
                .unwrap_or_else(|| category_route_key(&issue.category).to_string());
            let route = route_for(&route_key, issue.entity_id.as_deref());

            let (action_type, navigate_to, suggested_action) = match route {
                Some(r) => (
                    ActionType::Navigate,
                    Some(r.route),
                    format!("{} -> {}", issue.fix_hint, r.action),
                ),
                None => (ActionType::Manual, None, issue.fix_hint.clone()),
            };

            FixSuggestion {
                issue_id: issue.id.clone(),
                category: issue.category.clone(),
                severity: issue.severity,
                title: issue.title.clone(),
                suggested_action,
                action_type,
                navigate_to,
                entity_type: issue.entity_type.clone(),
                entity_id: issue.entity_id.clone(),
            }
        })
        .collect();

    // Stable sort: equal severities keep their input order
    suggestions.sort_by_key(|s| s.severity.rank());

    let navigable = suggestions
        .iter()
        .filter(|s| s.action_type == ActionType::Navigate)
        .count();
    let blocker_fixes = suggestions
        .iter()
        .filter(|s| s.severity == Severity::Blocker)
        .count();
    let warning_fixes = suggestions
        .iter()
        .filter(|s| s.severity == Severity::Warning)
        .count();

    FixReport {
        total: suggestions.len(),
        navigable,
        manual: suggestions.len() - navigable,
        blocker_fixes,
        warning_fixes,
        suggestions,
    }
}
