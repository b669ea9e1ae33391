use crate::model::{Issue, Sprint, Team};
use serde_json::Value;
use std::borrow::Cow;

pub const EMPTY_EPIC: &str = "Others";
pub const UNKNOWN: &str = "Unknown";
const DONE_CATEGORY: &str = "Done";

pub trait IssueClassifier {
    /// Value of the configured story points field, `0` when absent or not a number.
    fn story_points(&self, field: &str) -> f64;
    /// Epic summary, falling back to its name, key or id; `Others` without an epic.
    fn epic_name(&self) -> Cow<'_, str>;
    fn epic_link(&self, base_url: &str) -> String;
    fn issue_link(&self, base_url: &str) -> String;
    fn is_done(&self) -> bool;
    fn is_closed_in_sprint(&self, sprint: &Sprint) -> bool;
    /// First configured team owning the assignee, or for unassigned issues
    /// the first team owning one of the components.
    fn team<'a>(&self, teams: &'a [Team]) -> &'a str;
    fn member(&self) -> &str;
}

impl IssueClassifier for Issue {
    fn story_points(&self, field: &str) -> f64 {
        self.custom_field(field)
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    fn epic_name(&self) -> Cow<'_, str> {
        let Some(epic) = self.fields.epic.as_ref().filter(|epic| !epic.is_empty()) else {
            return Cow::Borrowed(EMPTY_EPIC);
        };
        match epic.summary.as_deref().or(epic.name.as_deref()).or(epic.key.as_deref()) {
            Some(name) => Cow::Borrowed(name),
            None => epic
                .id
                .map_or(Cow::Borrowed(EMPTY_EPIC), |id| Cow::Owned(id.to_string())),
        }
    }

    fn epic_link(&self, base_url: &str) -> String {
        match self.fields.epic.as_ref().and_then(|epic| epic.key.as_deref()) {
            Some(key) => format!("{}/browse/{}", base_url.trim_end_matches('/'), key),
            None => EMPTY_EPIC.to_string(),
        }
    }

    fn issue_link(&self, base_url: &str) -> String {
        format!("{}/browse/{}", base_url.trim_end_matches('/'), self.key)
    }

    fn is_done(&self) -> bool {
        self.fields
            .status
            .as_ref()
            .and_then(|status| status.status_category.as_ref())
            .and_then(|category| category.name.as_deref())
            == Some(DONE_CATEGORY)
    }

    fn is_closed_in_sprint(&self, sprint: &Sprint) -> bool {
        if !self.is_done() {
            return false;
        }
        if let Some(current) = self.fields.sprint.as_ref().and_then(|s| s.id) {
            return current == sprint.id;
        }
        self.fields
            .closed_sprints
            .iter()
            .flatten()
            .any(|closed| closed.id == Some(sprint.id))
    }

    fn team<'a>(&self, teams: &'a [Team]) -> &'a str {
        let team = match self.assignee() {
            Some(assignee) => assignee
                .email_address
                .as_deref()
                .and_then(|email| teams.iter().find(|team| team.has_member(email))),
            None => self.components().iter().find_map(|component| {
                teams
                    .iter()
                    .find(|team| team.owns_component(&component.name))
            }),
        };
        team.map(|team| team.name.as_str()).unwrap_or(UNKNOWN)
    }

    fn member(&self) -> &str {
        self.assignee()
            .and_then(|assignee| assignee.email_address.as_deref())
            .unwrap_or(UNKNOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const STORY_POINTS: &str = "customfield_10002";

    fn issue(fields: serde_json::Value) -> Issue {
        serde_json::from_value(json!({"id": "1", "key": "PROJ-1", "fields": fields})).unwrap()
    }

    fn done() -> serde_json::Value {
        json!({"name": "Closed", "statusCategory": {"key": "done", "name": "Done"}})
    }

    fn teams() -> Vec<Team> {
        vec![
            Team::new("Platform", vec!["a@example.com"], vec!["Backend", "Infra"]),
            Team::new("Apps", vec!["b@example.com"], vec!["Mobile", "Backend"]),
        ]
    }

    #[test]
    fn story_points_reads_configured_field() {
        assert_eq!(issue(json!({"customfield_10002": 5})).story_points(STORY_POINTS), 5.0);
        assert_eq!(issue(json!({"customfield_10002": 0.5})).story_points(STORY_POINTS), 0.5);
    }

    #[test]
    fn story_points_default_to_zero() {
        assert_eq!(issue(json!({})).story_points(STORY_POINTS), 0.0);
        assert_eq!(issue(json!({"customfield_10002": null})).story_points(STORY_POINTS), 0.0);
        assert_eq!(issue(json!({"customfield_10002": "8"})).story_points(STORY_POINTS), 0.0);
        assert_eq!(issue(json!({"customfield_10002": 3})).story_points("customfield_1"), 0.0);
    }

    #[test]
    fn epic_name_uses_summary_or_sentinel() {
        let with_epic = issue(json!({"epic": {"key": "PROJ-9", "summary": "Payments"}}));
        assert_eq!(with_epic.epic_name(), "Payments");
        assert_eq!(issue(json!({})).epic_name(), EMPTY_EPIC);
        assert_eq!(issue(json!({"epic": null})).epic_name(), EMPTY_EPIC);
        assert_eq!(issue(json!({"epic": {}})).epic_name(), EMPTY_EPIC);
        assert_eq!(issue(json!({"epic": {"done": false}})).epic_name(), EMPTY_EPIC);
    }

    #[test]
    fn epic_without_summary_is_named_by_name_key_or_id() {
        let named = issue(json!({"epic": {"key": "PROJ-9", "name": "Payments"}}));
        assert_eq!(named.epic_name(), "Payments");
        let keyed = issue(json!({"epic": {"key": "PROJ-9"}}));
        assert_eq!(keyed.epic_name(), "PROJ-9");

        let id_only = issue(json!({"epic": {"id": 5, "done": false}}));
        assert_eq!(id_only.epic_name(), "5");
        assert_eq!(id_only.epic_link("https://jira.example.com"), EMPTY_EPIC);
    }

    #[test]
    fn epic_and_issue_links() {
        let with_epic = issue(json!({"epic": {"key": "PROJ-9", "summary": "Payments"}}));
        assert_eq!(
            with_epic.epic_link("https://jira.example.com/"),
            "https://jira.example.com/browse/PROJ-9"
        );
        assert_eq!(issue(json!({})).epic_link("https://jira.example.com"), EMPTY_EPIC);
        assert_eq!(
            with_epic.issue_link("https://jira.example.com"),
            "https://jira.example.com/browse/PROJ-1"
        );
    }

    #[test]
    fn done_requires_exact_category_name() {
        assert!(issue(json!({"status": done()})).is_done());
        assert!(!issue(json!({"status": {"statusCategory": {"name": "done"}}})).is_done());
        assert!(!issue(json!({"status": {"statusCategory": {"name": "In Progress"}}})).is_done());
        assert!(!issue(json!({})).is_done());
    }

    #[test]
    fn not_done_is_never_closed_in_sprint() {
        let sprint = Sprint::new(471, "Sprint");
        let open = issue(json!({
            "status": {"statusCategory": {"name": "In Progress"}},
            "sprint": {"id": 471},
            "closedSprints": [{"id": 471}]
        }));
        assert!(!open.is_closed_in_sprint(&sprint));
    }

    #[test]
    fn current_sprint_decides_when_present() {
        let closed = issue(json!({
            "status": done(),
            "sprint": {"id": 471},
            "closedSprints": [{"id": 470}]
        }));
        assert!(closed.is_closed_in_sprint(&Sprint::new(471, "Sprint")));
        assert!(!closed.is_closed_in_sprint(&Sprint::new(470, "Sprint")));
    }

    #[test]
    fn closed_sprints_used_without_current_sprint() {
        let closed = issue(json!({"status": done(), "closedSprints": [{"id": 471}]}));
        assert!(closed.is_closed_in_sprint(&Sprint::new(471, "Sprint")));
        assert!(!closed.is_closed_in_sprint(&Sprint::new(999, "Sprint")));
    }

    #[test]
    fn current_sprint_without_id_falls_back_to_history() {
        let closed = issue(json!({
            "status": done(),
            "sprint": {"name": "Sprint 1"},
            "closedSprints": [{"id": null}, {"id": 471}]
        }));
        assert!(closed.is_closed_in_sprint(&Sprint::new(471, "Sprint")));
    }

    #[test]
    fn no_sprint_linkage_is_not_closed() {
        let sprint = Sprint::new(471, "Sprint");
        assert!(!issue(json!({"status": done()})).is_closed_in_sprint(&sprint));
        assert!(!issue(json!({"status": done(), "closedSprints": []})).is_closed_in_sprint(&sprint));
    }

    #[test]
    fn team_by_assignee_email() {
        let teams = teams();
        let assigned = issue(json!({
            "assignee": {"emailAddress": "b@example.com"},
            "components": [{"name": "Infra"}]
        }));
        assert_eq!(assigned.team(&teams), "Apps");
        assert_eq!(assigned.member(), "b@example.com");
    }

    #[test]
    fn assignee_outside_teams_is_unknown() {
        let teams = teams();
        let assigned = issue(json!({
            "assignee": {"emailAddress": "z@example.com"},
            "components": [{"name": "Infra"}]
        }));
        assert_eq!(assigned.team(&teams), UNKNOWN);
    }

    #[test]
    fn team_by_component_first_match_wins() {
        let teams = teams();
        let unassigned = issue(json!({"components": [{"name": "Docs"}, {"name": "Backend"}]}));
        assert_eq!(unassigned.team(&teams), "Platform");
        assert_eq!(unassigned.member(), UNKNOWN);

        let mobile = issue(json!({"components": [{"name": "Mobile"}, {"name": "Infra"}]}));
        assert_eq!(mobile.team(&teams), "Apps");
    }

    #[test]
    fn unmatched_issue_is_unknown() {
        assert_eq!(issue(json!({})).team(&teams()), UNKNOWN);
        assert_eq!(issue(json!({"components": [{"name": "Docs"}]})).team(&[]), UNKNOWN);
    }
}
