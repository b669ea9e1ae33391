use crate::analyze::classifier::{IssueClassifier, EMPTY_EPIC};
use crate::analyze::{
    Buckets, DataAnalysis, EpicBreakdown, SprintAnalysis, SprintsAnalyzed, Velocity, Work,
};
use crate::model::{Issue, Sprint, Team};
use tracing::debug;

pub trait Analyzer {
    fn analyze_sprints(&self) -> SprintsAnalyzed;
}

impl Analyzer for DataAnalysis {
    fn analyze_sprints(&self) -> SprintsAnalyzed {
        self.sprints
            .iter()
            .map(|(sprint, issues)| {
                let epics =
                    epic_breakdown(issues, sprint, &self.story_points_field, &self.base_url);
                let velocity = velocity(issues, sprint, &self.teams, &self.story_points_field);
                debug!(
                    sprint = %sprint.name,
                    issues = issues.len(),
                    planned = epics.planned.total(),
                    delivered = epics.delivered.total(),
                    "analyzed sprint"
                );
                SprintAnalysis {
                    sprint: sprint.clone(),
                    issues: issues.len(),
                    epics,
                    velocity,
                }
            })
            .collect()
    }
}

pub fn epic_breakdown(
    issues: &[Issue],
    sprint: &Sprint,
    story_points_field: &str,
    base_url: &str,
) -> EpicBreakdown {
    let mut breakdown = EpicBreakdown::default();
    for issue in issues {
        let epic = issue.epic_name();
        let link = issue.epic_link(base_url);
        if link != EMPTY_EPIC {
            breakdown.links.entry(epic.to_string()).or_insert(link);
        }
        breakdown
            .issues
            .entry(epic.to_string())
            .or_default()
            .push(issue.issue_link(base_url));

        let story_points = issue.story_points(story_points_field);
        if story_points <= 0.0 {
            continue;
        }
        breakdown.planned.add(&epic, story_points);
        if issue.is_closed_in_sprint(sprint) {
            breakdown.delivered.add(&epic, story_points);
        }
    }
    breakdown
}

pub fn velocity(
    issues: &[Issue],
    sprint: &Sprint,
    teams: &[Team],
    story_points_field: &str,
) -> Velocity {
    let mut velocity = Velocity {
        teams: Buckets::seeded(teams.iter().map(|team| &team.name)),
        members: Buckets::seeded(teams.iter().flat_map(|team| &team.members)),
    };
    for issue in issues {
        let story_points = issue.story_points(story_points_field);
        if story_points <= 0.0 {
            continue;
        }
        let closed = issue.is_closed_in_sprint(sprint);
        record(velocity.teams.entry(issue.team(teams)), story_points, closed);
        record(velocity.members.entry(issue.member()), story_points, closed);
    }
    velocity
}

fn record(work: &mut Work, story_points: f64, closed: bool) {
    work.planned += story_points;
    if closed {
        work.delivered += story_points;
    }
}
