use crate::analyze::{percentage, Buckets, SprintAnalysis, Velocity, Work};
use chrono::{DateTime, Utc};
use itertools::Itertools;

pub const EPIC_HEADINGS: [&str; 3] = ["Epic name", "Story Points", "Percentage"];
pub const VELOCITY_HEADINGS: [&str; 4] = ["Sprint", "From", "To", "Total"];

#[derive(Debug, Clone, PartialEq)]
pub struct EpicRow {
    pub epic: String,
    pub story_points: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EpicTable {
    pub rows: Vec<EpicRow>,
    pub total: f64,
}

impl EpicTable {
    /// Percentages are relative to the total of the same view.
    pub fn from_buckets(buckets: &Buckets<f64>) -> Self {
        let total = buckets.total();
        let rows = buckets
            .iter()
            .map(|(epic, story_points)| EpicRow {
                epic: epic.clone(),
                story_points: *story_points,
                percentage: percentage(*story_points, total),
            })
            .collect();
        Self { rows, total }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Measure {
    Planned,
    Delivered,
}

impl Measure {
    fn of(self, work: &Work) -> f64 {
        match self {
            Measure::Planned => work.planned,
            Measure::Delivered => work.delivered,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VelocityRow {
    pub sprint: String,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub total: f64,
    pub values: Vec<f64>,
}

/// One row per sprint, one value column per team or member.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityTable {
    pub columns: Vec<String>,
    pub rows: Vec<VelocityRow>,
}

impl VelocityTable {
    pub fn teams(analyses: &[SprintAnalysis], measure: Measure) -> Self {
        Self::build(analyses, measure, |velocity| &velocity.teams)
    }

    pub fn members(analyses: &[SprintAnalysis], measure: Measure) -> Self {
        Self::build(analyses, measure, |velocity| &velocity.members)
    }

    pub fn headings(&self) -> Vec<String> {
        VELOCITY_HEADINGS
            .iter()
            .map(|heading| heading.to_string())
            .chain(self.columns.iter().cloned())
            .collect()
    }

    fn build<S>(analyses: &[SprintAnalysis], measure: Measure, select: S) -> Self
    where
        S: Fn(&Velocity) -> &Buckets<Work>,
    {
        let columns: Vec<String> = analyses
            .iter()
            .flat_map(|analysis| select(&analysis.velocity).keys())
            .unique()
            .cloned()
            .collect();

        let rows = analyses
            .iter()
            .map(|analysis| {
                let buckets = select(&analysis.velocity);
                let values: Vec<f64> = columns
                    .iter()
                    .map(|column| buckets.get(column).map(|w| measure.of(w)).unwrap_or(0.0))
                    .collect();
                VelocityRow {
                    sprint: analysis.sprint.name.clone(),
                    from: analysis.sprint.start_date,
                    to: analysis.sprint.end_date,
                    total: values.iter().sum(),
                    values,
                }
            })
            .collect();

        Self { columns, rows }
    }
}
