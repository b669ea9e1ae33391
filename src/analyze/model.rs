use crate::model::{Issue, Sprint, Team};
use indexmap::IndexMap;

#[derive(Debug, Clone)]
pub struct DataAnalysis {
    pub teams: Vec<Team>,
    pub story_points_field: String,
    pub base_url: String,
    pub sprints: Vec<(Sprint, Vec<Issue>)>,
}

impl DataAnalysis {
    pub fn new(teams: Vec<Team>, story_points_field: impl ToString, base_url: impl ToString) -> Self {
        Self {
            teams,
            story_points_field: story_points_field.to_string(),
            base_url: base_url.to_string(),
            sprints: Vec::new(),
        }
    }

    pub fn insert_issues(&mut self, sprint: &Sprint, issues: Vec<Issue>) {
        self.sprints.push((sprint.clone(), issues));
    }
}

/// Ordered accumulator keyed by epic, team or member name.
#[derive(Debug, Clone, PartialEq)]
pub struct Buckets<V> {
    entries: IndexMap<String, V>,
}

impl<V> Default for Buckets<V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<V: Default> Buckets<V> {
    pub fn seeded<K: ToString>(keys: impl IntoIterator<Item = K>) -> Self {
        let mut buckets = Self::default();
        for key in keys {
            buckets.entry(&key.to_string());
        }
        buckets
    }

    pub fn entry(&mut self, key: &str) -> &mut V {
        self.entries.entry(key.to_string()).or_default()
    }
}

impl<V> Buckets<V> {
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &V)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Buckets<f64> {
    pub fn add(&mut self, key: &str, points: f64) {
        *self.entry(key) += points;
    }

    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Work {
    pub planned: f64,
    pub delivered: f64,
}

impl Buckets<Work> {
    pub fn planned_total(&self) -> f64 {
        self.entries.values().map(|work| work.planned).sum()
    }

    pub fn delivered_total(&self) -> f64 {
        self.entries.values().map(|work| work.delivered).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpicBreakdown {
    /// Every estimated issue of the sprint.
    pub planned: Buckets<f64>,
    /// Estimated issues closed in the sprint.
    pub delivered: Buckets<f64>,
    pub links: IndexMap<String, String>,
    /// Links of every issue in the sprint, grouped by epic.
    pub issues: IndexMap<String, Vec<String>>,
}

impl EpicBreakdown {
    pub fn open(&self, epic: &str) -> f64 {
        let planned = self.planned.get(epic).copied().unwrap_or_default();
        let delivered = self.delivered.get(epic).copied().unwrap_or_default();
        planned - delivered
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Velocity {
    pub teams: Buckets<Work>,
    pub members: Buckets<Work>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SprintAnalysis {
    pub sprint: Sprint,
    pub issues: usize,
    pub epics: EpicBreakdown,
    pub velocity: Velocity,
}

pub type SprintsAnalyzed = Vec<SprintAnalysis>;

/// Share of `value` in `total` as a fraction; `0` when nothing was summed.
pub fn percentage(value: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        value / total
    }
}
