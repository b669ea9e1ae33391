use crate::model::Issue;
use serde::Deserialize;

/// Listing page terminated by an `isLast` flag (boards, sprints).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuePage<T> {
    #[serde(default)]
    pub start_at: usize,
    #[serde(default)]
    pub max_results: usize,
    #[serde(default)]
    pub is_last: bool,
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

/// Listing page terminated by a `total` count (sprint issues).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePage {
    #[serde(default)]
    pub start_at: usize,
    #[serde(default)]
    pub max_results: usize,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// Reported to the caller after every received page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageProgress {
    pub page: usize,
    pub received: usize,
    pub total: Option<usize>,
}
