use crate::model::de;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintState {
    Future,
    Active,
    Closed,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: u64,
    #[serde(rename = "self", default)]
    pub link: String,
    #[serde(default)]
    pub state: SprintState,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "de::optional_datetime")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::optional_datetime")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de::optional_datetime")]
    pub activated_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub origin_board_id: Option<u64>,
    #[serde(default)]
    pub goal: Option<String>,
}

// Create
impl Sprint {
    pub fn new(id: u64, name: impl ToString) -> Self {
        Self {
            id,
            link: String::new(),
            state: SprintState::Unknown,
            name: name.to_string(),
            start_date: None,
            end_date: None,
            activated_date: None,
            origin_board_id: None,
            goal: None,
        }
    }
}

// Parser
impl Sprint {
    pub fn parse(json_str: &str) -> crate::model::Result<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    pub fn name_contains(&self, keyword: &str) -> bool {
        self.name.to_lowercase().contains(&keyword.to_lowercase())
    }
}
