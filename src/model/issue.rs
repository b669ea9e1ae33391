use crate::model::de;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Issue {
    #[serde(deserialize_with = "de::flexible_id")]
    pub id: u64,
    pub key: String,
    #[serde(rename = "self", default)]
    pub link: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub fields: IssueFields,
}

/// The subset of the server's field bag the reports look at. Everything else,
/// including story points stored under a server-specific custom field, lands
/// in `custom`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueFields {
    pub summary: Option<String>,
    pub epic: Option<Epic>,
    pub assignee: Option<Assignee>,
    pub status: Option<Status>,
    pub sprint: Option<SprintRef>,
    pub closed_sprints: Option<Vec<SprintRef>>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub components: Vec<Component>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub labels: Vec<String>,
    #[serde(flatten)]
    pub custom: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Epic {
    pub id: Option<u64>,
    pub key: Option<String>,
    pub name: Option<String>,
    pub summary: Option<String>,
}

impl Epic {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.key.is_none() && self.name.is_none() && self.summary.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub key: Option<String>,
    pub name: Option<String>,
    pub email_address: Option<String>,
    pub display_name: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Component {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub name: Option<String>,
    pub status_category: Option<StatusCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusCategory {
    pub key: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SprintRef {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub state: Option<String>,
}

// Parser
impl Issue {
    pub fn parse(json_str: &str) -> crate::model::Result<Self> {
        Ok(serde_json::from_str(json_str)?)
    }
}

// Projections
impl Issue {
    pub fn assignee(&self) -> Option<&Assignee> {
        self.fields.assignee.as_ref()
    }

    pub fn components(&self) -> &[Component] {
        &self.fields.components
    }

    pub fn labels(&self) -> &[String] {
        &self.fields.labels
    }

    pub fn custom_field(&self, name: &str) -> Option<&Value> {
        self.fields.custom.get(name)
    }
}
