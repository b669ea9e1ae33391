use serde::Deserialize;

#[derive(Debug, Clone, Eq, Hash, PartialEq, Deserialize)]
pub struct Board {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}
