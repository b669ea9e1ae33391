use crate::model::Error;
use indexmap::IndexMap;
use serde_json::{from_str, Value};
use std::fs;

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Team {
    pub name: String,
    pub members: Vec<String>,
    pub components: Vec<String>,
}

// Create
impl Team {
    pub fn from_config(path: &str) -> crate::model::Result<Vec<Self>> {
        let json_str = fs::read_to_string(path)?;
        Self::parse(&json_str)
    }

    pub fn new(
        name: impl ToString,
        members: Vec<impl ToString>,
        components: Vec<impl ToString>,
    ) -> Self {
        Self {
            name: name.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
            components: components.iter().map(|c| c.to_string()).collect(),
        }
    }
}

// Parser
impl Team {
    fn parse(json_str: &str) -> crate::model::Result<Vec<Self>> {
        let elements: IndexMap<String, Value> = from_str(json_str)?;
        let mut result = Vec::new();
        for (name, details) in elements {
            let Some(members) = string_list(&details["members"]) else {
                return Err(Error::configuration(format!(
                    "Not found 'members' field for team '{}'",
                    name
                )));
            };
            let Some(components) = string_list(&details["components"]) else {
                return Err(Error::configuration(format!(
                    "Not found 'components' field for team '{}'",
                    name
                )));
            };
            result.push(Self::new(name, members, components));
        }
        Ok(result)
    }
}

// Lookup
impl Team {
    pub fn has_member(&self, email: &str) -> bool {
        self.members.iter().any(|m| m == email)
    }

    pub fn owns_component(&self, component: &str) -> bool {
        self.components.iter().any(|c| c == component)
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value.as_array().map(|items| {
        items
            .iter()
            .filter_map(|item| item.as_str().map(String::from))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn keeps_configured_order() {
        let json = r#"{
            "Platform": {"members": ["a@example.com"], "components": ["Backend"]},
            "Apps": {"members": ["b@example.com", "c@example.com"], "components": []}
        }"#;

        let teams = Team::parse(json).unwrap();

        assert_eq!(
            teams,
            vec![
                Team::new("Platform", vec!["a@example.com"], vec!["Backend"]),
                Team::new("Apps", vec!["b@example.com", "c@example.com"], Vec::<String>::new()),
            ]
        );
    }

    #[test]
    fn missing_members_is_a_configuration_error() {
        let result = Team::parse(r#"{"Platform": {"components": []}}"#);
        assert!(matches!(result, Err(Error::Configuration(msg)) if msg.contains("Platform")));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Core": {{"members": [], "components": ["Api"]}}}}"#).unwrap();

        let teams = Team::from_config(file.path().to_str().unwrap()).unwrap();

        assert_eq!(teams.len(), 1);
        assert!(teams[0].owns_component("Api"));
        assert!(!teams[0].has_member("nobody@example.com"));
    }
}
