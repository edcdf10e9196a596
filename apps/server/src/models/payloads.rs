//! Create payloads
//!
//! Request bodies are deserialized into these types and validated before they
//! reach the store, which only ever sees well-formed JSON records.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

use super::Entity;
use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewOrganization {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 1024))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewProject {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 1))]
    pub organization_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewProbe {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 1024))]
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub project_id: i64,
    /// Seconds between checks.
    #[serde(default = "default_interval")]
    #[validate(range(min = 1, max = 86_400))]
    pub interval: i64,
    #[validate(nested)]
    pub target: ProbeTarget,
}

/// The HTTP endpoint a probe checks.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProbeTarget {
    #[validate(url)]
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default = "default_timeout_ms")]
    #[validate(range(min = 1, max = 60_000))]
    pub timeout_ms: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
}

fn default_interval() -> i64 {
    60
}

fn default_timeout_ms() -> u32 {
    10_000
}

/// A validated create payload for any entity.
#[derive(Debug, Clone)]
pub enum NewRecord {
    Organization(NewOrganization),
    Project(NewProject),
    Probe(NewProbe),
}

impl NewRecord {
    /// Deserialize and validate `body` as a create payload for `entity`.
    pub fn parse(entity: Entity, body: JsonValue) -> Result<Self> {
        let record = match entity {
            Entity::Organization => Self::Organization(from_body(entity, body)?),
            Entity::Project => Self::Project(from_body(entity, body)?),
            Entity::Probe => Self::Probe(from_body(entity, body)?),
        };
        match &record {
            Self::Organization(o) => o.validate()?,
            Self::Project(p) => p.validate()?,
            Self::Probe(p) => p.validate()?,
        }
        Ok(record)
    }

    /// The record this one must be attached to, if any.
    pub fn parent(&self) -> Option<(Entity, i64)> {
        match self {
            Self::Organization(_) => None,
            Self::Project(p) => Some((Entity::Organization, p.organization_id)),
            Self::Probe(p) => Some((Entity::Project, p.project_id)),
        }
    }

    pub fn into_json(self) -> Result<JsonValue> {
        let value = match self {
            Self::Organization(o) => serde_json::to_value(o),
            Self::Project(p) => serde_json::to_value(p),
            Self::Probe(p) => serde_json::to_value(p),
        };
        value.map_err(|e| Error::Internal(format!("Failed to serialize record: {e}")))
    }
}

fn from_body<T: serde::de::DeserializeOwned>(entity: Entity, body: JsonValue) -> Result<T> {
    serde_json::from_value(body)
        .map_err(|e| Error::Validation(format!("Invalid {entity} payload: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn probe_defaults_are_applied() {
        let record = NewRecord::parse(
            Entity::Probe,
            json!({
                "name": "homepage",
                "projectId": 1,
                "target": { "url": "https://example.org" }
            }),
        )
        .unwrap();

        assert_eq!(record.parent(), Some((Entity::Project, 1)));
        assert_eq!(
            record.into_json().unwrap(),
            json!({
                "name": "homepage",
                "description": null,
                "projectId": 1,
                "interval": 60,
                "target": { "url": "https://example.org", "method": "GET", "timeoutMs": 10000 }
            })
        );
    }

    #[test]
    fn invalid_payloads_are_rejected() {
        let empty_name = NewRecord::parse(Entity::Organization, json!({ "name": "" }));
        assert!(matches!(empty_name, Err(Error::Validation(_))));

        let bad_url = NewRecord::parse(
            Entity::Probe,
            json!({ "name": "x", "projectId": 1, "target": { "url": "not a url" } }),
        );
        assert!(matches!(bad_url, Err(Error::Validation(_))));

        let unknown_field = NewRecord::parse(
            Entity::Project,
            json!({ "name": "x", "organizationId": 1, "owner": "me" }),
        );
        assert!(matches!(unknown_field, Err(Error::Validation(_))));
    }
}
