use axum::body::Bytes;
use serde_json::{json, Value};

pub fn to_json_body(value: &Value) -> anyhow::Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(value)?))
}

pub fn organization(name: &str) -> Value {
    json!({ "name": name })
}

pub fn project(name: &str, organization_id: i64) -> Value {
    json!({ "name": name, "organizationId": organization_id })
}

/// Builder for probe payloads
pub struct ProbeBuilder {
    name: String,
    description: Option<String>,
    project_id: i64,
    interval: Option<i64>,
    url: String,
    method: Option<String>,
}

impl ProbeBuilder {
    pub fn new(name: impl Into<String>, project_id: i64) -> Self {
        Self {
            name: name.into(),
            description: None,
            project_id,
            interval: None,
            url: "https://example.org/health".to_string(),
            method: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn interval(mut self, seconds: i64) -> Self {
        self.interval = Some(seconds);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn build(self) -> Value {
        let mut target = json!({ "url": self.url });
        if let Some(method) = self.method {
            target["method"] = json!(method);
        }

        let mut probe = json!({
            "name": self.name,
            "projectId": self.project_id,
            "target": target
        });
        if let Some(description) = self.description {
            probe["description"] = json!(description);
        }
        if let Some(interval) = self.interval {
            probe["interval"] = json!(interval);
        }
        probe
    }
}
