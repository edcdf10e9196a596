//! Entity kinds served by the API
//!
//! Each entity declares its collection path, the top-level fields a record
//! may carry (used to reject unknown names in `fields`/`filter`/`sort`), and
//! the fields free-text `search` is matched against.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Organization,
    Project,
    Probe,
}

impl Entity {
    pub const ALL: [Entity; 3] = [Entity::Organization, Entity::Project, Entity::Probe];

    /// URL path segment, e.g. `/v1/probes`.
    pub fn collection(self) -> &'static str {
        match self {
            Entity::Organization => "organizations",
            Entity::Project => "projects",
            Entity::Probe => "probes",
        }
    }

    pub fn from_collection(collection: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.collection() == collection)
    }

    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Entity::Organization => &["id", "name", "description", "createdAt", "updatedAt"],
            Entity::Project => &["id", "name", "organizationId", "createdAt", "updatedAt"],
            Entity::Probe => &[
                "id",
                "name",
                "description",
                "projectId",
                "interval",
                "target",
                "createdAt",
                "updatedAt",
            ],
        }
    }

    pub fn searchable_fields(self) -> &'static [&'static str] {
        match self {
            Entity::Organization => &["name", "description"],
            Entity::Project => &["name"],
            Entity::Probe => &["name", "description"],
        }
    }

    pub fn has_field(self, field: &str) -> bool {
        self.fields().contains(&field)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}
