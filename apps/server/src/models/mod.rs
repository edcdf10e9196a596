//! Domain models for the dashboard API

pub mod entity;
pub mod payloads;

pub use entity::Entity;
pub use payloads::{HttpMethod, NewOrganization, NewProbe, NewProject, NewRecord, ProbeTarget};
