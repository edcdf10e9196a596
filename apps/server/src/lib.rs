//! Symon server - REST API for the probe monitoring dashboard
//!
//! Serves organizations, projects and probes under `/v1`. Collection
//! listings accept the `fields`, `filter`, `search`, `sort`, `cursor` and
//! `limit` query parameters, compiled by [`symon_query`] into a find-many
//! descriptor and executed by an [`db::EntityStore`].

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod request_context;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
