//! Service layer - business logic between handlers and the store

pub mod entities;
pub mod listing;

pub use entities::EntityService;
pub use listing::{ListPage, ListService};
