//! Entity collection routes, mounted under `/v1`
//!
//! Trailing slashes are accepted by registering both forms.

use axum::{routing::get, Router};

use crate::api::handlers::entities;
use crate::state::AppState;

pub fn entity_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:collection",
            get(entities::list).post(entities::create),
        )
        .route(
            "/:collection/",
            get(entities::list).post(entities::create),
        )
        .route("/:collection/:id", get(entities::read))
        .route("/:collection/:id/", get(entities::read))
}
