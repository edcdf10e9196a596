//! Collection handlers
//!
//! - `GET  /v1/{collection}` list with `fields`, `filter`, `search`, `sort`, `cursor`, `limit`
//! - `POST /v1/{collection}` create
//! - `GET  /v1/{collection}/:id` read

use axum::{
    extract::{Extension, Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use symon_query::QueryArgs;

use crate::{
    api::extractors::JsonBody, models::Entity, request_context::RequestContext,
    services::ListPage, state::AppState, Error, Result,
};

fn resolve(collection: &str) -> Result<Entity> {
    Entity::from_collection(collection).ok_or_else(|| Error::UnknownCollection(collection.into()))
}

pub async fn list(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<ListPage>> {
    let entity = resolve(&collection)?;
    let args = QueryArgs::from_query_str(query.as_deref().unwrap_or(""));
    let page = state.list_service.list(entity, &args).await?;
    Ok(Json(page))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(collection): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse> {
    let entity = resolve(&collection)?;
    let created = state.entity_service.create(entity, body).await?;
    tracing::debug!(request_id = %ctx.request_id, entity = %entity, "Create handled");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn read(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let entity = resolve(&collection)?;
    let id: i64 = id
        .parse()
        .map_err(|_| Error::Validation(format!("Invalid id '{id}'")))?;
    let record = state.entity_service.get(entity, id).await?;
    Ok(Json(record))
}
