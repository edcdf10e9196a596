pub mod assertions;
pub mod builders;

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use symon::{api::create_router, AppState, Config};
use tower::ServiceExt as _;

pub use assertions::*;
pub use builders::*;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        Self::new_with_config(|_| {}).await
    }

    pub async fn new_with_config(configure: impl FnOnce(&mut Config)) -> anyhow::Result<Self> {
        symon::logging::init_simple_logging();

        let mut config = Config::default();
        configure(&mut config);
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid test config: {e}"))?;

        let state = AppState::new(config);
        let router = create_router(state.clone());
        Ok(Self { router, state })
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        self.request_with_extra_headers(method, path_and_query, body, &[])
            .await
    }

    pub async fn request_with_extra_headers(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let mut request = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("host", "example.org")
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .body(match body {
                Some(bytes) => Body::from(bytes),
                None => Body::empty(),
            })
            .context("build request")?;

        for (name, value) in extra_headers {
            request.headers_mut().insert(
                name.parse::<HeaderName>().context("parse header name")?,
                value.parse::<HeaderValue>().context("parse header value")?,
            );
        }

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }

    /// GET and decode a JSON response body.
    pub async fn get_json(&self, path_and_query: &str) -> anyhow::Result<(StatusCode, Value)> {
        let (status, _headers, body) = self.request(Method::GET, path_and_query, None).await?;
        let value = serde_json::from_slice(&body)
            .with_context(|| format!("decode JSON from GET {path_and_query}"))?;
        Ok((status, value))
    }

    /// POST `payload` and return the created record, asserting 201.
    pub async fn create(&self, collection: &str, payload: &Value) -> anyhow::Result<Value> {
        let path = format!("/v1/{collection}");
        let (status, _headers, body) = self
            .request(Method::POST, &path, Some(to_json_body(payload)?))
            .await?;
        let created: Value = serde_json::from_slice(&body).context("decode created record")?;
        assert_status(status, StatusCode::CREATED, &format!("create {collection}: {created}"));
        Ok(created)
    }

    /// GET a collection listing with the given query parameters, form-encoded.
    pub async fn list(&self, collection: &str, params: &[(&str, &str)]) -> anyhow::Result<Value> {
        let (status, page) = self.get_json(&list_url(collection, params)).await?;
        assert_status(status, StatusCode::OK, &format!("list {collection}: {page}"));
        Ok(page)
    }
}

pub fn list_url(collection: &str, params: &[(&str, &str)]) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    if query.is_empty() {
        format!("/v1/{collection}")
    } else {
        format!("/v1/{collection}?{query}")
    }
}
