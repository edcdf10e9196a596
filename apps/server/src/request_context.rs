//! Per-request context injected by middleware.

/// Inserted into request extensions by the request id middleware; handlers
/// can pull it out with `Extension<RequestContext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: String,
}
