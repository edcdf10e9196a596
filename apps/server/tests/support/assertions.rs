use anyhow::Context as _;
use axum::http::StatusCode;
use serde_json::Value;

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(
        actual, expected,
        "{context}: expected status {expected}, got {actual}"
    );
}

/// The `data` array of a list page
pub fn page_data(page: &Value) -> anyhow::Result<&Vec<Value>> {
    page.get("data")
        .and_then(|v| v.as_array())
        .context("page.data is array")
}

/// Ids of the records on a list page, in order
pub fn page_ids(page: &Value) -> anyhow::Result<Vec<i64>> {
    page_data(page)?
        .iter()
        .map(|r| r.get("id").and_then(|v| v.as_i64()).context("record.id is integer"))
        .collect()
}

/// Values of a string field on a list page, in order
pub fn page_strings(page: &Value, field: &str) -> anyhow::Result<Vec<String>> {
    page_data(page)?
        .iter()
        .map(|r| {
            r.get(field)
                .and_then(|v| v.as_str())
                .map(String::from)
                .with_context(|| format!("record.{field} is string"))
        })
        .collect()
}

/// Assert an error body has the expected status and code
pub fn assert_error(body: &Value, status: StatusCode, code: &str) {
    assert_eq!(
        body["error"]["status"].as_u64(),
        Some(u64::from(status.as_u16())),
        "error status in {body}"
    );
    assert_eq!(body["error"]["code"].as_str(), Some(code), "error code in {body}");
}
