//! Raw query arguments as received from the HTTP layer.

/// The six optional query-string parameters shared by every list endpoint.
///
/// Values are kept exactly as decoded from the URL; all interpretation
/// happens in [`crate::translate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    /// Comma-separated output field names.
    pub fields: Option<String>,
    /// `and`-joined `<field> <operator> <value>` clauses.
    pub filter: Option<String>,
    /// Free-text token matched against the searchable fields.
    pub search: Option<String>,
    /// `<field>[ asc|desc]`, comma-separated.
    pub sort: Option<String>,
    /// Integer id of the row to resume after.
    pub cursor: Option<String>,
    /// Integer page size.
    pub limit: Option<String>,
}

impl QueryArgs {
    /// Parse from a raw (still percent-encoded) query string.
    ///
    /// Unrelated parameters are ignored. When a parameter repeats, the last
    /// occurrence wins.
    pub fn from_query_str(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut args = Self::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "fields" => &mut args.fields,
                "filter" => &mut args.filter,
                "search" => &mut args.search,
                "sort" => &mut args.sort,
                "cursor" => &mut args.cursor,
                "limit" => &mut args.limit,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }

        args
    }

    /// True when none of the parameters were supplied.
    pub fn is_empty(&self) -> bool {
        self.fields.is_none()
            && self.filter.is_none()
            && self.search.is_none()
            && self.sort.is_none()
            && self.cursor.is_none()
            && self.limit.is_none()
    }
}
