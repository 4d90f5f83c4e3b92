//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Page-based pagination (`?page=&limit=`), 1-indexed.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    /// Resolve to `(page, limit, offset)`. Page is at least 1; limit falls
    /// back to `default` and is clamped to `1..=max`.
    pub fn resolve(&self, default: i64, max: i64) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(default).clamp(1, max);
        (page, limit, (page - 1) * limit)
    }
}

/// Treat `?key=` the same as an absent key.
pub fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
