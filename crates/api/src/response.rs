//! The JSON envelope every successful response uses.
//!
//! ```text
//! { "success": true, "message"?, "data"?, "count"?, "pagination"?, "summary"? }
//! ```
//!
//! Errors use the same `success`/`message` keys; see [`crate::error::AppError`].

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize, S: Serialize = ()> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<S>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            count: None,
            pagination: None,
            summary: None,
        }
    }
}

impl ApiResponse<()> {
    /// A success envelope with a message and no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            count: None,
            pagination: None,
            summary: None,
        }
    }
}

impl<T: Serialize, S: Serialize> ApiResponse<T, S> {
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_summary<S2: Serialize>(self, summary: S2) -> ApiResponse<T, S2> {
        ApiResponse {
            success: self.success,
            message: self.message,
            data: self.data,
            count: self.count,
            pagination: self.pagination,
            summary: Some(summary),
        }
    }
}

/// Page metadata for paginated lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_round_up() {
        assert_eq!(Pagination::new(1, 50, 0).pages, 0);
        assert_eq!(Pagination::new(1, 50, 50).pages, 1);
        assert_eq!(Pagination::new(2, 50, 51).pages, 2);
    }

    #[test]
    fn empty_fields_are_omitted() {
        let json = serde_json::to_value(ApiResponse::ok(vec![1, 2]).with_count(2)).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": [1, 2], "count": 2}));

        let json = serde_json::to_value(ApiResponse::message("Done")).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "message": "Done"}));
    }
}
