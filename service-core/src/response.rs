//! The uniform JSON envelope returned by every business endpoint.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            meta: None,
        }
    }

    pub fn page(message: impl Into<String>, data: T, meta: PageMeta) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            meta: Some(meta),
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope without a `data` member.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            meta: None,
        }
    }
}

/// Pagination block of the list envelope. `from`/`to` are 1-based item
/// indexes and are null when the page is empty.
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub last_page: i64,
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl PageMeta {
    pub fn compute(current_page: i64, per_page: i64, total: i64, items_on_page: i64) -> Self {
        let last_page = ((total as f64 / per_page as f64).ceil() as i64).max(1);
        let (from, to) = if items_on_page > 0 {
            let from = (current_page - 1).saturating_mul(per_page).saturating_add(1);
            (Some(from), Some(from.saturating_add(items_on_page - 1)))
        } else {
            (None, None)
        };
        Self {
            current_page,
            per_page,
            total,
            last_page,
            from,
            to,
        }
    }
}
