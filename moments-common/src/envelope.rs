//! Response envelopes
//!
//! Every backend endpoint except `GET /moments/{id}` wraps its payload in
//! `{ "success": bool, "data": ... }`. The list endpoint additionally
//! reports `total` and/or `totalPages`, and older deployments have been seen
//! answering with a `data` that is not an array at all, so the list envelope
//! keeps `data` untyped until [`MomentListEnvelope::into_page`] normalizes it.

use crate::models::MusicMoment;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generic `{ success, data }` envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Payload only when the backend reported success
    pub fn into_success_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

/// Envelope of `GET /moments`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentListEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
}

/// One normalized page of the feed
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage {
    pub moments: Vec<MusicMoment>,
    pub total_pages: u64,
}

impl FeedPage {
    /// Page shown when the backend answered but had nothing usable
    pub fn empty() -> Self {
        Self {
            moments: Vec::new(),
            total_pages: 1,
        }
    }
}

impl MomentListEnvelope {
    /// Flatten the envelope into a list plus page count
    ///
    /// - `success == false`, missing `data` or non-array `data` → empty page,
    ///   one page total.
    /// - Array `data` → typed moments; page count from `totalPages`, else
    ///   `ceil(total / page_size)`, else 1.
    ///
    /// # Errors
    /// Returns the deserialization error if array elements are not moments.
    pub fn into_page(self, page_size: u64) -> Result<FeedPage, serde_json::Error> {
        if !self.success {
            return Ok(FeedPage::empty());
        }
        let items = match self.data {
            Some(Value::Array(items)) => items,
            _ => return Ok(FeedPage::empty()),
        };

        let moments: Vec<MusicMoment> = serde_json::from_value(Value::Array(items))?;
        let total_pages = resolve_total_pages(self.total_pages, self.total, page_size);

        Ok(FeedPage {
            moments,
            total_pages,
        })
    }
}

/// Page count from whatever the backend reported
pub fn resolve_total_pages(total_pages: Option<u64>, total: Option<u64>, page_size: u64) -> u64 {
    match (total_pages, total) {
        (Some(pages), _) => pages,
        (None, Some(total)) if page_size > 0 => total.div_ceil(page_size),
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn moment_json(id: &str) -> Value {
        json!({"id": id, "songId": format!("song-{}", id), "content": "c"})
    }

    #[test]
    fn test_success_with_array_adopts_data() {
        let env: MomentListEnvelope = serde_json::from_value(json!({
            "success": true,
            "data": [moment_json("a"), moment_json("b")],
            "total": 12,
            "totalPages": 2
        }))
        .unwrap();

        let page = env.into_page(10).unwrap();
        assert_eq!(page.moments.len(), 2);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_total_pages_falls_back_to_total() {
        let env: MomentListEnvelope = serde_json::from_value(json!({
            "success": true,
            "data": [moment_json("a")],
            "total": 21
        }))
        .unwrap();

        assert_eq!(env.into_page(10).unwrap().total_pages, 3);
    }

    #[test]
    fn test_total_pages_defaults_to_one() {
        let env: MomentListEnvelope = serde_json::from_value(json!({
            "success": true,
            "data": [moment_json("a")]
        }))
        .unwrap();

        assert_eq!(env.into_page(10).unwrap().total_pages, 1);
    }

    #[test]
    fn test_unsuccessful_envelope_is_empty_page() {
        let env: MomentListEnvelope = serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(env.into_page(10).unwrap(), FeedPage::empty());
    }

    #[test]
    fn test_non_array_data_is_empty_page() {
        let env: MomentListEnvelope = serde_json::from_value(json!({
            "success": true,
            "data": {"data": [moment_json("a")]},
            "total": 40
        }))
        .unwrap();

        assert_eq!(env.into_page(10).unwrap(), FeedPage::empty());
    }

    #[test]
    fn test_malformed_items_propagate_error() {
        let env: MomentListEnvelope = serde_json::from_value(json!({
            "success": true,
            "data": [{"content": "no id"}]
        }))
        .unwrap();

        assert!(env.into_page(10).is_err());
    }

    #[test]
    fn test_api_response_success_data() {
        let ok: ApiResponse<Vec<String>> =
            serde_json::from_value(json!({"success": true, "data": ["治愈"]})).unwrap();
        assert_eq!(ok.into_success_data(), Some(vec!["治愈".to_string()]));

        let failed: ApiResponse<Vec<String>> =
            serde_json::from_value(json!({"success": false, "data": ["x"]})).unwrap();
        assert_eq!(failed.into_success_data(), None);

        let null_data: ApiResponse<MusicMoment> =
            serde_json::from_value(json!({"success": true, "data": null})).unwrap();
        assert!(null_data.data.is_none());
    }

    #[test]
    fn test_resolve_total_pages_exact_boundary() {
        assert_eq!(resolve_total_pages(None, Some(20), 10), 2);
        assert_eq!(resolve_total_pages(None, Some(0), 10), 0);
        assert_eq!(resolve_total_pages(Some(7), Some(0), 10), 7);
    }
}
