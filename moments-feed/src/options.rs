//! Filter option vocabularies
//!
//! The filter bar and the share dialog offer the tags, years and periods that
//! already occur on moments. The three lists come from dedicated endpoints,
//! are fetched concurrently once per mount and are never narrowed by the
//! current selection.

use crate::api::MomentsApi;
use crate::error::ClientResult;
use moments_common::ApiResponse;
use tracing::{debug, warn};

/// Known values for each filter dimension
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub tags: Vec<String>,
    pub years: Vec<i32>,
    pub periods: Vec<String>,
}

impl FilterOptions {
    /// Fetch all three vocabularies concurrently
    ///
    /// Each request settles on its own: a failed or unsuccessful vocabulary
    /// is logged and left empty without affecting the other two.
    pub async fn load<A: MomentsApi + ?Sized>(api: &A) -> Self {
        let (tags, years, periods) =
            tokio::join!(api.filter_tags(), api.filter_years(), api.filter_periods());

        let options = Self {
            tags: adopt("tags", tags),
            years: adopt("years", years),
            periods: adopt("periods", periods),
        };
        debug!(
            tags = options.tags.len(),
            years = options.years.len(),
            periods = options.periods.len(),
            "Filter options loaded"
        );
        options
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.years.is_empty() && self.periods.is_empty()
    }
}

fn adopt<T>(dimension: &'static str, result: ClientResult<ApiResponse<Vec<T>>>) -> Vec<T> {
    match result {
        Ok(response) if response.success => response.data.unwrap_or_default(),
        Ok(_) => {
            warn!(dimension, "Filter option endpoint reported failure");
            Vec::new()
        }
        Err(e) => {
            warn!(dimension, error = %e, "Failed to load filter options");
            Vec::new()
        }
    }
}
