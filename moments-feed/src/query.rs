//! Query parameters for `GET /moments`
//!
//! Only defined fields are serialized. Multi-valued dimensions travel as a
//! single comma-joined value, which is what the backend splits on.

use std::fmt;

/// Parameters of one list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MomentQuery {
    pub page: u32,
    pub limit: u32,
    pub tags: Option<String>,
    pub energy_level: Option<i32>,
    pub year: Option<String>,
    pub period: Option<String>,
}

impl MomentQuery {
    /// Plain page request without filters
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Default::default()
        }
    }

    /// Ordered key/value pairs, absent keys omitted
    ///
    /// Order is `tags, page, limit, energyLevel, year, period`.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6);
        if let Some(tags) = &self.tags {
            pairs.push(("tags", tags.clone()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        if let Some(level) = self.energy_level {
            pairs.push(("energyLevel", level.to_string()));
        }
        if let Some(year) = &self.year {
            pairs.push(("year", year.clone()));
        }
        if let Some(period) = &self.period {
            pairs.push(("period", period.clone()));
        }
        pairs
    }
}

impl fmt::Display for MomentQuery {
    /// Human-readable (unencoded) query string, for logs and tests
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .to_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        f.write_str(&joined)
    }
}

/// Comma-join a dimension, `None` when it is empty
pub fn join_values<T: ToString>(values: &[T]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(
            values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}
