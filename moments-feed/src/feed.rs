//! Feed-loading cycle
//!
//! Every change of filter selection or page starts a new cycle:
//!
//! ```text
//!            begin()                      finish(Ok, array data)
//!   * ───────────────▶ Loading ─────────────────────────────────▶ Loaded
//!                        │  │    finish(Ok, success=false / no array)
//!                        │  └──────────────────────────────────▶ Empty
//!                        │       finish(Err)
//!                        └─────────────────────────────────────▶ Error(msg)
//! ```
//!
//! Each cycle is stamped with a generation number. A result whose generation
//! is older than the most recently started cycle is discarded, so a slow
//! response for an old filter selection can never overwrite the state of a
//! newer one. In-flight requests are not aborted.
//!
//! Retry is user-driven: [`FeedLoader::retry`] re-runs the last query.

use crate::api::MomentsApi;
use crate::error::{ClientError, ClientResult};
use crate::filters::{FilterState, PAGE_SIZE};
use crate::pagination::Pager;
use crate::query::MomentQuery;
use moments_common::{ApiResponse, FeedPage, LikeResult, MomentListEnvelope, MusicMoment};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Message shown when a failure carries no text of its own
pub const FALLBACK_ERROR_MESSAGE: &str = "加载失败";

/// Visible state of the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    Loading,
    Error(String),
    /// Loaded, nothing to show
    Empty,
    /// Loaded with at least one moment
    Loaded,
}

/// Snapshot of everything the feed view renders
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    pub status: FeedStatus,
    pub moments: Vec<MusicMoment>,
    pub current_page: u64,
    pub total_pages: u64,
    /// Generation of the most recently started cycle
    pub generation: u64,
    /// Query of the most recently started cycle, reused by retry
    pub last_query: Option<MomentQuery>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            status: FeedStatus::Loading,
            moments: Vec::new(),
            current_page: 1,
            total_pages: 1,
            generation: 0,
            last_query: None,
        }
    }
}

impl FeedState {
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            FeedStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn pager(&self) -> Pager {
        Pager::new(self.current_page, self.total_pages)
    }
}

/// Handle for one started cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleTicket {
    pub generation: u64,
    pub query: MomentQuery,
}

/// What happened to a finished cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Result was adopted; carries the resulting status
    Applied(FeedStatus),
    /// A newer cycle started meanwhile; result dropped
    Stale,
}

/// Drives feed cycles against a [`MomentsApi`]
///
/// Cheap to clone; clones share state, so cycles may be started from
/// spawned tasks.
pub struct FeedLoader<A: MomentsApi + ?Sized> {
    api: Arc<A>,
    state: Arc<RwLock<FeedState>>,
    page_size: u64,
}

impl<A: MomentsApi + ?Sized> Clone for FeedLoader<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
            page_size: self.page_size,
        }
    }
}

impl<A: MomentsApi + ?Sized> FeedLoader<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(FeedState::default())),
            page_size: u64::from(PAGE_SIZE),
        }
    }

    pub async fn snapshot(&self) -> FeedState {
        self.state.read().await.clone()
    }

    /// Enter Loading for `query` and stamp a new generation
    pub async fn begin(&self, query: MomentQuery) -> CycleTicket {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.status = FeedStatus::Loading;
        state.current_page = u64::from(query.page.max(1));
        state.last_query = Some(query.clone());

        debug!(generation = state.generation, query = %query, "Feed cycle started");
        CycleTicket {
            generation: state.generation,
            query,
        }
    }

    /// Apply a list result unless a newer cycle has started
    pub async fn finish(
        &self,
        ticket: &CycleTicket,
        result: ClientResult<MomentListEnvelope>,
    ) -> CycleOutcome {
        let mut state = self.state.write().await;
        if ticket.generation != state.generation {
            debug!(
                stale = ticket.generation,
                current = state.generation,
                "Discarding superseded feed result"
            );
            return CycleOutcome::Stale;
        }

        let page = result
            .and_then(|envelope| envelope.into_page(self.page_size).map_err(ClientError::from));
        match page {
            Ok(FeedPage {
                moments,
                total_pages,
            }) => {
                state.status = if moments.is_empty() {
                    FeedStatus::Empty
                } else {
                    FeedStatus::Loaded
                };
                debug!(
                    generation = ticket.generation,
                    count = moments.len(),
                    total_pages,
                    "Feed loaded"
                );
                state.moments = moments;
                state.total_pages = total_pages;
            }
            Err(e) => {
                error!(generation = ticket.generation, error = %e, "Failed to load moments");
                let message = e.to_string();
                state.status = FeedStatus::Error(if message.trim().is_empty() {
                    FALLBACK_ERROR_MESSAGE.to_string()
                } else {
                    message
                });
                state.moments.clear();
                state.total_pages = 1;
            }
        }

        CycleOutcome::Applied(state.status.clone())
    }

    /// Run one full cycle for `query`
    pub async fn load(&self, query: MomentQuery) -> CycleOutcome {
        let ticket = self.begin(query).await;
        let result = self.api.list_moments(&ticket.query).await;
        self.finish(&ticket, result).await
    }

    /// Run one full cycle for the filter bar's current state
    pub async fn load_filters(&self, filters: &FilterState) -> CycleOutcome {
        self.load(filters.to_query()).await
    }

    /// Re-run the last query; `None` if nothing was ever loaded
    pub async fn retry(&self) -> Option<CycleOutcome> {
        let last = self.state.read().await.last_query.clone();
        match last {
            Some(query) => {
                info!(query = %query, "Retrying feed load");
                Some(self.load(query).await)
            }
            None => {
                warn!("Retry requested before any feed load");
                None
            }
        }
    }

    /// Like a moment, then reload the current page to pick up the new count
    ///
    /// # Errors
    /// Returns the like failure; the feed is left untouched in that case.
    pub async fn like(&self, moment_id: &str) -> ClientResult<ApiResponse<LikeResult>> {
        let response = self.api.like_moment(moment_id).await.map_err(|e| {
            warn!(moment_id, error = %e, "Failed to like moment");
            e
        })?;

        if let Some(result) = &response.data {
            info!(moment_id = %result.moment_id, like_count = result.like_count, "Moment liked");
        }

        let query = self
            .state
            .read()
            .await
            .last_query
            .clone()
            .unwrap_or_else(|| MomentQuery::page(1, PAGE_SIZE));
        self.load(query).await;

        Ok(response)
    }
}
