//! moments-feed library - Music moments feed client
//!
//! HTTP client for the moments REST backend plus the state machines behind
//! the feed page: filter selection, the feed-loading cycle, filter option
//! vocabularies and the share composition flow. Views render that state as
//! text.

pub mod api;
pub mod cli;
pub mod client;
pub mod compose;
pub mod error;
pub mod feed;
pub mod filters;
pub mod options;
pub mod pagination;
pub mod query;
pub mod view;

pub use api::MomentsApi;
pub use client::{Credential, MomentsClient};
pub use error::{ClientError, ClientResult};
pub use feed::{FeedLoader, FeedState, FeedStatus};
pub use filters::{FilterState, PAGE_SIZE};
pub use query::MomentQuery;
