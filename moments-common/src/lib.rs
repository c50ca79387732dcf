//! # Moments Common Library
//!
//! Shared code for the music moments feed client:
//! - Moment and comment models as served by the REST backend
//! - Response envelopes and list normalization
//! - Energy level scale
//! - Configuration loading
//! - Error types

pub mod config;
pub mod energy;
pub mod envelope;
pub mod error;
pub mod models;

pub use energy::EnergyLevel;
pub use envelope::{ApiResponse, FeedPage, MomentListEnvelope};
pub use error::{Error, Result};
pub use models::{LikeResult, MomentComment, MomentUpdate, MusicMoment, NewComment, NewMoment, SongSummary};
