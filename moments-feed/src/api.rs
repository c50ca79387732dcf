//! Backend operations used by the feed, option loader and share dialog
//!
//! [`MomentsClient`](crate::client::MomentsClient) implements this over HTTP.
//! The state machines in this crate are generic over the trait so they can
//! run against an in-memory backend in tests.

use crate::error::ClientResult;
use crate::query::MomentQuery;
use async_trait::async_trait;
use moments_common::{
    ApiResponse, LikeResult, MomentComment, MomentListEnvelope, MomentUpdate, MusicMoment,
    NewComment, NewMoment,
};
use serde_json::Value;

#[async_trait]
pub trait MomentsApi: Send + Sync {
    /// `GET /moments`
    async fn list_moments(&self, query: &MomentQuery) -> ClientResult<MomentListEnvelope>;

    /// `GET /moments/{id}` (unwrapped document)
    async fn get_moment(&self, id: &str) -> ClientResult<MusicMoment>;

    /// `GET /songs/{songId}/moment`
    async fn song_moment(&self, song_id: &str) -> ClientResult<ApiResponse<MusicMoment>>;

    /// `POST /moments/{id}/like`
    async fn like_moment(&self, id: &str) -> ClientResult<ApiResponse<LikeResult>>;

    /// `POST /admin/moments`
    async fn create_moment(&self, moment: &NewMoment) -> ClientResult<ApiResponse<MusicMoment>>;

    /// `PUT /admin/moments/{id}`
    async fn update_moment(
        &self,
        id: &str,
        update: &MomentUpdate,
    ) -> ClientResult<ApiResponse<MusicMoment>>;

    /// `DELETE /admin/moments/{id}`
    async fn delete_moment(&self, id: &str) -> ClientResult<ApiResponse<Value>>;

    /// `POST /admin/moments/{id}/comments`
    async fn add_comment(
        &self,
        moment_id: &str,
        comment: &NewComment,
    ) -> ClientResult<ApiResponse<MomentComment>>;

    /// `DELETE /admin/moments/{id}/comments/{commentId}`
    async fn delete_comment(
        &self,
        moment_id: &str,
        comment_id: &str,
    ) -> ClientResult<ApiResponse<Value>>;

    /// `GET /moments/filters/tags`
    async fn filter_tags(&self) -> ClientResult<ApiResponse<Vec<String>>>;

    /// `GET /moments/filters/years`
    async fn filter_years(&self) -> ClientResult<ApiResponse<Vec<i32>>>;

    /// `GET /moments/filters/periods`
    async fn filter_periods(&self) -> ClientResult<ApiResponse<Vec<String>>>;
}
