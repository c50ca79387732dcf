//! Scripted in-memory backend

use async_trait::async_trait;
use moments_common::{
    ApiResponse, LikeResult, MomentComment, MomentListEnvelope, MomentUpdate, MusicMoment,
    NewComment, NewMoment,
};
use moments_feed::{ClientError, ClientResult, MomentQuery, MomentsApi};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// One recorded API call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(MomentQuery),
    Get(String),
    SongMoment(String),
    Like(String),
    Create(NewMoment),
    Update(String, MomentUpdate),
    Delete(String),
    AddComment(String, NewComment),
    DeleteComment(String, String),
    Tags,
    Years,
    Periods,
}

/// Scripted reply to a list request
pub struct ListReply {
    delay: Duration,
    /// `Err(action)` fails with a 500 status error
    result: Result<MomentListEnvelope, &'static str>,
}

/// In-memory `MomentsApi`
///
/// List replies are consumed in call order; once the script runs out every
/// list call answers with an empty successful page.
#[derive(Default)]
pub struct FakeApi {
    pub list_replies: Mutex<VecDeque<ListReply>>,
    pub existing: Mutex<Option<MusicMoment>>,
    /// Per-call stalls for `create_moment`, consumed in call order
    pub create_delays: Mutex<VecDeque<Duration>>,
    pub fail_song_moment: bool,
    pub fail_create: bool,
    pub fail_comment: bool,
    pub fail_like: bool,
    pub fail_tags: bool,
    pub tags: Vec<String>,
    pub years: Vec<i32>,
    pub periods: Vec<String>,
    pub calls: Mutex<Vec<Call>>,
}

fn server_error(action: &'static str) -> ClientError {
    ClientError::Status {
        action,
        status: StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a list reply
    pub fn push_list(&self, envelope: Value) -> &Self {
        self.push_list_delayed(envelope, Duration::ZERO)
    }

    pub fn push_list_delayed(&self, envelope: Value, delay: Duration) -> &Self {
        let envelope: MomentListEnvelope =
            serde_json::from_value(envelope).expect("list envelope fixture");
        self.list_replies.lock().unwrap().push_back(ListReply {
            delay,
            result: Ok(envelope),
        });
        self
    }

    /// Queue a failing list reply
    pub fn push_list_failure(&self) -> &Self {
        self.list_replies.lock().unwrap().push_back(ListReply {
            delay: Duration::ZERO,
            result: Err("fetch moments"),
        });
        self
    }

    /// Make the song already shared
    pub fn with_existing(self, moment: MusicMoment) -> Self {
        *self.existing.lock().unwrap() = Some(moment);
        self
    }

    /// Stall the next `create_moment` call for `delay`
    pub fn delay_next_create(&self, delay: Duration) -> &Self {
        self.create_delays.lock().unwrap().push_back(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_queries(&self) -> Vec<MomentQuery> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::List(q) => Some(q),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MomentsApi for FakeApi {
    async fn list_moments(&self, query: &MomentQuery) -> ClientResult<MomentListEnvelope> {
        self.record(Call::List(query.clone()));
        let reply = self.list_replies.lock().unwrap().pop_front();
        match reply {
            Some(reply) => {
                if !reply.delay.is_zero() {
                    tokio::time::sleep(reply.delay).await;
                }
                reply.result.map_err(server_error)
            }
            None => Ok(serde_json::from_value(json!({"success": true, "data": [], "total": 0}))
                .expect("empty envelope")),
        }
    }

    async fn get_moment(&self, id: &str) -> ClientResult<MusicMoment> {
        self.record(Call::Get(id.to_string()));
        self.existing
            .lock()
            .unwrap()
            .clone()
            .filter(|m| m.id == id)
            .ok_or(ClientError::Status {
                action: "fetch moment",
                status: StatusCode::NOT_FOUND,
            })
    }

    async fn song_moment(&self, song_id: &str) -> ClientResult<ApiResponse<MusicMoment>> {
        self.record(Call::SongMoment(song_id.to_string()));
        if self.fail_song_moment {
            return Err(server_error("fetch song moment"));
        }
        let existing = self.existing.lock().unwrap().clone();
        Ok(match existing {
            Some(moment) => ApiResponse::ok(moment),
            None => ApiResponse {
                success: false,
                data: None,
                message: Some("not found".to_string()),
            },
        })
    }

    async fn like_moment(&self, id: &str) -> ClientResult<ApiResponse<LikeResult>> {
        self.record(Call::Like(id.to_string()));
        if self.fail_like {
            return Err(server_error("like moment"));
        }
        Ok(ApiResponse::ok(LikeResult {
            moment_id: id.to_string(),
            like_count: 1,
        }))
    }

    async fn create_moment(&self, moment: &NewMoment) -> ClientResult<ApiResponse<MusicMoment>> {
        self.record(Call::Create(moment.clone()));
        let delay = self.create_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_create {
            return Err(server_error("create moment"));
        }
        Ok(ApiResponse::ok(MusicMoment {
            id: "created".to_string(),
            song_id: moment.song_id.clone(),
            content: moment.content.clone(),
            tags: moment.tags.clone(),
            energy_level: moment.energy_level,
            ..Default::default()
        }))
    }

    async fn update_moment(
        &self,
        id: &str,
        update: &MomentUpdate,
    ) -> ClientResult<ApiResponse<MusicMoment>> {
        self.record(Call::Update(id.to_string(), update.clone()));
        Ok(ApiResponse::ok(MusicMoment {
            id: id.to_string(),
            content: update.content.clone(),
            ..Default::default()
        }))
    }

    async fn delete_moment(&self, id: &str) -> ClientResult<ApiResponse<Value>> {
        self.record(Call::Delete(id.to_string()));
        Ok(ApiResponse::ok(Value::Null))
    }

    async fn add_comment(
        &self,
        moment_id: &str,
        comment: &NewComment,
    ) -> ClientResult<ApiResponse<MomentComment>> {
        self.record(Call::AddComment(moment_id.to_string(), comment.clone()));
        if self.fail_comment {
            return Err(server_error("add comment"));
        }
        Ok(ApiResponse::ok(MomentComment {
            id: "c-new".to_string(),
            moment_id: Some(moment_id.to_string()),
            content: comment.content.clone(),
            ..Default::default()
        }))
    }

    async fn delete_comment(
        &self,
        moment_id: &str,
        comment_id: &str,
    ) -> ClientResult<ApiResponse<Value>> {
        self.record(Call::DeleteComment(
            moment_id.to_string(),
            comment_id.to_string(),
        ));
        Ok(ApiResponse::ok(Value::Null))
    }

    async fn filter_tags(&self) -> ClientResult<ApiResponse<Vec<String>>> {
        self.record(Call::Tags);
        if self.fail_tags {
            return Err(server_error("fetch tags"));
        }
        Ok(ApiResponse::ok(self.tags.clone()))
    }

    async fn filter_years(&self) -> ClientResult<ApiResponse<Vec<i32>>> {
        self.record(Call::Years);
        Ok(ApiResponse::ok(self.years.clone()))
    }

    async fn filter_periods(&self) -> ClientResult<ApiResponse<Vec<String>>> {
        self.record(Call::Periods);
        Ok(ApiResponse::ok(self.periods.clone()))
    }
}

/// Moment fixture
pub fn moment(id: &str) -> MusicMoment {
    MusicMoment {
        id: id.to_string(),
        song_id: format!("song-{}", id),
        content: format!("content {}", id),
        ..Default::default()
    }
}

/// Moment fixture as the backend serializes it
pub fn moment_json(id: &str) -> Value {
    json!({
        "id": id,
        "songId": format!("song-{}", id),
        "content": format!("content {}", id),
        "tags": [],
        "energyLevel": 0,
        "likeCount": 0,
        "comments": []
    })
}
