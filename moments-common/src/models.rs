//! Moment and comment models
//!
//! Mirrors the JSON documents served by the moments backend. All keys are
//! camelCase on the wire. Read models are lenient (missing or `null` fields
//! fall back to defaults) because the backend fills some columns lazily;
//! write payloads omit absent optionals entirely.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

// ========================================
// Read Models
// ========================================

/// Denormalized song summary embedded in every moment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
}

/// A user-authored commentary attached to exactly one song
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicMoment {
    pub id: String,
    pub song_id: String,
    #[serde(default)]
    pub song: Option<SongSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Tags in the order they were entered
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// -5 (restoring) ..= +5 (consuming), 0 is neutral
    #[serde(default, deserialize_with = "null_as_default")]
    pub energy_level: i32,
    #[serde(default)]
    pub first_heard_year: Option<i32>,
    #[serde(default)]
    pub first_heard_period: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub like_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<MomentComment>,
}

impl MusicMoment {
    /// Calendar day the moment was created, if the timestamp parses
    pub fn created_date(&self) -> Option<NaiveDate> {
        self.created_at.as_deref().and_then(parse_day)
    }

    /// Song title from the embedded summary
    pub fn song_title(&self) -> Option<&str> {
        self.song.as_ref().and_then(|s| s.title.as_deref())
    }

    /// Artist name from the embedded summary
    pub fn artist_name(&self) -> Option<&str> {
        self.song.as_ref().and_then(|s| s.artist_name.as_deref())
    }
}

/// A follow-up listening note nested under a moment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentComment {
    pub id: String,
    #[serde(default)]
    pub moment_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub listen_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl MomentComment {
    /// Listen date as a calendar day, if it parses
    pub fn listen_day(&self) -> Option<NaiveDate> {
        self.listen_date.as_deref().and_then(parse_day)
    }
}

/// Like counter returned by `POST /moments/{id}/like`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResult {
    pub moment_id: String,
    pub like_count: u64,
}

// ========================================
// Write Payloads
// ========================================

/// Body of `POST /admin/moments`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMoment {
    pub song_id: String,
    pub content: String,
    pub tags: Vec<String>,
    pub energy_level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_heard_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_heard_period: Option<String>,
}

/// Body of `PUT /admin/moments/{id}`
///
/// The backend replaces every editable column, so an update always carries
/// the full editable field set. Start from [`MomentUpdate::from`] an existing
/// moment and change what needs changing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentUpdate {
    pub song_id: String,
    pub content: String,
    pub tags: Vec<String>,
    pub energy_level: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_heard_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_heard_period: Option<String>,
}

impl From<&MusicMoment> for MomentUpdate {
    fn from(moment: &MusicMoment) -> Self {
        Self {
            song_id: moment.song_id.clone(),
            content: moment.content.clone(),
            tags: moment.tags.clone(),
            energy_level: moment.energy_level,
            first_heard_year: moment.first_heard_year,
            first_heard_period: moment.first_heard_period.clone(),
        }
    }
}

/// Body of `POST /admin/moments/{id}/comments`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    /// Serialized as `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listen_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

// ========================================
// Helpers
// ========================================

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse the backend's timestamp variants down to a calendar day
///
/// Accepts RFC 3339, naive ISO-8601 (`2024-03-01T08:30:00.123456`, as
/// written by the backend) and plain dates.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

// ========================================
// Tests
// ========================================
