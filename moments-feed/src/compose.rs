//! Share composition flow
//!
//! Each song has at most one moment. Opening the share dialog for a song
//! first asks the backend whether that moment exists, and the answer decides
//! what the dialog does:
//!
//! | Mode | Collects | Submits |
//! |---|---|---|
//! | `Create` | content, tags, energy, first-heard year/period | `POST /admin/moments` |
//! | `Append(existing)` | content, listen date, location | `POST /admin/moments/{id}/comments` |
//!
//! Until the check settles the mode is `Unknown` and submission is refused.
//! A failed check falls back to `Create`.

use crate::api::MomentsApi;
use crate::error::{ClientError, ClientResult};
use chrono::{Local, NaiveDate};
use moments_common::{EnergyLevel, MomentComment, MusicMoment, NewComment, NewMoment};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Message shown when a submission fails
pub const SUBMIT_FAILED_MESSAGE: &str = "分享失败，请重试";

/// Song the dialog was opened for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRef {
    pub id: String,
    pub title: Option<String>,
    pub artist_name: Option<String>,
}

impl SongRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            artist_name: None,
        }
    }
}

/// What a submission will do
#[derive(Debug, Clone, PartialEq)]
pub enum ComposeMode {
    /// Existence check not settled yet
    Unknown,
    /// First share of this song
    Create,
    /// Song already has a moment; submissions become comments on it
    Append(Box<MusicMoment>),
}

/// Editable fields of the dialog
///
/// Text inputs are kept raw and interpreted at submit time, the way the user
/// typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeForm {
    pub content: String,
    /// Selected tags, in selection order, without duplicates
    pub tags: Vec<String>,
    pub energy_level: EnergyLevel,
    pub first_heard_year: String,
    pub first_heard_period: String,
    /// `YYYY-MM-DD`; blank means today
    pub listen_date: String,
    pub location: String,
}

impl ComposeForm {
    /// Select or deselect a tag from the known vocabulary
    pub fn toggle_tag(&mut self, tag: &str) {
        let tag = tag.trim();
        if tag.is_empty() {
            return;
        }
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag.to_string());
        }
    }

    /// Add free-form tags from comma-separated input
    pub fn add_custom_tags(&mut self, input: &str) {
        for tag in input.split([',', '，']).map(str::trim) {
            if !tag.is_empty() && !self.tags.iter().any(|t| t == tag) {
                self.tags.push(tag.to_string());
            }
        }
    }

    /// Slider input, clamped to the energy scale
    pub fn set_energy_level(&mut self, level: i32) {
        self.energy_level = EnergyLevel::clamped(level);
    }

    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    fn new_moment(&self, song_id: &str) -> NewMoment {
        let year = self.first_heard_year.trim();
        let first_heard_year = if year.is_empty() {
            None
        } else {
            match year.parse::<i32>() {
                Ok(y) => Some(y),
                Err(_) => {
                    warn!(input = year, "Ignoring unparsable first-heard year");
                    None
                }
            }
        };

        NewMoment {
            song_id: song_id.to_string(),
            content: self.content.trim().to_string(),
            tags: self.tags.clone(),
            energy_level: self.energy_level.value(),
            first_heard_year,
            first_heard_period: non_blank(&self.first_heard_period),
        }
    }

    fn new_comment(&self, today: NaiveDate) -> Result<NewComment, ComposeError> {
        let date = self.listen_date.trim();
        let listen_date = if date.is_empty() {
            today
        } else {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| ComposeError::InvalidListenDate(date.to_string()))?
        };

        Ok(NewComment {
            content: self.content.trim().to_string(),
            listen_date: Some(listen_date),
            location: non_blank(&self.location),
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq)]
pub enum ShareOutcome {
    /// New moment created; carries the server's echo when present
    Created(Option<MusicMoment>),
    /// Comment appended to an existing moment
    Appended {
        moment_id: String,
        comment: Option<MomentComment>,
    },
}

/// Reasons a submission did not go through
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Content is required")]
    EmptyContent,

    #[error("Still checking whether this song was shared before")]
    ModeUnresolved,

    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("Invalid listen date: {0} (expected YYYY-MM-DD)")]
    InvalidListenDate(String),

    #[error("{}", SUBMIT_FAILED_MESSAGE)]
    Submit(#[source] ClientError),
}

/// Share dialog for one song
pub struct ShareDialog<A: MomentsApi + ?Sized> {
    api: Arc<A>,
    song: SongRef,
    mode: ComposeMode,
    form: ComposeForm,
    known_tags: Vec<String>,
    open: bool,
    submitting: bool,
}

impl<A: MomentsApi + ?Sized> ShareDialog<A> {
    pub fn new(api: Arc<A>, song: SongRef) -> Self {
        Self {
            api,
            song,
            mode: ComposeMode::Unknown,
            form: ComposeForm::default(),
            known_tags: Vec::new(),
            open: false,
            submitting: false,
        }
    }

    /// Open the dialog and settle its mode
    ///
    /// Runs the existence check and the tag vocabulary fetch concurrently.
    pub async fn open(&mut self) -> &ComposeMode {
        self.open = true;
        self.mode = ComposeMode::Unknown;

        let (existing, tags) = tokio::join!(
            self.api.song_moment(&self.song.id),
            self.api.filter_tags()
        );

        self.mode = match existing {
            Ok(response) => match response.into_success_data() {
                Some(moment) => {
                    debug!(song_id = %self.song.id, moment_id = %moment.id, "Song already shared, appending");
                    ComposeMode::Append(Box::new(moment))
                }
                None => {
                    debug!(song_id = %self.song.id, "First share of song");
                    ComposeMode::Create
                }
            },
            Err(e) => {
                warn!(song_id = %self.song.id, error = %e, "Existing moment check failed, assuming first share");
                ComposeMode::Create
            }
        };

        match tags {
            Ok(response) => self.known_tags = response.into_success_data().unwrap_or_default(),
            Err(e) => warn!(error = %e, "Failed to load known tags"),
        }

        &self.mode
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn song(&self) -> &SongRef {
        &self.song
    }

    pub fn mode(&self) -> &ComposeMode {
        &self.mode
    }

    pub fn form(&self) -> &ComposeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ComposeForm {
        &mut self.form
    }

    /// Tags already used on other moments, offered for selection
    pub fn known_tags(&self) -> &[String] {
        &self.known_tags
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Dialog heading for the current mode
    pub fn title(&self) -> &'static str {
        match self.mode {
            ComposeMode::Append(_) => "添加新的聆听记录",
            _ => "分享音乐时刻",
        }
    }

    /// Read-only original text shown while appending
    pub fn original_content(&self) -> Option<&str> {
        match &self.mode {
            ComposeMode::Append(moment) => Some(&moment.content),
            _ => None,
        }
    }

    /// Whether the submit button is enabled
    pub fn can_submit(&self) -> bool {
        !matches!(self.mode, ComposeMode::Unknown) && self.form.has_content() && !self.submitting
    }

    /// Submit using today's local date for a blank listen date
    pub async fn submit(&mut self) -> Result<ShareOutcome, ComposeError> {
        self.submit_on(Local::now().date_naive()).await
    }

    /// Submit the form
    ///
    /// On success the form is reset and the dialog closes. On failure the
    /// form is left as entered so the user can retry. Dropping the returned
    /// future mid-request also releases the in-flight flag.
    pub async fn submit_on(&mut self, today: NaiveDate) -> Result<ShareOutcome, ComposeError> {
        let pending = self.begin_submit(today)?;
        let result = {
            let _guard = SubmittingGuard(&mut self.submitting);
            pending.send(self.api.as_ref()).await
        };
        self.finish_submit(result)
    }

    /// Validate the form and mark a submission as in flight
    ///
    /// # Errors
    /// Refuses while another submission is pending, while the mode is
    /// unresolved, for blank content and for a malformed listen date.
    pub fn begin_submit(&mut self, today: NaiveDate) -> Result<PendingSubmit, ComposeError> {
        if self.submitting {
            return Err(ComposeError::AlreadySubmitting);
        }
        if !self.form.has_content() {
            return Err(ComposeError::EmptyContent);
        }

        let pending = match &self.mode {
            ComposeMode::Unknown => return Err(ComposeError::ModeUnresolved),
            ComposeMode::Create => PendingSubmit::Create(self.form.new_moment(&self.song.id)),
            ComposeMode::Append(existing) => PendingSubmit::Append {
                moment_id: existing.id.clone(),
                comment: self.form.new_comment(today)?,
            },
        };
        self.submitting = true;
        debug!(song_id = %self.song.id, "Share submission started");
        Ok(pending)
    }

    /// Apply the result of a [`PendingSubmit`] and clear the in-flight flag
    pub fn finish_submit(
        &mut self,
        result: ClientResult<ShareOutcome>,
    ) -> Result<ShareOutcome, ComposeError> {
        self.submitting = false;

        match result {
            Ok(outcome) => {
                info!(song_id = %self.song.id, "Share submitted");
                self.form = ComposeForm::default();
                self.open = false;
                Ok(outcome)
            }
            Err(e) => {
                error!(song_id = %self.song.id, error = %e, "Failed to share moment");
                Err(ComposeError::Submit(e))
            }
        }
    }
}

/// Request a submission will make
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingSubmit {
    Create(NewMoment),
    Append {
        moment_id: String,
        comment: NewComment,
    },
}

impl PendingSubmit {
    /// Issue the request
    pub async fn send<A: MomentsApi + ?Sized>(self, api: &A) -> ClientResult<ShareOutcome> {
        match self {
            PendingSubmit::Create(body) => api
                .create_moment(&body)
                .await
                .map(|response| ShareOutcome::Created(response.data)),
            PendingSubmit::Append { moment_id, comment } => api
                .add_comment(&moment_id, &comment)
                .await
                .map(|response| ShareOutcome::Appended {
                    moment_id,
                    comment: response.data,
                }),
        }
    }
}

/// Clears the in-flight flag when the request future ends or is dropped
struct SubmittingGuard<'a>(&'a mut bool);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
