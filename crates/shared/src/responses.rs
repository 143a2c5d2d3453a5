//! Response shapes returned by the story API.
//!
//! Full story documents are `storyloom_domain::Story`; nodes are
//! `storyloom_domain::StoryNode`. This module covers everything else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storyloom_domain::common::datetime::option_timestamp;
use storyloom_domain::{JobId, NodeId, StoryId, StoryStatus};

// =============================================================================
// Story list
// =============================================================================

/// One row of `GET /stories/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryListItem {
    pub id: StoryId,
    pub title: String,
    #[serde(default)]
    pub status: StoryStatus,
    #[serde(default)]
    pub node_count: u32,
    #[serde(default, with = "option_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "option_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryListResponse {
    pub stories: Vec<StoryListItem>,
    /// Absent on older servers; falls back to the length of `stories`
    #[serde(default)]
    pub total: Option<usize>,
}

impl StoryListResponse {
    pub fn total(&self) -> usize {
        self.total.unwrap_or(self.stories.len())
    }
}

/// The part of `PUT /stories/{id}` the client relies on: the confirmed title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedStoryResponse {
    pub title: String,
}

/// The part of `POST /stories/{id}/nodes` the client relies on.
///
/// Servers answer either with the created node (`id`) or with an
/// acknowledgement carrying `node_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedNodeResponse {
    #[serde(alias = "node_id")]
    pub id: NodeId,
}

// =============================================================================
// Generation jobs
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    /// Unknown status for forward compatibility
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }

    /// Whether polling should stop.
    ///
    /// An unrecognized status counts as finished: the client has no way of
    /// telling whether it will ever change.
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Pending | Self::Processing)
    }
}

/// Returned by `POST /stories/create` and `GET /jobs/{job_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryJobResponse {
    pub job_id: JobId,
    pub status: JobStatus,
    #[serde(default)]
    pub story_id: Option<StoryId>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, with = "option_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "option_timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
}
