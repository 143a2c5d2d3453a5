//! Story Service - Application service for the story API
//!
//! Every endpoint of the story API goes through this service. It returns
//! typed results and leaves state handling to the sessions that call it.

use std::time::Duration;

use storyloom_domain::{JobId, NodeId, Story, StoryId, StoryNode};
use storyloom_shared::{
    routes, CreateNodeRequest, CreateStoryRequest, CreatedNodeResponse, JobStatus, StoryJobResponse,
    StoryListResponse, UpdateNodeRequest, UpdateStoryRequest, UpdatedStoryResponse,
};

use crate::application::api::Api;
use crate::ports::outbound::ApiError;

/// Story service for listing, loading and editing stories
#[derive(Clone)]
pub struct StoryService {
    api: Api,
}

impl StoryService {
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// List all stories visible to this client
    pub async fn list_stories(&self) -> Result<StoryListResponse, ApiError> {
        let list: StoryListResponse = self.api.get(routes::STORIES).await?;
        tracing::debug!(count = list.stories.len(), total = list.total(), "Listed stories");
        Ok(list)
    }

    /// Fetch a complete story document
    pub async fn get_story(&self, story_id: &StoryId) -> Result<Story, ApiError> {
        let story: Story = self.api.get(&routes::story(story_id)).await?;
        tracing::debug!(
            story_id = %story_id,
            nodes = story.node_count(),
            "Fetched story"
        );
        Ok(story)
    }

    /// Update a story's title; returns the title the server stored
    pub async fn update_story(
        &self,
        story_id: &StoryId,
        title: &str,
    ) -> Result<UpdatedStoryResponse, ApiError> {
        let body = UpdateStoryRequest {
            title: title.to_string(),
        };
        self.api.put(&routes::story(story_id), &body).await
    }

    pub async fn delete_story(&self, story_id: &StoryId) -> Result<(), ApiError> {
        self.api.delete(&routes::story(story_id)).await?;
        tracing::info!(story_id = %story_id, "Deleted story");
        Ok(())
    }

    /// Ask the server to generate a new story from a theme
    ///
    /// # Returns
    /// The generation job; poll it with [`StoryService::get_job`].
    pub async fn create_story(&self, theme: &str) -> Result<StoryJobResponse, ApiError> {
        let body = CreateStoryRequest {
            theme: theme.to_string(),
        };
        let job: StoryJobResponse = self.api.post(routes::CREATE_STORY, &body).await?;
        tracing::info!(job_id = %job.job_id, status = ?job.status, "Story generation requested");
        Ok(job)
    }

    pub async fn get_job(&self, job_id: &JobId) -> Result<StoryJobResponse, ApiError> {
        self.api.get(&routes::job(job_id)).await
    }

    /// Polls a generation job until the server stops working on it.
    ///
    /// `on_change` sees each fetched job whose status differs from the last.
    pub async fn wait_for_job(
        &self,
        mut job: StoryJobResponse,
        poll_interval: Duration,
        mut on_change: impl FnMut(&StoryJobResponse),
    ) -> Result<StoryJobResponse, ApiError> {
        while !job.status.is_finished() {
            tokio::time::sleep(poll_interval).await;
            let next = self.get_job(&job.job_id).await?;
            if next.status != job.status {
                on_change(&next);
            }
            job = next;
        }
        tracing::info!(job_id = %job.job_id, status = ?job.status, "Story generation finished");
        Ok(job)
    }

    /// Create a node; returns the id the server assigned
    pub async fn create_node(
        &self,
        story_id: &StoryId,
        request: &CreateNodeRequest,
    ) -> Result<NodeId, ApiError> {
        let created: CreatedNodeResponse =
            self.api.post(&routes::story_nodes(story_id), request).await?;
        tracing::info!(
            story_id = %story_id,
            node_id = %created.id,
            parent = ?request.parent_node_id,
            "Created story node"
        );
        Ok(created.id)
    }

    /// Replace a node's content and options; returns the stored node
    pub async fn update_node(
        &self,
        story_id: &StoryId,
        node_id: &NodeId,
        request: &UpdateNodeRequest,
    ) -> Result<StoryNode, ApiError> {
        self.api
            .put(&routes::story_node(story_id, node_id), request)
            .await
    }

    pub async fn delete_node(&self, story_id: &StoryId, node_id: &NodeId) -> Result<(), ApiError> {
        self.api
            .delete(&routes::story_node(story_id, node_id))
            .await?;
        tracing::info!(story_id = %story_id, node_id = %node_id, "Deleted story node");
        Ok(())
    }
}

/// What a finished generation job produced.
///
/// `Ok(None)` for a job that completed without a story or is still running.
/// Failed and unrecognized jobs give the reason to show the user.
pub fn job_outcome(job: &StoryJobResponse) -> Result<Option<StoryId>, String> {
    match job.status {
        JobStatus::Completed => Ok(job.story_id.clone()),
        JobStatus::Failed => Err(job
            .error
            .clone()
            .unwrap_or_else(|| "no reason given".to_string())),
        JobStatus::Unknown => Err("server reported an unrecognized job status".to_string()),
        JobStatus::Pending | JobStatus::Processing => Ok(None),
    }
}
