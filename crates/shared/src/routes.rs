//! Paths of the story API, relative to the configured base URL.

use storyloom_domain::{JobId, NodeId, StoryId};

/// `GET` lists stories. The trailing slash is part of the route.
pub const STORIES: &str = "/stories/";

/// `POST` starts a generation job.
pub const CREATE_STORY: &str = "/stories/create";

/// `GET`, `PUT` or `DELETE` a single story.
pub fn story(story_id: &StoryId) -> String {
    format!("/stories/{story_id}")
}

/// `POST` creates a node in a story.
pub fn story_nodes(story_id: &StoryId) -> String {
    format!("/stories/{story_id}/nodes")
}

/// `PUT` or `DELETE` a node.
pub fn story_node(story_id: &StoryId, node_id: &NodeId) -> String {
    format!("/stories/{story_id}/nodes/{node_id}")
}

/// `GET` polls a generation job.
pub fn job(job_id: &JobId) -> String {
    format!("/jobs/{job_id}")
}
