//! Request bodies sent to the story API.

use serde::{Deserialize, Serialize};
use storyloom_domain::{NodeId, StoryOption};

/// `PUT /stories/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStoryRequest {
    pub title: String,
}

/// `POST /stories/create`: asks the server to generate a story from a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStoryRequest {
    pub theme: String,
}

/// `POST /stories/{id}/nodes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNodeRequest {
    pub content: String,
    pub parent_node_id: Option<NodeId>,
    #[serde(default)]
    pub is_ending: bool,
    #[serde(default)]
    pub is_winning_ending: bool,
    #[serde(default)]
    pub options: Vec<StoryOption>,
}

impl CreateNodeRequest {
    /// A plain, non-terminal child of `parent` with no options.
    pub fn child_of(parent: NodeId, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            parent_node_id: Some(parent),
            is_ending: false,
            is_winning_ending: false,
            options: Vec::new(),
        }
    }
}

/// `PUT /stories/{id}/nodes/{node_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNodeRequest {
    pub content: String,
    pub options: Vec<StoryOption>,
}
