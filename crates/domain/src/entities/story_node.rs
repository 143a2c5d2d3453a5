//! Story nodes and the options that link them.

use serde::{Deserialize, Serialize};

use crate::NodeId;

/// A labeled edge from one node to another.
///
/// `node_id` is unset while an option is being authored; a playable story
/// has every option linked to a node present in the story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryOption {
    pub text: String,
    #[serde(default)]
    pub node_id: Option<NodeId>,
}

impl StoryOption {
    /// An option that does not lead anywhere yet.
    pub fn unlinked(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            node_id: None,
        }
    }

    pub fn linked(text: impl Into<String>, node_id: impl Into<NodeId>) -> Self {
        Self {
            text: text.into(),
            node_id: Some(node_id.into()),
        }
    }
}

/// How a terminal node ends the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Loss,
}

/// A single narrative beat: either an ending or a set of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryNode {
    pub id: NodeId,
    pub content: String,
    #[serde(default)]
    pub is_ending: bool,
    /// Only meaningful when `is_ending` is set.
    #[serde(default)]
    pub is_winning_ending: bool,
    /// Display order is significant.
    #[serde(default)]
    pub options: Vec<StoryOption>,
}

impl StoryNode {
    /// A non-terminal node with no options yet.
    pub fn new(id: impl Into<NodeId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            is_ending: false,
            is_winning_ending: false,
            options: Vec::new(),
        }
    }

    /// A terminal node.
    pub fn ending(id: impl Into<NodeId>, content: impl Into<String>, winning: bool) -> Self {
        Self {
            is_ending: true,
            is_winning_ending: winning,
            ..Self::new(id, content)
        }
    }

    pub fn with_option(mut self, option: StoryOption) -> Self {
        self.options.push(option);
        self
    }
}
