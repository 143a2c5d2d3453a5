//! Story aggregate - a complete branching-narrative document
//!
//! # Root invariant
//!
//! The wire document carries the root twice: once as `root_node` and once
//! inside `all_nodes`. A document where the two disagree, or where the root is
//! missing from the map, is rejected during deserialization. In memory the
//! root is held once, so edits cannot make the two copies drift apart.
//!
//! # Example
//!
//! ```
//! use storyloom_domain::{Story, StoryNode, StoryOption};
//!
//! let story = Story::new(
//!     "1",
//!     "The Forest",
//!     StoryNode::new("A", "Start").with_option(StoryOption::linked("Go left", "B")),
//! )
//! .with_node(StoryNode::ending("B", "End", true));
//!
//! assert_eq!(story.root().id.as_str(), "A");
//! assert_eq!(story.node_count(), 2);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::datetime::option_timestamp;
use crate::graph::DanglingLink;
use crate::{DomainError, NodeId, StoryId, StoryNode, StoryStatus};

/// Wire shape of a full story as served by `GET /stories/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryDocument {
    pub id: StoryId,
    pub title: String,
    #[serde(default)]
    pub status: StoryStatus,
    #[serde(
        default,
        with = "option_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "option_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    pub root_node: StoryNode,
    pub all_nodes: HashMap<NodeId, StoryNode>,
}

/// A story document whose root is guaranteed to be part of its node set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoryDocument", into = "StoryDocument")]
pub struct Story {
    id: StoryId,
    title: String,
    status: StoryStatus,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    root: StoryNode,
    /// Every node except the root
    others: HashMap<NodeId, StoryNode>,
}

impl Story {
    // =========================================================================
    // Constructor
    // =========================================================================

    pub fn new(id: impl Into<StoryId>, title: impl Into<String>, root: StoryNode) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: StoryStatus::Draft,
            created_at: None,
            updated_at: None,
            root,
            others: HashMap::new(),
        }
    }

    /// Adds a node, replacing any node with the same id (including the root).
    pub fn with_node(mut self, node: StoryNode) -> Self {
        if node.id == self.root.id {
            self.root = node;
        } else {
            self.others.insert(node.id.clone(), node);
        }
        self
    }

    pub fn with_status(mut self, status: StoryStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_timestamps(
        mut self,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> &StoryId {
        &self.id
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn status(&self) -> StoryStatus {
        self.status
    }

    #[inline]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    #[inline]
    pub fn root(&self) -> &StoryNode {
        &self.root
    }

    #[inline]
    pub fn root_id(&self) -> &NodeId {
        &self.root.id
    }

    pub fn get(&self, node_id: &NodeId) -> Option<&StoryNode> {
        if *node_id == self.root.id {
            Some(&self.root)
        } else {
            self.others.get(node_id)
        }
    }

    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.get(node_id).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.others.len() + 1
    }

    /// All nodes, root first; the rest in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &StoryNode> {
        std::iter::once(&self.root).chain(self.others.values())
    }

    /// Every broken edge, see [`crate::graph::dangling_links`].
    pub fn dangling_links(&self) -> Vec<DanglingLink> {
        crate::graph::dangling_links(self)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replaces an existing node with a server-confirmed copy.
    ///
    /// Returns the previous version. Unknown ids are rejected: new nodes are
    /// only ever introduced by re-fetching the whole story.
    pub fn replace_node(&mut self, node: StoryNode) -> Result<StoryNode, DomainError> {
        if node.id == self.root.id {
            return Ok(std::mem::replace(&mut self.root, node));
        }
        match self.others.get_mut(&node.id) {
            Some(slot) => Ok(std::mem::replace(slot, node)),
            None => Err(DomainError::not_found("StoryNode", node.id.to_string())),
        }
    }

    /// Drops a node the server has already deleted.
    ///
    /// Options elsewhere that pointed at it are left alone and become
    /// dangling links. The root cannot be removed.
    pub fn remove_node(&mut self, node_id: &NodeId) -> Result<StoryNode, DomainError> {
        if *node_id == self.root.id {
            return Err(DomainError::validation("The root node cannot be removed"));
        }
        self.others
            .remove(node_id)
            .ok_or_else(|| DomainError::not_found("StoryNode", node_id.to_string()))
    }
}

impl TryFrom<StoryDocument> for Story {
    type Error = DomainError;

    fn try_from(doc: StoryDocument) -> Result<Self, Self::Error> {
        if let Some((key, node)) = doc.all_nodes.iter().find(|(key, node)| **key != node.id) {
            return Err(DomainError::parse(format!(
                "all_nodes key {} holds node {}",
                key, node.id
            )));
        }

        let mut others = doc.all_nodes;
        match others.remove(&doc.root_node.id) {
            None => Err(DomainError::parse(format!(
                "root node {} is missing from all_nodes",
                doc.root_node.id
            ))),
            Some(entry) if entry != doc.root_node => Err(DomainError::parse(format!(
                "root node {} differs from its all_nodes entry",
                doc.root_node.id
            ))),
            Some(_) => Ok(Self {
                id: doc.id,
                title: doc.title,
                status: doc.status,
                created_at: doc.created_at,
                updated_at: doc.updated_at,
                root: doc.root_node,
                others,
            }),
        }
    }
}

impl From<Story> for StoryDocument {
    fn from(story: Story) -> Self {
        let mut all_nodes = story.others;
        all_nodes.insert(story.root.id.clone(), story.root.clone());
        Self {
            id: story.id,
            title: story.title,
            status: story.status,
            created_at: story.created_at,
            updated_at: story.updated_at,
            root_node: story.root,
            all_nodes,
        }
    }
}
