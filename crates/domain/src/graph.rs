//! Pure traversal over a story graph.
//!
//! Broken links are reported, never dropped: a single corrupt edge shows up as
//! an [`OptionTarget::Dangling`] entry while the rest of the story stays usable.

use crate::{DomainError, NodeId, Outcome, Story, StoryNode, StoryOption};

/// Looks up a node by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when the id is not part of the story,
/// which is the dangling-reference case.
pub fn resolve<'a>(story: &'a Story, node_id: &NodeId) -> Result<&'a StoryNode, DomainError> {
    story
        .get(node_id)
        .ok_or_else(|| DomainError::not_found("StoryNode", node_id.to_string()))
}

/// A terminal node never offers a continuation, whatever its options say.
#[inline]
pub fn is_terminal(node: &StoryNode) -> bool {
    node.is_ending
}

/// `Some(Win)` / `Some(Loss)` for endings, `None` for every other node.
pub fn outcome(node: &StoryNode) -> Option<Outcome> {
    match (node.is_ending, node.is_winning_ending) {
        (true, true) => Some(Outcome::Win),
        (true, false) => Some(Outcome::Loss),
        (false, _) => None,
    }
}

/// Where an option leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionTarget<'a> {
    Resolved(&'a StoryNode),
    /// The option names a node that is not in the story
    Dangling(&'a NodeId),
    /// The option has no target yet
    Unlinked,
}

impl<'a> OptionTarget<'a> {
    pub fn node(&self) -> Option<&'a StoryNode> {
        match self {
            Self::Resolved(node) => Some(node),
            Self::Dangling(_) | Self::Unlinked => None,
        }
    }

    pub fn is_broken(&self) -> bool {
        !matches!(self, Self::Resolved(_))
    }
}

/// One option of a node together with its resolved target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice<'a> {
    /// Position in the node's option list
    pub index: usize,
    pub option: &'a StoryOption,
    pub target: OptionTarget<'a>,
}

/// Maps every option of `node` to its target, preserving option order.
pub fn children<'a>(story: &'a Story, node: &'a StoryNode) -> Vec<Choice<'a>> {
    node.options
        .iter()
        .enumerate()
        .map(|(index, option)| Choice {
            index,
            option,
            target: match &option.node_id {
                None => OptionTarget::Unlinked,
                Some(id) => match story.get(id) {
                    Some(target) => OptionTarget::Resolved(target),
                    None => OptionTarget::Dangling(id),
                },
            },
        })
        .collect()
}

/// An option whose target is missing from the story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingLink {
    pub source: NodeId,
    pub option_index: usize,
    pub target: NodeId,
}

/// Every broken edge in the story, ordered by source node then option.
pub fn dangling_links(story: &Story) -> Vec<DanglingLink> {
    let mut links: Vec<DanglingLink> = story
        .nodes()
        .flat_map(|node| {
            children(story, node)
                .into_iter()
                .filter_map(move |choice| match choice.target {
                    OptionTarget::Dangling(target) => Some(DanglingLink {
                        source: node.id.clone(),
                        option_index: choice.index,
                        target: target.clone(),
                    }),
                    OptionTarget::Resolved(_) | OptionTarget::Unlinked => None,
                })
        })
        .collect();
    links.sort_by(|a, b| {
        a.source
            .cmp(&b.source)
            .then(a.option_index.cmp(&b.option_index))
    });
    links
}
