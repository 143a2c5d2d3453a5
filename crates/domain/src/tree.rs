//! Tree rendering of a story graph, by path.
//!
//! A node reachable through two different options appears once under each of
//! them. Broken and unlinked options become marker rows instead of errors, and
//! an option that leads back to one of its own ancestors is shown as a cycle
//! marker without being expanded again.

use std::collections::HashSet;

use crate::graph::{children, is_terminal, OptionTarget};
use crate::{NodeId, Story, StoryNode};

/// What a row of the rendered tree shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    Node(NodeId),
    /// Option target missing from the story
    Dangling(NodeId),
    /// Option without a target
    Unlinked,
    /// Option leading back to a node already on the current path
    Cycle(NodeId),
}

impl TreeEntry {
    pub fn is_broken(&self) -> bool {
        matches!(self, Self::Dangling(_) | Self::Unlinked)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    /// 0 for the root
    pub depth: usize,
    /// Label of the option that led here; `None` for the root
    pub via_option: Option<String>,
    pub entry: TreeEntry,
}

/// Depth-first, option-ordered rendering starting at the root.
///
/// Options of ending nodes are not followed. The walk keeps its own stack,
/// so story depth is bounded by memory rather than by the call stack.
pub fn render_tree(story: &Story) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    // Path from the root to the parent of the frame being visited
    let mut ancestors: Vec<&NodeId> = Vec::new();
    let mut on_path: HashSet<&NodeId> = HashSet::new();
    let mut stack = vec![Frame::Node {
        node: story.root(),
        depth: 0,
        via: None,
    }];

    while let Some(frame) = stack.pop() {
        let (node, depth, via) = match frame {
            Frame::Node { node, depth, via } => (node, depth, via),
            Frame::Marker(row) => {
                rows.push(row);
                continue;
            }
        };

        while ancestors.len() > depth {
            if let Some(id) = ancestors.pop() {
                on_path.remove(id);
            }
        }
        rows.push(TreeRow {
            depth,
            via_option: via.map(str::to_string),
            entry: TreeEntry::Node(node.id.clone()),
        });
        if is_terminal(node) {
            continue;
        }

        ancestors.push(&node.id);
        on_path.insert(&node.id);
        let mut pending = Vec::new();
        for choice in children(story, node) {
            let via = choice.option.text.as_str();
            let marker = match choice.target {
                OptionTarget::Resolved(child) if on_path.contains(&child.id) => {
                    TreeEntry::Cycle(child.id.clone())
                }
                OptionTarget::Resolved(child) => {
                    pending.push(Frame::Node {
                        node: child,
                        depth: depth + 1,
                        via: Some(via),
                    });
                    continue;
                }
                OptionTarget::Dangling(id) => TreeEntry::Dangling(id.clone()),
                OptionTarget::Unlinked => TreeEntry::Unlinked,
            };
            pending.push(Frame::Marker(TreeRow {
                depth: depth + 1,
                via_option: Some(via.to_string()),
                entry: marker,
            }));
        }
        stack.extend(pending.into_iter().rev());
    }
    rows
}

enum Frame<'a> {
    Node {
        node: &'a StoryNode,
        depth: usize,
        via: Option<&'a str>,
    },
    Marker(TreeRow),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoryOption;

    fn node_row(depth: usize, via: Option<&str>, id: &str) -> TreeRow {
        TreeRow {
            depth,
            via_option: via.map(str::to_string),
            entry: TreeEntry::Node(NodeId::from(id)),
        }
    }

    #[test]
    fn shared_child_appears_under_each_parent() {
        let story = Story::new(
            "s",
            "Diamond",
            StoryNode::new("A", "Start")
                .with_option(StoryOption::linked("Left", "B"))
                .with_option(StoryOption::linked("Right", "C")),
        )
        .with_node(StoryNode::new("B", "Left path").with_option(StoryOption::linked("On", "D")))
        .with_node(StoryNode::new("C", "Right path").with_option(StoryOption::linked("On", "D")))
        .with_node(StoryNode::ending("D", "Meet", true));

        assert_eq!(
            render_tree(&story),
            vec![
                node_row(0, None, "A"),
                node_row(1, Some("Left"), "B"),
                node_row(2, Some("On"), "D"),
                node_row(1, Some("Right"), "C"),
                node_row(2, Some("On"), "D"),
            ]
        );
    }

    #[test]
    fn cycles_are_flagged_and_not_expanded() {
        let story = Story::new(
            "s",
            "Loop",
            StoryNode::new("A", "Start").with_option(StoryOption::linked("Forward", "B")),
        )
        .with_node(StoryNode::new("B", "Again?").with_option(StoryOption::linked("Back", "A")));

        let rows = render_tree(&story);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].entry, TreeEntry::Cycle(NodeId::from("A")));
        assert_eq!(rows[2].depth, 2);
    }

    #[test]
    fn broken_options_render_as_markers() {
        let story = Story::new(
            "s",
            "Broken",
            StoryNode::new("A", "Start")
                .with_option(StoryOption::linked("Into the void", "Z"))
                .with_option(StoryOption::unlinked("Draft")),
        );

        let rows = render_tree(&story);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].entry, TreeEntry::Dangling(NodeId::from("Z")));
        assert_eq!(rows[2].entry, TreeEntry::Unlinked);
        assert!(rows[1].entry.is_broken());
        assert!(rows[2].entry.is_broken());
    }

    #[test]
    fn ending_options_are_not_followed() {
        let story = Story::new(
            "s",
            "Ends early",
            StoryNode::ending("A", "Over", false).with_option(StoryOption::linked("Ignored", "B")),
        )
        .with_node(StoryNode::new("B", "Unreachable"));

        assert_eq!(render_tree(&story), vec![node_row(0, None, "A")]);
    }

    #[test]
    fn very_deep_stories_render_without_recursion() {
        const DEPTH: usize = 100_000;
        let mut story = Story::new(
            "s",
            "Long road",
            StoryNode::new("n0", "Step 0").with_option(StoryOption::linked("On", "n1")),
        );
        for i in 1..DEPTH {
            story = story.with_node(
                StoryNode::new(format!("n{i}"), format!("Step {i}"))
                    .with_option(StoryOption::linked("On", format!("n{}", i + 1))),
            );
        }
        story = story.with_node(StoryNode::ending(format!("n{DEPTH}"), "Arrived", true));

        let rows = render_tree(&story);
        assert_eq!(rows.len(), DEPTH + 1);
        assert_eq!(rows[DEPTH].depth, DEPTH);
        assert_eq!(rows[DEPTH].entry, TreeEntry::Node(NodeId::from(format!("n{DEPTH}"))));
    }
}
