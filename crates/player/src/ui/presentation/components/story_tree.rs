//! Story tree panel for the editor
//!
//! Rows come from the domain's tree rendering. Node rows are clickable;
//! broken links and cycles are shown as markers. Nodes no path reaches are
//! listed underneath so they can still be selected.

use dioxus::prelude::*;
use storyloom_domain::{NodeId, Story, TreeEntry, TreeRow};

use crate::ui::presentation::utils::{ending_badge, snippet, unreachable_nodes};

const LABEL_LEN: usize = 48;

#[derive(Debug, Clone, PartialEq)]
pub enum TreeItemKind {
    Node { id: NodeId, selected: bool },
    Broken,
    Cycle(NodeId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeItem {
    pub depth: usize,
    pub via: Option<String>,
    pub kind: TreeItemKind,
    pub label: String,
}

impl TreeItem {
    fn node(
        story: &Story,
        id: &NodeId,
        depth: usize,
        via: Option<String>,
        selected: Option<&NodeId>,
    ) -> Self {
        let label = match story.get(id) {
            Some(node) => {
                let mut label = format!("#{} {}", id, snippet(&node.content, LABEL_LEN));
                if let Some(badge) = ending_badge(node) {
                    label.push_str(&format!(" [{badge}]"));
                }
                label
            }
            None => format!("#{id}"),
        };
        Self {
            depth,
            via,
            kind: TreeItemKind::Node {
                id: id.clone(),
                selected: selected == Some(id),
            },
            label,
        }
    }
}

/// Display rows for the rendered tree.
pub fn tree_items(story: &Story, rows: &[TreeRow], selected: Option<&NodeId>) -> Vec<TreeItem> {
    rows.iter()
        .map(|row| {
            let via = row.via_option.clone();
            match &row.entry {
                TreeEntry::Node(id) => TreeItem::node(story, id, row.depth, via, selected),
                TreeEntry::Dangling(id) => TreeItem {
                    depth: row.depth,
                    via,
                    kind: TreeItemKind::Broken,
                    label: format!("broken link -> #{id}"),
                },
                TreeEntry::Unlinked => TreeItem {
                    depth: row.depth,
                    via,
                    kind: TreeItemKind::Broken,
                    label: "unlinked".to_string(),
                },
                TreeEntry::Cycle(id) => TreeItem {
                    depth: row.depth,
                    via,
                    kind: TreeItemKind::Cycle(id.clone()),
                    label: format!("back to #{id}"),
                },
            }
        })
        .collect()
}

/// Rows for nodes the tree never reaches, at depth 0.
pub fn unreachable_items(
    story: &Story,
    rows: &[TreeRow],
    selected: Option<&NodeId>,
) -> Vec<TreeItem> {
    unreachable_nodes(story, rows)
        .iter()
        .map(|id| TreeItem::node(story, id, 0, None, selected))
        .collect()
}

#[derive(Props, Clone, PartialEq)]
pub struct StoryTreeProps {
    pub items: Vec<TreeItem>,
    pub unreachable: Vec<TreeItem>,
    pub on_select: EventHandler<NodeId>,
}

#[component]
pub fn StoryTree(props: StoryTreeProps) -> Element {
    rsx! {
        div {
            class: "panel",
            for (i, item) in props.items.iter().enumerate() {
                StoryTreeRow {
                    key: "{i}",
                    item: item.clone(),
                    on_select: props.on_select,
                }
            }
            if !props.unreachable.is_empty() {
                div { class: "muted", "Unreachable nodes" }
                for item in props.unreachable.iter() {
                    StoryTreeRow {
                        key: "{item.label}",
                        item: item.clone(),
                        on_select: props.on_select,
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct StoryTreeRowProps {
    pub item: TreeItem,
    pub on_select: EventHandler<NodeId>,
}

#[component]
pub fn StoryTreeRow(props: StoryTreeRowProps) -> Element {
    let indent = props.item.depth * 20;
    let via = props.item.via.clone();
    let on_select = props.on_select;

    let (class, target) = match &props.item.kind {
        TreeItemKind::Node { id, selected: true } => ("tree-row selected", Some(id.clone())),
        TreeItemKind::Node { id, selected: false } => ("tree-row", Some(id.clone())),
        TreeItemKind::Broken => ("tree-row marker broken", None),
        TreeItemKind::Cycle(_) => ("tree-row marker", None),
    };

    rsx! {
        div {
            class: "{class}",
            style: "padding-left: {indent}px",
            onclick: move |_| {
                if let Some(id) = target.clone() {
                    on_select.call(id);
                }
            },
            if let Some(via) = via {
                span { class: "tree-via", "{via}: " }
            }
            "{props.item.label}"
        }
    }
}
