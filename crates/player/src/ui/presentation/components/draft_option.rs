//! One draft option of the node being edited

use dioxus::prelude::*;
use storyloom_domain::{NodeId, Story, StoryOption};

use crate::ui::presentation::utils::snippet;

const TARGET_SNIPPET_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub struct DraftOptionItem {
    pub text: String,
    pub target: Option<NodeId>,
    /// Target set but missing from the story
    pub broken: bool,
}

impl DraftOptionItem {
    pub fn new(story: &Story, option: &StoryOption) -> Self {
        Self {
            text: option.text.clone(),
            target: option.node_id.clone(),
            broken: option
                .node_id
                .as_ref()
                .is_some_and(|id| !story.contains(id)),
        }
    }
}

/// A node an option can point at.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetItem {
    pub id: NodeId,
    pub label: String,
}

/// Every node of the story as a link target, sorted by id.
pub fn target_items(story: &Story) -> Vec<TargetItem> {
    let mut targets: Vec<TargetItem> = story
        .nodes()
        .map(|node| TargetItem {
            id: node.id.clone(),
            label: format!("#{} {}", node.id, snippet(&node.content, TARGET_SNIPPET_LEN)),
        })
        .collect();
    targets.sort_by(|a, b| a.id.cmp(&b.id));
    targets
}

#[component]
pub fn DraftOptionRow(
    index: usize,
    item: DraftOptionItem,
    targets: Vec<TargetItem>,
    editable: bool,
    on_text: EventHandler<(usize, String)>,
    on_link: EventHandler<(usize, Option<NodeId>)>,
    on_remove: EventHandler<usize>,
) -> Element {
    let number = index + 1;
    let missing = item.target.clone().filter(|_| item.broken);

    rsx! {
        div {
            class: "option-row",
            span { class: "muted", "{number}." }
            input {
                class: "input",
                value: "{item.text}",
                disabled: !editable,
                oninput: move |e| on_text.call((index, e.value())),
            }
            select {
                class: "select",
                disabled: !editable,
                onchange: move |e| {
                    let value = e.value();
                    let target = (!value.is_empty()).then(|| NodeId::from(value));
                    on_link.call((index, target));
                },
                option {
                    value: "",
                    selected: item.target.is_none(),
                    "(unlinked)"
                }
                if let Some(id) = missing {
                    option {
                        value: "{id}",
                        selected: true,
                        "#{id} (missing)"
                    }
                }
                for target in targets.iter() {
                    option {
                        key: "{target.id}",
                        value: "{target.id}",
                        selected: item.target.as_ref() == Some(&target.id),
                        "{target.label}"
                    }
                }
            }
            button {
                class: "btn btn-danger",
                disabled: !editable,
                onclick: move |_| on_remove.call(index),
                "Remove"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::fixtures;

    #[test]
    fn draft_items_flag_missing_targets() {
        let story = fixtures::crossroads_story();
        let linked = DraftOptionItem::new(&story, &StoryOption::linked("Go left", "B"));
        let missing = DraftOptionItem::new(&story, &StoryOption::linked("Swim", "Z"));
        let unlinked = DraftOptionItem::new(&story, &StoryOption::unlinked("Wait"));

        assert!(!linked.broken);
        assert!(missing.broken);
        assert!(!unlinked.broken);
        assert_eq!(unlinked.target, None);
    }

    #[test]
    fn targets_cover_every_node_in_id_order() {
        let targets = target_items(&fixtures::crossroads_story());
        let ids: Vec<&str> = targets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C", "D"]);
        assert_eq!(targets[1].label, "#B A narrow forest path.");
    }
}
