//! Choice list for the play view
//!
//! Broken options stay visible but cannot be picked.

use dioxus::prelude::*;
use storyloom_domain::OptionTarget;

use crate::application::PlaySession;

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceItem {
    /// Position in the node's option list
    pub index: usize,
    pub text: String,
    /// Why the option cannot be followed
    pub problem: Option<String>,
}

/// Choices of the session's current node; empty at an ending.
pub fn choice_items(session: &PlaySession) -> Vec<ChoiceItem> {
    session
        .choices()
        .into_iter()
        .map(|choice| ChoiceItem {
            index: choice.index,
            text: choice.option.text.clone(),
            problem: match choice.target {
                OptionTarget::Resolved(_) => None,
                OptionTarget::Dangling(id) => Some(format!("broken link -> #{id}")),
                OptionTarget::Unlinked => Some("unlinked".to_string()),
            },
        })
        .collect()
}

#[derive(Props, Clone, PartialEq)]
pub struct ChoiceListProps {
    pub choices: Vec<ChoiceItem>,
    /// Receives the option index
    pub on_choose: EventHandler<usize>,
}

#[component]
pub fn ChoiceList(props: ChoiceListProps) -> Element {
    rsx! {
        div {
            class: "choice-list",
            for choice in props.choices.iter() {
                ChoiceButton {
                    key: "{choice.index}",
                    choice: choice.clone(),
                    on_choose: props.on_choose,
                }
            }
        }
    }
}

#[component]
fn ChoiceButton(choice: ChoiceItem, on_choose: EventHandler<usize>) -> Element {
    let index = choice.index;

    rsx! {
        button {
            class: "btn choice",
            disabled: choice.problem.is_some(),
            onclick: move |_| on_choose.call(index),
            "{choice.text}"
            if let Some(problem) = choice.problem.as_ref() {
                span { class: "broken", "{problem}" }
            }
        }
    }
}
