//! Story fixtures used across unit tests.

use serde_json::Value;
use storyloom_domain::{Story, StoryNode, StoryOption};

/// Two nodes: "A" (Start) leads to the winning ending "B" (End).
pub fn go_left_story() -> Story {
    Story::new(
        1,
        "Go Left",
        StoryNode::new("A", "Start").with_option(StoryOption::linked("Go left", "B")),
    )
    .with_node(StoryNode::ending("B", "End", true))
}

/// A → {B, C}; B → D. C is a losing ending, D a winning one.
pub fn crossroads_story() -> Story {
    Story::new(
        1,
        "Crossroads",
        StoryNode::new("A", "You stand at a crossroads.")
            .with_option(StoryOption::linked("Go left", "B"))
            .with_option(StoryOption::linked("Go right", "C")),
    )
    .with_node(
        StoryNode::new("B", "A narrow forest path.")
            .with_option(StoryOption::linked("Go deeper", "D")),
    )
    .with_node(StoryNode::ending("C", "The river sweeps you away.", false))
    .with_node(StoryNode::ending("D", "You find the treasure.", true))
}

pub fn crossroads_json() -> Value {
    serde_json::to_value(crossroads_story()).expect("fixture story serializes")
}

pub fn story_json(story: &Story) -> Value {
    serde_json::to_value(story).expect("fixture story serializes")
}
