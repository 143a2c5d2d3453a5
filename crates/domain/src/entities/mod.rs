//! Domain entities - Core story objects with identity

mod story_node;
mod story_status;

pub use story_node::{Outcome, StoryNode, StoryOption};
pub use story_status::StoryStatus;
