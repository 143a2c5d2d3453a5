//! Reusable UI components

pub mod choice_list;
pub mod common;
pub mod draft_option;
pub mod story_tree;
