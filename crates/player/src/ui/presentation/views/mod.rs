//! Top-level views, one per route

pub mod editor_view;
pub mod play_view;
pub mod story_list;
