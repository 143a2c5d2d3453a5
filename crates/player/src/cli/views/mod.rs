//! Plain-text views over sessions and API responses.
//!
//! Views only format; they never call the API or mutate a session. Broken
//! links are always rendered as visible markers.

pub mod editor_view;
pub mod play_view;
pub mod story_list;
