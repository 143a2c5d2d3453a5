//! Application services
//!
//! Services implement the story API use cases on top of the typed `Api`
//! wrapper. Sessions and the front end call these instead of building paths.

pub mod story_service;

pub use story_service::{job_outcome, StoryService};
