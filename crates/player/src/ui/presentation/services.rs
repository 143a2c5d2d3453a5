//! Service context for the views
//!
//! The composition root provides one [`Services`] bundle through Dioxus
//! context. Views reach the story API only through it, never through an
//! adapter type.

use dioxus::prelude::*;

use crate::application::StoryService;
use crate::config::ClientConfig;

#[derive(Clone)]
pub struct Services {
    pub story: StoryService,
    pub config: ClientConfig,
}

impl Services {
    pub fn new(story: StoryService, config: ClientConfig) -> Self {
        Self { story, config }
    }
}

/// Hook to access the StoryService from context
pub fn use_story_service() -> StoryService {
    use_context::<Services>().story
}

/// Hook to access the client configuration from context
pub fn use_client_config() -> ClientConfig {
    use_context::<Services>().config
}
