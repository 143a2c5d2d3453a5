//! Storyloom - desktop app composition root.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storyloom_player::application::{Api, StoryService};
use storyloom_player::config::ClientConfig;
use storyloom_player::infrastructure::ApiAdapter;
use storyloom_player::ui::presentation::Services;

fn main() -> anyhow::Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storyloom_player=debug,dioxus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(api = %config.api_base_url, "Starting Storyloom");

    // HTTP
    let raw_api = Arc::new(ApiAdapter::new(&config));
    let story = StoryService::new(Api::new(raw_api));

    let head = format!("<style>{}</style>", storyloom_player::ui::STYLE);
    let window = dioxus_desktop::WindowBuilder::new().with_title("Storyloom");
    let cfg = dioxus_desktop::Config::new()
        .with_custom_head(head)
        .with_window(window);

    dioxus::LaunchBuilder::new()
        .with_cfg(cfg)
        .with_context(Services::new(story, config))
        .launch(storyloom_player::ui::app);
    Ok(())
}
