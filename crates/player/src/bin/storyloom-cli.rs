//! Storyloom terminal front end - composition root binary.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storyloom_domain::StoryId;
use storyloom_player::application::{Api, StoryService};
use storyloom_player::config::ClientConfig;
use storyloom_player::infrastructure::ApiAdapter;
use storyloom_player::cli::{self, Command, RunnerDeps};

#[derive(Debug, Parser)]
#[command(
    name = "storyloom-cli",
    version,
    about = "Play and edit branching stories from the terminal"
)]
struct Cli {
    /// Base URL of the story API (overrides STORYLOOM_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List stories
    List,
    /// Play a story from its first node
    Play { story_id: String },
    /// Open the story editor
    Edit { story_id: String },
    /// Generate a new story from a theme and wait for it
    Generate {
        #[arg(required = true, num_args = 1..)]
        theme: Vec<String>,
    },
    /// Delete a story
    Delete { story_id: String },
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::List => Command::List,
            Commands::Play { story_id } => Command::Play {
                story_id: StoryId::from(story_id),
            },
            Commands::Edit { story_id } => Command::Edit {
                story_id: StoryId::from(story_id),
            },
            Commands::Generate { theme } => Command::Generate {
                theme: theme.join(" "),
            },
            Commands::Delete { story_id } => Command::Delete {
                story_id: StoryId::from(story_id),
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storyloom_player=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("Invalid client configuration")?;
    if let Some(api_url) = cli.api_url.as_deref() {
        config = config
            .with_api_base_url(api_url)
            .context("Invalid --api-url")?;
    }
    tracing::info!(api = %config.api_base_url, "Starting Storyloom terminal front end");

    let raw_api = Arc::new(ApiAdapter::new(&config));
    let service = StoryService::new(Api::new(raw_api));

    cli::run(RunnerDeps { service, config }, cli.command.into())
        .await
        .context("Command failed")?;
    Ok(())
}
