//! Storyloom player: desktop app and terminal front end for the story API.
//!
//! Layers follow the usual ports and adapters split: `ports` defines the
//! HTTP boundary, `application` holds services and sessions built on it,
//! and `infrastructure` provides the reqwest adapter. `ui` is the Dioxus
//! desktop front end; `cli` renders the same sessions as plain text.

pub mod application;
pub mod cli;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod ui;

pub use application::{Applied, EditorSession, PlaySession, SessionError, StoryService};
pub use config::{ClientConfig, ConfigError};
