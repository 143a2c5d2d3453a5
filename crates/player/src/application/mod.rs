//! Application layer: typed API access, services and sessions.
//!
//! Services and sessions depend on the `RawApiPort` trait, never on a
//! concrete HTTP client.

pub mod api;
pub mod error;
pub mod services;
pub mod sessions;

pub use api::Api;
pub use error::SessionError;
pub use services::StoryService;
pub use sessions::{Applied, EditorSession, PlaySession};
