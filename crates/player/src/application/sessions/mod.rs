//! Sessions: client-held state over one fetched story.
//!
//! Each session owns its own copy of the story. Mutating operations take
//! `&mut self`, so a session never has two requests in flight, and dropping
//! a pending future discards its response.

mod editor_session;
mod play_session;

pub use editor_session::{Applied, EditorSession};
pub use play_session::PlaySession;
