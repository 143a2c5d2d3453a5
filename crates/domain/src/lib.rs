//! Storyloom domain: the story graph and the pure functions over it.
//!
//! Nothing in this crate performs I/O. Sessions in `storyloom-player` build on
//! these types; the wire contract in `storyloom-shared` reuses them.

extern crate self as storyloom_domain;

pub mod common;

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod graph;
pub mod ids;
pub mod tree;

pub use aggregates::{Story, StoryDocument};
pub use entities::{Outcome, StoryNode, StoryOption, StoryStatus};
pub use error::DomainError;
pub use graph::{children, dangling_links, is_terminal, outcome, resolve, Choice, DanglingLink, OptionTarget};
pub use ids::{JobId, NodeId, StoryId};
pub use tree::{render_tree, TreeEntry, TreeRow};
