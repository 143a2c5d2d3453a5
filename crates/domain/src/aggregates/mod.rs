//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate has a unique identity, owns its constituent parts and
//! exposes behavior through methods rather than public fields.

pub mod story;

pub use story::{Story, StoryDocument};
