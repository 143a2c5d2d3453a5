//! Small helpers shared by the domain and the player client.
//!
//! Pure functions only; nothing here performs I/O.

pub mod datetime;
pub mod string;

pub use datetime::parse_timestamp;
pub use string::{is_blank, trimmed_non_empty};
