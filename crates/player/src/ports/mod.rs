//! Ports - boundaries between the application layer and the outside world.

pub mod outbound;
