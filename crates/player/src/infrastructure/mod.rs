//! Infrastructure adapters for the player client.

pub mod http_client;

#[cfg(test)]
pub mod testing;

pub use http_client::ApiAdapter;
