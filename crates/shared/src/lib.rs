//! Storyloom Shared - wire contract for the story HTTP API
//!
//! This crate contains the request bodies, response shapes and route paths
//! of the story API.
//!
//! No business logic lives here: only data types and their serialization.

pub mod requests;
pub mod responses;
pub mod routes;

pub use requests::{CreateNodeRequest, CreateStoryRequest, UpdateNodeRequest, UpdateStoryRequest};
pub use responses::{
    CreatedNodeResponse, JobStatus, StoryJobResponse, StoryListItem, StoryListResponse,
    UpdatedStoryResponse,
};
