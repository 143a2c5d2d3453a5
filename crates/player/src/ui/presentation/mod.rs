//! Presentation layer - Dioxus components and views

pub mod components;
pub mod services;
pub mod utils;
pub mod views;

pub use services::Services;
