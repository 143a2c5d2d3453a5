//! Desktop presentation built on Dioxus.
//!
//! `routes` maps paths to views. `presentation` holds the views, the
//! components they are built from and the service context they read.

use dioxus::prelude::*;

pub mod presentation;
pub mod routes;

pub use routes::Route;

/// Stylesheet the desktop shell injects into the page head
pub const STYLE: &str = include_str!("../../assets/css/storyloom.css");

pub fn app() -> Element {
    rsx! {
        AppRoot {}
    }
}

#[component]
fn AppRoot() -> Element {
    rsx! {
        div {
            class: "app-shell",
            Router::<Route> {}
        }
    }
}
