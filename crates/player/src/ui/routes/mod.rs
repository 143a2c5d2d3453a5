//! Routes of the desktop app
//!
//! Route handlers stay thin: they pick the view and pass the path
//! parameters through.

use dioxus::prelude::*;

use crate::ui::presentation::views::editor_view::EditorView;
use crate::ui::presentation::views::play_view::PlayView;
use crate::ui::presentation::views::story_list::StoryListView;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    StoryListRoute {},
    #[route("/stories/:story_id/play")]
    PlayRoute { story_id: String },
    #[route("/stories/:story_id/edit")]
    EditorRoute { story_id: String },
    #[route("/:..segments")]
    NotFoundRoute { segments: Vec<String> },
}

/// Story list route
#[component]
fn StoryListRoute() -> Element {
    rsx! {
        StoryListView {}
    }
}

/// Play route; keyed by story so switching stories starts a fresh session
#[component]
fn PlayRoute(story_id: String) -> Element {
    rsx! {
        PlayView {
            key: "{story_id}",
            story_id: story_id.clone(),
        }
    }
}

/// Editor route; keyed like the play route
#[component]
fn EditorRoute(story_id: String) -> Element {
    rsx! {
        EditorView {
            key: "{story_id}",
            story_id: story_id.clone(),
        }
    }
}

#[component]
fn NotFoundRoute(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "page",
            p { "Nothing lives at /{path}." }
            Link {
                class: "btn",
                to: Route::StoryListRoute {},
                "Back to stories"
            }
        }
    }
}
