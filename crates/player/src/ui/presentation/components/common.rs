//! Small building blocks shared by the views

use dioxus::prelude::*;

use crate::ui::routes::Route;

#[component]
pub fn ErrorBanner(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "banner banner-error",
            span { "{message}" }
            button {
                class: "btn btn-link",
                onclick: move |_| on_dismiss.call(()),
                "Dismiss"
            }
        }
    }
}

#[component]
pub fn NoticeBanner(message: String) -> Element {
    rsx! {
        div {
            class: "banner banner-notice",
            "{message}"
        }
    }
}

#[component]
pub fn LoadingMessage(label: String) -> Element {
    rsx! {
        div {
            class: "muted",
            "{label}"
        }
    }
}

#[component]
pub fn BackToStories() -> Element {
    rsx! {
        Link {
            class: "btn",
            to: Route::StoryListRoute {},
            "Stories"
        }
    }
}
