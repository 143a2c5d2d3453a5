//! Play view: read a node, pick a choice, reach an ending

use dioxus::prelude::*;
use storyloom_domain::{NodeId, Outcome, StoryId};

use crate::application::PlaySession;
use crate::ui::presentation::components::choice_list::{choice_items, ChoiceItem, ChoiceList};
use crate::ui::presentation::components::common::{BackToStories, ErrorBanner, LoadingMessage};
use crate::ui::presentation::services::use_story_service;
use crate::ui::presentation::utils::{outcome_banner, story_header};
use crate::ui::routes::Route;

/// Everything the play view shows for one session state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayScreen {
    pub header: String,
    pub content: String,
    pub choices: Vec<ChoiceItem>,
    /// Heading, message and whether the ending is a win
    pub ending: Option<(&'static str, &'static str, bool)>,
    pub path: Vec<NodeId>,
    pub can_go_back: bool,
}

impl PlayScreen {
    pub fn from_session(session: &PlaySession) -> Self {
        let ending = session.outcome().map(|outcome| {
            let (heading, message) = outcome_banner(outcome);
            (heading, message, outcome == Outcome::Win)
        });
        Self {
            header: story_header(session.document()),
            content: session.current_node().content.clone(),
            choices: choice_items(session),
            ending,
            path: session.path().to_vec(),
            can_go_back: session.can_go_back(),
        }
    }
}

#[component]
pub fn PlayView(story_id: String) -> Element {
    let story_service = use_story_service();

    let mut session: Signal<Option<PlaySession>> = use_signal(|| None);
    let mut is_loading = use_signal(|| true);
    let mut error: Signal<Option<String>> = use_signal(|| None);

    let svc = story_service.clone();
    let id = StoryId::from(story_id.clone());
    use_effect(move || {
        let svc = svc.clone();
        let id = id.clone();
        spawn(async move {
            match svc.get_story(&id).await {
                Ok(story) => session.set(Some(PlaySession::start(story))),
                Err(e) => {
                    tracing::warn!(story_id = %id, error = %e, "Failed to load story for play");
                    error.set(Some(format!("Could not load story #{id}: {e}")));
                }
            }
            is_loading.set(false);
        });
    });

    let on_choose = move |index: usize| {
        let mut guard = session.write();
        if let Some(play) = guard.as_mut() {
            if let Err(e) = play.choose_option(index) {
                error.set(Some(format!("That choice leads nowhere: {e}")));
            }
        }
    };

    let screen = session.read().as_ref().map(PlayScreen::from_session);

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                BackToStories {}
                if let Some(screen) = screen.as_ref() {
                    h1 { "{screen.header}" }
                }
                Link {
                    class: "btn",
                    to: Route::EditorRoute { story_id: story_id.clone() },
                    "Edit"
                }
            }

            if let Some(message) = error.read().clone() {
                ErrorBanner {
                    message,
                    on_dismiss: move |_| error.set(None),
                }
            }

            if *is_loading.read() {
                LoadingMessage { label: "Loading story...".to_string() }
            } else if let Some(screen) = screen.as_ref() {
                div {
                    class: "breadcrumb",
                    for (i, node_id) in screen.path.iter().enumerate() {
                        span {
                            key: "{i}",
                            if i > 0 {
                                span { class: "muted", " > " }
                            }
                            button {
                                class: "btn btn-link",
                                onclick: {
                                    let node_id = node_id.clone();
                                    move |_| {
                                        if let Some(play) = session.write().as_mut() {
                                            if let Err(e) = play.jump_to(&node_id) {
                                                error.set(Some(e.to_string()));
                                            }
                                        }
                                    }
                                },
                                "{node_id}"
                            }
                        }
                    }
                }

                div { class: "panel node-content", "{screen.content}" }

                if let Some((heading, message, win)) = screen.ending {
                    div {
                        class: if win { "outcome outcome-win" } else { "outcome outcome-loss" },
                        h2 { "{heading}" }
                        p { "{message}" }
                    }
                } else {
                    ChoiceList {
                        choices: screen.choices.clone(),
                        on_choose: on_choose,
                    }
                }

                div {
                    class: "columns",
                    button {
                        class: "btn",
                        disabled: !screen.can_go_back,
                        onclick: move |_| {
                            if let Some(play) = session.write().as_mut() {
                                play.back();
                            }
                        },
                        "Back"
                    }
                    button {
                        class: "btn",
                        onclick: move |_| {
                            if let Some(play) = session.write().as_mut() {
                                play.restart();
                            }
                            error.set(None);
                        },
                        "Restart"
                    }
                }
            }
        }
    }
}
