//! Story list view: browse, generate and delete stories

use dioxus::prelude::*;
use storyloom_domain::StoryId;
use storyloom_shared::StoryListItem;

use crate::application::services::job_outcome;
use crate::ui::presentation::components::common::{ErrorBanner, LoadingMessage, NoticeBanner};
use crate::ui::presentation::services::{use_client_config, use_story_service};
use crate::ui::presentation::utils::{job_summary, last_updated};
use crate::ui::routes::Route;

#[component]
pub fn StoryListView() -> Element {
    let story_service = use_story_service();
    let config = use_client_config();
    let navigator = use_navigator();

    let mut stories: Signal<Vec<StoryListItem>> = use_signal(Vec::new);
    let mut is_loading = use_signal(|| true);
    let mut error: Signal<Option<String>> = use_signal(|| None);
    // Bumped to re-fetch the list
    let mut reload = use_signal(|| 0u32);
    let mut confirm_delete: Signal<Option<StoryId>> = use_signal(|| None);

    let mut theme = use_signal(String::new);
    let mut job_line: Signal<Option<String>> = use_signal(|| None);
    let mut is_generating = use_signal(|| false);

    let svc = story_service.clone();
    use_effect(move || {
        let _ = reload();
        let svc = svc.clone();
        is_loading.set(true);
        spawn(async move {
            match svc.list_stories().await {
                Ok(list) => stories.set(list.stories),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to load stories");
                    error.set(Some(format!("Could not load stories: {e}")));
                }
            }
            is_loading.set(false);
        });
    });

    let generate_svc = story_service.clone();
    let on_generate = move |_: MouseEvent| {
        let requested = theme.read().trim().to_string();
        if requested.is_empty() || *is_generating.read() {
            return;
        }
        let svc = generate_svc.clone();
        let poll_interval = config.job_poll_interval;
        is_generating.set(true);
        error.set(None);
        spawn(async move {
            let result = match svc.create_story(&requested).await {
                Ok(job) => {
                    job_line.set(Some(job_summary(&job)));
                    svc.wait_for_job(job, poll_interval, |next| {
                        job_line.set(Some(job_summary(next)));
                    })
                    .await
                }
                Err(e) => Err(e),
            };
            is_generating.set(false);

            match result.map(|job| job_outcome(&job)) {
                Ok(Ok(Some(story_id))) => {
                    theme.set(String::new());
                    navigator.push(Route::PlayRoute {
                        story_id: story_id.to_string(),
                    });
                }
                Ok(Ok(None)) => reload += 1,
                Ok(Err(reason)) => error.set(Some(format!("Story generation failed: {reason}"))),
                Err(e) => error.set(Some(format!("Story generation failed: {e}"))),
            }
        });
    };

    let delete_svc = story_service.clone();
    let on_delete = move |story_id: StoryId| {
        let svc = delete_svc.clone();
        confirm_delete.set(None);
        spawn(async move {
            match svc.delete_story(&story_id).await {
                Ok(()) => reload += 1,
                Err(e) => error.set(Some(format!("Could not delete story #{story_id}: {e}"))),
            }
        });
    };

    let rows = stories.read().clone();
    let pending_delete = confirm_delete.read().clone();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h1 { "Stories" }
                button {
                    class: "btn",
                    onclick: move |_| reload += 1,
                    "Refresh"
                }
            }

            if let Some(message) = error.read().clone() {
                ErrorBanner {
                    message,
                    on_dismiss: move |_| error.set(None),
                }
            }

            div {
                class: "panel",
                h2 { "New story" }
                input {
                    class: "input",
                    placeholder: "Theme, e.g. pirates on a frozen sea",
                    value: "{theme}",
                    disabled: *is_generating.read(),
                    oninput: move |e| theme.set(e.value()),
                }
                button {
                    class: "btn btn-primary",
                    disabled: *is_generating.read() || theme.read().trim().is_empty(),
                    onclick: on_generate,
                    if *is_generating.read() { "Generating..." } else { "Generate" }
                }
                if let Some(line) = job_line.read().clone() {
                    NoticeBanner { message: line }
                }
            }

            if *is_loading.read() {
                LoadingMessage { label: "Loading stories...".to_string() }
            } else if rows.is_empty() {
                p { class: "muted", "No stories yet. Generate one above." }
            } else {
                table {
                    class: "story-table",
                    thead {
                        tr {
                            th { "#" }
                            th { "Title" }
                            th { "Status" }
                            th { "Nodes" }
                            th { "Updated" }
                            th {}
                        }
                    }
                    tbody {
                        for item in rows.iter() {
                            tr {
                                key: "{item.id}",
                                td { "{item.id}" }
                                td { "{item.title}" }
                                td { "{item.status}" }
                                td { "{item.node_count}" }
                                td { {last_updated(item)} }
                                td {
                                    Link {
                                        class: "btn",
                                        to: Route::PlayRoute { story_id: item.id.to_string() },
                                        "Play"
                                    }
                                    Link {
                                        class: "btn",
                                        to: Route::EditorRoute { story_id: item.id.to_string() },
                                        "Edit"
                                    }
                                    if pending_delete.as_ref() == Some(&item.id) {
                                        button {
                                            class: "btn btn-danger",
                                            onclick: {
                                                let story_id = item.id.clone();
                                                let mut on_delete = on_delete.clone();
                                                move |_| on_delete(story_id.clone())
                                            },
                                            "Confirm delete"
                                        }
                                        button {
                                            class: "btn btn-link",
                                            onclick: move |_| confirm_delete.set(None),
                                            "Keep"
                                        }
                                    } else {
                                        button {
                                            class: "btn btn-danger",
                                            onclick: {
                                                let story_id = item.id.clone();
                                                move |_| confirm_delete.set(Some(story_id.clone()))
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
