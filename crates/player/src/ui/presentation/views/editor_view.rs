//! Editor view: browse the story tree and edit one node at a time
//!
//! Local draft edits change the session in place. Server actions run on a
//! copy of the session that replaces the original once the request settles,
//! so the view never holds a signal borrow across an await.

use dioxus::prelude::*;
use storyloom_domain::{DomainError, NodeId, StoryId};

use crate::application::{Applied, EditorSession, SessionError};
use crate::ui::presentation::components::common::{
    BackToStories, ErrorBanner, LoadingMessage, NoticeBanner,
};
use crate::ui::presentation::components::draft_option::{
    target_items, DraftOptionItem, DraftOptionRow, TargetItem,
};
use crate::ui::presentation::components::story_tree::{
    tree_items, unreachable_items, StoryTree, TreeItem,
};
use crate::ui::presentation::services::use_story_service;
use crate::ui::presentation::utils::{ending_badge, story_header};
use crate::ui::routes::Route;

// =============================================================================
// View model
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedNode {
    pub id: NodeId,
    pub is_root: bool,
    pub badge: Option<&'static str>,
    /// Saved content, shown outside edit mode
    pub content: String,
    /// Saved options as `(text, target)`
    pub options: Vec<(String, Option<NodeId>)>,
    pub editing: bool,
    pub draft_content: String,
    pub draft_options: Vec<DraftOptionItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorScreen {
    pub header: String,
    pub title: String,
    pub tree: Vec<TreeItem>,
    pub unreachable: Vec<TreeItem>,
    pub broken_links: usize,
    pub targets: Vec<TargetItem>,
    pub selected: Option<SelectedNode>,
    pub stale: bool,
}

impl EditorScreen {
    pub fn from_session(session: &EditorSession) -> Self {
        let document = session.document();
        let rows = session.tree();
        let selected_id = session.selected_node_id();

        let selected = session.selected_node().map(|node| SelectedNode {
            id: node.id.clone(),
            is_root: &node.id == document.root_id(),
            badge: ending_badge(node),
            content: node.content.clone(),
            options: node
                .options
                .iter()
                .map(|option| (option.text.clone(), option.node_id.clone()))
                .collect(),
            editing: session.is_editing(),
            draft_content: session.draft_content().to_string(),
            draft_options: session
                .draft_options()
                .iter()
                .map(|option| DraftOptionItem::new(document, option))
                .collect(),
        });

        Self {
            header: story_header(document),
            title: document.title().to_string(),
            tree: tree_items(document, &rows, selected_id),
            unreachable: unreachable_items(document, &rows, selected_id),
            broken_links: session.dangling_links().len(),
            targets: target_items(document),
            selected,
            stale: session.is_stale(),
        }
    }
}

// =============================================================================
// Server actions
// =============================================================================

/// A change the editor sends to the server.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    Save,
    AddChild { parent: NodeId, content: String },
    Delete(NodeId),
    Rename(String),
    Refresh,
}

impl EditorAction {
    /// Runs the action and returns the notice to show.
    pub async fn apply(self, session: &mut EditorSession) -> Result<String, SessionError> {
        match self {
            Self::Save => {
                session.save_node().await?;
                Ok("Node saved.".to_string())
            }
            Self::AddChild { parent, content } => {
                let created = session.create_child_node(&parent, &content).await?;
                if !created.is_stale() {
                    if let Err(e) = session.select(&created.value) {
                        tracing::debug!(
                            node_id = %created.value,
                            error = %e,
                            "New node missing after reload"
                        );
                    }
                }
                Ok(with_stale_note(
                    format!("Created node #{}.", created.value),
                    &created,
                ))
            }
            Self::Delete(node_id) => {
                let deleted = session.delete_node(&node_id).await?;
                Ok(with_stale_note(format!("Deleted node #{node_id}."), &deleted))
            }
            Self::Rename(title) => {
                session.rename_story(&title).await?;
                Ok("Story renamed.".to_string())
            }
            Self::Refresh => {
                session.refresh().await?;
                Ok("Story reloaded.".to_string())
            }
        }
    }
}

fn target_label(target: Option<&NodeId>) -> String {
    match target {
        Some(id) => format!(" -> #{id}"),
        None => " (unlinked)".to_string(),
    }
}

fn with_stale_note<T>(message: String, applied: &Applied<T>) -> String {
    match &applied.refresh_error {
        Some(err) => format!("{message} Could not reload the story ({err}). Press Refresh."),
        None => message,
    }
}

/// Signals shared by the editor and its node panel.
#[derive(Clone, Copy, PartialEq)]
pub struct EditorSignals {
    pub session: Signal<Option<EditorSession>>,
    pub busy: Signal<bool>,
    pub error: Signal<Option<String>>,
    pub notice: Signal<Option<String>>,
}

impl EditorSignals {
    /// Applies a local edit in place.
    pub fn local(mut self, edit: impl FnOnce(&mut EditorSession) -> Result<(), DomainError>) {
        let result = match self.session.write().as_mut() {
            Some(session) => edit(session),
            None => Ok(()),
        };
        if let Err(e) = result {
            self.error.set(Some(e.to_string()));
        }
    }

    /// Runs a server action unless one is already in flight.
    pub fn run(mut self, action: EditorAction) {
        if *self.busy.peek() {
            return;
        }
        let Some(mut working) = self.session.peek().as_ref().cloned() else {
            return;
        };
        self.busy.set(true);
        self.error.set(None);
        self.notice.set(None);

        spawn(async move {
            let result = action.apply(&mut working).await;
            self.session.set(Some(working));
            match result {
                Ok(message) => self.notice.set(Some(message)),
                Err(e) => {
                    tracing::warn!(error = %e, "Editor action failed");
                    self.error.set(Some(e.to_string()));
                }
            }
            self.busy.set(false);
        });
    }
}

// =============================================================================
// Components
// =============================================================================

#[component]
pub fn EditorView(story_id: String) -> Element {
    let story_service = use_story_service();

    let signals = EditorSignals {
        session: use_signal(|| None),
        busy: use_signal(|| false),
        error: use_signal(|| None),
        notice: use_signal(|| None),
    };
    let mut is_loading = use_signal(|| true);
    let mut title_draft = use_signal(String::new);

    let svc = story_service.clone();
    let id = StoryId::from(story_id.clone());
    use_effect(move || {
        let svc = svc.clone();
        let id = id.clone();
        let mut signals = signals;
        spawn(async move {
            match EditorSession::open(svc, &id).await {
                Ok(session) => {
                    title_draft.set(session.document().title().to_string());
                    signals.session.set(Some(session));
                }
                Err(e) => {
                    tracing::warn!(story_id = %id, error = %e, "Failed to open story for editing");
                    signals.error.set(Some(format!("Could not load story #{id}: {e}")));
                }
            }
            is_loading.set(false);
        });
    });

    let screen = signals.session.read().as_ref().map(EditorScreen::from_session);
    let busy = *signals.busy.read();
    let mut error = signals.error;

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
                    to: Route::PlayRoute { story_id: story_id.clone() },
                    "Play"
                }
                button {
                    class: "btn",
                    disabled: busy || screen.is_none(),
                    onclick: move |_| signals.run(EditorAction::Refresh),
                    "Refresh"
                }
            }

            if let Some(message) = error.read().clone() {
                ErrorBanner {
                    message,
                    on_dismiss: move |_| error.set(None),
                }
            }
            if let Some(message) = signals.notice.read().clone() {
                NoticeBanner { message }
            }

            if *is_loading.read() {
                LoadingMessage { label: "Loading story...".to_string() }
            } else if let Some(screen) = screen.as_ref() {
                if screen.stale {
                    div {
                        class: "banner banner-notice",
                        "This view may be out of date. Press Refresh to reload the story."
                    }
                }
                if screen.broken_links > 0 {
                    p { class: "muted broken", "{screen.broken_links} broken link(s)" }
                }

                div {
                    class: "panel",
                    input {
                        class: "input",
                        value: "{title_draft}",
                        disabled: busy,
                        oninput: move |e| title_draft.set(e.value()),
                    }
                    button {
                        class: "btn",
                        disabled: busy || title_draft.read().trim() == screen.title,
                        onclick: move |_| signals.run(EditorAction::Rename(title_draft.read().clone())),
                        "Rename"
                    }
                }

                div {
                    class: "columns",
                    StoryTree {
                        items: screen.tree.clone(),
                        unreachable: screen.unreachable.clone(),
                        on_select: move |node_id: NodeId| {
                            if !busy {
                                signals.local(|session| session.select(&node_id));
                            }
                        },
                    }
                    if let Some(node) = screen.selected.clone() {
                        NodeEditor {
                            key: "{node.id}",
                            node,
                            targets: screen.targets.clone(),
                            busy,
                            signals,
                        }
                    } else {
                        div { class: "panel muted", "Select a node to edit it." }
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct NodeEditorProps {
    pub node: SelectedNode,
    pub targets: Vec<TargetItem>,
    pub busy: bool,
    pub signals: EditorSignals,
}

#[component]
pub fn NodeEditor(props: NodeEditorProps) -> Element {
    let signals = props.signals;
    let busy = props.busy;
    let node = props.node.clone();
    let mut new_option = use_signal(String::new);
    let mut child_content = use_signal(String::new);
    let mut confirm_delete = use_signal(|| false);

    let node_id = node.id.clone();
    let parent_id = node.id.clone();

    rsx! {
        div {
            class: "panel",
            h2 {
                "Node #{node.id}"
                if let Some(badge) = node.badge {
                    span { class: "muted", " ({badge})" }
                }
            }

            if node.editing {
                textarea {
                    class: "textarea",
                    value: "{node.draft_content}",
                    disabled: busy,
                    oninput: move |e| {
                        let content = e.value();
                        signals.local(|session| {
                            session.set_draft_content(content);
                            Ok(())
                        });
                    },
                }
                for (index, item) in node.draft_options.iter().enumerate() {
                    DraftOptionRow {
                        key: "{index}",
                        index,
                        item: item.clone(),
                        targets: props.targets.clone(),
                        editable: !busy,
                        on_text: move |(index, text): (usize, String)| {
                            signals.local(|session| session.set_draft_option_text(index, text));
                        },
                        on_link: move |(index, target): (usize, Option<NodeId>)| {
                            signals.local(|session| session.link_draft_option(index, target));
                        },
                        on_remove: move |index: usize| {
                            signals.local(|session| session.remove_draft_option(index).map(|_| ()));
                        },
                    }
                }
                div {
                    class: "option-row",
                    input {
                        class: "input",
                        placeholder: "New option",
                        value: "{new_option}",
                        disabled: busy,
                        oninput: move |e| new_option.set(e.value()),
                    }
                    button {
                        class: "btn",
                        disabled: busy,
                        onclick: move |_| {
                            let text = new_option.read().clone();
                            signals.local(|session| {
                                if session.add_draft_option(&text) {
                                    Ok(())
                                } else {
                                    Err(DomainError::validation("Option text cannot be empty"))
                                }
                            });
                            new_option.set(String::new());
                        },
                        "Add option"
                    }
                }
                div {
                    class: "columns",
                    button {
                        class: "btn btn-primary",
                        disabled: busy,
                        onclick: move |_| signals.run(EditorAction::Save),
                        "Save"
                    }
                    button {
                        class: "btn",
                        disabled: busy,
                        onclick: move |_| signals.local(|session| {
                            session.cancel_edit();
                            Ok(())
                        }),
                        "Cancel"
                    }
                }
            } else {
                div { class: "node-content", "{node.content}" }
                ul {
                    for (text, target) in node.options.iter() {
                        li {
                            class: "option-row",
                            "{text}"
                            span { class: "muted", {target_label(target.as_ref())} }
                        }
                    }
                }
                div {
                    class: "columns",
                    button {
                        class: "btn",
                        disabled: busy,
                        onclick: move |_| signals.local(|session| session.enter_edit_mode()),
                        "Edit"
                    }
                    if !node.is_root {
                        if *confirm_delete.read() {
                            button {
                                class: "btn btn-danger",
                                disabled: busy,
                                onclick: move |_| {
                                    confirm_delete.set(false);
                                    signals.run(EditorAction::Delete(node_id.clone()));
                                },
                                "Confirm delete"
                            }
                            button {
                                class: "btn btn-link",
                                onclick: move |_| confirm_delete.set(false),
                                "Keep"
                            }
                        } else {
                            button {
                                class: "btn btn-danger",
                                disabled: busy,
                                onclick: move |_| confirm_delete.set(true),
                                "Delete"
                            }
                        }
                    }
                }
                div {
                    class: "option-row",
                    input {
                        class: "input",
                        placeholder: "Content of a new child node",
                        value: "{child_content}",
                        disabled: busy,
                        oninput: move |e| child_content.set(e.value()),
                    }
                    button {
                        class: "btn",
                        disabled: busy || child_content.read().trim().is_empty(),
                        onclick: move |_| {
                            let content = child_content.read().clone();
                            child_content.set(String::new());
                            signals.run(EditorAction::AddChild {
                                parent: parent_id.clone(),
                                content,
                            });
                        },
                        "Add child"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use storyloom_domain::StoryNode;

    use super::*;
    use crate::application::{Api, StoryService};
    use crate::infrastructure::testing::fixtures;
    use crate::ports::outbound::{ApiError, MockRawApiPort};

    fn id(raw: &str) -> NodeId {
        NodeId::from(raw)
    }

    fn session(raw: MockRawApiPort) -> EditorSession {
        let service = StoryService::new(Api::new(Arc::new(raw)));
        EditorSession::with_document(service, fixtures::crossroads_story())
    }

    #[test]
    fn screen_reflects_selection_and_drafts() {
        let mut session = session(MockRawApiPort::new());
        session.select(&id("B")).unwrap();
        session.enter_edit_mode().unwrap();
        session.link_draft_option(0, Some(id("C"))).unwrap();

        let screen = EditorScreen::from_session(&session);
        let node = screen.selected.unwrap();

        assert_eq!(screen.title, "Crossroads");
        assert_eq!(screen.tree.len(), 4);
        assert!(screen.unreachable.is_empty());
        assert_eq!(screen.broken_links, 0);
        assert_eq!(screen.targets.len(), 4);
        assert!(!screen.stale);
        assert_eq!(node.id, id("B"));
        assert!(!node.is_root);
        assert!(node.editing);
        assert_eq!(
            node.options,
            vec![("Go deeper".to_string(), Some(id("D")))]
        );
        assert_eq!(node.draft_options[0].target, Some(id("C")));
    }

    #[tokio::test]
    async fn delete_reports_reload_failure() {
        let mut raw = MockRawApiPort::new();
        raw.expect_delete()
            .withf(|path| path == "/stories/1/nodes/C")
            .times(1)
            .returning(|_| Ok(()));
        raw.expect_get_json()
            .times(1)
            .returning(|_| Err(ApiError::Network("connection reset".into())));
        let mut session = session(raw);

        let notice = EditorAction::Delete(id("C"))
            .apply(&mut session)
            .await
            .unwrap();

        assert!(notice.starts_with("Deleted node #C."));
        assert!(notice.contains("Could not reload the story"));
        let screen = EditorScreen::from_session(&session);
        assert!(screen.stale);
        assert_eq!(screen.broken_links, 1);
    }

    #[tokio::test]
    async fn add_child_selects_the_new_node() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, _| path == "/stories/1/nodes")
            .times(1)
            .returning(|_, _| Ok(json!({"node_id": "E"})));
        let updated = fixtures::story_json(
            &fixtures::crossroads_story().with_node(StoryNode::new("E", "A tall tree")),
        );
        raw.expect_get_json()
            .times(1)
            .returning(move |_| Ok(updated.clone()));
        let mut session = session(raw);

        let notice = EditorAction::AddChild {
            parent: id("B"),
            content: "A tall tree".to_string(),
        }
        .apply(&mut session)
        .await
        .unwrap();

        assert_eq!(notice, "Created node #E.");
        assert_eq!(session.selected_node_id(), Some(&id("E")));
        assert!(!EditorScreen::from_session(&session).stale);
    }

    #[tokio::test]
    async fn failed_save_keeps_drafts() {
        let mut raw = MockRawApiPort::new();
        raw.expect_put_json()
            .times(1)
            .returning(|_, _| Err(ApiError::http(500, "server error")));
        let mut session = session(raw);
        session.enter_edit_mode().unwrap();
        session.set_draft_content("A foggy crossroads.");

        let err = EditorAction::Save.apply(&mut session).await.unwrap_err();

        assert_eq!(err.to_string(), "HTTP error 500: server error");
        let node = EditorScreen::from_session(&session).selected.unwrap();
        assert!(node.editing);
        assert_eq!(node.draft_content, "A foggy crossroads.");
        assert_eq!(node.content, "You stand at a crossroads.");
    }
}
