//! Editor Session - selecting, editing and restructuring story nodes
//!
//! The session keeps a server-confirmed snapshot of the story plus draft
//! fields for the selected node. Drafts only reach the snapshot through a
//! successful save; structural changes (create, delete) re-fetch the whole
//! story instead of patching it locally. Once the server has accepted a
//! structural change, a failed re-fetch no longer fails the change: it is
//! reported on the returned [`Applied`] and the snapshot is marked stale.

use storyloom_domain::common::{is_blank, trimmed_non_empty};
use storyloom_domain::{
    render_tree, resolve, DanglingLink, DomainError, NodeId, Story, StoryId, StoryNode,
    StoryOption, TreeRow,
};
use storyloom_shared::{CreateNodeRequest, UpdateNodeRequest};

use crate::application::error::SessionError;
use crate::application::services::StoryService;

/// A structural change the server has accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied<T> {
    pub value: T,
    /// Why the follow-up re-fetch failed, if it did
    pub refresh_error: Option<SessionError>,
}

impl<T> Applied<T> {
    pub fn is_stale(&self) -> bool {
        self.refresh_error.is_some()
    }
}

#[derive(Clone)]
pub struct EditorSession {
    service: StoryService,
    document: Story,
    selected: Option<NodeId>,
    draft_content: String,
    draft_options: Vec<StoryOption>,
    edit_mode: bool,
    /// Set when the snapshot missed a change the server applied
    stale: bool,
}

impl EditorSession {
    /// Fetches the story and selects its root node.
    pub async fn open(service: StoryService, story_id: &StoryId) -> Result<Self, SessionError> {
        let document = service.get_story(story_id).await?;
        tracing::info!(story_id = %story_id, nodes = document.node_count(), "Editor session opened");
        Ok(Self::with_document(service, document))
    }

    /// Starts from an already-fetched story with the root selected.
    pub fn with_document(service: StoryService, document: Story) -> Self {
        let mut session = Self {
            service,
            selected: Some(document.root_id().clone()),
            document,
            draft_content: String::new(),
            draft_options: Vec::new(),
            edit_mode: false,
            stale: false,
        };
        session.load_drafts();
        session
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn story_id(&self) -> &StoryId {
        self.document.id()
    }

    pub fn document(&self) -> &Story {
        &self.document
    }

    pub fn selected_node_id(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn selected_node(&self) -> Option<&StoryNode> {
        self.selected.as_ref().and_then(|id| self.document.get(id))
    }

    pub fn draft_content(&self) -> &str {
        &self.draft_content
    }

    pub fn draft_options(&self) -> &[StoryOption] {
        &self.draft_options
    }

    pub fn is_editing(&self) -> bool {
        self.edit_mode
    }

    /// Whether the snapshot may lag behind the server until the next refresh.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn tree(&self) -> Vec<TreeRow> {
        render_tree(&self.document)
    }

    pub fn dangling_links(&self) -> Vec<DanglingLink> {
        self.document.dangling_links()
    }

    // =========================================================================
    // Selection and drafts
    // =========================================================================

    /// Selects a node, loads its drafts and leaves edit mode.
    pub fn select(&mut self, node_id: &NodeId) -> Result<(), DomainError> {
        let node = resolve(&self.document, node_id)?;
        self.selected = Some(node.id.clone());
        self.load_drafts();
        self.edit_mode = false;
        Ok(())
    }

    pub fn enter_edit_mode(&mut self) -> Result<(), DomainError> {
        if self.selected.is_none() {
            return Err(DomainError::validation("No node selected"));
        }
        self.edit_mode = true;
        Ok(())
    }

    /// Discards drafts and reloads them from the selected node.
    pub fn cancel_edit(&mut self) {
        self.load_drafts();
        self.edit_mode = false;
    }

    pub fn set_draft_content(&mut self, content: impl Into<String>) {
        self.draft_content = content.into();
    }

    /// Appends an unlinked option. Blank text is ignored and returns `false`.
    pub fn add_draft_option(&mut self, text: &str) -> bool {
        match trimmed_non_empty(text) {
            Some(text) => {
                self.draft_options.push(StoryOption::unlinked(text));
                true
            }
            None => false,
        }
    }

    pub fn remove_draft_option(&mut self, index: usize) -> Result<StoryOption, DomainError> {
        self.check_option_index(index)?;
        Ok(self.draft_options.remove(index))
    }

    pub fn set_draft_option_text(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.check_option_index(index)?;
        self.draft_options[index].text = text.into();
        Ok(())
    }

    /// Points a draft option at `target`, or unlinks it with `None`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` for a bad index, `NotFound` if the target is not in the story.
    pub fn link_draft_option(
        &mut self,
        index: usize,
        target: Option<NodeId>,
    ) -> Result<(), DomainError> {
        self.check_option_index(index)?;
        if let Some(target) = &target {
            resolve(&self.document, target)?;
        }
        self.draft_options[index].node_id = target;
        Ok(())
    }

    // =========================================================================
    // Server mutations
    // =========================================================================

    /// Sends the drafts for the selected node and adopts the server's copy.
    ///
    /// On any error the drafts and edit mode are left as they were.
    pub async fn save_node(&mut self) -> Result<(), SessionError> {
        let node_id = self
            .selected
            .clone()
            .ok_or_else(|| DomainError::validation("No node selected"))?;
        if is_blank(&self.draft_content) {
            return Err(DomainError::validation("Node content cannot be empty").into());
        }

        let request = UpdateNodeRequest {
            content: self.draft_content.clone(),
            options: self.draft_options.clone(),
        };
        let saved = self
            .service
            .update_node(self.document.id(), &node_id, &request)
            .await?;
        if saved.id != node_id {
            return Err(DomainError::parse(format!(
                "server returned node {} for an update of {}",
                saved.id, node_id
            ))
            .into());
        }

        self.document.replace_node(saved)?;
        self.load_drafts();
        self.edit_mode = false;
        tracing::info!(story_id = %self.document.id(), node_id = %node_id, "Saved story node");
        Ok(())
    }

    /// Creates a child under `parent` and re-fetches the story.
    ///
    /// # Returns
    /// The id the server assigned to the new node, even when the re-fetch
    /// afterwards failed.
    pub async fn create_child_node(
        &mut self,
        parent: &NodeId,
        content: &str,
    ) -> Result<Applied<NodeId>, SessionError> {
        let content = trimmed_non_empty(content)
            .ok_or_else(|| DomainError::validation("Node content cannot be empty"))?;
        resolve(&self.document, parent)?;

        let request = CreateNodeRequest::child_of(parent.clone(), content);
        let created = self.service.create_node(self.document.id(), &request).await?;
        tracing::info!(story_id = %self.document.id(), parent = %parent, node_id = %created, "Created story node");

        let refresh_error = self.refresh_after_change().await;
        Ok(Applied {
            value: created,
            refresh_error,
        })
    }

    /// Deletes a node and re-fetches the story.
    ///
    /// The root cannot be deleted. If the re-fetch fails the node is still
    /// dropped from the snapshot, since the server has confirmed it is gone.
    pub async fn delete_node(&mut self, node_id: &NodeId) -> Result<Applied<()>, SessionError> {
        if node_id == self.document.root_id() {
            return Err(DomainError::validation("The root node cannot be deleted").into());
        }
        resolve(&self.document, node_id)?;

        self.service.delete_node(self.document.id(), node_id).await?;
        tracing::info!(story_id = %self.document.id(), node_id = %node_id, "Deleted story node");
        if self.selected.as_ref() == Some(node_id) {
            self.selected = None;
            self.load_drafts();
            self.edit_mode = false;
        }

        let refresh_error = self.refresh_after_change().await;
        if refresh_error.is_some() && self.document.remove_node(node_id).is_err() {
            tracing::debug!(node_id = %node_id, "Deleted node already gone from the snapshot");
        }
        Ok(Applied {
            value: (),
            refresh_error,
        })
    }

    /// Updates the title; the server's stored title wins.
    pub async fn rename_story(&mut self, title: &str) -> Result<(), SessionError> {
        let title = trimmed_non_empty(title)
            .ok_or_else(|| DomainError::validation("Story title cannot be empty"))?;

        let updated = self.service.update_story(self.document.id(), &title).await?;
        tracing::info!(story_id = %self.document.id(), title = %updated.title, "Renamed story");
        self.document.set_title(updated.title);
        Ok(())
    }

    /// Re-fetches the story, keeping the selection if its node still exists.
    ///
    /// A failed fetch keeps the previous snapshot untouched.
    pub async fn refresh(&mut self) -> Result<(), SessionError> {
        let document = self.service.get_story(self.document.id()).await?;
        self.document = document;
        self.stale = false;

        if let Some(id) = self.selected.take() {
            if self.document.contains(&id) {
                self.selected = Some(id);
            } else {
                tracing::debug!(node_id = %id, "Selected node no longer exists");
            }
        }
        self.load_drafts();
        self.edit_mode = false;
        Ok(())
    }

    async fn refresh_after_change(&mut self) -> Option<SessionError> {
        match self.refresh().await {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(story_id = %self.document.id(), error = %err, "Change applied but the story could not be re-fetched");
                self.stale = true;
                Some(err)
            }
        }
    }

    fn load_drafts(&mut self) {
        match self.selected.as_ref().and_then(|id| self.document.get(id)) {
            Some(node) => {
                self.draft_content = node.content.clone();
                self.draft_options = node.options.clone();
            }
            None => {
                self.draft_content.clear();
                self.draft_options.clear();
            }
        }
    }

    fn check_option_index(&self, index: usize) -> Result<(), DomainError> {
        if index >= self.draft_options.len() {
            return Err(DomainError::out_of_range(index, self.draft_options.len()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use storyloom_domain::TreeEntry;

    use super::*;
    use crate::application::api::Api;
    use crate::infrastructure::testing::fixtures;
    use crate::ports::outbound::{ApiError, MockRawApiPort};

    fn id(raw: &str) -> NodeId {
        NodeId::from(raw)
    }

    fn session(raw: MockRawApiPort) -> EditorSession {
        let service = StoryService::new(Api::new(Arc::new(raw)));
        EditorSession::with_document(service, fixtures::crossroads_story())
    }

    #[tokio::test]
    async fn open_selects_root() {
        let mut raw = MockRawApiPort::new();
        let doc = fixtures::crossroads_json();
        raw.expect_get_json()
            .withf(|path| path == "/stories/1")
            .times(1)
            .returning(move |_| Ok(doc.clone()));

        let service = StoryService::new(Api::new(Arc::new(raw)));
        let session = EditorSession::open(service, &StoryId::from(1)).await.unwrap();

        assert_eq!(session.selected_node_id(), Some(&id("A")));
        assert_eq!(session.draft_content(), "You stand at a crossroads.");
        assert_eq!(session.draft_options().len(), 2);
        assert!(!session.is_editing());
    }

    #[test]
    fn blank_option_is_ignored_and_removal_empties_list() {
        let mut session = session(MockRawApiPort::new());
        session.select(&id("C")).unwrap();
        assert!(session.draft_options().is_empty());

        assert!(!session.add_draft_option(""));
        assert!(!session.add_draft_option("   "));
        assert!(session.draft_options().is_empty());

        assert!(session.add_draft_option("Go right"));
        assert_eq!(
            session.draft_options(),
            &[StoryOption::unlinked("Go right")]
        );
        session.remove_draft_option(0).unwrap();
        assert!(session.draft_options().is_empty());
    }

    #[test]
    fn remove_out_of_range() {
        let mut session = session(MockRawApiPort::new());
        assert_eq!(
            session.remove_draft_option(5),
            Err(DomainError::out_of_range(5, 2))
        );
        assert_eq!(session.draft_options().len(), 2);
    }

    #[test]
    fn select_unknown_node_keeps_state() {
        let mut session = session(MockRawApiPort::new());
        session.enter_edit_mode().unwrap();
        session.set_draft_content("Half-written");

        assert!(session.select(&id("Z")).unwrap_err().is_not_found());
        assert_eq!(session.selected_node_id(), Some(&id("A")));
        assert_eq!(session.draft_content(), "Half-written");
        assert!(session.is_editing());
    }

    #[test]
    fn cancel_edit_restores_confirmed_node() {
        let mut session = session(MockRawApiPort::new());
        session.enter_edit_mode().unwrap();
        session.set_draft_content("Scrapped");
        session.set_draft_option_text(0, "Turn left").unwrap();
        session.link_draft_option(1, None).unwrap();

        session.cancel_edit();

        let root = session.document().root().clone();
        assert_eq!(session.draft_content(), root.content);
        assert_eq!(session.draft_options(), root.options.as_slice());
        assert!(!session.is_editing());
    }

    #[test]
    fn link_draft_option_requires_known_target() {
        let mut session = session(MockRawApiPort::new());
        assert!(session
            .link_draft_option(0, Some(id("Z")))
            .unwrap_err()
            .is_not_found());

        session.link_draft_option(0, Some(id("D"))).unwrap();
        assert_eq!(session.draft_options()[0].node_id, Some(id("D")));
    }

    #[tokio::test]
    async fn save_failure_leaves_drafts_and_edit_mode() {
        let mut raw = MockRawApiPort::new();
        raw.expect_put_json()
            .times(1)
            .returning(|_, _| Err(ApiError::http(500, "server error")));
        let mut session = session(raw);
        session.enter_edit_mode().unwrap();
        session.set_draft_content("A foggy crossroads.");

        let err = session.save_node().await.unwrap_err();

        assert_eq!(err, SessionError::Api(ApiError::http(500, "server error")));
        assert_eq!(session.draft_content(), "A foggy crossroads.");
        assert!(session.is_editing());
        assert_eq!(session.document(), &fixtures::crossroads_story());
    }

    #[tokio::test]
    async fn save_replaces_node_with_server_copy() {
        let mut raw = MockRawApiPort::new();
        raw.expect_put_json()
            .withf(|path, body| {
                path == "/stories/1/nodes/B"
                    && body["content"] == json!("A dark forest path.")
                    && body["options"] == json!([{"text": "Go deeper", "node_id": "D"}])
            })
            .times(1)
            .returning(|_, body| {
                Ok(json!({
                    "id": "B",
                    "content": body["content"].clone(),
                    "is_ending": false,
                    "is_winning_ending": false,
                    "options": body["options"].clone(),
                }))
            });
        let mut session = session(raw);
        session.select(&id("B")).unwrap();
        session.enter_edit_mode().unwrap();
        session.set_draft_content("A dark forest path.");

        session.save_node().await.unwrap();

        assert!(!session.is_editing());
        assert_eq!(
            session.document().get(&id("B")).unwrap().content,
            "A dark forest path."
        );
        assert_eq!(session.draft_content(), "A dark forest path.");
    }

    #[tokio::test]
    async fn save_rejects_blank_content_without_request() {
        let mut session = session(MockRawApiPort::new());
        session.enter_edit_mode().unwrap();
        session.set_draft_content("  ");

        let err = session.save_node().await.unwrap_err();
        assert!(matches!(err, SessionError::Domain(DomainError::Validation(_))));
        assert!(session.is_editing());
    }

    #[tokio::test]
    async fn create_child_refetches_story() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, body| {
                path == "/stories/1/nodes"
                    && body["parent_node_id"] == json!("B")
                    && body["content"] == json!("A hidden cave.")
            })
            .times(1)
            .returning(|_, _| Ok(json!({"message": "created", "node_id": "E"})));
        let updated = fixtures::crossroads_story()
            .with_node(StoryNode::new("E", "A hidden cave."));
        let mut doc = fixtures::story_json(&updated);
        doc["all_nodes"]["B"]["options"]
            .as_array_mut()
            .unwrap()
            .push(json!({"text": "Explore", "node_id": "E"}));
        raw.expect_get_json()
            .withf(|path| path == "/stories/1")
            .times(1)
            .returning(move |_| Ok(doc.clone()));
        let mut session = session(raw);

        let created = session
            .create_child_node(&id("B"), "  A hidden cave. ")
            .await
            .unwrap();

        assert_eq!(created.value, id("E"));
        assert!(!created.is_stale());
        assert!(!session.is_stale());
        assert!(session.document().contains(&id("E")));
        assert!(session
            .tree()
            .iter()
            .any(|row| row.entry == TreeEntry::Node(id("E"))));
        assert_eq!(session.selected_node_id(), Some(&id("A")));
    }

    #[tokio::test]
    async fn create_child_validates_locally() {
        let mut session = session(MockRawApiPort::new());

        let blank = session.create_child_node(&id("A"), " ").await.unwrap_err();
        assert!(matches!(blank, SessionError::Domain(DomainError::Validation(_))));

        let orphan = session.create_child_node(&id("Z"), "Text").await.unwrap_err();
        assert!(orphan.is_not_found());
    }

    #[tokio::test]
    async fn delete_clears_selection_and_refetches() {
        let mut raw = MockRawApiPort::new();
        raw.expect_delete()
            .withf(|path| path == "/stories/1/nodes/C")
            .times(1)
            .returning(|_| Ok(()));
        let without_c = Story::new(
            1,
            "Crossroads",
            StoryNode::new("A", "You stand at a crossroads.")
                .with_option(StoryOption::linked("Go left", "B")),
        )
        .with_node(
            StoryNode::new("B", "A narrow forest path.")
                .with_option(StoryOption::linked("Go deeper", "D")),
        )
        .with_node(StoryNode::ending("D", "You find the treasure.", true));
        let doc = fixtures::story_json(&without_c);
        raw.expect_get_json()
            .times(1)
            .returning(move |_| Ok(doc.clone()));
        let mut session = session(raw);
        session.select(&id("C")).unwrap();

        let deleted = session.delete_node(&id("C")).await.unwrap();

        assert!(!deleted.is_stale());
        assert_eq!(session.selected_node_id(), None);
        assert_eq!(session.draft_content(), "");
        assert!(!session.document().contains(&id("C")));
    }

    #[tokio::test]
    async fn delete_root_is_rejected() {
        let mut session = session(MockRawApiPort::new());
        let err = session.delete_node(&id("A")).await.unwrap_err();
        assert!(matches!(err, SessionError::Domain(DomainError::Validation(_))));
        assert!(session.document().contains(&id("A")));
    }

    #[tokio::test]
    async fn rename_adopts_server_title() {
        let mut raw = MockRawApiPort::new();
        raw.expect_put_json()
            .withf(|path, body| path == "/stories/1" && *body == json!({"title": "The Fork"}))
            .times(1)
            .returning(|_, _| Ok(json!({"id": 1, "title": "The Fork (draft)"})));
        let mut session = session(raw);

        session.rename_story("  The Fork  ").await.unwrap();
        assert_eq!(session.document().title(), "The Fork (draft)");
    }

    #[tokio::test]
    async fn rename_rejects_blank_title() {
        let mut session = session(MockRawApiPort::new());
        let err = session.rename_story("\t").await.unwrap_err();
        assert!(matches!(err, SessionError::Domain(DomainError::Validation(_))));
        assert_eq!(session.document().title(), "Crossroads");
    }

    #[tokio::test]
    async fn failed_refresh_keeps_snapshot() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json()
            .times(1)
            .returning(|_| Err(ApiError::Network("connection refused".into())));
        let mut session = session(raw);
        session.select(&id("B")).unwrap();

        let err = session.refresh().await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(session.document(), &fixtures::crossroads_story());
        assert_eq!(session.selected_node_id(), Some(&id("B")));
    }

    #[tokio::test]
    async fn create_keeps_new_id_when_refetch_fails() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .times(1)
            .returning(|_, _| Ok(json!({"message": "created", "node_id": "E"})));
        raw.expect_get_json()
            .times(1)
            .returning(|_| Err(ApiError::Network("connection reset".into())));
        let mut session = session(raw);

        let created = session
            .create_child_node(&id("B"), "A hidden cave.")
            .await
            .unwrap();

        assert_eq!(created.value, id("E"));
        assert_eq!(
            created.refresh_error,
            Some(SessionError::Api(ApiError::Network("connection reset".into())))
        );
        assert!(session.is_stale());
        assert_eq!(session.document(), &fixtures::crossroads_story());
    }

    #[tokio::test]
    async fn delete_drops_node_locally_when_refetch_fails() {
        let mut raw = MockRawApiPort::new();
        raw.expect_delete()
            .withf(|path| path == "/stories/1/nodes/C")
            .times(1)
            .returning(|_| Ok(()));
        raw.expect_get_json()
            .times(1)
            .returning(|_| Err(ApiError::Network("connection reset".into())));
        let mut session = session(raw);
        session.select(&id("C")).unwrap();

        let deleted = session.delete_node(&id("C")).await.unwrap();

        assert!(deleted.is_stale());
        assert!(session.is_stale());
        assert_eq!(session.selected_node_id(), None);
        assert!(!session.document().contains(&id("C")));
        assert!(session
            .tree()
            .iter()
            .all(|row| row.entry != TreeEntry::Node(id("C"))));
        assert!(session
            .tree()
            .iter()
            .any(|row| row.entry == TreeEntry::Dangling(id("C"))));
    }

    #[tokio::test]
    async fn successful_refresh_clears_stale_flag() {
        let mut raw = MockRawApiPort::new();
        raw.expect_delete().times(1).returning(|_| Ok(()));
        let mut fetches = 0;
        let doc = fixtures::crossroads_json();
        raw.expect_get_json().times(2).returning(move |_| {
            fetches += 1;
            if fetches == 1 {
                Err(ApiError::Network("connection reset".into()))
            } else {
                Ok(doc.clone())
            }
        });
        let mut session = session(raw);

        session.delete_node(&id("D")).await.unwrap();
        assert!(session.is_stale());

        session.refresh().await.unwrap();
        assert!(!session.is_stale());
    }
}
