//! Play Session - walking a story from its root to an ending

use std::collections::HashSet;

use storyloom_domain::{
    children, is_terminal, outcome, resolve, Choice, DomainError, NodeId, OptionTarget, Outcome,
    Story, StoryNode,
};

/// Traversal state over one immutable story document.
///
/// `path` is never empty and always ends at the current node. `visited`
/// only grows until [`PlaySession::restart`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlaySession {
    document: Story,
    current: NodeId,
    visited: HashSet<NodeId>,
    visit_order: Vec<NodeId>,
    path: Vec<NodeId>,
}

impl PlaySession {
    pub fn start(document: Story) -> Self {
        let root = document.root_id().clone();
        tracing::debug!(story_id = %document.id(), root = %root, "Play session started");
        Self {
            document,
            current: root.clone(),
            visited: HashSet::from([root.clone()]),
            visit_order: vec![root.clone()],
            path: vec![root],
        }
    }

    /// Back to the root with the already-loaded document.
    pub fn restart(&mut self) {
        let root = self.document.root_id().clone();
        self.current = root.clone();
        self.visited = HashSet::from([root.clone()]);
        self.visit_order = vec![root.clone()];
        self.path = vec![root];
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn document(&self) -> &Story {
        &self.document
    }

    pub fn current_node_id(&self) -> &NodeId {
        &self.current
    }

    pub fn current_node(&self) -> &StoryNode {
        self.document
            .get(&self.current)
            .unwrap_or_else(|| self.document.root())
    }

    /// Options of the current node with their targets; empty at an ending.
    pub fn choices(&self) -> Vec<Choice<'_>> {
        let node = self.current_node();
        if is_terminal(node) {
            return Vec::new();
        }
        children(&self.document, node)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        outcome(self.current_node())
    }

    pub fn is_finished(&self) -> bool {
        is_terminal(self.current_node())
    }

    /// Visited nodes in first-visit order.
    pub fn visited(&self) -> &[NodeId] {
        &self.visit_order
    }

    pub fn has_visited(&self, node_id: &NodeId) -> bool {
        self.visited.contains(node_id)
    }

    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    pub fn can_go_back(&self) -> bool {
        self.path.len() > 1
    }

    // =========================================================================
    // Moves
    // =========================================================================

    /// Follows the option of the current node that leads to `target`.
    ///
    /// Returns `Ok(false)` without moving when the current node is an ending.
    ///
    /// # Errors
    ///
    /// `NotFound` if `target` is not in the story, `InvalidTarget` if no option
    /// of the current node leads there. State is unchanged on error.
    pub fn choose(&mut self, target: &NodeId) -> Result<bool, DomainError> {
        let current = self.current_node();
        if is_terminal(current) {
            tracing::debug!(node_id = %current.id, "Ignoring choice at an ending");
            return Ok(false);
        }

        let next = resolve(&self.document, target)?;
        let offered = current
            .options
            .iter()
            .any(|option| option.node_id.as_ref() == Some(target));
        if !offered {
            return Err(DomainError::invalid_target(format!(
                "node {} has no option leading to {}",
                current.id, target
            )));
        }

        let next = next.id.clone();
        self.advance(next);
        Ok(true)
    }

    /// Follows the option at `index` of the current node.
    pub fn choose_option(&mut self, index: usize) -> Result<bool, DomainError> {
        if self.is_finished() {
            return Ok(false);
        }

        let next = {
            let choices = self.choices();
            let choice = choices
                .get(index)
                .ok_or_else(|| DomainError::out_of_range(index, choices.len()))?;
            match choice.target {
                OptionTarget::Resolved(node) => node.id.clone(),
                OptionTarget::Dangling(id) => {
                    return Err(DomainError::not_found("StoryNode", id.to_string()))
                }
                OptionTarget::Unlinked => {
                    return Err(DomainError::invalid_target(format!(
                        "option \"{}\" has no target",
                        choice.option.text
                    )))
                }
            }
        };

        self.advance(next);
        Ok(true)
    }

    /// Steps back one node. Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.path.pop();
        if let Some(last) = self.path.last() {
            self.current = last.clone();
        }
        true
    }

    /// Rewinds the path to the first time `node_id` appears on it.
    ///
    /// Returns `Ok(false)` for a visited node that is no longer on the path.
    ///
    /// # Errors
    ///
    /// `InvalidTarget` if `node_id` has not been visited.
    pub fn jump_to(&mut self, node_id: &NodeId) -> Result<bool, DomainError> {
        if !self.has_visited(node_id) {
            return Err(DomainError::invalid_target(format!(
                "node {node_id} has not been visited"
            )));
        }

        match self.path.iter().position(|id| id == node_id) {
            Some(position) => {
                self.path.truncate(position + 1);
                self.current = node_id.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn advance(&mut self, next: NodeId) {
        tracing::debug!(from = %self.current, to = %next, "Advancing play session");
        if self.visited.insert(next.clone()) {
            self.visit_order.push(next.clone());
        }
        self.path.push(next.clone());
        self.current = next;
    }
}

#[cfg(test)]
mod tests {
    use storyloom_domain::StoryOption;

    use super::*;
    use crate::infrastructure::testing::fixtures;

    fn id(raw: &str) -> NodeId {
        NodeId::from(raw)
    }

    fn assert_path_invariants(session: &PlaySession) {
        assert!(!session.path().is_empty());
        assert_eq!(session.path().last(), Some(session.current_node_id()));
        for node in session.path() {
            assert!(session.has_visited(node));
        }
    }

    fn loop_story() -> Story {
        Story::new(
            "loop",
            "Loop",
            StoryNode::new("A", "Start").with_option(StoryOption::linked("On", "B")),
        )
        .with_node(
            StoryNode::new("B", "Fork")
                .with_option(StoryOption::linked("Back", "A"))
                .with_option(StoryOption::linked("Finish", "E")),
        )
        .with_node(StoryNode::ending("E", "Done", true))
    }

    #[test]
    fn go_left_scenario() {
        let mut session = PlaySession::start(fixtures::go_left_story());
        assert_eq!(session.current_node_id(), &id("A"));

        assert!(session.choose(&id("B")).unwrap());
        assert_eq!(session.current_node_id(), &id("B"));
        assert_eq!(session.visited(), &[id("A"), id("B")]);
        assert_eq!(session.path(), &[id("A"), id("B")]);
        assert_eq!(session.outcome(), Some(Outcome::Win));
        assert!(session.is_finished());
    }

    #[test]
    fn choose_unknown_target_is_not_found() {
        let mut session = PlaySession::start(fixtures::go_left_story());
        let before = session.clone();

        let err = session.choose(&id("Z")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(session, before);
    }

    #[test]
    fn choose_requires_an_offered_option() {
        let mut session = PlaySession::start(fixtures::crossroads_story());
        let before = session.clone();

        let err = session.choose(&id("D")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTarget(_)));
        assert_eq!(session, before);
    }

    #[test]
    fn choose_at_an_ending_does_not_move() {
        let mut session = PlaySession::start(fixtures::crossroads_story());
        session.choose(&id("C")).unwrap();
        assert_eq!(session.outcome(), Some(Outcome::Loss));

        assert!(!session.choose(&id("A")).unwrap());
        assert!(!session.choose(&id("Z")).unwrap());
        assert_eq!(session.current_node_id(), &id("C"));
        assert!(session.choices().is_empty());
    }

    #[test]
    fn back_at_root_is_a_no_op() {
        let mut session = PlaySession::start(fixtures::crossroads_story());
        assert!(!session.back());
        assert_eq!(session.path(), &[id("A")]);
        assert_eq!(session.current_node_id(), &id("A"));
    }

    #[test]
    fn back_keeps_visited() {
        let mut session = PlaySession::start(fixtures::crossroads_story());
        session.choose(&id("B")).unwrap();
        assert!(session.back());

        assert_eq!(session.current_node_id(), &id("A"));
        assert!(session.has_visited(&id("B")));
        assert_path_invariants(&session);
    }

    #[test]
    fn jump_to_unvisited_never_moves() {
        let mut session = PlaySession::start(fixtures::crossroads_story());
        session.choose(&id("B")).unwrap();

        let err = session.jump_to(&id("D")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTarget(_)));
        assert_eq!(session.current_node_id(), &id("B"));
    }

    #[test]
    fn jump_to_rewinds_to_first_occurrence() {
        let mut session = PlaySession::start(loop_story());
        for target in ["B", "A", "B"] {
            session.choose(&id(target)).unwrap();
        }
        assert_eq!(session.path(), &[id("A"), id("B"), id("A"), id("B")]);

        assert!(session.jump_to(&id("B")).unwrap());
        assert_eq!(session.path(), &[id("A"), id("B")]);
        assert_eq!(session.current_node_id(), &id("B"));
        assert_eq!(session.visited(), &[id("A"), id("B")]);
    }

    #[test]
    fn jump_to_visited_node_off_the_path_is_a_no_op() {
        let mut session = PlaySession::start(fixtures::crossroads_story());
        session.choose(&id("B")).unwrap();
        session.back();
        session.choose(&id("C")).unwrap();

        assert!(!session.jump_to(&id("B")).unwrap());
        assert_eq!(session.path(), &[id("A"), id("C")]);
    }

    #[test]
    fn restart_is_idempotent() {
        let mut session = PlaySession::start(fixtures::crossroads_story());
        session.choose(&id("B")).unwrap();
        session.choose(&id("D")).unwrap();

        session.restart();
        let once = session.clone();
        session.restart();

        assert_eq!(session, once);
        assert_eq!(session, PlaySession::start(fixtures::crossroads_story()));
    }

    #[test]
    fn choose_option_reports_broken_links() {
        let story = Story::new(
            "broken",
            "Broken",
            StoryNode::new("A", "Start")
                .with_option(StoryOption::linked("Into the void", "Z"))
                .with_option(StoryOption::unlinked("Not written yet"))
                .with_option(StoryOption::linked("Onward", "B")),
        )
        .with_node(StoryNode::ending("B", "Made it", true));
        let mut session = PlaySession::start(story);

        assert!(session.choose_option(0).unwrap_err().is_not_found());
        assert!(matches!(
            session.choose_option(1),
            Err(DomainError::InvalidTarget(_))
        ));
        assert_eq!(
            session.choose_option(3),
            Err(DomainError::out_of_range(3, 3))
        );
        assert_eq!(session.path(), &[id("A")]);

        assert!(session.choose_option(2).unwrap());
        assert_eq!(session.current_node_id(), &id("B"));
    }

    #[test]
    fn invariants_hold_across_mixed_moves() {
        let mut session = PlaySession::start(loop_story());
        session.choose(&id("B")).unwrap();
        assert_path_invariants(&session);
        session.choose(&id("A")).unwrap();
        assert_path_invariants(&session);
        session.back();
        assert_path_invariants(&session);
        session.jump_to(&id("A")).unwrap();
        assert_path_invariants(&session);
        let _ = session.choose(&id("E"));
        assert_path_invariants(&session);
        session.choose(&id("B")).unwrap();
        session.choose(&id("E")).unwrap();
        assert_path_invariants(&session);
        session.restart();
        assert_path_invariants(&session);
    }
}
