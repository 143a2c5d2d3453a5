//! Editor views: the story tree and the selected node's drafts

use std::fmt::Write;

use storyloom_domain::TreeEntry;

use crate::application::EditorSession;
use crate::ui::presentation::utils::{ending_badge, snippet, story_header, unreachable_nodes};

pub const EDIT_HELP: &str = "Commands: t tree, n node, s <id> select, e edit, c <text> set content, \
o <text> add option, rm <n> remove option, ot <n> <text> option text, \
l <n> [id] link option, save, x cancel, add <parent> <text> new child, \
del <id> delete node, title <text> rename, f refresh, q quit";

const SNIPPET_LEN: usize = 48;

pub fn render_tree(session: &EditorSession) -> String {
    let document = session.document();
    let selected = session.selected_node_id();
    let mut out = format!("== {} ==\n", story_header(document));

    let tree = session.tree();
    for row in &tree {
        let indent = "  ".repeat(row.depth);
        let via = row
            .via_option
            .as_deref()
            .map(|text| format!("[{text}] "))
            .unwrap_or_default();
        let body = match &row.entry {
            TreeEntry::Node(id) => {
                let cursor = if selected == Some(id) { "*" } else { "-" };
                let node = document.get(id);
                let content = node.map(|n| snippet(&n.content, SNIPPET_LEN)).unwrap_or_default();
                let badge = node
                    .and_then(ending_badge)
                    .map(|badge| format!(" ({badge})"))
                    .unwrap_or_default();
                format!("{cursor} #{id} {content}{badge}")
            }
            TreeEntry::Dangling(id) => format!("! broken link -> #{id}"),
            TreeEntry::Unlinked => "! unlinked option".to_string(),
            TreeEntry::Cycle(id) => format!("~ back to #{id}"),
        };
        let _ = writeln!(out, "{indent}{via}{body}");
    }

    let unreachable = unreachable_nodes(document, &tree);
    if !unreachable.is_empty() {
        let ids: Vec<String> = unreachable.iter().map(|id| format!("#{id}")).collect();
        let _ = writeln!(out, "Unreachable: {}", ids.join(", "));
    }
    out
}

pub fn render_node(session: &EditorSession) -> String {
    let Some(node) = session.selected_node() else {
        return "No node selected. Use `s <id>` to select one.\n".to_string();
    };

    let mode = if session.is_editing() { "editing" } else { "viewing" };
    let mut out = format!("Node #{} ({mode})\n", node.id);
    let _ = writeln!(out, "Content: {}", session.draft_content());
    if session.draft_options().is_empty() {
        out.push_str("Options: none\n");
    } else {
        out.push_str("Options:\n");
        for (index, option) in session.draft_options().iter().enumerate() {
            let target = match &option.node_id {
                Some(id) if session.document().contains(id) => format!("-> #{id}"),
                Some(id) => format!("-> #{id} [broken link]"),
                None => "[unlinked]".to_string(),
            };
            let _ = writeln!(out, "  {}. {} {}", index + 1, option.text, target);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use storyloom_domain::{Story, StoryNode, StoryOption};

    use super::*;
    use crate::application::{Api, StoryService};
    use crate::infrastructure::testing::fixtures;
    use crate::ports::outbound::MockRawApiPort;

    fn editor(story: Story) -> EditorSession {
        let service = StoryService::new(Api::new(Arc::new(MockRawApiPort::new())));
        EditorSession::with_document(service, story)
    }

    #[test]
    fn tree_marks_selection_and_endings() {
        let text = render_tree(&editor(fixtures::crossroads_story()));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "== Crossroads (#1, draft) ==");
        assert_eq!(lines[1], "* #A You stand at a crossroads.");
        assert_eq!(lines[2], "  [Go left] - #B A narrow forest path.");
        assert_eq!(lines[3], "    [Go deeper] - #D You find the treasure. (ending, win)");
        assert_eq!(lines[4], "  [Go right] - #C The river sweeps you away. (ending)");
    }

    #[test]
    fn tree_shows_broken_links_and_orphans() {
        let story = Story::new(
            1,
            "Broken",
            StoryNode::new("A", "Start")
                .with_option(StoryOption::linked("Into the void", "Z"))
                .with_option(StoryOption::unlinked("Later")),
        )
        .with_node(StoryNode::new("Q", "Nobody links here"));

        let text = render_tree(&editor(story));
        assert!(text.contains("  [Into the void] ! broken link -> #Z"));
        assert!(text.contains("  [Later] ! unlinked option"));
        assert!(text.ends_with("Unreachable: #Q\n"));
    }

    #[test]
    fn node_view_lists_draft_options() {
        let mut session = editor(fixtures::crossroads_story());
        session.enter_edit_mode().unwrap();
        session.add_draft_option("Wait");

        let text = render_node(&session);
        assert!(text.starts_with("Node #A (editing)"));
        assert!(text.contains("  1. Go left -> #B"));
        assert!(text.contains("  3. Wait [unlinked]"));
    }
}
