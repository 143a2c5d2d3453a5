//! Formatting helpers shared by the desktop views and the terminal front end.

use storyloom_domain::{NodeId, Outcome, Story, StoryNode, TreeEntry, TreeRow};
use storyloom_shared::{StoryJobResponse, StoryListItem};

/// First line of a node's content, cut to `max` characters.
pub fn snippet(content: &str, max: usize) -> String {
    let line = content.lines().next().unwrap_or("").trim();
    if line.chars().count() <= max {
        return line.to_string();
    }
    let cut: String = line.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

/// `A > B > D`, using node ids.
pub fn breadcrumb(ids: &[NodeId]) -> String {
    ids.iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(" > ")
}

pub fn story_header(story: &Story) -> String {
    format!("{} (#{}, {})", story.title(), story.id(), story.status())
}

/// `ending, win`, `ending` or nothing.
pub fn ending_badge(node: &StoryNode) -> Option<&'static str> {
    match (node.is_ending, node.is_winning_ending) {
        (true, true) => Some("ending, win"),
        (true, false) => Some("ending"),
        _ => None,
    }
}

/// Heading and message for an ending.
pub fn outcome_banner(outcome: Outcome) -> (&'static str, &'static str) {
    match outcome {
        Outcome::Win => ("Congratulations!", "You reached a winning ending."),
        Outcome::Loss => ("The End", "Your adventure has ended."),
    }
}

/// Last change of a listed story, `-` when the server sent no timestamps.
pub fn last_updated(item: &StoryListItem) -> String {
    item.updated_at
        .or(item.created_at)
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// One line describing a generation job.
pub fn job_summary(job: &StoryJobResponse) -> String {
    let mut line = format!("Job {}: {}", job.job_id, job.status.as_str());
    if let Some(story_id) = &job.story_id {
        line.push_str(&format!(" (story #{story_id})"));
    }
    if let Some(error) = &job.error {
        line.push_str(&format!(" - {error}"));
    }
    line
}

/// Nodes of the story that no row of its rendered tree shows, sorted.
pub fn unreachable_nodes(story: &Story, tree: &[TreeRow]) -> Vec<NodeId> {
    let mut ids: Vec<NodeId> = story
        .nodes()
        .map(|node| node.id.clone())
        .filter(|id| {
            !tree
                .iter()
                .any(|row| matches!(&row.entry, TreeEntry::Node(seen) if seen == id))
        })
        .collect();
    ids.sort();
    ids
}
