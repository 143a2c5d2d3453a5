//! Story list view

use std::fmt::Write;

use storyloom_shared::StoryListResponse;

use crate::ui::presentation::utils::last_updated;

pub fn render(list: &StoryListResponse) -> String {
    if list.stories.is_empty() {
        return "No stories yet. Create one with `storyloom-cli generate <theme>`.\n".to_string();
    }

    let mut out = format!("Stories ({})\n", list.total());
    for story in &list.stories {
        let _ = writeln!(
            out,
            "  #{:<6} {:<40} {:<10} {:>4} nodes  {}",
            story.id.as_str(),
            story.title,
            story.status.as_str(),
            story.node_count,
            last_updated(story)
        );
    }
    out
}
