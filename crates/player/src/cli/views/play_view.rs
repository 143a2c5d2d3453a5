//! Play view: the current node, its choices and the ending banner

use std::fmt::Write;

use storyloom_domain::OptionTarget;

use crate::application::PlaySession;
use crate::ui::presentation::utils::{breadcrumb, outcome_banner, story_header};

pub const PLAY_HELP: &str = "Commands: <number> choose, b back, j <id> jump to a visited node, \
r restart, p path, q quit";

pub fn render(session: &PlaySession) -> String {
    let node = session.current_node();
    let mut out = format!("== {} ==\n\n{}\n\n", story_header(session.document()), node.content);

    match session.outcome() {
        Some(outcome) => {
            let (heading, message) = outcome_banner(outcome);
            let _ = writeln!(out, "*** {heading} ***\n{message}");
        }
        None => {
            let choices = session.choices();
            if choices.is_empty() {
                out.push_str("(This node offers no options. Go back or restart.)\n");
            } else {
                out.push_str("What will you do?\n");
                for choice in choices {
                    let marker = match choice.target {
                        OptionTarget::Resolved(_) => String::new(),
                        OptionTarget::Dangling(id) => format!("  [broken link -> {id}]"),
                        OptionTarget::Unlinked => "  [unlinked]".to_string(),
                    };
                    let _ = writeln!(out, "  {}. {}{}", choice.index + 1, choice.option.text, marker);
                }
            }
        }
    }
    out
}

pub fn render_path(session: &PlaySession) -> String {
    format!(
        "Path: {}\nVisited: {}",
        breadcrumb(session.path()),
        breadcrumb(session.visited())
    )
}
