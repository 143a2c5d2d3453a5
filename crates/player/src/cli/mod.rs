//! Terminal front end: wires the story service to plain-text views.
//!
//! Play and edit sessions run a line-oriented loop over any async line
//! source, so the same loop serves stdin and tests. The desktop app in
//! [`crate::ui`] drives the same sessions.

pub mod views;

use std::io::Write;

use storyloom_domain::{NodeId, StoryId};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::application::services::job_outcome;
use crate::application::{Applied, EditorSession, PlaySession, SessionError, StoryService};
use crate::config::ClientConfig;
use crate::ui::presentation::utils::job_summary;
use crate::ports::outbound::ApiError;
use views::{editor_view, play_view, story_list};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Story generation failed: {0}")]
    JobFailed(String),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ApiError> for RunnerError {
    fn from(err: ApiError) -> Self {
        Self::Session(err.into())
    }
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Play { story_id: StoryId },
    Edit { story_id: StoryId },
    Generate { theme: String },
    Delete { story_id: StoryId },
}

pub struct RunnerDeps {
    pub service: StoryService,
    pub config: ClientConfig,
}

pub async fn run(deps: RunnerDeps, command: Command) -> Result<(), RunnerError> {
    let RunnerDeps { service, config } = deps;
    let mut out = std::io::stdout();
    let input = tokio::io::BufReader::new(tokio::io::stdin());

    match command {
        Command::List => {
            let list = service.list_stories().await?;
            write!(out, "{}", story_list::render(&list))?;
        }
        Command::Play { story_id } => {
            let story = service.get_story(&story_id).await?;
            play_loop(PlaySession::start(story), input, &mut out).await?;
        }
        Command::Edit { story_id } => {
            let session = EditorSession::open(service, &story_id).await?;
            edit_loop(session, input, &mut out).await?;
        }
        Command::Generate { theme } => {
            generate(&service, &config, &theme, &mut out).await?;
        }
        Command::Delete { story_id } => {
            service.delete_story(&story_id).await?;
            writeln!(out, "Deleted story #{story_id}")?;
        }
    }
    Ok(())
}

/// Requests a story and polls its job until the server finishes it.
pub async fn generate<W: Write>(
    service: &StoryService,
    config: &ClientConfig,
    theme: &str,
    out: &mut W,
) -> Result<(), RunnerError> {
    let job = service.create_story(theme).await?;
    writeln!(out, "{}", job_summary(&job))?;

    // A broken terminal surfaces on the next checked write
    let job = service
        .wait_for_job(job, config.job_poll_interval, |next| {
            let _ = writeln!(out, "{}", job_summary(next));
        })
        .await?;

    match job_outcome(&job) {
        Ok(Some(story_id)) => {
            writeln!(out, "Play it with `storyloom-cli play {story_id}`")?;
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(reason) => Err(RunnerError::JobFailed(reason)),
    }
}

// =============================================================================
// Play
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    /// Zero-based option index
    Choose(usize),
    Back,
    Jump(NodeId),
    Restart,
    Path,
    Help,
    Quit,
}

pub fn parse_play_command(line: &str) -> Result<PlayCommand, String> {
    let (word, rest) = split_command(line);
    match word {
        "b" | "back" => Ok(PlayCommand::Back),
        "j" | "jump" => required(rest, "node id").map(|id| PlayCommand::Jump(NodeId::from(id))),
        "r" | "restart" => Ok(PlayCommand::Restart),
        "p" | "path" => Ok(PlayCommand::Path),
        "h" | "help" | "?" => Ok(PlayCommand::Help),
        "q" | "quit" => Ok(PlayCommand::Quit),
        other => option_number(other).map(PlayCommand::Choose),
    }
}

pub async fn play_loop<R, W>(mut session: PlaySession, input: R, out: &mut W) -> Result<(), RunnerError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "{}", play_view::render(&session))?;
    writeln!(out, "{}", play_view::PLAY_HELP)?;

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_play_command(&line) {
            Ok(PlayCommand::Choose(index)) => match session.choose_option(index) {
                Ok(true) => writeln!(out, "{}", play_view::render(&session))?,
                Ok(false) => writeln!(out, "The story is over. Go back or restart.")?,
                Err(e) => writeln!(out, "Error: {e}")?,
            },
            Ok(PlayCommand::Back) => {
                if session.back() {
                    writeln!(out, "{}", play_view::render(&session))?;
                } else {
                    writeln!(out, "Already at the start.")?;
                }
            }
            Ok(PlayCommand::Jump(node_id)) => match session.jump_to(&node_id) {
                Ok(true) => writeln!(out, "{}", play_view::render(&session))?,
                Ok(false) => writeln!(out, "#{node_id} is not on the current path.")?,
                Err(e) => writeln!(out, "Error: {e}")?,
            },
            Ok(PlayCommand::Restart) => {
                session.restart();
                writeln!(out, "{}", play_view::render(&session))?;
            }
            Ok(PlayCommand::Path) => writeln!(out, "{}", play_view::render_path(&session))?,
            Ok(PlayCommand::Help) => writeln!(out, "{}", play_view::PLAY_HELP)?,
            Ok(PlayCommand::Quit) => break,
            Err(message) => writeln!(out, "{message}")?,
        }
    }
    Ok(())
}

// =============================================================================
// Edit
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Tree,
    Show,
    Select(NodeId),
    Edit,
    Content(String),
    AddOption(String),
    /// Zero-based option index
    RemoveOption(usize),
    OptionText(usize, String),
    Link(usize, Option<NodeId>),
    Save,
    Cancel,
    AddChild(NodeId, String),
    Delete(NodeId),
    Title(String),
    Refresh,
    Help,
    Quit,
}

pub fn parse_edit_command(line: &str) -> Result<EditCommand, String> {
    let (word, rest) = split_command(line);
    match word {
        "t" | "tree" => Ok(EditCommand::Tree),
        "n" | "node" => Ok(EditCommand::Show),
        "s" | "select" => required(rest, "node id").map(|id| EditCommand::Select(NodeId::from(id))),
        "e" | "edit" => Ok(EditCommand::Edit),
        "c" | "content" => Ok(EditCommand::Content(rest.to_string())),
        "o" | "option" => Ok(EditCommand::AddOption(rest.to_string())),
        "rm" => required(rest, "option number")
            .and_then(option_number)
            .map(EditCommand::RemoveOption),
        "ot" => {
            let (number, text) = split_command(rest);
            let index = option_number(number)?;
            Ok(EditCommand::OptionText(index, text.to_string()))
        }
        "l" | "link" => {
            let (number, target) = split_command(rest);
            let index = option_number(number)?;
            let target = (!target.is_empty()).then(|| NodeId::from(target));
            Ok(EditCommand::Link(index, target))
        }
        "save" => Ok(EditCommand::Save),
        "x" | "cancel" => Ok(EditCommand::Cancel),
        "add" => {
            let (parent, content) = split_command(rest);
            let parent = required(parent, "parent node id")?;
            Ok(EditCommand::AddChild(NodeId::from(parent), content.to_string()))
        }
        "del" | "delete" => {
            required(rest, "node id").map(|id| EditCommand::Delete(NodeId::from(id)))
        }
        "title" => Ok(EditCommand::Title(rest.to_string())),
        "f" | "refresh" => Ok(EditCommand::Refresh),
        "h" | "help" | "?" => Ok(EditCommand::Help),
        "q" | "quit" => Ok(EditCommand::Quit),
        other => Err(format!("Unknown command '{other}'. Type h for help.")),
    }
}

pub async fn edit_loop<R, W>(mut session: EditorSession, input: R, out: &mut W) -> Result<(), RunnerError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    write!(out, "{}", editor_view::render_tree(&session))?;
    writeln!(out, "{}", editor_view::EDIT_HELP)?;

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_edit_command(&line) {
            Ok(EditCommand::Quit) => break,
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };

        match apply_edit(&mut session, command).await {
            Ok(Some(text)) => write!(out, "{text}")?,
            Ok(None) => {}
            Err(e) => writeln!(out, "Error: {e}")?,
        }
    }
    Ok(())
}

fn node_view(session: &EditorSession) -> Option<String> {
    Some(editor_view::render_node(session))
}

/// Runs one editor command; returns text to print.
async fn apply_edit(
    session: &mut EditorSession,
    command: EditCommand,
) -> Result<Option<String>, SessionError> {
    let text = match command {
        EditCommand::Tree => Some(editor_view::render_tree(session)),
        EditCommand::Show => node_view(session),
        EditCommand::Select(node_id) => {
            session.select(&node_id)?;
            node_view(session)
        }
        EditCommand::Edit => {
            session.enter_edit_mode()?;
            node_view(session)
        }
        EditCommand::Content(text) => {
            session.set_draft_content(text);
            node_view(session)
        }
        EditCommand::AddOption(text) => {
            if !session.add_draft_option(&text) {
                return Ok(Some("Option text cannot be empty.\n".to_string()));
            }
            node_view(session)
        }
        EditCommand::RemoveOption(index) => {
            session.remove_draft_option(index)?;
            node_view(session)
        }
        EditCommand::OptionText(index, text) => {
            session.set_draft_option_text(index, text)?;
            node_view(session)
        }
        EditCommand::Link(index, target) => {
            session.link_draft_option(index, target)?;
            node_view(session)
        }
        EditCommand::Save => {
            session.save_node().await?;
            Some(format!("Saved.\n{}", editor_view::render_node(session)))
        }
        EditCommand::Cancel => {
            session.cancel_edit();
            node_view(session)
        }
        EditCommand::AddChild(parent, content) => {
            let created = session.create_child_node(&parent, &content).await?;
            Some(format!(
                "Created node #{}.\n{}{}",
                created.value,
                stale_notice(&created),
                editor_view::render_tree(session)
            ))
        }
        EditCommand::Delete(node_id) => {
            let deleted = session.delete_node(&node_id).await?;
            Some(format!(
                "Deleted node #{node_id}.\n{}{}",
                stale_notice(&deleted),
                editor_view::render_tree(session)
            ))
        }
        EditCommand::Title(title) => {
            session.rename_story(&title).await?;
            Some(format!("Title is now '{}'.\n", session.document().title()))
        }
        EditCommand::Refresh => {
            session.refresh().await?;
            Some(editor_view::render_tree(session))
        }
        EditCommand::Help => Some(format!("{}\n", editor_view::EDIT_HELP)),
        EditCommand::Quit => None,
    };
    Ok(text)
}

fn stale_notice<T>(applied: &Applied<T>) -> String {
    match &applied.refresh_error {
        Some(err) => format!("Could not reload the story ({err}). Type f to refresh.\n"),
        None => String::new(),
    }
}

// =============================================================================
// Parsing helpers
// =============================================================================

fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    }
}

fn required<'a>(value: &'a str, what: &str) -> Result<&'a str, String> {
    if value.is_empty() {
        Err(format!("Missing {what}."))
    } else {
        Ok(value)
    }
}

/// Options are numbered from 1 on screen.
fn option_number(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("'{raw}' is not an option number.")),
    }
}
