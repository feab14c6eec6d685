use super::blocks::preview;
use anyhow::{Context, Result};
use cardrev_editor::{EditSession, EngineConfig, SessionAction, Template};
use clap::Args;
use colored::Colorize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Template JSON ({ "id", "name", "content", "backgroundImage"? })
    pub template: PathBuf,

    /// JSON array of session actions
    pub script: PathBuf,

    /// Print the final session state as JSON
    #[arg(long)]
    pub json: bool,
}

/// What one scripted action did
#[derive(Debug)]
pub(crate) enum Step {
    Changed,
    Unchanged,
    Rejected(String),
}

pub fn replay(args: ReplayArgs, cwd: &Path) -> Result<()> {
    let config = EngineConfig::load(cwd)?;
    let template: Template = read_json(&args.template)?;
    let actions: Vec<SessionAction> = read_json(&args.script)?;

    let (session, steps) = run_script(template, actions.clone(), config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        return Ok(());
    }

    println!("{}", "▶️  Replaying session...".bright_blue().bold());
    for (i, (action, step)) in actions.iter().zip(&steps).enumerate() {
        let label = format!("{:?}", action);
        match step {
            Step::Changed => println!("  {} {:>2}. {}", "✓".green(), i, preview(&label, 60)),
            Step::Unchanged => println!("  {} {:>2}. {}", "·".dimmed(), i, preview(&label, 60)),
            Step::Rejected(reason) => {
                println!("  {} {:>2}. {} - {}", "✗".red(), i, preview(&label, 60), reason)
            }
        }
    }

    print_session(&session);
    Ok(())
}

/// Start a session and dispatch every action in order.
///
/// Rejected actions are recorded and skipped; the session is unchanged by
/// them.
pub(crate) fn run_script(
    template: Template,
    actions: Vec<SessionAction>,
    config: EngineConfig,
) -> (EditSession, Vec<Step>) {
    let mut session = EditSession::with_config(template, config);
    let steps = actions
        .into_iter()
        .map(|action| match session.dispatch(action) {
            Ok(true) => Step::Changed,
            Ok(false) => Step::Unchanged,
            Err(e) => {
                tracing::warn!(error = %e, "action rejected");
                Step::Rejected(e.to_string())
            }
        })
        .collect();

    (session, steps)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_session(session: &EditSession) {
    println!();
    println!("{}", "Content".bold());
    println!("{}", session.content());

    println!();
    println!("{} ({})", "Modified blocks".bold(), session.modified_blocks().len());
    for m in session.modified_blocks() {
        println!(
            "  {} [{}] {} → {}",
            m.id,
            m.block_type.cyan(),
            preview(&m.original_content, 30).red(),
            preview(&m.new_content, 30).green()
        );
    }

    println!();
    println!("{}", "Versions".bold());
    for version in session.versions() {
        let marker = if session.current_version() == Some(version.id) {
            "*".green().bold()
        } else {
            " ".normal()
        };
        println!(
            "  {} v{} {} ({} modified)",
            marker,
            version.id,
            version.timestamp.format("%Y-%m-%d %H:%M:%S"),
            version.modified_blocks.len()
        );
    }

    let flags = [
        ("undo", session.can_undo()),
        ("redo", session.can_redo()),
        ("unsaved", session.has_unsaved_changes()),
    ];
    let summary: Vec<String> = flags
        .iter()
        .map(|(name, on)| if *on { name.to_string() } else { format!("no {}", name) })
        .collect();
    println!();
    println!("{}", summary.join(", ").dimmed());
}
