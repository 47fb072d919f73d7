//! The `pitchforge notes` command group.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use uuid::Uuid;

use pitchforge_core::notes::{ActionStatus, NoteTemplate, RefineMode};

use super::Session;

#[derive(Subcommand)]
pub enum NotesCommand {
    /// Show the notebook summary
    Show,

    /// Replace the draft with a meeting template
    Template {
        /// investor_call, partner_meeting, weekly_review
        kind: String,
    },

    /// Set a draft section's text
    Set {
        /// notes, story, risks, talking_points
        section: String,
        /// The text, quoted
        text: String,
    },

    /// Add a tag
    Tag { value: String },

    /// Remove a tag
    Untag { value: String },

    /// Pin a highlight (top 5 kept)
    Pin { text: String },

    /// Remove a pinned highlight
    Unpin { text: String },

    /// Log a decision
    Decision {
        decision: String,
        #[arg(long, default_value = "")]
        why: String,
        #[arg(long, default_value = "")]
        owner: String,
        #[arg(long, default_value = "")]
        revisit: String,
    },

    /// Track an action item
    Action {
        title: String,
        #[arg(long, default_value = "")]
        owner: String,
        #[arg(long, default_value = "")]
        due: String,
    },

    /// Toggle an action between open and done
    Done {
        /// Action id
        id: Uuid,
    },

    /// Rewrite the notes section
    Refine {
        /// concise, investor, risk_question
        mode: String,
    },

    /// Capture a snapshot of the notebook
    Snapshot,

    /// Restore a snapshot by id
    Restore {
        /// Snapshot id
        id: Uuid,
    },

    /// Search snapshot history
    History {
        /// Free-text query
        #[arg(default_value = "")]
        query: String,
        /// Only snapshots carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Export the notebook (Markdown + actions CSV)
    Export {
        /// Output directory (defaults to the configured report dir)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub fn execute(command: NotesCommand, config: Option<&Path>) -> Result<()> {
    let mut session = Session::open(config)?;
    let now = Utc::now();

    match command {
        NotesCommand::Show => {
            println!("{}", session.notebook.structured_summary("Founder Brain Dump"));
            println!("\nSnapshots: {}", session.notebook.history.len());
            for action in &session.notebook.actions {
                let status = if action.status == ActionStatus::Done { "DONE" } else { "OPEN" };
                println!("  [{status}] {} ({})", action.title, action.id);
            }
            return Ok(());
        }
        NotesCommand::Template { kind } => {
            let template: NoteTemplate = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            session.notebook.apply_template(template);
            println!("Applied the {} template", template.label());
        }
        NotesCommand::Set { section, text } => {
            let draft = &mut session.notebook.draft;
            match section.as_str() {
                "notes" => draft.notes = text,
                "story" => draft.story = text,
                "risks" => draft.risks = text,
                "talking_points" => draft.talking_points = text,
                other => anyhow::bail!("unknown section: {other}"),
            }
            println!("Updated {section}");
        }
        NotesCommand::Tag { value } => {
            if session.notebook.add_tag(&value) {
                println!("Tagged");
            } else {
                println!("Tag already present (or blank)");
            }
        }
        NotesCommand::Untag { value } => {
            if !session.notebook.remove_tag(&value) {
                anyhow::bail!("no tag '{value}'");
            }
            println!("Untagged");
        }
        NotesCommand::Pin { text } => {
            if session.notebook.add_pin(&text) {
                println!("Pinned");
            } else {
                anyhow::bail!("nothing to pin");
            }
        }
        NotesCommand::Unpin { text } => {
            if !session.notebook.remove_pin(&text) {
                anyhow::bail!("no pin matching that text");
            }
            println!("Unpinned");
        }
        NotesCommand::Decision {
            decision,
            why,
            owner,
            revisit,
        } => match session.notebook.add_decision(&decision, &why, &owner, &revisit, now) {
            Some(id) => println!("Decision logged ({id})"),
            None => anyhow::bail!("decision text is blank"),
        },
        NotesCommand::Action { title, owner, due } => {
            match session.notebook.add_action(&title, &owner, &due, now) {
                Some(id) => println!("Action tracked ({id})"),
                None => anyhow::bail!("action title is blank"),
            }
        }
        NotesCommand::Done { id } => match session.notebook.toggle_action(id) {
            Some(ActionStatus::Done) => println!("Marked done"),
            Some(ActionStatus::Open) => println!("Reopened"),
            None => anyhow::bail!("no action with id {id}"),
        },
        NotesCommand::Refine { mode } => {
            let mode: RefineMode = mode.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            if session.notebook.refine_notes(mode) {
                println!("{}", session.notebook.draft.notes);
            } else {
                println!("Notes are empty; nothing to refine.");
            }
        }
        NotesCommand::Snapshot => {
            let id = session.notebook.take_snapshot(now);
            println!("Snapshot saved ({id})");
        }
        NotesCommand::Restore { id } => {
            if !session.notebook.restore_snapshot(id) {
                anyhow::bail!("no snapshot with id {id}");
            }
            println!("Snapshot restored");
        }
        NotesCommand::History { query, tag } => {
            let matches = session.notebook.search_history(&query, tag.as_deref());
            if matches.is_empty() {
                println!("No snapshots match your filter.");
            } else {
                for entry in matches.iter().take(10) {
                    let preview: String = entry.draft.notes.chars().take(80).collect();
                    println!(
                        "{} | {} | {}",
                        entry.created_at.format("%Y-%m-%d %H:%M"),
                        entry.id,
                        if preview.is_empty() { "No notes text" } else { preview.as_str() }
                    );
                }
            }
            return Ok(());
        }
        NotesCommand::Export { output } => {
            let output = output.unwrap_or_else(|| session.config.report_dir.clone());
            std::fs::create_dir_all(&output)?;
            let md_path = output.join("notes-export.md");
            std::fs::write(
                &md_path,
                session.notebook.to_markdown("Founder Brain Dump", now),
            )?;
            let csv_path = output.join("notes-actions.csv");
            std::fs::write(&csv_path, session.notebook.actions_csv())?;
            println!("Exported: {}", md_path.display());
            println!("Exported: {}", csv_path.display());
            return Ok(());
        }
    }

    session.save_notebook();
    Ok(())
}
