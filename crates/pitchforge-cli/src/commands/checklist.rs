//! The `pitchforge checklist` command group.

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use comfy_table::{Cell, Table};

use pitchforge_core::checklist::{GateOutcome, ToggleOutcome};
use pitchforge_core::model::{format_seconds, Audience};

use super::Session;

#[derive(Subcommand)]
pub enum ChecklistCommand {
    /// Show sections, items, score, and blockers
    Show,

    /// Toggle an item's checked state
    Toggle {
        /// Item id (see `checklist show`)
        item_id: String,
    },

    /// Toggle a section's readiness gate
    Gate {
        /// Section id
        section_id: String,
    },

    /// Switch audience template (resets all sections)
    Audience {
        /// angel, seed_vc, enterprise_buyer, accelerator_demo_day
        audience: String,
    },

    /// Add a point to a section
    Add {
        /// Section id
        section_id: String,
        /// Point label
        label: String,
    },

    /// Attach evidence and/or a red-team risk to an item
    Note {
        /// Item id
        item_id: String,
        /// Evidence link, slide, or source
        #[arg(long)]
        evidence: Option<String>,
        /// What investors would challenge
        #[arg(long)]
        risk: Option<String>,
    },

    /// Set a section's time budget in seconds
    Time {
        /// Section id
        section_id: String,
        /// Seconds
        seconds: u32,
    },

    /// Set the target pitch duration in minutes
    Target {
        /// Minutes (min 1)
        minutes: u32,
    },

    /// Delete a point
    Remove {
        /// Item id
        item_id: String,
    },

    /// Manage timed rehearsal runs
    Run {
        #[command(subcommand)]
        command: RunCommand,
    },
}

#[derive(Subcommand)]
pub enum RunCommand {
    /// Start a timed rehearsal
    Start,
    /// Stop the rehearsal and log the run
    Stop,
}

pub fn execute(command: ChecklistCommand, config: Option<&Path>) -> Result<()> {
    let mut session = Session::open(config)?;

    match command {
        ChecklistCommand::Show => {
            print_checklist(&session);
            return Ok(());
        }
        ChecklistCommand::Toggle { item_id } => match session.checklist.toggle(&item_id) {
            ToggleOutcome::Toggled => println!("Toggled '{item_id}'"),
            ToggleOutcome::Blocked => {
                println!("Blocked: '{item_id}' has unchecked dependencies");
            }
            ToggleOutcome::NotFound => anyhow::bail!("no item with id '{item_id}'"),
        },
        ChecklistCommand::Gate { section_id } => {
            match session.checklist.toggle_gate(&section_id) {
                GateOutcome::Toggled(true) => println!("Gate passed for '{section_id}'"),
                GateOutcome::Toggled(false) => println!("Gate reopened for '{section_id}'"),
                GateOutcome::RequiredIncomplete => {
                    println!("Gate unchanged: required items in '{section_id}' are incomplete");
                }
                GateOutcome::NotFound => anyhow::bail!("no section with id '{section_id}'"),
            }
        }
        ChecklistCommand::Audience { audience } => {
            let audience: Audience = audience.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            session.checklist.set_audience(audience);
            println!("Switched to the {} template (checklist reset)", audience.label());
        }
        ChecklistCommand::Add { section_id, label } => {
            match session.checklist.add_item(&section_id, &label) {
                Some(id) => println!("Added '{label}' as {id}"),
                None => anyhow::bail!("could not add point (blank label or unknown section)"),
            }
        }
        ChecklistCommand::Note {
            item_id,
            evidence,
            risk,
        } => {
            if evidence.is_none() && risk.is_none() {
                anyhow::bail!("pass --evidence and/or --risk");
            }
            if let Some(evidence) = evidence {
                if !session.checklist.set_evidence(&item_id, &evidence) {
                    anyhow::bail!("no item with id '{item_id}'");
                }
            }
            if let Some(risk) = risk {
                if !session.checklist.set_red_team_risk(&item_id, &risk) {
                    anyhow::bail!("no item with id '{item_id}'");
                }
            }
            println!("Updated '{item_id}'");
        }
        ChecklistCommand::Time {
            section_id,
            seconds,
        } => {
            if !session.checklist.set_time_budget(&section_id, seconds) {
                anyhow::bail!("no section with id '{section_id}'");
            }
            println!("Set '{section_id}' budget to {}", format_seconds(u64::from(seconds)));
        }
        ChecklistCommand::Target { minutes } => {
            session.checklist.set_target_minutes(minutes);
            println!("Target duration set to {} minutes", session.checklist.target_minutes);
        }
        ChecklistCommand::Remove { item_id } => {
            if !session.checklist.remove_item(&item_id) {
                anyhow::bail!("no item with id '{item_id}'");
            }
            println!("Removed '{item_id}'");
        }
        ChecklistCommand::Run { command } => match command {
            RunCommand::Start => {
                session.checklist.start_run(Utc::now());
                println!("Rehearsal started");
            }
            RunCommand::Stop => match session.checklist.stop_run(Utc::now()) {
                Some(run) => {
                    println!(
                        "Run logged: {} | Completion {}% | Missed: {}",
                        format_seconds(run.duration_secs),
                        run.completion_pct,
                        if run.missed_sections.is_empty() {
                            "None".to_string()
                        } else {
                            run.missed_sections.join(", ")
                        }
                    );
                    println!("Consistency trend: {}", session.checklist.trend());
                }
                None => println!("No rehearsal in progress"),
            },
        },
    }

    session.save_checklist();
    Ok(())
}

fn print_checklist(session: &Session) {
    let checklist = &session.checklist;

    let mut table = Table::new();
    table.set_header(vec!["Section", "Item", "Done", "Blocked", "Evidence", "Risk"]);
    for section in &checklist.sections {
        for item in &section.items {
            let blocked = !item.checked && checklist.is_blocked(item);
            table.add_row(vec![
                Cell::new(&section.label),
                Cell::new(format!("{} ({})", item.label, item.id)),
                Cell::new(if item.checked { "x" } else { "" }),
                Cell::new(if blocked { "deps" } else { "" }),
                Cell::new(if item.evidence.trim().is_empty() { "" } else { "yes" }),
                Cell::new(if item.red_team_risk.trim().is_empty() { "" } else { "yes" }),
            ]);
        }
    }
    println!("{table}");

    let summary = checklist.summary();
    println!(
        "\nAudience: {} | Ready {}/{} | Gates {}/{} | Evidence {}/{} | Red-team {}/{}",
        checklist.audience.label(),
        summary.checked_items,
        summary.total_items,
        summary.gates_passed,
        summary.total_sections,
        summary.evidence_covered,
        summary.checked_items,
        summary.risk_covered,
        summary.checked_items,
    );
    for section in &checklist.sections {
        println!(
            "  {} [{}]: gate {}",
            section.label,
            format_seconds(u64::from(section.time_budget_secs)),
            if section.gate_passed { "Passed" } else { "Not passed" }
        );
    }
    println!(
        "Planned duration {} / Target {}",
        format_seconds(checklist.total_budget_secs()),
        format_seconds(u64::from(checklist.target_minutes) * 60)
    );
    println!(
        "\n{}% readiness — {} (threshold at 80%)",
        summary.readiness_score,
        if summary.is_go() { "Go" } else { "No-Go" }
    );

    let blockers = checklist.blockers();
    if blockers.is_empty() {
        println!("No critical blockers.");
    } else {
        for blocker in &blockers {
            println!("  blocker: {blocker}");
        }
    }
}
