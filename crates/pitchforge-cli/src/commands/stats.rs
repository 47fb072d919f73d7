//! The `pitchforge stats` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::Session;

pub fn execute(config: Option<&Path>) -> Result<()> {
    let session = Session::open(config)?;
    let heat = session.drill.heatmap();

    if heat.is_empty() {
        println!("No trend data yet. Answer a few questions to populate the heatmap.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Attempts", "Avg score", "Top weakness"]);
    for entry in &heat {
        table.add_row(vec![
            Cell::new(entry.category),
            Cell::new(entry.attempts),
            Cell::new(format!("{}%", entry.avg_score)),
            Cell::new(
                entry
                    .top_weakness
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "none".into()),
            ),
        ]);
    }
    println!("{table}");

    println!("\nAttempts recorded: {}", session.drill.attempt_log.len());
    if let Some(weakest) = session.drill.weakest_category() {
        println!(
            "Current weakest category: {} ({}% avg)",
            weakest.category, weakest.avg_score
        );
    }
    println!("Rehearsal trend: {}", session.checklist.trend());

    Ok(())
}
