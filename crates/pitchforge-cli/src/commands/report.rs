//! The `pitchforge report` command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;

use pitchforge_report::html::write_html_report;
use pitchforge_report::markdown::write_markdown_report;

use super::Session;

pub fn execute(output: Option<PathBuf>, format: String, config: Option<&Path>) -> Result<()> {
    let session = Session::open(config)?;
    let output = output.unwrap_or_else(|| session.config.report_dir.clone());
    std::fs::create_dir_all(&output)?;

    let now = Utc::now();
    let timestamp = now.format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["md", "html"]
    } else {
        format.split(',').map(|f| f.trim()).collect()
    };

    for fmt in &formats {
        match *fmt {
            "md" | "markdown" => {
                let path = output.join(format!("report-{timestamp}.md"));
                write_markdown_report(
                    &session.checklist,
                    &session.drill,
                    &session.notebook,
                    now,
                    &path,
                )?;
                println!("Markdown report: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("report-{timestamp}.html"));
                write_html_report(
                    &session.checklist,
                    &session.drill,
                    &session.notebook,
                    now,
                    &path,
                )?;
                println!("HTML report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}
