//! Markdown session report.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use pitchforge_core::checklist::ChecklistState;
use pitchforge_core::drill::DrillState;
use pitchforge_core::model::format_seconds;
use pitchforge_core::notes::Notebook;
use pitchforge_core::statistics::weakest_category;

/// Render the whole session as a Markdown document.
pub fn render_markdown(
    checklist: &ChecklistState,
    drill: &DrillState,
    notebook: &Notebook,
    generated_at: DateTime<Utc>,
) -> String {
    let mut md = String::new();
    let summary = checklist.summary();

    md.push_str("# pitchforge session report\n\n");
    md.push_str(&format!(
        "Generated: {} | Audience: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        checklist.audience.label()
    ));

    md.push_str("## Readiness\n\n");
    md.push_str(&format!(
        "**{}% readiness — {}** (go/no-go threshold at 80%)\n\n",
        summary.readiness_score,
        if summary.is_go() { "Go" } else { "No-Go" }
    ));
    md.push_str("| Signal | Value |\n|--------|-------|\n");
    md.push_str(&format!(
        "| Ready items | {}/{} |\n",
        summary.checked_items, summary.total_items
    ));
    md.push_str(&format!(
        "| Gates passed | {}/{} |\n",
        summary.gates_passed, summary.total_sections
    ));
    md.push_str(&format!(
        "| Evidence coverage | {}/{} |\n",
        summary.evidence_covered, summary.checked_items
    ));
    md.push_str(&format!(
        "| Red-team coverage | {}/{} |\n",
        summary.risk_covered, summary.checked_items
    ));
    md.push_str(&format!(
        "| Planned duration | {} / target {} |\n\n",
        format_seconds(checklist.total_budget_secs()),
        format_seconds(u64::from(checklist.target_minutes) * 60)
    ));

    md.push_str("### Blockers\n\n");
    let blockers = checklist.blockers();
    if blockers.is_empty() {
        md.push_str("No critical blockers.\n\n");
    } else {
        for blocker in &blockers {
            md.push_str(&format!("- {blocker}\n"));
        }
        md.push('\n');
    }

    md.push_str("## Rehearsal Runs\n\n");
    if checklist.rehearsal_log.is_empty() {
        md.push_str("No rehearsal runs logged yet.\n\n");
    } else {
        md.push_str(&format!("Consistency trend: {}\n\n", checklist.trend()));
        md.push_str("| Date | Duration | Completion | Missed sections |\n");
        md.push_str("|------|----------|------------|------------------|\n");
        for run in &checklist.rehearsal_log {
            md.push_str(&format!(
                "| {} | {} | {}% | {} |\n",
                run.recorded_at.format("%Y-%m-%d %H:%M"),
                format_seconds(run.duration_secs),
                run.completion_pct,
                if run.missed_sections.is_empty() {
                    "None".to_string()
                } else {
                    run.missed_sections.join(", ")
                }
            ));
        }
        md.push('\n');
    }

    md.push_str("## Q&A Heatmap\n\n");
    let heat = drill.heatmap();
    if heat.is_empty() {
        md.push_str("No attempts recorded yet.\n\n");
    } else {
        md.push_str(&format!("Attempts: {}\n\n", drill.attempt_log.len()));
        md.push_str("| Category | Attempts | Avg score | Top weakness |\n");
        md.push_str("|----------|----------|-----------|---------------|\n");
        for entry in &heat {
            md.push_str(&format!(
                "| {} | {} | {}% | {} |\n",
                entry.category,
                entry.attempts,
                entry.avg_score,
                entry
                    .top_weakness
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "none".into())
            ));
        }
        if let Some(weakest) = weakest_category(&heat) {
            md.push_str(&format!(
                "\nCurrent weakest category: {} ({}% avg)\n",
                weakest.category, weakest.avg_score
            ));
        }
        md.push('\n');
    }

    md.push_str("## Notebook\n\n");
    md.push_str(&format!(
        "Tags: {} | Pins: {} | Decisions: {} | Open actions: {} | Snapshots: {}\n",
        notebook.tags.len(),
        notebook.pins.len(),
        notebook.decisions.len(),
        notebook.open_action_count(),
        notebook.history.len()
    ));

    md
}

/// Render and write the Markdown report, creating parent directories.
pub fn write_markdown_report(
    checklist: &ChecklistState,
    drill: &DrillState,
    notebook: &Notebook,
    generated_at: DateTime<Utc>,
    path: &Path,
) -> Result<()> {
    let md = render_markdown(checklist, drill, notebook, generated_at);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchforge_core::model::Audience;

    #[test]
    fn report_covers_all_sections() {
        let mut checklist = ChecklistState::new(Audience::SeedVc);
        checklist.toggle("svc-problem-pain");
        let mut drill = DrillState::default();
        drill.submit_answer("our moat is defensible data distribution", 30, Utc::now());
        let notebook = Notebook::default();

        let md = render_markdown(&checklist, &drill, &notebook, Utc::now());
        assert!(md.contains("# pitchforge session report"));
        assert!(md.contains("## Readiness"));
        assert!(md.contains("Audience: Seed VC"));
        assert!(md.contains("### Blockers"));
        assert!(md.contains("| moat |"));
        assert!(md.contains("## Notebook"));
        assert!(md.contains("No-Go"));
    }

    #[test]
    fn empty_session_reads_cleanly() {
        let md = render_markdown(
            &ChecklistState::default(),
            &DrillState::default(),
            &Notebook::default(),
            Utc::now(),
        );
        assert!(md.contains("No rehearsal runs logged yet."));
        assert!(md.contains("No attempts recorded yet."));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.md");
        write_markdown_report(
            &ChecklistState::default(),
            &DrillState::default(),
            &Notebook::default(),
            Utc::now(),
            &path,
        )
        .unwrap();
        assert!(path.exists());
    }
}
