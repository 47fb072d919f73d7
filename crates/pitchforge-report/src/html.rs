//! HTML session report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};

use pitchforge_core::checklist::ChecklistState;
use pitchforge_core::drill::DrillState;
use pitchforge_core::model::format_seconds;
use pitchforge_core::notes::Notebook;
use pitchforge_core::statistics::{weakest_category, CategoryHeat};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report for the session.
pub fn generate_html(
    checklist: &ChecklistState,
    drill: &DrillState,
    notebook: &Notebook,
    generated_at: DateTime<Utc>,
) -> String {
    let summary = checklist.summary();
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>pitchforge report — {}</title>\n",
        html_escape(checklist.audience.label())
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>pitchforge report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Audience: <strong>{}</strong> | {} sections | {}</p>\n",
        html_escape(checklist.audience.label()),
        summary.total_sections,
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Readiness dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Readiness</h2>\n");
    let verdict_class = if summary.is_go() { "go" } else { "no-go" };
    html.push_str(&format!(
        "<p class=\"verdict {verdict_class}\">{}% readiness — {}</p>\n",
        summary.readiness_score,
        if summary.is_go() { "Go" } else { "No-Go" }
    ));
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Ready items</th><th>Gates</th><th>Evidence</th><th>Red-team</th><th>Planned</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td>{}/{}</td><td>{}/{}</td><td>{}/{}</td><td>{}/{}</td><td>{} / {}</td></tr></tbody>\n",
        summary.checked_items,
        summary.total_items,
        summary.gates_passed,
        summary.total_sections,
        summary.evidence_covered,
        summary.checked_items,
        summary.risk_covered,
        summary.checked_items,
        format_seconds(checklist.total_budget_secs()),
        format_seconds(u64::from(checklist.target_minutes) * 60),
    ));
    html.push_str("</table>\n");

    let blockers = checklist.blockers();
    if blockers.is_empty() {
        html.push_str("<p class=\"ok\">No critical blockers.</p>\n");
    } else {
        html.push_str("<ul class=\"blockers\">\n");
        for blocker in &blockers {
            html.push_str(&format!("<li>{}</li>\n", html_escape(blocker)));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");

    // Rehearsal runs
    html.push_str("<section class=\"runs\">\n");
    html.push_str("<h2>Rehearsal Runs</h2>\n");
    if checklist.rehearsal_log.is_empty() {
        html.push_str("<p class=\"meta\">No rehearsal runs logged yet.</p>\n");
    } else {
        html.push_str(&format!(
            "<p class=\"meta\">Consistency trend: {}</p>\n",
            html_escape(&checklist.trend().to_string())
        ));
        html.push_str("<table class=\"results-table\">\n");
        html.push_str("<thead><tr><th>Date</th><th>Duration</th><th>Completion</th><th>Missed</th></tr></thead>\n<tbody>\n");
        for run in &checklist.rehearsal_log {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}%</td><td>{}</td></tr>\n",
                run.recorded_at.format("%Y-%m-%d %H:%M"),
                format_seconds(run.duration_secs),
                run.completion_pct,
                html_escape(&if run.missed_sections.is_empty() {
                    "None".to_string()
                } else {
                    run.missed_sections.join(", ")
                }),
            ));
        }
        html.push_str("</tbody></table>\n");
    }
    html.push_str("</section>\n");

    // Heatmap
    html.push_str("<section class=\"heatmap\">\n");
    html.push_str("<h2>Q&amp;A Heatmap</h2>\n");
    let heat = drill.heatmap();
    if heat.is_empty() {
        html.push_str("<p class=\"meta\">No attempts recorded yet.</p>\n");
    } else {
        html.push_str("<table class=\"results-table\">\n");
        html.push_str("<thead><tr><th>Category</th><th>Attempts</th><th>Avg score</th><th>Top weakness</th></tr></thead>\n<tbody>\n");
        for entry in &heat {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}%</td><td>{}</td></tr>\n",
                entry.category,
                entry.attempts,
                entry.avg_score,
                entry
                    .top_weakness
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "none".into()),
            ));
        }
        html.push_str("</tbody></table>\n");
        html.push_str(&generate_bar_chart(&heat));
        if let Some(weakest) = weakest_category(&heat) {
            html.push_str(&format!(
                "<p class=\"warn\">Current weakest category: {} ({}% avg)</p>\n",
                weakest.category, weakest.avg_score
            ));
        }
    }
    html.push_str("</section>\n");

    // Notebook summary
    html.push_str("<section class=\"notebook\">\n");
    html.push_str("<h2>Notebook</h2>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Tags: {} | Pins: {} | Decisions: {} | Open actions: {} | Snapshots: {}</p>\n",
        notebook.tags.len(),
        notebook.pins.len(),
        notebook.decisions.len(),
        notebook.open_action_count(),
        notebook.history.len(),
    ));
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    let raw = serde_json::json!({
        "summary": summary,
        "heatmap": heat,
        "rehearsal_log": &checklist.rehearsal_log,
    });
    html.push_str(
        &serde_json::to_string_pretty(&raw)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>\n");
    html
}

/// Simple inline SVG bar chart of average score per category.
fn generate_bar_chart(heat: &[CategoryHeat]) -> String {
    let bar_width = 60usize;
    let gap = 20usize;
    let chart_height = 140usize;
    let width = heat.len() * (bar_width + gap) + gap;

    let mut svg = format!(
        "<svg viewBox=\"0 0 {width} {height}\" class=\"chart\" role=\"img\" aria-label=\"Average score per category\">\n",
        height = chart_height + 30
    );
    for (index, entry) in heat.iter().enumerate() {
        let x = gap + index * (bar_width + gap);
        let bar = (usize::from(entry.avg_score) * chart_height) / 100;
        let y = chart_height - bar;
        svg.push_str(&format!(
            "<rect x=\"{x}\" y=\"{y}\" width=\"{bar_width}\" height=\"{bar}\"/>\n"
        ));
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\">{}</text>\n",
            x + bar_width / 2,
            chart_height + 16,
            entry.category
        ));
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" class=\"value\">{}%</text>\n",
            x + bar_width / 2,
            y.saturating_sub(4).max(10),
            entry.avg_score
        ));
    }
    svg.push_str("</svg>\n");
    svg
}

/// Write the HTML report to a file, creating parent directories.
pub fn write_html_report(
    checklist: &ChecklistState,
    drill: &DrillState,
    notebook: &Notebook,
    generated_at: DateTime<Utc>,
    path: &Path,
) -> Result<()> {
    let html = generate_html(checklist, drill, notebook, generated_at);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0 auto; max-width: 900px; padding: 24px; color: #1c1c28; background: #fafafc; }
header h1 { margin-bottom: 4px; }
.meta { color: #666; font-size: 14px; }
section { margin-top: 28px; }
table { border-collapse: collapse; width: 100%; margin-top: 8px; }
th, td { border: 1px solid #ddd; padding: 6px 10px; text-align: left; font-size: 14px; }
th { background: #f0f0f5; }
.verdict { font-size: 22px; font-weight: 600; }
.verdict.go { color: #0a7d33; }
.verdict.no-go { color: #b4231f; }
.ok { color: #0a7d33; }
.warn { color: #a65a00; }
.blockers li { color: #a65a00; font-size: 14px; }
.chart { margin-top: 12px; max-height: 200px; }
.chart rect { fill: #4f5dd6; }
.chart text { font-size: 11px; fill: #444; }
.chart text.value { fill: #1c1c28; font-weight: 600; }
.raw-data pre { background: #f0f0f5; padding: 12px; overflow-x: auto; font-size: 12px; }
"#;
