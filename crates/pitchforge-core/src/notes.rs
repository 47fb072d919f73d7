//! Founder notebook.
//!
//! Free-form meeting notes with tags, pinned highlights, a decision log,
//! action items, and a bounded snapshot history. Refinement modes rewrite
//! the notes deterministically; exports render Markdown, CSV, and a plain
//! text summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

pub const MAX_PINS: usize = 5;
pub const MAX_DECISIONS: usize = 40;
pub const MAX_ACTIONS: usize = 80;
pub const MAX_SNAPSHOTS: usize = 60;

/// The four free-text sections of the notebook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub story: String,
    #[serde(default)]
    pub risks: String,
    #[serde(default)]
    pub talking_points: String,
}

/// Prebuilt meeting note scaffolds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteTemplate {
    InvestorCall,
    PartnerMeeting,
    WeeklyReview,
}

impl NoteTemplate {
    pub fn label(&self) -> &'static str {
        match self {
            NoteTemplate::InvestorCall => "Investor Call",
            NoteTemplate::PartnerMeeting => "Partner Meeting",
            NoteTemplate::WeeklyReview => "Weekly Review",
        }
    }

    pub fn draft(&self) -> NoteDraft {
        match self {
            NoteTemplate::InvestorCall => NoteDraft {
                notes: "Meeting objective:\nKey updates:\nInvestor concerns:\nNext-step ask:".into(),
                story: "Narrative arc: problem -> traction -> why now -> moat.".into(),
                risks: "Fundraising risk:\nExecution risk:\nMitigation this week:".into(),
                talking_points: "Top 3 proof points:\n1.\n2.\n3.".into(),
            },
            NoteTemplate::PartnerMeeting => NoteDraft {
                notes: "Partner profile:\nStrategic fit:\nDeal blockers:\nFollow-up owners:".into(),
                story: "Joint story: customer value, integration path, distribution leverage.".into(),
                risks: "Commercial risk:\nTechnical risk:\nLegal or procurement risk:".into(),
                talking_points: "Partnership outcomes:\n- Pilot terms\n- Timeline\n- Commitments".into(),
            },
            NoteTemplate::WeeklyReview => NoteDraft {
                notes: "Wins:\nMisses:\nDecisions needed:\nTop priorities for next week:".into(),
                story: "Progress narrative and what changed this week.".into(),
                risks: "What can break next sprint and prevention plan.".into(),
                talking_points: "Team update script:\n- Metric movement\n- Risks\n- Next asks".into(),
            },
        }
    }
}

impl FromStr for NoteTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "investor_call" => Ok(NoteTemplate::InvestorCall),
            "partner_meeting" => Ok(NoteTemplate::PartnerMeeting),
            "weekly_review" => Ok(NoteTemplate::WeeklyReview),
            other => Err(format!("unknown note template: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Open,
    Done,
}

/// An entry in the decision log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub id: Uuid,
    pub decision: String,
    #[serde(default)]
    pub why: String,
    #[serde(default)]
    pub owner: String,
    /// Free-form "revisit by" date.
    #[serde(default)]
    pub revisit_by: String,
    pub date: DateTime<Utc>,
}

/// A tracked follow-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub due_date: String,
    pub status: ActionStatus,
    pub created_at: DateTime<Utc>,
}

/// A point-in-time copy of the notebook, minus history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteSnapshot {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub draft: NoteDraft,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pins: Vec<String>,
    #[serde(default)]
    pub decisions: Vec<Decision>,
    #[serde(default)]
    pub actions: Vec<ActionItem>,
}

/// How to rewrite the notes section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefineMode {
    /// First five sentences.
    Concise,
    /// Up to eight "- " bullets.
    InvestorBullets,
    /// Risk-signal lines plus question lines.
    RiskQuestion,
}

impl FromStr for RefineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "concise" => Ok(RefineMode::Concise),
            "investor" | "investor_bullets" => Ok(RefineMode::InvestorBullets),
            "risk_question" | "risks" => Ok(RefineMode::RiskQuestion),
            other => Err(format!("unknown refine mode: {other}")),
        }
    }
}

/// The persisted notebook state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Notebook {
    #[serde(default)]
    pub draft: NoteDraft,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Newest first, bounded to [`MAX_PINS`].
    #[serde(default)]
    pub pins: Vec<String>,
    /// Newest first, bounded to [`MAX_DECISIONS`].
    #[serde(default)]
    pub decisions: Vec<Decision>,
    /// Newest first, bounded to [`MAX_ACTIONS`].
    #[serde(default)]
    pub actions: Vec<ActionItem>,
    /// Newest first, bounded to [`MAX_SNAPSHOTS`].
    #[serde(default)]
    pub history: Vec<NoteSnapshot>,
}

/// Kebab-case a tag: trimmed, lowercased, whitespace runs collapsed to "-".
pub fn normalize_tag(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Split text into sentence-ish segments: after `.`/`!`/`?` followed by
/// whitespace, and on newlines when `split_newlines` is set.
fn split_segments(text: &str, split_newlines: bool) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    let flush = |current: &mut String, segments: &mut Vec<String>| {
        let trimmed = current.trim();
        if !trimmed.is_empty() {
            segments.push(trimmed.to_string());
        }
        current.clear();
    };

    while let Some(c) = chars.next() {
        if split_newlines && c == '\n' {
            flush(&mut current, &mut segments);
            continue;
        }
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_some_and(|n| n.is_whitespace()) {
            flush(&mut current, &mut segments);
        }
    }
    flush(&mut current, &mut segments);
    segments
}

const RISK_SIGNALS: &[&str] = &["risk", "blocker", "concern", "dependency", "churn", "burn", "runway"];

fn to_concise(text: &str) -> String {
    split_segments(text, false)
        .into_iter()
        .take(5)
        .collect::<Vec<_>>()
        .join(" ")
}

fn to_investor_bullets(text: &str) -> String {
    split_segments(text, true)
        .into_iter()
        .take(8)
        .map(|chunk| format!("- {chunk}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn to_risk_question_view(text: &str) -> String {
    let lines = split_segments(text, true);
    let risks_only: Vec<&String> = lines
        .iter()
        .filter(|line| {
            let lower = line.to_lowercase();
            RISK_SIGNALS.iter().any(|signal| lower.contains(signal))
        })
        .collect();
    let questions_only: Vec<&String> = lines.iter().filter(|line| line.contains('?')).collect();

    let mut out = vec!["Risks:".to_string()];
    if risks_only.is_empty() {
        out.push("- None explicitly stated".into());
    } else {
        out.extend(risks_only.iter().map(|line| format!("- {line}")));
    }
    out.push(String::new());
    out.push("Questions:".into());
    if questions_only.is_empty() {
        out.push("- None explicitly stated".into());
    } else {
        out.extend(questions_only.iter().map(|line| format!("- {line}")));
    }
    out.join("\n")
}

impl Notebook {
    /// Replace the draft with a template scaffold.
    pub fn apply_template(&mut self, template: NoteTemplate) {
        self.draft = template.draft();
    }

    /// Add a normalized tag; duplicates and blanks are ignored.
    pub fn add_tag(&mut self, value: &str) -> bool {
        let normalized = normalize_tag(value);
        if normalized.is_empty() || self.tags.contains(&normalized) {
            return false;
        }
        self.tags.push(normalized);
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Pin a highlight to the front of the (bounded) pin list. An existing
    /// identical pin moves to the front rather than duplicating.
    pub fn add_pin(&mut self, text: &str) -> bool {
        let candidate = text.trim().to_string();
        if candidate.is_empty() {
            return false;
        }
        self.pins.retain(|p| p != &candidate);
        self.pins.insert(0, candidate);
        self.pins.truncate(MAX_PINS);
        true
    }

    pub fn remove_pin(&mut self, text: &str) -> bool {
        let before = self.pins.len();
        self.pins.retain(|p| p != text);
        self.pins.len() != before
    }

    /// Log a decision. Blank decision text is ignored.
    pub fn add_decision(
        &mut self,
        decision: &str,
        why: &str,
        owner: &str,
        revisit_by: &str,
        now: DateTime<Utc>,
    ) -> Option<Uuid> {
        let decision = decision.trim();
        if decision.is_empty() {
            return None;
        }
        let id = Uuid::new_v4();
        self.decisions.insert(
            0,
            Decision {
                id,
                decision: decision.to_string(),
                why: why.trim().to_string(),
                owner: owner.trim().to_string(),
                revisit_by: revisit_by.to_string(),
                date: now,
            },
        );
        self.decisions.truncate(MAX_DECISIONS);
        Some(id)
    }

    pub fn remove_decision(&mut self, id: Uuid) -> bool {
        let before = self.decisions.len();
        self.decisions.retain(|d| d.id != id);
        self.decisions.len() != before
    }

    /// Track an action item. Blank titles are ignored.
    pub fn add_action(
        &mut self,
        title: &str,
        owner: &str,
        due_date: &str,
        now: DateTime<Utc>,
    ) -> Option<Uuid> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let id = Uuid::new_v4();
        self.actions.insert(
            0,
            ActionItem {
                id,
                title: title.to_string(),
                owner: owner.trim().to_string(),
                due_date: due_date.to_string(),
                status: ActionStatus::Open,
                created_at: now,
            },
        );
        self.actions.truncate(MAX_ACTIONS);
        Some(id)
    }

    /// Flip an action between open and done.
    pub fn toggle_action(&mut self, id: Uuid) -> Option<ActionStatus> {
        let action = self.actions.iter_mut().find(|a| a.id == id)?;
        action.status = match action.status {
            ActionStatus::Open => ActionStatus::Done,
            ActionStatus::Done => ActionStatus::Open,
        };
        Some(action.status)
    }

    pub fn remove_action(&mut self, id: Uuid) -> bool {
        let before = self.actions.len();
        self.actions.retain(|a| a.id != id);
        self.actions.len() != before
    }

    pub fn open_action_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| a.status != ActionStatus::Done)
            .count()
    }

    /// Capture the current notebook into the bounded history.
    pub fn take_snapshot(&mut self, now: DateTime<Utc>) -> Uuid {
        let id = Uuid::new_v4();
        let mut pins = self.pins.clone();
        pins.truncate(MAX_PINS);
        self.history.insert(
            0,
            NoteSnapshot {
                id,
                created_at: now,
                draft: self.draft.clone(),
                tags: self.tags.clone(),
                pins,
                decisions: self.decisions.clone(),
                actions: self.actions.clone(),
            },
        );
        self.history.truncate(MAX_SNAPSHOTS);
        id
    }

    /// Restore draft/tags/pins/decisions/actions from a snapshot.
    /// The history itself is untouched.
    pub fn restore_snapshot(&mut self, id: Uuid) -> bool {
        let Some(snapshot) = self.history.iter().find(|s| s.id == id).cloned() else {
            return false;
        };
        self.draft = snapshot.draft;
        self.tags = snapshot.tags;
        self.pins = snapshot.pins;
        self.decisions = snapshot.decisions;
        self.actions = snapshot.actions;
        true
    }

    /// Snapshots matching an optional tag filter and a free-text query over
    /// draft text, pins, decisions, and action titles.
    pub fn search_history(&self, query: &str, tag_filter: Option<&str>) -> Vec<&NoteSnapshot> {
        let query = query.trim().to_lowercase();
        self.history
            .iter()
            .filter(|entry| {
                if let Some(tag) = tag_filter {
                    if !entry.tags.iter().any(|t| t == tag) {
                        return false;
                    }
                }
                if query.is_empty() {
                    return true;
                }
                let mut combined = vec![
                    entry.draft.notes.clone(),
                    entry.draft.story.clone(),
                    entry.draft.risks.clone(),
                    entry.draft.talking_points.clone(),
                ];
                combined.extend(entry.pins.iter().cloned());
                combined.extend(
                    entry
                        .decisions
                        .iter()
                        .map(|d| format!("{} {}", d.decision, d.why)),
                );
                combined.extend(entry.actions.iter().map(|a| a.title.clone()));
                combined.join(" ").to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Rewrite the notes section in place. Returns false for empty notes.
    pub fn refine_notes(&mut self, mode: RefineMode) -> bool {
        if self.draft.notes.trim().is_empty() {
            return false;
        }
        self.draft.notes = match mode {
            RefineMode::Concise => to_concise(&self.draft.notes),
            RefineMode::InvestorBullets => to_investor_bullets(&self.draft.notes),
            RefineMode::RiskQuestion => to_risk_question_view(&self.draft.notes),
        };
        true
    }

    /// Render the notebook as a Markdown document.
    pub fn to_markdown(&self, title: &str, now: DateTime<Utc>) -> String {
        let mut lines: Vec<String> = vec![
            format!("# {title}"),
            String::new(),
            format!("Saved: {}", now.to_rfc3339()),
            String::new(),
            format!(
                "Tags: {}",
                if self.tags.is_empty() {
                    "none".to_string()
                } else {
                    self.tags.join(", ")
                }
            ),
            String::new(),
            "## Notes".into(),
            self.draft.notes.clone(),
            String::new(),
            "## Story".into(),
            self.draft.story.clone(),
            String::new(),
            "## Risks".into(),
            self.draft.risks.clone(),
            String::new(),
            "## Talking Points".into(),
            self.draft.talking_points.clone(),
            String::new(),
            "## Pinned Highlights".into(),
        ];
        if self.pins.is_empty() {
            lines.push("- none".into());
        } else {
            lines.extend(self.pins.iter().map(|p| format!("- {p}")));
        }
        lines.push(String::new());
        lines.push("## Decision Log".into());
        if self.decisions.is_empty() {
            lines.push("- none".into());
        } else {
            lines.extend(self.decisions.iter().map(|d| {
                format!(
                    "- {} | why: {} | owner: {} | revisit: {}",
                    d.decision,
                    or_na(&d.why),
                    or_na(&d.owner),
                    or_na(&d.revisit_by),
                )
            }));
        }
        lines.push(String::new());
        lines.push("## Action Items".into());
        if self.actions.is_empty() {
            lines.push("- none".into());
        } else {
            lines.extend(self.actions.iter().map(|a| {
                let check = if a.status == ActionStatus::Done { "x" } else { " " };
                format!(
                    "- [{check}] {} | owner: {} | due: {}",
                    a.title,
                    or_na(&a.owner),
                    or_na(&a.due_date),
                )
            }));
        }
        lines.join("\n")
    }

    /// Render the action items as CSV with quoted fields.
    pub fn actions_csv(&self) -> String {
        let mut rows = vec!["title,owner,due_date,status,created_at".to_string()];
        for action in &self.actions {
            let status = match action.status {
                ActionStatus::Open => "open",
                ActionStatus::Done => "done",
            };
            let fields = [
                action.title.as_str(),
                action.owner.as_str(),
                action.due_date.as_str(),
                status,
                &action.created_at.to_rfc3339(),
            ];
            rows.push(
                fields
                    .iter()
                    .map(|value| format!("\"{}\"", value.replace('"', "\"\"")))
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }
        rows.join("\n")
    }

    /// A short plain-text summary for sharing.
    pub fn structured_summary(&self, title: &str) -> String {
        let mut lines = vec![
            title.to_string(),
            format!(
                "Tags: {}",
                if self.tags.is_empty() {
                    "none".to_string()
                } else {
                    self.tags.join(", ")
                }
            ),
            format!("Pins: {}", self.pins.len()),
            format!("Decisions: {}", self.decisions.len()),
            format!("Open actions: {}", self.open_action_count()),
            String::new(),
            "Top highlights:".into(),
        ];
        if self.pins.is_empty() {
            lines.push("- none".into());
        } else {
            lines.extend(self.pins.iter().map(|p| format!("- {p}")));
        }
        lines.join("\n")
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "n/a"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_normalize_and_deduplicate() {
        let mut notebook = Notebook::default();
        assert!(notebook.add_tag("  Investor  Deck "));
        assert_eq!(notebook.tags, vec!["investor-deck"]);
        assert!(!notebook.add_tag("investor deck"));
        assert!(!notebook.add_tag("   "));
        assert!(notebook.remove_tag("investor-deck"));
        assert!(notebook.tags.is_empty());
    }

    #[test]
    fn pins_are_bounded_and_move_to_front() {
        let mut notebook = Notebook::default();
        for i in 0..7 {
            notebook.add_pin(&format!("pin {i}"));
        }
        assert_eq!(notebook.pins.len(), MAX_PINS);
        assert_eq!(notebook.pins[0], "pin 6");

        notebook.add_pin("pin 4");
        assert_eq!(notebook.pins[0], "pin 4");
        assert_eq!(notebook.pins.len(), MAX_PINS);
    }

    #[test]
    fn decisions_and_actions_are_bounded() {
        let mut notebook = Notebook::default();
        let now = Utc::now();
        for i in 0..50 {
            notebook.add_decision(&format!("decision {i}"), "", "", "", now);
        }
        assert_eq!(notebook.decisions.len(), MAX_DECISIONS);
        assert_eq!(notebook.decisions[0].decision, "decision 49");

        for i in 0..90 {
            notebook.add_action(&format!("action {i}"), "", "", now);
        }
        assert_eq!(notebook.actions.len(), MAX_ACTIONS);
        assert!(notebook.add_action("  ", "", "", now).is_none());
    }

    #[test]
    fn action_status_toggles() {
        let mut notebook = Notebook::default();
        let id = notebook.add_action("Send deck", "sam", "", Utc::now()).unwrap();
        assert_eq!(notebook.open_action_count(), 1);
        assert_eq!(notebook.toggle_action(id), Some(ActionStatus::Done));
        assert_eq!(notebook.open_action_count(), 0);
        assert_eq!(notebook.toggle_action(id), Some(ActionStatus::Open));
        assert!(notebook.toggle_action(Uuid::new_v4()).is_none());
    }

    #[test]
    fn snapshot_restore_roundtrip() {
        let mut notebook = Notebook::default();
        let now = Utc::now();
        notebook.draft.notes = "original notes".into();
        notebook.add_tag("alpha");
        let id = notebook.take_snapshot(now);

        notebook.draft.notes = "changed".into();
        notebook.add_tag("beta");
        assert!(notebook.restore_snapshot(id));
        assert_eq!(notebook.draft.notes, "original notes");
        assert_eq!(notebook.tags, vec!["alpha"]);
        assert_eq!(notebook.history.len(), 1);
        assert!(!notebook.restore_snapshot(Uuid::new_v4()));
    }

    #[test]
    fn history_search_filters_by_tag_and_text() {
        let mut notebook = Notebook::default();
        let now = Utc::now();
        notebook.draft.notes = "pricing experiment results".into();
        notebook.add_tag("pricing");
        notebook.take_snapshot(now);

        notebook.draft.notes = "hiring pipeline".into();
        notebook.remove_tag("pricing");
        notebook.add_tag("team");
        notebook.take_snapshot(now);

        assert_eq!(notebook.search_history("", None).len(), 2);
        assert_eq!(notebook.search_history("pricing", None).len(), 1);
        assert_eq!(notebook.search_history("", Some("team")).len(), 1);
        assert!(notebook.search_history("pricing", Some("team")).is_empty());
    }

    #[test]
    fn refine_concise_keeps_five_sentences() {
        let mut notebook = Notebook::default();
        notebook.draft.notes =
            "One. Two. Three. Four. Five. Six. Seven.".into();
        assert!(notebook.refine_notes(RefineMode::Concise));
        assert_eq!(notebook.draft.notes, "One. Two. Three. Four. Five.");
    }

    #[test]
    fn refine_investor_bullets() {
        let mut notebook = Notebook::default();
        notebook.draft.notes = "Revenue is up.\nChurn is down. Pipeline doubled.".into();
        assert!(notebook.refine_notes(RefineMode::InvestorBullets));
        assert_eq!(
            notebook.draft.notes,
            "- Revenue is up.\n- Churn is down.\n- Pipeline doubled."
        );
    }

    #[test]
    fn refine_risk_question_view() {
        let mut notebook = Notebook::default();
        notebook.draft.notes =
            "Churn risk is rising.\nShip the onboarding fix.\nWhat about runway?".into();
        assert!(notebook.refine_notes(RefineMode::RiskQuestion));
        let refined = notebook.draft.notes.clone();
        assert!(refined.starts_with("Risks:\n- Churn risk is rising."));
        assert!(refined.contains("Questions:\n- What about runway?"));

        notebook.draft.notes = String::new();
        assert!(!notebook.refine_notes(RefineMode::Concise));
    }

    #[test]
    fn risk_view_reports_absences() {
        let mut notebook = Notebook::default();
        notebook.draft.notes = "Everything is fine today.".into();
        notebook.refine_notes(RefineMode::RiskQuestion);
        assert_eq!(
            notebook.draft.notes,
            "Risks:\n- None explicitly stated\n\nQuestions:\n- None explicitly stated"
        );
    }

    #[test]
    fn markdown_export_covers_sections() {
        let mut notebook = Notebook::default();
        let now = Utc::now();
        notebook.draft.notes = "Raised the pilot price.".into();
        notebook.add_pin("92% retention");
        notebook.add_decision("Focus on enterprise", "larger contracts", "ana", "2026-09-01", now);
        let id = notebook.add_action("Send follow-up deck", "", "2026-08-20", now).unwrap();
        notebook.toggle_action(id);

        let md = notebook.to_markdown("Founder Brain Dump", now);
        assert!(md.starts_with("# Founder Brain Dump"));
        assert!(md.contains("## Pinned Highlights\n- 92% retention"));
        assert!(md.contains("- Focus on enterprise | why: larger contracts | owner: ana | revisit: 2026-09-01"));
        assert!(md.contains("- [x] Send follow-up deck | owner: n/a | due: 2026-08-20"));
    }

    #[test]
    fn csv_escapes_quotes() {
        let mut notebook = Notebook::default();
        notebook.add_action("Say \"yes\" to the pilot", "kim", "", Utc::now());
        let csv = notebook.actions_csv();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "title,owner,due_date,status,created_at");
        let row = lines.next().unwrap();
        assert!(row.starts_with("\"Say \"\"yes\"\" to the pilot\",\"kim\",\"\",\"open\""));
    }

    #[test]
    fn structured_summary_counts() {
        let mut notebook = Notebook::default();
        let now = Utc::now();
        notebook.add_tag("deck");
        notebook.add_pin("NDR 112%");
        notebook.add_action("Book partner call", "", "", now);
        let summary = notebook.structured_summary("Founder Brain Dump");
        assert!(summary.contains("Tags: deck"));
        assert!(summary.contains("Pins: 1"));
        assert!(summary.contains("Open actions: 1"));
        assert!(summary.ends_with("- NDR 112%"));
    }
}
