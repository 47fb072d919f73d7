//! The readiness engine.
//!
//! Maintains the audience checklist: dependency-gated item toggles, manual
//! section gates, the weighted readiness score, blocker derivation, and the
//! bounded rehearsal-run log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use uuid::Uuid;

use crate::model::{format_seconds, Audience, ChecklistItem, ChecklistSection, RehearsalRun};
use crate::templates;

/// Go/no-go threshold on the readiness score.
pub const GO_THRESHOLD: u8 = 80;

/// Rehearsal runs retained, newest first.
pub const MAX_REHEARSAL_RUNS: usize = 12;

/// Outcome of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The item changed state (and dependents were unchecked if needed).
    Toggled,
    /// The item stayed unchecked because a dependency is not checked.
    Blocked,
    /// No item with that id exists.
    NotFound,
}

/// Outcome of a gate toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Gate flipped; carries the new value.
    Toggled(bool),
    /// Required items are incomplete, gate untouched.
    RequiredIncomplete,
    /// No section with that id exists.
    NotFound,
}

/// Aggregate readiness figures for the whole checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessSummary {
    pub total_items: usize,
    pub checked_items: usize,
    pub evidence_covered: usize,
    pub risk_covered: usize,
    pub gates_passed: usize,
    pub total_sections: usize,
    /// round(100 * checked / total), 0 for an empty checklist.
    pub completion_pct: u8,
    /// Weighted composite: 45 completion + 20 evidence + 20 risk + 15 gates.
    pub readiness_score: u8,
}

impl ReadinessSummary {
    pub fn is_go(&self) -> bool {
        self.readiness_score >= GO_THRESHOLD
    }
}

/// Consistency trend over the rehearsal log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RehearsalTrend {
    InsufficientData,
    Improving(i64),
    Declining(i64),
    Stable,
}

impl fmt::Display for RehearsalTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RehearsalTrend::InsufficientData => write!(f, "Need at least 2 runs to show trend"),
            RehearsalTrend::Improving(delta) => {
                write!(f, "Improving (+{delta} points vs prior average)")
            }
            RehearsalTrend::Declining(delta) => {
                write!(f, "Declining ({delta} points vs prior average)")
            }
            RehearsalTrend::Stable => write!(f, "Stable (within +/-4 points of prior average)"),
        }
    }
}

/// Full checklist session state. Serialized as a snapshot; every field is
/// defaulted so older or partial snapshots still load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistState {
    #[serde(default)]
    pub audience: Audience,
    #[serde(default)]
    pub sections: Vec<ChecklistSection>,
    /// Newest first, bounded to [`MAX_REHEARSAL_RUNS`].
    #[serde(default)]
    pub rehearsal_log: Vec<RehearsalRun>,
    #[serde(default = "default_target_minutes")]
    pub target_minutes: u32,
    /// Set while a rehearsal run is in progress.
    #[serde(default)]
    pub run_started_at: Option<DateTime<Utc>>,
}

fn default_target_minutes() -> u32 {
    5
}

impl Default for ChecklistState {
    fn default() -> Self {
        Self::new(Audience::default())
    }
}

impl ChecklistState {
    /// Fresh state seeded from the audience template.
    pub fn new(audience: Audience) -> Self {
        Self {
            audience,
            sections: templates::sections_for(audience),
            rehearsal_log: Vec::new(),
            target_minutes: default_target_minutes(),
            run_started_at: None,
        }
    }

    /// Fresh state from a flat list of (label, checked) points.
    pub fn from_flat_labels(labels: &[(String, bool)]) -> Self {
        Self {
            audience: Audience::default(),
            sections: templates::from_flat_labels(labels),
            rehearsal_log: Vec::new(),
            target_minutes: default_target_minutes(),
            run_started_at: None,
        }
    }

    /// Re-seed from the template if a loaded snapshot carried no sections.
    pub fn ensure_seeded(&mut self) {
        if self.sections.is_empty() {
            self.sections = templates::sections_for(self.audience);
        }
    }

    /// Switch audience. Destructive: replaces all sections with the
    /// template; the rehearsal log is kept.
    pub fn set_audience(&mut self, audience: Audience) {
        self.audience = audience;
        self.sections = templates::sections_for(audience);
    }

    fn find_item(&self, item_id: &str) -> Option<&ChecklistItem> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter())
            .find(|i| i.id == item_id)
    }

    fn item_checked(&self, item_id: &str) -> bool {
        self.find_item(item_id).is_some_and(|i| i.checked)
    }

    /// True when the item cannot be checked because a dependency is open.
    pub fn is_blocked(&self, item: &ChecklistItem) -> bool {
        item.depends_on.iter().any(|dep| !self.item_checked(dep))
    }

    /// All items that transitively depend on `source_id`, breadth-first.
    pub fn dependents_of(&self, source_id: &str) -> Vec<String> {
        let mut dependents: Vec<String> = Vec::new();
        let mut queue: VecDeque<String> = VecDeque::from([source_id.to_string()]);

        while let Some(current) = queue.pop_front() {
            for section in &self.sections {
                for item in &section.items {
                    if item.depends_on.iter().any(|d| d == &current)
                        && !dependents.contains(&item.id)
                    {
                        dependents.push(item.id.clone());
                        queue.push_back(item.id.clone());
                    }
                }
            }
        }

        dependents
    }

    /// Toggle an item's checked state.
    ///
    /// Checking is refused while any dependency is unchecked. Unchecking
    /// cascades to every transitive dependent. Afterwards every section's
    /// gate is reset unless its required items are all checked; gates are
    /// never set true here.
    pub fn toggle(&mut self, item_id: &str) -> ToggleOutcome {
        let Some(source) = self.find_item(item_id) else {
            return ToggleOutcome::NotFound;
        };

        if !source.checked && self.is_blocked(source) {
            return ToggleOutcome::Blocked;
        }

        let dependents = if source.checked {
            self.dependents_of(item_id)
        } else {
            Vec::new()
        };

        for section in &mut self.sections {
            for item in &mut section.items {
                if item.id == item_id {
                    item.checked = !item.checked;
                } else if dependents.contains(&item.id) {
                    item.checked = false;
                }
            }
            if !section.all_required_done() {
                section.gate_passed = false;
            }
        }

        ToggleOutcome::Toggled
    }

    /// Flip a section's gate. Only permitted once all required items in the
    /// section are checked; otherwise nothing changes.
    pub fn toggle_gate(&mut self, section_id: &str) -> GateOutcome {
        let Some(section) = self.sections.iter_mut().find(|s| s.id == section_id) else {
            return GateOutcome::NotFound;
        };
        if !section.all_required_done() {
            return GateOutcome::RequiredIncomplete;
        }
        section.gate_passed = !section.gate_passed;
        GateOutcome::Toggled(section.gate_passed)
    }

    /// Append a new required, dependency-free point to a section.
    /// Blank labels are ignored. Returns the new item id.
    pub fn add_item(&mut self, section_id: &str, label: &str) -> Option<String> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        let section = self.sections.iter_mut().find(|s| s.id == section_id)?;
        let id = format!("{section_id}-{}", Uuid::new_v4().simple());
        section.items.push(ChecklistItem {
            id: id.clone(),
            label: label.to_string(),
            checked: false,
            required: true,
            depends_on: Vec::new(),
            evidence: String::new(),
            red_team_risk: String::new(),
        });
        if !section.all_required_done() {
            section.gate_passed = false;
        }
        Some(id)
    }

    /// Delete an item. Returns false if no item matched.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let mut removed = false;
        for section in &mut self.sections {
            let before = section.items.len();
            section.items.retain(|i| i.id != item_id);
            if section.items.len() != before {
                removed = true;
                if !section.all_required_done() {
                    section.gate_passed = false;
                }
            }
        }
        removed
    }

    pub fn set_evidence(&mut self, item_id: &str, evidence: &str) -> bool {
        self.update_item(item_id, |item| item.evidence = evidence.to_string())
    }

    pub fn set_red_team_risk(&mut self, item_id: &str, risk: &str) -> bool {
        self.update_item(item_id, |item| item.red_team_risk = risk.to_string())
    }

    fn update_item(&mut self, item_id: &str, apply: impl FnOnce(&mut ChecklistItem)) -> bool {
        for section in &mut self.sections {
            if let Some(item) = section.items.iter_mut().find(|i| i.id == item_id) {
                apply(item);
                if !section.all_required_done() {
                    section.gate_passed = false;
                }
                return true;
            }
        }
        false
    }

    pub fn set_time_budget(&mut self, section_id: &str, seconds: u32) -> bool {
        let Some(section) = self.sections.iter_mut().find(|s| s.id == section_id) else {
            return false;
        };
        section.time_budget_secs = seconds;
        true
    }

    pub fn set_target_minutes(&mut self, minutes: u32) {
        self.target_minutes = minutes.max(1);
    }

    /// Sum of the section time budgets, in seconds.
    pub fn total_budget_secs(&self) -> u64 {
        self.sections
            .iter()
            .map(|s| u64::from(s.time_budget_secs))
            .sum()
    }

    /// Compute the readiness summary for the current state.
    pub fn summary(&self) -> ReadinessSummary {
        let total_items: usize = self.sections.iter().map(|s| s.items.len()).sum();
        let checked: Vec<&ChecklistItem> = self
            .sections
            .iter()
            .flat_map(|s| s.items.iter())
            .filter(|i| i.checked)
            .collect();
        let evidence_covered = checked.iter().filter(|i| !i.evidence.trim().is_empty()).count();
        let risk_covered = checked
            .iter()
            .filter(|i| !i.red_team_risk.trim().is_empty())
            .count();
        let gates_passed = self.sections.iter().filter(|s| s.gate_passed).count();
        let total_sections = self.sections.len();

        let completion = if total_items > 0 {
            checked.len() as f64 / total_items as f64
        } else {
            0.0
        };
        let evidence_ratio = if checked.is_empty() {
            0.0
        } else {
            evidence_covered as f64 / checked.len() as f64
        };
        let risk_ratio = if checked.is_empty() {
            0.0
        } else {
            risk_covered as f64 / checked.len() as f64
        };
        let gate_ratio = gates_passed as f64 / total_sections.max(1) as f64;

        let readiness_score =
            (45.0 * completion + 20.0 * evidence_ratio + 20.0 * risk_ratio + 15.0 * gate_ratio)
                .round() as u8;
        let completion_pct = (completion * 100.0).round() as u8;

        ReadinessSummary {
            total_items,
            checked_items: checked.len(),
            evidence_covered,
            risk_covered,
            gates_passed,
            total_sections,
            completion_pct,
            readiness_score,
        }
    }

    /// Derive the current blocker list, most specific first.
    pub fn blockers(&self) -> Vec<String> {
        let mut list = Vec::new();

        for section in &self.sections {
            let incomplete_required = section
                .items
                .iter()
                .filter(|i| i.required && !i.checked)
                .count();
            if incomplete_required > 0 {
                list.push(format!(
                    "{}: {incomplete_required} required items incomplete",
                    section.label
                ));
            }
            if !section.gate_passed {
                list.push(format!("{}: readiness gate not passed", section.label));
            }
        }

        let checked: Vec<&ChecklistItem> = self
            .sections
            .iter()
            .flat_map(|s| s.items.iter())
            .filter(|i| i.checked)
            .collect();
        let missing_evidence = checked.iter().filter(|i| i.evidence.trim().is_empty()).count();
        if missing_evidence > 0 {
            list.push(format!(
                "{missing_evidence} completed points are missing evidence links"
            ));
        }
        let missing_risk = checked
            .iter()
            .filter(|i| i.red_team_risk.trim().is_empty())
            .count();
        if missing_risk > 0 {
            list.push(format!(
                "{missing_risk} completed points are missing red-team risks"
            ));
        }

        let target_secs = u64::from(self.target_minutes) * 60;
        let budget_secs = self.total_budget_secs();
        if budget_secs > target_secs {
            list.push(format!(
                "Time budget exceeds target by {}",
                format_seconds(budget_secs - target_secs)
            ));
        }

        list
    }

    /// Begin a timed rehearsal run.
    pub fn start_run(&mut self, now: DateTime<Utc>) {
        self.run_started_at = Some(now);
    }

    pub fn is_rehearsing(&self) -> bool {
        self.run_started_at.is_some()
    }

    /// Stop the active run and record it in the bounded log.
    /// Returns None when no run was in progress.
    pub fn stop_run(&mut self, now: DateTime<Utc>) -> Option<RehearsalRun> {
        let started = self.run_started_at.take()?;
        let duration_secs = (now - started).num_seconds().max(1) as u64;
        let missed_sections = self
            .sections
            .iter()
            .filter(|s| !s.gate_passed)
            .map(|s| s.label.clone())
            .collect();

        let run = RehearsalRun {
            id: Uuid::new_v4(),
            recorded_at: now,
            duration_secs,
            completion_pct: self.summary().completion_pct,
            missed_sections,
        };

        self.rehearsal_log.insert(0, run.clone());
        self.rehearsal_log.truncate(MAX_REHEARSAL_RUNS);
        Some(run)
    }

    /// Latest-vs-prior-average consistency trend over the run log.
    pub fn trend(&self) -> RehearsalTrend {
        if self.rehearsal_log.len() < 2 {
            return RehearsalTrend::InsufficientData;
        }
        let latest = f64::from(self.rehearsal_log[0].completion_pct);
        let rest = &self.rehearsal_log[1..];
        let previous_average =
            rest.iter().map(|r| f64::from(r.completion_pct)).sum::<f64>() / rest.len() as f64;
        // Half-up rounding, also for negative deltas.
        let delta = (latest - previous_average + 0.5).floor() as i64;

        if delta >= 5 {
            RehearsalTrend::Improving(delta)
        } else if delta <= -5 {
            RehearsalTrend::Declining(delta)
        } else {
            RehearsalTrend::Stable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn seed_vc() -> ChecklistState {
        ChecklistState::new(Audience::SeedVc)
    }

    #[test]
    fn checking_blocked_item_is_a_no_op() {
        let mut state = seed_vc();
        // svc-solution-moat depends on svc-solution-demo, which is unchecked.
        let before = state.clone();
        assert_eq!(state.toggle("svc-solution-moat"), ToggleOutcome::Blocked);
        assert_eq!(
            serde_json::to_string(&state.sections).unwrap(),
            serde_json::to_string(&before.sections).unwrap()
        );
    }

    #[test]
    fn checking_after_dependency_succeeds() {
        let mut state = seed_vc();
        assert_eq!(state.toggle("svc-solution-demo"), ToggleOutcome::Toggled);
        assert_eq!(state.toggle("svc-solution-moat"), ToggleOutcome::Toggled);
        assert!(state.find_item("svc-solution-moat").unwrap().checked);
    }

    #[test]
    fn unchecking_cascades_to_transitive_dependents() {
        let mut state = seed_vc();
        // Chain: svc-fin-runway <- svc-ask-usage <- svc-ask-milestones.
        state.toggle("svc-fin-runway");
        state.toggle("svc-ask-usage");
        state.toggle("svc-ask-milestones");
        state.toggle("svc-solution-demo");

        state.toggle("svc-fin-runway");

        assert!(!state.find_item("svc-fin-runway").unwrap().checked);
        assert!(!state.find_item("svc-ask-usage").unwrap().checked);
        assert!(!state.find_item("svc-ask-milestones").unwrap().checked);
        // Outside the dependent closure, nothing changes.
        assert!(state.find_item("svc-solution-demo").unwrap().checked);
    }

    #[test]
    fn dependency_invariant_holds_after_toggle_sequences() {
        let mut state = seed_vc();
        let ids: Vec<String> = state
            .sections
            .iter()
            .flat_map(|s| s.items.iter().map(|i| i.id.clone()))
            .collect();

        // Drive a deterministic pseudo-random toggle sequence.
        let mut x: u64 = 7;
        for _ in 0..200 {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let id = &ids[(x >> 33) as usize % ids.len()];
            state.toggle(id);

            for section in &state.sections {
                for item in &section.items {
                    if item.checked {
                        for dep in &item.depends_on {
                            assert!(state.item_checked(dep), "{}: dep {dep} open", item.id);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn gate_requires_all_required_items() {
        let mut state = seed_vc();
        assert_eq!(state.toggle_gate("problem"), GateOutcome::RequiredIncomplete);

        state.toggle("svc-problem-pain");
        state.toggle("svc-problem-segment");
        assert_eq!(state.toggle_gate("problem"), GateOutcome::Toggled(true));

        // Unchecking any item drops the gate.
        state.toggle("svc-problem-pain");
        let problem = state.sections.iter().find(|s| s.id == "problem").unwrap();
        assert!(!problem.gate_passed);
    }

    #[test]
    fn fresh_seed_vc_scores_zero_with_ten_section_blockers() {
        let state = seed_vc();
        let summary = state.summary();
        assert_eq!(summary.readiness_score, 0);
        assert_eq!(summary.completion_pct, 0);
        assert!(!summary.is_go());

        let blockers = state.blockers();
        let incomplete = blockers
            .iter()
            .filter(|b| b.contains("required items incomplete"))
            .count();
        let gates = blockers
            .iter()
            .filter(|b| b.contains("readiness gate not passed"))
            .count();
        assert_eq!(incomplete, 5);
        assert_eq!(gates, 5);
    }

    #[test]
    fn readiness_score_is_monotone_in_each_signal() {
        let mut state = seed_vc();
        let base = state.summary().readiness_score;

        state.toggle("svc-problem-pain");
        let after_completion = state.summary().readiness_score;
        assert!(after_completion >= base);

        state.set_evidence("svc-problem-pain", "cohort deck, slide 4");
        let after_evidence = state.summary().readiness_score;
        assert!(after_evidence >= after_completion);

        state.set_red_team_risk("svc-problem-pain", "pain may be episodic");
        let after_risk = state.summary().readiness_score;
        assert!(after_risk >= after_evidence);
    }

    #[test]
    fn full_checklist_reaches_go() {
        let mut state = seed_vc();
        let ids: Vec<String> = state
            .sections
            .iter()
            .flat_map(|s| s.items.iter().map(|i| i.id.clone()))
            .collect();
        // Two passes so dependents unlock after their dependencies.
        for _ in 0..2 {
            for id in &ids {
                if !state.item_checked(id) {
                    state.toggle(id);
                }
            }
        }
        for id in &ids {
            state.set_evidence(id, "evidence");
            state.set_red_team_risk(id, "risk");
        }
        let section_ids: Vec<String> = state.sections.iter().map(|s| s.id.clone()).collect();
        for id in &section_ids {
            assert_eq!(state.toggle_gate(id), GateOutcome::Toggled(true));
        }

        let summary = state.summary();
        assert_eq!(summary.readiness_score, 100);
        assert!(summary.is_go());
        assert!(state.blockers().is_empty());
    }

    #[test]
    fn time_budget_blocker_reports_overage() {
        let mut state = seed_vc();
        state.set_target_minutes(1);
        // seed_vc budgets total 240s; target 60s; overage 180s = 3:00.
        let blockers = state.blockers();
        assert!(blockers.iter().any(|b| b == "Time budget exceeds target by 3:00"));
    }

    #[test]
    fn audience_switch_is_a_destructive_reset() {
        let mut state = seed_vc();
        state.toggle("svc-problem-pain");
        state.set_audience(Audience::Angel);
        assert_eq!(state.audience, Audience::Angel);
        assert!(state.find_item("svc-problem-pain").is_none());
        assert!(state
            .sections
            .iter()
            .flat_map(|s| s.items.iter())
            .all(|i| !i.checked));
    }

    #[test]
    fn rehearsal_log_is_bounded_and_newest_first() {
        let mut state = seed_vc();
        let t0 = Utc::now();
        for i in 0..15 {
            state.start_run(t0 + Duration::seconds(i * 100));
            state.stop_run(t0 + Duration::seconds(i * 100 + 30));
        }
        assert_eq!(state.rehearsal_log.len(), MAX_REHEARSAL_RUNS);
        assert!(state.rehearsal_log[0].recorded_at > state.rehearsal_log[1].recorded_at);
        assert_eq!(state.rehearsal_log[0].duration_secs, 30);
    }

    #[test]
    fn stop_without_start_returns_none() {
        let mut state = seed_vc();
        assert!(state.stop_run(Utc::now()).is_none());
    }

    #[test]
    fn run_duration_floors_at_one_second() {
        let mut state = seed_vc();
        let now = Utc::now();
        state.start_run(now);
        let run = state.stop_run(now).unwrap();
        assert_eq!(run.duration_secs, 1);
    }

    #[test]
    fn missed_sections_lists_failed_gates() {
        let mut state = seed_vc();
        state.toggle("svc-problem-pain");
        state.toggle("svc-problem-segment");
        state.toggle_gate("problem");

        let now = Utc::now();
        state.start_run(now);
        let run = state.stop_run(now + Duration::seconds(90)).unwrap();
        assert_eq!(run.missed_sections.len(), 4);
        assert!(!run.missed_sections.contains(&"Problem".to_string()));
    }

    #[test]
    fn trend_transitions() {
        fn push(state: &mut ChecklistState, pct: u8) {
            state.rehearsal_log.insert(
                0,
                RehearsalRun {
                    id: Uuid::new_v4(),
                    recorded_at: Utc::now(),
                    duration_secs: 60,
                    completion_pct: pct,
                    missed_sections: vec![],
                },
            );
        }

        let mut state = seed_vc();
        assert_eq!(state.trend(), RehearsalTrend::InsufficientData);

        push(&mut state, 50);
        push(&mut state, 60);
        assert_eq!(state.trend(), RehearsalTrend::Improving(10));
        push(&mut state, 40);
        assert_eq!(state.trend(), RehearsalTrend::Declining(-15));
        push(&mut state, 46);
        assert_eq!(state.trend(), RehearsalTrend::Stable);
    }

    #[test]
    fn snapshot_roundtrip_and_reseed() {
        let state = seed_vc();
        let json = serde_json::to_string(&state).unwrap();
        let restored: ChecklistState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.sections.len(), 5);

        let mut empty: ChecklistState = serde_json::from_str("{}").unwrap();
        assert!(empty.sections.is_empty());
        empty.ensure_seeded();
        assert_eq!(empty.sections.len(), 5);
        assert_eq!(empty.audience, Audience::SeedVc);
    }
}
