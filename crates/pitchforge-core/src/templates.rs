//! Audience checklist templates.
//!
//! Each audience profile maps to a fixed five-section checklist. Switching
//! audience is a destructive reset to the template, never a merge.

use crate::model::{Audience, ChecklistItem, ChecklistSection};

fn item(id: &str, label: &str, depends_on: &[&str]) -> ChecklistItem {
    ChecklistItem {
        id: id.into(),
        label: label.into(),
        checked: false,
        required: true,
        depends_on: depends_on.iter().map(|d| d.to_string()).collect(),
        evidence: String::new(),
        red_team_risk: String::new(),
    }
}

fn section(id: &str, label: &str, time_budget_secs: u32, items: Vec<ChecklistItem>) -> ChecklistSection {
    ChecklistSection {
        id: id.into(),
        label: label.into(),
        time_budget_secs,
        gate_passed: false,
        items,
    }
}

/// Build a fresh checklist for the given audience, all items unchecked.
pub fn sections_for(audience: Audience) -> Vec<ChecklistSection> {
    match audience {
        Audience::Angel => vec![
            section("problem", "Problem", 45, vec![
                item("problem-pain", "Pain is specific and frequent", &[]),
                item("problem-user", "Target user is tightly defined", &[]),
            ]),
            section("solution", "Solution", 60, vec![
                item("solution-demo", "Demo is stable and simple", &[]),
                item("solution-diff", "Differentiation is obvious", &["problem-pain"]),
            ]),
            section("gtm", "GTM", 50, vec![
                item("gtm-channel", "Primary channel is named", &[]),
                item("gtm-cost", "Acquisition cost assumptions are stated", &["gtm-channel"]),
            ]),
            section("financials", "Financials", 45, vec![
                item("fin-revenue", "Revenue model is clear", &[]),
                item("fin-runway", "Runway scenario is quantified", &[]),
            ]),
            section("ask", "Ask", 40, vec![
                item("ask-use", "Use of funds is line-item specific", &["fin-runway"]),
                item("ask-amount", "Ask amount and milestone plan are clear", &["ask-use"]),
            ]),
        ],
        Audience::SeedVc => vec![
            section("problem", "Problem", 40, vec![
                item("svc-problem-pain", "Pain is urgent and expensive", &[]),
                item("svc-problem-segment", "Initial wedge segment is defensible", &[]),
            ]),
            section("solution", "Solution", 55, vec![
                item("svc-solution-demo", "Demo proves key workflow", &[]),
                item("svc-solution-moat", "Moat thesis is explicit", &["svc-solution-demo"]),
            ]),
            section("gtm", "GTM", 55, vec![
                item("svc-gtm-motion", "Distribution motion is chosen", &[]),
                item("svc-gtm-loop", "Repeatable growth loop is defined", &["svc-gtm-motion"]),
            ]),
            section("financials", "Financials", 45, vec![
                item("svc-fin-cohort", "Cohort or retention proof is shown", &[]),
                item("svc-fin-runway", "18-month runway plan is modeled", &[]),
            ]),
            section("ask", "Ask", 45, vec![
                item("svc-ask-usage", "Capital allocation by function is clear", &["svc-fin-runway"]),
                item("svc-ask-milestones", "Milestones map to next raise", &["svc-ask-usage"]),
            ]),
        ],
        Audience::EnterpriseBuyer => vec![
            section("problem", "Problem", 40, vec![
                item("eb-problem-cost", "Current process cost is quantified", &[]),
                item("eb-problem-owner", "Economic buyer is identified", &[]),
            ]),
            section("solution", "Solution", 65, vec![
                item("eb-solution-roi", "Time-to-value is measurable", &[]),
                item("eb-solution-integrations", "Integration plan is realistic", &["eb-solution-roi"]),
            ]),
            section("gtm", "GTM", 45, vec![
                item("eb-gtm-sales", "Sales cycle map is clear", &[]),
                item("eb-gtm-pilot", "Pilot-to-rollout path is defined", &["eb-gtm-sales"]),
            ]),
            section("financials", "Financials", 40, vec![
                item("eb-fin-pricing", "Pricing model is defensible", &[]),
                item("eb-fin-support", "Delivery/support costs are covered", &[]),
            ]),
            section("ask", "Ask", 35, vec![
                item("eb-ask-next", "Decision request is explicit", &["eb-solution-integrations"]),
                item("eb-ask-procurement", "Procurement blockers are preempted", &["eb-ask-next"]),
            ]),
        ],
        Audience::AcceleratorDemoDay => vec![
            section("problem", "Problem", 35, vec![
                item("ad-problem-hook", "Opening hook lands in 10 seconds", &[]),
                item("ad-problem-stakes", "Stakes are memorable", &[]),
            ]),
            section("solution", "Solution", 55, vec![
                item("ad-solution-demo", "Live or recorded demo is crisp", &[]),
                item("ad-solution-proof", "Proof point follows the demo", &["ad-solution-demo"]),
            ]),
            section("gtm", "GTM", 40, vec![
                item("ad-gtm-now", "Why-now narrative is sharp", &[]),
                item("ad-gtm-channel", "Main growth channel is specific", &[]),
            ]),
            section("financials", "Financials", 35, vec![
                item("ad-fin-traction", "Traction headline has numbers", &[]),
                item("ad-fin-runway", "Burn and runway are investor-ready", &[]),
            ]),
            section("ask", "Ask", 35, vec![
                item("ad-ask-amount", "Raise amount is stated confidently", &["ad-fin-runway"]),
                item("ad-ask-cta", "Clear post-pitch CTA is included", &["ad-ask-amount"]),
            ]),
        ],
    }
}

/// Wrap a flat list of point labels into a single "General" section.
///
/// Used when a caller supplies plain labels instead of an audience template:
/// every point is required, dependency-free, and unchecked unless flagged.
pub fn from_flat_labels(labels: &[(String, bool)]) -> Vec<ChecklistSection> {
    vec![ChecklistSection {
        id: "general".into(),
        label: "General".into(),
        time_budget_secs: 120,
        gate_passed: false,
        items: labels
            .iter()
            .enumerate()
            .map(|(index, (label, checked))| ChecklistItem {
                id: format!("legacy-{index}"),
                label: label.clone(),
                checked: *checked,
                required: true,
                depends_on: Vec::new(),
                evidence: String::new(),
                red_team_risk: String::new(),
            })
            .collect(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_audience_has_five_sections_of_two_items() {
        for audience in Audience::ALL {
            let sections = sections_for(audience);
            assert_eq!(sections.len(), 5, "{audience}");
            for section in &sections {
                assert_eq!(section.items.len(), 2, "{audience}/{}", section.id);
                assert!(!section.gate_passed);
                assert!(section.items.iter().all(|i| i.required && !i.checked));
            }
        }
    }

    #[test]
    fn dependencies_resolve_within_template() {
        for audience in Audience::ALL {
            let sections = sections_for(audience);
            let ids: Vec<String> = sections
                .iter()
                .flat_map(|s| s.items.iter().map(|i| i.id.clone()))
                .collect();
            for section in &sections {
                for item in &section.items {
                    for dep in &item.depends_on {
                        assert!(ids.contains(dep), "{audience}: dangling dep {dep}");
                    }
                }
            }
        }
    }

    #[test]
    fn flat_labels_become_general_section() {
        let sections = from_flat_labels(&[("One".into(), false), ("Two".into(), true)]);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].id, "general");
        assert_eq!(sections[0].time_budget_secs, 120);
        assert_eq!(sections[0].items[0].id, "legacy-0");
        assert!(sections[0].items[1].checked);
    }
}
