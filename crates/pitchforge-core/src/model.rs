//! Core data model types for pitchforge.
//!
//! These are the fundamental types the coaching engines operate on:
//! questions, personas, attempts, checklist sections, and rehearsal runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Topic bucket for an investor question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    Moat,
    Retention,
    Timing,
    Gtm,
    Financials,
    General,
}

impl Default for QuestionCategory {
    fn default() -> Self {
        QuestionCategory::General
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionCategory::Moat => write!(f, "moat"),
            QuestionCategory::Retention => write!(f, "retention"),
            QuestionCategory::Timing => write!(f, "timing"),
            QuestionCategory::Gtm => write!(f, "gtm"),
            QuestionCategory::Financials => write!(f, "financials"),
            QuestionCategory::General => write!(f, "general"),
        }
    }
}

impl FromStr for QuestionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "moat" => Ok(QuestionCategory::Moat),
            "retention" => Ok(QuestionCategory::Retention),
            "timing" => Ok(QuestionCategory::Timing),
            "gtm" | "go-to-market" => Ok(QuestionCategory::Gtm),
            "financials" => Ok(QuestionCategory::Financials),
            "general" => Ok(QuestionCategory::General),
            other => Err(format!("unknown question category: {other}")),
        }
    }
}

/// A rehearsal question put to the founder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier for this question.
    pub id: String,
    /// The question text.
    pub text: String,
    /// Topic bucket used for keyword hints and heatmap grouping.
    #[serde(default)]
    pub category: QuestionCategory,
}

impl Question {
    /// The built-in question set used when no question bank is configured.
    pub fn default_set() -> Vec<Question> {
        vec![
            Question {
                id: "qa-moat".into(),
                text: "Why won't a big company copy you?".into(),
                category: QuestionCategory::Moat,
            },
            Question {
                id: "qa-retention".into(),
                text: "How do you reduce churn?".into(),
                category: QuestionCategory::Retention,
            },
            Question {
                id: "qa-timing".into(),
                text: "Why is now the right time?".into(),
                category: QuestionCategory::Timing,
            },
        ]
    }

    /// Build questions from plain text, cycling categories for variety.
    pub fn from_texts(texts: &[String]) -> Vec<Question> {
        const CYCLE: [QuestionCategory; 3] = [
            QuestionCategory::Moat,
            QuestionCategory::Retention,
            QuestionCategory::Timing,
        ];
        texts
            .iter()
            .enumerate()
            .map(|(index, text)| Question {
                id: format!("question-{index}"),
                text: text.clone(),
                category: CYCLE[index % CYCLE.len()],
            })
            .collect()
    }
}

/// Coerce a possibly-empty question list to a usable one.
pub fn normalize_questions(questions: Vec<Question>) -> Vec<Question> {
    if questions.is_empty() {
        Question::default_set()
    } else {
        questions
    }
}

/// Investor persona applied to answer scoring and feedback tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    Balanced,
    SkepticalVc,
    FriendlyAngel,
    EnterpriseCfo,
}

/// How a persona phrases its coaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaStyle {
    Direct,
    Skeptical,
    Supportive,
    Financial,
}

impl Persona {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Persona::Balanced => "Balanced Investor",
            Persona::SkepticalVc => "Skeptical VC",
            Persona::FriendlyAngel => "Friendly Angel",
            Persona::EnterpriseCfo => "Enterprise CFO",
        }
    }

    /// Multiplier applied to penalty terms while scoring answers.
    pub fn strictness(&self) -> f64 {
        match self {
            Persona::Balanced => 1.0,
            Persona::SkepticalVc => 1.25,
            Persona::FriendlyAngel => 0.9,
            Persona::EnterpriseCfo => 1.2,
        }
    }

    pub fn style(&self) -> PersonaStyle {
        match self {
            Persona::Balanced => PersonaStyle::Direct,
            Persona::SkepticalVc => PersonaStyle::Skeptical,
            Persona::FriendlyAngel => PersonaStyle::Supportive,
            Persona::EnterpriseCfo => PersonaStyle::Financial,
        }
    }
}

impl Default for Persona {
    fn default() -> Self {
        Persona::Balanced
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Persona::Balanced => write!(f, "balanced"),
            Persona::SkepticalVc => write!(f, "skeptical_vc"),
            Persona::FriendlyAngel => write!(f, "friendly_angel"),
            Persona::EnterpriseCfo => write!(f, "enterprise_cfo"),
        }
    }
}

impl FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "balanced" => Ok(Persona::Balanced),
            "skeptical_vc" | "skeptical" => Ok(Persona::SkepticalVc),
            "friendly_angel" | "angel" => Ok(Persona::FriendlyAngel),
            "enterprise_cfo" | "cfo" => Ok(Persona::EnterpriseCfo),
            other => Err(format!("unknown persona: {other}")),
        }
    }
}

/// A specific deficiency flagged on a scored answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaknessTag {
    NoAnswer,
    NoMetric,
    UnsupportedClaims,
    Evasive,
    Jargon,
    TooShort,
    TooLong,
    Shallow,
}

impl fmt::Display for WeaknessTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WeaknessTag::NoAnswer => "no_answer",
            WeaknessTag::NoMetric => "no_metric",
            WeaknessTag::UnsupportedClaims => "unsupported_claims",
            WeaknessTag::Evasive => "evasive",
            WeaknessTag::Jargon => "jargon",
            WeaknessTag::TooShort => "too_short",
            WeaknessTag::TooLong => "too_long",
            WeaknessTag::Shallow => "shallow",
        };
        write!(f, "{s}")
    }
}

/// One scored answer submission. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub id: Uuid,
    pub question_id: String,
    pub question_text: String,
    #[serde(default)]
    pub category: QuestionCategory,
    pub score: u8,
    pub words: usize,
    pub elapsed_secs: u64,
    pub answer: String,
    #[serde(default)]
    pub weakness_tags: Vec<WeaknessTag>,
    pub created_at: DateTime<Utc>,
}

/// A single point on the pitch checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Unique identifier within the checklist.
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub checked: bool,
    /// Required items gate the section; defaults to true.
    #[serde(default = "default_true")]
    pub required: bool,
    /// Ids this item depends on; may reference items in other sections.
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Evidence link, slide, or source backing the point.
    #[serde(default)]
    pub evidence: String,
    /// What an investor would challenge about this point.
    #[serde(default)]
    pub red_team_risk: String,
}

fn default_true() -> bool {
    true
}

/// An ordered group of checklist items with a manual readiness gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistSection {
    pub id: String,
    pub label: String,
    /// Seconds budgeted for this section when rehearsing.
    #[serde(default)]
    pub time_budget_secs: u32,
    #[serde(default)]
    pub gate_passed: bool,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl ChecklistSection {
    /// True when every required item is checked.
    pub fn all_required_done(&self) -> bool {
        self.items.iter().all(|item| !item.required || item.checked)
    }
}

/// Record of one timed rehearsal. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RehearsalRun {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub duration_secs: u64,
    /// Checklist completion percentage at the moment the run stopped.
    pub completion_pct: u8,
    /// Labels of sections whose gate was not passed.
    #[serde(default)]
    pub missed_sections: Vec<String>,
}

/// Audience profile selecting a checklist template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    Angel,
    SeedVc,
    EnterpriseBuyer,
    AcceleratorDemoDay,
}

impl Audience {
    pub fn label(&self) -> &'static str {
        match self {
            Audience::Angel => "Angel",
            Audience::SeedVc => "Seed VC",
            Audience::EnterpriseBuyer => "Enterprise Buyer",
            Audience::AcceleratorDemoDay => "Accelerator Demo Day",
        }
    }

    /// All selectable audiences, in menu order.
    pub const ALL: [Audience; 4] = [
        Audience::Angel,
        Audience::SeedVc,
        Audience::EnterpriseBuyer,
        Audience::AcceleratorDemoDay,
    ];
}

impl Default for Audience {
    fn default() -> Self {
        Audience::SeedVc
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Audience::Angel => write!(f, "angel"),
            Audience::SeedVc => write!(f, "seed_vc"),
            Audience::EnterpriseBuyer => write!(f, "enterprise_buyer"),
            Audience::AcceleratorDemoDay => write!(f, "accelerator_demo_day"),
        }
    }
}

impl FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "angel" => Ok(Audience::Angel),
            "seed_vc" | "seed-vc" => Ok(Audience::SeedVc),
            "enterprise_buyer" | "enterprise-buyer" => Ok(Audience::EnterpriseBuyer),
            "accelerator_demo_day" | "demo_day" => Ok(Audience::AcceleratorDemoDay),
            other => Err(format!("unknown audience: {other}")),
        }
    }
}

/// Render seconds as `M:SS`.
pub fn format_seconds(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_display_and_parse() {
        assert_eq!(QuestionCategory::Moat.to_string(), "moat");
        assert_eq!(QuestionCategory::Gtm.to_string(), "gtm");
        assert_eq!(
            "retention".parse::<QuestionCategory>().unwrap(),
            QuestionCategory::Retention
        );
        assert_eq!(
            "Financials".parse::<QuestionCategory>().unwrap(),
            QuestionCategory::Financials
        );
        assert!("growth".parse::<QuestionCategory>().is_err());
    }

    #[test]
    fn persona_strictness_and_style() {
        assert_eq!(Persona::Balanced.strictness(), 1.0);
        assert_eq!(Persona::SkepticalVc.strictness(), 1.25);
        assert_eq!(Persona::FriendlyAngel.strictness(), 0.9);
        assert_eq!(Persona::EnterpriseCfo.strictness(), 1.2);
        assert_eq!(Persona::EnterpriseCfo.style(), PersonaStyle::Financial);
        assert_eq!("cfo".parse::<Persona>().unwrap(), Persona::EnterpriseCfo);
    }

    #[test]
    fn audience_parse_roundtrip() {
        for audience in Audience::ALL {
            let parsed: Audience = audience.to_string().parse().unwrap();
            assert_eq!(parsed, audience);
        }
        assert_eq!(Audience::default(), Audience::SeedVc);
    }

    #[test]
    fn normalize_empty_questions_falls_back() {
        let questions = normalize_questions(vec![]);
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].id, "qa-moat");
    }

    #[test]
    fn questions_from_texts_cycle_categories() {
        let texts: Vec<String> = (0..4).map(|i| format!("q{i}")).collect();
        let questions = Question::from_texts(&texts);
        assert_eq!(questions[0].category, QuestionCategory::Moat);
        assert_eq!(questions[1].category, QuestionCategory::Retention);
        assert_eq!(questions[2].category, QuestionCategory::Timing);
        assert_eq!(questions[3].category, QuestionCategory::Moat);
    }

    #[test]
    fn checklist_item_serde_defaults() {
        let json = r#"{"id": "a", "label": "Point A"}"#;
        let item: ChecklistItem = serde_json::from_str(json).unwrap();
        assert!(!item.checked);
        assert!(item.required);
        assert!(item.depends_on.is_empty());
        assert!(item.evidence.is_empty());
    }

    #[test]
    fn format_seconds_pads() {
        assert_eq!(format_seconds(0), "0:00");
        assert_eq!(format_seconds(65), "1:05");
        assert_eq!(format_seconds(600), "10:00");
    }
}
