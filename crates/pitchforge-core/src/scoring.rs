//! Heuristic answer scoring.
//!
//! Scores free-text answers to investor questions from lexical signals:
//! length, category keyword depth, numeric proof, jargon, evasiveness, and
//! unsupported claims. The constants are fixed policy, not tunables.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Persona, Question, QuestionCategory, WeaknessTag};

/// Keywords that signal depth for each question category.
pub fn hints_for(category: QuestionCategory) -> &'static [&'static str] {
    match category {
        QuestionCategory::Moat => &["moat", "distribution", "speed", "focus", "data", "defensible"],
        QuestionCategory::Retention => &[
            "retention",
            "onboarding",
            "activation",
            "support",
            "cohort",
            "value",
        ],
        QuestionCategory::Timing => &["timing", "market", "shift", "adoption", "trend", "window"],
        QuestionCategory::Gtm => &[
            "channel",
            "pipeline",
            "acquisition",
            "conversion",
            "sales",
            "repeatable",
        ],
        QuestionCategory::Financials => &[
            "margin",
            "burn",
            "runway",
            "revenue",
            "cash",
            "unit economics",
        ],
        QuestionCategory::General => &["customer", "metric", "proof", "risk", "execution", "roadmap"],
    }
}

const BUZZWORDS: &[&str] = &[
    "revolutionary",
    "game-changing",
    "best-in-class",
    "world-class",
    "synergy",
    "disruptive",
    "next-gen",
    "ai-powered",
    "seamless",
];

const EVASIVE_PHRASES: &[&str] = &[
    "it depends",
    "we are exploring",
    "hard to say",
    "too early to tell",
    "we'll see",
    "can't disclose",
    "no comment",
];

const PROOF_SIGNALS: &[&str] = &[
    "because",
    "for example",
    "customer",
    "case study",
    "cohort",
    "retention",
    "pilot",
    "contract",
    "metric",
    "kpi",
    "mrr",
    "arr",
    "nps",
    "source",
    "evidence",
    "benchmark",
];

const MITIGATION_SIGNALS: &[&str] = &["mitigate", "reduce", "fallback", "backup", "if", "plan"];

// Percentages, dollar amounts, "3x" multipliers, first-person growth verbs,
// and superlatives all read as claims that want backing proof.
static CLAIM_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b\d+(\.\d+)?%\b",
        r"\$\d+[a-z]*",
        r"\b\d+x\b",
        r"\b(we|our)\s+(grew|improved|reduced|cut|increased|doubled|tripled)\b",
        r"\b(top|leading|best)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("claim pattern"))
    .collect()
});

/// Count list entries contained in the text (substring match, each entry
/// counted at most once).
fn count_matches(text: &str, list: &[&str]) -> usize {
    list.iter().filter(|entry| text.contains(*entry)).count()
}

/// Total claim-pattern matches in the cleaned answer.
fn count_claims(cleaned: &str) -> usize {
    CLAIM_PATTERNS
        .iter()
        .map(|pattern| pattern.find_iter(cleaned).count())
        .sum()
}

/// The full signal breakdown for one scored answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerAnalysis {
    /// Confidence score, 0 for a blank answer, otherwise in [25, 98].
    pub score: u8,
    pub words: usize,
    pub hint_matches: usize,
    pub has_number: bool,
    pub jargon_count: usize,
    pub evasive_count: usize,
    pub claim_count: usize,
    pub proof_count: usize,
    pub unsupported_claims: usize,
    pub elapsed_secs: u64,
    pub weakness_tags: Vec<WeaknessTag>,
}

impl AnswerAnalysis {
    fn blank() -> Self {
        Self {
            score: 0,
            words: 0,
            hint_matches: 0,
            has_number: false,
            jargon_count: 0,
            evasive_count: 0,
            claim_count: 0,
            proof_count: 0,
            unsupported_claims: 0,
            elapsed_secs: 0,
            weakness_tags: vec![WeaknessTag::NoAnswer],
        }
    }
}

/// Score a free-text answer against a question under a persona.
///
/// A blank answer scores 0 with the `no_answer` tag; anything else lands in
/// [25, 98]. Weakness tags are derived from fixed thresholds independently
/// of the score.
pub fn score_answer(
    answer: &str,
    question: &Question,
    elapsed_secs: u64,
    persona: Persona,
) -> AnswerAnalysis {
    let cleaned = answer.trim().to_lowercase();
    if cleaned.is_empty() {
        return AnswerAnalysis::blank();
    }

    let words = cleaned.split_whitespace().count();
    let hint_matches = count_matches(&cleaned, hints_for(question.category));
    let has_number = cleaned.chars().any(|c| c.is_ascii_digit());
    let jargon_count = count_matches(&cleaned, BUZZWORDS);
    let evasive_count = count_matches(&cleaned, EVASIVE_PHRASES);
    let claim_count = count_claims(&cleaned);
    let proof_count = count_matches(&cleaned, PROOF_SIGNALS) + usize::from(has_number);
    let unsupported_claims = claim_count.saturating_sub(proof_count);

    let mut score: i64 = 46;
    if words >= 20 {
        score += 11;
    }
    if words >= 40 {
        score += 8;
    }
    if words >= 80 {
        score += 3;
    }
    if words > 150 {
        score -= 9;
    }
    score += hint_matches as i64 * 6;
    if has_number {
        score += 8;
    }
    score += (proof_count as i64 * 3).min(12);

    let strictness = persona.strictness();
    score -= (jargon_count as f64 * 3.0 * strictness).round() as i64;
    score -= (evasive_count as f64 * 8.0 * strictness).round() as i64;
    score -= (unsupported_claims as f64 * 6.0 * strictness).round() as i64;
    if elapsed_secs < 15 {
        score -= 8;
    }
    if elapsed_secs > 90 {
        score -= 6;
    }

    let mut weakness_tags = Vec::new();
    if !has_number {
        weakness_tags.push(WeaknessTag::NoMetric);
    }
    if unsupported_claims > 0 {
        weakness_tags.push(WeaknessTag::UnsupportedClaims);
    }
    if evasive_count > 0 {
        weakness_tags.push(WeaknessTag::Evasive);
    }
    if jargon_count > 1 {
        weakness_tags.push(WeaknessTag::Jargon);
    }
    if words < 20 {
        weakness_tags.push(WeaknessTag::TooShort);
    }
    if words > 150 {
        weakness_tags.push(WeaknessTag::TooLong);
    }
    if hint_matches < 2 {
        weakness_tags.push(WeaknessTag::Shallow);
    }

    AnswerAnalysis {
        score: score.clamp(25, 98) as u8,
        words,
        hint_matches,
        has_number,
        jargon_count,
        evasive_count,
        claim_count,
        proof_count,
        unsupported_claims,
        elapsed_secs,
        weakness_tags,
    }
}

/// A scored rebuttal with its coaching line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebuttalReview {
    /// 0 for a blank rebuttal, otherwise in [30, 98].
    pub score: u8,
    pub feedback: String,
}

/// Score a rebuttal against the objection it answers.
///
/// Relevance is a crude lexical-overlap check: any objection token longer
/// than four characters appearing in the rebuttal counts.
pub fn score_rebuttal(text: &str, objection: &str) -> RebuttalReview {
    let cleaned = text.trim().to_lowercase();
    if cleaned.is_empty() {
        return RebuttalReview {
            score: 0,
            feedback: "Write a rebuttal first.".into(),
        };
    }

    let words = cleaned.split_whitespace().count();
    let has_metric = cleaned.chars().any(|c| c.is_ascii_digit());
    let addresses_objection = objection
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|token| token.len() > 4)
        .any(|token| cleaned.contains(token));
    let has_mitigation = MITIGATION_SIGNALS.iter().any(|token| cleaned.contains(token));

    let mut score: i64 = 48;
    if words >= 20 {
        score += 14;
    }
    if has_metric {
        score += 12;
    }
    if addresses_objection {
        score += 14;
    }
    if has_mitigation {
        score += 10;
    }
    if words > 130 {
        score -= 7;
    }
    let final_score = score.clamp(30, 98) as u8;

    let feedback = if final_score >= 82 {
        "Strong rebuttal. Direct, quantified, and risk-aware."
    } else if final_score >= 68 {
        "Good rebuttal. Add one tighter proof element."
    } else {
        "Rebuttal needs sharper evidence and clearer mitigation language."
    };

    RebuttalReview {
        score: final_score,
        feedback: feedback.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(category: QuestionCategory) -> Question {
        Question {
            id: "q".into(),
            text: "Why won't a big company copy you?".into(),
            category,
        }
    }

    #[test]
    fn blank_answer_scores_zero_with_no_answer_tag() {
        let analysis = score_answer("   ", &question(QuestionCategory::Moat), 30, Persona::Balanced);
        assert_eq!(analysis.score, 0);
        assert_eq!(analysis.words, 0);
        assert_eq!(analysis.weakness_tags, vec![WeaknessTag::NoAnswer]);
    }

    #[test]
    fn quantified_answer_lands_in_the_seventies() {
        let answer = "We grew revenue 40% this quarter because of our enterprise pilot \
                      with Acme Corp, validated by a 3x increase in retained MRR";
        let analysis = score_answer(answer, &question(QuestionCategory::General), 30, Persona::Balanced);

        assert!(analysis.has_number);
        assert_eq!(analysis.claim_count, 2, "3x multiplier + we grew");
        assert_eq!(analysis.proof_count, 4, "because/pilot/mrr + digit");
        assert_eq!(analysis.unsupported_claims, 0);
        assert_eq!(analysis.score, 77);
        assert!(!analysis.weakness_tags.contains(&WeaknessTag::NoMetric));
        assert!(!analysis.weakness_tags.contains(&WeaknessTag::TooShort));
    }

    #[test]
    fn non_blank_scores_stay_in_bounds() {
        let floor = score_answer(
            "It depends, hard to say, too early to tell.",
            &question(QuestionCategory::Moat),
            2,
            Persona::SkepticalVc,
        );
        assert_eq!(floor.score, 25);

        let strong = "Our moat is distribution speed and proprietary data: 18 design partners, \
                      92% logo retention across three cohorts, and a defensible focus on \
                      compliance workflows because switching costs compound with every \
                      integration a customer turns on, which we benchmark every quarter.";
        let ceiling = score_answer(strong, &question(QuestionCategory::Moat), 45, Persona::FriendlyAngel);
        assert!(ceiling.score >= 25 && ceiling.score <= 98);
    }

    #[test]
    fn stricter_personas_penalize_harder() {
        let evasive = "It depends on the market, hard to say right now, we are exploring options \
                       and it is too early to tell where this goes for us in the next quarter.";
        let q = question(QuestionCategory::Timing);
        let friendly = score_answer(evasive, &q, 30, Persona::FriendlyAngel);
        let skeptical = score_answer(evasive, &q, 30, Persona::SkepticalVc);
        assert!(skeptical.score < friendly.score);
        assert!(skeptical.weakness_tags.contains(&WeaknessTag::Evasive));
    }

    #[test]
    fn rushed_and_rambling_answers_lose_points() {
        let q = question(QuestionCategory::Gtm);
        let body = "our channel pipeline converts at a repeatable rate across sales segments";
        let calm = score_answer(body, &q, 30, Persona::Balanced);
        let rushed = score_answer(body, &q, 5, Persona::Balanced);
        let slow = score_answer(body, &q, 120, Persona::Balanced);
        assert_eq!(calm.score - rushed.score, 8);
        assert_eq!(calm.score - slow.score, 6);
    }

    #[test]
    fn jargon_heavy_answer_is_tagged() {
        let buzz = "Our revolutionary, game-changing, best-in-class platform delivers seamless \
                    synergy for every disruptive next-gen customer journey in the enterprise.";
        let analysis = score_answer(buzz, &question(QuestionCategory::General), 30, Persona::Balanced);
        assert!(analysis.jargon_count > 1);
        assert!(analysis.weakness_tags.contains(&WeaknessTag::Jargon));
    }

    #[test]
    fn claim_counting_matches_patterns() {
        assert_eq!(count_claims("we grew 3x and we doubled output"), 3);
        assert_eq!(count_claims("$4m arr and the best team"), 2);
        // A percent sign followed by whitespace has no trailing word
        // boundary, so it does not register as a claim.
        assert_eq!(count_claims("grew 40% this year"), 0);
        assert_eq!(count_claims("nothing numeric here"), 0);
    }

    #[test]
    fn unsupported_claims_never_go_negative() {
        let analysis = score_answer(
            "because of customer evidence from the pilot cohort",
            &question(QuestionCategory::General),
            30,
            Persona::Balanced,
        );
        assert_eq!(analysis.claim_count, 0);
        assert_eq!(analysis.unsupported_claims, 0);
    }

    #[test]
    fn blank_rebuttal_scores_zero() {
        let review = score_rebuttal("", "I don't buy this yet.");
        assert_eq!(review.score, 0);
        assert_eq!(review.feedback, "Write a rebuttal first.");
    }

    #[test]
    fn overlapping_quantified_rebuttal_scores_high() {
        let objection = "Your claims sound optimistic. Show third-party evidence or customer-level proof.";
        let rebuttal = "We can show third-party evidence today: 14 reference customers, a plan to \
                        reduce concentration below 20%, and a fallback pricing tier if expansion slows.";
        let review = score_rebuttal(rebuttal, objection);
        assert_eq!(review.score, 98);
        assert!(review.feedback.starts_with("Strong rebuttal"));
    }

    #[test]
    fn rebuttal_scores_stay_in_bounds() {
        let review = score_rebuttal("fine", "What happens if your core assumption is wrong next quarter?");
        assert!(review.score >= 30 && review.score <= 98);
    }
}
