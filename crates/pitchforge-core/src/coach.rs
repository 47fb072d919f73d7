//! Coaching text generation.
//!
//! Feedback, follow-up questions, and objections are deterministic
//! selections from fixed templates, keyed on the answer analysis and the
//! persona's style. Same inputs always yield the same output.

use crate::model::{Persona, PersonaStyle, Question};
use crate::scoring::{hints_for, AnswerAnalysis};

/// Pacing advice from the response timer.
pub fn timing_coach(elapsed_secs: u64, words: usize) -> &'static str {
    if words == 0 {
        "No timing data yet."
    } else if elapsed_secs < 15 {
        "Too short. Aim for 20-60 seconds with one concrete proof point."
    } else if elapsed_secs > 90 {
        "Too long. Keep first response under 60 seconds, then expand if asked."
    } else {
        "Timing is in the useful range for live investor Q&A."
    }
}

/// Length advice from the word count.
pub fn brevity_coach(words: usize) -> &'static str {
    if words == 0 {
        "No answer entered."
    } else if words < 20 {
        "Answer is too short; add context, mechanism, and proof."
    } else if words > 150 {
        "Answer is too long; tighten to core claim + evidence + risk control."
    } else {
        "Brevity is balanced."
    }
}

/// Assemble the coaching paragraph for a scored answer.
pub fn feedback_text(analysis: &AnswerAnalysis, question: &Question, persona: Persona) -> String {
    if analysis.words == 0 {
        return "Add a specific answer to get feedback.".into();
    }

    let opening = if analysis.score >= 85 {
        "Strong answer."
    } else if analysis.score >= 70 {
        "Solid foundation."
    } else if analysis.score >= 55 {
        "Needs tightening."
    } else {
        "Weak response."
    };

    let mut lines: Vec<String> = vec![opening.into()];
    lines.push(brevity_coach(analysis.words).into());
    lines.push(timing_coach(analysis.elapsed_secs, analysis.words).into());

    if !analysis.has_number {
        lines.push("Add at least one quantified proof point.".into());
    }
    if analysis.unsupported_claims > 0 {
        lines.push(
            "Some claims are unsupported. Attach evidence, source, or specific customer outcome."
                .into(),
        );
    }
    if analysis.evasive_count > 0 {
        lines.push("Answer is partially evasive. State a direct position first.".into());
    }
    if analysis.jargon_count > 1 {
        lines.push("Reduce buzzwords and use concrete language.".into());
    }
    if analysis.hint_matches < 2 {
        let core_hint = hints_for(question.category)[0];
        lines.push(format!(
            "Strengthen your {core_hint} argument for this question."
        ));
    }

    match persona.style() {
        PersonaStyle::Skeptical => {
            lines.push("Assume pushback and preempt one key objection.".into());
        }
        PersonaStyle::Financial => {
            lines.push("Tie your answer to cost, ROI, and downside control.".into());
        }
        PersonaStyle::Direct | PersonaStyle::Supportive => {}
    }

    lines.join(" ")
}

/// Up to three pressure follow-up questions, persona-flavored.
pub fn follow_ups(analysis: &AnswerAnalysis, question: &Question, persona: Persona) -> Vec<String> {
    let mut base: Vec<String> = Vec::new();

    if analysis.unsupported_claims > 0 {
        base.push("Which exact metric or source verifies that claim, and where was it measured?".into());
    }
    if !analysis.has_number {
        base.push("Give one hard number that proves your point in the last 90 days.".into());
    }
    if analysis.evasive_count > 0 {
        base.push("Answer in one sentence first: what is your direct position?".into());
    }
    if analysis.words < 20 {
        base.push("What is one concrete customer example that demonstrates this?".into());
    }
    if analysis.hint_matches < 2 {
        let hints = hints_for(question.category);
        base.push(format!(
            "How is this defensible through {} and {} specifically?",
            hints[0], hints[1]
        ));
    }

    if base.is_empty() {
        base.push("What is the biggest risk in this answer, and how do you mitigate it?".into());
        base.push("If growth slowed next quarter, what would you change first?".into());
    }

    match persona.style() {
        PersonaStyle::Skeptical => {
            base[0] = format!("Convince me with evidence: {}", base[0]);
        }
        PersonaStyle::Supportive => {
            base[0] = format!("Good direction. Now tighten this: {}", base[0]);
        }
        PersonaStyle::Financial => {
            base.push("What is the quantified ROI impact and payback period?".into());
        }
        PersonaStyle::Direct => {}
    }

    base.truncate(3);
    base
}

/// The single pushback objection for the rebuttal drill.
pub fn objection(analysis: &AnswerAnalysis, question: &Question, persona: Persona) -> String {
    let lead = if persona.style() == PersonaStyle::Skeptical {
        "I don't buy this yet."
    } else {
        "Pushback:"
    };

    if analysis.unsupported_claims > 0 {
        return format!(
            "{lead} Your claims sound optimistic. Show third-party evidence or customer-level proof."
        );
    }
    if !analysis.has_number {
        return format!("{lead} This is high level. What hard number validates your answer today?");
    }
    if analysis.hint_matches < 2 {
        return format!(
            "{lead} You did not fully answer the {} risk. Why is this durable?",
            question.category
        );
    }
    format!("{lead} What happens if your core assumption is wrong next quarter?")
}
