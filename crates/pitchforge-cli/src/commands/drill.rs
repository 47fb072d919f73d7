//! The `pitchforge drill` command group.

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;

use pitchforge_core::model::Persona;

use super::Session;

#[derive(Subcommand)]
pub enum DrillCommand {
    /// Show the current question, persona, and response timer
    Show,

    /// Submit an answer for scoring
    Answer {
        /// The answer, quoted
        text: String,
        /// Seconds spent answering (defaults to time since the question was shown)
        #[arg(long)]
        elapsed: Option<u64>,
    },

    /// Score a rebuttal to the latest objection
    Rebuttal {
        /// The rebuttal, quoted
        text: String,
    },

    /// Advance to the next question
    Next,

    /// Switch investor persona
    Persona {
        /// balanced, skeptical_vc, friendly_angel, enterprise_cfo
        persona: String,
    },
}

pub fn execute(command: DrillCommand, config: Option<&Path>) -> Result<()> {
    let mut session = Session::open(config)?;
    let now = Utc::now();

    match command {
        DrillCommand::Show => {
            let question = session.drill.current_question().clone();
            session.drill.mark_shown(now);
            println!(
                "Question {} | Persona: {}",
                session.drill.progress_label(),
                session.drill.persona.label()
            );
            println!("[{}] {}", question.category, question.text);
            if let Some(elapsed) = session.drill.elapsed_since_shown(now) {
                println!("Response timer: {elapsed}s");
            }
        }
        DrillCommand::Answer { text, elapsed } => {
            let elapsed = elapsed
                .or_else(|| session.drill.elapsed_since_shown(now).map(|e| e.max(1)))
                .unwrap_or(30);
            let outcome = session.drill.submit_answer(&text, elapsed, now);

            println!("Confidence {}%", outcome.attempt.score);
            println!("{}", outcome.feedback);
            println!(
                "\nWords: {} | Keyword depth: {} | Claims: {} | Unsupported: {} | Jargon: {} | Evasive: {}",
                outcome.analysis.words,
                outcome.analysis.hint_matches,
                outcome.analysis.claim_count,
                outcome.analysis.unsupported_claims,
                outcome.analysis.jargon_count,
                outcome.analysis.evasive_count,
            );

            println!("\nFollow-up pressure questions:");
            for (index, follow_up) in outcome.follow_ups.iter().enumerate() {
                println!("  {}. {follow_up}", index + 1);
            }
            println!("\nObjection: {}", outcome.objection);
            println!("Respond with: pitchforge drill rebuttal \"...\"");

            if let Some(delta) = session.drill.version_delta() {
                let sign = if delta.score_delta >= 0 { "+" } else { "" };
                println!(
                    "\nVersus previous attempt: {}% -> {}% ({sign}{}) | words {sign_w}{}",
                    delta.previous.score,
                    delta.latest.score,
                    delta.score_delta,
                    delta.word_delta,
                    sign_w = if delta.word_delta >= 0 { "+" } else { "" },
                );
            }
        }
        DrillCommand::Rebuttal { text } => match session.drill.submit_rebuttal(&text) {
            Some(review) => {
                println!("Rebuttal {}%", review.score);
                println!("{}", review.feedback);
            }
            None => println!("No objection on the table. Submit an answer first."),
        },
        DrillCommand::Next => {
            session.drill.next_question(now);
            let question = session.drill.current_question();
            println!(
                "Question {} | [{}] {}",
                session.drill.progress_label(),
                question.category,
                question.text
            );
        }
        DrillCommand::Persona { persona } => {
            let persona: Persona = persona.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            session.drill.set_persona(persona);
            println!("Persona set to {}", persona.label());
        }
    }

    session.save_drill();
    Ok(())
}
