//! The `pitchforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

use pitchforge_core::parser::{parse_question_bank, validate_question_bank};

pub fn execute(questions: PathBuf) -> Result<()> {
    let bank = parse_question_bank(&questions)?;
    println!(
        "{} ({}): {} questions",
        bank.name,
        bank.id,
        bank.questions.len()
    );

    let warnings = validate_question_bank(&bank);
    if warnings.is_empty() {
        println!("Question bank valid");
    } else {
        for warning in &warnings {
            match &warning.question_id {
                Some(id) => println!("  warning [{id}]: {}", warning.message),
                None => println!("  warning: {}", warning.message),
            }
        }
        println!("{} warning(s)", warnings.len());
    }

    Ok(())
}
