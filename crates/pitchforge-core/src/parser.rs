//! TOML question bank parser.
//!
//! Loads rehearsal question banks from TOML files and validates them.
//! Unknown categories coerce to the bank default rather than failing.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Question, QuestionCategory};

/// Intermediate TOML structure for parsing question bank files.
#[derive(Debug, Deserialize)]
struct TomlQuestionFile {
    question_bank: TomlQuestionBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestionBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_category_str")]
    default_category: String,
}

fn default_category_str() -> String {
    "general".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    #[serde(default)]
    id: Option<String>,
    text: String,
    #[serde(default)]
    category: Option<String>,
}

/// A named collection of rehearsal questions.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    pub id: String,
    pub name: String,
    pub description: String,
    pub questions: Vec<Question>,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank file: {}", path.display()))?;

    parse_question_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_question_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlQuestionFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let default_category = coerce_category(&parsed.question_bank.default_category, QuestionCategory::General);

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, q)| Question {
            id: q.id.unwrap_or_else(|| format!("question-{index}")),
            text: q.text,
            category: q
                .category
                .map(|c| coerce_category(&c, default_category))
                .unwrap_or(default_category),
        })
        .collect();

    Ok(QuestionBank {
        id: parsed.question_bank.id,
        name: parsed.question_bank.name,
        description: parsed.question_bank.description,
        questions,
    })
}

fn coerce_category(value: &str, fallback: QuestionCategory) -> QuestionCategory {
    match value.parse() {
        Ok(category) => category,
        Err(_) => {
            tracing::warn!("unknown question category '{value}', using {fallback}");
            fallback
        }
    }
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for common issues.
pub fn validate_question_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "question bank has no questions".into(),
        });
    }

    // Check for duplicate question IDs
    let mut seen_ids = std::collections::HashSet::new();
    for question in &bank.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question ID: {}", question.id),
            });
        }
    }

    // Check for empty question text
    for question in &bank.questions {
        if question.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "question text is empty".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[question_bank]
id = "seed-round"
name = "Seed Round Pressure Test"
description = "Questions heard in real seed partner meetings"
default_category = "general"

[[questions]]
id = "moat-copycat"
text = "Why won't a big company copy you?"
category = "moat"

[[questions]]
text = "What breaks first if you triple signups next month?"
"#;

    #[test]
    fn parse_valid_toml() {
        let bank = parse_question_bank_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(bank.id, "seed-round");
        assert_eq!(bank.questions.len(), 2);
        assert_eq!(bank.questions[0].id, "moat-copycat");
        assert_eq!(bank.questions[0].category, QuestionCategory::Moat);
        // Missing id and category fall back to index and bank default.
        assert_eq!(bank.questions[1].id, "question-1");
        assert_eq!(bank.questions[1].category, QuestionCategory::General);
    }

    #[test]
    fn unknown_category_coerces_to_default() {
        let toml = r#"
[question_bank]
id = "bank"
name = "Bank"
default_category = "financials"

[[questions]]
text = "What is your burn multiple?"
category = "growth"
"#;
        let bank = parse_question_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(bank.questions[0].category, QuestionCategory::Financials);
    }

    #[test]
    fn validate_duplicate_ids() {
        let toml = r#"
[question_bank]
id = "dupes"
name = "Dupes"

[[questions]]
id = "same"
text = "First question?"

[[questions]]
id = "same"
text = "Second question?"
"#;
        let bank = parse_question_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_question_bank(&bank);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
    }

    #[test]
    fn validate_empty_text_and_empty_bank() {
        let toml = r#"
[question_bank]
id = "thin"
name = "Thin"

[[questions]]
id = "blank"
text = "   "
"#;
        let bank = parse_question_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_question_bank(&bank);
        assert!(warnings.iter().any(|w| w.message.contains("empty")));

        let empty = QuestionBank {
            id: "empty".into(),
            name: "Empty".into(),
            description: String::new(),
            questions: vec![],
        };
        let warnings = validate_question_bank(&empty);
        assert!(warnings.iter().any(|w| w.message.contains("no questions")));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_question_bank_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("bank.toml");
        std::fs::write(&file_path, VALID_TOML).unwrap();

        let bank = parse_question_bank(&file_path).unwrap();
        assert_eq!(bank.id, "seed-round");
    }
}
