//! The `pitchforge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create pitchforge.toml
    if std::path::Path::new("pitchforge.toml").exists() {
        println!("pitchforge.toml already exists, skipping.");
    } else {
        std::fs::write("pitchforge.toml", SAMPLE_CONFIG)?;
        println!("Created pitchforge.toml");
    }

    // Create example question bank
    std::fs::create_dir_all("questions")?;
    let example_path = std::path::Path::new("questions/example.toml");
    if example_path.exists() {
        println!("questions/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUESTION_BANK)?;
        println!("Created questions/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit pitchforge.toml to pick your audience and persona");
    println!("  2. Run: pitchforge validate --questions questions/example.toml");
    println!("  3. Run: pitchforge checklist show");
    println!("  4. Run: pitchforge drill show");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# pitchforge configuration

# Checklist template: angel, seed_vc, enterprise_buyer, accelerator_demo_day
default_audience = "seed_vc"

# Persona: balanced, skeptical_vc, friendly_angel, enterprise_cfo
default_persona = "skeptical_vc"

# Target pitch duration in minutes
target_minutes = 5

# Where session snapshots live
state_dir = "./.pitchforge"

# Optional question bank (falls back to built-in questions)
question_file = "questions/example.toml"

# Where reports are written
report_dir = "./pitchforge-reports"
"#;

const EXAMPLE_QUESTION_BANK: &str = r#"[question_bank]
id = "example"
name = "Example Pressure Test"
description = "A starter set of tough investor questions"
default_category = "general"

[[questions]]
id = "moat-copycat"
text = "Why won't a big company copy you?"
category = "moat"

[[questions]]
id = "retention-churn"
text = "How do you reduce churn?"
category = "retention"

[[questions]]
id = "timing-window"
text = "Why is now the right time?"
category = "timing"

[[questions]]
id = "gtm-repeatable"
text = "What makes your growth motion repeatable?"
category = "gtm"

[[questions]]
id = "fin-burn"
text = "Walk me through your burn and runway."
category = "financials"
"#;
