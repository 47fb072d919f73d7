//! pitchforge CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::checklist::ChecklistCommand;
use commands::drill::DrillCommand;
use commands::metrics::MetricsCommand;
use commands::notes::NotesCommand;

#[derive(Parser)]
#[command(name = "pitchforge", version, about = "Pitch-rehearsal coaching toolkit")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config and example question bank
    Init,

    /// Validate a question bank TOML file
    Validate {
        /// Path to the question bank file
        #[arg(long)]
        questions: PathBuf,
    },

    /// Work the pitch-readiness checklist
    Checklist {
        #[command(subcommand)]
        command: ChecklistCommand,
    },

    /// Rehearse investor Q&A
    Drill {
        #[command(subcommand)]
        command: DrillCommand,
    },

    /// Show the weakness heatmap over recorded attempts
    Stats,

    /// Track startup KPIs, targets, and alert rules
    Metrics {
        #[command(subcommand)]
        command: MetricsCommand,
    },

    /// Write session reports
    Report {
        /// Output directory (defaults to the configured report dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: md, html, all
        #[arg(long, default_value = "md")]
        format: String,
    },

    /// Keep the founder notebook
    Notes {
        #[command(subcommand)]
        command: NotesCommand,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pitchforge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate { questions } => commands::validate::execute(questions),
        Commands::Checklist { command } => commands::checklist::execute(command, config),
        Commands::Drill { command } => commands::drill::execute(command, config),
        Commands::Stats => commands::stats::execute(config),
        Commands::Metrics { command } => commands::metrics::execute(command, config),
        Commands::Report { output, format } => commands::report::execute(output, format, config),
        Commands::Notes { command } => commands::notes::execute(command, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
