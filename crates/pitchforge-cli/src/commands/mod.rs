//! CLI subcommand implementations.

pub mod checklist;
pub mod drill;
pub mod init;
pub mod metrics;
pub mod notes;
pub mod report;
pub mod stats;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use pitchforge_core::checklist::ChecklistState;
use pitchforge_core::config::{load_config_from, PitchforgeConfig};
use pitchforge_core::dashboard::MetricsState;
use pitchforge_core::drill::DrillState;
use pitchforge_core::notes::Notebook;
use pitchforge_core::parser::parse_question_bank;
use pitchforge_core::store::{SnapshotStore, CHECKLIST_KEY, DRILL_KEY, METRICS_KEY, NOTES_KEY};

/// Loaded session state shared by the stateful subcommands.
pub struct Session {
    pub config: PitchforgeConfig,
    pub store: SnapshotStore,
    pub checklist: ChecklistState,
    pub drill: DrillState,
    pub notebook: Notebook,
    pub metrics: MetricsState,
}

impl Session {
    /// Load config and snapshots, seeding fresh state from the config.
    pub fn open(config_path: Option<&Path>) -> Result<Self> {
        let config = load_config_from(config_path)?;
        let store = SnapshotStore::new(&config.state_dir);

        let fresh_checklist = !store.path_for(CHECKLIST_KEY).exists();
        let mut checklist: ChecklistState = store.load_or_default(CHECKLIST_KEY);
        if fresh_checklist {
            checklist = ChecklistState::new(config.default_audience);
            checklist.set_target_minutes(config.target_minutes);
        } else {
            checklist.ensure_seeded();
        }

        let fresh_drill = !store.path_for(DRILL_KEY).exists();
        let mut drill: DrillState = store.load_or_default(DRILL_KEY);
        if fresh_drill {
            drill.set_persona(config.default_persona);
        }
        let questions = match &config.question_file {
            Some(path) => match parse_question_bank(path) {
                Ok(bank) => bank.questions,
                Err(e) => {
                    tracing::warn!("question bank unusable ({e:#}), using built-in questions");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        drill.set_questions(questions);

        let notebook: Notebook = store.load_or_default(NOTES_KEY);
        let metrics: MetricsState = store.load_or_default(METRICS_KEY);

        Ok(Self {
            config,
            store,
            checklist,
            drill,
            notebook,
            metrics,
        })
    }

    pub fn save_checklist(&self) {
        self.store.save(CHECKLIST_KEY, &self.checklist);
    }

    pub fn save_drill(&self) {
        self.store.save(DRILL_KEY, &self.drill);
    }

    pub fn save_notebook(&self) {
        self.store.save(NOTES_KEY, &self.notebook);
    }

    pub fn save_metrics(&self) {
        self.store.save(METRICS_KEY, &self.metrics);
    }
}
