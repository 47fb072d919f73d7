//! pitchforge configuration.
//!
//! Construction-time knobs for the engines: default audience and persona,
//! rehearsal target, state directory, and an optional question bank file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{Audience, Persona};

/// Top-level pitchforge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchforgeConfig {
    /// Checklist template applied to fresh sessions.
    #[serde(default)]
    pub default_audience: Audience,
    /// Persona applied to fresh drill sessions.
    #[serde(default = "default_persona")]
    pub default_persona: Persona,
    /// Target pitch duration in minutes.
    #[serde(default = "default_target_minutes")]
    pub target_minutes: u32,
    /// Directory holding session snapshots.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
    /// Optional TOML question bank; the built-in set is used when absent.
    #[serde(default)]
    pub question_file: Option<PathBuf>,
    /// Output directory for reports.
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
}

fn default_persona() -> Persona {
    Persona::SkepticalVc
}
fn default_target_minutes() -> u32 {
    5
}
fn default_state_dir() -> PathBuf {
    PathBuf::from("./.pitchforge")
}
fn default_report_dir() -> PathBuf {
    PathBuf::from("./pitchforge-reports")
}

impl Default for PitchforgeConfig {
    fn default() -> Self {
        Self {
            default_audience: Audience::default(),
            default_persona: default_persona(),
            target_minutes: default_target_minutes(),
            state_dir: default_state_dir(),
            question_file: None,
            report_dir: default_report_dir(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `pitchforge.toml` in the current directory
/// 2. `~/.config/pitchforge/config.toml`
///
/// Environment variable override: `PITCHFORGE_STATE_DIR`.
pub fn load_config() -> Result<PitchforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PitchforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("pitchforge.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<PitchforgeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => PitchforgeConfig::default(),
    };

    if let Ok(dir) = std::env::var("PITCHFORGE_STATE_DIR") {
        if !dir.is_empty() {
            config.state_dir = PathBuf::from(dir);
        }
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("pitchforge"))
}
