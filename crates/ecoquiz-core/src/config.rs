//! Engine configuration.
//!
//! Scoring constants travel with each quiz file; this holds the per-run
//! knobs (ordering, seed, output) that are the same whatever quiz is taken.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::order::ChoiceOrder;

/// Top-level ecoquiz configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Shuffle question order at session start.
    #[serde(default = "default_true")]
    pub shuffle_questions: bool,
    /// Choice order within each question.
    #[serde(default)]
    pub choice_order: ChoiceOrder,
    /// Fixed seed for reproducible ordering.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Output directory for exported outcomes.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Export formats: json, html, md, all or none.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_true() -> bool {
    true
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./ecoquiz-results")
}
fn default_format() -> String {
    "json".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            shuffle_questions: true,
            choice_order: ChoiceOrder::default(),
            seed: None,
            output_dir: default_output_dir(),
            format: default_format(),
        }
    }
}

impl EngineConfig {
    /// Random source for one session: seeded when `seed` is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `ecoquiz.toml` in the current directory
/// 2. `~/.config/ecoquiz/config.toml`
///
/// Environment variable overrides: `ECOQUIZ_SEED`, `ECOQUIZ_OUTPUT_DIR`.
pub fn load_config() -> Result<EngineConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<EngineConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("ecoquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    if let Ok(seed) = std::env::var("ECOQUIZ_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("ECOQUIZ_SEED is not a number: '{seed}'"))?;
        config.seed = Some(seed);
    }
    if let Ok(dir) = std::env::var("ECOQUIZ_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    tracing::debug!(?config, "loaded engine config");
    Ok(config)
}

/// Parse a config TOML string.
pub fn parse_config_str(content: &str) -> Result<EngineConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("ecoquiz"))
}
