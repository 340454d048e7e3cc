//! Static configuration: which subjects to track and how to display them.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::render::Granularity;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Render period in seconds.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
    pub subjects: BTreeMap<String, SubjectConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubjectConfig {
    /// ISO `YYYY-MM-DD`, kept verbatim. A malformed date is not a load
    /// error; that subject just reads as zero elapsed time until corrected.
    pub reference_date: String,
    pub initial_mode: Granularity,
    /// Backdrop image paths cycled by the `peek` command. May be empty.
    #[serde(default)]
    pub decorations: Vec<String>,
}

fn default_tick_seconds() -> u64 {
    1
}

impl Config {
    /// Loads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        ensure!(config.tick_seconds > 0, "tick_seconds must be at least 1");
        ensure!(
            !config.subjects.is_empty(),
            "config defines no subjects to track"
        );
        Ok(config)
    }

    /// Built-in subjects used when no config file is given.
    pub fn builtin() -> Self {
        let mut subjects = BTreeMap::new();
        subjects.insert(
            "fresno".to_string(),
            SubjectConfig {
                reference_date: "2024-03-29".to_string(),
                initial_mode: Granularity::YearsMonths,
                decorations: backdrop_set("fresno"),
            },
        );
        subjects.insert(
            "anaheim".to_string(),
            SubjectConfig {
                reference_date: "2024-05-28".to_string(),
                initial_mode: Granularity::YearsMonths,
                decorations: backdrop_set("anaheim"),
            },
        );
        Config {
            tick_seconds: default_tick_seconds(),
            subjects,
        }
    }
}

fn backdrop_set(name: &str) -> Vec<String> {
    (1..=4)
        .map(|i| format!("assets/bg/{name}-{i:02}.jpeg"))
        .collect()
}
