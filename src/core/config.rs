//! Session configuration.
//!
//! Everything the engine treats as a constant lives here: the icon
//! vocabulary, the three animation dwell times, where icon assets are
//! fetched from and an optional RNG seed for reproducible boards.
//!
//! The grid length is not configured. It is the number of tile views the
//! session is built with, and [`SessionConfig::validate`] checks it.

use std::time::Duration;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Icon names shipped with the game.
pub const DEFAULT_VOCABULARY: [&str; 26] = [
    "abacaxi",
    "banana",
    "batata-frita",
    "bolo",
    "brocolis",
    "cachorro-quente",
    "cenoura",
    "cereja",
    "croissant",
    "cupcake",
    "donut",
    "framboesa",
    "hamburguer",
    "limao",
    "maca",
    "melancia",
    "morango",
    "ovo-frito",
    "pera",
    "picole",
    "pipoca",
    "presunto",
    "queijo",
    "salsicha",
    "sorvete",
    "taco",
];

/// Session configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Icon names to draw pairs from. Order is irrelevant, names must be unique.
    pub vocabulary: Vec<String>,

    /// How long a matched pair stays up before it settles (default: 400 ms).
    pub match_dwell_ms: u64,

    /// How long a mismatched pair stays up before it flips back (default: 800 ms).
    pub mismatch_dwell_ms: u64,

    /// Spacing between tiles in the intro sequence (default: 50 ms).
    pub intro_step_ms: u64,

    /// Seed for board generation. `None` draws a fresh seed per session.
    pub seed: Option<u64>,

    /// Directory icon images are fetched from.
    pub asset_root: String,

    /// Icon used as the face-down placeholder.
    pub hidden_icon: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            vocabulary: DEFAULT_VOCABULARY.iter().map(|s| s.to_string()).collect(),
            match_dwell_ms: 400,
            mismatch_dwell_ms: 800,
            intro_step_ms: 50,
            seed: None,
            asset_root: "./icons".to_string(),
            hidden_icon: "pergunta".to_string(),
        }
    }
}

impl SessionConfig {
    /// Replace the icon vocabulary.
    #[must_use]
    pub fn with_vocabulary<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vocabulary = names.into_iter().map(Into::into).collect();
        self
    }

    /// Fix the board seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the match and mismatch dwell times.
    #[must_use]
    pub fn with_dwell(mut self, match_ms: u64, mismatch_ms: u64) -> Self {
        self.match_dwell_ms = match_ms;
        self.mismatch_dwell_ms = mismatch_ms;
        self
    }

    /// Override the intro step delay.
    #[must_use]
    pub fn with_intro_step(mut self, step_ms: u64) -> Self {
        self.intro_step_ms = step_ms;
        self
    }

    /// Override where icons are fetched from.
    #[must_use]
    pub fn with_asset_root(mut self, root: impl Into<String>) -> Self {
        self.asset_root = root.into();
        self
    }

    #[must_use]
    pub fn match_dwell(&self) -> Duration {
        Duration::from_millis(self.match_dwell_ms)
    }

    #[must_use]
    pub fn mismatch_dwell(&self) -> Duration {
        Duration::from_millis(self.mismatch_dwell_ms)
    }

    #[must_use]
    pub fn intro_step(&self) -> Duration {
        Duration::from_millis(self.intro_step_ms)
    }

    /// Asset path for an icon name.
    #[must_use]
    pub fn icon_path(&self, name: &str) -> String {
        format!("{}/{}.png", self.asset_root.trim_end_matches('/'), name)
    }

    /// Asset path for the face-down placeholder.
    #[must_use]
    pub fn hidden_path(&self) -> String {
        self.icon_path(&self.hidden_icon)
    }

    /// Check that this configuration can fill a grid of `grid_len` tiles.
    pub fn validate(&self, grid_len: usize) -> Result<(), ConfigError> {
        validate_vocabulary(&self.vocabulary, grid_len)
    }
}

/// Check that `vocabulary` can fill a grid of `grid_len` tiles with pairs.
pub fn validate_vocabulary(vocabulary: &[String], grid_len: usize) -> Result<(), ConfigError> {
    if grid_len == 0 {
        return Err(ConfigError::EmptyGrid);
    }
    if grid_len % 2 != 0 {
        return Err(ConfigError::OddGrid(grid_len));
    }

    let mut seen = FxHashSet::default();
    for name in vocabulary {
        if name.is_empty() {
            return Err(ConfigError::EmptyIconName);
        }
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::DuplicateIcon(name.clone()));
        }
    }

    let required = grid_len / 2;
    if vocabulary.len() < required {
        return Err(ConfigError::VocabularyTooSmall {
            available: vocabulary.len(),
            required,
        });
    }

    Ok(())
}
