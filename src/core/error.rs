//! Construction-time error types.
//!
//! Gameplay itself never fails: invalid moves get reject feedback, stale
//! callbacks are dropped and missing assets are skipped. Only building a
//! session from a bad configuration produces an error.

use thiserror::Error;

/// Invalid session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The board has no tiles.
    #[error("grid has no tiles")]
    EmptyGrid,

    /// Tiles come in pairs, so the grid length must be even.
    #[error("grid length {0} is odd")]
    OddGrid(usize),

    /// Not enough distinct icons to fill the grid.
    #[error("vocabulary has {available} icons, grid needs {required}")]
    VocabularyTooSmall { available: usize, required: usize },

    /// The same icon name appears twice in the vocabulary.
    #[error("duplicate icon name in vocabulary: {0}")]
    DuplicateIcon(String),

    /// An icon name is empty.
    #[error("empty icon name in vocabulary")]
    EmptyIconName,
}

/// Sequences handed to a co-shuffle must have the same length.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ShuffleError {
    #[error("co-shuffled sequence has length {got}, reference has {expected}")]
    LengthMismatch { expected: usize, got: usize },
}

/// Errors raised while creating a game session.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("shuffle failed: {0}")]
    Shuffle(#[from] ShuffleError),
}
