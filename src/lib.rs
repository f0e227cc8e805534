//! # memory-match
//!
//! Session engine for a memory ("concentration") game: a grid of face-down
//! tiles hiding pairs of icons. The player flips two tiles per turn; pairs
//! stay face up, mismatches flip back after a short dwell.
//!
//! ## Design Principles
//!
//! 1. **Headless**: Assets, timers and rendering are collaborator traits.
//!    The engine never blocks, sleeps or draws.
//!
//! 2. **Single-threaded**: Everything runs on one event loop. Shared state
//!    is `Rc` + `RefCell`, never held across a call that can re-enter.
//!
//! 3. **Generations over cancellation**: Every restart bumps a generation
//!    counter. Late timer and fetch callbacks compare generations and drop
//!    themselves instead of relying on cancellation alone.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `pairing`: Shuffling and the pairing generator
//! - `runtime`: Asset, scheduler and view contracts plus in-process versions
//! - `tile`: Tiles and the shared face-down asset cache
//! - `session`: Selection state machine and intro sequence

pub mod core;
pub mod pairing;
pub mod runtime;
pub mod session;
pub mod tile;

// Re-export commonly used types
pub use crate::core::{ConfigError, GameRng, SessionConfig, SessionError, ShuffleError};

pub use crate::pairing::{co_shuffle, generate_pairs, pair_counts, shuffle};

pub use crate::runtime::{
    AssetFetcher, Blob, ManualScheduler, RecordingView, Scheduler, StaticAssets, TileView,
    TimerHandle, ViewEvent,
};

pub use crate::tile::{HiddenFace, Tile};

pub use crate::session::{ClickOutcome, Collaborators, GameSession, Phase};
