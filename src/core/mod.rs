//! Core engine types: RNG, configuration, errors.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{SessionConfig, DEFAULT_VOCABULARY};
pub use error::{ConfigError, SessionError, ShuffleError};
pub use rng::GameRng;
