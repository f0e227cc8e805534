//! Icon selection and placement.
//!
//! - `shuffle`: unbiased shuffling and co-shuffling of sequences
//! - `generator`: builds the per-tile identity list for a board

mod generator;
mod shuffle;

pub use generator::{generate_pairs, pair_counts};
pub use shuffle::{co_shuffle, shuffle};
