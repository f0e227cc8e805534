//! Pairing generator: which icon goes under which tile.

use rustc_hash::FxHashMap;

use super::shuffle::{co_shuffle, shuffle};
use crate::core::config::validate_vocabulary;
use crate::core::{GameRng, SessionError};

/// Build the icon list for a grid of `grid_len` tiles.
///
/// Picks `grid_len / 2` distinct names from `vocabulary`, lays down two
/// rounds of them permuted identically, then shuffles the combined list so
/// the placement of each pair is independent of the other. Entry `i` is
/// the identity of tile `i`.
///
/// ```
/// use memory_match::core::GameRng;
/// use memory_match::pairing::{generate_pairs, pair_counts};
///
/// let vocabulary = vec!["a".to_string(), "b".to_string()];
/// let pairing = generate_pairs(&vocabulary, 4, &mut GameRng::new(1)).unwrap();
///
/// let counts = pair_counts(&pairing);
/// assert_eq!(counts["a"], 2);
/// assert_eq!(counts["b"], 2);
/// ```
pub fn generate_pairs(
    vocabulary: &[String],
    grid_len: usize,
    rng: &mut GameRng,
) -> Result<Vec<String>, SessionError> {
    validate_vocabulary(vocabulary, grid_len)?;

    let mut names = shuffle(vocabulary, rng);
    names.truncate(grid_len / 2);

    let (first_round, rounds) = co_shuffle(&names, &[&names[..]], rng)?;
    let mut combined = first_round;
    for round in rounds {
        combined.extend(round);
    }

    Ok(shuffle(&combined, rng))
}

/// Count how many tiles carry each identity.
pub fn pair_counts(pairing: &[String]) -> FxHashMap<&str, usize> {
    let mut counts = FxHashMap::default();
    for name in pairing {
        *counts.entry(name.as_str()).or_insert(0) += 1;
    }
    counts
}
