//! Shuffling primitives.
//!
//! [`shuffle`] returns a fresh random ordering of a sequence. [`co_shuffle`]
//! applies one random permutation to a reference sequence and any number of
//! companion sequences, so values that shared an index before shuffling
//! still share one afterwards.

use crate::core::{GameRng, ShuffleError};

/// Return a uniformly random permutation of `items`.
pub fn shuffle<T: Clone>(items: &[T], rng: &mut GameRng) -> Vec<T> {
    let perm = rng.permutation(items.len());
    apply_permutation(&perm, items)
}

/// Shuffle `reference` and every companion with the same permutation.
///
/// Returns the shuffled reference followed by the shuffled companions in
/// their original order. Every companion must be as long as `reference`.
///
/// ```
/// use memory_match::core::GameRng;
/// use memory_match::pairing::co_shuffle;
///
/// let names = ["a", "b", "c"];
/// let ids = [1, 2, 3];
/// let (names, ids) = co_shuffle(&names, &[&ids[..]], &mut GameRng::new(3)).unwrap();
///
/// for (name, id) in names.iter().zip(&ids[0]) {
///     let expected = match *name { "a" => 1, "b" => 2, _ => 3 };
///     assert_eq!(*id, expected);
/// }
/// ```
pub fn co_shuffle<T: Clone, U: Clone>(
    reference: &[T],
    companions: &[&[U]],
    rng: &mut GameRng,
) -> Result<(Vec<T>, Vec<Vec<U>>), ShuffleError> {
    for companion in companions {
        if companion.len() != reference.len() {
            return Err(ShuffleError::LengthMismatch {
                expected: reference.len(),
                got: companion.len(),
            });
        }
    }

    let perm = rng.permutation(reference.len());
    let shuffled = apply_permutation(&perm, reference);
    let companions = companions
        .iter()
        .map(|companion| apply_permutation(&perm, companion))
        .collect();

    Ok((shuffled, companions))
}

fn apply_permutation<T: Clone>(perm: &[usize], items: &[T]) -> Vec<T> {
    perm.iter().map(|&source| items[source].clone()).collect()
}
