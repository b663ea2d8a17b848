//! Shuffling and sampling over an injected random source.

use rand::Rng;

/// Return a shuffled copy of `items` (Fisher-Yates, last index down to 1).
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Remove and return a uniformly chosen element, or `None` if `pool` is empty.
pub fn sample_one_without_replacement<T, R: Rng + ?Sized>(
    pool: &mut Vec<T>,
    rng: &mut R,
) -> Option<T> {
    if pool.is_empty() {
        return None;
    }
    let index = rng.random_range(0..pool.len());
    Some(pool.remove(index))
}
