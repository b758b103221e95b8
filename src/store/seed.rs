//! Random selection of seed names.

use rand::seq::SliceRandom;

/// Pick `k` distinct names from `pool` at random, without replacement.
///
/// Returns fewer than `k` names only when the pool itself is smaller.
pub fn pick_names(pool: &[&str], k: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    pool.choose_multiple(&mut rng, k)
        .map(|name| (*name).to_string())
        .collect()
}
