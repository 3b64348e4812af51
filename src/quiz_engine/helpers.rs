//! Shared randomisation helpers used by the pool and the session.
//!
//! All randomness in the engine flows through these functions and an
//! injected `R: Rng`, so a seeded `StdRng` reproduces the exact same
//! question order and option sets.
//!
//! ## RNG ordering
//!
//! `partial_shuffle` consumes exactly `amount` draws (one per selected
//! slot); `shuffle` consumes `len - 1`. Changing either call sequence breaks
//! the determinism tests.

use rand::Rng;

/// Fisher-Yates over the first `amount` slots: afterwards `items[..amount]`
/// is a uniform random selection, in random order, from all of `items`.
pub fn partial_shuffle<T, R: Rng>(items: &mut [T], amount: usize, rng: &mut R) {
    let amount = amount.min(items.len());
    for i in 0..amount {
        let j = rng.gen_range(i..items.len());
        items.swap(i, j);
    }
}

/// Full Fisher-Yates shuffle.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut items: Vec<u32> = (0..20).collect();
        shuffle(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_is_deterministic_with_seed() {
        let make = |seed: u64| -> Vec<u32> {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut items: Vec<u32> = (0..30).collect();
            shuffle(&mut items, &mut rng);
            items
        };
        assert_eq!(make(99), make(99));
        assert_ne!(make(99), make(100));
    }

    #[test]
    fn partial_shuffle_picks_distinct_prefix() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut items: Vec<u32> = (0..10).collect();
        partial_shuffle(&mut items, 4, &mut rng);
        let mut prefix = items[..4].to_vec();
        prefix.sort_unstable();
        prefix.dedup();
        assert_eq!(prefix.len(), 4);
        let mut all = items.clone();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn partial_shuffle_clamps_amount() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut items = vec![1, 2, 3];
        partial_shuffle(&mut items, 10, &mut rng);
        assert_eq!(items.len(), 3);
    }
}
