use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, info};

use crate::quiz_engine::{
    error::{QuizError, Result},
    helpers,
    models::Country,
    normalize::normalize,
};

/// The full candidate set plus the codes already drawn into some session.
///
/// Works like a deck that is only put back together on [`CountryPool::reset`]:
/// consecutive games never repeat a flag until the player asks for it.
#[derive(Debug, Clone, Default)]
pub struct CountryPool {
    countries: Vec<Country>,
    used: HashSet<String>,
}

impl CountryPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidate set. Duplicate codes keep their first entry.
    ///
    /// On error the pool is left as it was. Used codes that still exist in
    /// the new list stay used; codes missing from it are forgotten.
    pub fn load(&mut self, countries: Vec<Country>) -> Result<usize> {
        let mut seen = HashSet::new();
        let unique: Vec<Country> = countries
            .into_iter()
            .filter(|c| seen.insert(c.code.clone()))
            .collect();
        if unique.is_empty() {
            return Err(QuizError::EmptyPool);
        }

        self.used.retain(|code| unique.iter().any(|c| &c.code == code));
        self.countries = unique;
        info!("country pool loaded with {} countries", self.countries.len());
        Ok(self.countries.len())
    }

    /// Draw `n` distinct unused countries in random order and mark them used.
    pub fn sample_without_replacement<R: Rng>(&mut self, n: usize, rng: &mut R) -> Result<Vec<Country>> {
        if self.countries.is_empty() {
            return Err(QuizError::EmptyPool);
        }

        let mut unused: Vec<&Country> = self
            .countries
            .iter()
            .filter(|c| !self.used.contains(&c.code))
            .collect();
        if unused.len() < n {
            return Err(QuizError::InsufficientPool { requested: n, available: unused.len() });
        }

        helpers::partial_shuffle(&mut unused, n, rng);
        let picked: Vec<Country> = unused[..n].iter().map(|c| (*c).clone()).collect();

        for c in &picked {
            self.used.insert(c.code.clone());
        }
        debug!(drawn = n, remaining = self.remaining(), "sampled countries");
        Ok(picked)
    }

    /// Pick `k` distinct names from the full set, none equal (after
    /// normalization) to `correct`. Ignores the used-set.
    pub fn distractor_names<R: Rng>(&self, correct: &str, k: usize, rng: &mut R) -> Result<Vec<String>> {
        let correct_key = normalize(correct);
        let mut seen = HashSet::new();
        seen.insert(correct_key);

        let mut candidates: Vec<&str> = self
            .countries
            .iter()
            .map(|c| c.name.as_str())
            .filter(|name| seen.insert(normalize(name)))
            .collect();
        if candidates.len() < k {
            return Err(QuizError::NotEnoughDistractors { needed: k, available: candidates.len() });
        }

        helpers::partial_shuffle(&mut candidates, k, rng);
        Ok(candidates[..k].iter().map(|name| name.to_string()).collect())
    }

    /// Forget every drawn code. Only called on explicit player request.
    pub fn reset(&mut self) {
        info!("country pool reset, {} codes returned", self.used.len());
        self.used.clear();
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Countries not yet drawn since the last reset.
    pub fn remaining(&self) -> usize {
        self.countries.len() - self.used.len()
    }

    pub fn all(&self) -> &[Country] {
        &self.countries
    }

    pub fn is_used(&self, code: &str) -> bool {
        self.used.contains(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn countries(n: usize) -> Vec<Country> {
        (0..n)
            .map(|i| Country::new(format!("c{i}"), format!("Country {i}"), format!("img/c{i}")))
            .collect()
    }

    fn loaded(n: usize) -> CountryPool {
        let mut pool = CountryPool::new();
        pool.load(countries(n)).unwrap();
        pool
    }

    #[test]
    fn load_rejects_empty_list() {
        let mut pool = CountryPool::new();
        assert!(matches!(pool.load(Vec::new()), Err(QuizError::EmptyPool)));
        assert!(pool.is_empty());
    }

    #[test]
    fn failed_load_keeps_previous_countries() {
        let mut pool = loaded(6);
        assert!(pool.load(Vec::new()).is_err());
        assert_eq!(pool.len(), 6);
    }

    #[test]
    fn load_drops_duplicate_codes() {
        let mut pool = CountryPool::new();
        let mut list = countries(3);
        list.push(Country::new("c0", "Duplicate", "img/dup"));
        assert_eq!(pool.load(list).unwrap(), 3);
        assert_eq!(pool.all()[0].name, "Country 0");
    }

    #[test]
    fn reload_keeps_drawn_codes_used() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut pool = loaded(10);
        let drawn = pool.sample_without_replacement(5, &mut rng).unwrap();

        pool.load(countries(10)).unwrap();
        assert_eq!(pool.remaining(), 5);
        assert!(drawn.iter().all(|c| pool.is_used(&c.code)));

        let next = pool.sample_without_replacement(5, &mut rng).unwrap();
        assert!(next.iter().all(|c| !drawn.iter().any(|d| d.code == c.code)));
    }

    #[test]
    fn reload_forgets_codes_no_longer_listed() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut pool = loaded(10);
        pool.sample_without_replacement(10, &mut rng).unwrap();

        pool.load(countries(6)).unwrap();
        assert_eq!(pool.remaining(), 0);
        let mut extended = countries(6);
        extended.push(Country::new("new", "Newland", "img/new"));
        pool.load(extended).unwrap();
        assert_eq!(pool.remaining(), 1);
        assert!(!pool.is_used("new"));
    }

    #[test]
    fn sampling_marks_codes_used_and_never_duplicates() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut pool = loaded(10);
        let drawn = pool.sample_without_replacement(5, &mut rng).unwrap();

        let codes: HashSet<&str> = drawn.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes.len(), 5);
        assert!(drawn.iter().all(|c| pool.is_used(&c.code)));
        assert_eq!(pool.remaining(), 5);
    }

    #[test]
    fn consecutive_samples_are_disjoint() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool = loaded(10);
        let first = pool.sample_without_replacement(5, &mut rng).unwrap();
        let second = pool.sample_without_replacement(5, &mut rng).unwrap();
        for c in &second {
            assert!(!first.iter().any(|f| f.code == c.code), "{} drawn twice", c.code);
        }
    }

    #[test]
    fn exhausted_pool_reports_availability() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool = loaded(8);
        pool.sample_without_replacement(5, &mut rng).unwrap();
        match pool.sample_without_replacement(5, &mut rng) {
            Err(QuizError::InsufficientPool { requested, available }) => {
                assert_eq!((requested, available), (5, 3));
            }
            other => panic!("expected InsufficientPool, got {other:?}"),
        }
        // A failed draw marks nothing.
        assert_eq!(pool.remaining(), 3);
    }

    #[test]
    fn reset_makes_every_country_available_again() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut pool = loaded(6);
        pool.sample_without_replacement(6, &mut rng).unwrap();
        assert_eq!(pool.remaining(), 0);
        pool.reset();
        assert_eq!(pool.remaining(), 6);
        assert!(pool.sample_without_replacement(6, &mut rng).is_ok());
    }

    #[test]
    fn sampling_empty_pool_is_empty_pool_error() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut pool = CountryPool::new();
        assert!(matches!(
            pool.sample_without_replacement(5, &mut rng),
            Err(QuizError::EmptyPool)
        ));
    }

    #[test]
    fn sample_order_is_deterministic_with_seed() {
        let make = |seed: u64| -> Vec<String> {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut pool = loaded(40);
            pool.sample_without_replacement(10, &mut rng)
                .unwrap()
                .into_iter()
                .map(|c| c.code)
                .collect()
        };
        assert_eq!(make(11), make(11));
        assert_ne!(make(11), make(12));
    }

    #[test]
    fn distractors_exclude_correct_name_and_repeat_nothing() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut list = countries(6);
        list.push(Country::new("mx", "México", "img/mx"));
        let mut pool = CountryPool::new();
        pool.load(list).unwrap();

        for _ in 0..20 {
            let names = pool.distractor_names("mexico", 3, &mut rng).unwrap();
            assert_eq!(names.len(), 3);
            assert!(!names.iter().any(|n| n == "México"));
            let unique: HashSet<&String> = names.iter().collect();
            assert_eq!(unique.len(), 3);
        }
    }

    #[test]
    fn distractors_ignore_the_used_set() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut pool = loaded(5);
        pool.sample_without_replacement(5, &mut rng).unwrap();
        assert!(pool.distractor_names("Country 0", 3, &mut rng).is_ok());
    }

    #[test]
    fn too_small_pool_cannot_supply_distractors() {
        let mut rng = StdRng::seed_from_u64(9);
        let pool = loaded(3);
        assert!(matches!(
            pool.distractor_names("Country 0", 3, &mut rng),
            Err(QuizError::NotEnoughDistractors { needed: 3, available: 2 })
        ));
    }
}
