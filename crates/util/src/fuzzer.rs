use rand::{rngs::OsRng, seq::SliceRandom, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use std::cell::RefCell;

/// A tree operation produced by [`Fuzzer::operations`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Insert(i64),
    Remove(i64),
}

/// Seeded generator of keys and operation sequences for tree tests.
///
/// Uses the xoshiro256** PRNG so a failing run can be replayed from
/// [`Fuzzer::seed`].
///
/// # Examples
///
/// ```
/// use avl_bst_util::Fuzzer;
///
/// let fuzzer = Fuzzer::new(Some([7; 32]));
/// let keys = fuzzer.distinct_keys(10, 100);
/// assert_eq!(keys.len(), 10);
/// assert!(keys.iter().all(|k| (0..100).contains(k)));
/// ```
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: RefCell<Xoshiro256StarStar>,
}

impl Fuzzer {
    /// Create a new fuzzer with an optional seed.
    ///
    /// If no seed is provided, a random seed will be generated using `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });

        Self {
            seed,
            rng: RefCell::new(Xoshiro256StarStar::from_seed(seed)),
        }
    }

    /// Generate a random integer in the range [min, max] (inclusive).
    pub fn random_int(&self, min: i64, max: i64) -> i64 {
        self.rng.borrow_mut().gen_range(min..=max)
    }

    /// Generate a random boolean with the given probability of being true.
    pub fn random_bool(&self, probability: f64) -> bool {
        self.rng.borrow_mut().gen_bool(probability)
    }

    /// Pick a random element from a non-empty slice.
    pub fn pick<'a, T>(&self, elements: &'a [T]) -> &'a T {
        let idx = self.rng.borrow_mut().gen_range(0..elements.len());
        &elements[idx]
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&self, elements: &mut [T]) {
        elements.shuffle(&mut *self.rng.borrow_mut());
    }

    /// `count` distinct keys drawn from `0..bound`, in random order.
    ///
    /// `count` is capped at `bound`.
    pub fn distinct_keys(&self, count: usize, bound: i64) -> Vec<i64> {
        let mut all: Vec<i64> = (0..bound).collect();
        self.shuffle(&mut all);
        all.truncate(count);
        all
    }

    /// A mixed insert/remove sequence over keys in `0..bound`.
    ///
    /// Removals are drawn from keys inserted earlier in the sequence, so most
    /// of them hit; `remove_ratio` is the probability of emitting a removal.
    pub fn operations(&self, len: usize, bound: i64, remove_ratio: f64) -> Vec<Op> {
        let mut live: Vec<i64> = Vec::new();
        let mut ops = Vec::with_capacity(len);
        for _ in 0..len {
            if !live.is_empty() && self.random_bool(remove_ratio) {
                let idx = self.rng.borrow_mut().gen_range(0..live.len());
                ops.push(Op::Remove(live.swap_remove(idx)));
            } else {
                let key = self.random_int(0, bound - 1);
                if !live.contains(&key) {
                    live.push(key);
                }
                ops.push(Op::Insert(key));
            }
        }
        ops
    }
}
