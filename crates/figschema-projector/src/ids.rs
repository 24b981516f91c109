use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

pub const OVERFLOW_ID_PREFIX: &str = "avatarGroup_";
const RANDOM_SUFFIX_LEN: usize = 6;

/// Supplies identifiers for generated placeholder entries
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random base-36 ids, never repeated within one source.
///
/// These are placeholder identifiers, not secrets.
pub struct RandomIdSource {
    rng: StdRng,
    prefix: String,
    issued: HashSet<String>,
}

impl RandomIdSource {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible ids for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            prefix: OVERFLOW_ID_PREFIX.to_string(),
            issued: HashSet::new(),
        }
    }

    fn random_suffix(&mut self) -> String {
        (0..RANDOM_SUFFIX_LEN)
            .map(|_| std::char::from_digit(self.rng.gen_range(0..36), 36).unwrap_or('0'))
            .collect()
    }
}

impl Default for RandomIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for RandomIdSource {
    fn next_id(&mut self) -> String {
        loop {
            let suffix = self.random_suffix();
            let id = format!("{}{}", self.prefix, suffix);
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

/// Counter-based ids: `avatarGroup_1`, `avatarGroup_2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIdSource {
    prefix: String,
    next: u64,
}

impl SequentialIdSource {
    pub fn new() -> Self {
        Self::with_prefix(OVERFLOW_ID_PREFIX)
    }

    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 1,
        }
    }
}

impl Default for SequentialIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

impl<T: IdSource + ?Sized> IdSource for &mut T {
    fn next_id(&mut self) -> String {
        (**self).next_id()
    }
}
