//! Random number sources for the `random` command.
//!
//! Values produced by `random` end up in fuzzing requests, so the default
//! source is an OS-seeded CSPRNG. Tests substitute [`SeededRandom`] to get
//! reproducible sequences.

use std::fmt;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error_handling::ExprError;

/// Provider of uniformly distributed integers.
pub trait RandomSource: Send + Sync + fmt::Debug {
    /// Returns an integer in the inclusive range `[min, max]`.
    ///
    /// Callers guarantee `min < max`.
    fn int_in_range(&self, min: i64, max: i64) -> Result<i64, ExprError>;
}

/// Cryptographically strong source seeded from the operating system on
/// every draw.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn int_in_range(&self, min: i64, max: i64) -> Result<i64, ExprError> {
        let mut rng =
            StdRng::try_from_os_rng().map_err(|e| ExprError::RandomSource(e.to_string()))?;
        Ok(rng.random_range(min..=max))
    }
}

/// Deterministic source for tests and reproducible runs.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Creates a source whose sequence is fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn int_in_range(&self, min: i64, max: i64) -> Result<i64, ExprError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| ExprError::RandomSource("seeded generator lock poisoned".to_string()))?;
        Ok(rng.random_range(min..=max))
    }
}
