//! # Network Fault Simulation
//!
//! Card payments fail with a simulated network error some fraction of the
//! time. The source of that decision is pluggable so callers can seed it or
//! replace it outright.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fraction of card payments that fail with a network error by default
pub const DEFAULT_FAILURE_RATE: f64 = 0.1;

/// Decides whether the next payment hits a network error.
pub trait NetworkFaults: Send {
    /// Returns true when the current attempt should fail
    fn should_fail(&mut self) -> bool;
}

impl<F> NetworkFaults for F
where
    F: FnMut() -> bool + Send,
{
    fn should_fail(&mut self) -> bool {
        self()
    }
}

/// Fails when a uniform draw in `[0, 1)` falls below the failure rate
#[derive(Debug, Clone)]
pub struct RandomFaults<R = StdRng> {
    rng: R,
    failure_rate: f64,
}

impl RandomFaults<StdRng> {
    /// Seed from OS entropy
    pub fn from_entropy(failure_rate: f64) -> Self {
        Self::with_rng(StdRng::from_entropy(), failure_rate)
    }

    /// Deterministic source for reproducible runs
    pub fn seeded(seed: u64, failure_rate: f64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), failure_rate)
    }
}

impl<R: Rng> RandomFaults<R> {
    /// Use a caller-provided generator
    pub fn with_rng(rng: R, failure_rate: f64) -> Self {
        Self { rng, failure_rate }
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }
}

impl Default for RandomFaults<StdRng> {
    fn default() -> Self {
        Self::from_entropy(DEFAULT_FAILURE_RATE)
    }
}

impl<R: Rng + Send> NetworkFaults for RandomFaults<R> {
    fn should_fail(&mut self) -> bool {
        self.rng.gen::<f64>() < self.failure_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rate_never_fails() {
        let mut faults = RandomFaults::seeded(7, 0.0);
        assert!((0..1000).all(|_| !faults.should_fail()));
    }

    #[test]
    fn test_full_rate_always_fails() {
        let mut faults = RandomFaults::seeded(7, 1.0);
        assert!((0..1000).all(|_| faults.should_fail()));
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = RandomFaults::seeded(42, DEFAULT_FAILURE_RATE);
        let mut b = RandomFaults::seeded(42, DEFAULT_FAILURE_RATE);

        let first: Vec<bool> = (0..200).map(|_| a.should_fail()).collect();
        let second: Vec<bool> = (0..200).map(|_| b.should_fail()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_rate() {
        assert_eq!(RandomFaults::default().failure_rate(), DEFAULT_FAILURE_RATE);
    }

    #[test]
    fn test_closure_source() {
        let mut calls = 0;
        let mut every_other = move || {
            calls += 1;
            calls % 2 == 0
        };

        assert!(!every_other.should_fail());
        assert!(every_other.should_fail());
    }
}
