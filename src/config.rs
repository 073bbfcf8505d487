//! Configuration for measurement runs.

use std::num::NonZeroU64;

/// Conventional number of invocations per pass.
pub const DEFAULT_CYCLES: NonZeroU64 = match NonZeroU64::new(100_000) {
    Some(n) => n,
    None => panic!("cycle count must be non-zero"),
};

/// Configuration options for [`Bench`](crate::Bench).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Invocations per pass, and the averaging denominator of the timing
    /// report (default: 100,000).
    pub cycles: NonZeroU64,

    /// Untimed invocations before the timing pass starts (default: 0).
    pub warmup: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cycles: DEFAULT_CYCLES,
            warmup: 0,
        }
    }
}

impl Config {
    /// Cycle count as a plain integer.
    pub fn cycles(&self) -> u64 {
        self.cycles.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.cycles(), 100_000);
        assert_eq!(config.warmup, 0);
    }
}
