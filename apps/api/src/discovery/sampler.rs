//! Random offset source for discovery.
//!
//! Injected so tests can script the offsets the engine samples.

use rand::Rng;

pub trait OffsetSampler: Send + Sync {
    /// Uniform offset in `[0, total)`. Callers never pass `total == 0`.
    fn sample(&self, total: u64) -> u64;
}

/// Production sampler backed by the thread-local RNG.
#[derive(Debug, Clone, Default)]
pub struct ThreadRngSampler;

impl OffsetSampler for ThreadRngSampler {
    fn sample(&self, total: u64) -> u64 {
        if total == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_within_bounds() {
        let sampler = ThreadRngSampler;
        for _ in 0..1000 {
            let offset = sampler.sample(7);
            assert!(offset < 7, "Offset {offset} out of range");
        }
    }

    #[test]
    fn test_single_item_catalog_always_zero() {
        let sampler = ThreadRngSampler;
        assert_eq!(sampler.sample(1), 0);
    }

    #[test]
    fn test_zero_total_does_not_panic() {
        assert_eq!(ThreadRngSampler.sample(0), 0);
    }
}
