//! Benchmark configuration.
//!
//! [`BenchConfig`] selects the encoder and the way the input is split into
//! independent blocks for parallel compression.

use crate::config::{ACCELERATION_DEFAULT, BLOCK_SIZE_DEFAULT, NB_WORKERS_DEFAULT};
use crate::hc::types::LZ4HC_DEFAULT_ATTEMPTS;

/// Smallest block size accepted; smaller values fall back to this.
pub const MIN_BLOCK_SIZE: usize = 32;

// ── BenchConfig struct ────────────────────────────────────────────────────────

/// Runtime parameters controlling a single benchmark session.
///
/// Construct via [`Default`] and then adjust with the builder-style setters,
/// or set fields directly.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Verbosity level: 0 = silent, 1 = errors, 2 = results (default),
    /// 3 = progress, 4 = per-block detail.
    pub display_level: u32,

    /// Size of the independent blocks the input is split into.
    pub block_size: usize,

    /// Worker threads; `0` means one per logical CPU.
    pub nb_workers: usize,

    /// Use the HC encoder instead of the greedy one.
    pub hc: bool,

    /// HC chain walk depth.
    pub hc_attempts: usize,

    /// Greedy encoder acceleration.
    pub acceleration: i32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            display_level: 2,
            block_size: BLOCK_SIZE_DEFAULT,
            nb_workers: NB_WORKERS_DEFAULT,
            hc: false,
            hc_attempts: LZ4HC_DEFAULT_ATTEMPTS,
            acceleration: ACCELERATION_DEFAULT,
        }
    }
}

impl BenchConfig {
    pub fn set_notification_level(&mut self, level: u32) -> &mut Self {
        self.display_level = level;
        self
    }

    /// Set the block size; values below [`MIN_BLOCK_SIZE`] are raised to it.
    pub fn set_block_size(&mut self, block_size: usize) -> &mut Self {
        self.block_size = block_size.max(MIN_BLOCK_SIZE);
        self
    }

    pub fn set_nb_workers(&mut self, nb_workers: usize) -> &mut Self {
        self.nb_workers = nb_workers;
        self
    }

    pub fn set_hc(&mut self, hc: bool) -> &mut Self {
        self.hc = hc;
        self
    }

    pub fn set_hc_attempts(&mut self, attempts: usize) -> &mut Self {
        self.hc_attempts = attempts;
        self
    }

    pub fn set_acceleration(&mut self, acceleration: i32) -> &mut Self {
        self.acceleration = acceleration;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = BenchConfig::default();
        assert_eq!(c.block_size, 4 << 20);
        assert_eq!(c.hc_attempts, 256);
        assert!(!c.hc);
    }

    #[test]
    fn block_size_floor() {
        let mut c = BenchConfig::default();
        c.set_block_size(1);
        assert_eq!(c.block_size, MIN_BLOCK_SIZE);
        c.set_block_size(4096).set_hc(true).set_nb_workers(2);
        assert_eq!(c.block_size, 4096);
        assert!(c.hc);
        assert_eq!(c.nb_workers, 2);
    }

    #[test]
    fn notification_level_is_per_config() {
        let mut quiet = BenchConfig::default();
        quiet.set_notification_level(0);
        let mut loud = BenchConfig::default();
        loud.set_notification_level(4);
        assert_eq!((quiet.display_level, loud.display_level), (0, 4));
    }
}
