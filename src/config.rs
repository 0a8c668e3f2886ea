// config.rs: Compile-time defaults and environment overrides.
//
// The codec itself takes every parameter explicitly; these values only feed
// the command-line tool and the parallel benchmark.

use crate::block::types::MB;
use crate::cli::constants::display_level;
use crate::hc::types::{LZ4HC_DEFAULT_ATTEMPTS, LZ4HC_MAX_ATTEMPTS};

// Block size used when the benchmark splits its input into independent blocks.
// Can be overridden with `bench --block-size`.
pub const BLOCK_SIZE_DEFAULT: usize = 4 * MB;

// Greedy encoder acceleration used by `compress` when none is given.
pub const ACCELERATION_DEFAULT: i32 = 1;

// Default number of benchmark worker threads. 0 = one per logical CPU.
// Can be overridden by the LZ4BLOCK_NBWORKERS environment variable,
// or by `bench --workers`.
pub const NB_WORKERS_DEFAULT: usize = 0;

// Maximum number of worker threads selectable at runtime.
pub const NB_WORKERS_MAX: usize = 200;

pub const ENV_NBWORKERS: &str = "LZ4BLOCK_NBWORKERS";
pub const ENV_HC_ATTEMPTS: &str = "LZ4BLOCK_HC_ATTEMPTS";

fn parse_env_u32(name: &str, value: &str) -> Option<u32> {
    match value.trim().parse::<u32>() {
        Ok(v) => Some(v),
        Err(_) => {
            if display_level() >= 2 {
                eprintln!("Ignore environment variable setting {name}={value}: not a valid unsigned value ");
            }
            None
        }
    }
}

/// Benchmark worker count from `LZ4BLOCK_NBWORKERS`, falling back to
/// [`NB_WORKERS_DEFAULT`].
pub fn init_nb_workers() -> usize {
    init_nb_workers_from(std::env::var(ENV_NBWORKERS).ok().as_deref())
}

/// Testable core of [`init_nb_workers`]: `None` means the variable is unset.
pub fn init_nb_workers_from(env_val: Option<&str>) -> usize {
    env_val
        .and_then(|v| parse_env_u32(ENV_NBWORKERS, v))
        .map(|v| (v as usize).min(NB_WORKERS_MAX))
        .unwrap_or(NB_WORKERS_DEFAULT)
}

/// Resolve a worker count of 0 to the number of logical CPUs.
pub fn effective_workers(requested: usize) -> usize {
    if requested == 0 {
        num_cpus::get().clamp(1, NB_WORKERS_MAX)
    } else {
        requested.min(NB_WORKERS_MAX)
    }
}

/// HC chain walk depth from `LZ4BLOCK_HC_ATTEMPTS`, falling back to
/// [`LZ4HC_DEFAULT_ATTEMPTS`].
pub fn init_hc_attempts() -> usize {
    init_hc_attempts_from(std::env::var(ENV_HC_ATTEMPTS).ok().as_deref())
}

/// Testable core of [`init_hc_attempts`].  Values are clamped to
/// `1..=LZ4HC_MAX_ATTEMPTS`.
pub fn init_hc_attempts_from(env_val: Option<&str>) -> usize {
    env_val
        .and_then(|v| parse_env_u32(ENV_HC_ATTEMPTS, v))
        .map(|v| (v as usize).clamp(1, LZ4HC_MAX_ATTEMPTS))
        .unwrap_or(LZ4HC_DEFAULT_ATTEMPTS)
}
