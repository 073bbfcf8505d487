//! # monkey-timer
//!
//! Micro-benchmarking and outcome-distribution profiling for random-variate
//! generators and other small callables.
//!
//! Two measurements are provided:
//! - [`function_timer`]: average latency per call over 100,000 calls
//! - [`distribution_timer`]: the same latency report, followed by the
//!   percentage of calls that returned each distinct value
//!
//! Both are built on [`ScopeTimer`], a drop guard that reports the average
//! duration of the work done during its lifetime.
//!
//! ## Quick Start
//!
//! ```no_run
//! use monkey_timer::{distribution_timer, function_timer};
//!
//! let mut state = 7u64;
//! let mut d6 = move || {
//!     state ^= state << 13;
//!     state ^= state >> 7;
//!     state ^= state << 17;
//!     state % 6 + 1
//! };
//!
//! function_timer("sum(0..10)", || (0..10u64).sum::<u64>()).unwrap();
//! distribution_timer("d(6)", &mut d6).unwrap();
//! ```
//!
//! Output:
//!
//! ```text
//! sum(0..10): 3 nano
//! d(6): 2 nano
//! 1: 16.658%
//! 2: 16.695%
//! ...
//! 6: 16.671%
//!
//! ```
//!
//! Use [`Bench`] to write to another sink or change the cycle count.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bench;
mod config;
mod error;

pub mod measurement;
pub mod output;

pub use bench::Bench;
pub use config::{Config, DEFAULT_CYCLES};
pub use error::{MeasureError, Pass};
pub use measurement::{black_box, AverageDuration, OutcomeTable, ScopeTimer, NANO_THRESHOLD_NS};

use std::fmt::Display;
use std::io;

/// Time `f` over [`DEFAULT_CYCLES`] calls and print the average to stdout.
///
/// The return value of `f` is discarded.
pub fn function_timer<F, T>(label: &str, f: F) -> Result<(), MeasureError>
where
    F: FnMut() -> T,
{
    Bench::new().function_timer(io::stdout(), label, f)
}

/// Time `f`, then print the distribution of its return values to stdout.
///
/// See [`Bench::distribution_timer`] for the report format.
pub fn distribution_timer<F, T>(label: &str, f: F) -> Result<(), MeasureError>
where
    F: FnMut() -> T,
    T: Ord + Display,
{
    Bench::new().distribution_timer(io::stdout(), label, f)
}
