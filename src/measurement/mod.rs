//! Measurement infrastructure.
//!
//! This module provides:
//! - [`ScopeTimer`], a drop guard that reports the average duration of the
//!   work done during its lifetime
//! - [`Collector`], which drives the fixed-size invocation loops and contains
//!   panics raised by the measured callable
//! - [`OutcomeTable`], the frequency table filled by the distribution pass
//!
//! Timing uses `std::time::Instant`, the platform's monotonic clock.

mod collector;
mod outcome;
mod timer;

pub use collector::{Checkpoint, Collector, Interruption};
pub use outcome::OutcomeTable;
pub use timer::{black_box, AverageDuration, ScopeTimer, NANO_THRESHOLD_NS};
