//! Scoped wall-clock timing.
//!
//! A [`ScopeTimer`] captures a monotonic start instant when it is created and
//! writes one report line when it is dropped. Dropping happens on every exit
//! path, including unwinding out of a panicking callable, so a measurement
//! always reports exactly once.

use std::fmt;
use std::hint::black_box as std_black_box;
use std::io::Write;
use std::num::NonZeroU64;
use std::time::{Duration, Instant};

use log::warn;

use crate::output::terminal::write_timer_line;

/// Averages at or above this many nanoseconds are reported in seconds.
pub const NANO_THRESHOLD_NS: u128 = 1_000_000;

/// Wrapper around `std::hint::black_box` for preventing compiler optimizations.
///
/// The measured callable's return value goes through this so the call cannot
/// be elided when the result is otherwise unused.
#[inline]
pub fn black_box<T>(x: T) -> T {
    std_black_box(x)
}

/// Average duration of one cycle, in the unit used for reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AverageDuration {
    /// Whole nanoseconds, for averages under one millisecond.
    Nanos(u128),
    /// Fractional seconds, for everything else.
    Seconds(f64),
}

impl AverageDuration {
    /// Pick the reporting unit for an average of `nanos` nanoseconds.
    pub fn from_nanos(nanos: u128) -> Self {
        if nanos < NANO_THRESHOLD_NS {
            AverageDuration::Nanos(nanos)
        } else {
            AverageDuration::Seconds(nanos as f64 / 1e9)
        }
    }

    /// Integer average of `elapsed` over `cycles` calls.
    pub fn per_cycle(elapsed: Duration, cycles: NonZeroU64) -> Self {
        Self::from_nanos(elapsed.as_nanos() / u128::from(cycles.get()))
    }
}

impl fmt::Display for AverageDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AverageDuration::Nanos(n) => write!(f, "{} nano", n),
            AverageDuration::Seconds(s) => write!(f, "{} seconds", s),
        }
    }
}

/// Measures whatever happens during its lifetime and reports the average
/// per-cycle duration to `out` when dropped.
///
/// # Example
///
/// ```
/// use monkey_timer::ScopeTimer;
///
/// let mut out = Vec::new();
/// {
///     let _t = ScopeTimer::new(&mut out, "sum");
///     let _ = (0..1000u64).sum::<u64>();
/// }
/// let line = String::from_utf8(out).unwrap();
/// assert!(line.starts_with("sum: "));
/// ```
pub struct ScopeTimer<W: Write> {
    out: W,
    label: String,
    cycles: NonZeroU64,
    start: Instant,
    end: Option<Instant>,
}

impl<W: Write> ScopeTimer<W> {
    /// Start a timer that reports the total elapsed time.
    pub fn new(out: W, label: impl Into<String>) -> Self {
        Self::with_cycles(out, label, NonZeroU64::MIN)
    }

    /// Start a timer whose report divides the elapsed time by `cycles`.
    pub fn with_cycles(out: W, label: impl Into<String>, cycles: NonZeroU64) -> Self {
        let label = label.into();
        Self {
            out,
            label,
            cycles,
            start: Instant::now(),
            end: None,
        }
    }

    /// Label the report will carry.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current averaging denominator.
    pub fn cycles(&self) -> NonZeroU64 {
        self.cycles
    }

    /// Time since the timer started, without reporting.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Average over `completed` cycles instead of the planned count.
    ///
    /// Used when a pass stops early. Zero is treated as one so the report
    /// shows the total elapsed time.
    pub fn truncate_cycles(&mut self, completed: u64) {
        self.cycles = NonZeroU64::new(completed).unwrap_or(NonZeroU64::MIN);
    }

    /// Measure up to `end` instead of the moment the timer is dropped.
    pub fn stop_at(&mut self, end: Instant) {
        self.end = Some(end);
    }
}

impl<W: Write> Drop for ScopeTimer<W> {
    fn drop(&mut self) {
        let elapsed = match self.end {
            Some(end) => end.saturating_duration_since(self.start),
            None => self.start.elapsed(),
        };
        let average = AverageDuration::per_cycle(elapsed, self.cycles);
        let written = write_timer_line(&mut self.out, &self.label, average)
            .and_then(|()| self.out.flush());
        if let Err(err) = written {
            warn!("{}: timer report lost: {}", self.label, err);
        }
    }
}

impl<W: Write> fmt::Debug for ScopeTimer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeTimer")
            .field("label", &self.label)
            .field("cycles", &self.cycles)
            .field("start", &self.start)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}
