//! Invocation loops for the timing and distribution passes.
//!
//! Both passes run the callable a fixed number of times inside
//! `catch_unwind`, so a panicking callable stops the loop and is reported
//! back as an [`Interruption`] instead of tearing down the harness.

use std::io::Write;
use std::num::NonZeroU64;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crate::error::panic_message;

use super::outcome::OutcomeTable;
use super::timer::{black_box, ScopeTimer};

/// Checkpoints are taken after calls 1, 2, 4, ... up to this many calls,
/// then every this many calls.
const CHECKPOINT_STRIDE: u64 = 1024;

/// Clock reading taken inside an invocation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    /// Invocations completed when the reading was taken.
    pub completed: u64,
    /// Instant right after the `completed`-th invocation returned.
    pub at: Instant,
}

/// A pass that stopped because the callable panicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interruption {
    /// Invocations that returned normally before the panic.
    pub completed: u64,
    /// Last checkpoint before the panic, if any call completed.
    ///
    /// Its instant precedes the failed call, the panic hook, and the unwind.
    pub checkpoint: Option<Checkpoint>,
    /// Rendered panic payload.
    pub message: String,
}

impl Interruption {
    /// 1-based index of the invocation that panicked.
    pub fn invocation(&self) -> u64 {
        self.completed + 1
    }
}

/// Runs a callable for a fixed number of cycles.
#[derive(Debug, Clone, Copy)]
pub struct Collector {
    /// Invocations per pass.
    cycles: NonZeroU64,
    /// Untimed invocations before the timing pass.
    warmup_iterations: usize,
}

impl Collector {
    /// Create a collector without warmup.
    pub fn new(cycles: NonZeroU64) -> Self {
        Self::with_warmup(cycles, 0)
    }

    /// Create a collector that runs `warmup_iterations` untimed calls first.
    pub fn with_warmup(cycles: NonZeroU64, warmup_iterations: usize) -> Self {
        Self {
            cycles,
            warmup_iterations,
        }
    }

    /// Invocations per pass.
    pub fn cycles(&self) -> NonZeroU64 {
        self.cycles
    }

    /// Time `cycles` invocations of `f`, reporting the average to `out`.
    ///
    /// The report is written even when `f` panics. It then averages over the
    /// calls up to the last checkpoint, measured to that checkpoint's
    /// instant, so the failed call and the unwind are excluded. If no call
    /// completed, the report is the total elapsed time. A panic during warmup
    /// stops the pass before the timer starts, so nothing is reported.
    pub fn time<W, F, T>(&self, out: W, label: &str, f: &mut F) -> Result<(), Interruption>
    where
        W: Write,
        F: FnMut() -> T,
    {
        if self.warmup_iterations > 0 {
            run_cycles(self.warmup_iterations as u64, f, |v| {
                black_box(v);
            })?;
        }

        let mut timer = ScopeTimer::with_cycles(out, label, self.cycles);
        let outcome = run_cycles(self.cycles.get(), f, |v| {
            black_box(v);
        });
        if let Err(interruption) = &outcome {
            match interruption.checkpoint {
                Some(checkpoint) => {
                    timer.truncate_cycles(checkpoint.completed);
                    timer.stop_at(checkpoint.at);
                }
                None => timer.truncate_cycles(0),
            }
        }
        drop(timer);
        outcome
    }

    /// Record the result of `cycles` invocations of `f`.
    pub fn tally<F, T>(&self, f: &mut F) -> Result<OutcomeTable<T>, Interruption>
    where
        F: FnMut() -> T,
        T: Ord,
    {
        let mut table = OutcomeTable::new();
        run_cycles(self.cycles.get(), f, |v| table.record(v))?;
        Ok(table)
    }
}

/// Position of the checkpoint after `current`.
fn next_checkpoint(current: u64) -> u64 {
    if current < CHECKPOINT_STRIDE {
        current * 2
    } else {
        current + CHECKPOINT_STRIDE
    }
}

/// Call `f` `cycles` times, handing each result to `sink`.
fn run_cycles<F, T, S>(cycles: u64, f: &mut F, mut sink: S) -> Result<(), Interruption>
where
    F: FnMut() -> T,
    S: FnMut(T),
{
    let mut completed = 0u64;
    let mut checkpoint = None;
    let mut next = 1u64;
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        for _ in 0..cycles {
            sink(f());
            completed += 1;
            if completed == next {
                checkpoint = Some(Checkpoint {
                    completed,
                    at: Instant::now(),
                });
                next = next_checkpoint(next);
            }
        }
    }));

    result.map_err(|payload| Interruption {
        completed,
        checkpoint,
        message: panic_message(payload.as_ref()),
    })
}
