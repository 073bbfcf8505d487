//! `Bench` entry point and builder.

use std::fmt::Display;
use std::io::Write;
use std::num::NonZeroU64;

use log::{debug, warn};

use crate::config::Config;
use crate::error::{MeasureError, Pass};
use crate::measurement::{Collector, Interruption};
use crate::output::terminal::{write_diagnostic, write_distribution};

/// Runs the repeated-call and distribution timers.
///
/// Callables are zero-argument closures; bind any arguments by capturing
/// them. Every report line goes to the sink passed to each call.
///
/// # Example
///
/// ```
/// use monkey_timer::Bench;
///
/// let mut out = Vec::new();
/// let mut i = 0u32;
/// Bench::new()
///     .cycles(1_000)
///     .distribution_timer(&mut out, "parity", || {
///         i += 1;
///         i % 2
///     })
///     .unwrap();
///
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.ends_with("0: 50%\n1: 50%\n\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bench {
    config: Config,
}

impl Bench {
    /// Create with the default configuration (100,000 cycles, no warmup).
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create with 1,000 cycles, for tests and quick checks.
    pub fn quick() -> Self {
        Self::new().cycles(1_000)
    }

    /// Create from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Set invocations per pass. Zero is raised to one.
    pub fn cycles(mut self, n: u64) -> Self {
        self.config.cycles = NonZeroU64::new(n).unwrap_or(NonZeroU64::MIN);
        self
    }

    /// Set untimed warmup invocations before the timing pass.
    pub fn warmup(mut self, n: usize) -> Self {
        self.config.warmup = n;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn collector(&self) -> Collector {
        Collector::with_warmup(self.config.cycles, self.config.warmup)
    }

    /// Measure the average latency of `f` over the configured cycle count.
    ///
    /// Writes `"<label>: <n> nano"` or `"<label>: <s> seconds"` to `out`.
    /// If `f` panics, the line still appears (averaged over the calls that
    /// completed) and is followed by a diagnostic line.
    pub fn function_timer<W, F, T>(&self, mut out: W, label: &str, mut f: F) -> Result<(), MeasureError>
    where
        W: Write,
        F: FnMut() -> T,
    {
        self.timing_pass(&mut out, label, &mut f)
    }

    /// Measure latency, then tabulate how often `f` returns each value.
    ///
    /// After the timing line, writes `"<value>: <percentage>%"` for every
    /// distinct value in ascending order, then a blank line. The two passes
    /// call `f` independently, `cycles` times each.
    ///
    /// If `f` panics in either pass, a diagnostic line is written and no
    /// distribution lines follow.
    pub fn distribution_timer<W, F, T>(
        &self,
        mut out: W,
        label: &str,
        mut f: F,
    ) -> Result<(), MeasureError>
    where
        W: Write,
        F: FnMut() -> T,
        T: Ord + Display,
    {
        self.timing_pass(&mut out, label, &mut f)?;

        let cycles = self.config.cycles();
        debug!("{}: distribution pass, {} cycles", label, cycles);
        let table = match self.collector().tally(&mut f) {
            Ok(table) => table,
            Err(interruption) => {
                return Err(report_failure(&mut out, label, Pass::Distribution, interruption));
            }
        };
        debug!("{}: {} distinct outcomes", label, table.len());

        write_distribution(&mut out, &table, cycles)?;
        out.flush()?;
        Ok(())
    }

    fn timing_pass<W, F, T>(&self, out: &mut W, label: &str, f: &mut F) -> Result<(), MeasureError>
    where
        W: Write,
        F: FnMut() -> T,
    {
        debug!("{}: timing pass, {} cycles", label, self.config.cycles());
        match self.collector().time(&mut *out, label, f) {
            Ok(()) => Ok(()),
            Err(interruption) => Err(report_failure(out, label, Pass::Timing, interruption)),
        }
    }
}

/// Turn an interrupted pass into an error and write its diagnostic line.
fn report_failure<W: Write>(
    out: &mut W,
    label: &str,
    pass: Pass,
    interruption: Interruption,
) -> MeasureError {
    let error = MeasureError::CallablePanicked {
        label: label.to_string(),
        pass,
        invocation: interruption.invocation(),
        message: interruption.message,
    };
    warn!("{}", error);

    if let Err(err) = write_diagnostic(out, &error).and_then(|()| out.flush()) {
        warn!("{}: diagnostic lost: {}", label, err);
    }
    error
}
