//! Plain-text report lines.
//!
//! Every line the harness produces is written here, so the exact formats
//! live in one place:
//!
//! ```text
//! <label>: <integer> nano
//! <label>: <float> seconds
//! <key>: <percentage>%
//! <label>: <pass> pass aborted on invocation <n>: <message>
//! ```

use std::fmt::Display;
use std::io::{self, Write};

use crate::error::MeasureError;
use crate::measurement::{AverageDuration, OutcomeTable};

/// Write the timer report line.
pub fn write_timer_line<W: Write>(
    out: &mut W,
    label: &str,
    average: AverageDuration,
) -> io::Result<()> {
    writeln!(out, "{}: {}", label, average)
}

/// Write one line per observed value in ascending order, then a blank line.
pub fn write_distribution<W, T>(out: &mut W, table: &OutcomeTable<T>, cycles: u64) -> io::Result<()>
where
    W: Write,
    T: Ord + Display,
{
    for (value, percentage) in table.percentages(cycles) {
        writeln!(out, "{}: {}%", value, percentage)?;
    }
    writeln!(out)
}

/// Write the one-line diagnostic for a failed measurement.
pub fn write_diagnostic<W: Write>(out: &mut W, error: &MeasureError) -> io::Result<()> {
    writeln!(out, "{}", error)
}
