//! Error types for measurement runs.

use std::any::Any;
use std::fmt;
use std::io;

/// Which loop of a measurement was running when something went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// The latency loop bracketed by a [`ScopeTimer`](crate::ScopeTimer).
    Timing,
    /// The second loop that fills the outcome frequency table.
    Distribution,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Timing => write!(f, "timing"),
            Pass::Distribution => write!(f, "distribution"),
        }
    }
}

/// Errors returned by the measurement functions.
#[derive(Debug, thiserror::Error)]
pub enum MeasureError {
    /// The measured callable panicked mid-run.
    ///
    /// `invocation` is 1-based within the pass that failed.
    #[error("{label}: {pass} pass aborted on invocation {invocation}: {message}")]
    CallablePanicked {
        /// Label of the measurement.
        label: String,
        /// Pass that was interrupted.
        pass: Pass,
        /// Invocation that panicked.
        invocation: u64,
        /// Rendered panic payload.
        message: String,
    },

    /// Writing a report line to the sink failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

impl MeasureError {
    /// The pass that failed, if the error came from the callable.
    pub fn pass(&self) -> Option<Pass> {
        match self {
            MeasureError::CallablePanicked { pass, .. } => Some(*pass),
            MeasureError::Io(_) => None,
        }
    }
}

/// Render a panic payload the way the default hook does.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_variants() {
        let a: Box<dyn Any + Send> = Box::new("boom");
        let b: Box<dyn Any + Send> = Box::new(String::from("bang"));
        let c: Box<dyn Any + Send> = Box::new(7u32);

        assert_eq!(panic_message(a.as_ref()), "boom");
        assert_eq!(panic_message(b.as_ref()), "bang");
        assert_eq!(panic_message(c.as_ref()), "non-string panic payload");
    }

    #[test]
    fn test_display_matches_diagnostic_line() {
        let err = MeasureError::CallablePanicked {
            label: "d(6)".to_string(),
            pass: Pass::Distribution,
            invocation: 50,
            message: "die fell off the table".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "d(6): distribution pass aborted on invocation 50: die fell off the table"
        );
        assert_eq!(err.pass(), Some(Pass::Distribution));
    }
}
