//! Output formatting for measurement reports.

pub mod terminal;

pub use terminal::{write_diagnostic, write_distribution, write_timer_line};
