//! CLI library components for the calculator.

pub mod history;
pub mod logging;
