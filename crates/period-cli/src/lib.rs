//! CLI library components for the period tool.

pub mod logging;
