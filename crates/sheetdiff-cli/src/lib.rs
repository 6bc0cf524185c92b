//! CLI library components for sheetdiff.

pub mod logging;
pub mod pipeline;
pub mod state;
