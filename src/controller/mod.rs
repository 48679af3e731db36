//! Run controller module
//!
//! Sequences one boost run: probe result in, monitors enumerated, level
//! applied to each monitor in order, report out.

pub mod boost_run;

pub use boost_run::{BoostReport, BoostRun, RunState};
