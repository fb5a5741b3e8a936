//! Calibration diagnostics for scored binary data.
//!
//! These are local arithmetic helpers, independent of the parallel
//! validation engine.

pub mod histogram;

pub use histogram::{ProbabilityBin, ProbabilityHistogram};
