//! Analysis and result aggregation modules
//!
//! - Tempo and key analyzers over a waveform
//! - Result types

pub mod facade;
pub mod result;

pub use facade::{KeyAnalyzer, TempoAnalyzer};
