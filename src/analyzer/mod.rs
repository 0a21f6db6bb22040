//! Analyzer module - prompt quality analysis engine

pub mod comparison;
pub mod detectors;
pub mod engine;
pub mod scoring;

pub use engine::PromptDebugger;
pub use scoring::ScoreCalculator;
