pub mod analyzer;
pub mod controller;
pub mod loop_worker;

pub use analyzer::{ExpressionAnalyzer, RepeatingAnalyzer, ScriptedAnalyzer};
pub use controller::SamplingController;
