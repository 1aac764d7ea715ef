//! Settlement module: balance aggregation and transfer minimization

pub mod aggregator;
pub mod engine;
pub mod minimizer;

pub use aggregator::*;
pub use engine::*;
pub use minimizer::*;
