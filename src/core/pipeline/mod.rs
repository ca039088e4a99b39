//! The five pipeline stages and the state they hand off to one another.

pub mod hazards;
pub mod latches;
pub mod stages;

pub use latches::Latches;
