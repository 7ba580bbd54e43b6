//! Signal evaluation: reference trend, confluence scoring and the
//! engine façade.

pub mod engine;
pub mod scorer;
pub mod trend;

pub use engine::{CycleSummary, SignalEngine};
pub use scorer::{DirectionScore, ScoreInput, SignalState};
