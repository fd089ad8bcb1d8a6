pub mod drill;
pub mod error;

pub use drill::{Drill, DrillShot, DrillSummary, ShotOutcome, ShotResult, run_drill};
pub use error::SimError;
