//! Git conflict resolution trainer over a fixed set of scenarios.

mod scenarios;
mod trainer;
mod validator;

pub use scenarios::{ConflictScenario, SCENARIOS, find_scenario};
pub use trainer::{ConflictTrainer, TrainerSnapshot};
pub use validator::{Validation, has_conflict_markers, normalize, validate};
