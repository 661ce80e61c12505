pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{toml_config::DrawConfig, OutputFormat};
pub use crate::core::draw::{
    generate_assignment, generate_assignment_with_rng, DrawEngine, DrawOptions, DrawOutcome,
    DEFAULT_MAX_ATTEMPTS,
};
pub use crate::core::feasibility::{check_feasibility, Feasibility, Infeasibility};
pub use domain::model::{Assignment, ExclusionPair, Pairing, Participant};
pub use domain::report::DrawReport;
pub use utils::error::{AppError, DrawError, ImpossibleReason, InvalidInput, Result};
