pub mod draw;
pub mod feasibility;
pub mod sampler;
pub mod validator;

pub use crate::domain::model::{Assignment, ExclusionPair, Participant};
pub use crate::utils::error::{DrawError, ImpossibleReason, InvalidInput};
