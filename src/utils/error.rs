use crate::core::feasibility::Infeasibility;
use crate::domain::model::{ExclusionPair, Participant};
use std::fmt;
use thiserror::Error;

/// Input problems detected before any sampling takes place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("at least 2 participants are required, got {count}")]
    TooFewParticipants { count: usize },

    #[error("participant id '{id}' appears more than once")]
    DuplicateParticipant { id: String },

    #[error("exclusion pair {pair} references unknown participant '{id}'")]
    UnknownExclusionId { pair: ExclusionPair, id: String },

    #[error("max_attempts must be at least 1")]
    ZeroAttemptBudget,
}

/// Why a well-formed draw produced no assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImpossibleReason {
    /// The feasibility heuristic proved no valid assignment exists.
    ProvenInfeasible(Infeasibility),
    /// Random search gave up. This does not prove infeasibility.
    AttemptBudgetExhausted { attempts: usize },
}

impl ImpossibleReason {
    pub fn is_proven(&self) -> bool {
        matches!(self, Self::ProvenInfeasible(_))
    }
}

impl fmt::Display for ImpossibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProvenInfeasible(why) => write!(f, "heuristically proven infeasible: {}", why),
            Self::AttemptBudgetExhausted { attempts } => {
                write!(f, "no valid assignment found in {} attempts", attempts)
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error(
        "Impossible assignment for {} participants and {} exclusions ({reason})",
        .participants.len(),
        .exclusions.len()
    )]
    ImpossibleAssignment {
        participants: Vec<Participant>,
        exclusions: Vec<ExclusionPair>,
        reason: ImpossibleReason,
    },
}

impl DrawError {
    pub fn impossible(
        participants: &[Participant],
        exclusions: &[ExclusionPair],
        reason: ImpossibleReason,
    ) -> Self {
        Self::ImpossibleAssignment {
            participants: participants.to_vec(),
            exclusions: exclusions.to_vec(),
            reason,
        }
    }

    pub fn impossible_reason(&self) -> Option<&ImpossibleReason> {
        match self {
            Self::ImpossibleAssignment { reason, .. } => Some(reason),
            Self::InvalidInput(_) => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Draw failed: {0}")]
    Draw(#[from] DrawError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },

    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Solver,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Draw(DrawError::InvalidInput(_)) => ErrorCategory::Input,
            AppError::Draw(DrawError::ImpossibleAssignment { .. }) => ErrorCategory::Solver,
            AppError::ConfigParseError { .. } | AppError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            AppError::IoError(_) | AppError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 重試可能成功
            AppError::Draw(DrawError::ImpossibleAssignment { reason, .. }) if !reason.is_proven() => {
                ErrorSeverity::Medium
            }
            AppError::Draw(DrawError::ImpossibleAssignment { .. }) => ErrorSeverity::Critical,
            AppError::Draw(DrawError::InvalidInput(_))
            | AppError::ConfigParseError { .. }
            | AppError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            AppError::IoError(_) | AppError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AppError::Draw(DrawError::InvalidInput(InvalidInput::TooFewParticipants { .. })) => {
                "Add at least two participants to the draw file"
            }
            AppError::Draw(DrawError::InvalidInput(InvalidInput::DuplicateParticipant { .. })) => {
                "Give every participant a unique id"
            }
            AppError::Draw(DrawError::InvalidInput(InvalidInput::UnknownExclusionId { .. })) => {
                "Check that every exclusion names ids listed under [[participants]]"
            }
            AppError::Draw(DrawError::InvalidInput(InvalidInput::ZeroAttemptBudget)) => {
                "Set max_attempts to a positive number"
            }
            AppError::Draw(DrawError::ImpossibleAssignment { reason, .. }) if reason.is_proven() => {
                "Remove exclusions for the named participant or add more participants"
            }
            AppError::Draw(DrawError::ImpossibleAssignment { .. }) => {
                "Run again or raise --max-attempts; the exclusions may also be too tight"
            }
            AppError::IoError(_) => "Make sure the draw file exists and is readable",
            AppError::SerializationError(_) => "Report this as a bug",
            AppError::ConfigParseError { .. } => "Make sure the draw file is valid TOML",
            AppError::InvalidConfigValueError { .. } => "Fix the named field in the draw file",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::Draw(DrawError::ImpossibleAssignment { reason, .. }) if reason.is_proven() => {
                format!("These exclusions make a draw impossible: {}", reason)
            }
            AppError::Draw(DrawError::ImpossibleAssignment { reason, .. }) => {
                format!("Could not find a valid draw: {}", reason)
            }
            AppError::Draw(DrawError::InvalidInput(e)) => format!("The draw input is invalid: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn exhausted() -> AppError {
        AppError::Draw(DrawError::impossible(
            &[],
            &[],
            ImpossibleReason::AttemptBudgetExhausted { attempts: 10 },
        ))
    }

    fn proven() -> AppError {
        AppError::Draw(DrawError::impossible(
            &[],
            &[],
            ImpossibleReason::ProvenInfeasible(Infeasibility::TooManyExclusions {
                id: "a".to_string(),
                excluded_partners: 1,
                participant_count: 2,
            }),
        ))
    }

    #[test]
    fn test_budget_exhaustion_is_not_reported_as_proof() {
        assert_eq!(exhausted().severity(), ErrorSeverity::Medium);
        assert_eq!(proven().severity(), ErrorSeverity::Critical);
        assert_ne!(exhausted().exit_code(), proven().exit_code());
        assert!(exhausted().user_friendly_message().contains("10 attempts"));
    }

    #[test]
    fn test_invalid_input_category() {
        let err = AppError::from(DrawError::from(InvalidInput::TooFewParticipants { count: 1 }));
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_every_error_exits_non_zero() {
        let errors = vec![
            exhausted(),
            proven(),
            AppError::from(DrawError::from(InvalidInput::ZeroAttemptBudget)),
            AppError::ConfigParseError {
                message: "bad".to_string(),
            },
            AppError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "missing")),
        ];
        for err in errors {
            assert_ne!(err.exit_code(), 0, "{} exited 0", err);
        }
    }
}
