use crate::core::feasibility::{check_feasibility, Feasibility};
use crate::core::sampler::shuffle_ids;
use crate::core::validator::is_valid_assignment;
use crate::domain::model::{Assignment, ExclusionPair, Participant};
use crate::utils::error::{DrawError, ImpossibleReason, InvalidInput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOptions {
    pub max_attempts: usize,
    /// Seeds the draw for reproducible output. `None` uses the thread RNG.
    pub seed: Option<u64>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

impl DrawOptions {
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    pub assignment: Assignment,
    /// Samples consumed, including the successful one.
    pub attempts: usize,
}

pub struct DrawEngine {
    options: DrawOptions,
}

impl DrawEngine {
    pub fn new(options: DrawOptions) -> Self {
        Self { options }
    }

    pub fn draw(
        &self,
        participants: &[Participant],
        exclusions: &[ExclusionPair],
    ) -> Result<DrawOutcome, DrawError> {
        match self.options.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                draw_with_rng(participants, exclusions, self.options.max_attempts, &mut rng)
            }
            None => draw_with_rng(
                participants,
                exclusions,
                self.options.max_attempts,
                &mut rand::thread_rng(),
            ),
        }
    }
}

/// Draws a giver → receiver assignment for `participants`.
///
/// Nobody is assigned to themselves and no exclusion pair is used in either
/// direction. Fails with [`DrawError::InvalidInput`] before any sampling if
/// the input is malformed, and with [`DrawError::ImpossibleAssignment`] when
/// the configuration is provably infeasible or the attempt budget runs out.
pub fn generate_assignment(
    participants: &[Participant],
    exclusions: &[ExclusionPair],
    options: &DrawOptions,
) -> Result<Assignment, DrawError> {
    DrawEngine::new(options.clone())
        .draw(participants, exclusions)
        .map(|outcome| outcome.assignment)
}

pub fn generate_assignment_with_rng<R: Rng + ?Sized>(
    participants: &[Participant],
    exclusions: &[ExclusionPair],
    max_attempts: usize,
    rng: &mut R,
) -> Result<Assignment, DrawError> {
    draw_with_rng(participants, exclusions, max_attempts, rng).map(|outcome| outcome.assignment)
}

pub fn draw_with_rng<R: Rng + ?Sized>(
    participants: &[Participant],
    exclusions: &[ExclusionPair],
    max_attempts: usize,
    rng: &mut R,
) -> Result<DrawOutcome, DrawError> {
    validate_draw_input(participants, exclusions, max_attempts)?;

    if let Feasibility::ProvablyInfeasible(why) = check_feasibility(participants.len(), exclusions) {
        tracing::debug!("Draw rejected before sampling: {}", why);
        return Err(DrawError::impossible(
            participants,
            exclusions,
            ImpossibleReason::ProvenInfeasible(why),
        ));
    }

    let ids: Vec<String> = participants.iter().map(|p| p.id.clone()).collect();

    for attempt in 1..=max_attempts {
        let candidate = Assignment::from_columns(&ids, shuffle_ids(&ids, rng));
        if is_valid_assignment(&candidate, exclusions) {
            tracing::debug!(
                "Found valid assignment for {} participants after {} attempt(s)",
                ids.len(),
                attempt
            );
            return Ok(DrawOutcome {
                assignment: candidate,
                attempts: attempt,
            });
        }
        tracing::trace!("Attempt {} rejected", attempt);
    }

    tracing::debug!("Attempt budget of {} exhausted", max_attempts);
    Err(DrawError::impossible(
        participants,
        exclusions,
        ImpossibleReason::AttemptBudgetExhausted {
            attempts: max_attempts,
        },
    ))
}

/// Input checks every draw runs before sampling. Exposed so callers running
/// many draws over the same input can reject it once up front.
pub fn validate_draw_input(
    participants: &[Participant],
    exclusions: &[ExclusionPair],
    max_attempts: usize,
) -> Result<(), InvalidInput> {
    if participants.len() < 2 {
        return Err(InvalidInput::TooFewParticipants {
            count: participants.len(),
        });
    }

    if max_attempts == 0 {
        return Err(InvalidInput::ZeroAttemptBudget);
    }

    let mut known: HashSet<&str> = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !known.insert(participant.id.as_str()) {
            return Err(InvalidInput::DuplicateParticipant {
                id: participant.id.clone(),
            });
        }
    }

    for pair in exclusions {
        for id in [&pair.first, &pair.second] {
            if !known.contains(id.as_str()) {
                return Err(InvalidInput::UnknownExclusionId {
                    pair: pair.clone(),
                    id: id.clone(),
                });
            }
        }
    }

    Ok(())
}
