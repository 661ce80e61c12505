//! Cheap, conservative infeasibility check run before any sampling.
//!
//! The check has no false positives: anything reported as
//! [`Feasibility::ProvablyInfeasible`] truly has no valid assignment. It
//! does have false negatives. Some exclusion sets pass here and are still
//! unsatisfiable, e.g. three people in a group of four who all exclude
//! each other and would all have to give to the fourth. Those draws
//! surface as an exhausted attempt budget instead, which is why the two
//! failures are kept apart.

use crate::domain::model::ExclusionPair;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Infeasibility {
    /// Two participants whose only possible pairing is excluded.
    ExcludedPair { pair: ExclusionPair },
    /// A participant excluded from every other participant.
    TooManyExclusions {
        id: String,
        excluded_partners: usize,
        participant_count: usize,
    },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::ExcludedPair { pair } => {
                write!(f, "the only possible pairing {} is excluded", pair)
            }
            Infeasibility::TooManyExclusions {
                id,
                excluded_partners,
                participant_count,
            } => write!(
                f,
                "'{}' is excluded from {} of the {} other participants",
                id,
                excluded_partners,
                participant_count.saturating_sub(1)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feasibility {
    PossiblyFeasible,
    ProvablyInfeasible(Infeasibility),
}

impl Feasibility {
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Feasibility::ProvablyInfeasible(_))
    }
}

pub fn check_feasibility(participant_count: usize, exclusions: &[ExclusionPair]) -> Feasibility {
    if participant_count == 2 {
        return match exclusions.iter().find(|pair| !pair.is_degenerate()) {
            Some(pair) => Feasibility::ProvablyInfeasible(Infeasibility::ExcludedPair {
                pair: pair.clone(),
            }),
            None => Feasibility::PossiblyFeasible,
        };
    }

    // 只計算不同的對象：重複或反向的排除只算一次，自我排除忽略
    let mut partners: HashMap<&str, HashSet<&str>> = HashMap::new();
    for pair in exclusions.iter().filter(|pair| !pair.is_degenerate()) {
        partners.entry(pair.first.as_str()).or_default().insert(pair.second.as_str());
        partners.entry(pair.second.as_str()).or_default().insert(pair.first.as_str());
    }

    let threshold = participant_count.saturating_sub(1);
    let worst = partners
        .iter()
        .filter(|(_, excluded)| excluded.len() >= threshold)
        .min_by_key(|(id, _)| *id);

    match worst {
        Some((id, excluded)) => Feasibility::ProvablyInfeasible(Infeasibility::TooManyExclusions {
            id: id.to_string(),
            excluded_partners: excluded.len(),
            participant_count,
        }),
        None => Feasibility::PossiblyFeasible,
    }
}
