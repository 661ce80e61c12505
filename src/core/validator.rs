use crate::domain::model::{Assignment, ExclusionPair};
use std::collections::HashMap;

/// Checks a candidate assignment against the draw rules.
///
/// Rejects any participant mapped to themselves and any exclusion pair used
/// in either direction. Runs in O(N + E).
pub fn is_valid_assignment(candidate: &Assignment, exclusions: &[ExclusionPair]) -> bool {
    let mut lookup: HashMap<&str, &str> = HashMap::with_capacity(candidate.len());

    for (giver, receiver) in candidate.iter() {
        if giver == receiver {
            return false;
        }
        lookup.insert(giver, receiver);
    }

    !exclusions.iter().any(|pair| {
        lookup.get(pair.first.as_str()) == Some(&pair.second.as_str())
            || lookup.get(pair.second.as_str()) == Some(&pair.first.as_str())
    })
}
