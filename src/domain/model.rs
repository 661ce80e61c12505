use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Unordered pair of ids that may never face each other, in either direction.
///
/// Serialized as a two-element array so draw files can write
/// `exclusions = [["alice", "bob"]]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct ExclusionPair {
    pub first: String,
    pub second: String,
}

impl ExclusionPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// True when `giver → receiver` is forbidden by this pair.
    pub fn forbids(&self, giver: &str, receiver: &str) -> bool {
        (self.first == giver && self.second == receiver)
            || (self.first == receiver && self.second == giver)
    }

    /// A pair naming the same id twice excludes nothing a derangement
    /// would produce anyway.
    pub fn is_degenerate(&self) -> bool {
        self.first == self.second
    }

    /// Ids in a stable order, so `(a, b)` and `(b, a)` share a key.
    pub fn normalized(&self) -> (&str, &str) {
        if self.first <= self.second {
            (&self.first, &self.second)
        } else {
            (&self.second, &self.first)
        }
    }
}

impl PartialEq for ExclusionPair {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for ExclusionPair {}

impl From<(String, String)> for ExclusionPair {
    fn from((first, second): (String, String)) -> Self {
        Self { first, second }
    }
}

impl From<ExclusionPair> for (String, String) {
    fn from(pair: ExclusionPair) -> Self {
        (pair.first, pair.second)
    }
}

impl From<(&str, &str)> for ExclusionPair {
    fn from((first, second): (&str, &str)) -> Self {
        Self::new(first, second)
    }
}

impl fmt::Display for ExclusionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.first, self.second)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub giver: String,
    pub receiver: String,
}

/// Giver → receiver mapping produced by a draw.
///
/// Pairings are kept in participant input order. A successful draw always
/// yields a derangement over the full id set that avoids every exclusion
/// pair in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pairs: Vec<Pairing>,
}

impl Assignment {
    /// Zips giver ids against receiver ids position by position.
    pub fn from_columns(givers: &[String], receivers: Vec<String>) -> Self {
        let pairs = givers
            .iter()
            .cloned()
            .zip(receivers)
            .map(|(giver, receiver)| Pairing { giver, receiver })
            .collect();
        Self { pairs }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|p| (p.giver.as_str(), p.receiver.as_str()))
    }

    pub fn receiver_of(&self, giver: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.giver == giver)
            .map(|p| p.receiver.as_str())
    }

    pub fn giver_of(&self, receiver: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.receiver == receiver)
            .map(|p| p.giver.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        self.pairs
            .iter()
            .map(|p| (p.giver.clone(), p.receiver.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusion_pair_is_symmetric() {
        let pair = ExclusionPair::new("a", "b");
        assert!(pair.forbids("a", "b"));
        assert!(pair.forbids("b", "a"));
        assert!(!pair.forbids("a", "c"));
        assert_eq!(pair, ExclusionPair::new("b", "a"));
    }

    #[test]
    fn test_participant_email_is_omitted_when_absent() {
        let plain = serde_json::to_value(Participant::new("a", "Ann")).unwrap();
        assert!(plain.get("email").is_none());

        let with_email = Participant::new("a", "Ann").with_email("ann@example.com");
        assert_eq!(with_email.email.as_deref(), Some("ann@example.com"));
    }

    #[test]
    fn test_exclusion_pair_deserializes_from_array() {
        let pair: ExclusionPair = serde_json::from_str(r#"["x", "y"]"#).unwrap();
        assert_eq!(pair.first, "x");
        assert_eq!(pair.second, "y");
        assert_eq!(serde_json::to_string(&pair).unwrap(), r#"["x","y"]"#);
    }

    #[test]
    fn test_assignment_lookups() {
        let givers = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let assignment = Assignment::from_columns(
            &givers,
            vec!["b".to_string(), "c".to_string(), "a".to_string()],
        );

        assert_eq!(assignment.len(), 3);
        assert_eq!(assignment.receiver_of("a"), Some("b"));
        assert_eq!(assignment.giver_of("a"), Some("c"));
        assert_eq!(assignment.receiver_of("z"), None);
        assert_eq!(assignment.to_map().get("c").map(String::as_str), Some("a"));
    }
}
