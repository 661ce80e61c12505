use crate::domain::model::{Assignment, Participant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPair {
    pub giver_id: String,
    pub giver_name: String,
    pub receiver_id: String,
    pub receiver_name: String,
}

/// Caller-facing summary of a finished draw, ready to print or hand off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawReport {
    pub name: String,
    pub drawn_at: DateTime<Utc>,
    pub attempts: usize,
    pub pairs: Vec<ReportPair>,
}

impl DrawReport {
    pub fn new(
        name: impl Into<String>,
        participants: &[Participant],
        assignment: &Assignment,
        attempts: usize,
    ) -> Self {
        let names: HashMap<&str, &str> = participants
            .iter()
            .map(|p| (p.id.as_str(), p.name.as_str()))
            .collect();
        let name_of = |id: &str| names.get(id).copied().unwrap_or(id).to_string();

        let pairs = assignment
            .iter()
            .map(|(giver, receiver)| ReportPair {
                giver_id: giver.to_string(),
                giver_name: name_of(giver),
                receiver_id: receiver.to_string(),
                receiver_name: name_of(receiver),
            })
            .collect();

        Self {
            name: name.into(),
            drawn_at: Utc::now(),
            attempts,
            pairs,
        }
    }

    pub fn to_text(&self) -> String {
        let mut lines = vec![format!("🎁 {} ({} pairs)", self.name, self.pairs.len())];
        for pair in &self.pairs {
            lines.push(format!("{} → {}", pair.giver_name, pair.receiver_name));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_resolves_names() {
        let participants = vec![Participant::new("a", "Alice"), Participant::new("b", "Bob")];
        let givers = vec!["a".to_string(), "b".to_string()];
        let assignment = Assignment::from_columns(&givers, vec!["b".to_string(), "a".to_string()]);

        let report = DrawReport::new("Test", &participants, &assignment, 1);

        assert_eq!(report.pairs.len(), 2);
        assert_eq!(report.pairs[0].giver_name, "Alice");
        assert_eq!(report.pairs[0].receiver_name, "Bob");
        assert!(report.to_text().contains("Bob → Alice"));
    }
}
