//! Suggestion for a spelling correction.
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::cmp::Ordering;
use std::cmp::Ordering::Equal;

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Suggestion for a spelling correction
pub struct Suggestion {
    /// the suggested word-form or phrase
    pub value: SmolStr,
    /// edit distance between the input and the suggestion
    pub distance: usize,
    /// frequency count of the suggestion, or a blended probability for phrases
    pub frequency: f64,
}

impl Suggestion {
    /// creates a spelling correction suggestion
    pub fn new(value: impl Into<SmolStr>, distance: usize, frequency: f64) -> Suggestion {
        Suggestion {
            value: value.into(),
            distance,
            frequency,
        }
    }

    /// gets the suggested word-form
    pub fn value(&self) -> &str {
        &self.value
    }

    /// gets the edit distance from the input
    pub fn distance(&self) -> usize {
        self.distance
    }

    /// gets the frequency weight of the suggestion
    pub fn frequency(&self) -> f64 {
        self.frequency
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ascending by distance, then descending by frequency. Remaining ties are
/// broken by the suggested value so that sorting is deterministic.
impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        let x = self
            .distance
            .cmp(&other.distance)
            .then_with(|| other.frequency.partial_cmp(&self.frequency).unwrap_or(Equal));

        if let Equal = x {
            return self.value.cmp(&other.value);
        }

        x
    }
}

impl PartialEq for Suggestion {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.distance == other.distance
            && self.frequency == other.frequency
    }
}

impl Eq for Suggestion {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order() {
        let mut suggestions = vec![
            Suggestion::new("summarize", 2, 500.0),
            Suggestion::new("sumatra", 2, 900.0),
            Suggestion::new("summarized", 1, 10.0),
            Suggestion::new("summarizes", 1, 300.0),
        ];
        suggestions.sort();

        let values: Vec<&str> = suggestions.iter().map(|s| s.value()).collect();
        assert_eq!(values, vec!["summarizes", "summarized", "sumatra", "summarize"]);
    }

    #[test]
    fn equality_needs_all_fields() {
        let a = Suggestion::new("in", 1, 8.46e9);
        assert_eq!(a, Suggestion::new("in", 1, 8.46e9));
        assert_ne!(a, Suggestion::new("in", 0, 8.46e9));
        assert_ne!(a, Suggestion::new("in", 1, 1.0));
        assert_ne!(a, Suggestion::new("on", 1, 8.46e9));
    }

    #[test]
    fn serializes() {
        let json = serde_json::to_string(&Suggestion::new("where is", 1, 2.5)).unwrap();
        assert_eq!(json, r#"{"value":"where is","distance":1,"frequency":2.5}"#);
    }
}
