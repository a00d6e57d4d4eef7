//! Character rosters.

use serde::{Deserialize, Serialize};

/// Pseudo-speaker for ensemble lines. Never an individual character.
pub const AGGREGATE_MARKER: &str = "All";

/// The canonical character names of one play, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from names, dropping duplicates, blanks and the aggregate marker.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Self::new();
        for name in names {
            roster.insert(name.as_ref());
        }
        roster
    }

    /// Add a name. Returns false if it was ignored.
    pub fn insert(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || name == AGGREGATE_MARKER || self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// Check whether a canonical name is on the roster (exact spelling).
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_keeps_first_appearance_order() {
        let roster = Roster::from_names(["Ophelia", "Hamlet", "Ophelia", "Laertes"]);
        let names: Vec<_> = roster.iter().collect();
        assert_eq!(names, vec!["Ophelia", "Hamlet", "Laertes"]);
    }

    #[test]
    fn test_roster_ignores_marker_and_blanks() {
        let mut roster = Roster::new();
        assert!(!roster.insert(AGGREGATE_MARKER));
        assert!(!roster.insert("   "));
        assert!(roster.insert("Horatio"));
        assert!(!roster.insert("Horatio"));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_empty_roster() {
        let roster = Roster::from_names(Vec::<String>::new());
        assert!(roster.is_empty());
    }
}
