//! Keys for relation counters.

use play_model::AGGREGATE_MARKER;
use serde::{Deserialize, Serialize};

/// Lowercase form of a character name, used as the raw accumulation key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NameKey(String);

impl NameKey {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this key is the ensemble pseudo-speaker.
    pub fn is_aggregate(&self) -> bool {
        self.0 == AGGREGATE_MARKER.to_lowercase()
    }
}

impl From<&str> for NameKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for NameKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unordered pair of two distinct raw names, stored as `(min, max)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RelationKey {
    first: NameKey,
    second: NameKey,
}

impl RelationKey {
    /// Build the key for two names.
    ///
    /// Returns `None` for a self-pair or when either side is the aggregate marker.
    pub fn new(a: NameKey, b: NameKey) -> Option<Self> {
        if a == b || a.is_aggregate() || b.is_aggregate() {
            return None;
        }
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        Some(Self { first, second })
    }

    pub fn first(&self) -> &NameKey {
        &self.first
    }

    pub fn second(&self) -> &NameKey {
        &self.second
    }
}

impl std::fmt::Display for RelationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// A resolved relation between two canonical character names.
///
/// `first` is always the lexicographically smaller name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationPair {
    pub first: String,
    pub second: String,
}

impl RelationPair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Whether the named character takes part in this relation.
    pub fn involves(&self, name: &str) -> bool {
        self.first == name || self.second == name
    }
}

impl std::fmt::Display for RelationPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_key_normalizes_case() {
        assert_eq!(NameKey::new("Lady Macbeth"), NameKey::new("LADY MACBETH "));
        assert_eq!(NameKey::new("Hamlet").as_str(), "hamlet");
    }

    #[test]
    fn test_relation_key_is_unordered() {
        let ab = RelationKey::new("Hamlet".into(), "Ophelia".into()).unwrap();
        let ba = RelationKey::new("Ophelia".into(), "Hamlet".into()).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.first().as_str(), "hamlet");
        assert_eq!(ab.second().as_str(), "ophelia");
    }

    #[test]
    fn test_relation_key_rejects_self_pair() {
        assert!(RelationKey::new("Hamlet".into(), "hamlet".into()).is_none());
    }

    #[test]
    fn test_relation_key_rejects_aggregate_marker() {
        assert!(RelationKey::new("All".into(), "Hamlet".into()).is_none());
        assert!(RelationKey::new("Hamlet".into(), "all".into()).is_none());
    }

    #[test]
    fn test_relation_pair_orders_names() {
        let pair = RelationPair::new("Ophelia", "Laertes");
        assert_eq!(pair.first, "Laertes");
        assert_eq!(pair.second, "Ophelia");
        assert!(pair.involves("Ophelia"));
        assert!(!pair.involves("Hamlet"));
        assert_eq!(pair.to_string(), "(Laertes, Ophelia)");
    }
}
