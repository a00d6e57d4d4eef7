//! Name resolution - mapping raw name keys back to a play's canonical names.

use play_model::{Roster, AGGREGATE_MARKER};
use std::collections::HashMap;

use super::{NameKey, RelationCounts, RelationKey, RelationPair};

/// Canonical-name lookup for one play's roster.
///
/// Read-only after construction, so it can be shared by the aggregator and
/// every snapshot capture of the same play.
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    canonical: HashMap<NameKey, String>,
}

impl NameResolver {
    /// Build the resolver from roster names.
    ///
    /// When two names normalize to the same key the later one wins.
    pub fn build<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut canonical = HashMap::new();

        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() || name == AGGREGATE_MARKER {
                continue;
            }
            if let Some(previous) = canonical.insert(NameKey::new(name), name.to_string()) {
                tracing::debug!(
                    replaced = %previous,
                    by = %name,
                    "Roster names collide after normalization"
                );
            }
        }

        Self { canonical }
    }

    /// Build the resolver for a play roster.
    pub fn from_roster(roster: &Roster) -> Self {
        Self::build(roster.iter())
    }

    /// Canonical spelling for a key, if it belongs to the roster.
    pub fn resolve(&self, key: &NameKey) -> Option<&str> {
        self.canonical.get(key).map(String::as_str)
    }

    /// Resolve both sides of a raw relation. Fails if either side is unknown.
    pub fn resolve_pair(&self, key: &RelationKey) -> Option<RelationPair> {
        let first = self.resolve(key.first())?;
        let second = self.resolve(key.second())?;
        Some(RelationPair::new(first, second))
    }

    /// Resolve a whole counter, dropping unresolvable keys.
    ///
    /// This is a pure per-key filter, so resolving two maps and summing them
    /// equals resolving their sum.
    pub fn resolve_counts(&self, raw: &RelationCounts<RelationKey>) -> RelationCounts<RelationPair> {
        raw.iter()
            .filter_map(|(key, count)| self.resolve_pair(key).map(|pair| (pair, count)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(a: &str, b: &str) -> RelationKey {
        RelationKey::new(a.into(), b.into()).unwrap()
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let resolver = NameResolver::build(["Lady Macbeth", "Banquo"]);
        assert_eq!(resolver.resolve(&"lady macbeth".into()), Some("Lady Macbeth"));
        assert_eq!(resolver.resolve(&"BANQUO".into()), Some("Banquo"));
        assert_eq!(resolver.resolve(&"Ghost".into()), None);
    }

    #[test]
    fn test_aggregate_marker_never_resolves() {
        let resolver = NameResolver::build(["All", "Hamlet"]);
        assert_eq!(resolver.len(), 1);
        assert_eq!(resolver.resolve(&"all".into()), None);
    }

    #[test]
    fn test_later_collision_wins() {
        let resolver = NameResolver::build(["MACBETH", "Macbeth"]);
        assert_eq!(resolver.len(), 1);
        assert_eq!(resolver.resolve(&"macbeth".into()), Some("Macbeth"));
    }

    #[test]
    fn test_resolve_pair_requires_both_names() {
        let resolver = NameResolver::build(["Hamlet", "Ophelia"]);

        assert_eq!(
            resolver.resolve_pair(&key("hamlet", "ophelia")),
            Some(RelationPair::new("Hamlet", "Ophelia"))
        );
        assert_eq!(resolver.resolve_pair(&key("hamlet", "ghost")), None);
    }

    #[test]
    fn test_resolve_counts_drops_unknown() {
        let resolver = NameResolver::from_roster(&Roster::from_names(["Hamlet", "Ophelia"]));
        let raw: RelationCounts<RelationKey> = [
            (key("hamlet", "ophelia"), 3),
            (key("hamlet", "ghost"), 2),
        ]
        .into_iter()
        .collect();

        let resolved = resolver.resolve_counts(&raw);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved.get(&RelationPair::new("Hamlet", "Ophelia")), 3);
    }

    #[test]
    fn test_empty_roster_resolves_nothing() {
        let resolver = NameResolver::build(Vec::<String>::new());
        let raw: RelationCounts<RelationKey> = [(key("a", "b"), 1)].into_iter().collect();

        assert!(resolver.is_empty());
        assert!(resolver.resolve_counts(&raw).is_empty());
    }

    #[test]
    fn test_resolution_distributes_over_sum() {
        let resolver = NameResolver::build(["Hamlet", "Ophelia", "Laertes"]);
        let explicit: RelationCounts<RelationKey> = [
            (key("hamlet", "ophelia"), 2),
            (key("hamlet", "yorick"), 1),
        ]
        .into_iter()
        .collect();
        let implicit: RelationCounts<RelationKey> = [
            (key("hamlet", "ophelia"), 1),
            (key("laertes", "ophelia"), 4),
            (key("ghost", "laertes"), 1),
        ]
        .into_iter()
        .collect();

        let separately = resolver
            .resolve_counts(&explicit)
            .merged(&resolver.resolve_counts(&implicit));
        let together = resolver.resolve_counts(&explicit.merged(&implicit));

        assert_eq!(separately, together);
        assert_eq!(together.get(&RelationPair::new("Hamlet", "Ophelia")), 3);
    }
}
