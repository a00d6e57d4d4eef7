//! Relation aggregation - crediting explicit and implicit relations scene by scene.

use play_model::{Line, Scene};
use std::collections::{BTreeSet, HashSet};

use super::{NameKey, NameResolver, RelationCounts, RelationKey, RelationPair};

/// Credits handed out by a single `process_scene` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneCredits {
    pub explicit: u32,
    pub implicit: u32,
}

/// Final resolved output of an aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedRelations {
    pub explicit: RelationCounts<RelationPair>,
    pub implicit: RelationCounts<RelationPair>,
    /// Point-wise sum of `explicit` and `implicit`.
    pub combined: RelationCounts<RelationPair>,
}

/// Accumulates raw explicit and implicit relation counts for one play.
///
/// Counters are keyed by raw name keys; canonical names are only applied when
/// reading (`resolved_combined`, `finalize`), so the raw counts stay valid if
/// the roster changes before then.
#[derive(Debug, Clone)]
pub struct RelationAggregator<'r> {
    resolver: &'r NameResolver,
    explicit: RelationCounts<RelationKey>,
    implicit: RelationCounts<RelationKey>,
    scenes_processed: usize,
}

impl<'r> RelationAggregator<'r> {
    /// Create an empty aggregator reading through the given resolver.
    pub fn new(resolver: &'r NameResolver) -> Self {
        Self {
            resolver,
            explicit: RelationCounts::new(),
            implicit: RelationCounts::new(),
            scenes_processed: 0,
        }
    }

    /// Credit one scene.
    ///
    /// Every mention by a speaker adds one explicit credit for that pair. Every
    /// pair of cast members not already credited explicitly in this scene gets
    /// exactly one implicit credit. Ensemble lines contribute nothing.
    pub fn process_scene(&mut self, lines: &[Line], cast: &BTreeSet<NameKey>) -> SceneCredits {
        let mut credited: HashSet<RelationKey> = HashSet::new();
        let mut credits = SceneCredits::default();

        for line in lines.iter().filter(|line| !line.is_ensemble()) {
            let speaker = NameKey::new(&line.speaker);
            for mention in &line.mentions {
                let Some(key) = RelationKey::new(speaker.clone(), NameKey::new(mention)) else {
                    continue;
                };
                credited.insert(key.clone());
                self.explicit.increment(key);
                credits.explicit += 1;
            }
        }

        let members: Vec<&NameKey> = cast.iter().filter(|name| !name.is_aggregate()).collect();
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                let Some(key) = RelationKey::new((*a).clone(), (*b).clone()) else {
                    continue;
                };
                if credited.insert(key.clone()) {
                    self.implicit.increment(key);
                    credits.implicit += 1;
                }
            }
        }

        self.scenes_processed += 1;
        credits
    }

    /// Credit a grouped scene, using its speakers as the cast.
    pub fn process(&mut self, scene: &Scene) -> SceneCredits {
        let cast: BTreeSet<NameKey> = scene.cast().into_iter().map(NameKey::new).collect();
        let credits = self.process_scene(&scene.lines, &cast);

        tracing::debug!(
            scene = %scene.key,
            cast = cast.len(),
            explicit = credits.explicit,
            implicit = credits.implicit,
            "Processed scene"
        );

        credits
    }

    /// Raw explicit counts accumulated so far.
    pub fn explicit(&self) -> &RelationCounts<RelationKey> {
        &self.explicit
    }

    /// Raw implicit counts accumulated so far.
    pub fn implicit(&self) -> &RelationCounts<RelationKey> {
        &self.implicit
    }

    pub fn scenes_processed(&self) -> usize {
        self.scenes_processed
    }

    /// Resolved combined counts for the current state. Repeatable and non-destructive.
    pub fn resolved_combined(&self) -> RelationCounts<RelationPair> {
        self.resolve().combined
    }

    /// Resolve the accumulated counters and close the aggregator.
    pub fn finalize(self) -> ResolvedRelations {
        let resolved = self.resolve();
        tracing::debug!(
            scenes = self.scenes_processed,
            relations = resolved.combined.len(),
            dropped = self
                .explicit
                .merged(&self.implicit)
                .len()
                .saturating_sub(resolved.combined.len()),
            "Finalized relations"
        );
        resolved
    }

    fn resolve(&self) -> ResolvedRelations {
        let explicit = self.resolver.resolve_counts(&self.explicit);
        let implicit = self.resolver.resolve_counts(&self.implicit);
        let combined = explicit.merged(&implicit);

        ResolvedRelations {
            explicit,
            implicit,
            combined,
        }
    }
}
