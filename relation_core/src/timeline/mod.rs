//! Timeline module - cumulative relation snapshots taken after every scene.
//!
//! The recorder observes an aggregator between scenes and keeps an immutable,
//! ordered history of the resolved combined counts. The last entry always
//! matches the aggregator's final output.

mod persist;

pub use persist::*;

use play_model::SceneKey;

use crate::error::TimelineError;
use crate::relations::{RelationAggregator, RelationCounts, RelationPair};

/// Ordered `(SceneKey, counts)` history of one play, in increasing scene order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemporalSnapshot {
    entries: Vec<(SceneKey, RelationCounts<RelationPair>)>,
}

impl TemporalSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Scene keys must be strictly increasing.
    pub(crate) fn push(
        &mut self,
        scene: SceneKey,
        counts: RelationCounts<RelationPair>,
    ) -> Result<(), TimelineError> {
        if let Some(last) = self.last_scene() {
            if scene <= last {
                return Err(TimelineError::OutOfOrder {
                    previous: last,
                    scene,
                });
            }
        }
        self.entries.push((scene, counts));
        Ok(())
    }

    /// The counts captured after a given scene.
    pub fn get(&self, scene: SceneKey) -> Option<&RelationCounts<RelationPair>> {
        self.entries
            .binary_search_by(|(key, _)| key.cmp(&scene))
            .ok()
            .map(|index| &self.entries[index].1)
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<(SceneKey, &RelationCounts<RelationPair>)> {
        self.entries.last().map(|(scene, counts)| (*scene, counts))
    }

    pub fn last_scene(&self) -> Option<SceneKey> {
        self.entries.last().map(|(scene, _)| *scene)
    }

    /// Whether every key's count never decreases from one entry to the next.
    pub fn is_monotonic(&self) -> bool {
        self.entries
            .windows(2)
            .all(|pair| pair[1].1.dominates(&pair[0].1))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SceneKey, &RelationCounts<RelationPair>)> {
        self.entries.iter().map(|(scene, counts)| (*scene, counts))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Captures the aggregator's resolved state after each scene.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRecorder {
    timeline: TemporalSnapshot,
}

impl SnapshotRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the aggregator's current resolved combined counts under `scene`.
    ///
    /// Must be called once per scene, right after that scene was processed.
    /// A scene key not greater than the last recorded one is rejected and the
    /// history is left unchanged.
    pub fn capture_after_scene(
        &mut self,
        scene: SceneKey,
        aggregator: &RelationAggregator<'_>,
    ) -> Result<(), TimelineError> {
        let counts = aggregator.resolved_combined();
        tracing::debug!(scene = %scene, relations = counts.len(), "Captured snapshot");
        self.timeline.push(scene, counts)
    }

    pub fn timeline(&self) -> &TemporalSnapshot {
        &self.timeline
    }

    pub fn into_timeline(self) -> TemporalSnapshot {
        self.timeline
    }
}
