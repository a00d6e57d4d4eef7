//! JSON persistence for temporal snapshots.
//!
//! Scenes and relation pairs are written as structured records rather than
//! stringified tuples, so reading a file back never re-parses key strings.

use play_model::{SceneKey, AGGREGATE_MARKER};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::{Read, Write};

use super::TemporalSnapshot;
use crate::error::TimelineError;
use crate::relations::{RelationCounts, RelationPair};

/// File name for a play's snapshot export.
pub fn snapshot_file_name(play_title: &str) -> String {
    format!("{play_title} Temporal-Snapshot.json")
}

/// On-disk form of a play's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotDocument {
    pub play: String,
    pub snapshots: Vec<SceneSnapshotRecord>,
}

/// Counts captured after one scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneSnapshotRecord {
    pub scene: SceneKey,
    pub relations: Vec<RelationCountRecord>,
}

/// One relation and its count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationCountRecord {
    pub first: String,
    pub second: String,
    pub count: u32,
}

impl SnapshotDocument {
    /// Build the document for a timeline.
    pub fn from_timeline(play: impl Into<String>, timeline: &TemporalSnapshot) -> Self {
        let snapshots = timeline
            .iter()
            .map(|(scene, counts)| SceneSnapshotRecord {
                scene,
                relations: counts
                    .iter()
                    .map(|(pair, count)| RelationCountRecord {
                        first: pair.first.clone(),
                        second: pair.second.clone(),
                        count,
                    })
                    .collect(),
            })
            .collect();

        Self {
            play: play.into(),
            snapshots,
        }
    }

    /// Rebuild the timeline, validating scene order and relation pairs.
    pub fn into_timeline(self) -> Result<TemporalSnapshot, TimelineError> {
        let mut timeline = TemporalSnapshot::new();

        for record in self.snapshots {
            let counts = relation_counts(record.scene, record.relations)?;
            timeline.push(record.scene, counts)?;
        }

        Ok(timeline)
    }
}

fn relation_counts(
    scene: SceneKey,
    records: Vec<RelationCountRecord>,
) -> Result<RelationCounts<RelationPair>, TimelineError> {
    let mut seen = HashSet::new();
    let mut counts = RelationCounts::new();

    for record in records {
        let malformed = |reason: &str| {
            TimelineError::Malformed(format!(
                "{reason} ({}, {}) in scene {scene}",
                record.first, record.second
            ))
        };
        for name in [&record.first, &record.second] {
            if name.trim().is_empty() {
                return Err(malformed("blank name in relation"));
            }
            if name == AGGREGATE_MARKER {
                return Err(malformed("aggregate marker in relation"));
            }
        }
        if record.first == record.second {
            return Err(malformed("self relation"));
        }
        if record.first > record.second {
            return Err(malformed("relation names out of order"));
        }
        if record.count == 0 {
            return Err(malformed("zero count for relation"));
        }

        let pair = RelationPair::new(record.first, record.second);
        if !seen.insert(pair.clone()) {
            return Err(TimelineError::Malformed(format!(
                "duplicate relation {} in scene {}",
                pair, scene
            )));
        }
        counts.add(pair, record.count);
    }

    Ok(counts)
}

/// Write a timeline as pretty-printed JSON.
pub fn write_snapshot_json<W: Write>(
    writer: W,
    play: &str,
    timeline: &TemporalSnapshot,
) -> Result<(), TimelineError> {
    let document = SnapshotDocument::from_timeline(play, timeline);
    serde_json::to_writer_pretty(writer, &document)?;
    Ok(())
}

/// Read a timeline written by [`write_snapshot_json`]. Returns the play title and timeline.
pub fn read_snapshot_json<R: Read>(reader: R) -> Result<(String, TemporalSnapshot), TimelineError> {
    let document: SnapshotDocument = serde_json::from_reader(reader)?;
    let play = document.play.clone();
    Ok((play, document.into_timeline()?))
}
