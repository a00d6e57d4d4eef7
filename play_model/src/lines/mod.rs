//! Annotated lines and their grouping into scenes.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::script::{SceneKey, AGGREGATE_MARKER};

/// A spoken line after mention extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub act: u32,
    pub scene: u32,
    pub speaker: String,
    /// Person-like names mentioned in the line's text.
    pub mentions: BTreeSet<String>,
}

impl Line {
    pub fn new(act: u32, scene: u32, speaker: impl Into<String>) -> Self {
        Self {
            act,
            scene,
            speaker: speaker.into(),
            mentions: BTreeSet::new(),
        }
    }

    /// Add a mentioned name.
    pub fn with_mention(mut self, name: impl Into<String>) -> Self {
        self.mentions.insert(name.into());
        self
    }

    /// Add multiple mentioned names.
    pub fn with_mentions(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.mentions.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn scene_key(&self) -> SceneKey {
        SceneKey::new(self.act, self.scene)
    }

    /// Whether the speaker is the ensemble pseudo-speaker.
    pub fn is_ensemble(&self) -> bool {
        self.speaker == AGGREGATE_MARKER
    }
}

/// All lines of a single scene, in script order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub key: SceneKey,
    pub lines: Vec<Line>,
}

impl Scene {
    pub fn new(key: SceneKey) -> Self {
        Self {
            key,
            lines: Vec::new(),
        }
    }

    /// Distinct speakers of the scene, excluding the aggregate marker.
    pub fn cast(&self) -> BTreeSet<&str> {
        self.lines
            .iter()
            .filter(|line| !line.is_ensemble())
            .map(|line| line.speaker.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Group lines by scene, returning scenes in play order.
///
/// Lines keep their relative order inside each scene.
pub fn group_scenes(lines: impl IntoIterator<Item = Line>) -> Vec<Scene> {
    let mut scenes: BTreeMap<SceneKey, Scene> = BTreeMap::new();

    for line in lines {
        let key = line.scene_key();
        scenes
            .entry(key)
            .or_insert_with(|| Scene::new(key))
            .lines
            .push(line);
    }

    scenes.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_scenes_orders_by_act_then_scene() {
        let lines = vec![
            Line::new(2, 1, "Macbeth"),
            Line::new(1, 2, "Banquo"),
            Line::new(1, 1, "Witch"),
            Line::new(1, 2, "Macbeth"),
        ];

        let scenes = group_scenes(lines);
        let keys: Vec<_> = scenes.iter().map(|s| s.key).collect();
        assert_eq!(
            keys,
            vec![SceneKey::new(1, 1), SceneKey::new(1, 2), SceneKey::new(2, 1)]
        );

        // Order within a scene is preserved
        assert_eq!(scenes[1].lines[0].speaker, "Banquo");
        assert_eq!(scenes[1].lines[1].speaker, "Macbeth");
    }

    #[test]
    fn test_cast_excludes_ensemble() {
        let mut scene = Scene::new(SceneKey::new(1, 1));
        scene.lines.push(Line::new(1, 1, "Hamlet"));
        scene.lines.push(Line::new(1, 1, AGGREGATE_MARKER));
        scene.lines.push(Line::new(1, 1, "Hamlet"));
        scene.lines.push(Line::new(1, 1, "Horatio"));

        let cast: Vec<_> = scene.cast().into_iter().collect();
        assert_eq!(cast, vec!["Hamlet", "Horatio"]);
    }

    #[test]
    fn test_group_scenes_empty() {
        assert!(group_scenes(Vec::new()).is_empty());
    }

    #[test]
    fn test_line_builder() {
        let line = Line::new(1, 1, "Hamlet")
            .with_mention("Ophelia")
            .with_mentions(["Horatio", "Ophelia"]);
        assert_eq!(line.mentions.len(), 2);
        assert!(!line.is_ensemble());
    }
}
