//! Play scripts - the raw rows of a play before any mention extraction.

mod roster;

pub use roster::*;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use uuid::Uuid;

use crate::error::ScriptError;

/// Unique identifier for a loaded play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayId(pub Uuid);

impl PlayId {
    /// Create a new random play ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a scene in play order.
///
/// Ordering is act ascending, then scene ascending. This order is the backbone
/// of the temporal snapshot sequence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(deny_unknown_fields)]
pub struct SceneKey {
    pub act: u32,
    pub scene: u32,
}

impl SceneKey {
    pub fn new(act: u32, scene: u32) -> Self {
        Self { act, scene }
    }
}

impl std::fmt::Display for SceneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.act, self.scene)
    }
}

/// One row of a play: who speaks, where, and what they say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    pub act: u32,
    pub scene: u32,
    pub character: String,
    pub text: String,
}

impl ScriptLine {
    pub fn new(
        act: u32,
        scene: u32,
        character: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            act,
            scene,
            character: character.into(),
            text: text.into(),
        }
    }

    pub fn scene_key(&self) -> SceneKey {
        SceneKey::new(self.act, self.scene)
    }
}

/// A complete play as loaded from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayScript {
    pub id: PlayId,
    pub title: String,
    pub lines: Vec<ScriptLine>,
}

impl PlayScript {
    /// Create a play from already parsed lines.
    pub fn new(title: impl Into<String>, lines: Vec<ScriptLine>) -> Result<Self, ScriptError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ScriptError::EmptyTitle);
        }
        // Titles become export file names.
        if title.contains(['/', '\\']) || title == "." || title == ".." {
            return Err(ScriptError::InvalidTitle(title));
        }

        Ok(Self {
            id: PlayId::new(),
            title,
            lines,
        })
    }

    /// Parse a JSON array of script lines.
    pub fn from_json_str(title: impl Into<String>, json: &str) -> Result<Self, ScriptError> {
        let lines: Vec<ScriptLine> = serde_json::from_str(json)?;
        Self::new(title, lines)
    }

    /// Load a play from a JSON file. The title is the file stem.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let script = Self::from_json_str(title, &json)?;
        tracing::debug!(
            play = %script.title,
            lines = script.lines.len(),
            "Loaded play script"
        );
        Ok(script)
    }

    /// The play's character roster: every distinct speaker except the aggregate marker.
    pub fn roster(&self) -> Roster {
        Roster::from_names(self.lines.iter().map(|line| line.character.as_str()))
    }

    /// How many lines each roster character speaks, most talkative first.
    ///
    /// Ties keep roster (first appearance) order. Ensemble lines are not counted.
    pub fn speaker_line_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> =
            self.roster().iter().map(|name| (name.to_string(), 0)).collect();
        let index: HashMap<String, usize> = counts
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();

        for line in &self.lines {
            if let Some(&i) = index.get(line.character.trim()) {
                counts[i].1 += 1;
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// All scenes present in the script, in play order.
    pub fn scene_keys(&self) -> Vec<SceneKey> {
        self.lines
            .iter()
            .map(ScriptLine::scene_key)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_scene_key_ordering() {
        let mut keys = vec![
            SceneKey::new(2, 1),
            SceneKey::new(1, 3),
            SceneKey::new(1, 1),
            SceneKey::new(3, 0),
        ];
        keys.sort();

        assert_eq!(
            keys,
            vec![
                SceneKey::new(1, 1),
                SceneKey::new(1, 3),
                SceneKey::new(2, 1),
                SceneKey::new(3, 0),
            ]
        );
    }

    #[test]
    fn test_scene_key_display() {
        assert_eq!(SceneKey::new(4, 2).to_string(), "(4, 2)");
    }

    #[test]
    fn test_scene_key_rejects_unknown_fields() {
        let parsed: Result<SceneKey, _> = serde_json::from_str(r#"{"act":1,"scene":2,"x":0}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_empty_title_rejected() {
        let result = PlayScript::new("  ", vec![]);
        assert!(matches!(result, Err(ScriptError::EmptyTitle)));
    }

    #[test]
    fn test_path_like_title_rejected() {
        for title in ["Lost/Pages", "..\\Hamlet", ".."] {
            let result = PlayScript::new(title, vec![]);
            assert!(matches!(result, Err(ScriptError::InvalidTitle(_))), "{title}");
        }
        assert!(PlayScript::new("Much Ado About Nothing", vec![]).is_ok());
    }

    #[test]
    fn test_speaker_line_counts() {
        let script = PlayScript::new(
            "Macbeth",
            vec![
                ScriptLine::new(1, 1, "Banquo", "Good sir."),
                ScriptLine::new(1, 1, "Macbeth", "So foul and fair a day."),
                ScriptLine::new(1, 1, "All", "Hail!"),
                ScriptLine::new(1, 1, "All", "Hail!"),
                ScriptLine::new(1, 2, "Macbeth", "Speak."),
                ScriptLine::new(1, 2, "Macbeth ", "Stay, you imperfect speakers."),
                ScriptLine::new(1, 2, "Ross", "The king hath happily received."),
            ],
        )
        .unwrap();

        assert_eq!(
            script.speaker_line_counts(),
            vec![
                ("Macbeth".to_string(), 3),
                ("Banquo".to_string(), 1),
                ("Ross".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {"act": 1, "scene": 1, "character": "Hamlet", "text": "Ophelia!"},
            {"act": 1, "scene": 2, "character": "All", "text": "Long live the king."}
        ]"#;

        let script = PlayScript::from_json_str("Hamlet", json).unwrap();
        assert_eq!(script.title, "Hamlet");
        assert_eq!(script.lines.len(), 2);
        assert_eq!(script.lines[0].character, "Hamlet");
        assert_eq!(
            script.scene_keys(),
            vec![SceneKey::new(1, 1), SceneKey::new(1, 2)]
        );
    }

    #[test]
    fn test_from_json_str_malformed() {
        let json = r#"[{"act": "one", "scene": 1, "character": "Hamlet", "text": ""}]"#;
        let result = PlayScript::from_json_str("Hamlet", json);
        assert!(matches!(result, Err(ScriptError::Json(_))));
    }

    #[test]
    fn test_roster_excludes_aggregate_marker() {
        let script = PlayScript::new(
            "Macbeth",
            vec![
                ScriptLine::new(1, 1, "Macbeth", "So foul and fair a day."),
                ScriptLine::new(1, 1, "All", "Hail!"),
                ScriptLine::new(1, 1, "Banquo", "Good sir."),
                ScriptLine::new(1, 2, "Macbeth", "Speak."),
            ],
        )
        .unwrap();

        let roster = script.roster();
        assert_eq!(roster.len(), 2);
        assert!(roster.contains("Macbeth"));
        assert!(roster.contains("Banquo"));
        assert!(!roster.contains(AGGREGATE_MARKER));
    }

    #[test]
    fn test_load_json_uses_file_stem_as_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Twelfth Night.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"[{{"act": 1, "scene": 1, "character": "Viola", "text": "What country, friends, is this?"}}]"#
        )
        .unwrap();

        let script = PlayScript::load_json(&path).unwrap();
        assert_eq!(script.title, "Twelfth Night");
        assert_eq!(script.lines.len(), 1);
    }

    #[test]
    fn test_load_json_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PlayScript::load_json(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ScriptError::Io { .. })));
    }
}
