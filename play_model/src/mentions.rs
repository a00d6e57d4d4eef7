//! Mention extraction - turning spoken text into the names it refers to.
//!
//! Entity recognition proper lives outside this workspace; [`MentionExtractor`]
//! is the seam it plugs into. [`RosterGazetteer`] is the built-in extractor: a
//! name matcher built from a single play's roster and thrown away with it, so
//! names never leak from one play into another.

use crate::lines::Line;
use crate::script::{PlayScript, Roster, AGGREGATE_MARKER};

/// Extracts the person-like names mentioned in a piece of dialogue.
pub trait MentionExtractor {
    fn extract_mentions(&self, text: &str) -> Vec<String>;
}

impl<F> MentionExtractor for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn extract_mentions(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Matches roster names in text as whole token sequences.
#[derive(Debug, Clone, Default)]
pub struct RosterGazetteer {
    /// (tokens, canonical name), longest first.
    patterns: Vec<(Vec<String>, String)>,
}

impl RosterGazetteer {
    /// Build the matcher for one play's roster.
    pub fn new(roster: &Roster) -> Self {
        let mut patterns: Vec<(Vec<String>, String)> = roster
            .iter()
            .filter(|name| *name != AGGREGATE_MARKER)
            .map(|name| (tokenize(name), name.to_string()))
            .filter(|(tokens, _)| !tokens.is_empty())
            .collect();

        // Prefer "Lady Macbeth" over "Macbeth"
        patterns.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self { patterns }
    }

    /// Number of names this gazetteer recognizes.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

impl MentionExtractor for RosterGazetteer {
    fn extract_mentions(&self, text: &str) -> Vec<String> {
        let tokens = tokenize(text);
        let mut mentions = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let matched = self.patterns.iter().find(|(pattern, _)| {
                tokens.len() - i >= pattern.len()
                    && tokens[i..i + pattern.len()] == pattern[..]
            });

            match matched {
                Some((pattern, name)) => {
                    mentions.push(name.clone());
                    i += pattern.len();
                }
                None => i += 1,
            }
        }

        mentions
    }
}

/// Split text into words with surrounding punctuation and possessive suffixes removed.
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            let word = word.trim_matches(|c: char| c.is_ascii_punctuation() || c == '’');
            let word = word
                .strip_suffix("'s")
                .or_else(|| word.strip_suffix("’s"))
                .unwrap_or(word);
            word.to_string()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

/// Run mention extraction over every line of a script.
pub fn annotate(script: &PlayScript, extractor: &dyn MentionExtractor) -> Vec<Line> {
    let lines: Vec<Line> = script
        .lines
        .iter()
        .map(|row| {
            Line::new(row.act, row.scene, row.character.clone())
                .with_mentions(extractor.extract_mentions(&row.text))
        })
        .collect();

    tracing::debug!(
        play = %script.title,
        mentions = lines.iter().map(|l| l.mentions.len()).sum::<usize>(),
        "Extracted mentions"
    );

    lines
}
