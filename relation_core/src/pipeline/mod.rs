//! Pipeline - runs plays end to end and exports the results.
//!
//! Each play gets its own mention extractor, resolver, aggregator and recorder,
//! created at the start of its run and dropped at the end. Nothing is shared
//! between plays, so a batch can run them in parallel and one play's export
//! failure never affects another.

mod config;

pub use config::*;

use play_model::{
    annotate, group_scenes, MentionExtractor, PlayId, PlayScript, Roster, RosterGazetteer,
};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::graph::{graphml_file_name, RelationGraph};
use crate::relations::{NameResolver, RelationAggregator, ResolvedRelations};
use crate::timeline::{snapshot_file_name, write_snapshot_json, SnapshotRecorder, TemporalSnapshot};

/// Everything computed for one play.
#[derive(Debug, Clone)]
pub struct PlayAnalysis {
    pub play_id: PlayId,
    pub title: String,
    pub roster: Roster,
    /// Speaking lines per character, most talkative first.
    pub speaker_counts: Vec<(String, usize)>,
    pub relations: ResolvedRelations,
    pub timeline: TemporalSnapshot,
}

impl PlayAnalysis {
    /// Analyze a play with the given mention extractor.
    ///
    /// Scenes are processed in play order with a snapshot after each one.
    pub fn run(
        script: &PlayScript,
        extractor: &dyn MentionExtractor,
    ) -> Result<Self, PipelineError> {
        let span = tracing::info_span!("play", id = %script.id, title = %script.title);
        let _enter = span.enter();

        let roster = script.roster();
        let resolver = NameResolver::from_roster(&roster);
        let scenes = group_scenes(annotate(script, extractor));

        let mut aggregator = RelationAggregator::new(&resolver);
        let mut recorder = SnapshotRecorder::new();

        for scene in &scenes {
            aggregator.process(scene);
            recorder.capture_after_scene(scene.key, &aggregator)?;
        }

        let relations = aggregator.finalize();
        tracing::info!(
            scenes = scenes.len(),
            characters = roster.len(),
            relations = relations.combined.len(),
            "Analyzed play"
        );

        Ok(Self {
            play_id: script.id,
            title: script.title.clone(),
            roster,
            speaker_counts: script.speaker_line_counts(),
            relations,
            timeline: recorder.into_timeline(),
        })
    }

    /// Analyze a play, recognizing mentions of its own roster names.
    pub fn analyze(script: &PlayScript) -> Result<Self, PipelineError> {
        let gazetteer = RosterGazetteer::new(&script.roster());
        Self::run(script, &gazetteer)
    }

    /// The final relation graph.
    pub fn graph(&self) -> RelationGraph {
        RelationGraph::from_counts(&self.relations.combined)
    }
}

/// Paths written by an export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportedFiles {
    pub snapshot: Option<PathBuf>,
    pub graph: Option<PathBuf>,
}

/// Write a play's snapshot JSON and GraphML files as configured.
pub fn export(
    analysis: &PlayAnalysis,
    config: &PipelineConfig,
) -> Result<ExportedFiles, PipelineError> {
    let mut exported = ExportedFiles::default();

    if config.write_snapshots {
        let path = config.snapshot_path().join(snapshot_file_name(&analysis.title));
        let mut writer = create_file(&config.snapshot_path(), &path)?;
        write_snapshot_json(&mut writer, &analysis.title, &analysis.timeline)?;
        writer
            .flush()
            .map_err(|err| PipelineError::export(&path, err))?;
        tracing::debug!(path = %path.display(), "Wrote snapshot");
        exported.snapshot = Some(path);
    }

    if config.write_graphs {
        let path = config.graph_path().join(graphml_file_name(&analysis.title));
        let mut writer = create_file(&config.graph_path(), &path)?;
        analysis.graph().write_graphml(&mut writer)?;
        writer
            .flush()
            .map_err(|err| PipelineError::export(&path, err))?;
        tracing::debug!(path = %path.display(), "Wrote graph");
        exported.graph = Some(path);
    }

    Ok(exported)
}

/// Create `path` inside `dir`, creating `dir` itself if needed.
fn create_file(dir: &Path, path: &Path) -> Result<BufWriter<File>, PipelineError> {
    std::fs::create_dir_all(dir).map_err(|err| PipelineError::export(dir, err))?;
    let file = File::create(path).map_err(|err| PipelineError::export(path, err))?;
    Ok(BufWriter::new(file))
}

/// Outcome of one play in a batch.
#[derive(Debug)]
pub struct PlayReport {
    pub play_id: PlayId,
    pub title: String,
    /// Present whenever the analysis itself succeeded, even if export failed.
    pub analysis: Option<PlayAnalysis>,
    pub exported: Option<ExportedFiles>,
    pub error: Option<PipelineError>,
}

impl PlayReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Analyze and export a single play, capturing any failure in the report.
pub fn run_play(script: &PlayScript, config: &PipelineConfig) -> PlayReport {
    let mut report = PlayReport {
        play_id: script.id,
        title: script.title.clone(),
        analysis: None,
        exported: None,
        error: None,
    };

    let analysis = match PlayAnalysis::analyze(script) {
        Ok(analysis) => analysis,
        Err(err) => {
            tracing::error!(play = %script.title, error = %err, "Analysis failed");
            report.error = Some(err);
            return report;
        }
    };

    match export(&analysis, config) {
        Ok(exported) => report.exported = Some(exported),
        Err(err) => {
            tracing::error!(play = %script.title, error = %err, "Export failed");
            report.error = Some(err);
        }
    }

    report.analysis = Some(analysis);
    report
}

/// Run every play. Reports come back in input order.
pub fn run_batch(scripts: &[PlayScript], config: &PipelineConfig) -> Vec<PlayReport> {
    let reports: Vec<PlayReport> = if config.parallel {
        scripts.par_iter().map(|script| run_play(script, config)).collect()
    } else {
        scripts.iter().map(|script| run_play(script, config)).collect()
    };

    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    if failed > 0 {
        tracing::warn!(plays = reports.len(), failed, "Batch finished with failures");
    } else {
        tracing::info!(plays = reports.len(), "Batch finished");
    }

    reports
}
