//! Command line entry point: analyze play scripts and export their relation graphs.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use play_model::PlayScript;
use relation_core::{run_batch, PipelineConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Operation {
    /// Final relation counts and GraphML.
    Relationships,
    /// Scene-by-scene snapshot JSON.
    Snapshots,
    /// Both exports.
    All,
}

#[derive(Debug, Parser)]
#[command(name = "playgraph", about = "Character relation graphs from play scripts")]
struct Cli {
    #[arg(long, value_enum, default_value_t = Operation::All)]
    op: Operation,

    /// TOML configuration file. Defaults apply when it is missing.
    #[arg(long, default_value = "playgraph.toml")]
    config: PathBuf,

    /// Play scripts as JSON arrays of {act, scene, character, text}.
    #[arg(required = true)]
    scripts: Vec<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relation_core=info,play_model=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = PipelineConfig::load(&cli.config)?;
    match cli.op {
        Operation::Relationships => config.write_snapshots = false,
        Operation::Snapshots => config.write_graphs = false,
        Operation::All => {}
    }

    let mut failures = 0;
    let mut scripts = Vec::new();
    for path in &cli.scripts {
        match PlayScript::load_json(path) {
            Ok(script) => scripts.push(script),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "Skipping play");
                failures += 1;
            }
        }
    }

    let reports = run_batch(&scripts, &config);

    for report in &reports {
        if cli.op != Operation::Relationships {
            if let Some(analysis) = &report.analysis {
                println!("{} speakers", report.title);
                for (name, lines) in &analysis.speaker_counts {
                    println!("  {name}: {lines}");
                }
            }
        }
        if cli.op != Operation::Snapshots {
            if let Some(analysis) = &report.analysis {
                println!("{}", report.title);
                for (pair, count) in analysis.relations.combined.iter() {
                    println!("  {pair}: {count}");
                }
            }
        }
        if !report.is_ok() {
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} plays failed", cli.scripts.len());
    }
    Ok(())
}
