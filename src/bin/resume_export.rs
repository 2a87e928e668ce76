//! Export resumes to PDF or LaTeX from the command line.
//!
//! Usage:
//!   resume-export export resume.json --format pdf --out-dir out/
//!   resume-export batch resumes/ --format latex --config export.toml
//!   resume-export layout resume.json > ops.json

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use resume_export::{Artifact, ExportConfig, ExportFormat, Exporter, ResumeRecord};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

#[derive(Parser)]
#[command(name = "resume-export")]
#[command(about = "Render structured resumes as PDF or LaTeX", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// TOML export configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Export one resume
    Export {
        /// Resume JSON file
        input: PathBuf,
        /// Output format: pdf or latex
        #[arg(short, long, default_value = "pdf")]
        format: ExportFormat,
        /// Directory for the artifact
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Export every JSON resume in a directory concurrently
    Batch {
        /// Directory of resume JSON files
        dir: PathBuf,
        /// Output format: pdf or latex
        #[arg(short, long, default_value = "pdf")]
        format: ExportFormat,
        /// Directory for the artifacts
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print the PDF draw operations as JSON
    Layout {
        /// Resume JSON file
        input: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> Result<ExportConfig> {
    match path {
        Some(path) => ExportConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(ExportConfig::default()),
    }
}

fn load_resume(path: &Path) -> Result<ResumeRecord> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    ResumeRecord::from_json(&json).with_context(|| format!("invalid resume {}", path.display()))
}

fn report_warnings(source: &Path, artifact: &Artifact) {
    for warning in &artifact.warnings {
        eprintln!("warning: {}: {}", source.display(), warning);
    }
}

/// Load and render one resume without touching the output directory.
fn render_one(exporter: &Exporter, input: &Path, format: ExportFormat) -> Result<Artifact> {
    let resume = load_resume(input)?;
    let artifact = exporter
        .export(&resume, format)
        .with_context(|| format!("failed to export {}", input.display()))?;
    report_warnings(input, &artifact);
    Ok(artifact)
}

fn export_one(
    exporter: &Exporter,
    input: &Path,
    format: ExportFormat,
    out_dir: &Path,
) -> Result<PathBuf> {
    let artifact = render_one(exporter, input, format)?;
    let path = artifact
        .save_to(out_dir)
        .with_context(|| format!("failed to write into {}", out_dir.display()))?;
    Ok(path)
}

/// Reserve an output name for `input`.
///
/// A name already taken in this batch is retried once as
/// `<input stem>_<filename>`; `None` when that is taken as well.
fn claim_filename(taken: &mut HashSet<String>, filename: &str, input: &Path) -> Option<String> {
    if taken.insert(filename.to_string()) {
        return Some(filename.to_string());
    }
    let stem = input.file_stem()?.to_string_lossy();
    let renamed = format!("{}_{}", stem, filename);
    if taken.insert(renamed.clone()) {
        log::warn!(
            "{}: {} already written in this batch, saving as {}",
            input.display(),
            filename,
            renamed
        );
        Some(renamed)
    } else {
        None
    }
}

#[derive(Debug, Default, PartialEq)]
struct BatchSummary {
    written: usize,
    failures: usize,
}

/// Write rendered artifacts in input order, never reusing a file name.
fn save_batch(mut rendered: Vec<(PathBuf, Result<Artifact>)>, out_dir: &Path) -> BatchSummary {
    rendered.sort_by(|a, b| a.0.cmp(&b.0));

    let mut summary = BatchSummary::default();
    let mut taken = HashSet::new();
    for (input, result) in rendered {
        let mut artifact = match result {
            Ok(artifact) => artifact,
            Err(e) => {
                summary.failures += 1;
                eprintln!("error: {:#}", e);
                continue;
            },
        };
        let Some(filename) = claim_filename(&mut taken, &artifact.filename, &input) else {
            summary.failures += 1;
            eprintln!(
                "error: {}: output name {} is already used in this batch",
                input.display(),
                artifact.filename
            );
            continue;
        };
        artifact.filename = filename;
        match artifact.save_to(out_dir) {
            Ok(path) => {
                summary.written += 1;
                log::info!("{} → {}", input.display(), path.display());
            },
            Err(e) => {
                summary.failures += 1;
                eprintln!(
                    "error: failed to write {} into {}: {}",
                    artifact.filename,
                    out_dir.display(),
                    e
                );
            },
        }
    }
    summary
}

fn json_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

async fn run_batch(
    exporter: Exporter,
    dir: &Path,
    format: ExportFormat,
    out_dir: &Path,
) -> Result<()> {
    let inputs = json_inputs(dir)?;
    if inputs.is_empty() {
        bail!("no .json resumes in {}", dir.display());
    }

    let start = Instant::now();
    let exporter = Arc::new(exporter);
    let mut tasks = JoinSet::new();
    for input in inputs {
        let exporter = Arc::clone(&exporter);
        // Rendering is CPU-bound; keep it off the async workers.
        tasks.spawn_blocking(move || {
            let result = render_one(&exporter, &input, format);
            (input, result)
        });
    }

    let mut rendered = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        rendered.push(joined.context("export task panicked")?);
    }

    let summary = save_batch(rendered, out_dir);
    log::info!(
        "batch finished: {} written, {} failed in {:.2?}",
        summary.written,
        summary.failures,
        start.elapsed()
    );
    if summary.failures > 0 {
        bail!(
            "{} of {} export(s) failed",
            summary.failures,
            summary.failures + summary.written
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Export {
            input,
            format,
            out_dir,
        } => {
            let exporter = Exporter::with_config(config);
            let path = export_one(&exporter, &input, format, &out_dir)?;
            println!("{}", path.display());
        },
        Command::Batch {
            dir,
            format,
            out_dir,
        } => {
            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("failed to create {}", out_dir.display()))?;
            run_batch(Exporter::with_config(config), &dir, format, &out_dir).await?;
        },
        Command::Layout { input } => {
            let resume = load_resume(&input)?;
            let layout = Exporter::with_config(config).layout(&resume)?;
            println!("{}", serde_json::to_string_pretty(&layout)?);
        },
    }

    Ok(())
}
