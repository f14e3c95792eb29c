//! Command-line interface for faultline.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use walkdir::WalkDir;

use crate::analyzer::Analyzer;
use crate::config::Config;
use crate::inference::OpenAiEngine;
use crate::issue::{BatchReport, BatchSummary, FileUnit};
use crate::report;
use crate::server;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ISSUES: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Code defect analysis backed by syntax checking and a language model.
///
/// Faultline runs a deterministic syntax check over each file, then asks a
/// model to review the code, and turns everything it finds into
/// issue-tracker-ready records with priorities and tags.
#[derive(Parser)]
#[command(name = "faultline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze files or directories and print a report
    #[command(visible_alias = "check")]
    Analyze(AnalyzeArgs),
    /// Run the HTTP analysis service
    Serve(ServeArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Files or directories to analyze
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Analysis types, comma separated (bugs, security, performance, ...)
    #[arg(short, long, value_delimiter = ',', default_value = "bugs")]
    pub types: Vec<String>,

    /// Extra context appended to the review prompt
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the serve command.
#[derive(Parser)]
pub struct ServeArgs {
    /// Port to listen on (overrides the PORT environment variable)
    #[arg(short, long)]
    pub port: Option<u16>,
}

const DEFAULT_PORT: u16 = 8000;

/// Resolve the listen port: flag, then PORT env var, then the default.
fn resolve_port(args: &ServeArgs) -> anyhow::Result<u16> {
    if let Some(port) = args.port {
        return Ok(port);
    }
    match std::env::var("PORT") {
        Ok(v) => v.parse().context("PORT must be a number"),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

/// Collect analyzable files under the given paths.
///
/// Directories are walked recursively, skipping hidden directories. Files
/// that cannot be read as UTF-8 are skipped with a warning.
fn collect_files(paths: &[PathBuf]) -> anyhow::Result<Vec<FileUnit>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            push_file(&mut files, path);
            continue;
        }
        for entry in WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| {
                let name = e.file_name().to_string_lossy();
                if e.file_type().is_dir() && name.starts_with('.') {
                    return false;
                }
                if e.file_type().is_dir() && (name == "node_modules" || name == "target") {
                    return false;
                }
                true
            })
        {
            let entry = entry?;
            if entry.file_type().is_file() {
                push_file(&mut files, entry.path());
            }
        }
    }
    Ok(files)
}

fn push_file(files: &mut Vec<FileUnit>, path: &Path) {
    match std::fs::read_to_string(path) {
        Ok(content) => files.push(FileUnit {
            path: path.display().to_string(),
            content,
        }),
        Err(e) => warn!(file = %path.display(), error = %e, "skipping unreadable file"),
    }
}

/// Run the analyze command.
pub async fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let files = collect_files(&args.paths)?;
    if files.is_empty() {
        eprintln!("Error: no analyzable files found");
        return Ok(EXIT_ERROR);
    }

    let config = Config::from_env()?;
    let analyzer = Analyzer::new(Arc::new(OpenAiEngine::new(&config)));

    let results = analyzer
        .analyze_files(&files, &args.types, args.prompt.as_deref())
        .await;
    let summary = BatchSummary::from_results(&results);
    let batch = BatchReport { summary, results };

    match args.format.as_str() {
        "json" => report::write_json(&batch)?,
        _ => report::write_pretty(&batch),
    }

    if batch.summary.total_issues > 0 {
        Ok(EXIT_ISSUES)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the serve command.
pub async fn run_serve(args: &ServeArgs) -> anyhow::Result<i32> {
    let port = resolve_port(args)?;
    let config = Config::from_env()?;
    let analyzer = Analyzer::new(Arc::new(OpenAiEngine::new(&config)));
    server::start_server(port, analyzer).await?;
    Ok(EXIT_SUCCESS)
}
