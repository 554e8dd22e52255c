//! `skillcert-matrix`: Renders the training matrix for one line or all lines.
//!
//! **Usage:**
//! ```text
//! skillcert-matrix --input <file-or-dir> [--line <label>] [--format text|json|html] [--output <path>] [--stats]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use skillcert_clients::CommonArgs;
use skillcert_matrix::renderer::{render_html, render_stats_text, render_text};
use skillcert_matrix::writer::write_text;
use skillcert_matrix::{CertificationStats, LineFilter, TrainingMatrix};
use tracing::info;

/// Matrix output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MatrixFormat {
    Text,
    Json,
    Html,
}

/// Build the employee × operation training matrix.
#[derive(Parser)]
#[command(
    name = "skillcert-matrix",
    about = "Render the training matrix with gated certification levels"
)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Line label to show ("todas"/"all" for every line; overrides [matrix] line).
    #[arg(long)]
    line: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = MatrixFormat::Text)]
    format: MatrixFormat,

    /// Write to this file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Append certification statistics (text format only).
    #[arg(long)]
    stats: bool,

    /// Page title for HTML output.
    #[arg(long, default_value = "Matriz de entrenamiento")]
    title: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.common.load_config()?;
    args.common.init_logging(&config)?;

    let policy = config.policy()?;
    let filter = LineFilter::from_label(args.line.as_deref().or(config.matrix.line.as_deref()));

    let export = skillcert_clients::input::load_exports(&args.common.input)
        .with_context(|| format!("Failed to load {}", args.common.input.display()))?;
    let matrix = TrainingMatrix::build(&export.records, &filter, &policy);
    let stats = CertificationStats::collect(&export.records, &filter, &policy);

    let rendered = match args.format {
        MatrixFormat::Text => {
            let mut text = render_text(&matrix);
            if args.stats {
                text.push('\n');
                text.push_str(&render_stats_text(&stats));
            }
            text
        }
        MatrixFormat::Json => {
            let value = serde_json::json!({ "matrix": &matrix, "stats": &stats });
            let mut text = serde_json::to_string_pretty(&value)?;
            text.push('\n');
            text
        }
        MatrixFormat::Html => render_html(&matrix, &args.title),
    };

    match &args.output {
        Some(path) => {
            write_text(path, &rendered)?;
            info!(path = %path.display(), rows = matrix.rows.len(), "matrix written");
        }
        None => print!("{rendered}"),
    }

    if !export.rejected.is_empty() {
        eprintln!(
            "{} row(s) skipped; run skillcert-audit for details.",
            export.rejected.len()
        );
    }
    Ok(())
}
