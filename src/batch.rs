//! Batch processing of a directory of PDFs.
//!
//! Strictly sequential: each file is fully extracted, summarised, and
//! persisted before the next begins. A failure on one file is logged and
//! never aborts the rest of the batch.

use crate::extract::{self, ExtractError};
use crate::persist::{self, AnalysisResult, PersistError};
use crate::summarizer::{CompletionBackend, GenerationError, Summarizer};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Failures that abort the whole run (directory setup or enumeration).
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("failed to prepare directory '{path}': {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to enumerate input directory: {0}")]
    ReadDir(#[from] std::io::Error),
}

/// Per-file failures; the batch driver logs these and moves on.
#[derive(Error, Debug)]
pub enum FileError {
    #[error(transparent)]
    Extraction(#[from] ExtractError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Tally of what happened during a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Process every `*.pdf` in `input_dir`, writing one JSON result per file
/// into `output_dir`. Both directories are created if absent. A PDF whose
/// output file already exists is skipped without re-validation.
pub async fn run<B: CompletionBackend>(
    input_dir: &Path,
    output_dir: &Path,
    summarizer: &Summarizer<B>,
) -> Result<BatchReport, BatchError> {
    for dir in [input_dir, output_dir] {
        std::fs::create_dir_all(dir).map_err(|source| BatchError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    info!(input = %input_dir.display(), output = %output_dir.display(), "starting batch run");

    let pdfs = find_pdfs(input_dir)?;
    if pdfs.is_empty() {
        warn!(dir = %input_dir.display(), "no PDF files found");
        return Ok(BatchReport::default());
    }

    let mut report = BatchReport::default();
    for pdf in &pdfs {
        let Some(stem) = pdf.file_stem() else {
            debug!(file = %pdf.display(), "skipping entry without a file stem");
            continue;
        };
        let output_path = output_dir.join(format!("{}_summary.json", stem.to_string_lossy()));

        if output_path.exists() {
            info!(
                file = %pdf.display(),
                output = %output_path.display(),
                "skipping, output already exists"
            );
            report.skipped += 1;
            continue;
        }

        match process_file(pdf, &output_path, summarizer).await {
            Ok(()) => {
                info!(file = %pdf.display(), "successfully processed");
                report.processed += 1;
            }
            Err(err) => {
                error!(file = %pdf.display(), error = %err, "failed to process PDF");
                report.failed += 1;
            }
        }
    }

    info!(
        processed = report.processed,
        skipped = report.skipped,
        failed = report.failed,
        "batch run completed"
    );
    Ok(report)
}

/// Non-recursive `*.pdf` enumeration. Order is filesystem-dependent.
fn find_pdfs(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let mut pdfs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "pdf") {
            pdfs.push(path);
        }
    }
    Ok(pdfs)
}

/// Run the full pipeline for one PDF. The output file is only written after
/// extraction and summarisation both succeed, so no partial output is ever
/// left behind.
async fn process_file<B: CompletionBackend>(
    pdf: &Path,
    output_path: &Path,
    summarizer: &Summarizer<B>,
) -> Result<(), FileError> {
    let text = extract::extract_text(pdf)?;
    let analysis = summarizer.summarize(&text).await?;

    let input_pdf = pdf
        .canonicalize()
        .unwrap_or_else(|_| pdf.to_path_buf());
    let result = AnalysisResult {
        input_pdf: input_pdf.display().to_string(),
        prompt: summarizer.template().text().trim().to_string(),
        summary: analysis.summary,
        input_tokens: analysis.input_tokens,
        output_tokens: analysis.output_tokens,
    };

    persist::save(&result, output_path)?;
    Ok(())
}
