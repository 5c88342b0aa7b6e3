//! Persisting analysis results as JSON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The record written for each processed PDF.
///
/// Field names match the output file schema exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Resolved absolute path of the input PDF
    pub input_pdf: String,
    /// The raw prompt template, trimmed
    pub prompt: String,
    /// Generated summary, truncated to the configured cap
    pub summary: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Serialize the record as pretty-printed JSON and write it to `path`.
///
/// A plain overwrite; serde_json emits non-ASCII characters literally, so
/// the file stays human-readable for any language.
pub fn save(result: &AnalysisResult, path: &Path) -> Result<(), PersistError> {
    info!(file = %path.display(), "saving analysis result");
    let mut json = serde_json::to_string_pretty(result)?;
    json.push('\n');
    std::fs::write(path, json).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(file = %path.display(), "saved analysis result");
    Ok(())
}
