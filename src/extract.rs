//! PDF text extraction.
//!
//! Uses lopdf to walk pages in file order and pull out their text content.

use lopdf::Document;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to open or parse PDF '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },
    #[error("PDF is encrypted: {0}")]
    Encrypted(PathBuf),
}

/// Extract the concatenated page text of a PDF.
///
/// Pages are visited in file order. Each page that yields non-blank text
/// contributes its text followed by a newline; a page with no extractable
/// text (or a per-page extraction failure) contributes nothing and is not an
/// error. Only a file that cannot be opened or parsed fails the whole call.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    info!(file = %path.display(), "extracting text from PDF");

    let document = Document::load(path).map_err(|source| ExtractError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if document.is_encrypted() {
        return Err(ExtractError::Encrypted(path.to_path_buf()));
    }

    let mut text = String::new();
    for (page_number, _object_id) in document.get_pages() {
        match document.extract_text(&[page_number]) {
            Ok(page_text) if !page_text.trim().is_empty() => {
                text.push_str(page_text.trim_end());
                text.push('\n');
                debug!(page = page_number, "extracted page text");
            }
            Ok(_) => {
                debug!(page = page_number, "page has no extractable text");
            }
            Err(error) => {
                debug!(page = page_number, %error, "skipping unextractable page");
            }
        }
    }

    info!(
        file = %path.display(),
        chars = text.len(),
        "completed text extraction"
    );
    Ok(text)
}
