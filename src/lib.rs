//! # Pdfbrief
//!
//! Batch summarisation of PDF documents using LLMs.
//!
//! ## Pipeline
//!
//! - **Typed Configuration**: TOML settings with `${ENV_VAR}` placeholder resolution
//! - **Per-Page Extraction**: lopdf-based text extraction, page order preserved
//! - **Remote Summarisation**: OpenAI-compatible chat-completions client with token accounting
//! - **Idempotent Batches**: an existing `<stem>_summary.json` marks a PDF as done

pub mod batch;
pub mod config;
pub mod extract;
pub mod logging;
pub mod persist;
pub mod prompt;
pub mod summarizer;

pub use batch::BatchReport;
pub use config::Config;
pub use persist::AnalysisResult;
pub use prompt::PromptTemplate;
pub use summarizer::{CompletionBackend, Summarizer, XaiClient};
