//! # fabsync-rewrite
//!
//! Re-points `linkedService` references in pipeline definitions at the
//! resources named in a lookup table.
//!
//! Call [`rewrite_all`] to process every `pipeline-content.json` under a
//! directory, or [`rewrite_value`] to transform an in-memory document.

pub mod diff;
pub mod discover;
pub mod error;
pub mod pipeline;
pub mod reference;
pub mod writer;

pub use diff::{diff_all, FileDiff};
pub use discover::{find_pipeline_documents, PIPELINE_CONTENT_FILE};
pub use error::RewriteError;
pub use pipeline::{rewrite_all, rewrite_all_from_file, FailurePolicy, RewriteOptions, RewriteReport};
pub use reference::{rewrite_value, ReferenceTable, RewriteStats};
pub use writer::{rewrite_file, FileOutcome};
