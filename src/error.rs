// Error taxonomy for the dump conversion pipeline.
// Parsing/location failures are fatal and abort before any output is written;
// row-level arity problems are not errors (they land in the DiscardLog).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DumpError {
    /// No CREATE TABLE statement could be located in the given file.
    #[error("no CREATE TABLE statement found in {path}")]
    MissingCreateTable { path: String },

    /// One of the three required tables was not found across the input files.
    #[error("required table `{table}` was not found in any input file")]
    MissingTable { table: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON report error: {0}")]
    Json(#[from] serde_json::Error),
}
