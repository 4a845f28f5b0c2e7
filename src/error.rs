//! Error types for everything around the alignment core.
//!
//! Tokenizing and aligning never fail. Errors only come from configuration
//! (costs, separator patterns) and from reading input files.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A cost was negative or does not fit in a `Cost`.
    #[error("invalid configuration: {name} cost must be a non-negative integer, got {value}")]
    InvalidConfiguration { name: &'static str, value: i64 },

    /// The word separator pattern is not a valid regex.
    #[error("invalid separator pattern: {0}")]
    InvalidSeparator(#[from] regex::Error),

    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file has an odd number of sequences, or a `.seq` line without
    /// its `>`/`<` marker.
    #[error("{} does not contain well-formed sequence pairs", path.display())]
    UnpairedInput { path: PathBuf },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to serialize alignment: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown file extension for {}; must be one of {{seq,txt}}", path.display())]
    UnknownExtension { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
