//! Error types for manifest construction.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for manifest operations
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Fatal errors. Any of these aborts the run before an output table is written.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The fastq directory does not exist or is not a directory
    #[error("'{}' is not a directory", .path.display())]
    InvalidDirectory {
        /// The offending path
        path: PathBuf,
    },

    /// A file name has no underscore to cut the sample name at
    #[error("Could not derive a sample name from '{file_name}': expected 'SAMPLE_...'")]
    MalformedFilename {
        /// The file name as listed in the directory
        file_name: String,
    },

    /// Two files matched a readgroup but they do not split into one R1 and one R2
    #[error(
        "Either R1: {r1:?} or R2: {r2:?} was not found for readgroup '{readgroup}'. \
         Make sure your samples are formatted correctly.\n \
         A good example is one named \"SAMPLE_READGROUP_R1.fastq\"."
    )]
    MissingMateFile {
        /// The readgroup identifier
        readgroup: String,
        /// Files matching `{readgroup}*R1*`
        r1: Vec<String>,
        /// Files matching `{readgroup}*R2*`
        r2: Vec<String>,
    },

    /// A mate path handed to a readgroup is not an existing file
    #[error("{path} is not a file")]
    InvalidMateFilePath {
        /// The rejected path
        path: String,
    },

    /// The sample list file contained no sample names
    #[error("Sample list '{}' does not contain any sample names", .path.display())]
    EmptySampleList {
        /// Path to the sample list
        path: PathBuf,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Glob(#[from] glob::GlobError),
}
