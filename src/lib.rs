pub mod errors;
pub mod sample_files;

use std::path::{Path, PathBuf};

pub use errors::{ManifestError, Result};
pub use sample_files::{Diagnostic, FastqDir, Mode, SampleFiles};

/// Manifest file name used when no output name is given.
pub const DEFAULT_OUTPUT: &str = "samples.tsv";

/// Sample names from the first column of a tab-separated file with a header line.
///
/// Blank entries are skipped and repeated names are kept once, in file order.
pub fn read_sample_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut names: Vec<String> = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(name) = record.get(0).filter(|n| !n.is_empty()) {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }

    if names.is_empty() {
        return Err(ManifestError::EmptySampleList {
            path: path.to_path_buf(),
        });
    }
    Ok(names)
}

/// Where the manifest goes: `output` (or `samples.tsv`) next to the fastq directory.
/// An absolute `output` is used as is.
pub fn output_path(fastq_dir: &Path, output: Option<&str>) -> PathBuf {
    let parent = fastq_dir.parent().unwrap_or(fastq_dir);
    parent.join(output.unwrap_or(DEFAULT_OUTPUT))
}
