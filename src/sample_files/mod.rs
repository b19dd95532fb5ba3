// src/sample_files/mod.rs
pub mod commands;
pub mod diagnostic;
pub mod fastq_dir;
pub mod file_names;
pub mod manifest;
pub mod readgroup;
pub mod sample_files;
pub mod sample_record;

pub use commands::CommandStyle;
pub use diagnostic::Diagnostic;
pub use fastq_dir::{FastqDir, FileSource};
pub use manifest::{ManifestRow, Mode};
pub use readgroup::Readgroup;
pub use sample_files::SampleFiles;
pub use sample_record::SampleRecord;
