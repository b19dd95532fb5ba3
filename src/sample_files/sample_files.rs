// src/sample_files/sample_files.rs
use std::path::Path;

use log::debug;

use crate::errors::Result;
use crate::sample_files::commands::CommandStyle;
use crate::sample_files::diagnostic::Diagnostic;
use crate::sample_files::fastq_dir::FileSource;
use crate::sample_files::file_names::{derive_sample_names, readgroup_candidates};
use crate::sample_files::manifest::{self, Mode};
use crate::sample_files::readgroup::Readgroup;
use crate::sample_files::sample_record::SampleRecord;

/// Samples matched in one directory, plus everything noteworthy that was skipped.
#[derive(Debug, Default)]
pub struct SampleFiles {
    pub samples: Vec<SampleRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SampleFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Derive the sample names from `file_names` and match their readgroups.
    pub fn from_file_names<N, S>(file_names: &[N], source: &S) -> Result<Self>
    where
        N: AsRef<str>,
        S: FileSource + ?Sized,
    {
        let names = derive_sample_names(file_names)?;
        debug!("{} candidate samples: {:?}", names.len(), names);
        Self::from_sample_names(&names, file_names, source)
    }

    /// Match readgroups for a given list of sample names, in that order.
    pub fn from_sample_names<M, N, S>(sample_names: &[M], file_names: &[N], source: &S) -> Result<Self>
    where
        M: AsRef<str>,
        N: AsRef<str>,
        S: FileSource + ?Sized,
    {
        let mut data = Self::new();
        for name in sample_names {
            let mut sample = SampleRecord::new(name.as_ref());
            for readgroup in data.derive_readgroups(&sample, file_names, source)? {
                Self::attach_readgroup(&mut sample, readgroup);
            }
            data.samples.push(sample);
        }
        data.finalize();
        Ok(data)
    }

    /// Readgroups of `sample`, in listing order.
    ///
    /// A candidate whose `{readgroup}*` glob does not return exactly two files
    /// is skipped with a diagnostic. Two files that do not split into R1 and R2
    /// abort the whole pass.
    pub fn derive_readgroups<N, S>(
        &mut self,
        sample: &SampleRecord,
        file_names: &[N],
        source: &S,
    ) -> Result<Vec<Readgroup>>
    where
        N: AsRef<str>,
        S: FileSource + ?Sized,
    {
        let mut out = Vec::new();
        for id in readgroup_candidates(sample.name(), file_names) {
            let matches = source.starting_with(id)?;
            if matches.len() != 2 {
                debug!("{:?} does not have a mate", matches);
                self.diagnostics.push(Diagnostic::AmbiguousMatePair {
                    readgroup: id.to_string(),
                    matches,
                });
                continue;
            }
            out.push(Readgroup::from_matches(id, &matches, source)?);
        }
        debug!("{}: {} readgroups", sample.name(), out.len());
        Ok(out)
    }

    /// Add `readgroup` to `sample` unless it already has one with that identifier.
    pub fn attach_readgroup(sample: &mut SampleRecord, readgroup: Readgroup) {
        if !sample.add_readgroup(readgroup) {
            debug!("{}: repeated readgroup ignored", sample.name());
        }
    }

    /// Drop every sample without readgroups. Order is kept.
    pub fn finalize(&mut self) {
        let diagnostics = &mut self.diagnostics;
        self.samples.retain(|s| {
            if s.is_empty() {
                diagnostics.push(Diagnostic::EmptySampleExcluded {
                    sample: s.name().to_string(),
                });
                false
            } else {
                true
            }
        });
    }

    /// Derive the command fragments `mode` writes out.
    pub fn apply_commands(&mut self, mode: Mode) {
        if let Some(style) = mode.command_style() {
            for sample in &mut self.samples {
                style.apply(sample);
            }
        }
    }

    pub fn write_manifest<P: AsRef<Path>>(&self, out_path: P, mode: Mode) -> Result<()> {
        manifest::write_manifest(out_path, &self.samples, mode)
    }
}
