// src/sample_files/readgroup.rs
use crate::errors::{ManifestError, Result};
use crate::sample_files::fastq_dir::FileSource;
use crate::sample_files::file_names::{basename, matches_mate, Mate};

/// One sequencing run of a sample: an R1/R2 file pair.
///
/// Two readgroups are equal when their identifiers are, whatever their files.
#[derive(Debug, Clone)]
pub struct Readgroup {
    id: String,
    r1: String,
    r2: String,
    /// bwa `-R` flag, once derived
    command: Option<String>,
}

impl Readgroup {
    /// Both mate paths must be existing files in `source`.
    pub fn new<S: FileSource + ?Sized>(
        id: impl Into<String>,
        r1: impl Into<String>,
        r2: impl Into<String>,
        source: &S,
    ) -> Result<Self> {
        let (r1, r2) = (r1.into(), r2.into());
        for path in [&r1, &r2] {
            if !source.is_file(path) {
                return Err(ManifestError::InvalidMateFilePath { path: path.clone() });
            }
        }
        Ok(Self {
            id: id.into(),
            r1,
            r2,
            command: None,
        })
    }

    /// Split the two files a `{id}*` glob returned into R1 and R2.
    ///
    /// Fails with `MissingMateFile` unless one file matches `{id}*R1*` and a
    /// different one matches `{id}*R2*`.
    pub fn from_matches<S: FileSource + ?Sized>(id: &str, matches: &[String], source: &S) -> Result<Self> {
        let of_mate = |mate: Mate| -> Vec<String> {
            matches
                .iter()
                .filter(|p| matches_mate(basename(p), id, mate))
                .cloned()
                .collect()
        };
        let r1 = of_mate(Mate::R1);
        let r2 = of_mate(Mate::R2);

        let pair = r1
            .iter()
            .find_map(|a| r2.iter().find(|b| *b != a).map(|b| (a.clone(), b.clone())));
        match pair {
            Some((a, b)) => Self::new(id, a, b, source),
            None => Err(ManifestError::MissingMateFile {
                readgroup: id.to_string(),
                r1,
                r2,
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn r1(&self) -> &str {
        &self.r1
    }

    pub fn r2(&self) -> &str {
        &self.r2
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub(crate) fn set_command(&mut self, command: String) {
        self.command = Some(command);
    }
}

impl PartialEq for Readgroup {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Readgroup {}
