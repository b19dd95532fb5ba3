// src/sample_files/diagnostic.rs
use std::fmt;

/// Non-fatal findings of a matching pass. They never stop a manifest from
/// being written; the caller decides whether and how to show them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A readgroup glob did not return exactly two files; the readgroup was skipped.
    AmbiguousMatePair { readgroup: String, matches: Vec<String> },
    /// A sample ended up without a single valid readgroup and was left out.
    EmptySampleExcluded { sample: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::AmbiguousMatePair { readgroup, matches } => write!(
                f,
                "readgroup '{}' matched {} file(s) {:?}, expected one R1 and one R2 - skipped",
                readgroup,
                matches.len(),
                matches
            ),
            Diagnostic::EmptySampleExcluded { sample } => {
                write!(f, "{sample} has no readgroups - excluded")
            }
        }
    }
}
