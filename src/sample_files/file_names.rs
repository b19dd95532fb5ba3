// src/sample_files/file_names.rs
use std::path::Path;

use crate::errors::{ManifestError, Result};

/// Sample names end at the first of these.
pub const SAMPLE_DELIMITER: char = '_';

/// The two halves of a paired-end read set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mate {
    R1,
    R2,
}

impl Mate {
    pub fn token(self) -> &'static str {
        match self {
            Mate::R1 => "R1",
            Mate::R2 => "R2",
        }
    }
}

/// Sample name of a file: everything before the first underscore.
/// The name is at least one character long, so a leading underscore belongs to it.
pub fn sample_prefix(file_name: &str) -> Result<&str> {
    let mut chars = file_name.char_indices();
    chars.next();
    chars
        .find(|&(_, c)| c == SAMPLE_DELIMITER)
        .map(|(i, _)| &file_name[..i])
        .ok_or_else(|| ManifestError::MalformedFilename {
            file_name: file_name.to_string(),
        })
}

/// Does `candidate` belong to the already registered sample `registered`?
///
/// This is a prefix rule and not an exact match: with "A" registered, a later
/// "A2" is folded into "A". Swap this out for `candidate == registered` to get
/// exact matching.
pub fn same_sample(candidate: &str, registered: &str) -> bool {
    candidate.starts_with(registered)
}

/// Candidate sample names for a directory listing, sorted.
///
/// Fails on the first file name without a usable underscore.
pub fn derive_sample_names<S: AsRef<str>>(file_names: &[S]) -> Result<Vec<String>> {
    let mut samples: Vec<String> = Vec::new();
    for file_name in file_names {
        let name = sample_prefix(file_name.as_ref())?;
        if samples.iter().any(|registered| same_sample(name, registered)) {
            continue;
        }
        samples.push(name.to_string());
    }
    samples.sort();
    Ok(samples)
}

/// Byte offset of `token` in `file_name`, searched from one character past `prefix`.
/// `None` when the file does not start with `prefix` or the token is missing.
fn token_after(file_name: &str, prefix: &str, token: &str) -> Option<usize> {
    let rest = file_name.strip_prefix(prefix)?;
    let skip = rest.chars().next()?.len_utf8();
    rest[skip..].find(token).map(|i| prefix.len() + skip + i)
}

/// The readgroup a file announces for `sample`: the file name up to its R1 token.
///
/// `A_rg1_R1.fastq` gives `A_rg1_` for sample `A`.
pub fn readgroup_prefix<'a>(file_name: &'a str, sample: &str) -> Option<&'a str> {
    token_after(file_name, sample, Mate::R1.token()).map(|end| &file_name[..end])
}

/// Weak pairing check: some file of `sample` carries an R2 token.
///
/// It does not look at which readgroup that file belongs to. The real pairing
/// is [`matches_mate`] on the files a readgroup glob returns.
pub fn has_mate_two<S: AsRef<str>>(sample: &str, file_names: &[S]) -> bool {
    file_names
        .iter()
        .any(|f| token_after(f.as_ref(), sample, Mate::R2.token()).is_some())
}

/// Strict pairing check: `file_name` matches `{readgroup}*R1*` (or `*R2*`).
pub fn matches_mate(file_name: &str, readgroup: &str, mate: Mate) -> bool {
    file_name
        .strip_prefix(readgroup)
        .map_or(false, |rest| rest.contains(mate.token()))
}

/// Readgroup identifiers of `sample`, in listing order, without repeats.
/// Empty unless the weak R2 check passes.
pub fn readgroup_candidates<'a, S: AsRef<str>>(sample: &str, file_names: &'a [S]) -> Vec<&'a str> {
    if !has_mate_two(sample, file_names) {
        return Vec::new();
    }
    let mut out: Vec<&'a str> = Vec::new();
    for file_name in file_names {
        if let Some(rg) = readgroup_prefix(file_name.as_ref(), sample) {
            if !out.contains(&rg) {
                out.push(rg);
            }
        }
    }
    out
}

/// Last path component of `path`, or the whole string if there is none.
pub fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
}
