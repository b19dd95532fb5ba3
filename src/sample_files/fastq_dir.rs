// src/sample_files/fastq_dir.rs
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::errors::{ManifestError, Result};

/// Where mate files are looked up. Matching only talks to the filesystem through this.
pub trait FileSource {
    /// Full paths of all entries whose name starts with `prefix` (a `{prefix}*` glob), sorted.
    fn starting_with(&self, prefix: &str) -> Result<Vec<String>>;

    /// `path` is an existing regular file.
    fn is_file(&self, path: &str) -> bool;
}

/// A directory of fastq files on disk.
#[derive(Debug, Clone)]
pub struct FastqDir {
    root: PathBuf,
}

impl FastqDir {
    /// Resolve `path` to an absolute directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(ManifestError::InvalidDirectory {
                path: path.to_path_buf(),
            });
        }
        let root = fs::canonicalize(path)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of the regular files directly inside the directory, sorted.
    ///
    /// With `suffixes` given only files ending on one of them are returned,
    /// otherwise every file is a candidate.
    pub fn file_names(&self, suffixes: &[String]) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if !suffixes.is_empty() && !suffixes.iter().any(|s| name.ends_with(s.as_str())) {
                debug!("skipping {name}: no matching suffix");
                continue;
            }
            names.push(name);
        }
        Ok(names)
    }
}

impl FileSource for FastqDir {
    fn starting_with(&self, prefix: &str) -> Result<Vec<String>> {
        let pattern = format!(
            "{}/{}*",
            glob::Pattern::escape(&self.root.to_string_lossy()),
            glob::Pattern::escape(prefix)
        );
        let mut paths = Vec::new();
        for entry in glob::glob(&pattern)? {
            paths.push(entry?.to_string_lossy().to_string());
        }
        paths.sort();
        Ok(paths)
    }

    fn is_file(&self, path: &str) -> bool {
        fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }
}

/// In-memory directory listing for unit tests.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct MemoryDir {
    root: String,
    files: std::collections::BTreeSet<String>,
}

#[cfg(test)]
impl MemoryDir {
    pub(crate) fn new(root: &str, files: &[&str]) -> Self {
        Self {
            root: root.to_string(),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Sorted file names, what `FastqDir::file_names` would list.
    pub(crate) fn names(&self) -> Vec<String> {
        self.files.iter().cloned().collect()
    }

    pub(crate) fn path(&self, file_name: &str) -> String {
        format!("{}/{}", self.root, file_name)
    }
}

#[cfg(test)]
impl FileSource for MemoryDir {
    fn starting_with(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .files
            .iter()
            .filter(|f| f.starts_with(prefix))
            .map(|f| self.path(f))
            .collect())
    }

    fn is_file(&self, path: &str) -> bool {
        path.strip_prefix(&self.root)
            .and_then(|rest| rest.strip_prefix('/'))
            .map_or(false, |name| self.files.contains(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).expect("Unable to create file");
    }

    #[test]
    fn open_rejects_files_and_missing_paths() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "A_rg1_R1.fq");

        let err = FastqDir::open(tmp.path().join("A_rg1_R1.fq")).unwrap_err();
        assert!(matches!(err, ManifestError::InvalidDirectory { .. }));

        let err = FastqDir::open(tmp.path().join("missing")).unwrap_err();
        assert!(matches!(err, ManifestError::InvalidDirectory { .. }));
    }

    #[test]
    fn file_names_lists_files_only_sorted() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "B_rg1_R1.fq");
        touch(tmp.path(), "A_rg1_R2.fq");
        touch(tmp.path(), "A_rg1_R1.fq");
        fs::create_dir(tmp.path().join("C_subdir")).unwrap();

        let dir = FastqDir::open(tmp.path()).unwrap();
        assert_eq!(
            dir.file_names(&[]).unwrap(),
            vec!["A_rg1_R1.fq", "A_rg1_R2.fq", "B_rg1_R1.fq"]
        );
    }

    #[test]
    fn file_names_filters_by_suffix() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "A_rg1_R1.fastq.gz");
        touch(tmp.path(), "A_rg1_R2.fastq.gz");
        touch(tmp.path(), "README");

        let dir = FastqDir::open(tmp.path()).unwrap();
        let names = dir.file_names(&[".fastq.gz".to_string()]).unwrap();
        assert_eq!(names, vec!["A_rg1_R1.fastq.gz", "A_rg1_R2.fastq.gz"]);
    }

    #[test]
    fn starting_with_globs_the_prefix_literally() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "S[1]_rg_R1.fq");
        touch(tmp.path(), "S[1]_rg_R2.fq");
        touch(tmp.path(), "S1_rg_R1.fq");

        let dir = FastqDir::open(tmp.path()).unwrap();
        let found = dir.starting_with("S[1]_rg_").unwrap();
        let root = dir.root().to_string_lossy().to_string();
        assert_eq!(
            found,
            vec![format!("{root}/S[1]_rg_R1.fq"), format!("{root}/S[1]_rg_R2.fq")]
        );
        assert!(dir.is_file(&found[0]));
        assert!(!dir.is_file(&format!("{root}/nothing.fq")));
    }

    #[test]
    fn memory_dir_answers_like_a_directory() {
        let dir = MemoryDir::new("/fq", &["A_rg1_R1.fq", "A_rg1_R2.fq", "B_rg1_R1.fq"]);
        assert_eq!(
            dir.starting_with("A_rg1_").unwrap(),
            vec!["/fq/A_rg1_R1.fq", "/fq/A_rg1_R2.fq"]
        );
        assert!(dir.is_file("/fq/B_rg1_R1.fq"));
        assert!(!dir.is_file("/fq/B_rg1_R2.fq"));
        assert!(!dir.is_file("B_rg1_R1.fq"));
    }
}
