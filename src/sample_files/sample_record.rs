//sample_record.rs
use super::Readgroup;

/// A sample and its readgroups, in the order they were found.
#[derive(Debug, Clone, Default)]
pub struct SampleRecord {
    name: String,

    readgroups: Vec<Readgroup>,

    /// STAR `--readFilesIn ...` fragment, once derived
    command: Option<String>,
}

impl SampleRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn readgroups(&self) -> &[Readgroup] {
        &self.readgroups
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// Attach a readgroup unless one with the same identifier is already there.
    /// Returns whether it was added; a repeat is silently ignored.
    pub fn add_readgroup(&mut self, readgroup: Readgroup) -> bool {
        if self.readgroups.contains(&readgroup) {
            return false;
        }
        self.readgroups.push(readgroup);
        true
    }

    /// All mate files: every R1 in readgroup order, then every R2.
    pub fn all_paths<'a>(&'a self) -> impl Iterator<Item = &'a str> + 'a {
        let r1 = self.readgroups.iter().map(|rg| rg.r1());
        let r2 = self.readgroups.iter().map(|rg| rg.r2());
        r1.chain(r2)
    }

    /// Number of readgroups
    pub fn len(&self) -> usize {
        self.readgroups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readgroups.is_empty()
    }

    pub(crate) fn set_command(&mut self, command: String) {
        self.command = Some(command);
    }

    pub(crate) fn readgroups_mut(&mut self) -> impl Iterator<Item = &mut Readgroup> {
        self.readgroups.iter_mut()
    }
}
