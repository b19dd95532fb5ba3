// src/sample_files/commands.rs
use super::{Readgroup, SampleRecord};

/// Platform tag written into every read-group line.
pub const PLATFORM: &str = "ILLUMINA";

/// Which aligner the per-sample command fragments are built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStyle {
    /// one `--readFilesIn` fragment per sample
    Star,
    /// one `-R` read-group flag per readgroup
    Bwa,
}

impl CommandStyle {
    /// Fill the command fields of `sample`. Files and readgroups are left alone.
    pub fn apply(self, sample: &mut SampleRecord) {
        match self {
            CommandStyle::Star => {
                if let Some(command) = star_command(sample) {
                    sample.set_command(command);
                }
            }
            CommandStyle::Bwa => {
                let name = sample.name().to_string();
                for rg in sample.readgroups_mut() {
                    let command = bwa_read_group(&name, rg);
                    rg.set_command(command);
                }
            }
        }
    }
}

/// STAR input and read-group arguments for all readgroups of `sample`.
///
/// Mate lists are comma-joined so position i of both lists and the i-th
/// read-group clause describe the same readgroup. `None` for a sample without
/// readgroups.
pub fn star_command(sample: &SampleRecord) -> Option<String> {
    let readgroups = sample.readgroups();
    if readgroups.is_empty() {
        return None;
    }
    let r1s: Vec<&str> = readgroups.iter().map(|rg| rg.r1()).collect();
    let r2s: Vec<&str> = readgroups.iter().map(|rg| rg.r2()).collect();
    let clauses: Vec<String> = readgroups
        .iter()
        .map(|rg| format!("ID:{} PL:{} SM:{} ", rg.id(), PLATFORM, sample.name()))
        .collect();
    Some(format!(
        "--readFilesIn {} {} --outSAMattributes All --outSAMattrRGline {}",
        r1s.join(","),
        r2s.join(","),
        clauses.join(", ")
    ))
}

/// bwa `-R` flag for one readgroup. The `\t` stay escaped so the string can be
/// pasted into a shell command as is.
pub fn bwa_read_group(sample_name: &str, readgroup: &Readgroup) -> String {
    format!(
        r" -R '@RG\tID:{}\tPL:{}\tSM:{}' ",
        readgroup.id(),
        PLATFORM,
        sample_name
    )
}
