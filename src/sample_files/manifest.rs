// src/sample_files/manifest.rs
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, Serializer};

use super::{CommandStyle, Readgroup, SampleRecord};
use crate::errors::{ManifestError, Result};

/// Output layout of the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// sample_name, files
    #[default]
    Default,
    /// sample_name, files, command
    Star,
    /// sample_name, {readgroup: [r1, r2, command]}
    Bwa,
    /// one row per readgroup
    Nextflow,
}

impl Mode {
    /// Flags are mutually exclusive; if several are set anyway star wins over bwa over nextflow.
    pub fn from_flags(star: bool, bwa: bool, nextflow: bool) -> Self {
        if star {
            Mode::Star
        } else if bwa {
            Mode::Bwa
        } else if nextflow {
            Mode::Nextflow
        } else {
            Mode::Default
        }
    }

    pub fn header(self) -> &'static [&'static str] {
        match self {
            Mode::Default | Mode::Bwa => &["sample_name", "files"],
            Mode::Star => &["sample_name", "files", "command"],
            Mode::Nextflow => &["sample_name", "readgroup", "r1", "r2", "bwa_read_group_string"],
        }
    }

    /// The command fragments this layout needs.
    pub fn command_style(self) -> Option<CommandStyle> {
        match self {
            Mode::Star => Some(CommandStyle::Star),
            Mode::Bwa | Mode::Nextflow => Some(CommandStyle::Bwa),
            Mode::Default => None,
        }
    }
}

/// One line of the manifest, borrowing from the samples it describes.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestRow<'a> {
    Files {
        sample: &'a str,
        files: Vec<&'a str>,
    },
    Star {
        sample: &'a str,
        files: Vec<&'a str>,
        command: &'a str,
    },
    Bwa {
        sample: &'a str,
        readgroups: &'a [Readgroup],
    },
    Nextflow {
        sample: &'a str,
        readgroup: &'a Readgroup,
    },
}

/// Readgroup id -> [r1, r2, command], keeping readgroup order.
struct ReadgroupFiles<'a>(&'a [Readgroup]);

impl Serialize for ReadgroupFiles<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|rg| (rg.id(), [rg.r1(), rg.r2(), rg.command().unwrap_or_default()])),
        )
    }
}

impl<'a> ManifestRow<'a> {
    /// Cell values in header order. List and mapping cells are JSON.
    pub fn cells(&self) -> Result<Vec<String>> {
        Ok(match self {
            ManifestRow::Files { sample, files } => {
                vec![sample.to_string(), serde_json::to_string(files)?]
            }
            ManifestRow::Star { sample, files, command } => vec![
                sample.to_string(),
                serde_json::to_string(files)?,
                command.to_string(),
            ],
            ManifestRow::Bwa { sample, readgroups } => vec![
                sample.to_string(),
                serde_json::to_string(&ReadgroupFiles(readgroups))?,
            ],
            ManifestRow::Nextflow { sample, readgroup } => vec![
                sample.to_string(),
                readgroup.id().to_string(),
                readgroup.r1().to_string(),
                readgroup.r2().to_string(),
                readgroup.command().unwrap_or_default().to_string(),
            ],
        })
    }
}

/// Shape finalized samples into rows for `mode`. Sample order is kept and
/// nextflow rows follow readgroup order within each sample.
pub fn assemble(samples: &[SampleRecord], mode: Mode) -> Vec<ManifestRow<'_>> {
    match mode {
        Mode::Default => samples
            .iter()
            .map(|s| ManifestRow::Files {
                sample: s.name(),
                files: s.all_paths().collect(),
            })
            .collect(),
        Mode::Star => samples
            .iter()
            .map(|s| ManifestRow::Star {
                sample: s.name(),
                files: s.all_paths().collect(),
                command: s.command().unwrap_or_default(),
            })
            .collect(),
        Mode::Bwa => samples
            .iter()
            .map(|s| ManifestRow::Bwa {
                sample: s.name(),
                readgroups: s.readgroups(),
            })
            .collect(),
        Mode::Nextflow => samples
            .iter()
            .flat_map(|s| {
                s.readgroups().iter().map(move |rg| ManifestRow::Nextflow {
                    sample: s.name(),
                    readgroup: rg,
                })
            })
            .collect(),
    }
}

/// Header plus one tab-separated record per row.
pub fn write_tsv<W: Write>(writer: W, mode: Mode, rows: &[ManifestRow<'_>]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);
    wtr.write_record(mode.header())?;
    for row in rows {
        wtr.write_record(row.cells()?)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the manifest for `samples` to `out_path`.
///
/// The table goes to `{out_path}.tmp` first and is renamed into place, so a
/// failed write never leaves a partial manifest behind.
pub fn write_manifest<P: AsRef<Path>>(out_path: P, samples: &[SampleRecord], mode: Mode) -> Result<()> {
    let out_path = out_path.as_ref();
    let tmp_path = PathBuf::from(format!("{}.tmp", out_path.display()));

    let rows = assemble(samples, mode);
    let written: Result<()> = File::create(&tmp_path)
        .map_err(ManifestError::from)
        .and_then(|f| write_tsv(BufWriter::new(f), mode, &rows));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, out_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_files::fastq_dir::{FileSource, MemoryDir};

    fn samples() -> Vec<SampleRecord> {
        let d = MemoryDir::new(
            "/fq",
            &[
                "A_rg1_R1.fq", "A_rg1_R2.fq", "A_rg2_R1.fq", "A_rg2_R2.fq",
                "B_rg1_R1.fq", "B_rg1_R2.fq",
            ],
        );
        let mut out = Vec::new();
        for (name, ids) in [("A", vec!["A_rg1_", "A_rg2_"]), ("B", vec!["B_rg1_"])] {
            let mut s = SampleRecord::new(name);
            for id in ids {
                let matches = d.starting_with(id).unwrap();
                s.add_readgroup(Readgroup::from_matches(id, &matches, &d).unwrap());
            }
            out.push(s);
        }
        out
    }

    fn render(samples: &[SampleRecord], mode: Mode) -> String {
        let mut buf = Vec::new();
        write_tsv(&mut buf, mode, &assemble(samples, mode)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn from_flags_picks_one_mode() {
        assert_eq!(Mode::from_flags(false, false, false), Mode::Default);
        assert_eq!(Mode::from_flags(true, false, false), Mode::Star);
        assert_eq!(Mode::from_flags(false, true, false), Mode::Bwa);
        assert_eq!(Mode::from_flags(false, false, true), Mode::Nextflow);
        assert_eq!(Mode::from_flags(true, true, true), Mode::Star);
    }

    #[test]
    fn default_rows_list_all_mates() {
        let s = samples();
        let rows = assemble(&s, Mode::Default);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            ManifestRow::Files {
                sample: "A",
                files: vec!["/fq/A_rg1_R1.fq", "/fq/A_rg2_R1.fq", "/fq/A_rg1_R2.fq", "/fq/A_rg2_R2.fq"],
            }
        );
        assert_eq!(
            rows[1].cells().unwrap(),
            vec!["B", r#"["/fq/B_rg1_R1.fq","/fq/B_rg1_R2.fq"]"#]
        );
    }

    #[test]
    fn nextflow_rows_are_flattened_in_order() {
        let mut s = samples();
        for sample in &mut s {
            CommandStyle::Bwa.apply(sample);
        }
        let rows = assemble(&s, Mode::Nextflow);
        let keys: Vec<(String, String)> = rows
            .iter()
            .map(|r| {
                let c = r.cells().unwrap();
                (c[0].clone(), c[1].clone())
            })
            .collect();
        assert_eq!(
            keys,
            vec![
                ("A".to_string(), "A_rg1_".to_string()),
                ("A".to_string(), "A_rg2_".to_string()),
                ("B".to_string(), "B_rg1_".to_string()),
            ]
        );
        let last = rows[2].cells().unwrap();
        assert_eq!(last[2], "/fq/B_rg1_R1.fq");
        assert_eq!(last[3], "/fq/B_rg1_R2.fq");
        assert_eq!(last[4], r" -R '@RG\tID:B_rg1_\tPL:ILLUMINA\tSM:B' ");
    }

    #[test]
    fn bwa_cell_maps_readgroups_in_order() {
        let mut s = samples();
        for sample in &mut s {
            CommandStyle::Bwa.apply(sample);
        }
        let cells = assemble(&s, Mode::Bwa)[0].cells().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&cells[1]).unwrap();
        let map = parsed.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["A_rg2_"][0], "/fq/A_rg2_R1.fq");
        assert_eq!(map["A_rg2_"][1], "/fq/A_rg2_R2.fq");
        assert!(map["A_rg2_"][2].as_str().unwrap().contains("ID:A_rg2_"));
        assert!(cells[1].find("A_rg1_").unwrap() < cells[1].find("A_rg2_").unwrap());
    }

    #[test]
    fn star_table_has_command_column() {
        let mut s = samples();
        for sample in &mut s {
            CommandStyle::Star.apply(sample);
        }
        let text = render(&s, Mode::Star);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("sample_name\tfiles\tcommand"));
        let first: Vec<&str> = lines.next().unwrap().split('\t').collect();
        assert_eq!(first.len(), 3);
        assert_eq!(first[0], "A");
        assert!(first[2].starts_with("--readFilesIn /fq/A_rg1_R1.fq,/fq/A_rg2_R1.fq "));
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn headers_match_modes() {
        let s = samples();
        for (mode, header) in [
            (Mode::Default, "sample_name\tfiles"),
            (Mode::Bwa, "sample_name\tfiles"),
            (Mode::Nextflow, "sample_name\treadgroup\tr1\tr2\tbwa_read_group_string"),
        ] {
            assert_eq!(render(&s, mode).lines().next(), Some(header));
        }
    }

    #[test]
    fn empty_manifest_is_just_the_header() {
        assert_eq!(render(&[], Mode::Default), "sample_name\tfiles\n");
    }

    #[test]
    fn write_manifest_leaves_no_tmp_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("samples.tsv");
        write_manifest(&out, &samples(), Mode::Default).unwrap();
        assert!(out.is_file());
        assert!(!tmp.path().join("samples.tsv.tmp").exists());
        let text = fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 3);
    }
}
