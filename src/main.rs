use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{debug, info, warn, LevelFilter};

use rust_sample_manifest::{output_path, read_sample_list, FastqDir, Mode, SampleFiles};

/// Pipelines want a table of samples and their paired fastq files.
/// This tool finds the R1/R2 pairs in a fastq folder, groups them into samples and readgroups,
/// and writes that table, optionally with STAR or bwa read-group arguments.
#[derive(Parser)]
#[clap(version = "1.0.0")]
struct Opts {
    /// Directory containing fastq files
    #[clap(parse(from_os_str))]
    fastq_dir: PathBuf,

    /// Name of the output tsv, placed next to the fastq directory (default samples.tsv)
    #[clap(short, long)]
    output: Option<String>,

    /// Debug output; -v for warnings and per-sample counts, -vv for the readgroups
    #[clap(short, long, parse(from_occurrences))]
    verbose: u64,

    /// Form commands for mapping with STAR
    #[clap(short, long, conflicts_with_all = &["bwa", "nextflow"])]
    star: bool,

    /// Form read-group flags for mapping with bwa (mem 2)
    #[clap(short, long, conflicts_with = "nextflow")]
    bwa: bool,

    /// Nextflow table: sample_name, readgroup, r1, r2, bwa_read_group_string
    #[clap(short, long)]
    nextflow: bool,

    /// tsv of sample names (first column) to look for instead of deriving them from the file names
    #[clap(short, long, parse(from_os_str))]
    input_samples: Option<PathBuf>,

    /// Only consider files ending on one of these
    ///
    /// Can be specified multiple times:
    ///   --suffix .fastq.gz --suffix .fq.gz
    #[clap(short = 'x', long = "suffix", multiple_occurrences = true)]
    suffixes: Vec<String>,
}

fn init_logging(verbose: u64) {
    let level = match verbose {
        0 => LevelFilter::Error,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter(None, level)
        .init();
}

fn main() -> anyhow::Result<()> {
    let opts: Opts = Opts::parse();
    init_logging(opts.verbose);

    let dir = FastqDir::open(&opts.fastq_dir)?;
    let file_names = dir
        .file_names(&opts.suffixes)
        .with_context(|| format!("listing {}", dir.root().display()))?;
    debug!("{} files in {}", file_names.len(), dir.root().display());

    let mut data = match &opts.input_samples {
        Some(path) => {
            let names = read_sample_list(path)
                .with_context(|| format!("reading sample list {}", path.display()))?;
            SampleFiles::from_sample_names(&names, &file_names, &dir)?
        }
        None => SampleFiles::from_file_names(&file_names, &dir)?,
    };

    for diagnostic in &data.diagnostics {
        warn!("{diagnostic}");
    }
    for sample in &data.samples {
        debug!("{} has {:?} readgroups", sample.name(), sample.readgroups());
    }
    for sample in &data.samples {
        info!("{} has {} readgroups", sample.name(), sample.len());
    }

    let mode = Mode::from_flags(opts.star, opts.bwa, opts.nextflow);
    data.apply_commands(mode);

    let tsv_file = output_path(dir.root(), opts.output.as_deref());
    data.write_manifest(&tsv_file, mode)
        .with_context(|| format!("writing {}", tsv_file.display()))?;

    println!("Formed {} of {} samples.", tsv_file.display(), data.len());
    Ok(())
}
