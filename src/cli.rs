use crate::{
    constants::*,
    core::{
        annotation::SeverityTable,
        pipeline::{Prioritization, ReadOptions},
    },
    io::severity_reader::load_severity_table,
};
use anyhow::{anyhow, Result};
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

/// Version string shown by `--version` and logged at startup.
pub static FULL_VERSION: Lazy<String> = Lazy::new(|| env!("CARGO_PKG_VERSION").to_string());

#[derive(Parser, Debug)]
#[command(name="vcfframe",
          version=&**FULL_VERSION,
          about="Normalize annotated VCF files into analysis-ready variant tables",
          long_about = None,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true
    )]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Convert(ConvertArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Convert(_) => "convert",
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["vcfs", "vcf_list"]),
))]
#[command(arg_required_else_help(true))]
pub struct ConvertArgs {
    /// VCF files to convert
    #[arg(
        long = "vcf",
        value_name = "VCF",
        num_args = 1..,
        value_parser = check_file_exists
    )]
    pub vcfs: Option<Vec<PathBuf>>,

    /// File containing paths of VCF files to convert (one per line)
    #[arg(
        long = "vcf-list",
        value_name = "VCF_LIST",
        value_parser = check_file_exists
    )]
    pub vcf_list: Option<PathBuf>,

    /// Output file for a single VCF, output directory for several [default: standard output]
    #[arg(
        short = 'o',
        long = "output",
        value_name = "OUTPUT",
        value_parser = check_prefix_path
    )]
    pub output: Option<String>,

    /// Keep only variants in genes of this panel (xlsx/xls/ods sheet GeneList, or csv/tsv)
    #[arg(
        long = "panel",
        value_name = "PANEL",
        value_parser = check_file_exists
    )]
    pub panel: Option<PathBuf>,

    /// Number of threads to use
    #[arg(
        short = '@',
        value_name = "THREADS",
        default_value = "1",
        value_parser = threads_in_range
    )]
    pub num_threads: usize,

    #[command(flatten)]
    pub decode_args: DecodeArgs,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct DecodeArgs {
    /// Tab-separated effect ranking (columns: term, rank) replacing the built-in one
    #[arg(
        long = "severity-table",
        value_name = "TSV",
        value_parser = check_file_exists,
        conflicts_with = "no_prioritize",
        help_heading = "Decoding"
    )]
    pub severity_table: Option<PathBuf>,

    /// Keep every ANN annotation unflattened
    #[arg(long = "no-prioritize", help_heading = "Decoding")]
    pub no_prioritize: bool,

    /// Do not add the AMINOCHANGE column
    #[arg(long = "no-aminochange", help_heading = "Decoding")]
    pub no_aminochange: bool,

    /// Do not map HOM/HET flags to ZIGOSITY
    #[arg(long = "no-zygosity", help_heading = "Decoding")]
    pub no_zygosity: bool,

    /// Do not split ESP6500 frequencies and PolyPhen predictions
    #[arg(long = "no-esp6500", help_heading = "Decoding")]
    pub no_esp6500: bool,

    /// Do not translate ClinVar significance codes
    #[arg(long = "no-clinvar", help_heading = "Decoding")]
    pub no_clinvar: bool,

    /// Decimal places for numeric columns
    #[arg(
        long = "precision",
        value_name = "DIGITS",
        default_value_t = DEFAULT_ROUND_PRECISION,
        help_heading = "Decoding"
    )]
    pub precision: u32,

    /// Leave numeric columns unrounded
    #[arg(long = "no-round", help_heading = "Decoding")]
    pub no_round: bool,
}

impl DecodeArgs {
    pub fn read_options(&self) -> Result<ReadOptions> {
        let prioritize = match (&self.severity_table, self.no_prioritize) {
            (_, true) => Prioritization::Disabled,
            (Some(path), false) => Prioritization::Custom(load_ranking(path)?),
            (None, false) => Prioritization::Default,
        };
        Ok(ReadOptions::new().with(|o| {
            o.prioritize = prioritize;
            o.aminochange = !self.no_aminochange;
            o.zygosity = !self.no_zygosity;
            o.esp6500 = !self.no_esp6500;
            o.clinvar = !self.no_clinvar;
            o.round_precision = (!self.no_round).then_some(self.precision);
        }))
    }
}

fn load_ranking(path: &Path) -> Result<SeverityTable> {
    load_severity_table(path)
        .map_err(|e| anyhow!("Failed to load severity table {}: {}", path.display(), e))
}

/// Initializes the verbosity level for logging based on the command-line arguments.
///
/// Sets up the logger with a specific verbosity level that is determined
/// by the number of occurrences of the `-v` or `--verbose` flag in the command-line arguments.
pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.module_path().unwrap_or("unknown_module"),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse::<usize>()
        .map_err(|_| anyhow!("`{}` is not a valid thread number", s))?;
    if thread == 0 {
        return Err(anyhow!("Number of threads must be >= 1"));
    }
    Ok(thread)
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        return Err(anyhow!("File does not exist: {}", path.display()));
    }
    Ok(path.to_path_buf())
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(anyhow!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}

impl ConvertArgs {
    pub fn process_vcf_paths(&self) -> Result<Vec<PathBuf>> {
        match (&self.vcfs, &self.vcf_list) {
            (Some(vcfs), None) => Ok(vcfs.clone()),
            (None, Some(list_path)) => Self::read_vcf_paths_from_file(list_path),
            _ => unreachable!("Either --vcf or --vcf-list is provided, never both"),
        }
    }

    fn read_vcf_paths_from_file(path: &Path) -> Result<Vec<PathBuf>> {
        let file = File::open(path)
            .map_err(|e| anyhow!("Failed to open VCF list file {}: {}", path.display(), e))?;
        let reader = BufReader::new(file);

        let mut paths = Vec::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| anyhow!("Error reading line {}: {}", line_num + 1, e))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let path = PathBuf::from(trimmed);
            if !path.exists() {
                Err(anyhow!("VCF file does not exist: {}", path.display()))?;
            }
            paths.push(path);
        }

        if paths.is_empty() {
            Err(anyhow!("No VCF paths found in the input file".to_string()))?;
        }

        Ok(paths)
    }
}
