use super::{
    annotation::{prioritize_annotations, AnnotationSchema, DefaultSeverity, SeverityRanking, SeverityTable},
    assembler::assemble,
    decoders::{compute_aminochange, decode_clinvar, decode_esp6500, map_zygosity, round_numeric_columns},
    normalize::{finalize, uppercase_columns},
    splitter::split_alleles,
    table::Table,
};
use crate::{
    constants::{
        ANN_COLUMN, DEFAULT_AMINOCHANGE, DEFAULT_CLINVAR, DEFAULT_ESP6500, DEFAULT_PRIORITIZE,
        DEFAULT_ROUND_PRECISION, DEFAULT_ZYGOSITY,
    },
    io::vcf_reader::{load_vcf, LoadedVcf},
    utils::util::Result,
};
use std::path::Path;

/// How ANN annotations are reduced to one per variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Prioritization {
    /// Keep ANN as a raw column.
    Disabled,
    #[default]
    Default,
    Custom(SeverityTable),
}

impl Prioritization {
    fn ranking(&self) -> Option<&dyn SeverityRanking> {
        match self {
            Prioritization::Disabled => None,
            Prioritization::Default => Some(&DefaultSeverity as &dyn SeverityRanking),
            Prioritization::Custom(table) => Some(table as &dyn SeverityRanking),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    pub prioritize: Prioritization,
    pub aminochange: bool,
    pub zygosity: bool,
    pub esp6500: bool,
    pub clinvar: bool,
    /// Decimal places for numeric columns; `None` leaves numbers untouched.
    pub round_precision: Option<u32>,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, updates: impl FnOnce(&mut Self)) -> Self {
        updates(&mut self);
        self
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            prioritize: if DEFAULT_PRIORITIZE {
                Prioritization::Default
            } else {
                Prioritization::Disabled
            },
            aminochange: DEFAULT_AMINOCHANGE,
            zygosity: DEFAULT_ZYGOSITY,
            esp6500: DEFAULT_ESP6500,
            clinvar: DEFAULT_CLINVAR,
            round_precision: Some(DEFAULT_ROUND_PRECISION),
        }
    }
}

/// Loads a VCF and normalizes it into one row per (CHROM, POS, REF, ALT).
pub fn read_vcf<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Table> {
    let loaded = load_vcf(path)?;
    process_loaded(loaded, options)
}

/// Runs every normalization stage over already loaded records.
pub fn process_loaded(loaded: LoadedVcf, options: &ReadOptions) -> Result<Table> {
    log::trace!("{:?}", options);
    let LoadedVcf {
        records,
        sample_name,
        header,
    } = loaded;

    let mut table = assemble(&records).with_sample_name(sample_name);
    drop(records);
    table = split_alleles(table)?;

    if let Some(ranking) = options.prioritize.ranking() {
        match AnnotationSchema::from_header(&header) {
            Some(schema) => table = prioritize_annotations(table, &schema, ranking)?,
            None if table.has_column(ANN_COLUMN) => {
                log::warn!("{ANN_COLUMN} is not declared in the header, annotations are kept as is")
            }
            None => {}
        }
    }

    table = uppercase_columns(table);
    if options.aminochange {
        table = compute_aminochange(table);
    }
    if options.zygosity {
        table = map_zygosity(table);
    }
    if options.esp6500 {
        table = decode_esp6500(table);
    }
    if options.clinvar {
        table = decode_clinvar(table);
    }
    if let Some(precision) = options.round_precision {
        table = round_numeric_columns(table, &header, precision);
    }

    let table = finalize(table);
    log::debug!(
        "{}: {} rows x {} columns",
        table.sample_name(),
        table.len(),
        table.columns().len()
    );
    Ok(table)
}
