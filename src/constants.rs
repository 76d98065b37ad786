use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const DEFAULT_PRIORITIZE: bool = true;
pub const DEFAULT_AMINOCHANGE: bool = true;
pub const DEFAULT_ZYGOSITY: bool = true;
pub const DEFAULT_ESP6500: bool = true;
pub const DEFAULT_CLINVAR: bool = true;
pub const DEFAULT_ROUND_PRECISION: u32 = 6;

/// Output placeholder for every missing, empty or unparsable cell.
pub const MISSING_SENTINEL: &str = ".";
pub const VCF_EXTENSION: &str = ".vcf";

pub const COL_CHROM: &str = "CHROM";
pub const COL_POS: &str = "POS";
pub const COL_REF: &str = "REF";
pub const COL_ALT: &str = "ALT";
pub const COL_ID: &str = "ID";
pub const COL_QUAL: &str = "QUAL";
pub const COL_FILTER: &str = "FILTER";
/// Passing records carry no FILTER value.
pub const FILTER_PASS: &str = "PASS";
pub const KEY_COLUMNS: [&str; 4] = [COL_CHROM, COL_POS, COL_REF, COL_ALT];

/// How a multi-allelic ALT is broken apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitPolicy {
    /// First allele versus the comma-joined remainder; records with three or
    /// more alleles keep a joined tail on the second row.
    Binary,
}

pub const ALLELE_SPLIT_POLICY: SplitPolicy = SplitPolicy::Binary;

pub const ALLELE_INDEXED_COLUMNS: [&str; 8] = [
    "ID",
    "AC",
    "AF",
    "SAMPLES_AF",
    "MLEAC",
    "MLEAF",
    "VARTYPE",
    "dbSNPBuildID",
];
pub const MULTI_VALUE_PREFIXES: [&str; 2] = ["1000", "CLINVAR"];

pub const ANN_COLUMN: &str = "ANN";
pub const ANN_DESCRIPTION_PREFIX: &str = "Functional annotations:";
pub const ANN_ALLELE: &str = "Allele";
pub const ANN_EFFECT: &str = "Annotation";
pub const ANN_HGVS_C: &str = "HGVS.c";
pub const ANN_NULL_VALUE: &str = "null";

pub const HGVS_P_COLUMN: &str = "HGVS.P";
pub const HGVS_P_PREFIX: &str = "p.";
pub const AMINOCHANGE_COLUMN: &str = "AMINOCHANGE";
pub const AMINOCHANGE_FLAG: &str = "CHANGE";

pub const HOM_COLUMN: &str = "HOM";
pub const HET_COLUMN: &str = "HET";
pub const ZYGOSITY_COLUMN: &str = "ZIGOSITY";

pub const ESP6500_MAF_COLUMN: &str = "ESP6500_MAF";
pub const ESP6500_MAF_POPULATIONS: [&str; 3] =
    ["ESP6500_MAF_EA", "ESP6500_MAF_AA", "ESP6500_MAF_ALL"];
pub const ESP6500_FREQUENCY_DIVISOR: f64 = 100.0;
pub const ESP6500_PH_COLUMN: &str = "ESP6500_PH";
pub const POLYPHEN_PRED_COLUMN: &str = "POLYPHEN_PRED";
pub const POLYPHEN_SCORE_COLUMN: &str = "POLYPHEN_SCORE";
pub const ESP6500_RENAMES: [(&str, &str); 3] = [
    ("ANNOTATION", "EFFECT"),
    ("ANNOTATION_IMPACT", "IMPACT"),
    ("ID", "RSID"),
];

pub const CLINVAR_SIG_COLUMN: &str = "CLINVAR_CLNSIG";
/// Applied in order as literal substring replacements.
pub const CLINVAR_SIGNIFICANCE: [(&str, &str); 9] = [
    ("255", "other"),
    ("0", "Uncertain significance"),
    ("1", "not provided"),
    ("2", "Benign"),
    ("3", "Likely Benign"),
    ("4", "Likely pathogenic"),
    ("5", "Pathogenic"),
    ("6", "drug response"),
    ("7", "histocompatibility"),
];

pub const GENE_NAME_COLUMN: &str = "GENE_NAME";
pub const PANEL_SHEET: &str = "GeneList";
pub const PANEL_SYMBOL_COLUMN: &str = "GeneSymbol";

pub const SEVERITY_ORDER: [&str; 29] = [
    "exon_loss_variant",
    "frameshift_variant",
    "stop_gained",
    "stop_lost",
    "start_lost",
    "splice_acceptor_variant",
    "splice_donor_variant",
    "disruptive_inframe_deletion",
    "inframe_insertion",
    "disruptive_inframe_insertion",
    "inframe_deletion",
    "missense_variant",
    "splice_region_variant",
    "stop_retained_variant",
    "initiator_codon_variant",
    "synonymous_variant",
    "start_retained",
    "coding_sequence_variant",
    "5_prime_UTR_variant",
    "3_prime_UTR_variant",
    "5_prime_UTR_premature_start_codon_gain_variant",
    "intron_variant",
    "non_coding_exon_variant",
    "upstream_gene_variant",
    "downstream_gene_variant",
    "TF_binding_site_variant",
    "regulatory_region_variant",
    "intergenic_region",
    "transcript",
];

/// Effect term to rank, 1 being the most severe.
pub static DEFAULT_SEVERITY: Lazy<HashMap<String, u32>> = Lazy::new(|| {
    SEVERITY_ORDER
        .iter()
        .enumerate()
        .map(|(idx, term)| (term.to_string(), idx as u32 + 1))
        .collect()
});
