use super::{table::Table, value::Value};
use std::{fs, path::PathBuf};

pub fn make_temp_path(stem: &str, ext: &str) -> PathBuf {
    let prefix = format!("vcfframe_test_{stem}_");
    let suffix = format!(".{ext}");
    let (_, path) = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(&suffix)
        .tempfile_in(std::env::temp_dir())
        .expect("temp file should be creatable")
        .keep()
        .expect("temp file should be persistable");
    path
}

pub fn make_temp_vcf(contents: &str) -> PathBuf {
    let path = make_temp_path("variants", "vcf");
    fs::write(&path, contents).expect("test VCF should be writable");
    path
}

pub fn make_table(columns: &[&str], rows: Vec<Vec<Value>>) -> Table {
    Table::from_rows(columns.iter().map(|c| c.to_string()).collect(), rows)
        .expect("test rows should match the column count")
}

/// Text cells for every column of `row`, in column order.
pub fn row_text(table: &Table, row: usize) -> Vec<String> {
    table.rows()[row].iter().map(Value::to_output_text).collect()
}

pub const ANN_HEADER: &str = "##INFO=<ID=ANN,Number=.,Type=String,Description=\"Functional annotations: 'Allele | Annotation | Annotation_Impact | Gene_Name | Gene_ID | Feature_Type | Feature_ID | Transcript_BioType | Rank | HGVS.c | HGVS.p | cDNA.pos / cDNA.length | CDS.pos / CDS.length | AA.pos / AA.length | Distance | ERRORS / WARNINGS / INFO'\">";

/// A minimal VCF with the given extra header lines, sample and data lines.
pub fn vcf_text(extra_header: &[&str], records: &[&str]) -> String {
    let mut text = String::from("##fileformat=VCFv4.2\n##contig=<ID=1>\n##contig=<ID=2>\n##contig=<ID=17>\n");
    for line in extra_header {
        text.push_str(line);
        text.push('\n');
    }
    text.push_str("##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">\n");
    text.push_str("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tSAMPLE1\n");
    for record in records {
        text.push_str(record);
        text.push('\n');
    }
    text
}
