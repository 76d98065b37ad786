use crate::{
    constants::{FILTER_PASS, MISSING_SENTINEL, VCF_EXTENSION},
    core::{
        record::{unquote, HeaderDescriptor, InfoDefinition, InfoType, VariantRecord},
        value::Value,
    },
    error::VcfFrameError,
    utils::util::{
        widen_f32, Result, MISSING_FLOAT, MISSING_INTEGER, VECTOR_END_FLOAT, VECTOR_END_INTEGER,
    },
};
use rust_htslib::bcf::{self, header::HeaderRecord, Read};
use std::{fmt::Display, path::Path};

/// Everything the normalization pipeline needs from one VCF file.
#[derive(Debug, Clone)]
pub struct LoadedVcf {
    pub records: Vec<VariantRecord>,
    pub sample_name: String,
    pub header: HeaderDescriptor,
}

/// Checks the argument before any parsing: usable string, `.vcf` suffix, exists.
pub fn validate_vcf_path(path: &Path) -> Result<&str> {
    let Some(path_str) = path.to_str().filter(|s| !s.is_empty()) else {
        log::error!("Received argument was {:?}.", path);
        return Err(VcfFrameError::InvalidPathArgument);
    };
    if !path_str.to_lowercase().ends_with(VCF_EXTENSION) {
        log::error!("Received argument was {path_str}.");
        return Err(VcfFrameError::InvalidExtension {
            path: path.to_path_buf(),
        });
    }
    if !path.exists() {
        log::error!("Received argument was {path_str}.");
        return Err(VcfFrameError::VcfNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(path_str)
}

pub fn load_vcf<P: AsRef<Path>>(path: P) -> Result<LoadedVcf> {
    let path = path.as_ref();
    let path_str = validate_vcf_path(path)?;
    log::info!("Parsing VCF File: {path_str}");

    let mut reader = bcf::Reader::from_path(path)
        .map_err(|e| crate::vcfframe_error!("Failed to open VCF file {}: {}", path_str, e))?;

    let header = header_descriptor(reader.header())?;
    let sample_name = match reader.header().samples().first() {
        Some(sample) => String::from_utf8_lossy(sample).into_owned(),
        None => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path_str.to_string()),
    };
    log::trace!("{path_str} sample name = {sample_name}");

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            crate::vcfframe_error!("Error reading record {} from {}: {e}", idx + 1, path_str)
        })?;
        let variant = variant_from_record(&record, &header)
            .map_err(|e| crate::vcfframe_error!("Record {} in {}: {e}", idx + 1, path_str))?;
        records.push(variant);
    }
    log::debug!("Loaded {} records from {}", records.len(), path_str);

    // htslib declares unknown INFO keys on the fly while parsing records.
    let parsed_header = header_descriptor(reader.header())?;
    let undeclared: Vec<&str> = parsed_header
        .definitions()
        .iter()
        .filter(|def| header.definition(&def.id).is_none())
        .map(|def| def.id.as_str())
        .collect();
    if !undeclared.is_empty() {
        log::warn!(
            "{path_str}: INFO keys missing from the header were skipped: {}",
            undeclared.join(", ")
        );
    }

    Ok(LoadedVcf {
        records,
        sample_name,
        header,
    })
}

pub fn header_descriptor(header: &bcf::header::HeaderView) -> Result<HeaderDescriptor> {
    let mut descriptor = HeaderDescriptor::new();
    for record in header.header_records() {
        let HeaderRecord::Info { values, .. } = record else {
            continue;
        };
        let id = values
            .get("ID")
            .ok_or_else(|| crate::vcfframe_error!("INFO header record is missing required ID field"))?;
        let info_type = values
            .get("Type")
            .map_or(InfoType::Unknown, |t| InfoType::from_header(t));
        descriptor.insert(InfoDefinition {
            id: id.clone(),
            number: values.get("Number").cloned().unwrap_or_default(),
            info_type,
            description: values
                .get("Description")
                .map(|d| unquote(d).to_string())
                .unwrap_or_default(),
        });
    }
    Ok(descriptor)
}

/// Reads the fixed columns and every declared INFO key of one record.
pub fn variant_from_record(record: &bcf::Record, header: &HeaderDescriptor) -> Result<VariantRecord> {
    let rid = record
        .rid()
        .ok_or_else(|| crate::vcfframe_error!("Record has no contig"))?;
    let chrom = String::from_utf8_lossy(record.header().rid2name(rid)?).into_owned();

    let alleles = record.alleles();
    let reference = alleles
        .first()
        .map(|allele| String::from_utf8_lossy(allele).into_owned())
        .unwrap_or_default();
    let mut variant = VariantRecord::new(&chrom, record.pos() + 1, &reference, &[]);
    variant.alt = alleles
        .iter()
        .skip(1)
        .map(|allele| String::from_utf8_lossy(allele).into_owned())
        .filter(|allele| allele != MISSING_SENTINEL)
        .collect();

    let id = String::from_utf8_lossy(&record.id()).into_owned();
    variant.id = (!id.is_empty() && id != MISSING_SENTINEL).then_some(id);

    let qual = record.qual();
    variant.qual = (!qual.is_nan()).then(|| widen_f32(qual));

    variant.filter = failed_filters(record);

    for definition in header.definitions() {
        if let Some(value) = info_value(record, definition)? {
            variant.insert_info(&definition.id, value);
        }
    }
    Ok(variant)
}

/// Semicolon-joined FILTER names other than PASS.
fn failed_filters(record: &bcf::Record) -> Option<String> {
    let names: Vec<String> = record
        .filters()
        .map(|id| String::from_utf8_lossy(&record.header().id_to_name(id)).into_owned())
        .filter(|name| name != FILTER_PASS && name != MISSING_SENTINEL)
        .collect();
    (!names.is_empty()).then(|| names.join(";"))
}

/// Typed INFO value of `definition` in `record`, `None` when absent.
///
/// Single-valued Integer and Float keys become numbers; everything else is
/// kept as comma-joined text for the allele splitter.
fn info_value(record: &bcf::Record, definition: &InfoDefinition) -> Result<Option<Value>> {
    let key = definition.id.as_bytes();
    let scalar = definition.number == "1";
    let value = match definition.info_type {
        InfoType::Flag => record
            .info(key)
            .flag()
            .map(|present| present.then_some(Value::Flag(true))),
        InfoType::Integer => record
            .info(key)
            .integer()
            .map(|values| values.map(|v| integer_value(&v, scalar))),
        InfoType::Float => record
            .info(key)
            .float()
            .map(|values| values.map(|v| float_value(&v, scalar))),
        InfoType::String | InfoType::Character | InfoType::Unknown => record
            .info(key)
            .string()
            .map(|values| values.map(|v| string_value(&v))),
    };
    match value {
        Ok(value) => Ok(value),
        Err(e) if e.to_string().contains("undefined in BCF/VCF header") => Ok(None),
        Err(e) => Err(crate::vcfframe_error!(
            "Error reading {} INFO from record: {e}",
            definition.id
        )),
    }
}

fn integer_value(values: &[i32], scalar: bool) -> Value {
    let present: Vec<Option<i32>> = values
        .iter()
        .copied()
        .take_while(|v| *v != VECTOR_END_INTEGER)
        .map(|v| (v != MISSING_INTEGER).then_some(v))
        .collect();
    match present.as_slice() {
        [] | [None] => Value::Missing,
        [Some(v)] if scalar => Value::Integer(i64::from(*v)),
        _ => Value::text(join_present(&present)),
    }
}

fn float_value(values: &[f32], scalar: bool) -> Value {
    let present: Vec<Option<f32>> = values
        .iter()
        .copied()
        .take_while(|v| v.to_bits() != VECTOR_END_FLOAT.to_bits())
        .map(|v| (v.to_bits() != MISSING_FLOAT.to_bits()).then_some(v))
        .collect();
    match present.as_slice() {
        [] | [None] => Value::Missing,
        [Some(v)] if scalar => Value::Number(widen_f32(*v)),
        _ => Value::text(join_present(&present)),
    }
}

fn string_value(values: &[&[u8]]) -> Value {
    let joined = values
        .iter()
        .map(|value| String::from_utf8_lossy(value))
        .collect::<Vec<_>>()
        .join(",");
    if joined.is_empty() {
        Value::Missing
    } else {
        Value::from_vcf_text(&joined)
    }
}

fn join_present<T: Display>(values: &[Option<T>]) -> String {
    values
        .iter()
        .map(|value| {
            value
                .as_ref()
                .map_or_else(|| MISSING_SENTINEL.to_string(), T::to_string)
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_utils::{make_temp_path, make_temp_vcf};
    use crate::utils::util::init_logger;

    const SMALL_VCF: &str = "\
##fileformat=VCFv4.2
##contig=<ID=1>
##contig=<ID=chr2>
##FILTER=<ID=q10,Description=\"Quality below 10\">
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total Depth\">
##INFO=<ID=MQ,Number=1,Type=Float,Description=\"Mapping Quality\">
##INFO=<ID=AF,Number=A,Type=Float,Description=\"Allele Frequency\">
##INFO=<ID=AC,Number=A,Type=Integer,Description=\"Allele Count\">
##INFO=<ID=HOM,Number=0,Type=Flag,Description=\"Homozygous\">
##INFO=<ID=ANN,Number=.,Type=String,Description=\"Functional annotations\">
##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNA12878
1\t100\trs1\tA\tG\t50\tPASS\tDP=10;MQ=0.1;AF=0.5;HOM\tGT\t1/1
1\t200\t.\tC\tT,G\t.\t.\tDP=7;AF=0.25,0.75;AC=1,.\tGT\t1/2
chr2\t1500\trs9;rs10\tAT\tA,ATT\t12.5\tq10\tANN=x|y,z|w\tGT\t0/1
chr2\t1600\t.\tG\t.\t.\t.\tDP=.\tGT\t0/0
";

    #[test]
    fn test_validate_rejects_empty_argument() {
        init_logger();
        let err = validate_vcf_path(Path::new("")).unwrap_err();
        assert!(matches!(err, VcfFrameError::InvalidPathArgument));
        assert_eq!(
            err.to_string(),
            "argument must be a string, path to a VCF File"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_rejects_non_utf8_argument() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        let path = Path::new(OsStr::from_bytes(b"sample\xff.vcf"));
        let err = validate_vcf_path(path).unwrap_err();
        assert!(matches!(err, VcfFrameError::InvalidPathArgument));
    }

    #[test]
    fn test_validate_rejects_wrong_extension_before_existence() {
        let err = validate_vcf_path(Path::new("/definitely/missing/sample.txt")).unwrap_err();
        assert!(matches!(err, VcfFrameError::InvalidExtension { .. }));
        assert_eq!(err.to_string(), "filepath must end with .vcf");
    }

    #[test]
    fn test_validate_reports_missing_file() {
        let err = validate_vcf_path(Path::new("/definitely/missing/sample.VCF")).unwrap_err();
        assert!(matches!(err, VcfFrameError::VcfNotFound { .. }));
        assert_eq!(err.to_string(), "File not found in vcf path");
    }

    #[test]
    fn test_join_present() {
        assert_eq!(join_present(&[Some(1), None, Some(3)]), "1,.,3");
        assert_eq!(join_present(&[Some(0.25f32), Some(0.75)]), "0.25,0.75");
    }

    #[test]
    fn test_load_vcf_fixed_columns() -> Result<()> {
        init_logger();
        let path = make_temp_vcf(SMALL_VCF);
        let loaded = load_vcf(&path)?;

        assert_eq!(loaded.sample_name, "NA12878");
        assert_eq!(loaded.records.len(), 4);
        assert_eq!(loaded.header.field_type("DP"), InfoType::Integer);
        assert_eq!(loaded.header.field_type("HOM"), InfoType::Flag);
        assert_eq!(loaded.header.description("AF"), "Allele Frequency");

        let first = &loaded.records[0];
        assert_eq!(first.chrom, "1");
        assert_eq!(first.pos, 100);
        assert_eq!(first.reference, "A");
        assert_eq!(first.alt, vec!["G"]);
        assert_eq!(first.id.as_deref(), Some("rs1"));
        assert_eq!(first.qual, Some(50.0));
        assert_eq!(first.filter, None);

        let second = &loaded.records[1];
        assert_eq!(second.alt, vec!["T", "G"]);
        assert_eq!(second.id, None);
        assert_eq!(second.qual, None);
        assert_eq!(second.filter, None);

        let third = &loaded.records[2];
        assert_eq!(third.chrom, "chr2");
        assert_eq!(third.id.as_deref(), Some("rs9;rs10"));
        assert_eq!(third.alt, vec!["A", "ATT"]);
        assert_eq!(third.qual, Some(12.5));
        assert_eq!(third.filter.as_deref(), Some("q10"));

        assert!(loaded.records[3].alt.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_vcf_types_info_values() -> Result<()> {
        let path = make_temp_vcf(SMALL_VCF);
        let records = load_vcf(&path)?.records;

        let first = &records[0];
        assert_eq!(first.info["DP"], Value::Integer(10));
        assert_eq!(first.info["MQ"], Value::Number(0.1));
        assert_eq!(first.info["AF"], Value::text("0.5"));
        assert_eq!(first.info["HOM"], Value::Flag(true));
        assert!(!first.info.contains_key("ANN"));

        let second = &records[1];
        assert_eq!(second.info["AF"], Value::text("0.25,0.75"));
        assert_eq!(second.info["AC"], Value::text("1,."));
        assert!(!second.info.contains_key("HOM"));

        assert_eq!(records[2].info["ANN"], Value::text("x|y,z|w"));
        assert!(records[3].info.get("DP").map_or(true, Value::is_missing));
        Ok(())
    }

    #[test]
    fn test_load_vcf_without_samples_uses_file_name() -> Result<()> {
        let vcf = "\
##fileformat=VCFv4.2
##contig=<ID=1>
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
1\t100\t.\tA\tG\t.\t.\t.
";
        let path = make_temp_path("no_samples", "vcf");
        std::fs::write(&path, vcf)?;
        let loaded = load_vcf(&path)?;
        let expected = path.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(loaded.sample_name, expected);
        assert_eq!(loaded.records.len(), 1);
        Ok(())
    }
}
