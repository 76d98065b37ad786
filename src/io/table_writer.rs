use crate::{core::table::Table, utils::util::Result};
use flate2::{write::GzEncoder, Compression};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    Tsv { is_uncompressed: bool },
}

impl OutputType {
    fn infer_from_extension(path: &str) -> OutputType {
        let path_lower = path.to_lowercase();
        OutputType::Tsv {
            is_uncompressed: !(path_lower.ends_with(".gz") || path_lower.ends_with(".bgz")),
        }
    }
}

/// Writes finished tables as tab-separated text with a header row.
pub struct TableWriter {
    writer: csv::Writer<Box<dyn Write>>,
}

impl TableWriter {
    pub fn new(output: Option<&str>) -> Result<Self> {
        let sink: Box<dyn Write> = match output {
            Some(path) => {
                let output_type = OutputType::infer_from_extension(path);
                log::trace!("{:?}", output_type);
                let file = File::create(Path::new(path)).map_err(|e| {
                    crate::vcfframe_error!("Failed to create output file {}: {}", path, e)
                })?;
                match output_type {
                    OutputType::Tsv {
                        is_uncompressed: true,
                    } => Box::new(BufWriter::new(file)),
                    OutputType::Tsv {
                        is_uncompressed: false,
                    } => Box::new(GzEncoder::new(BufWriter::new(file), Compression::default())),
                }
            }
            None => Box::new(BufWriter::new(io::stdout())),
        };

        let writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(sink);
        Ok(TableWriter { writer })
    }

    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        self.writer.write_record(table.columns())?;
        for row in table.rows() {
            self.writer
                .write_record(row.iter().map(|value| value.to_output_text()))?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        test_utils::{make_table, make_temp_path},
        value::Value,
    };
    use flate2::read::MultiGzDecoder;
    use std::io::Read;

    fn small_table() -> Table {
        make_table(
            &["CHROM", "POS", "REF", "ALT", "AF"],
            vec![
                vec!["1".into(), 10i64.into(), "A".into(), "G".into(), "0.5".into()],
                vec!["2".into(), 20i64.into(), "C".into(), "T".into(), Value::Missing],
            ],
        )
    }

    #[test]
    fn test_output_type_from_extension() {
        assert_eq!(
            OutputType::infer_from_extension("out.tsv"),
            OutputType::Tsv {
                is_uncompressed: true
            }
        );
        assert_eq!(
            OutputType::infer_from_extension("out.TSV.GZ"),
            OutputType::Tsv {
                is_uncompressed: false
            }
        );
    }

    #[test]
    fn test_write_plain_table() -> Result<()> {
        let path = make_temp_path("table", "tsv");
        let path_str = path.to_string_lossy().into_owned();
        let mut writer = TableWriter::new(Some(&path_str))?;
        writer.write_table(&small_table())?;
        writer.finish()?;

        let contents = std::fs::read_to_string(&path)?;
        assert_eq!(
            contents,
            "CHROM\tPOS\tREF\tALT\tAF\n1\t10\tA\tG\t0.5\n2\t20\tC\tT\t.\n"
        );
        Ok(())
    }

    #[test]
    fn test_write_gzip_table() -> Result<()> {
        let path = make_temp_path("table", "tsv.gz");
        let path_str = path.to_string_lossy().into_owned();
        let mut writer = TableWriter::new(Some(&path_str))?;
        writer.write_table(&small_table())?;
        writer.finish()?;

        let mut contents = String::new();
        MultiGzDecoder::new(std::fs::File::open(&path)?).read_to_string(&mut contents)?;
        assert!(contents.starts_with("CHROM\tPOS"));
        assert_eq!(contents.lines().count(), 3);
        Ok(())
    }
}
