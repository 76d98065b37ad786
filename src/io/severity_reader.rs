use super::readers::open_text_reader;
use crate::{core::annotation::SeverityTable, utils::util::Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SeverityRow {
    term: String,
    rank: u32,
}

/// Reads a tab-separated `term`/`rank` table into a severity ranking.
pub fn load_severity_table(path: &Path) -> Result<SeverityTable> {
    let reader = open_text_reader(path)?;
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = SeverityTable::new();
    for row in csv_reader.deserialize() {
        let row: SeverityRow = row?;
        table.insert(row.term, row.rank);
    }
    if table.is_empty() {
        return Err(crate::vcfframe_error!(
            "Severity table {} has no entries",
            path.display()
        ));
    }
    log::debug!("Loaded {} severity ranks from {}", table.len(), path.display());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_utils::make_temp_path;

    #[test]
    fn test_load_severity_table() {
        let path = make_temp_path("severity", "tsv");
        std::fs::write(&path, "term\trank\nmissense_variant\t1\n# comment\nstop_gained\t2\n").unwrap();
        let table = load_severity_table(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("missense_variant"), Some(1));
        assert_eq!(table.get("stop_gained"), Some(2));
    }

    #[test]
    fn test_load_severity_table_rejects_bad_rank() {
        let path = make_temp_path("severity", "tsv");
        std::fs::write(&path, "term\trank\nmissense_variant\tfirst\n").unwrap();
        assert!(load_severity_table(&path).is_err());
    }

    #[test]
    fn test_load_severity_table_rejects_empty() {
        let path = make_temp_path("severity", "tsv");
        std::fs::write(&path, "term\trank\n").unwrap();
        assert!(load_severity_table(&path).is_err());
    }
}
