use super::table::Table;
use crate::{
    constants::GENE_NAME_COLUMN, error::VcfFrameError, io::panel_reader::load_panel,
    utils::util::Result,
};
use std::path::Path;

impl Table {
    /// Rows whose GENE_NAME is listed in the panel at `path`.
    pub fn filter_by_panel<P: AsRef<Path>>(&self, path: P) -> Result<Table> {
        let genes = load_panel(path)?;
        self.filter_by_genes(&genes)
    }

    /// Rows whose GENE_NAME is one of `genes`, grouped in `genes` order.
    ///
    /// An empty result is an error, never an empty table.
    pub fn filter_by_genes<S: AsRef<str>>(&self, genes: &[S]) -> Result<Table> {
        let gene_idx = self
            .column_index(GENE_NAME_COLUMN)
            .ok_or_else(|| VcfFrameError::MissingColumn(GENE_NAME_COLUMN.to_string()))?;

        let mut output = Table::new(self.columns().to_vec()).with_sample_name(self.sample_name());
        for gene in genes {
            let gene = gene.as_ref();
            for row in self.rows() {
                if row[gene_idx].as_text() == Some(gene) {
                    output.push_row(row.clone());
                }
            }
        }

        if output.is_empty() {
            return Err(VcfFrameError::EmptyPanel);
        }
        log::debug!(
            "Panel of {} genes kept {} of {} rows",
            genes.len(),
            output.len(),
            self.len()
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        test_utils::{make_table, make_temp_path},
        value::Value,
    };

    fn gene_table() -> Table {
        make_table(
            &["CHROM", "POS", "REF", "ALT", "GENE_NAME"],
            vec![
                vec!["17".into(), 100i64.into(), "A".into(), "G".into(), "BRCA1".into()],
                vec!["17".into(), 200i64.into(), "C".into(), "T".into(), "TP53".into()],
                vec!["17".into(), 300i64.into(), "G".into(), "A".into(), "BRCA1".into()],
                vec!["17".into(), 400i64.into(), "T".into(), "C".into(), Value::Missing],
            ],
        )
        .with_sample_name("S1")
    }

    #[test]
    fn test_filter_by_genes() {
        let table = gene_table();
        let output = table.filter_by_genes(&["TP53"]).unwrap();
        assert_eq!(output.len(), 1);
        assert_eq!(output.get(0, "GENE_NAME"), Some(&Value::text("TP53")));
        assert_eq!(output.sample_name(), "S1");
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_filter_follows_panel_order() {
        let output = gene_table().filter_by_genes(&["TP53", "BRCA1"]).unwrap();
        let positions: Vec<i64> = output.keys().unwrap().iter().map(|k| k.pos).collect();
        assert_eq!(positions, vec![200, 100, 300]);
    }

    #[test]
    fn test_empty_panel_result_is_an_error() {
        let err = gene_table().filter_by_genes(&["NOTPRESENT"]).unwrap_err();
        assert!(matches!(err, VcfFrameError::EmptyPanel));
        assert_eq!(err.to_string(), "Panel Result is empty");
    }

    #[test]
    fn test_missing_gene_column() {
        let table = make_table(&["CHROM"], vec![vec!["1".into()]]);
        let err = table.filter_by_genes(&["TP53"]).unwrap_err();
        assert!(matches!(err, VcfFrameError::MissingColumn(_)));
    }

    #[test]
    fn test_filter_by_panel_file() {
        let path = make_temp_path("panel", "tsv");
        std::fs::write(&path, "GeneSymbol\nBRCA1\n").unwrap();
        let output = gene_table().filter_by_panel(&path).unwrap();
        assert_eq!(output.len(), 2);
    }
}
