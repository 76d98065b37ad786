use crate::{
    constants::{HET_COLUMN, HOM_COLUMN, ZYGOSITY_COLUMN},
    core::{table::Table, value::Value},
};

pub fn zygosity(hom: Value) -> Value {
    match hom {
        Value::Flag(true) => Value::text("HOM"),
        Value::Flag(false) | Value::Missing => Value::text("HET"),
        other => other,
    }
}

/// Turns the HOM flag into a HOM/HET ZIGOSITY column and drops HET.
pub fn map_zygosity(mut table: Table) -> Table {
    if !table.map_column(HOM_COLUMN, zygosity) {
        return table;
    }
    table.drop_column(HET_COLUMN);
    table.rename_column(HOM_COLUMN, ZYGOSITY_COLUMN);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_utils::make_table;

    #[test]
    fn test_map_zygosity() {
        let table = make_table(
            &["CHROM", "HOM", "HET", "DP"],
            vec![
                vec!["1".into(), true.into(), Value::Missing, 3i64.into()],
                vec!["1".into(), Value::Missing, true.into(), 4i64.into()],
                vec!["1".into(), false.into(), Value::Missing, 5i64.into()],
            ],
        );
        let output = map_zygosity(table);
        assert_eq!(output.columns(), &["CHROM", "ZIGOSITY", "DP"]);
        let values: Vec<_> = output.column_values("ZIGOSITY").unwrap().cloned().collect();
        assert_eq!(
            values,
            vec![Value::text("HOM"), Value::text("HET"), Value::text("HET")]
        );
    }

    #[test]
    fn test_map_zygosity_without_hom_keeps_het() {
        let table = make_table(&["HET"], vec![vec![true.into()]]);
        let output = map_zygosity(table.clone());
        assert_eq!(output, table);
    }
}
