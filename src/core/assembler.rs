use super::{
    record::{VariantKey, VariantRecord},
    table::{Row, Table},
    value::Value,
};
use crate::constants::{COL_ALT, COL_CHROM, COL_FILTER, COL_ID, COL_POS, COL_QUAL, COL_REF};
use std::collections::HashMap;

const FIXED_COLUMNS: [&str; 7] = [COL_CHROM, COL_POS, COL_REF, COL_ALT, COL_ID, COL_QUAL, COL_FILTER];

/// Builds one row per distinct (CHROM, POS, REF, ALT) with ALT still comma-joined.
///
/// A record repeating an earlier key replaces that row in place.
pub fn assemble(records: &[VariantRecord]) -> Table {
    let mut columns: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
    let mut column_index: HashMap<String, usize> = columns
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.clone(), idx))
        .collect();

    for record in records {
        for key in &record.info_order {
            if !column_index.contains_key(key) {
                column_index.insert(key.clone(), columns.len());
                columns.push(key.clone());
            }
        }
    }

    let mut rows: Vec<Row> = Vec::with_capacity(records.len());
    let mut row_by_key: HashMap<VariantKey, usize> = HashMap::with_capacity(records.len());
    let mut replaced = 0usize;

    for record in records {
        let mut row: Row = vec![Value::Missing; columns.len()];
        row[0] = Value::text(&record.chrom);
        row[1] = Value::Integer(record.pos);
        row[2] = Value::text(&record.reference);
        row[3] = Value::text(record.joined_alt());
        row[4] = record.id.as_deref().into();
        row[5] = record.qual.into();
        row[6] = record.filter.as_deref().into();
        for (key, value) in &record.info {
            row[column_index[key]] = value.clone();
        }

        match row_by_key.get(&record.key()) {
            Some(&idx) => {
                rows[idx] = row;
                replaced += 1;
            }
            None => {
                row_by_key.insert(record.key(), rows.len());
                rows.push(row);
            }
        }
    }

    if replaced > 0 {
        log::warn!("{replaced} records repeated an earlier CHROM/POS/REF/ALT and replaced it");
    }
    log::debug!("Assembled {} rows x {} columns", rows.len(), columns.len());

    let mut table = Table::new(columns);
    for row in rows {
        table.push_row(row);
    }
    table
}
